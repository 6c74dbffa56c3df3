//! # Resource Actor
//!
//! In-memory record stores, one Tokio task per record kind, addressed through
//! type-safe clients. The dispatch core keeps users, drivers, orders and catalog
//! data in these actors and talks to them only through CRUD + query messages.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the record, its payload types and hooks.
//! 2. **Runtime** ([`ResourceActor`]): the sequential message loop owning the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): cloneable async handles.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Restaurant { id: u32, name: String }
//!
//! #[derive(Debug)] struct RestaurantCreate { name: String }
//! #[derive(Debug)] struct RestaurantUpdate { name: Option<String> }
//! #[derive(Debug, thiserror::Error)] #[error("restaurant: {0}")] struct RestaurantError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Restaurant {
//!     type Id = u32;
//!     type Create = RestaurantCreate;
//!     type Update = RestaurantUpdate;
//!     type Query = ();
//!     type Context = ();
//!     type Error = RestaurantError;
//!
//!     fn from_create_params(id: u32, params: RestaurantCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     async fn on_update(&mut self, update: RestaurantUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Restaurant>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(RestaurantCreate { name: "Paradise".into() }).await.unwrap();
//!     let found = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(found.name, "Paradise");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and handles one message at a time.
//! - Different actors run in parallel; nothing is shared between them.
//! - A workflow touching two record kinds (an order, then its driver) is two
//!   messages to two actors with no envelope around them.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
