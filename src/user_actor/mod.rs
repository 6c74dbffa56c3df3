//! # User Actor
//!
//! Owns the account records. No dependencies (`Context = ()`) and no custom actions.
//!
//! - [`entity`]: [`ActorEntity`](resource_actor::ActorEntity) implementation for [`User`]
//! - [`error`]: [`UserError`]
//! - [`new()`]: factory returning the actor and its [`UserClient`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use resource_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
