//! # Food Dispatch
//!
//! The order lifecycle and driver-assignment core of a food-delivery service.
//!
//! Customers place orders against a restaurant's menu; admins confirm them and
//! assign drivers; drivers move the orders they hold towards delivery. Every order
//! change that touches a driver also keeps that driver's availability flag in step.
//!
//! ## Module Tour
//!
//! - [`model`]: records and their create/patch payloads.
//! - [`user_actor`], [`driver_actor`], [`order_actor`], [`catalog_actor`]: one
//!   [`resource_actor::ResourceActor`] per record kind.
//! - [`clients`]: typed handles onto those actors.
//! - [`policy`]: who may do what.
//! - [`dispatch`]: the status graph and [`DispatchService`](dispatch::DispatchService),
//!   the only code that writes to more than one actor per call.
//! - [`payment`]: payment tokens attached at placement.
//! - [`lifecycle`]: [`DispatchSystem`](lifecycle::DispatchSystem) startup/shutdown and
//!   tracing setup.
//! - [`config`]: environment-driven settings.
//!
//! ## Quick Start
//!
//! ```rust
//! use food_dispatch::config::Config;
//! use food_dispatch::dispatch::Signup;
//! use food_dispatch::lifecycle::DispatchSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = DispatchSystem::new(&Config::default());
//!
//!     let driver = system
//!         .service
//!         .signup(Signup {
//!             name: "Ravi".into(),
//!             email: "ravi@example.com".into(),
//!             phone: Some("98480 22338".into()),
//!             address: None,
//!             role: Some("driver".into()),
//!         })
//!         .await?;
//!     let profile = system.service.driver_profile(driver.id).await?;
//!     assert!(profile.available);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod driver_actor;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment;
pub mod policy;
pub mod user_actor;

pub use error::DispatchError;
