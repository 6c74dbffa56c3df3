//! # Driver Actor
//!
//! Owns driver profiles. A profile is keyed by its own [`DriverId`](crate::model::DriverId)
//! and linked to exactly one user; creating a second profile for the same user is
//! rejected inside the actor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DriverClient;
use crate::model::Driver;
use resource_actor::ResourceActor;

/// Creates a new Driver actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Driver>, DriverClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, DriverClient::new(generic_client))
}
