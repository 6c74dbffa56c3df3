//! Error types for the Driver actor.

use crate::model::UserId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    #[error("Driver not found: {0}")]
    NotFound(String),

    /// The user already has a driver profile.
    #[error("Driver profile already exists for {0}")]
    AlreadyExists(UserId),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DriverError {
    fn from(msg: String) -> Self {
        DriverError::ActorCommunicationError(msg)
    }
}
