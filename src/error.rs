//! Errors surfaced by the dispatch engine.
//!
//! Each per-actor error folds into one [`DispatchError`] so callers match on a single
//! enum. Failures to reach an actor become [`DispatchError::Store`].

use crate::catalog_actor::CatalogError;
use crate::driver_actor::DriverError;
use crate::model::ParseStatusError;
use crate::order_actor::OrderError;
use crate::payment::TokenGenerationError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    /// The caller is unknown or lacks the role the action needs.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller has the role but does not own or hold the target.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The requested status or driver change is not allowed from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("payment token generation failed: {0}")]
    TokenGeneration(#[from] TokenGenerationError),

    /// A record store could not be reached.
    #[error("store error: {0}")]
    Store(String),
}

impl From<UserError> for DispatchError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => DispatchError::NotFound(format!("user {}", id)),
            UserError::AlreadyExists(email) => DispatchError::InvalidInput(format!("email already in use: {}", email)),
            UserError::ValidationError(msg) => DispatchError::InvalidInput(msg),
            UserError::ActorCommunicationError(msg) => DispatchError::Store(msg),
        }
    }
}

impl From<DriverError> for DispatchError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::NotFound(id) => DispatchError::NotFound(format!("driver {}", id)),
            DriverError::AlreadyExists(user_id) => {
                DispatchError::InvalidInput(format!("driver profile already exists for {}", user_id))
            }
            DriverError::ActorCommunicationError(msg) => DispatchError::Store(msg),
        }
    }
}

impl From<OrderError> for DispatchError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => DispatchError::NotFound(format!("order {}", id)),
            e @ (OrderError::InvalidTransition { .. } | OrderError::DriverLocked(_)) => {
                DispatchError::InvalidTransition(e.to_string())
            }
            OrderError::ValidationError(msg) => DispatchError::InvalidInput(msg),
            OrderError::ActorCommunicationError(msg) => DispatchError::Store(msg),
        }
    }
}

impl From<CatalogError> for DispatchError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => DispatchError::NotFound(id),
            CatalogError::ValidationError(msg) => DispatchError::InvalidInput(msg),
            CatalogError::ActorCommunicationError(msg) => DispatchError::Store(msg),
        }
    }
}

impl From<ParseStatusError> for DispatchError {
    fn from(e: ParseStatusError) -> Self {
        DispatchError::InvalidInput(e.to_string())
    }
}
