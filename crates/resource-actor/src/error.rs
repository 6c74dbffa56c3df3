//! # Framework Errors
//!
//! Plumbing-level failures shared by every actor and client. Record-specific
//! failures raised inside hooks travel as [`FrameworkError::EntityError`] and can be
//! recovered with [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed hook error, or hands back `self` when it is something else.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("slot taken: {0}")]
    struct SlotTaken(u32);

    #[test]
    fn test_downcast_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(SlotTaken(7)));
        assert_eq!(err.downcast_entity::<SlotTaken>().unwrap(), SlotTaken(7));
    }

    #[test]
    fn test_downcast_keeps_plumbing_errors() {
        let err = FrameworkError::ActorClosed;
        assert!(matches!(
            err.downcast_entity::<SlotTaken>(),
            Err(FrameworkError::ActorClosed)
        ));
    }

    #[test]
    fn test_downcast_wrong_type_preserves_message() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        match err.downcast_entity::<SlotTaken>() {
            Err(FrameworkError::EntityError(inner)) => assert_eq!(inner.to_string(), "disk"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
