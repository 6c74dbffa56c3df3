//! # User Client
//!
//! High-level API for the `User` actor.
use crate::model::{Role, User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let found = self.list(UserQuery::ByEmail(email.to_string())).await?;
        Ok(found.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// `false` for an unknown user.
    #[instrument(skip(self))]
    pub async fn has_role(&self, id: UserId, role: Role) -> Result<bool, UserError> {
        Ok(self.get(id).await?.is_some_and(|user| user.has_role(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;
    use std::collections::BTreeSet;

    fn user(id: u32, roles: &[Role]) -> User {
        User {
            id: UserId(id),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            address: None,
            roles: roles.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[tokio::test]
    async fn test_has_role() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(1)).return_ok(Some(user(1, &[Role::Admin])));
        mock.expect_get(UserId(2)).return_ok(None);

        let client = UserClient::new(mock.client());
        assert!(client.has_role(UserId(1), Role::Admin).await.unwrap());
        assert!(!client.has_role(UserId(2), Role::Admin).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_not_found_maps_to_user_error() {
        let mut mock = MockClient::<User>::new();
        mock.expect_update(UserId(9))
            .return_err(FrameworkError::NotFound("user_9".into()));

        let client = UserClient::new(mock.client());
        let err = client
            .update_user(UserId(9), UserUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, UserError::NotFound("user_9".into()));
        mock.verify();
    }
}
