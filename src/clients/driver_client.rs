//! # Driver Client
//!
//! Lookups by owning user, the sorted directory listing, availability writes and
//! the create-or-refresh used at signup and on first driver access.
use crate::driver_actor::DriverError;
use crate::model::{Driver, DriverCreate, DriverId, DriverQuery, DriverUpdate, User, UserId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Driver actor.
#[derive(Clone)]
pub struct DriverClient {
    inner: ResourceClient<Driver>,
}

impl DriverClient {
    pub fn new(inner: ResourceClient<Driver>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Driver> for DriverClient {
    type Error = DriverError;

    fn inner(&self) -> &ResourceClient<Driver> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<DriverError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => DriverError::NotFound(id),
            Err(other) => DriverError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl DriverClient {
    #[instrument(skip(self))]
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Driver>, DriverError> {
        let found = self.list(DriverQuery::ByUser(user_id)).await?;
        Ok(found.into_iter().next())
    }

    /// Every driver, ordered by name then id.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Driver>, DriverError> {
        let mut drivers = self.list(DriverQuery::All).await?;
        drivers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(drivers)
    }

    #[instrument(skip(self))]
    pub async fn update_driver(&self, id: DriverId, update: DriverUpdate) -> Result<Driver, DriverError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_availability(&self, id: DriverId, available: bool) -> Result<Driver, DriverError> {
        self.update_driver(id, DriverUpdate::availability(available)).await
    }

    /// Creates the user's driver profile, or refreshes the existing one.
    ///
    /// An existing profile gets the user's name only when its own is blank, and
    /// `contact` only when one is supplied. A new profile starts available with
    /// `contact`, falling back to the user's phone.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn upsert_for_user(&self, user: &User, contact: Option<String>) -> Result<Driver, DriverError> {
        let contact = contact.filter(|c| !c.trim().is_empty());

        if let Some(existing) = self.get_by_user(user.id).await? {
            let mut update = DriverUpdate::default();
            if existing.name.trim().is_empty() {
                update.name = Some(user.name.clone());
            }
            update.contact = contact;
            if update == DriverUpdate::default() {
                return Ok(existing);
            }
            return self.update_driver(existing.id, update).await;
        }

        let params = DriverCreate {
            user_id: user.id,
            name: user.name.clone(),
            contact: contact.or_else(|| user.phone.clone()),
        };
        let id = match self.inner.create(params).await.map_err(Self::map_error) {
            Ok(id) => id,
            // Lost a race with a concurrent upsert for the same user.
            Err(DriverError::AlreadyExists(_)) => {
                return self
                    .get_by_user(user.id)
                    .await?
                    .ok_or_else(|| DriverError::NotFound(user.id.to_string()));
            }
            Err(e) => return Err(e),
        };
        info!(%id, "Driver profile created");
        self.get(id)
            .await?
            .ok_or_else(|| DriverError::NotFound(id.to_string()))
    }

    /// The user's profile, created on first access.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn ensure_for_user(&self, user: &User) -> Result<Driver, DriverError> {
        match self.get_by_user(user.id).await? {
            Some(driver) => Ok(driver),
            None => self.upsert_for_user(user, None).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use resource_actor::mock::MockClient;

    fn user() -> User {
        User {
            id: UserId(4),
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: Some("98480".into()),
            address: None,
            roles: [Role::Driver].into_iter().collect(),
        }
    }

    fn driver(id: u32, name: &str) -> Driver {
        Driver {
            id: DriverId(id),
            user_id: UserId(4),
            name: name.into(),
            contact: None,
            available: true,
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_profile_with_phone_fallback() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_list().return_ok(vec![]);
        mock.expect_create().return_ok(DriverId(1));
        mock.expect_get(DriverId(1)).return_ok(Some(Driver {
            contact: Some("98480".into()),
            ..driver(1, "Ravi")
        }));

        let client = DriverClient::new(mock.client());
        let created = client.upsert_for_user(&user(), Some("  ".into())).await.unwrap();
        assert_eq!(created.contact.as_deref(), Some("98480"));
        assert!(created.available);
        mock.verify();
    }

    #[tokio::test]
    async fn test_upsert_fills_blank_name_only() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_list().return_ok(vec![driver(2, "")]);
        mock.expect_update(DriverId(2)).return_ok(driver(2, "Ravi"));

        let client = DriverClient::new(mock.client());
        client.upsert_for_user(&user(), None).await.unwrap();

        assert_eq!(
            mock.take_updates(),
            vec![DriverUpdate {
                name: Some("Ravi".into()),
                ..Default::default()
            }]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_upsert_without_changes_skips_write() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_list().return_ok(vec![driver(2, "R. Kumar")]);

        let client = DriverClient::new(mock.client());
        let same = client.upsert_for_user(&user(), None).await.unwrap();
        assert_eq!(same.name, "R. Kumar");
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_name_then_id() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_list()
            .return_ok(vec![driver(3, "Bala"), driver(2, "Anil"), driver(1, "Bala")]);

        let client = DriverClient::new(mock.client());
        let ids: Vec<u32> = client.list_all().await.unwrap().iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
