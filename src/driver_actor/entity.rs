//! [`ActorEntity`] implementation for [`Driver`].

use crate::driver_actor::DriverError;
use crate::model::{Driver, DriverCreate, DriverId, DriverQuery, DriverUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Driver {
    type Id = DriverId;
    type Create = DriverCreate;
    type Update = DriverUpdate;
    type Query = DriverQuery;
    type Context = ();
    type Error = DriverError;

    fn from_create_params(id: DriverId, params: DriverCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user_id: params.user_id,
            name: params.name,
            contact: params.contact,
            available: true,
        })
    }

    /// One profile per user.
    fn conflicts_with(&self, existing: &Self) -> Option<Self::Error> {
        (self.user_id == existing.user_id).then_some(DriverError::AlreadyExists(self.user_id))
    }

    fn matches(&self, query: &DriverQuery) -> bool {
        match query {
            DriverQuery::All => true,
            DriverQuery::ByUser(user_id) => self.user_id == *user_id,
        }
    }

    async fn on_update(&mut self, update: DriverUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(contact) = update.contact {
            self.contact = Some(contact);
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        Ok(())
    }
}
