//! [`ActorEntity`] implementation for [`User`].
//!
//! Emails are unique, compared case-insensitively; the actor enforces it through
//! `conflicts_with` so two concurrent signups cannot both win.

use crate::model::{User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Query = UserQuery;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let email = params.email.trim().to_string();
        if email.is_empty() {
            return Err(UserError::ValidationError("email is required".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            email,
            phone: params.phone,
            address: params.address,
            roles: params.roles,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> Option<Self::Error> {
        self.email
            .eq_ignore_ascii_case(&existing.email)
            .then(|| UserError::AlreadyExists(self.email.clone()))
    }

    fn matches(&self, query: &UserQuery) -> bool {
        match query {
            UserQuery::All => true,
            UserQuery::ByEmail(email) => self.email.eq_ignore_ascii_case(email.trim()),
        }
    }

    /// Applies the present fields of the patch.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(roles) = update.roles {
            self.roles = roles;
        }
        Ok(())
    }
}
