//! Account signup and the restaurant/menu surface.

use super::{DispatchService, Signup};
use crate::error::DispatchError;
use crate::model::{
    MenuItem, MenuItemCreate, MenuItemDetails, MenuItemId, Restaurant, RestaurantDetails, RestaurantId, Role, User,
    UserCreate, UserId,
};
use crate::policy::Action;
use crate::user_actor::UserError;
use resource_actor::ActorClient;
use std::collections::BTreeSet;
use tracing::{info, instrument};

impl DispatchService {
    /// Registers a customer or, for `DRIVER`/`AGENT`, a driver with a fresh profile.
    #[instrument(skip(self, signup), fields(email = %signup.email))]
    pub async fn signup(&self, signup: Signup) -> Result<User, DispatchError> {
        let email = signup.email.trim().to_string();
        if email.is_empty() {
            return Err(DispatchError::InvalidInput("email is required".into()));
        }
        let in_use = || DispatchError::InvalidInput("email already in use".into());
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(in_use());
        }

        let role = Role::from_signup(signup.role.as_deref());
        let params = UserCreate {
            name: signup.name,
            email,
            phone: signup.phone,
            address: signup.address,
            roles: BTreeSet::from([role]),
        };
        let id = match self.users.create_user(params).await {
            Ok(id) => id,
            Err(UserError::AlreadyExists(_)) => return Err(in_use()),
            Err(e) => return Err(e.into()),
        };
        let user = self
            .users
            .get(id)
            .await?
            .ok_or_else(|| DispatchError::NotFound(format!("user {}", id)))?;

        if role == Role::Driver {
            self.drivers.upsert_for_user(&user, user.phone.clone()).await?;
        }
        info!(user_id = %user.id, ?role, "User registered");
        Ok(user)
    }

    // --- Public reads ---

    #[instrument(skip(self))]
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, DispatchError> {
        Ok(self.catalog.list_restaurants().await?)
    }

    #[instrument(skip(self))]
    pub async fn restaurant_menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, DispatchError> {
        if self.catalog.restaurant(restaurant_id).await?.is_none() {
            return Err(DispatchError::NotFound(format!("restaurant {}", restaurant_id)));
        }
        Ok(self.catalog.menu_for(restaurant_id).await?)
    }

    // --- Admin ---

    #[instrument(skip(self))]
    pub async fn create_restaurant(
        &self,
        admin_id: UserId,
        details: RestaurantDetails,
    ) -> Result<Restaurant, DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        Ok(self.catalog.create_restaurant(details).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        admin_id: UserId,
        restaurant_id: RestaurantId,
        details: RestaurantDetails,
    ) -> Result<Restaurant, DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        Ok(self.catalog.update_restaurant(restaurant_id, details).await?)
    }

    /// Removes every menu item the restaurant owns, then the restaurant itself.
    /// If an item cannot be removed the restaurant stays.
    #[instrument(skip(self))]
    pub async fn delete_restaurant(&self, admin_id: UserId, restaurant_id: RestaurantId) -> Result<(), DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        if self.catalog.restaurant(restaurant_id).await?.is_none() {
            return Err(DispatchError::NotFound(format!("restaurant {}", restaurant_id)));
        }
        let menu = self.catalog.menu_for(restaurant_id).await?;
        for item in &menu {
            self.catalog.delete_menu_item(item.id).await?;
        }
        self.catalog.delete_restaurant(restaurant_id).await?;
        info!(%restaurant_id, menu_items = menu.len(), "Restaurant removed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_menu_item(
        &self,
        admin_id: UserId,
        restaurant_id: RestaurantId,
        details: MenuItemDetails,
    ) -> Result<MenuItem, DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        if self.catalog.restaurant(restaurant_id).await?.is_none() {
            return Err(DispatchError::NotFound(format!("restaurant {}", restaurant_id)));
        }
        Ok(self
            .catalog
            .create_menu_item(MenuItemCreate { restaurant_id, details })
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(
        &self,
        admin_id: UserId,
        menu_item_id: MenuItemId,
        details: MenuItemDetails,
    ) -> Result<MenuItem, DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        Ok(self.catalog.update_menu_item(menu_item_id, details).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, admin_id: UserId, menu_item_id: MenuItemId) -> Result<(), DispatchError> {
        self.authorized(admin_id, Action::ManageCatalog).await?;
        Ok(self.catalog.delete_menu_item(menu_item_id).await?)
    }
}
