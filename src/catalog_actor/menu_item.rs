//! [`ActorEntity`] implementation for [`MenuItem`].

use crate::catalog_actor::CatalogError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemDetails, MenuItemId, MenuItemQuery};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate(details: &MenuItemDetails) -> Result<(), CatalogError> {
    if details.name.trim().is_empty() {
        return Err(CatalogError::ValidationError("menu item name is required".into()));
    }
    if !details.price.is_finite() || details.price < 0.0 {
        return Err(CatalogError::ValidationError(format!("invalid price: {}", details.price)));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemDetails;
    type Query = MenuItemQuery;
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        validate(&params.details)?;
        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            details: params.details,
        })
    }

    fn matches(&self, query: &MenuItemQuery) -> bool {
        match query {
            MenuItemQuery::All => true,
            MenuItemQuery::ByRestaurant(restaurant_id) => self.restaurant_id == *restaurant_id,
        }
    }

    /// Replaces the editable fields; the owning restaurant never changes.
    async fn on_update(&mut self, details: MenuItemDetails, _ctx: &()) -> Result<(), Self::Error> {
        validate(&details)?;
        self.details = details;
        Ok(())
    }
}
