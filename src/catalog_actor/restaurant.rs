//! [`ActorEntity`] implementation for [`Restaurant`]. Updates replace every field.

use crate::catalog_actor::CatalogError;
use crate::model::{Restaurant, RestaurantDetails, RestaurantId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate(details: &RestaurantDetails) -> Result<(), CatalogError> {
    if details.name.trim().is_empty() {
        return Err(CatalogError::ValidationError("restaurant name is required".into()));
    }
    if let Some(rating) = details.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(CatalogError::ValidationError(format!("rating out of range: {}", rating)));
        }
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantDetails;
    type Update = RestaurantDetails;
    type Query = ();
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: RestaurantId, details: RestaurantDetails) -> Result<Self, Self::Error> {
        validate(&details)?;
        Ok(Self { id, details })
    }

    async fn on_update(&mut self, details: RestaurantDetails, _ctx: &()) -> Result<(), Self::Error> {
        validate(&details)?;
        self.details = details;
        Ok(())
    }
}
