//! # Catalog Client
//!
//! Fronts both the restaurant and the menu-item actors.
use crate::catalog_actor::CatalogError;
use crate::model::{
    MenuItem, MenuItemCreate, MenuItemDetails, MenuItemId, MenuItemQuery, Restaurant, RestaurantDetails,
    RestaurantId,
};
use resource_actor::FrameworkError;
use resource_actor::ResourceClient;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CatalogClient {
    restaurants: ResourceClient<Restaurant>,
    menu_items: ResourceClient<MenuItem>,
}

fn map_error(e: FrameworkError) -> CatalogError {
    match e.downcast_entity::<CatalogError>() {
        Ok(err) => err,
        Err(FrameworkError::NotFound(id)) => CatalogError::NotFound(id),
        Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
    }
}

impl CatalogClient {
    pub fn new(restaurants: ResourceClient<Restaurant>, menu_items: ResourceClient<MenuItem>) -> Self {
        Self {
            restaurants,
            menu_items,
        }
    }

    // --- Restaurants ---

    #[instrument(skip(self))]
    pub async fn create_restaurant(&self, details: RestaurantDetails) -> Result<Restaurant, CatalogError> {
        debug!("Sending request");
        let id = self.restaurants.create(details).await.map_err(map_error)?;
        self.restaurant(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, CatalogError> {
        self.restaurants.get(id).await.map_err(map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogError> {
        let mut all = self.restaurants.list(()).await.map_err(map_error)?;
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: RestaurantId,
        details: RestaurantDetails,
    ) -> Result<Restaurant, CatalogError> {
        self.restaurants.update(id, details).await.map_err(map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), CatalogError> {
        self.restaurants.delete(id).await.map_err(map_error)
    }

    // --- Menu items ---

    #[instrument(skip(self))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, CatalogError> {
        debug!("Sending request");
        let id = self.menu_items.create(params).await.map_err(map_error)?;
        self.menu_item(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, CatalogError> {
        self.menu_items.get(id).await.map_err(map_error)
    }

    /// A restaurant's menu ordered by id.
    #[instrument(skip(self))]
    pub async fn menu_for(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, CatalogError> {
        let mut items = self
            .menu_items
            .list(MenuItemQuery::ByRestaurant(restaurant_id))
            .await
            .map_err(map_error)?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(&self, id: MenuItemId, details: MenuItemDetails) -> Result<MenuItem, CatalogError> {
        self.menu_items.update(id, details).await.map_err(map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), CatalogError> {
        self.menu_items.delete(id).await.map_err(map_error)
    }
}
