//! # Catalog Actors
//!
//! Restaurants and their menu items live in two separate actors; both surface
//! [`CatalogError`] and are reached through a single [`CatalogClient`].

pub mod error;
pub mod menu_item;
pub mod restaurant;

pub use error::*;

use crate::clients::CatalogClient;
use crate::model::{MenuItem, Restaurant};
use resource_actor::ResourceActor;

/// Creates the restaurant and menu-item actors and the client that fronts both.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, ResourceActor<MenuItem>, CatalogClient) {
    let (restaurant_actor, restaurants) = ResourceActor::new(buffer_size);
    let (menu_item_actor, menu_items) = ResourceActor::new(buffer_size);
    (restaurant_actor, menu_item_actor, CatalogClient::new(restaurants, menu_items))
}
