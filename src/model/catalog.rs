use super::record_id;
use serde::{Deserialize, Serialize};

record_id!(RestaurantId, "restaurant");
record_id!(MenuItemId, "menu_item");

/// Editable restaurant fields. Used whole for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetails {
    pub name: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    #[serde(flatten)]
    pub details: RestaurantDetails,
}

/// Editable menu item fields. Used whole for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDetails {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    #[serde(flatten)]
    pub details: MenuItemDetails,
}

#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub restaurant_id: RestaurantId,
    pub details: MenuItemDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItemQuery {
    All,
    ByRestaurant(RestaurantId),
}
