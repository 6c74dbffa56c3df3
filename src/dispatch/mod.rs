//! # Order Lifecycle Engine
//!
//! [`DispatchService`] is the only place where more than one record kind changes in
//! a single operation: placing an order, moving it through its statuses, and keeping
//! each driver's availability in step with the orders they hold.
//!
//! Every operation validates fully, then persists the order, then the drivers it
//! touched. There is no envelope around the order write and the driver writes.

pub mod catalog;
pub mod service;
pub mod transitions;

pub use service::DispatchService;

use crate::model::{Driver, DriverId, MenuItemId, Order, RestaurantId, UserId};
use serde::{Deserialize, Serialize};

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<LineRequest>,
    /// Falls back to the customer's saved address when absent or blank.
    pub delivery_address: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverChange {
    Assign(DriverId),
    Clear,
}

/// Admin change request. Empty fields leave the order alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<crate::model::OrderStatus>,
    pub driver: Option<DriverChange>,
}

/// Directory row shown to admins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummary {
    #[serde(flatten)]
    pub driver: Driver,
    pub assigned_order_count: usize,
    /// Assigned orders that are not yet delivered or cancelled.
    pub active_order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverAssignments {
    pub driver: Driver,
    pub orders: Vec<Order>,
}

/// Result of a driver-side status update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub order: Order,
    pub driver: Driver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// `DRIVER` or `AGENT` registers a driver; anything else a customer.
    pub role: Option<String>,
}
