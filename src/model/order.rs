use super::{record_id, DriverId, MenuItemId, RestaurantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

record_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Where an order is in its life.
///
/// `Delivered` and `Cancelled` are terminal. The allowed edges between statuses
/// live in [`crate::dispatch::transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position on the forward delivery path. `Cancelled` sits off the path.
    pub fn stage(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::OutForDelivery => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Payment state as recorded by an admin. Values outside the known three are kept
/// verbatim (uppercased) so nothing an operator types is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Other(String),
}

impl PaymentStatus {
    /// Uppercases the token. Returns `None` for a blank token.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(match token.to_ascii_uppercase().as_str() {
            "PENDING" => PaymentStatus::Pending,
            "PAID" => PaymentStatus::Paid,
            "FAILED" => PaymentStatus::Failed,
            other => PaymentStatus::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Other(s) => s,
        }
    }
}

/// One priced line of an order, copied from the menu at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub driver_id: Option<DriverId>,
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub payment_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order. The total is computed from `items`.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub payment_method: Option<String>,
}

/// Patch for an existing order.
///
/// `driver` is doubly optional: `None` leaves the assignment alone, `Some(None)`
/// clears it, `Some(Some(id))` assigns `id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub driver: Option<Option<DriverId>>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_token: Option<String>,
}

impl OrderUpdate {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.driver.is_none()
            && self.payment_status.is_none()
            && self.payment_token.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderQuery {
    All,
    ByUser(UserId),
    ByDriver(DriverId),
}
