use super::{record_id, UserId};
use serde::{Deserialize, Serialize};

record_id!(
    /// Type-safe identifier for driver profiles.
    DriverId,
    "driver"
);

/// Delivery-agent profile. At most one exists per user.
///
/// `available` is stored, not derived: the dispatch engine rewrites it after every
/// assignment change and every driver-side status update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub user_id: UserId,
    pub name: String,
    pub contact: Option<String>,
    pub available: bool,
}

/// Payload for creating a driver profile. New profiles start available.
#[derive(Debug, Clone)]
pub struct DriverCreate {
    pub user_id: UserId,
    pub name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub available: Option<bool>,
}

impl DriverUpdate {
    pub fn availability(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverQuery {
    All,
    ByUser(UserId),
}
