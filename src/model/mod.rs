//! Records held by the resource actors and the payloads that create or patch them.
//!
//! Every record kind gets a `u32` newtype id so a `DriverId` can never be passed where
//! an `OrderId` is expected. Ids display with a kind prefix (`order_7`) in logs.

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub(crate) use record_id;

pub mod catalog;
pub mod driver;
pub mod order;
pub mod user;

pub use catalog::*;
pub use driver::*;
pub use order::*;
pub use user::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_with_kind_prefix() {
        assert_eq!(OrderId::from(7).to_string(), "order_7");
        assert_eq!(DriverId(2).to_string(), "driver_2");
        assert_eq!(MenuItemId(11).to_string(), "menu_item_11");
    }
}
