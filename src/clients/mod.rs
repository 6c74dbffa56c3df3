//! Typed wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each wrapper maps framework failures onto its record's error enum and adds the
//! lookups the dispatch engine needs (by email, by user, by driver).

pub mod catalog_client;
pub mod driver_client;
pub mod order_client;
pub mod user_client;

pub use catalog_client::*;
pub use driver_client::*;
pub use order_client::*;
pub use user_client::*;
