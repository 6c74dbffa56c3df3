//! System startup, shutdown and logging setup.

pub mod dispatch_system;
pub mod tracing;

pub use dispatch_system::DispatchSystem;
pub use self::tracing::setup_tracing;
