//! # Observability
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`). Module paths are hidden; actor logs carry an
//! `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run      # placements, reassignments, actor start/stop
//! RUST_LOG=debug cargo run     # every actor request with its payload
//! ```
//!
//! With `info` a placement followed by an assignment reads:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO place_order: Order placed order_id=order_1 total=13.0
//! INFO Updated entity_type="Order" id=order_1
//! INFO admin_update_order: Driver reassigned order_id=order_1 previous=None next=Some(DriverId(1))
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();
}
