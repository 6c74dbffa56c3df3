//! The order status graph and who may drive which edge.
//!
//! ```text
//! PENDING ⇄ CONFIRMED → PREPARING → OUT_FOR_DELIVERY → DELIVERED
//!    └──────────┴──→ CANCELLED
//! ```
//!
//! Forward moves go one stage at a time. `CONFIRMED → PENDING` is the only backward edge.
//! A non-terminal status may be "set" to itself. Nothing leaves `DELIVERED` or
//! `CANCELLED`.

use crate::error::DispatchError;
use crate::model::{OrderStatus, Role};

/// Statuses an admin may set.
pub const ADMIN_STATUSES: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Confirmed];

/// Statuses a driver may set on an order they hold.
pub const DRIVER_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Preparing,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Statuses a customer may still cancel from.
pub const CANCELLABLE: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Confirmed];

/// Whether the graph has an edge `from -> to`, regardless of who asks.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    if from.is_terminal() {
        return false;
    }
    if from == to {
        return true;
    }
    match (from.stage(), to) {
        (_, OrderStatus::Cancelled) => CANCELLABLE.contains(&from),
        (_, OrderStatus::Pending) => from == OrderStatus::Confirmed,
        (Some(current), next) => next.stage() == Some(current + 1),
        (None, _) => false,
    }
}

/// The statuses `role` may request. Customers only ever cancel.
pub fn allowed_for(role: Role) -> &'static [OrderStatus] {
    match role {
        Role::Admin => &ADMIN_STATUSES,
        Role::Driver => &DRIVER_STATUSES,
        Role::Customer => &[OrderStatus::Cancelled],
    }
}

/// Checks that `role` may request `to` and that `from -> to` is an edge.
pub fn check(role: Role, from: OrderStatus, to: OrderStatus) -> Result<(), DispatchError> {
    if !allowed_for(role).contains(&to) {
        return Err(DispatchError::InvalidTransition("status change not allowed".into()));
    }
    if !can_transition(from, to) {
        return Err(DispatchError::InvalidTransition(format!("{} -> {}", from, to)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const EDGES: &[(OrderStatus, OrderStatus)] = &[
        (Pending, Confirmed),
        (Pending, Cancelled),
        (Confirmed, Pending),
        (Confirmed, Preparing),
        (Confirmed, Cancelled),
        (Preparing, OutForDelivery),
        (OutForDelivery, Delivered),
    ];

    #[test]
    fn test_edge_table_is_exact() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = EDGES.contains(&(from, to)) || (from == to && !from.is_terminal());
                assert_eq!(can_transition(from, to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_terminal_states_are_closed() {
        for to in OrderStatus::ALL {
            assert!(!can_transition(Delivered, to));
            assert!(!can_transition(Cancelled, to));
        }
    }

    #[test]
    fn test_skipping_a_stage_is_rejected() {
        for (from, to) in [
            (Pending, Preparing),
            (Pending, Delivered),
            (Confirmed, OutForDelivery),
            (Confirmed, Delivered),
            (Preparing, Delivered),
        ] {
            assert!(!can_transition(from, to), "{} -> {}", from, to);
        }
        assert_eq!(
            check(Role::Driver, Confirmed, Delivered),
            Err(DispatchError::InvalidTransition("CONFIRMED -> DELIVERED".into()))
        );
    }

    #[test]
    fn test_role_sets() {
        assert!(check(Role::Admin, Pending, Confirmed).is_ok());
        assert_eq!(
            check(Role::Admin, Confirmed, Preparing),
            Err(DispatchError::InvalidTransition("status change not allowed".into()))
        );
        assert!(check(Role::Driver, OutForDelivery, Delivered).is_ok());
        assert!(check(Role::Driver, OutForDelivery, Cancelled).is_err());
        assert!(check(Role::Customer, Confirmed, Cancelled).is_ok());
        assert!(check(Role::Customer, Pending, Confirmed).is_err());
    }
}
