//! # Access Policy
//!
//! Pure checks of who may do what. The engine resolves the caller into an [`Actor`],
//! loads whatever the action targets, and asks [`authorize`] before mutating anything.
//!
//! - A missing role, or an unknown caller, is [`DispatchError::Unauthorized`].
//! - Holding the role but not owning the target is [`DispatchError::Forbidden`].

use crate::error::DispatchError;
use crate::model::{DriverId, Role, User, UserId};
use std::collections::BTreeSet;

/// The authenticated caller as seen by the policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user_id: UserId,
    pub roles: BTreeSet<Role>,
    /// `false` when no user record exists for `user_id`.
    pub registered: bool,
}

impl Actor {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            roles: user.roles.clone(),
            registered: true,
        }
    }

    pub fn unknown(user_id: UserId) -> Self {
        Self {
            user_id,
            roles: BTreeSet::new(),
            registered: false,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlaceOrder,
    ListOwnOrders,
    CancelOrder,
    AdminUpdateOrder,
    AdminUpdatePayment,
    AdminListOrders,
    AdminListDrivers,
    ManageCatalog,
    DriverProfile,
    DriverSetAvailability,
    DriverListOrders,
    DriverUpdateStatus,
}

impl Action {
    fn required_role(&self) -> Option<Role> {
        match self {
            Action::PlaceOrder | Action::ListOwnOrders | Action::CancelOrder => None,
            Action::AdminUpdateOrder
            | Action::AdminUpdatePayment
            | Action::AdminListOrders
            | Action::AdminListDrivers
            | Action::ManageCatalog => Some(Role::Admin),
            Action::DriverProfile
            | Action::DriverSetAvailability
            | Action::DriverListOrders
            | Action::DriverUpdateStatus => Some(Role::Driver),
        }
    }
}

/// What the action touches, once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Role check only.
    Any,
    /// An order owned by this customer.
    OwnedBy(UserId),
    /// An order and the driver profile of the caller.
    AssignedTo {
        order_driver: Option<DriverId>,
        acting_driver: DriverId,
    },
}

pub fn authorize(actor: &Actor, action: Action, target: Target) -> Result<(), DispatchError> {
    if !actor.registered {
        return Err(DispatchError::Unauthorized(format!("unknown user {}", actor.user_id)));
    }
    if let Some(role) = action.required_role() {
        if !actor.has_role(role) {
            return Err(DispatchError::Unauthorized(format!("{:?} requires role {:?}", action, role)));
        }
    }

    match target {
        Target::Any => Ok(()),
        Target::OwnedBy(owner) if owner == actor.user_id => Ok(()),
        Target::OwnedBy(_) => Err(DispatchError::Forbidden("order does not belong to user".into())),
        Target::AssignedTo {
            order_driver,
            acting_driver,
        } if order_driver == Some(acting_driver) => Ok(()),
        Target::AssignedTo { .. } => Err(DispatchError::Forbidden("order not assigned to this driver".into())),
    }
}
