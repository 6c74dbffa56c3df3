//! Order placement, status changes and driver bookkeeping.

use super::transitions::{self, CANCELLABLE};
use super::{DriverAssignments, DriverChange, DriverSummary, OrderPatch, PlaceOrder, StatusUpdate};
use crate::clients::{CatalogClient, DriverClient, OrderClient, UserClient};
use crate::error::DispatchError;
use crate::model::{
    Driver, DriverId, Order, OrderCreate, OrderId, OrderItem, OrderStatus, OrderUpdate, PaymentStatus, Role, User,
    UserId,
};
use crate::payment::PaymentTokenIssuer;
use crate::policy::{authorize, Action, Actor, Target};
use resource_actor::ActorClient;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Entry point for every operation that spans more than one record kind.
///
/// Cheap to clone; all state lives in the actors behind the clients.
#[derive(Clone)]
pub struct DispatchService {
    pub(super) users: UserClient,
    pub(super) drivers: DriverClient,
    pub(super) orders: OrderClient,
    pub(super) catalog: CatalogClient,
    payments: Arc<dyn PaymentTokenIssuer>,
}

impl DispatchService {
    pub fn new(
        users: UserClient,
        drivers: DriverClient,
        orders: OrderClient,
        catalog: CatalogClient,
        payments: Arc<dyn PaymentTokenIssuer>,
    ) -> Self {
        Self {
            users,
            drivers,
            orders,
            catalog,
            payments,
        }
    }

    // =========================================================================
    // Shared lookups
    // =========================================================================

    async fn caller(&self, user_id: UserId) -> Result<(Actor, Option<User>), DispatchError> {
        let user = self.users.get(user_id).await?;
        let actor = user
            .as_ref()
            .map_or_else(|| Actor::unknown(user_id), Actor::from_user);
        Ok((actor, user))
    }

    /// Resolves the caller and checks the role `action` needs.
    pub(super) async fn authorized(&self, user_id: UserId, action: Action) -> Result<Actor, DispatchError> {
        let (actor, _) = self.caller(user_id).await?;
        authorize(&actor, action, Target::Any)?;
        Ok(actor)
    }

    /// The caller's driver profile, created on first access.
    async fn acting_driver(&self, user_id: UserId, action: Action) -> Result<Driver, DispatchError> {
        let (actor, user) = self.caller(user_id).await?;
        authorize(&actor, action, Target::Any)?;
        let Some(user) = user else {
            return Err(DispatchError::Unauthorized(format!("unknown user {}", user_id)));
        };
        Ok(self.drivers.ensure_for_user(&user).await?)
    }

    async fn load_order(&self, id: OrderId) -> Result<Order, DispatchError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| DispatchError::NotFound(format!("order {}", id)))
    }

    /// available = no order assigned to the driver is still open.
    async fn refresh_availability(&self, driver_id: DriverId) -> Result<Driver, DispatchError> {
        let assigned = self.orders.find_by_driver(driver_id).await?;
        let available = assigned.iter().all(|order| order.status.is_terminal());
        debug!(%driver_id, assigned = assigned.len(), available, "Recomputed availability");
        Ok(self.drivers.set_availability(driver_id, available).await?)
    }

    // =========================================================================
    // Customer
    // =========================================================================

    /// Prices the requested lines from the menu and stores a `Pending` order.
    ///
    /// Unknown menu items are dropped. A payment token is attached afterwards; if
    /// issuing or storing it fails the order is still returned, without a token.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, restaurant_id = %request.restaurant_id))]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, DispatchError> {
        let user = self.users.get(request.user_id).await?;
        let restaurant = self.catalog.restaurant(request.restaurant_id).await?;
        let (Some(user), Some(_)) = (user, restaurant) else {
            return Err(DispatchError::InvalidInput("invalid user or restaurant".into()));
        };
        authorize(&Actor::from_user(&user), Action::PlaceOrder, Target::Any)?;

        if request.items.iter().any(|line| line.quantity == 0) {
            return Err(DispatchError::InvalidInput("quantity must be positive".into()));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            match self.catalog.menu_item(line.menu_item_id).await? {
                Some(menu_item) => items.push(OrderItem {
                    menu_item_id: menu_item.id,
                    name: menu_item.details.name,
                    unit_price: menu_item.details.price,
                    quantity: line.quantity,
                }),
                None => debug!(menu_item_id = %line.menu_item_id, "Skipping unknown menu item"),
            }
        }

        let delivery_address = request
            .delivery_address
            .filter(|address| !address.trim().is_empty())
            .or(user.address)
            .unwrap_or_default();

        let order = self
            .orders
            .create_order(OrderCreate {
                user_id: user.id,
                restaurant_id: request.restaurant_id,
                items,
                delivery_address,
                payment_method: request.payment_method,
            })
            .await?;
        info!(order_id = %order.id, total = order.total_amount, "Order placed");

        let token = match self.payments.issue(order.id, order.total_amount).await {
            Ok(token) => token,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Payment token not issued");
                return Ok(order);
            }
        };
        let update = OrderUpdate {
            payment_token: Some(token),
            ..Default::default()
        };
        match self.orders.update_order(order.id, update).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Payment token not stored");
                Ok(order)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, DispatchError> {
        self.authorized(user_id, Action::ListOwnOrders).await?;
        Ok(self.orders.find_by_user(user_id).await?)
    }

    /// Cancels a customer's own order while it is still `Pending` or `Confirmed`.
    ///
    /// A held driver is released and marked available without looking at their
    /// other orders.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, user_id: UserId, order_id: OrderId) -> Result<Order, DispatchError> {
        let actor = self.authorized(user_id, Action::CancelOrder).await?;
        let order = self.load_order(order_id).await?;
        authorize(&actor, Action::CancelOrder, Target::OwnedBy(order.user_id))?;

        if !CANCELLABLE.contains(&order.status) {
            return Err(DispatchError::InvalidTransition("order cannot be cancelled".into()));
        }

        let update = OrderUpdate {
            status: Some(OrderStatus::Cancelled),
            driver: order.driver_id.map(|_| None),
            ..Default::default()
        };
        let saved = self.orders.update_order(order.id, update).await?;
        if let Some(driver_id) = order.driver_id {
            self.drivers.set_availability(driver_id, true).await?;
        }
        info!(%order_id, released = ?order.driver_id, "Order cancelled");
        Ok(saved)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Applies an admin status change and/or driver (re)assignment.
    ///
    /// The previous driver is freed and the next one marked busy only when they
    /// differ. A terminal order that still references a busy driver gets that
    /// driver freed.
    #[instrument(skip(self))]
    pub async fn admin_update_order(
        &self,
        admin_id: UserId,
        order_id: OrderId,
        patch: OrderPatch,
    ) -> Result<Order, DispatchError> {
        self.authorized(admin_id, Action::AdminUpdateOrder).await?;
        let order = self.load_order(order_id).await?;

        let previous = order.driver_id;
        let next = match patch.driver {
            None => previous,
            Some(DriverChange::Clear) => None,
            Some(DriverChange::Assign(driver_id)) => {
                self.drivers
                    .get(driver_id)
                    .await?
                    .ok_or_else(|| DispatchError::NotFound(format!("driver {}", driver_id)))?;
                Some(driver_id)
            }
        };
        if let Some(status) = patch.status {
            transitions::check(Role::Admin, order.status, status)?;
        }
        if patch.driver.is_some() && order.status.is_terminal() {
            return Err(DispatchError::InvalidTransition(format!(
                "order is {}; its driver cannot change",
                order.status
            )));
        }

        let update = OrderUpdate {
            status: patch.status,
            driver: patch.driver.map(|_| next),
            ..Default::default()
        };
        let saved = if update.is_empty() {
            order
        } else {
            self.orders.update_order(order_id, update).await?
        };

        if previous != next {
            if let Some(driver_id) = previous {
                self.drivers.set_availability(driver_id, true).await?;
            }
            if let Some(driver_id) = next {
                self.drivers.set_availability(driver_id, false).await?;
            }
            info!(%order_id, ?previous, ?next, "Driver reassigned");
        }

        if saved.status.is_terminal() {
            if let Some(driver_id) = saved.driver_id {
                if let Some(driver) = self.drivers.get(driver_id).await? {
                    if !driver.available {
                        self.drivers.set_availability(driver_id, true).await?;
                    }
                }
            }
        }
        Ok(saved)
    }

    /// Records a payment status. Blank input leaves the order as it is.
    #[instrument(skip(self))]
    pub async fn admin_update_payment_status(
        &self,
        admin_id: UserId,
        order_id: OrderId,
        payment_status: &str,
    ) -> Result<Order, DispatchError> {
        self.authorized(admin_id, Action::AdminUpdatePayment).await?;
        let order = self.load_order(order_id).await?;
        let Some(payment_status) = PaymentStatus::from_token(payment_status) else {
            return Ok(order);
        };
        let update = OrderUpdate {
            payment_status: Some(payment_status),
            ..Default::default()
        };
        Ok(self.orders.update_order(order_id, update).await?)
    }

    #[instrument(skip(self))]
    pub async fn admin_list_orders(&self, admin_id: UserId) -> Result<Vec<Order>, DispatchError> {
        self.authorized(admin_id, Action::AdminListOrders).await?;
        Ok(self.orders.find_all().await?)
    }

    /// Drivers by name, each with how many orders reference them and how many of
    /// those are still open.
    #[instrument(skip(self))]
    pub async fn admin_list_drivers(&self, admin_id: UserId) -> Result<Vec<DriverSummary>, DispatchError> {
        self.authorized(admin_id, Action::AdminListDrivers).await?;
        let drivers = self.drivers.list_all().await?;
        let orders = self.orders.find_all().await?;

        let mut counts: HashMap<DriverId, (usize, usize)> = HashMap::new();
        for order in &orders {
            if let Some(driver_id) = order.driver_id {
                let (assigned, active) = counts.entry(driver_id).or_default();
                *assigned += 1;
                if !order.status.is_terminal() {
                    *active += 1;
                }
            }
        }

        Ok(drivers
            .into_iter()
            .map(|driver| {
                let (assigned_order_count, active_order_count) =
                    counts.get(&driver.id).copied().unwrap_or_default();
                DriverSummary {
                    driver,
                    assigned_order_count,
                    active_order_count,
                }
            })
            .collect())
    }

    // =========================================================================
    // Driver
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn driver_profile(&self, user_id: UserId) -> Result<Driver, DispatchError> {
        self.acting_driver(user_id, Action::DriverProfile).await
    }

    #[instrument(skip(self))]
    pub async fn driver_set_availability(&self, user_id: UserId, available: bool) -> Result<Driver, DispatchError> {
        let driver = self.acting_driver(user_id, Action::DriverSetAvailability).await?;
        Ok(self.drivers.set_availability(driver.id, available).await?)
    }

    #[instrument(skip(self))]
    pub async fn driver_assigned_orders(&self, user_id: UserId) -> Result<DriverAssignments, DispatchError> {
        let driver = self.acting_driver(user_id, Action::DriverListOrders).await?;
        let orders = self.orders.find_by_driver(driver.id).await?;
        Ok(DriverAssignments { driver, orders })
    }

    /// Moves an order the driver holds, then recomputes the driver's availability
    /// over every order still assigned to them.
    #[instrument(skip(self))]
    pub async fn driver_update_status(
        &self,
        user_id: UserId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<StatusUpdate, DispatchError> {
        let (actor, user) = self.caller(user_id).await?;
        authorize(&actor, Action::DriverUpdateStatus, Target::Any)?;
        if !transitions::allowed_for(Role::Driver).contains(&status) {
            return Err(DispatchError::InvalidTransition("status change not allowed".into()));
        }
        let Some(user) = user else {
            return Err(DispatchError::Unauthorized(format!("unknown user {}", user_id)));
        };

        let driver = self.drivers.ensure_for_user(&user).await?;
        let order = self.load_order(order_id).await?;
        authorize(
            &actor,
            Action::DriverUpdateStatus,
            Target::AssignedTo {
                order_driver: order.driver_id,
                acting_driver: driver.id,
            },
        )?;
        transitions::check(Role::Driver, order.status, status)?;

        let saved = self
            .orders
            .update_order(order_id, OrderUpdate::status(status))
            .await?;
        let driver = self.refresh_availability(driver.id).await?;
        info!(%order_id, %status, driver_id = %driver.id, available = driver.available, "Driver updated order");
        Ok(StatusUpdate { order: saved, driver })
    }
}
