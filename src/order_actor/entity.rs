//! [`ActorEntity`] implementation for [`Order`].
//!
//! `on_update` re-checks the status edge against the record the actor holds, so a
//! patch built from a stale read can never move an order along an edge that is no
//! longer valid.

use crate::dispatch::transitions;
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderUpdate, PaymentStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Query = OrderQuery;
    type Context = ();
    type Error = OrderError;

    /// New orders start `Pending` with payment `Pending` and no driver.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError("quantity must be positive".into()));
        }
        let total_amount = params.items.iter().map(|item| item.line_total()).sum();

        Ok(Self {
            id,
            user_id: params.user_id,
            restaurant_id: params.restaurant_id,
            driver_id: None,
            items: params.items,
            delivery_address: params.delivery_address,
            total_amount,
            status: crate::model::OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: params.payment_method,
            payment_token: None,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::All => true,
            OrderQuery::ByUser(user_id) => self.user_id == *user_id,
            OrderQuery::ByDriver(driver_id) => self.driver_id == Some(*driver_id),
        }
    }

    /// Validates the whole patch against the current record, then applies it.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(next) = update.status {
            if !transitions::can_transition(self.status, next) {
                return Err(OrderError::InvalidTransition {
                    from: self.status,
                    to: next,
                });
            }
        }
        if update.driver.is_some() && self.status.is_terminal() {
            return Err(OrderError::DriverLocked(self.status));
        }

        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(driver) = update.driver {
            self.driver_id = driver;
        }
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(token) = update.payment_token {
            self.payment_token = Some(token);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItemId, OrderItem, OrderStatus, RestaurantId, UserId};
    use resource_actor::ResourceActor;

    fn create(items: Vec<OrderItem>) -> OrderCreate {
        OrderCreate {
            user_id: UserId(1),
            restaurant_id: RestaurantId(1),
            items,
            delivery_address: "12 Banjara Hills".into(),
            payment_method: None,
        }
    }

    fn item(id: u32, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            menu_item_id: MenuItemId(id),
            name: format!("dish {}", id),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let order = Order::from_create_params(OrderId(1), create(vec![item(1, 5.0, 2), item(2, 3.0, 1)]))
            .unwrap();
        assert_eq!(order.total_amount, 13.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.driver_id, None);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = Order::from_create_params(OrderId(1), create(vec![item(1, 5.0, 0)])).unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_edge_leaves_order_unchanged() {
        let (actor, client) = ResourceActor::<Order>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(create(vec![item(1, 5.0, 1)])).await.unwrap();
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            client.update(id, OrderUpdate::status(status)).await.unwrap();
        }

        let err = client
            .update(id, OrderUpdate::status(OrderStatus::Preparing))
            .await
            .unwrap_err()
            .downcast_entity::<OrderError>()
            .unwrap();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Preparing
            }
        );

        let err = client
            .update(
                id,
                OrderUpdate {
                    driver: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err()
            .downcast_entity::<OrderError>()
            .unwrap();
        assert_eq!(err, OrderError::DriverLocked(OrderStatus::Delivered));

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_skip_ahead_is_rejected() {
        let (actor, client) = ResourceActor::<Order>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(create(vec![item(1, 5.0, 1)])).await.unwrap();
        let placed = client.get(id).await.unwrap().unwrap();

        let err = client
            .update(id, OrderUpdate::status(OrderStatus::Delivered))
            .await
            .unwrap_err()
            .downcast_entity::<OrderError>()
            .unwrap();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            }
        );
        assert_eq!(client.get(id).await.unwrap().unwrap(), placed);
    }
}
