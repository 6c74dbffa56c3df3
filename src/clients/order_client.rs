//! # Order Client
use crate::model::{DriverId, Order, OrderCreate, OrderId, OrderQuery, OrderUpdate, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn by_id(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|order| order.id);
    orders
}

impl OrderClient {
    /// Stores a new order and returns it as persisted.
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// A customer's orders, oldest first.
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.list(OrderQuery::ByUser(user_id)).await.map(by_id)
    }

    /// Orders currently assigned to `driver_id`, oldest first.
    #[instrument(skip(self))]
    pub async fn find_by_driver(&self, driver_id: DriverId) -> Result<Vec<Order>, OrderError> {
        self.list(OrderQuery::ByDriver(driver_id)).await.map(by_id)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        self.list(OrderQuery::All).await.map(by_id)
    }
}
