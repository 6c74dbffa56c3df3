use crate::clients::{CatalogClient, DriverClient, OrderClient, UserClient};
use crate::config::Config;
use crate::dispatch::DispatchService;
use crate::payment::{PaymentTokenIssuer, UpiTokenIssuer};
use std::sync::Arc;
use tracing::{error, info};

/// Starts and stops every actor behind the dispatch engine.
///
/// Five actors run, one Tokio task each: users, drivers, orders, restaurants and
/// menu items. None needs another at runtime (`Context = ()`); cross-record work is
/// done by [`DispatchService`], which holds a client for each.
///
/// # Example
///
/// ```rust
/// use food_dispatch::config::Config;
/// use food_dispatch::lifecycle::DispatchSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = DispatchSystem::new(&Config::default());
///     let restaurants = system.service.list_restaurants().await.unwrap();
///     assert!(restaurants.is_empty());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct DispatchSystem {
    pub user_client: UserClient,
    pub driver_client: DriverClient,
    pub order_client: OrderClient,
    pub catalog_client: CatalogClient,
    pub service: DispatchService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DispatchSystem {
    /// Spawns all actors with a [`UpiTokenIssuer`] built from `config.payment`.
    pub fn new(config: &Config) -> Self {
        let issuer = Arc::new(UpiTokenIssuer::new(config.payment.clone()));
        Self::with_issuer(config, issuer)
    }

    /// Same as [`DispatchSystem::new`] with a caller-supplied token issuer.
    pub fn with_issuer(config: &Config, issuer: Arc<dyn PaymentTokenIssuer>) -> Self {
        let buffer = config.channel_buffer;
        let (user_actor, user_client) = crate::user_actor::new(buffer);
        let (driver_actor, driver_client) = crate::driver_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);
        let (restaurant_actor, menu_item_actor, catalog_client) = crate::catalog_actor::new(buffer);

        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(driver_actor.run(())),
            tokio::spawn(order_actor.run(())),
            tokio::spawn(restaurant_actor.run(())),
            tokio::spawn(menu_item_actor.run(())),
        ];

        let service = DispatchService::new(
            user_client.clone(),
            driver_client.clone(),
            order_client.clone(),
            catalog_client.clone(),
            issuer,
        );
        info!(buffer, "Dispatch system started");

        Self {
            user_client,
            driver_client,
            order_client,
            catalog_client,
            service,
            handles,
        }
    }

    /// Drops every client held here and waits for the actors to drain.
    ///
    /// Clones handed out earlier keep their actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dispatch system...");
        drop(self.service);
        drop(self.user_client);
        drop(self.driver_client);
        drop(self.order_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }
        info!("Dispatch system shutdown complete.");
        Ok(())
    }
}
