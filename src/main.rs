//! Demo run: seeds a restaurant, an admin, a customer and a driver, then walks one
//! order from placement to delivery while logging each step.

use food_dispatch::config::Config;
use food_dispatch::dispatch::{DriverChange, LineRequest, OrderPatch, PlaceOrder, Signup};
use food_dispatch::lifecycle::{setup_tracing, DispatchSystem};
use food_dispatch::model::{MenuItemDetails, OrderStatus, RestaurantDetails, Role, UserCreate};
use std::collections::BTreeSet;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env()?;
    let system = DispatchSystem::new(&config);
    let service = system.service.clone();

    // Admins are provisioned out of band; signup never grants the role.
    let admin_id = system
        .user_client
        .create_user(UserCreate {
            name: "Ops".into(),
            email: "ops@example.com".into(),
            phone: None,
            address: None,
            roles: BTreeSet::from([Role::Admin]),
        })
        .await?;

    let span = tracing::info_span!("catalog_setup");
    let (restaurant, menu) = async {
        let restaurant = service
            .create_restaurant(
                admin_id,
                RestaurantDetails {
                    name: "Paradise".into(),
                    cuisine: Some("Hyderabadi".into()),
                    address: Some("Secunderabad".into()),
                    contact: None,
                    rating: Some(4.4),
                },
            )
            .await?;
        let mut menu = Vec::new();
        for (name, price) in [("Chicken Biryani", 5.0), ("Double ka Meetha", 3.0)] {
            let details = MenuItemDetails {
                name: name.into(),
                price,
                ..Default::default()
            };
            menu.push(service.create_menu_item(admin_id, restaurant.id, details).await?);
        }
        Ok::<_, food_dispatch::DispatchError>((restaurant, menu))
    }
    .instrument(span)
    .await?;

    let customer = service
        .signup(Signup {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: Some("90000 11111".into()),
            address: Some("Road No. 12, Banjara Hills".into()),
            role: None,
        })
        .await?;
    let driver_user = service
        .signup(Signup {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: Some("98480 22338".into()),
            address: None,
            role: Some("DRIVER".into()),
        })
        .await?;
    let driver = service.driver_profile(driver_user.id).await?;

    let span = tracing::info_span!("order_flow");
    async {
        let order = service
            .place_order(PlaceOrder {
                user_id: customer.id,
                restaurant_id: restaurant.id,
                items: vec![
                    LineRequest {
                        menu_item_id: menu[0].id,
                        quantity: 2,
                    },
                    LineRequest {
                        menu_item_id: menu[1].id,
                        quantity: 1,
                    },
                ],
                delivery_address: None,
                payment_method: Some("UPI".into()),
            })
            .await?;
        info!(order_id = %order.id, total = order.total_amount, has_token = order.payment_token.is_some(), "Placed");

        service
            .admin_update_order(
                admin_id,
                order.id,
                OrderPatch {
                    status: Some(OrderStatus::Confirmed),
                    driver: Some(DriverChange::Assign(driver.id)),
                },
            )
            .await?;

        for status in [OrderStatus::Preparing, OrderStatus::OutForDelivery, OrderStatus::Delivered] {
            let update = service.driver_update_status(driver_user.id, order.id, status).await?;
            info!(status = %update.order.status, driver_available = update.driver.available, "Driver update");
        }

        service.admin_update_payment_status(admin_id, order.id, "paid").await?;
        Ok::<_, food_dispatch::DispatchError>(())
    }
    .instrument(span)
    .await?;

    for summary in service.admin_list_drivers(admin_id).await? {
        info!(
            driver = %summary.driver.name,
            assigned = summary.assigned_order_count,
            active = summary.active_order_count,
            "Driver summary"
        );
    }

    drop(service);
    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
