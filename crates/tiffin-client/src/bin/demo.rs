//! # Ordering Flow Demo
//!
//! Seeds the in-memory backend with a campus-cafe menu and walks the whole
//! ordering flow end to end, logging each step.
//!
//! ## Usage
//! ```bash
//! cargo run -p tiffin-client --bin demo
//!
//! # Verbose store/service logging
//! RUST_LOG=debug cargo run -p tiffin-client --bin demo
//! ```
//!
//! ## Script
//! sign-up → browse menu → add items → place a delivery order →
//! settle the payment form → operator advances the order → cancel attempt
//! (rejected once delivered).

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiffin_client::config::CollectionsConfig;
use tiffin_client::{
    settle, AppConfig, CardDetails, CartService, CatalogService, OrderService, ProfileService,
    SessionService, SignUpForm,
};
use tiffin_core::money::Money;
use tiffin_core::types::{Addon, DeliveryMode, MenuItem, Restaurant};
use tiffin_store::{DocumentStore, MemoryBackend, USER_ORDERS};

/// Menu seed data: (vendor, item, price, optional add-on).
const MENU: &[(&str, &str, i64, Option<(&str, i64)>)] = &[
    ("coffeehouse", "House Drip Coffee", 3, None),
    ("coffeehouse", "Latte", 5, Some(("Extra Shot", 1))),
    ("coffeehouse", "Cold Brew", 5, None),
    ("bakery", "Bagel", 3, Some(("Cream Cheese", 2))),
    ("bakery", "Blueberry Muffin", 4, None),
    ("bakery", "Croissant", 4, None),
    ("grill", "Cheeseburger", 9, Some(("Fries", 3))),
    ("grill", "Chicken Wrap", 8, None),
    ("grill", "Veggie Quesadilla", 7, Some(("Guacamole", 2))),
];

fn seed_items() -> Vec<MenuItem> {
    MENU.iter()
        .map(|(vendor, name, price, addon)| MenuItem {
            name: (*name).to_string(),
            price: Money::from_units(*price),
            description: format!("{} from the campus {}", name, vendor),
            image_url: format!(
                "https://img.tiffin.app/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            ),
            vendor: (*vendor).to_string(),
            addon: addon.map(|(addon_name, addon_price)| Addon {
                name: addon_name.to_string(),
                price: Money::from_units(addon_price),
            }),
            restaurant: Restaurant {
                name: "Campus Cafe".to_string(),
                building: "Student Center".to_string(),
                street: "505 College Rd".to_string(),
                city: "Mahwah".to_string(),
            },
        })
        .collect()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();
    info!(project_id = %config.service.project_id, device = %config.device.name, "starting demo");

    let backend = Arc::new(MemoryBackend::new());
    backend.seed_menu(&seed_items()).await.expect("seed menu");
    info!(items = MENU.len(), "menu seeded");

    let collections: CollectionsConfig = config.collections.clone();
    let sessions = SessionService::new(backend.clone(), backend.clone(), collections.clone());
    let catalog = CatalogService::new(backend.clone(), collections.clone());
    let carts = CartService::new(backend.clone(), collections.clone());
    let orders = OrderService::new(backend.clone(), collections.clone());
    let profiles = ProfileService::new(backend.clone(), backend.clone(), collections);

    // Sign up a demo user.
    let session = sessions
        .sign_up(SignUpForm {
            name: "Sam Lee".to_string(),
            email: "sam@example.edu".to_string(),
            phone: "2015550100".to_string(),
            address: "Dorm B-204".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        })
        .await
        .expect("sign up");
    info!(uid = %session.uid, "signed up");
    let profile = profiles.load(&session.uid).await.expect("load profile");

    // Browse the grill rail and fill the cart.
    let menu = catalog.fetch_menu().await.expect("fetch menu");
    let grill = CatalogService::by_vendor(&menu, "grill");
    info!(rail = "grill", items = grill.len(), "browsing");

    let burger = grill
        .iter()
        .find(|i| i.name == "Cheeseburger")
        .expect("burger on menu");
    let coffee = menu
        .iter()
        .find(|i| i.name == "House Drip Coffee")
        .expect("coffee on menu");

    carts
        .add_item(&session.uid, burger, 1, 1)
        .await
        .expect("add burger");
    carts
        .add_item(&session.uid, coffee, 2, 0)
        .await
        .expect("add coffee");

    let cart = carts.fetch(&session.uid).await;
    info!(entries = cart.len(), total = %cart.total(), "cart ready");

    // Place a delivery order and settle the payment form.
    let order = orders
        .place(
            &cart,
            &profile,
            DeliveryMode::Delivery,
            Some("Library, 2nd floor".to_string()),
        )
        .await
        .expect("place order");
    info!(order_id = %order.id, total = %order.total, "order placed");

    let confirmation = settle(&CardDetails {
        number: "4111111111111111".to_string(),
        expiry: "12/26".to_string(),
        cvv: "123".to_string(),
        holder_name: profile.name.clone(),
    })
    .expect("payment form");
    info!("{}", confirmation.message);

    // Track the order while the (simulated) operator advances it.
    let mut tracking = orders.watch(&session.uid).await.expect("watch orders");
    let current = tracking.next().await.expect("initial snapshot");
    info!(status = %current[0].status, "tracking");

    for status in ["ontheway", "delivered"] {
        backend
            .update(
                USER_ORDERS,
                &order.id,
                serde_json::json!({ "orderstatus": status }),
            )
            .await
            .expect("operator update");
        let current = tracking.next().await.expect("snapshot");
        info!(status = %current[0].status, "tracking");
    }
    tracking.unsubscribe();

    // Cancelling a delivered order is rejected.
    match orders.cancel(&order.id).await {
        Err(err) => warn!("cancel rejected as expected: {}", err.message),
        Ok(_) => unreachable!("terminal orders must not cancel"),
    }

    info!("demo complete");
}
