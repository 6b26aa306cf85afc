//! # tiffin-client: Application Services for Tiffin
//!
//! The thin orchestration layer the mobile frontend drives. Every service
//! takes its store/auth capabilities at construction, so the full flow runs
//! against [`tiffin_store::MemoryBackend`] in tests and the demo binary, and
//! against the managed service in production.
//!
//! ## Services
//!
//! - [`session`] - sign-up/sign-in/sign-out, session observation
//! - [`catalog`] - live menu browsing, vendor rails
//! - [`cart`] - the persisted per-user cart
//! - [`orders`] - checkout, tracking, cancellation
//! - [`profile`] - profile editing and password change
//! - [`payment`] - payment form validation
//! - [`config`] - service/device/collection configuration
//! - [`error`] - the unified `ClientError` the frontend receives
//!
//! ## End-to-End Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_up ──► browse menu ──► add_item ──► place ──► watch ──► cancel   │
//! │     │            │              │           │         │                 │
//! │   session      catalog        cart        orders    orders              │
//! │                                                                         │
//! │  All of it over Arc<dyn DocumentStore> + Arc<dyn Authenticator>.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod payment;
pub mod profile;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartService;
pub use catalog::{CatalogService, MenuWatch};
pub use config::AppConfig;
pub use error::{ClientError, ErrorCode};
pub use orders::{OrderService, OrderWatch};
pub use payment::{settle, validate_card, CardDetails, PaymentConfirmation};
pub use profile::ProfileService;
pub use session::{SessionService, SignUpForm};

// =============================================================================
// Integration Tests (full flow over the in-memory backend)
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tiffin_core::money::Money;
    use tiffin_core::types::{DeliveryMode, MenuItem, OrderStatus, Restaurant};
    use tiffin_store::MemoryBackend;

    use crate::config::CollectionsConfig;
    use crate::{CartService, CatalogService, OrderService, ProfileService, SessionService};

    fn menu() -> Vec<MenuItem> {
        let restaurant = Restaurant {
            name: "Campus Cafe".to_string(),
            building: "Student Center".to_string(),
            street: "505 College Rd".to_string(),
            city: "Mahwah".to_string(),
        };
        vec![
            MenuItem {
                name: "Coffee".to_string(),
                price: Money::from_units(10),
                description: "House drip".to_string(),
                image_url: String::new(),
                vendor: "coffeehouse".to_string(),
                addon: None,
                restaurant: restaurant.clone(),
            },
            MenuItem {
                name: "Bagel".to_string(),
                price: Money::from_units(8),
                description: "Toasted".to_string(),
                image_url: String::new(),
                vendor: "bakery".to_string(),
                addon: Some(tiffin_core::types::Addon {
                    name: "Cream Cheese".to_string(),
                    price: Money::from_units(5),
                }),
                restaurant,
            },
        ]
    }

    #[tokio::test]
    async fn test_full_ordering_flow() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_menu(&menu()).await.unwrap();

        let collections = CollectionsConfig::default();
        let sessions = SessionService::new(backend.clone(), backend.clone(), collections.clone());
        let catalog = CatalogService::new(backend.clone(), collections.clone());
        let carts = CartService::new(backend.clone(), collections.clone());
        let orders = OrderService::new(backend.clone(), collections.clone());
        let profiles = ProfileService::new(backend.clone(), backend.clone(), collections);

        // Sign up and load the created profile.
        let session = sessions
            .sign_up(crate::SignUpForm {
                name: "Sam Lee".to_string(),
                email: "sam@example.edu".to_string(),
                phone: "2015550100".to_string(),
                address: "Dorm B-204".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            })
            .await
            .unwrap();
        let uid = sessions.require_uid().unwrap();
        assert_eq!(uid, session.uid);
        let profile = profiles.load(&uid).await.unwrap();

        // Browse and fill the cart from the menu.
        let items = catalog.fetch_menu().await.unwrap();
        let coffee = items.iter().find(|i| i.name == "Coffee").unwrap();
        let bagel = items.iter().find(|i| i.name == "Bagel").unwrap();
        carts.add_item(&uid, coffee, 3, 0).await.unwrap();
        carts.add_item(&uid, bagel, 2, 3).await.unwrap();

        let cart = carts.fetch(&uid).await;
        assert_eq!(cart.total().units(), 61);

        // Checkout as a delivery order.
        let order = orders
            .place(
                &cart,
                &profile,
                DeliveryMode::Delivery,
                Some("Library, 2nd floor".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.units(), 61);
        assert_eq!(order.customer.address, "Library, 2nd floor");

        // The cart document survives checkout untouched.
        assert_eq!(carts.fetch(&uid).await.len(), 2);

        // Tracking shows the order; cancelling it sticks.
        let listed = orders.list(&uid).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, order.id);

        orders.cancel(&order.id).await.unwrap();
        let listed = orders.list(&uid).await.unwrap();
        assert_eq!(listed[0].status, OrderStatus::Cancelled);

        // A second cancel is a precondition failure.
        assert!(orders.cancel(&order.id).await.is_err());
    }
}
