//! # Cart Service
//!
//! The persisted cart: one `UserCart` document per user, keyed by auth uid,
//! holding an array of entries.
//!
//! ## Persistence Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UserCart/{uid}                                                         │
//! │  {                                                                      │
//! │    "cart": [                                                            │
//! │      { "data": {catalog entry}, "FoodQuantity": "2",                    │
//! │        "AddOnQuantity": "0" },                                          │
//! │      ...                                                                │
//! │    ]                                                                    │
//! │  }                                                                      │
//! │                                                                         │
//! │  add    = append to the array (first add creates the document)         │
//! │  remove = drop the structurally-equal entries, write back              │
//! │  fetch  = missing document or failed read = empty cart, never an error │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout copies the cart out into an order; nothing here clears it.

use std::sync::Arc;

use tracing::{debug, warn};

use tiffin_core::cart::{Cart, LineItem};
use tiffin_core::money::Money;
use tiffin_core::types::MenuItem;
use tiffin_store::document::{CartDoc, CartEntryDoc};
use tiffin_store::DocumentStore;

use crate::config::CollectionsConfig;
use crate::error::ClientError;

/// Cart operations for one client.
pub struct CartService {
    store: Arc<dyn DocumentStore>,
    collections: CollectionsConfig,
}

impl CartService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionsConfig) -> Self {
        CartService { store, collections }
    }

    /// Adds an item with the chosen quantities to the user's cart.
    ///
    /// Quantities are validated here, at the mutation entry point; entries
    /// already persisted are taken as-is on read. Appending never merges
    /// with an existing entry for the same catalog item.
    pub async fn add_item(
        &self,
        uid: &str,
        item: &MenuItem,
        quantity: i64,
        addon_quantity: i64,
    ) -> Result<(), ClientError> {
        let entry = LineItem::new(item.clone(), quantity, addon_quantity)
            .map_err(ClientError::from)?;

        let mut doc = self.read_doc(uid).await?.unwrap_or_default();
        doc.cart.push(CartEntryDoc::from_line_item(&entry));
        self.write_doc(uid, &doc).await?;

        debug!(uid, item = %item.name, quantity, addon_quantity, "added to cart");
        Ok(())
    }

    /// Removes the entries structurally equal to `entry` and writes back.
    pub async fn remove_item(&self, uid: &str, entry: &LineItem) -> Result<(), ClientError> {
        let mut doc = self.read_doc(uid).await?.unwrap_or_default();

        let before = doc.cart.len();
        doc.cart.retain(|e| e.to_line_item() != *entry);
        if doc.cart.len() == before {
            return Err(ClientError::validation(format!(
                "{} is not in the cart",
                entry.item.name
            )));
        }

        self.write_doc(uid, &doc).await?;
        debug!(uid, item = %entry.item.name, "removed from cart");
        Ok(())
    }

    /// Fetches the user's cart.
    ///
    /// A missing document, a transient read failure, or an unreadable
    /// document all yield an empty cart - the cart screen shows "empty",
    /// never an error.
    pub async fn fetch(&self, uid: &str) -> Cart {
        match self.read_doc(uid).await {
            Ok(Some(doc)) => Cart::from_items(doc.to_line_items()),
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(uid, %err, "cart read failed, treating as empty");
                Cart::new()
            }
        }
    }

    /// Total of a cart under the shared pricing rules.
    pub fn total(cart: &Cart) -> Money {
        cart.total()
    }

    async fn read_doc(&self, uid: &str) -> Result<Option<CartDoc>, ClientError> {
        let doc = self.store.get(&self.collections.user_cart, uid).await?;

        match doc {
            None => Ok(None),
            Some(doc) => match serde_json::from_value::<CartDoc>(doc.data) {
                Ok(cart) => Ok(Some(cart)),
                Err(err) => {
                    warn!(uid, %err, "unreadable cart document, treating as empty");
                    Ok(None)
                }
            },
        }
    }

    async fn write_doc(&self, uid: &str, doc: &CartDoc) -> Result<(), ClientError> {
        let data = serde_json::to_value(doc).map_err(|e| ClientError::internal(e.to_string()))?;
        self.store
            .upsert(&self.collections.user_cart, uid, data)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_core::types::{Addon, Restaurant};
    use tiffin_store::MemoryBackend;

    fn item(name: &str, price: i64, addon_price: Option<i64>) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price: Money::from_units(price),
            description: String::new(),
            image_url: String::new(),
            vendor: "grill".to_string(),
            addon: addon_price.map(|p| Addon {
                name: "Fries".to_string(),
                price: Money::from_units(p),
            }),
            restaurant: Restaurant {
                name: "Atrium Grill".to_string(),
                building: "Student Center".to_string(),
                street: "505 College Rd".to_string(),
                city: "Mahwah".to_string(),
            },
        }
    }

    fn service() -> (Arc<MemoryBackend>, CartService) {
        let backend = Arc::new(MemoryBackend::new());
        let service = CartService::new(backend.clone(), CollectionsConfig::default());
        (backend, service)
    }

    #[tokio::test]
    async fn test_first_add_creates_document() {
        let (backend, service) = service();

        service
            .add_item("uid-1", &item("Burger", 9, None), 1, 0)
            .await
            .unwrap();

        let doc = backend.get("UserCart", "uid-1").await.unwrap().unwrap();
        assert_eq!(doc.data["cart"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_appends_without_merging() {
        let (_, service) = service();
        let burger = item("Burger", 9, None);

        service.add_item("uid-1", &burger, 1, 0).await.unwrap();
        service.add_item("uid-1", &burger, 1, 0).await.unwrap();

        let cart = service.fetch("uid-1").await;
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().units(), 18);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_quantities() {
        let (_, service) = service();
        let burger = item("Burger", 9, None);

        assert!(service.add_item("uid-1", &burger, 0, 0).await.is_err());
        assert!(service.add_item("uid-1", &burger, 1, -1).await.is_err());
        assert!(service.fetch("uid-1").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_document_is_empty() {
        let (_, service) = service();
        let cart = service.fetch("uid-unknown").await;
        assert!(cart.is_empty());
        assert!(CartService::total(&cart).is_zero());
    }

    #[tokio::test]
    async fn test_fetch_offline_is_empty_not_error() {
        let (backend, service) = service();
        service
            .add_item("uid-1", &item("Burger", 9, None), 1, 0)
            .await
            .unwrap();

        backend.set_offline(true);
        let cart = service.fetch("uid-1").await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_remove_matches_structurally() {
        let (_, service) = service();
        let burger = item("Burger", 9, None);

        service.add_item("uid-1", &burger, 1, 0).await.unwrap();
        service.add_item("uid-1", &burger, 2, 0).await.unwrap();

        let qty_one = LineItem::new(burger.clone(), 1, 0).unwrap();
        service.remove_item("uid-1", &qty_one).await.unwrap();

        // Only the qty-2 entry survives.
        let cart = service.fetch("uid-1").await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_absent_entry_is_error() {
        let (_, service) = service();
        let ghost = LineItem::new(item("Burger", 9, None), 1, 0).unwrap();

        let err = service.remove_item("uid-1", &ghost).await.unwrap_err();
        assert!(err.message.contains("not in the cart"));
    }

    #[tokio::test]
    async fn test_totals_include_addons() {
        let (_, service) = service();

        service
            .add_item("uid-1", &item("Coffee", 10, None), 3, 0)
            .await
            .unwrap();
        service
            .add_item("uid-1", &item("Bagel", 8, Some(5)), 2, 3)
            .await
            .unwrap();

        let cart = service.fetch("uid-1").await;
        assert_eq!(CartService::total(&cart).units(), 61);
    }
}
