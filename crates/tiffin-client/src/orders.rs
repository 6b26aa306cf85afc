//! # Order Service
//!
//! Checkout, tracking, and cancellation over the `UserOrders` collection.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. PLACE (this client)                                                │
//! │     └── place() → Order { status: pending } keyed by timestamp millis  │
//! │                                                                         │
//! │  2. ADVANCE (external operator process, out of scope)                  │
//! │     └── pending → ontheway → delivered, courier fields filled in       │
//! │                                                                         │
//! │  3. CANCEL (this client, owner only)                                   │
//! │     └── cancel() → rejected with AlreadyTerminal once delivered or     │
//! │         cancelled; otherwise status update persisted                   │
//! │                                                                         │
//! │  Listing/tracking sorts descending by placed_at.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Placing an order does NOT clear the cart document; the two writes would
//! be independent and non-atomic, and only the first one is issued. See
//! DESIGN.md before changing this.

use std::sync::Arc;

use tracing::{debug, warn};

use tiffin_core::cart::Cart;
use tiffin_core::types::{DeliveryMode, Order, UserProfile};
use tiffin_store::document::OrderDoc;
use tiffin_store::{Document, DocumentStore, Query, StoreError, Subscription};

use crate::config::CollectionsConfig;
use crate::error::ClientError;

/// Order operations for one client.
pub struct OrderService {
    store: Arc<dyn DocumentStore>,
    collections: CollectionsConfig,
}

/// A live subscription to one user's orders, newest first.
pub struct OrderWatch {
    subscription: Subscription,
}

impl OrderWatch {
    /// Waits for the next full order list. `None` once detached.
    pub async fn next(&mut self) -> Option<Vec<Order>> {
        self.subscription.recv().await.map(|snapshot| {
            let mut orders = convert_docs(&snapshot.docs);
            sort_newest_first(&mut orders);
            orders
        })
    }

    /// Explicitly detaches; dropping the watch does the same.
    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionsConfig) -> Self {
        OrderService { store, collections }
    }

    /// Snapshots the cart into a new pending order and persists it.
    pub async fn place(
        &self,
        cart: &Cart,
        profile: &UserProfile,
        mode: DeliveryMode,
        delivery_address: Option<String>,
    ) -> Result<Order, ClientError> {
        let order = Order::place(cart, profile, mode, delivery_address)?;

        let data = serde_json::to_value(OrderDoc::from_order(&order))
            .map_err(|e| ClientError::internal(e.to_string()))?;
        self.store
            .upsert(&self.collections.user_orders, &order.id, data)
            .await?;

        debug!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }

    /// Loads one order by id.
    pub async fn get(&self, order_id: &str) -> Result<Order, ClientError> {
        let doc = self
            .store
            .get(&self.collections.user_orders, order_id)
            .await?
            .ok_or_else(|| {
                ClientError::from(StoreError::not_found(
                    self.collections.user_orders.clone(),
                    order_id,
                ))
            })?;

        let order: OrderDoc = serde_json::from_value(doc.data)
            .map_err(|e| ClientError::internal(e.to_string()))?;
        Ok(order.to_order())
    }

    /// Cancels an order.
    ///
    /// Terminal orders (delivered/cancelled) are rejected, not silently
    /// re-cancelled; only a successful transition is persisted.
    pub async fn cancel(&self, order_id: &str) -> Result<Order, ClientError> {
        let mut order = self.get(order_id).await?;
        order.cancel()?;

        self.store
            .update(
                &self.collections.user_orders,
                order_id,
                serde_json::json!({ "orderstatus": "cancelled" }),
            )
            .await?;

        debug!(order_id, "order cancelled");
        Ok(order)
    }

    /// All orders for a user, newest first.
    pub async fn list(&self, uid: &str) -> Result<Vec<Order>, ClientError> {
        let docs = self
            .store
            .query(Query::collection(&self.collections.user_orders).with_eq("orderuseruid", uid))
            .await?;

        let mut orders = convert_docs(&docs);
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    /// Subscribes to a user's orders for the tracking screen.
    pub async fn watch(&self, uid: &str) -> Result<OrderWatch, ClientError> {
        let subscription = self
            .store
            .watch(Query::collection(&self.collections.user_orders).with_eq("orderuseruid", uid))
            .await?;
        Ok(OrderWatch { subscription })
    }
}

fn convert_docs(docs: &[Document]) -> Vec<Order> {
    docs.iter()
        .filter_map(|doc| match serde_json::from_value::<OrderDoc>(doc.data.clone()) {
            Ok(order) => Some(order.to_order()),
            Err(err) => {
                warn!(key = %doc.key, %err, "skipping malformed order document");
                None
            }
        })
        .collect()
}

/// Descending by placement time, order id as the same-second tiebreak.
fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.placed_at
            .cmp(&a.placed_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
