//! # Catalog Service
//!
//! Live menu browsing over the read-only `FoodData` collection.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  watch_menu() ──► MenuWatch                                             │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  every snapshot ──► convert all docs ──► REPLACE the whole menu view   │
//! │                                                                         │
//! │  Never diff against the previous snapshot: each one is authoritative.  │
//! │  Dropping MenuWatch detaches the underlying subscription (the screen   │
//! │  unmount path).                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A document that fails to parse is skipped with a warning; one bad catalog
//! entry must not blank the menu.

use std::sync::Arc;

use tracing::warn;

use tiffin_core::types::MenuItem;
use tiffin_store::document::FoodDoc;
use tiffin_store::{Document, DocumentStore, Query, Subscription};

use crate::config::CollectionsConfig;
use crate::error::ClientError;

/// Menu browsing for one client.
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    collections: CollectionsConfig,
}

/// A live menu subscription; yields the full menu on every change.
pub struct MenuWatch {
    subscription: Subscription,
}

impl MenuWatch {
    /// Waits for the next full menu. `None` once detached.
    pub async fn next(&mut self) -> Option<Vec<MenuItem>> {
        self.subscription
            .recv()
            .await
            .map(|snapshot| convert_docs(&snapshot.docs))
    }

    /// Explicitly detaches; dropping the watch does the same.
    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionsConfig) -> Self {
        CatalogService { store, collections }
    }

    /// One-shot menu fetch.
    pub async fn fetch_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let docs = self
            .store
            .query(Query::collection(&self.collections.food_data))
            .await?;
        Ok(convert_docs(&docs))
    }

    /// Subscribes to the menu. The first yielded value is the current menu.
    pub async fn watch_menu(&self) -> Result<MenuWatch, ClientError> {
        let subscription = self
            .store
            .watch(Query::collection(&self.collections.food_data))
            .await?;
        Ok(MenuWatch { subscription })
    }

    /// The home screen's vendor rail: items for one vendor tag.
    pub fn by_vendor(items: &[MenuItem], vendor: &str) -> Vec<MenuItem> {
        items
            .iter()
            .filter(|item| item.vendor == vendor)
            .cloned()
            .collect()
    }
}

fn convert_docs(docs: &[Document]) -> Vec<MenuItem> {
    docs.iter()
        .filter_map(|doc| match serde_json::from_value::<FoodDoc>(doc.data.clone()) {
            Ok(food) => Some(food.to_menu_item()),
            Err(err) => {
                warn!(key = %doc.key, %err, "skipping malformed catalog entry");
                None
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
