//! # In-Memory Backend
//!
//! A process-local implementation of [`DocumentStore`] and [`Authenticator`]
//! with real live-query fan-out. Every async test and the demo binary run
//! against this backend; production swaps in the managed service without
//! touching the services above.
//!
//! ## Fan-Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Live Query Fan-Out                                    │
//! │                                                                         │
//! │  upsert/update ──► mutate collection map                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  for each registered watcher on that collection:                       │
//! │      recompute FULL matching snapshot ──► send                         │
//! │      (send fails = receiver gone = watcher dropped from registry)      │
//! │                                                                         │
//! │  Subscription::drop ──► watcher removed from registry                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `set_offline(true)` makes every store operation fail with
//! `StoreError::Transient`, which is how tests exercise the degrade-to-empty
//! paths in the service layer.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, watch, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::client::{
    Authenticator, Document, DocumentStore, Query, Session, Snapshot, Subscription,
};
use crate::document::FoodDoc;
use crate::error::{AuthError, StoreError, StoreResult};
use crate::FOOD_DATA;
use tiffin_core::types::MenuItem;

// =============================================================================
// Internal Types
// =============================================================================

/// A registered live-query watcher.
struct Watcher {
    id: u64,
    query: Query,
    tx: mpsc::UnboundedSender<Snapshot>,
}

/// One registered account in the fake auth provider.
#[derive(Debug, Clone)]
struct AccountRecord {
    uid: String,
    password: String,
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory document store + auth provider.
pub struct MemoryBackend {
    /// collection name -> (document key -> fields)
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,

    /// Live-query registry. Guarded by a std mutex; never held across await.
    watchers: Arc<Mutex<Vec<Watcher>>>,

    next_watcher_id: AtomicU64,

    /// When set, every store operation fails with a transient error.
    offline: AtomicBool,

    /// email -> account
    accounts: RwLock<HashMap<String, AccountRecord>>,

    /// Current session; `subscribe` hands out change receivers.
    session_tx: watch::Sender<Option<Session>>,
}

impl MemoryBackend {
    /// Creates an empty backend with no accounts and no session.
    pub fn new() -> Self {
        let (session_tx, _) = watch::channel(None);
        MemoryBackend {
            collections: RwLock::new(HashMap::new()),
            watchers: Arc::new(Mutex::new(Vec::new())),
            next_watcher_id: AtomicU64::new(1),
            offline: AtomicBool::new(false),
            accounts: RwLock::new(HashMap::new()),
            session_tx,
        }
    }

    /// Simulates losing/regaining the backend connection.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seeds the catalog collection with menu items under generated keys.
    pub async fn seed_menu(&self, items: &[MenuItem]) -> StoreResult<()> {
        for item in items {
            let doc = serde_json::to_value(FoodDoc::from_menu_item(item))?;
            self.upsert(FOOD_DATA, &Uuid::new_v4().to_string(), doc)
                .await?;
        }
        Ok(())
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::transient("backend offline"));
        }
        Ok(())
    }

    fn snapshot_from(
        collections: &HashMap<String, BTreeMap<String, Value>>,
        query: &Query,
    ) -> Snapshot {
        let docs = collections
            .get(&query.collection)
            .map(|coll| {
                coll.iter()
                    .map(|(key, data)| Document::new(key.clone(), data.clone()))
                    .filter(|doc| query.matches(doc))
                    .collect()
            })
            .unwrap_or_default();
        Snapshot { docs }
    }

    /// Recomputes and delivers full snapshots to every watcher of
    /// `collection`. Watchers whose receivers are gone fall out here.
    async fn notify(&self, collection: &str) {
        let collections = self.collections.read().await;
        let mut watchers = self.watchers.lock().expect("watcher registry poisoned");

        watchers.retain(|w| {
            if w.query.collection != collection {
                return true;
            }
            let snapshot = Self::snapshot_from(&collections, &w.query);
            w.tx.send(snapshot).is_ok()
        });
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// DocumentStore Implementation
// =============================================================================

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        self.ensure_online()?;

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|coll| coll.get(key))
            .map(|data| Document::new(key, data.clone())))
    }

    async fn upsert(&self, collection: &str, key: &str, data: Value) -> StoreResult<()> {
        self.ensure_online()?;
        debug!(collection, key, "upsert document");

        {
            let mut collections = self.collections.write().await;
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(key.to_string(), data);
        }

        self.notify(collection).await;
        Ok(())
    }

    async fn update(&self, collection: &str, key: &str, fields: Value) -> StoreResult<()> {
        self.ensure_online()?;
        debug!(collection, key, "update document");

        {
            let mut collections = self.collections.write().await;
            let doc = collections
                .get_mut(collection)
                .and_then(|coll| coll.get_mut(key))
                .ok_or_else(|| StoreError::not_found(collection, key))?;

            match (doc.as_object_mut(), fields.as_object()) {
                (Some(target), Some(patch)) => {
                    for (field, value) in patch {
                        target.insert(field.clone(), value.clone());
                    }
                }
                _ => {
                    return Err(StoreError::Serialization(
                        "update requires object-shaped documents".to_string(),
                    ))
                }
            }
        }

        self.notify(collection).await;
        Ok(())
    }

    async fn query(&self, query: Query) -> StoreResult<Vec<Document>> {
        self.ensure_online()?;

        let collections = self.collections.read().await;
        Ok(Self::snapshot_from(&collections, &query).docs)
    }

    async fn watch(&self, query: Query) -> StoreResult<Subscription> {
        self.ensure_online()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_watcher_id.fetch_add(1, Ordering::SeqCst);

        // Initial snapshot goes out before the watcher can observe any
        // mutation, so consumers always start from the current state.
        {
            let collections = self.collections.read().await;
            let _ = tx.send(Self::snapshot_from(&collections, &query));
        }

        debug!(collection = %query.collection, id, "watch attached");
        self.watchers
            .lock()
            .expect("watcher registry poisoned")
            .push(Watcher { id, query, tx });

        let registry = Arc::clone(&self.watchers);
        Ok(Subscription::new(rx, move || {
            registry
                .lock()
                .expect("watcher registry poisoned")
                .retain(|w| w.id != id);
            debug!(id, "watch detached");
        }))
    }
}

// =============================================================================
// Authenticator Implementation
// =============================================================================

#[async_trait]
impl Authenticator for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();

        // Provider-side checks, matching the managed service's behavior.
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if password.len() < 6 {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let uid = Uuid::new_v4().to_string();
        accounts.insert(
            email.clone(),
            AccountRecord {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );

        let session = Session { uid, email };
        debug!(uid = %session.uid, "account created");
        self.session_tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&email)
            .filter(|a| a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session {
            uid: account.uid.clone(),
            email,
        };
        debug!(uid = %session.uid, "signed in");
        self.session_tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) {
        debug!("signed out");
        self.session_tx.send_replace(None);
    }

    fn current_session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    async fn reauthenticate(&self, password: &str) -> Result<(), AuthError> {
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;

        let accounts = self.accounts.read().await;
        accounts
            .get(&session.email)
            .filter(|a| a.password == password)
            .map(|_| ())
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;
        if new_password.len() < 6 {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&session.email)
            .ok_or(AuthError::NotSignedIn)?;
        account.password = new_password.to_string();
        debug!(uid = %session.uid, "password updated");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_upsert_round_trip() {
        let backend = MemoryBackend::new();

        assert!(backend.get("UserCart", "uid-1").await.unwrap().is_none());

        backend
            .upsert("UserCart", "uid-1", json!({"cart": []}))
            .await
            .unwrap();

        let doc = backend.get("UserCart", "uid-1").await.unwrap().unwrap();
        assert_eq!(doc.data, json!({"cart": []}));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let backend = MemoryBackend::new();
        backend
            .upsert("UserData", "k1", json!({"uid": "u1", "name": "Sam", "address": "A"}))
            .await
            .unwrap();

        backend
            .update("UserData", "k1", json!({"address": "B"}))
            .await
            .unwrap();

        let doc = backend.get("UserData", "k1").await.unwrap().unwrap();
        assert_eq!(doc.data["name"], json!("Sam"));
        assert_eq!(doc.data["address"], json!("B"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend
            .update("UserOrders", "nope", json!({"orderstatus": "cancelled"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_query_filters_by_field() {
        let backend = MemoryBackend::new();
        backend
            .upsert("UserOrders", "1", json!({"orderuseruid": "u1"}))
            .await
            .unwrap();
        backend
            .upsert("UserOrders", "2", json!({"orderuseruid": "u2"}))
            .await
            .unwrap();

        let mine = backend
            .query(Query::collection("UserOrders").with_eq("orderuseruid", "u1"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].key, "1");
    }

    #[tokio::test]
    async fn test_watch_initial_and_replacement_snapshots() {
        let backend = MemoryBackend::new();
        backend
            .upsert("FoodData", "a", json!({"foodName": "Bagel"}))
            .await
            .unwrap();

        let mut sub = backend.watch(Query::collection("FoodData")).await.unwrap();

        let initial = sub.recv().await.unwrap();
        assert_eq!(initial.docs.len(), 1);

        backend
            .upsert("FoodData", "b", json!({"foodName": "Latte"}))
            .await
            .unwrap();

        // Full replacement, not a delta.
        let next = sub.recv().await.unwrap();
        assert_eq!(next.docs.len(), 2);
    }

    #[tokio::test]
    async fn test_watch_respects_filter() {
        let backend = MemoryBackend::new();
        let mut sub = backend
            .watch(Query::collection("UserOrders").with_eq("orderuseruid", "u1"))
            .await
            .unwrap();
        assert!(sub.recv().await.unwrap().docs.is_empty());

        backend
            .upsert("UserOrders", "other", json!({"orderuseruid": "u2"}))
            .await
            .unwrap();
        backend
            .upsert("UserOrders", "mine", json!({"orderuseruid": "u1"}))
            .await
            .unwrap();

        // The u2 write produced an (empty) snapshot too; drain until the
        // one containing our doc arrives.
        let mut last = sub.recv().await.unwrap();
        if last.docs.is_empty() {
            last = sub.recv().await.unwrap();
        }
        assert_eq!(last.docs.len(), 1);
        assert_eq!(last.docs[0].key, "mine");
    }

    #[tokio::test]
    async fn test_dropping_subscription_detaches_watcher() {
        let backend = MemoryBackend::new();
        let sub = backend.watch(Query::collection("FoodData")).await.unwrap();
        assert_eq!(backend.watchers.lock().unwrap().len(), 1);

        drop(sub);
        assert!(backend.watchers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_reads_are_transient_errors() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);

        assert!(matches!(
            backend.get("UserCart", "uid-1").await.unwrap_err(),
            StoreError::Transient(_)
        ));
        assert!(matches!(
            backend.query(Query::collection("FoodData")).await.unwrap_err(),
            StoreError::Transient(_)
        ));

        backend.set_offline(false);
        assert!(backend.get("UserCart", "uid-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_rules() {
        let backend = MemoryBackend::new();

        assert_eq!(
            backend.sign_up("not-an-email", "secret1").await.unwrap_err(),
            AuthError::InvalidEmail
        );
        assert_eq!(
            backend.sign_up("sam@example.edu", "short").await.unwrap_err(),
            AuthError::WeakPassword
        );

        backend.sign_up("sam@example.edu", "secret1").await.unwrap();
        assert_eq!(
            backend.sign_up("sam@example.edu", "secret2").await.unwrap_err(),
            AuthError::EmailInUse
        );
    }

    #[tokio::test]
    async fn test_sign_in_and_session_watch() {
        let backend = MemoryBackend::new();
        backend.sign_up("sam@example.edu", "secret1").await.unwrap();
        backend.sign_out().await;

        let mut session_rx = backend.on_session_change();
        assert!(session_rx.borrow().is_none());

        assert_eq!(
            backend
                .sign_in("sam@example.edu", "wrong-password")
                .await
                .unwrap_err(),
            AuthError::InvalidCredentials
        );

        let session = backend.sign_in("sam@example.edu", "secret1").await.unwrap();
        session_rx.changed().await.unwrap();
        assert_eq!(session_rx.borrow().as_ref(), Some(&session));
        assert_eq!(backend.current_session(), Some(session));

        backend.sign_out().await;
        session_rx.changed().await.unwrap();
        assert!(session_rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_password_change_requires_reauth_credentials() {
        let backend = MemoryBackend::new();
        backend.sign_up("sam@example.edu", "secret1").await.unwrap();

        assert_eq!(
            backend.reauthenticate("wrong").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
        backend.reauthenticate("secret1").await.unwrap();

        assert_eq!(
            backend.update_password("tiny").await.unwrap_err(),
            AuthError::WeakPassword
        );
        backend.update_password("secret2").await.unwrap();

        backend.sign_out().await;
        backend.sign_in("sam@example.edu", "secret2").await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_menu_populates_catalog() {
        use tiffin_core::money::Money;
        use tiffin_core::types::{MenuItem, Restaurant};

        let backend = MemoryBackend::new();
        backend
            .seed_menu(&[MenuItem {
                name: "Bagel".to_string(),
                price: Money::from_units(3),
                description: String::new(),
                image_url: String::new(),
                vendor: "bakery".to_string(),
                addon: None,
                restaurant: Restaurant {
                    name: "Campus Cafe".to_string(),
                    building: "Hall A".to_string(),
                    street: "1 College Way".to_string(),
                    city: "Mahwah".to_string(),
                },
            }])
            .await
            .unwrap();

        let docs = backend.query(Query::collection(FOOD_DATA)).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].data["foodName"], json!("Bagel"));
    }
}
