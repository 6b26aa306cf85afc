//! # Store & Auth Contracts
//!
//! The traits the application layer programs against, plus the small value
//! types they exchange. Backends (the managed service in production, the
//! in-memory backend in tests and the demo) implement both traits.
//!
//! ## Capability Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Services receive Arc<dyn DocumentStore> / Arc<dyn Authenticator> at   │
//! │  construction. There is no module-level singleton: every component     │
//! │  can be handed a fake, and tests never touch the network.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Live Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  watch(query) ──► Subscription                                          │
//! │                      │                                                  │
//! │                      ├── initial Snapshot (current matching docs)       │
//! │                      ├── Snapshot after every matching mutation         │
//! │                      │   (FULL replacement - consumers must not merge)  │
//! │                      └── Drop / unsubscribe() detaches the watcher      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, watch};

use crate::error::{AuthError, StoreResult};

// =============================================================================
// Documents and Queries
// =============================================================================

/// A stored document: its key within the collection plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    pub data: Value,
}

impl Document {
    pub fn new(key: impl Into<String>, data: Value) -> Self {
        Document {
            key: key.into(),
            data,
        }
    }
}

/// Equality filter on a single document field.
///
/// The only filter shape the client needs: `uid == <x>`,
/// `orderuseruid == <x>`, or no filter at all (whole collection).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEq {
    pub field: String,
    pub value: Value,
}

/// A query over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filter: Option<FieldEq>,
}

impl Query {
    /// Query for every document in a collection.
    pub fn collection(name: impl Into<String>) -> Self {
        Query {
            collection: name.into(),
            filter: None,
        }
    }

    /// Restricts the query to documents whose `field` equals `value`.
    pub fn with_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some(FieldEq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Checks whether a document matches this query's filter.
    pub fn matches(&self, doc: &Document) -> bool {
        match &self.filter {
            None => true,
            Some(eq) => doc.data.get(&eq.field) == Some(&eq.value),
        }
    }
}

// =============================================================================
// Snapshots and Subscriptions
// =============================================================================

/// The full result set of a query at one point in time.
///
/// Each snapshot is authoritative: consumers replace their in-memory view
/// wholesale. Diffing or merging against a previous snapshot diverges under
/// concurrent writers.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub docs: Vec<Document>,
}

/// A live-query handle.
///
/// Detaches the watcher on drop, so holding one inside a view scope
/// guarantees the unsubscribe on every exit path. `recv` yields `None` once
/// the subscription is detached or the backend shuts down.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription from a snapshot channel and a detach action.
    pub fn new(rx: mpsc::UnboundedReceiver<Snapshot>, detach: impl FnOnce() + Send + 'static) -> Self {
        Subscription {
            rx,
            detach: Some(Box::new(detach)),
        }
    }

    /// Waits for the next snapshot.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Returns a snapshot if one is already queued, without waiting.
    pub fn try_recv(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    /// Explicitly detaches the watcher. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

// =============================================================================
// Document Store Trait
// =============================================================================

/// Key-addressed document storage with live queries.
///
/// `update` merges the given fields into an existing document and fails with
/// `StoreError::NotFound` when the key was never written; `upsert` replaces
/// or creates. Writes are last-write-wins - the contract carries no
/// optimistic concurrency and no retry.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document by key. `Ok(None)` when absent.
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>>;

    /// Creates or fully replaces a document.
    async fn upsert(&self, collection: &str, key: &str, data: Value) -> StoreResult<()>;

    /// Merges fields into an existing document.
    async fn update(&self, collection: &str, key: &str, fields: Value) -> StoreResult<()>;

    /// Reads the current result set of a query.
    async fn query(&self, query: Query) -> StoreResult<Vec<Document>>;

    /// Subscribes to a query's result set. See [`Subscription`].
    async fn watch(&self, query: Query) -> StoreResult<Subscription>;
}

// =============================================================================
// Auth Trait
// =============================================================================

/// An authenticated session issued by the provider.
///
/// `uid` is the opaque identity every user-owned document is keyed or
/// filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
}

/// The auth provider contract.
///
/// Sessions are provider-owned; the client only observes them. The
/// `on_session_change` channel fires with the current session or `None`,
/// which is how screens gate on login state.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Signs an existing account in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Ends the current session.
    async fn sign_out(&self);

    /// The current session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Observes session changes (sign-in, sign-out).
    fn on_session_change(&self) -> watch::Receiver<Option<Session>>;

    /// Re-verifies the current user's password before a sensitive change.
    async fn reauthenticate(&self, password: &str) -> Result<(), AuthError>;

    /// Replaces the current user's password.
    async fn update_password(&self, new_password: &str) -> Result<(), AuthError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
