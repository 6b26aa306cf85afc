//! # tiffin-store: Remote Store & Auth Contract for Tiffin
//!
//! Everything the application layer assumes about the managed backend lives
//! here: the document/auth trait contracts, the wire shapes of the four
//! collections, live-query subscriptions, and an in-memory backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tiffin Data Flow                                │
//! │                                                                         │
//! │  Service call (add_to_cart, place_order, ...)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tiffin-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   client      │    │   document    │    │   memory     │  │   │
//! │  │   │ (contracts)   │    │ (wire shapes) │    │  (backend)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ DocumentStore │    │ FoodDoc      │    │ RwLock maps  │  │   │
//! │  │   │ Authenticator │◄───│ CartDoc      │    │ + fan-out    │  │   │
//! │  │   │ Subscription  │    │ OrderDoc     │    │ channels     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Managed document/auth service (production) or MemoryBackend (tests)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Trait contracts, queries, snapshots, subscriptions
//! - [`document`] - Typed wire shapes per collection + numeric coercion
//! - [`error`] - Store and auth error types
//! - [`memory`] - In-memory backend for tests and development

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod document;
pub mod error;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{
    Authenticator, Document, DocumentStore, FieldEq, Query, Session, Snapshot, Subscription,
};
pub use error::{AuthError, StoreError, StoreResult};
pub use memory::MemoryBackend;

// =============================================================================
// Collections
// =============================================================================

/// Catalog collection; read-only to this client.
pub const FOOD_DATA: &str = "FoodData";

/// Profile documents, looked up by their `uid` field.
pub const USER_DATA: &str = "UserData";

/// Cart documents, one per user, keyed by auth uid.
pub const USER_CART: &str = "UserCart";

/// Order documents, keyed by order id, filtered by `orderuseruid`.
pub const USER_ORDERS: &str = "UserOrders";
