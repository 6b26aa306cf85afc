//! # Store Error Types
//!
//! Error types for the document store and auth provider contracts.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (network, missing doc, bad credentials)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError / AuthError (this module) ← Adds context, displayable      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (tiffin-client) ← Serialized for the frontend             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend shows the message; nothing is fatal to the app               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transient failures carry no retry machinery: callers log them and degrade
//! to an empty or stale view.

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Document store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found.
    ///
    /// ## When This Occurs
    /// - `update` on a key that was never written
    /// - A profile lookup for a uid with no document
    ///
    /// Several call sites treat this as "empty state", not as a failure.
    #[error("{collection}/{key} not found")]
    NotFound { collection: String, key: String },

    /// Backend temporarily unreachable (network failure, provider outage).
    #[error("Store unavailable: {0}")]
    Transient(String),

    /// A document failed to (de)serialize against its expected shape.
    #[error("Malformed document: {0}")]
    Serialization(String),

    /// The backend has shut down; no further operations will succeed.
    #[error("Store is closed")]
    Closed,
}

impl StoreError {
    /// Creates a NotFound error for a collection/key pair.
    pub fn not_found(collection: impl Into<String>, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Creates a Transient error.
    pub fn transient(message: impl Into<String>) -> Self {
        StoreError::Transient(message.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Auth Error
// =============================================================================

/// Auth provider errors.
///
/// Messages are the user-readable strings the app surfaces; raw provider
/// errors never reach the frontend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email is malformed according to the provider.
    #[error("Invalid Email")]
    InvalidEmail,

    /// Sign-in failed; which of email/password was wrong is not disclosed.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("Email already exists")]
    EmailInUse,

    /// Password rejected as too weak.
    #[error("Password should be at least 6 characters")]
    WeakPassword,

    /// Sensitive operation needs a fresh sign-in first.
    #[error("Please sign in again to continue")]
    RequiresRecentLogin,

    /// No active session.
    #[error("Not signed in")]
    NotSignedIn,

    /// Any other provider-reported failure.
    #[error("{0}")]
    Provider(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
