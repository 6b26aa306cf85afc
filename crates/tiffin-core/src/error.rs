//! # Error Types
//!
//! Domain-specific error types for tiffin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiffin-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiffin-store errors (separate crate)                                  │
//! │  ├── StoreError       - Document store failures                        │
//! │  └── AuthError        - Auth provider failures                         │
//! │                                                                         │
//! │  tiffin-client errors (app layer)                                      │
//! │  └── ClientError      - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Frontend            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. They are caught at the service
/// layer and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order in a terminal status cannot be cancelled.
    ///
    /// ## When This Occurs
    /// - Cancelling a `delivered` order
    /// - Cancelling an already `cancelled` order
    #[error("Order {order_id} is already {status}, cannot cancel")]
    OrderAlreadyTerminal {
        order_id: String,
        status: OrderStatus,
    },

    /// Checkout requires at least one line item.
    #[error("Cart is empty")]
    EmptyCart,

    /// The entry to remove is not in the cart.
    #[error("{name} is not in the cart")]
    ItemNotInCart { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic or any provider call runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be at least one.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed phone or card number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not (e.g., password confirmation).
    #[error("{field} does not match")]
    Mismatch { field: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
