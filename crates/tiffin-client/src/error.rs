//! # Client Error Type
//!
//! Unified error type for the service layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tiffin                                 │
//! │                                                                         │
//! │  Frontend                    Rust Services                              │
//! │  ────────                    ─────────────                              │
//! │                                                                         │
//! │  place_order(...)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Function                                                │  │
//! │  │  Result<T, ClientError>                                          │  │
//! │  │         │                                                        │  │
//! │  │  Store failure? ──── StoreError::Transient ────┐                │  │
//! │  │         │            (logged, generic message)  │                │  │
//! │  │         ▼                                       ▼                │  │
//! │  │  Rule violation? ─── CoreError ─────────── ClientError ────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every failure is caught at the call site and carried as a             │
//! │  user-displayable message; nothing propagates to a global handler      │
//! │  and nothing is fatal. Worst case is a stale or empty view.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use tiffin_core::error::{CoreError, ValidationError};
use tiffin_store::error::{AuthError, StoreError};

/// Error returned from service calls.
///
/// ## Serialization
/// This is what the frontend receives when a call fails:
/// ```json
/// {
///   "code": "ORDER_ERROR",
///   "message": "Order 1722945600000 is already delivered, cannot cancel"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Auth provider rejected the operation
    AuthError,

    /// Document store operation failed
    StoreError,

    /// Order lifecycle rule violated
    OrderError,

    /// Payment form rejected
    PaymentError,

    /// Internal error
    Internal,
}

impl ClientError {
    /// Creates a new client error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ClientError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::AuthError, message)
    }

    /// Creates a payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::PaymentError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to client errors.
///
/// Transient and serialization failures log the real cause and surface a
/// generic message; raw backend errors never reach the frontend.
impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ClientError::not_found("Data not found"),
            StoreError::Transient(e) => {
                tracing::error!("store unavailable: {}", e);
                ClientError::new(ErrorCode::StoreError, "Service temporarily unavailable")
            }
            StoreError::Serialization(e) => {
                tracing::error!("malformed document: {}", e);
                ClientError::internal("Something went wrong")
            }
            StoreError::Closed => {
                ClientError::new(ErrorCode::StoreError, "Service temporarily unavailable")
            }
        }
    }
}

/// Converts auth errors to client errors.
///
/// `AuthError` messages are already the user-readable strings the app shows.
impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        ClientError::auth(err.to_string())
    }
}

/// Converts core errors to client errors.
impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrderAlreadyTerminal { .. } => {
                ClientError::new(ErrorCode::OrderError, err.to_string())
            }
            CoreError::EmptyCart | CoreError::ItemNotInCart { .. } => {
                ClientError::validation(err.to_string())
            }
            CoreError::Validation(e) => ClientError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::validation(err.to_string())
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ClientError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_core::types::OrderStatus;

    #[test]
    fn test_terminal_order_maps_to_order_error() {
        let err: ClientError = CoreError::OrderAlreadyTerminal {
            order_id: "42".to_string(),
            status: OrderStatus::Cancelled,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderError);
        assert!(err.message.contains("cannot cancel"));
    }

    #[test]
    fn test_transient_store_error_hides_detail() {
        let err: ClientError = StoreError::transient("tcp reset by peer").into();
        assert_eq!(err.code, ErrorCode::StoreError);
        assert_eq!(err.message, "Service temporarily unavailable");
    }

    #[test]
    fn test_auth_error_keeps_user_readable_message() {
        let err: ClientError = AuthError::EmailInUse.into();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "Email already exists");
    }

    #[test]
    fn test_serializes_for_frontend() {
        let err = ClientError::validation("Passwords do not match");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], "VALIDATION_ERROR");
        assert_eq!(value["message"], "Passwords do not match");
    }
}
