//! # Validation Module
//!
//! Input validation for the sign-up, checkout, and payment forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React Native)                                      │
//! │  ├── Basic format checks (empty, focus hints)                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (service entry points)                           │
//! │  └── Business rule validation before any provider call                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Auth provider                                                │
//! │  └── Weak password / duplicate email / malformed email                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a base item quantity.
///
/// ## Rules
/// - Must be at least 1 (the product page never lets the count drop below 1)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates an add-on quantity.
///
/// ## Rules
/// - Must be zero or more (zero means "no add-on chosen")
pub fn validate_addon_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "addon quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Sign-Up Form Validators
// =============================================================================

/// Validates that the password and its confirmation agree.
pub fn validate_password_pair(password: &str, confirm: &str) -> ValidationResult<()> {
    if password != confirm {
        return Err(ValidationError::Mismatch {
            field: "passwords".to_string(),
        });
    }
    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Exactly 10 digits, nothing else
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "phone",
            "must be 10 digits",
        ));
    }
    Ok(())
}

/// Coarse email shape check, run before the auth provider's own check.
///
/// ## Rules
/// - Non-empty, contains `@` with a `.` somewhere after it
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let valid = match email.find('@') {
        Some(at) if at > 0 => email[at + 1..].contains('.'),
        _ => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format(
            "email",
            "must be a valid email address",
        ));
    }
    Ok(())
}

// =============================================================================
// Payment Form Validators
// =============================================================================

/// Validates a card number.
///
/// ## Rules
/// - Exactly 16 digits
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "card number",
            "must be 16 digits",
        ));
    }
    Ok(())
}

/// Validates a card expiry date.
///
/// ## Rules
/// - `MM/YY` with month 01-12
pub fn validate_expiry(date: &str) -> ValidationResult<()> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b'/'
        && date[..2].chars().all(|c| c.is_ascii_digit())
        && date[3..].chars().all(|c| c.is_ascii_digit())
        && matches!(date[..2].parse::<u8>(), Ok(1..=12));

    if !well_formed {
        return Err(ValidationError::invalid_format(
            "expiry date",
            "must be in MM/YY format",
        ));
    }
    Ok(())
}

/// Validates a card CVV.
///
/// ## Rules
/// - Exactly 3 digits
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format("cvv", "must be 3 digits"));
    }
    Ok(())
}

/// Validates the cardholder name.
pub fn validate_card_holder(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("cardholder name"));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
