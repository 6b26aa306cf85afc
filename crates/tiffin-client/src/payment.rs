//! # Payment Form
//!
//! Client-side card validation for the payment screen.
//!
//! There is no gateway behind this: checkout records the order with its
//! `online` payment label, and this step only verifies the card form before
//! confirming to the user. Each rejected field maps to the exact message the
//! payment screen alerts.

use tracing::debug;

use tiffin_core::validation::{
    validate_card_holder, validate_card_number, validate_cvv, validate_expiry,
};

use crate::error::ClientError;

/// The card details as entered on the payment screen.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: String,
    /// MM/YY
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

/// Confirmation returned once the form passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub message: String,
}

/// Validates the card form.
///
/// Fields are checked in screen order; the first failure wins.
pub fn validate_card(card: &CardDetails) -> Result<(), ClientError> {
    validate_card_number(&card.number)
        .map_err(|_| ClientError::payment("Card number must be 16 digits."))?;
    validate_expiry(&card.expiry)
        .map_err(|_| ClientError::payment("Expiry date must be in MM/YY format."))?;
    validate_cvv(&card.cvv).map_err(|_| ClientError::payment("CVV must be 3 digits."))?;
    validate_card_holder(&card.holder_name)
        .map_err(|_| ClientError::payment("Please fill in all fields."))?;
    Ok(())
}

/// Validates the form and confirms the payment.
pub fn settle(card: &CardDetails) -> Result<PaymentConfirmation, ClientError> {
    validate_card(card)?;
    debug!("payment form accepted");
    Ok(PaymentConfirmation {
        message: "Your payment has been processed.".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
