//! # tiffin-core: Pure Business Logic for Tiffin
//!
//! This crate is the **heart** of Tiffin. It contains all business logic
//! as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tiffin Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (React Native)                         │   │
//! │  │    Menu ──► Product Detail ──► Cart ──► Checkout ──► Tracking  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tiffin-client (services)                         │   │
//! │  │    sign_up, add_to_cart, place_order, cancel_order, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiffin-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ cart/     │  │ validation│  │   │
//! │  │   │ MenuItem  │  │   Money   │  │ pricing   │  │   rules   │  │   │
//! │  │   │  Order    │  │  integer  │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOCUMENT STORE • NO NETWORK • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tiffin-store (remote store & auth)                 │   │
//! │  │        document contract, wire shapes, live queries             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, UserProfile, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Line items and the live cart
//! - [`pricing`] - Shared cost computation for carts and stored orders
//! - [`error`] - Domain error types
//! - [`validation`] - Form and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tiffin_core::cart::{Cart, LineItem};
//! use tiffin_core::money::Money;
//! use tiffin_core::types::{MenuItem, Restaurant};
//!
//! let coffee = MenuItem {
//!     name: "Coffee".into(),
//!     price: Money::from_units(10),
//!     description: String::new(),
//!     image_url: String::new(),
//!     vendor: "coffeehouse".into(),
//!     addon: None,
//!     restaurant: Restaurant {
//!         name: "Campus Cafe".into(),
//!         building: "Hall A".into(),
//!         street: "1 College Way".into(),
//!         city: "Mahwah".into(),
//!     },
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem::new(coffee, 3, 0).unwrap());
//! assert_eq!(cart.total().units(), 30);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tiffin_core::Money` instead of
// `use tiffin_core::money::Money`

pub use cart::{Cart, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
