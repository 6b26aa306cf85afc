//! # Cart Module
//!
//! The live set of line items a user intends to purchase.
//!
//! ## Cart Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Product Detail ─────► add(line_item) ───────► items.push(entry)       │
//! │                                                (append-only, no merge)  │
//! │                                                                         │
//! │  Cart Screen ────────► remove(&line_item) ───► retain(!= entry)        │
//! │                                                (full structural match)  │
//! │                                                                         │
//! │  Checkout ───────────► Order::place(&cart) ──► snapshot copied out     │
//! │                                                (cart left untouched)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adding the same catalog entry twice yields two distinct entries; the
//! backing store unions entries into an array and removes by value, and the
//! cart mirrors those semantics exactly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::pricing;
use crate::types::MenuItem;
use crate::validation::{validate_addon_quantity, validate_quantity};

// =============================================================================
// Line Item
// =============================================================================

/// One cart/order entry: a catalog entry plus chosen quantities.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `addon_quantity >= 0`
/// - `addon_quantity` contributes to cost only when the item defines an
///   add-on; it is carried but ignored otherwise.
///
/// Equality is structural over the whole record. Two entries for the same
/// catalog item with different quantities are different entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// The catalog entry, frozen at the time it was added.
    pub item: MenuItem,

    /// Base item count.
    pub quantity: i64,

    /// Add-on count. Meaningful only when `item.addon` is set.
    pub addon_quantity: i64,
}

impl LineItem {
    /// Creates a line item, enforcing the quantity invariants.
    pub fn new(item: MenuItem, quantity: i64, addon_quantity: i64) -> Result<Self, CoreError> {
        validate_quantity(quantity)?;
        validate_addon_quantity(addon_quantity)?;

        Ok(LineItem {
            item,
            quantity,
            addon_quantity,
        })
    }

    /// Cost of this entry under the shared pricing rules.
    #[inline]
    pub fn cost(&self) -> Money {
        pricing::line_item_cost(self)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The live cart for one user.
///
/// Entries keep insertion order. The cart is created implicitly on first
/// add and is only ever copied out at checkout, never cleared by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from existing entries (e.g. a fetched cart document).
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart { items }
    }

    /// Appends an entry.
    ///
    /// No merging: adding the same catalog entry again produces a second,
    /// distinct entry.
    pub fn add(&mut self, entry: LineItem) {
        self.items.push(entry);
    }

    /// Removes every entry structurally equal to `entry`.
    ///
    /// Matches by the full record (item + both quantities), not by catalog
    /// id. Removing an entry that is not present is an error.
    pub fn remove(&mut self, entry: &LineItem) -> Result<(), CoreError> {
        let before = self.items.len();
        self.items.retain(|i| i != entry);

        if self.items.len() == before {
            return Err(CoreError::ItemNotInCart {
                name: entry.item.name.clone(),
            });
        }
        Ok(())
    }

    /// Total cost of the cart under the shared pricing rules.
    #[inline]
    pub fn total(&self) -> Money {
        pricing::cart_total(&self.items)
    }

    /// Checks if the cart has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries (not total quantity).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
