//! # Pricing Engine
//!
//! Shared pure cost computation for carts and orders.
//!
//! ## Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line cost = quantity × unit price                                      │
//! │            + addon quantity × addon unit price   (only if item has an   │
//! │                                                   add-on)               │
//! │                                                                         │
//! │  cart total = Σ line cost        (empty cart = 0)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same functions price the live cart and redisplay stored orders, so
//! both views always agree. No side effects, no I/O, never suspends.
//!
//! All arithmetic is integral. Textual wire numerics have already been
//! coerced by the store boundary before they reach this module.

use crate::cart::LineItem;
use crate::money::Money;

/// Cost of a single line item.
///
/// The add-on contribution applies only when the catalog entry defines an
/// add-on; a stray `addon_quantity` on an add-on-less item is ignored.
pub fn line_item_cost(entry: &LineItem) -> Money {
    let base = entry.item.price.multiply_quantity(entry.quantity);

    match &entry.item.addon {
        Some(addon) => base + addon.price.multiply_quantity(entry.addon_quantity),
        None => base,
    }
}

/// Total cost over a sequence of line items. Empty yields zero.
pub fn cart_total(items: &[LineItem]) -> Money {
    items.iter().map(line_item_cost).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Addon, MenuItem, Restaurant};

    fn item(price: i64, addon_price: Option<i64>) -> MenuItem {
        MenuItem {
            name: "Item".to_string(),
            price: Money::from_units(price),
            description: String::new(),
            image_url: String::new(),
            vendor: "grill".to_string(),
            addon: addon_price.map(|p| Addon {
                name: "Extra".to_string(),
                price: Money::from_units(p),
            }),
            restaurant: Restaurant {
                name: "Campus Cafe".to_string(),
                building: "Hall A".to_string(),
                street: "1 College Way".to_string(),
                city: "Mahwah".to_string(),
            },
        }
    }

    fn entry(price: i64, qty: i64, addon_price: Option<i64>, addon_qty: i64) -> LineItem {
        LineItem::new(item(price, addon_price), qty, addon_qty).unwrap()
    }

    #[test]
    fn test_line_cost_without_addon() {
        // price=10, quantity=3, no addon
        assert_eq!(line_item_cost(&entry(10, 3, None, 0)).units(), 30);
    }

    #[test]
    fn test_line_cost_with_addon() {
        // price=8, quantity=2, addon price=5, addon quantity=3
        assert_eq!(line_item_cost(&entry(8, 2, Some(5), 3)).units(), 31);
    }

    #[test]
    fn test_addon_quantity_ignored_without_addon() {
        // An add-on quantity on an item without an add-on contributes nothing.
        assert_eq!(line_item_cost(&entry(10, 2, None, 7)).units(), 20);
    }

    #[test]
    fn test_zero_addon_quantity_costs_nothing() {
        assert_eq!(line_item_cost(&entry(8, 2, Some(5), 0)).units(), 16);
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let items = vec![entry(10, 3, None, 0), entry(8, 2, Some(5), 3)];
        assert_eq!(cart_total(&items).units(), 61);
    }

    #[test]
    fn test_cart_total_empty_is_zero() {
        assert!(cart_total(&[]).is_zero());
    }

    #[test]
    fn test_cart_total_order_independent() {
        let a = entry(10, 3, None, 0);
        let b = entry(8, 2, Some(5), 3);
        let forward = cart_total(&[a.clone(), b.clone()]);
        let backward = cart_total(&[b, a]);
        assert_eq!(forward, backward);
    }
}
