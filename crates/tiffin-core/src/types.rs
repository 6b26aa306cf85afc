//! # Domain Types
//!
//! Core domain types used throughout Tiffin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Order      │   │  UserProfile    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (millis)    │   │  uid (opaque)   │       │
//! │  │  price          │   │  items snapshot │   │  name           │       │
//! │  │  addon?         │   │  status         │   │  phone          │       │
//! │  │  restaurant     │   │  total          │   │  address        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  OrderStatus    │   │  DeliveryMode   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Pending        │   │  Pickup         │                             │
//! │  │  OnTheWay       │   │  Delivery       │                             │
//! │  │  Delivered      │   └─────────────────┘                             │
//! │  │  Cancelled      │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::error::CoreError;
use crate::money::Money;
use crate::pricing;

// =============================================================================
// Catalog
// =============================================================================

/// An optional priced extra attached to a catalog entry.
///
/// An item either defines an add-on (name + unit price) or none at all.
/// Add-on quantities on a line item are meaningless without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Addon {
    /// Display name shown next to the base item ("Extra Shot", "Hash Browns").
    pub name: String,

    /// Unit price of one add-on.
    pub price: Money,
}

/// The restaurant a catalog entry is served from.
///
/// Denormalized onto every menu item; the catalog collection carries the
/// address split into building/street/city the way the menu screen shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    pub name: String,
    pub building: String,
    pub street: String,
    pub city: String,
}

/// A purchasable catalog entry from the read-only menu collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Display name shown on menu cards and receipts.
    pub name: String,

    /// Unit price in whole currency units.
    pub price: Money,

    /// Longer description for the product detail view.
    pub description: String,

    /// Image shown on menu cards.
    pub image_url: String,

    /// Vendor tag used by the home screen rails ("bakery", "grill", ...).
    pub vendor: String,

    /// Optional priced extra. `None` when the entry defines no add-on.
    pub addon: Option<Addon>,

    /// Where the item is served from.
    pub restaurant: Restaurant,
}

impl MenuItem {
    /// Checks whether this entry defines a priced add-on.
    #[inline]
    pub fn has_addon(&self) -> bool {
        self.addon.is_some()
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// A user's profile document.
///
/// `uid` is the opaque identity issued by the auth provider; everything else
/// is entered at sign-up and editable afterwards (name and address from the
/// profile screen, password through the auth provider only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Delivery Mode
// =============================================================================

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Customer picks the order up; the profile's stored address is recorded.
    Pickup,
    /// Order is delivered to the address entered at checkout.
    Delivery,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ## State Machine
/// ```text
/// pending ──► ontheway ──► delivered (terminal)
///    │            │
///    └────────────┴──────► cancelled (terminal)
/// ```
///
/// Forward transitions (`ontheway`, `delivered`) are applied by an external
/// operator process. This client only creates orders in `Pending` and lets
/// the owner cancel non-terminal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "ontheway")]
    OnTheWay,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// A terminal status permits no further transition.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The owner may cancel exactly the non-terminal statuses.
    #[inline]
    pub const fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnTheWay => "ontheway",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Contact Info
// =============================================================================

/// Customer contact fields frozen onto an order at snapshot time.
///
/// `address` is the effective delivery address: the entered address for
/// delivery orders, the profile's stored address for pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Order
// =============================================================================

/// Payment method recorded on an order. Checkout always settles online.
pub const PAYMENT_ONLINE: &str = "online";

/// An immutable snapshot of a cart, captured at checkout.
///
/// Uses the snapshot pattern: line items and the computed total are frozen at
/// creation so the order history stays consistent even if catalog prices
/// change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Order id, derived from the creation timestamp (epoch millis).
    pub id: String,

    /// Owning user's auth uid.
    pub user_uid: String,

    /// Line items copied from the cart at snapshot time.
    pub items: Vec<LineItem>,

    /// Total cost computed at snapshot time.
    pub total: Money,

    /// Lifecycle status. Always `Pending` at creation.
    pub status: OrderStatus,

    /// When the order was placed.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    /// Pickup or delivery.
    pub delivery_mode: DeliveryMode,

    /// Customer contact frozen from the profile (address resolved per mode).
    pub customer: ContactInfo,

    /// Payment method label recorded at checkout.
    pub payment_method: String,

    /// Amount settled at checkout; equals `total`.
    pub payment_total: Money,

    /// Courier name, filled in by the operator process once assigned.
    pub courier_name: Option<String>,

    /// Courier phone, filled in by the operator process once assigned.
    pub courier_phone: Option<String>,
}

impl Order {
    /// Snapshots a cart into a new `Pending` order.
    ///
    /// The effective delivery address is the entered `delivery_address` for
    /// delivery orders and the profile's stored address for pickup. Placing
    /// an empty cart is rejected.
    pub fn place(
        cart: &Cart,
        profile: &UserProfile,
        mode: DeliveryMode,
        delivery_address: Option<String>,
    ) -> Result<Order, CoreError> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let address = match mode {
            DeliveryMode::Delivery => delivery_address.unwrap_or_default(),
            DeliveryMode::Pickup => profile.address.clone(),
        };

        let now = Utc::now();
        let total = cart.total();

        Ok(Order {
            id: now.timestamp_millis().to_string(),
            user_uid: profile.uid.clone(),
            items: cart.items.clone(),
            total,
            status: OrderStatus::Pending,
            placed_at: now,
            delivery_mode: mode,
            customer: ContactInfo {
                name: profile.name.clone(),
                phone: profile.phone.clone(),
                address,
            },
            payment_method: PAYMENT_ONLINE.to_string(),
            payment_total: total,
            courier_name: None,
            courier_phone: None,
        })
    }

    /// Cancels the order.
    ///
    /// Fails with [`CoreError::OrderAlreadyTerminal`] when the order is
    /// already `Delivered` or `Cancelled`; the status is left unchanged.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::OrderAlreadyTerminal {
                order_id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Recomputes the total from the stored line items.
    ///
    /// Historical display runs the same pricing rules over the snapshot, so
    /// a stored order always re-prices to its recorded total.
    pub fn recomputed_total(&self) -> Money {
        pricing::cart_total(&self.items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;

    fn test_item(name: &str, price: i64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price: Money::from_units(price),
            description: format!("{} description", name),
            image_url: format!("https://img.example/{}.jpg", name),
            vendor: "grill".to_string(),
            addon: None,
            restaurant: Restaurant {
                name: "Atrium Grill".to_string(),
                building: "Student Center".to_string(),
                street: "505 College Rd".to_string(),
                city: "Mahwah".to_string(),
            },
        }
    }

    fn test_profile() -> UserProfile {
        UserProfile {
            uid: "uid-1".to_string(),
            name: "Sam Lee".to_string(),
            email: "sam@example.edu".to_string(),
            phone: "2015550100".to_string(),
            address: "Dorm B-204".to_string(),
        }
    }

    fn one_item_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(LineItem::new(test_item("Bagel", 3), 2, 0).unwrap());
        cart
    }

    #[test]
    fn test_place_sets_pending_and_snapshot_total() {
        let order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            None,
        )
        .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.units(), 6);
        assert_eq!(order.payment_total, order.total);
        assert_eq!(order.recomputed_total(), order.total);
    }

    #[test]
    fn test_place_pickup_uses_profile_address() {
        let order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            Some("ignored".to_string()),
        )
        .unwrap();

        assert_eq!(order.customer.address, "Dorm B-204");
    }

    #[test]
    fn test_place_delivery_uses_entered_address() {
        let order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Delivery,
            Some("Library, 2nd floor".to_string()),
        )
        .unwrap();

        assert_eq!(order.customer.address, "Library, 2nd floor");
    }

    #[test]
    fn test_place_empty_cart_rejected() {
        let err = Order::place(&Cart::new(), &test_profile(), DeliveryMode::Pickup, None)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_cancel_pending_succeeds() {
        let mut order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            None,
        )
        .unwrap();

        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_on_the_way_succeeds() {
        let mut order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            None,
        )
        .unwrap();
        order.status = OrderStatus::OnTheWay;

        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_delivered_rejected_and_unchanged() {
        let mut order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            None,
        )
        .unwrap();
        order.status = OrderStatus::Delivered;

        let err = order.cancel().unwrap_err();
        assert!(matches!(err, CoreError::OrderAlreadyTerminal { .. }));
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_cancel_cancelled_rejected() {
        let mut order = Order::place(
            &one_item_cart(),
            &test_profile(),
            DeliveryMode::Pickup,
            None,
        )
        .unwrap();
        order.status = OrderStatus::Cancelled;

        assert!(order.cancel().is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::OnTheWay.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());

        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnTheWay).unwrap(),
            "\"ontheway\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"cancelled\"").unwrap(),
            OrderStatus::Cancelled
        );
    }
}
