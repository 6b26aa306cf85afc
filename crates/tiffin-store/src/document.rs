//! # Wire Document Shapes
//!
//! Typed shapes for the four backend collections, with the exact field names
//! used by the documents already in production. Earlier releases of the app
//! and this client must stay mutually readable, so the wire names are
//! load-bearing.
//!
//! ## Collections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FoodData    one doc per menu item          FoodDoc      (read-only)   │
//! │  UserData    one doc per user profile       UserDoc                    │
//! │  UserCart    one doc per user (by uid)      CartDoc                    │
//! │  UserOrders  one doc per order (by id)      OrderDoc                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Numeric Coercion
//! Prices and quantities travel as TEXT. Parsing takes the leading integer
//! prefix and silently coerces anything malformed to 0 - behavior existing
//! documents depend on. DESIGN.md flags this; do not change it here without
//! a migration for the stored data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tiffin_core::cart::LineItem;
use tiffin_core::money::Money;
use tiffin_core::types::{
    Addon, ContactInfo, DeliveryMode, MenuItem, Order, OrderStatus, Restaurant, UserProfile,
};

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parses the leading integer prefix of a textual number; malformed input
/// coerces to 0. `"12.75"` parses to 12 (fraction discarded), `"abc"` to 0.
pub fn parse_amount(text: &str) -> i64 {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text),
    };

    let prefix: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    prefix.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Textual price to Money, with the same coercion.
pub fn parse_units(text: &str) -> Money {
    Money::from_units(parse_amount(text))
}

// =============================================================================
// FoodData
// =============================================================================

/// A catalog entry as stored in `FoodData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDoc {
    #[serde(rename = "foodName")]
    pub name: String,

    /// Unit price as text.
    #[serde(rename = "foodPrice")]
    pub price: String,

    #[serde(rename = "foodDescription", default)]
    pub description: String,

    #[serde(rename = "foodImageUrl", default)]
    pub image_url: String,

    /// Vendor tag driving the home screen rails.
    #[serde(rename = "foodType", default)]
    pub vendor: String,

    /// Add-on display name; empty when the item has none.
    #[serde(rename = "foodAddon", default)]
    pub addon: String,

    /// Add-on unit price as text; empty when the item has none.
    #[serde(rename = "foodAddonPrice", default)]
    pub addon_price: String,

    #[serde(rename = "restaurantName", default)]
    pub restaurant_name: String,

    #[serde(rename = "restaurantAddressBuilding", default)]
    pub restaurant_building: String,

    #[serde(rename = "restaurantAddressStreet", default)]
    pub restaurant_street: String,

    #[serde(rename = "restaurantAddressCity", default)]
    pub restaurant_city: String,
}

impl FoodDoc {
    /// Converts to the domain type. An empty `foodAddonPrice` means the item
    /// defines no add-on; a malformed one coerces to a 0-priced add-on.
    pub fn to_menu_item(&self) -> MenuItem {
        let addon = if self.addon_price.trim().is_empty() {
            None
        } else {
            Some(Addon {
                name: self.addon.clone(),
                price: parse_units(&self.addon_price),
            })
        };

        MenuItem {
            name: self.name.clone(),
            price: parse_units(&self.price),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            vendor: self.vendor.clone(),
            addon,
            restaurant: Restaurant {
                name: self.restaurant_name.clone(),
                building: self.restaurant_building.clone(),
                street: self.restaurant_street.clone(),
                city: self.restaurant_city.clone(),
            },
        }
    }

    /// Builds the wire form of a domain menu item.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        let (addon, addon_price) = match &item.addon {
            Some(addon) => (addon.name.clone(), addon.price.units().to_string()),
            None => (String::new(), String::new()),
        };

        FoodDoc {
            name: item.name.clone(),
            price: item.price.units().to_string(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            vendor: item.vendor.clone(),
            addon,
            addon_price,
            restaurant_name: item.restaurant.name.clone(),
            restaurant_building: item.restaurant.building.clone(),
            restaurant_street: item.restaurant.street.clone(),
            restaurant_city: item.restaurant.city.clone(),
        }
    }
}

// =============================================================================
// UserCart
// =============================================================================

/// One cart/order array entry: the frozen catalog entry plus chosen counts,
/// both counts as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntryDoc {
    pub data: FoodDoc,

    #[serde(rename = "FoodQuantity")]
    pub food_quantity: String,

    #[serde(rename = "AddOnQuantity")]
    pub addon_quantity: String,
}

impl CartEntryDoc {
    /// Converts to a domain line item.
    ///
    /// Wire reads bypass the `LineItem::new` invariants on purpose: a stored
    /// entry with a malformed quantity coerces to 0 and simply contributes
    /// nothing to totals, exactly as existing documents behave.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            item: self.data.to_menu_item(),
            quantity: parse_amount(&self.food_quantity),
            addon_quantity: parse_amount(&self.addon_quantity),
        }
    }

    /// Builds the wire form of a domain line item.
    pub fn from_line_item(entry: &LineItem) -> Self {
        CartEntryDoc {
            data: FoodDoc::from_menu_item(&entry.item),
            food_quantity: entry.quantity.to_string(),
            addon_quantity: entry.addon_quantity.to_string(),
        }
    }
}

/// The per-user cart document in `UserCart`, keyed by uid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartDoc {
    #[serde(default)]
    pub cart: Vec<CartEntryDoc>,
}

impl CartDoc {
    pub fn to_line_items(&self) -> Vec<LineItem> {
        self.cart.iter().map(CartEntryDoc::to_line_item).collect()
    }
}

// =============================================================================
// UserData
// =============================================================================

/// A profile document in `UserData`. Keys are auto-generated; lookup goes
/// through the `uid` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDoc {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl UserDoc {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            uid: self.uid.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        UserDoc {
            uid: profile.uid.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
        }
    }
}

// =============================================================================
// UserOrders
// =============================================================================

/// An order document in `UserOrders`, keyed by the order id.
///
/// `orderdate` travels as epoch seconds, the provider's timestamp shape.
/// `ordertype` (pickup/delivery) is recorded alongside the effective
/// address; courier fields are filled in later by the operator process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDoc {
    pub orderid: String,

    pub orderdata: Vec<CartEntryDoc>,

    pub orderstatus: OrderStatus,

    /// Total as text, like every other wire numeric.
    pub ordercost: String,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub orderdate: DateTime<Utc>,

    pub ordertype: DeliveryMode,

    pub orderaddress: String,

    pub orderphone: String,

    pub ordername: String,

    pub orderuseruid: String,

    pub orderpayment: String,

    pub paymenttotal: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliveryboy_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliveryboy_phone: Option<String>,
}

impl OrderDoc {
    pub fn to_order(&self) -> Order {
        Order {
            id: self.orderid.clone(),
            user_uid: self.orderuseruid.clone(),
            items: self.orderdata.iter().map(CartEntryDoc::to_line_item).collect(),
            total: parse_units(&self.ordercost),
            status: self.orderstatus,
            placed_at: self.orderdate,
            delivery_mode: self.ordertype,
            customer: ContactInfo {
                name: self.ordername.clone(),
                phone: self.orderphone.clone(),
                address: self.orderaddress.clone(),
            },
            payment_method: self.orderpayment.clone(),
            payment_total: parse_units(&self.paymenttotal),
            courier_name: self.deliveryboy_name.clone(),
            courier_phone: self.deliveryboy_phone.clone(),
        }
    }

    pub fn from_order(order: &Order) -> Self {
        OrderDoc {
            orderid: order.id.clone(),
            orderdata: order.items.iter().map(CartEntryDoc::from_line_item).collect(),
            orderstatus: order.status,
            ordercost: order.total.units().to_string(),
            orderdate: order.placed_at,
            ordertype: order.delivery_mode,
            orderaddress: order.customer.address.clone(),
            orderphone: order.customer.phone.clone(),
            ordername: order.customer.name.clone(),
            orderuseruid: order.user_uid.clone(),
            orderpayment: order.payment_method.clone(),
            paymenttotal: order.payment_total.units().to_string(),
            deliveryboy_name: order.courier_name.clone(),
            deliveryboy_phone: order.courier_phone.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
