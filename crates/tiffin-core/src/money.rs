//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    Menu prices are whole currency units end to end. The backend         │
//! │    stores them as text; the store boundary parses them with integer     │
//! │    truncation. No fractional arithmetic exists anywhere in the flow.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiffin_core::money::Money;
//!
//! let price = Money::from_units(8);
//! let line = price * 2 + Money::from_units(15);
//! assert_eq!(line.units(), 31);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// Every price, line total, and order total in the system flows through this
/// type. The wire format is text (see the store crate); once parsed, values
/// stay integral.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// let unit_price = Money::from_units(8);
    /// assert_eq!(unit_price.multiply_quantity(2).units(), 16);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the app renders it.
///
/// This is for logs and debugging. Frontend formatting handles localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values yields their total.
/// An empty iterator sums to zero, which is what an empty cart costs.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(10);
        assert_eq!(money.units(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(31)), "$31");
        assert_eq!(format!("{}", Money::from_units(0)), "$0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!((a + b).units(), 15);
        let result: Money = a * 3;
        assert_eq!(result.units(), 30);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(8);
        assert_eq!(unit_price.multiply_quantity(2).units(), 16);
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total: Money = std::iter::empty::<Money>().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_sum_is_order_independent() {
        let forward: Money = [30, 31].into_iter().map(Money::from_units).sum();
        let backward: Money = [31, 30].into_iter().map(Money::from_units).sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.units(), 61);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert_eq!(zero, Money::default());
    }
}
