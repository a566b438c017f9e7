//! # Money Module
//!
//! Provides the `Money` type for cart and checkout totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing unit_price × qty as doubles:                                   │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Amounts are stored in the currency's smallest unit.                  │
//! │    The storefront prices in VND, which has no minor unit, so            │
//! │    150 000₫ is Money::from_minor(150_000).                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopverse_core::money::Money;
//!
//! let price = Money::from_minor(150_000);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.minor(), 300_000);
//! ```
//!
//! Formatting an amount for display ("150.000 ₫") is left to the UI layer.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// ProductSnapshot.unit_price ──► CartLine::subtotal ──► selected_subtotal
///                                                            │
///                                      shipping_fee ──► CheckoutSummary.total
/// ```
///
/// Serializes as a plain integer. Deserializes from an integer or from a
/// float with no fractional part (the product service sends prices as
/// doubles, e.g. `150000.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the amount in the smallest currency unit.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopverse_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(100);
    /// assert_eq!(unit_price.multiply_quantity(2).minor(), 200);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Like [`multiply_quantity`](Self::multiply_quantity), but clamps at
    /// the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn saturating_multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Converts a whole amount received as a float.
    ///
    /// Returns `None` for NaN, infinities, fractional amounts and values
    /// outside the `i64` range.
    ///
    /// ## Example
    /// ```rust
    /// use shopverse_core::money::Money;
    ///
    /// assert_eq!(Money::from_whole_f64(150000.0), Some(Money::from_minor(150_000)));
    /// assert_eq!(Money::from_whole_f64(0.5), None);
    /// ```
    pub fn from_whole_f64(amount: f64) -> Option<Self> {
        // 2^63 is exactly representable; anything at or above it overflows i64
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        if !amount.is_finite() || amount.fract() != 0.0 || amount >= LIMIT || amount < -LIMIT {
            return None;
        }
        Some(Money(amount as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Lets totals be written as `lines.iter().map(CartLine::subtotal).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole amount in the smallest currency unit")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map(Money)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_whole_f64(v).ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
