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
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A tampered or drifting cart total is exactly what this engine exists  │
//! │  to prevent. The charge amount must be exact.                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price, fee, and total is an i64 count of minor units.          │
//! │    Floats appear only transiently (size multipliers, distances) and     │
//! │    are rounded to cents the moment they touch money.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pronto_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // 21.98
//! let total = price + Money::from_cents(500);  // 15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (future refunds)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// CatalogItem.base_price_cents ──► unit price ──► line total ──► subtotal
///                                                                   │
/// DeliveryConfig fees ──────────► delivery fee ─────────────────► total
///                                                                   │
///                                           payment charge amount ◄─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pronto_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a fractional cent amount half-up to a whole cent.
    ///
    /// This is the ONLY place a float becomes money. It exists for the two
    /// computations that are inherently fractional:
    /// - size-multiplier scaling of a base price
    /// - distance-proportional delivery fees
    ///
    /// The input must be non-negative; prices and fees never go below zero.
    ///
    /// ## Example
    /// ```rust
    /// use pronto_core::money::Money;
    ///
    /// // 8.50 * 1.5 = 12.75 exactly
    /// assert_eq!(Money::from_cents_rounded(850.0 * 1.5).cents(), 1275);
    /// // half-up at the midpoint
    /// assert_eq!(Money::from_cents_rounded(100.5).cents(), 101);
    /// ```
    #[inline]
    pub fn from_cents_rounded(cents: f64) -> Self {
        Money((cents + 0.5).floor() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units for display/wire output.
    ///
    /// Kept out of any computation path; only response DTOs and error
    /// messages call this.
    #[inline]
    pub fn major_units(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Rounds UP to the nearest half currency unit (multiple of 50 cents).
    ///
    /// Used by split-line blending: the mean of the two half prices is
    /// rounded up, never down and never to nearest. Underpricing a blended
    /// line is treated as worse than overpricing it by design of the
    /// business rule.
    ///
    /// ## Example
    /// ```rust
    /// use pronto_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(750).round_up_to_half_unit().cents(), 750);
    /// assert_eq!(Money::from_cents(710).round_up_to_half_unit().cents(), 750);
    /// assert_eq!(Money::from_cents(701).round_up_to_half_unit().cents(), 750);
    /// assert_eq!(Money::from_cents(700).round_up_to_half_unit().cents(), 700);
    /// ```
    #[inline]
    pub const fn round_up_to_half_unit(&self) -> Self {
        Money((self.0 + 49) / 50 * 50)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pronto_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. The frontend formats amounts
/// itself to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert!((money.major_units() - 10.99).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_from_cents_rounded_half_up() {
        assert_eq!(Money::from_cents_rounded(100.0).cents(), 100);
        assert_eq!(Money::from_cents_rounded(100.4).cents(), 100);
        assert_eq!(Money::from_cents_rounded(100.5).cents(), 101);
        assert_eq!(Money::from_cents_rounded(100.6).cents(), 101);
        // multiplier scaling: 9.00 * 1.25 = 11.25 exactly
        assert_eq!(Money::from_cents_rounded(900.0 * 1.25).cents(), 1125);
    }

    #[test]
    fn test_round_up_to_half_unit() {
        // already on a half-unit boundary: unchanged
        assert_eq!(Money::from_cents(700).round_up_to_half_unit().cents(), 700);
        assert_eq!(Money::from_cents(750).round_up_to_half_unit().cents(), 750);
        // anything past the boundary rounds UP, even by one cent
        assert_eq!(Money::from_cents(701).round_up_to_half_unit().cents(), 750);
        assert_eq!(Money::from_cents(749).round_up_to_half_unit().cents(), 750);
        assert_eq!(Money::from_cents(751).round_up_to_half_unit().cents(), 800);
        assert_eq!(Money::zero().round_up_to_half_unit().cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(negative.is_negative());
    }
}
