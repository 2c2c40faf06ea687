//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    235.0 * 10 / 100 = 23.500000000000004  ❌ needs a round() after    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    23500 cents × 1000 bps / 10000 = 2350 cents                          │
//! │    "Round to 2 decimals" becomes "round to the nearest cent", once,    │
//! │    at a known place                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::Money;
//!
//! let price = Money::from_cents(5000); // $50.00
//! let line_total = price * 3;          // $150.00
//! assert_eq!(line_total.cents(), 15000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::coupon::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartItem.unit_price ──► CartItem.line_total ──► Cart total            │
/// │                                                     │                   │
/// │                              threshold check ◄──────┤                   │
/// │                                                     ▼                   │
/// │                       discount = total × rate (capped, rounded)         │
/// │                                                     │                   │
/// │                 per-line share ◄────────────────────┘                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate` of this amount, rounded half-up to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    /// use coupon_core::coupon::DiscountRate;
    ///
    /// let total = Money::from_cents(23500);          // $235.00
    /// let rate = DiscountRate::from_bps(1000);       // 10%
    /// assert_eq!(total.percentage(rate).cents(), 2350);
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        // i128 keeps large carts from overflowing during the multiply
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Returns the part of `amount` proportional to `self / whole`,
    /// rounded half-up to the nearest cent.
    ///
    /// A zero (or negative) `whole` yields zero instead of dividing.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// // A $150 line in a $235 cart carries 150/235 of a $23.50 discount
    /// let share = Money::from_cents(15000)
    ///     .proportional_share(Money::from_cents(2350), Money::from_cents(23500));
    /// assert_eq!(share.cents(), 1500);
    /// ```
    pub fn proportional_share(&self, amount: Money, whole: Money) -> Money {
        if whole.0 <= 0 {
            return Money::zero();
        }
        let numerator = self.0 as i128 * amount.0 as i128;
        let whole = whole.0 as i128;
        let cents = (2 * numerator + whole) / (2 * whole);
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Clients format for display themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds, so an oversized total stays
// positive instead of wrapping.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

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
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let items = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = items.iter().sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn test_percentage_basic() {
        // $205.00 at 20% = $41.00
        let amount = Money::from_cents(20500);
        assert_eq!(amount.percentage(DiscountRate::from_bps(2000)).cents(), 4100);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // $0.05 at 10% = 0.5 cents → 1 cent
        let amount = Money::from_cents(5);
        assert_eq!(amount.percentage(DiscountRate::from_bps(1000)).cents(), 1);

        // $0.04 at 10% = 0.4 cents → 0 cents
        let amount = Money::from_cents(4);
        assert_eq!(amount.percentage(DiscountRate::from_bps(1000)).cents(), 0);
    }

    #[test]
    fn test_proportional_share() {
        let discount = Money::from_cents(2350);
        let whole = Money::from_cents(23500);

        assert_eq!(Money::from_cents(15000).proportional_share(discount, whole).cents(), 1500);
        assert_eq!(Money::from_cents(6000).proportional_share(discount, whole).cents(), 600);
        assert_eq!(Money::from_cents(2500).proportional_share(discount, whole).cents(), 250);
    }

    #[test]
    fn test_proportional_share_of_zero_whole_is_zero() {
        let share = Money::from_cents(100).proportional_share(Money::from_cents(50), Money::zero());
        assert!(share.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(9_000_000_000_000_000_000);
        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(3).cents(), i64::MAX);

        let total: Money = [huge, huge, Money::from_cents(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    /// $10.00 split three ways: each share rounds to $3.33 and the cent is lost.
    #[test]
    fn test_proportional_share_rounding_loss_documented() {
        let discount = Money::from_cents(1000);
        let whole = Money::from_cents(300);
        let share = Money::from_cents(100).proportional_share(discount, whole);
        assert_eq!(share.cents(), 333);
        assert_eq!((discount - share * 3).cents(), 1);
    }
}
