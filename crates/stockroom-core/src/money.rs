//! # Money Module
//!
//! Provides the `Money` type used for every price and charge in the store.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PROMOTIONS AND FLOATING POINT                                          │
//! │                                                                         │
//! │  With f64 prices:                                                       │
//! │    30% off 3 × 19.99 = 41.978999999999996   ❌ not a real amount        │
//! │                                                                         │
//! │  With integer cents:                                                    │
//! │    5997 cents - round(5997 × 0.30) = 5997 - 1799 = 4198 cents           │
//! │    Rounding happens ONCE per line and is explicit                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1000);                 // 10.00
//! let line = price.checked_multiply_quantity(3).unwrap(); // 30.00
//! assert_eq!(line.cents(), 3000);
//! assert_eq!(line.to_string(), "30.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never has to be special-cased, even
///   though prices and charges themselves are always non-negative
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **No currency**: the store deals in a single implicit currency
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► Promotion::apply(unit_price, qty) ──► line charge
///                   └──► unit_price × qty (no promotion)   ──► line charge
///
/// Σ line charges ──► Store::order() total
/// ```
///
/// Charges and totals are built with the `checked_*` methods. A charge that
/// does not fit in an i64 becomes `None` and the purchase is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(145000); // 1450.00
    /// assert_eq!(price.cents(), 145000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3).unwrap().cents(), 897);
    /// assert!(unit_price.checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns half of this amount, rounding half a cent up.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).half().cents(), 500);
    /// assert_eq!(Money::from_cents(999).half().cents(), 500);
    /// ```
    #[inline]
    pub const fn half(&self) -> Self {
        Money(self.0.div_euclid(2) + self.0.rem_euclid(2))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount itself is rounded to the nearest cent (half up), then
    /// subtracted, so `discounted + discount == original` always holds.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    /// use stockroom_core::types::DiscountRate;
    ///
    /// let line = Money::from_cents(4000); // 40.00
    /// let rate = DiscountRate::from_percent(30).unwrap();
    /// assert_eq!(line.apply_discount(rate).cents(), 2800); // 28.00
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        // i128 keeps large line totals from overflowing before the division
        let discount = (self.0 as i128 * rate.bps() as i128 + 5000).div_euclid(10000);
        Money(self.0 - discount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, e.g. `1450.00`. No currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
