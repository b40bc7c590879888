//! # Promotions
//!
//! Pricing strategies that turn (unit price, quantity) into a line charge.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Promotion Pricing (unit price 10.00)                   │
//! │                                                                         │
//! │  PercentDiscount(30%)   qty 4   4 × 10.00 × 0.70          = 28.00       │
//! │  SecondHalfPrice        qty 3   2 × 10.00 + 1 × 5.00      = 25.00       │
//! │  ThirdOneFree           qty 7   (2 × 2 + 1) × 10.00       = 50.00       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promotion holds nothing but its display name (and rate, for
//! discounts), so one instance can be shared by any number of products
//! through an `Arc<dyn Promotion>`. It never knows which products use it.
//!
//! Quantities reaching `apply` are always positive: `Product::purchase`
//! rejects everything else first. `apply` returns `None` when the charge
//! does not fit in [`Money`].

use std::fmt;

use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::{validate_promotion_name, ValidationResult};

/// A pricing strategy attached to zero or more products.
pub trait Promotion: fmt::Debug + Send + Sync {
    /// Display name shown next to the product, e.g. "30% off!".
    fn name(&self) -> &str;

    /// Charge for `quantity` units at `unit_price`, `None` on overflow.
    fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money>;
}

// =============================================================================
// Percent Discount
// =============================================================================

/// Flat percentage off every unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentDiscount {
    name: String,
    rate: DiscountRate,
}

impl PercentDiscount {
    /// Builds a discount from whole percent (0-100).
    pub fn new(name: impl Into<String>, percent: u32) -> ValidationResult<Self> {
        Self::with_rate(name, DiscountRate::from_percent(percent)?)
    }

    /// Builds a discount from an already validated rate.
    pub fn with_rate(name: impl Into<String>, rate: DiscountRate) -> ValidationResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(PercentDiscount { name, rate })
    }

    pub fn rate(&self) -> DiscountRate {
        self.rate
    }
}

impl Promotion for PercentDiscount {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        unit_price
            .checked_multiply_quantity(quantity)
            .map(|line| line.apply_discount(self.rate))
    }
}

// =============================================================================
// Second Half Price
// =============================================================================

/// Every second unit costs half.
///
/// Units are paired: `ceil(q/2)` at full price, `floor(q/2)` at half price.
/// The half-price portion is rounded once for the whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondHalfPrice {
    name: String,
}

impl SecondHalfPrice {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(SecondHalfPrice { name })
    }
}

impl Promotion for SecondHalfPrice {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        let half_price_units = quantity / 2;
        let full_price_units = quantity - half_price_units;

        let full = unit_price.checked_multiply_quantity(full_price_units)?;
        let half = unit_price.checked_multiply_quantity(half_price_units)?.half();
        full.checked_add(half)
    }
}

// =============================================================================
// Third One Free
// =============================================================================

/// Buy three, pay for two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdOneFree {
    name: String,
}

impl ThirdOneFree {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(ThirdOneFree { name })
    }
}

impl Promotion for ThirdOneFree {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        // (q / 3) * 2 <= q, so this never overflows for positive q
        let paid_units = (quantity / 3) * 2 + quantity % 3;
        unit_price.checked_multiply_quantity(paid_units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
