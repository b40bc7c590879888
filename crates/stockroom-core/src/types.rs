//! # Domain Types
//!
//! Small value types shared by products, promotions and the store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Value Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │  DiscountRate   │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  UUID v4        │   │  bps (u32)      │   │  product_id     │       │
//! │  │  fixed at       │   │  3000 = 30%     │   │  quantity       │       │
//! │  │  construction   │   │  0..=10000      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A store owns its products, so callers never hold a product reference while
//! ordering. They hold its `ProductId` instead, and the store resolves ids to
//! products. Names are for people and may repeat.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::validation::{validate_discount_bps, ValidationResult};

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a product inside a store.
///
/// Assigned once when the product is built and kept by clones, so a cloned
/// product is "the same product" as far as the store is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        ProductId::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 3000 bps = 30% off. Always within 0..=10000,
/// which is why it only serializes: deserialized rates must go through
/// [`DiscountRate::from_bps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from whole percent (0-100).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percent(30).unwrap().bps(), 3000);
    /// assert!(DiscountRate::from_percent(101).is_err());
    /// ```
    pub fn from_percent(percent: u32) -> ValidationResult<Self> {
        Self::from_bps(percent.saturating_mul(100))
    }

    /// Creates a rate from basis points (0-10000).
    pub fn from_bps(bps: u32) -> ValidationResult<Self> {
        validate_discount_bps(bps)?;
        Ok(DiscountRate(bps))
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One (product, desired quantity) pair within an order.
///
/// The quantity is not checked here; `Product::purchase` rejects
/// non-positive quantities when the line is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub const fn new(product_id: ProductId, quantity: i64) -> Self {
        OrderLine {
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
