//! # Products
//!
//! A single `Product` type whose stock behaviour is chosen by `ProductKind`.
//!
//! ## Purchase Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product::purchase(quantity)                         │
//! │                                                                         │
//! │  Limited and qty > maximum? ──────► OrderLimitExceeded                  │
//! │       │                                                                 │
//! │  qty <= 0? ────────────────────────► InvalidQuantity                    │
//! │       │                                                                 │
//! │  inactive? ────────────────────────► Unavailable                        │
//! │       │                                                                 │
//! │  tracks stock and qty > stock? ────► InsufficientStock                  │
//! │       │                                                                 │
//! │  promotion? apply(unit_price, qty) : unit_price × qty                   │
//! │       │              overflow? ────► QuantityTooLarge                   │
//! │       ▼                                                                 │
//! │  tracks stock: set_quantity(stock - qty)   (0 ⇒ deactivate)  ──► charge │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check, pricing included, runs before any mutation, so a rejected
//! purchase leaves the product exactly as it was. [`Product::quote`] runs
//! the same checks without buying anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::types::ProductId;
use crate::validation::{
    validate_maximum_per_order, validate_price_cents, validate_product_name, validate_stock,
};

// =============================================================================
// Product Kind
// =============================================================================

/// Stock policy of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Stock is decremented by every purchase and must be sufficient.
    Standard,

    /// No stock at all (licenses, services). Purchases never run out and
    /// the stock level stays pinned at zero.
    NonStocked,

    /// Stock-tracked, plus a cap on units per purchase.
    Limited { maximum_per_order: i64 },
}

impl ProductKind {
    /// Whether purchases draw down `quantity`.
    #[inline]
    pub const fn tracks_stock(&self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product for sale.
///
/// ## Invariants
/// - `name` is non-empty, `unit_price >= 0`, `quantity >= 0`
/// - non-stocked products always have `quantity == 0`
/// - setting a stock-tracked product's quantity to 0 deactivates it; it
///   stays inactive until [`Product::activate`] is called
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    quantity: i64,
    active: bool,
    kind: ProductKind,
    promotion: Option<Arc<dyn Promotion>>,
}

impl Product {
    /// Creates a standard, stock-tracked product.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let mut laptop = Product::new("MacBook Air M2", Money::from_cents(145000), 100).unwrap();
    /// let charge = laptop.purchase(2).unwrap();
    /// assert_eq!(charge.cents(), 290000);
    /// assert_eq!(laptop.quantity(), 98);
    /// ```
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> CoreResult<Self> {
        Self::build(name.into(), unit_price, quantity, ProductKind::Standard)
    }

    /// Creates a product without stock (e.g. a software license).
    pub fn non_stocked(name: impl Into<String>, unit_price: Money) -> CoreResult<Self> {
        Self::build(name.into(), unit_price, 0, ProductKind::NonStocked)
    }

    /// Creates a stock-tracked product that caps units per purchase.
    pub fn limited(
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        maximum_per_order: i64,
    ) -> CoreResult<Self> {
        validate_maximum_per_order(maximum_per_order)?;
        Self::build(
            name.into(),
            unit_price,
            quantity,
            ProductKind::Limited { maximum_per_order },
        )
    }

    fn build(name: String, unit_price: Money, quantity: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price_cents(unit_price.cents())?;
        validate_stock(quantity)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            unit_price,
            quantity,
            active: true,
            kind,
            promotion: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Units in stock. Always 0 for non-stocked products.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Per-order cap, for limited products only.
    pub fn maximum_per_order(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Limited { maximum_per_order } => Some(maximum_per_order),
            _ => None,
        }
    }

    // =========================================================================
    // Stock & Status
    // =========================================================================

    /// Sets the stock level.
    ///
    /// Negative values are rejected. Reaching exactly 0 deactivates a
    /// stock-tracked product in the same call. Non-stocked products ignore
    /// the new value.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        if !self.kind.tracks_stock() {
            return Ok(());
        }

        self.quantity = quantity;
        if quantity == 0 {
            debug!(product = %self.name, "Out of stock, deactivating");
            self.deactivate();
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    // =========================================================================
    // Promotion
    // =========================================================================

    /// Attaches a promotion, replacing any previous one.
    pub fn set_promotion(&mut self, promotion: Arc<dyn Promotion>) {
        self.promotion = Some(promotion);
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    pub fn promotion(&self) -> Option<&Arc<dyn Promotion>> {
        self.promotion.as_ref()
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Charge for `quantity` units, ignoring stock and status.
    pub fn price_for(&self, quantity: i64) -> CoreResult<Money> {
        let charge = match &self.promotion {
            Some(promotion) => promotion.apply(self.unit_price, quantity),
            None => self.unit_price.checked_multiply_quantity(quantity),
        };

        charge.ok_or_else(|| CoreError::QuantityTooLarge {
            name: self.name.clone(),
            requested: quantity,
        })
    }

    /// Runs every purchase check and returns the charge, without buying.
    pub fn quote(&self, quantity: i64) -> CoreResult<Money> {
        // The cap is checked before anything else, including stock.
        if let ProductKind::Limited { maximum_per_order } = self.kind {
            if quantity > maximum_per_order {
                return Err(CoreError::OrderLimitExceeded {
                    name: self.name.clone(),
                    maximum: maximum_per_order,
                    requested: quantity,
                });
            }
        }

        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        if !self.active {
            return Err(CoreError::Unavailable {
                name: self.name.clone(),
            });
        }

        if self.kind.tracks_stock() && quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        self.price_for(quantity)
    }

    /// Buys `quantity` units and returns the charge.
    ///
    /// On error nothing changes. On success stock-tracked products lose
    /// `quantity` units of stock.
    pub fn purchase(&mut self, quantity: i64) -> CoreResult<Money> {
        let charge = self.quote(quantity)?;

        if self.kind.tracks_stock() {
            self.set_quantity(self.quantity - quantity)?;
        }

        debug!(
            product = %self.name,
            quantity,
            charge = %charge,
            remaining = self.quantity,
            "Purchased"
        );

        Ok(charge)
    }

    /// Human-readable one-line summary, see the `Display` impl.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

/// `{name}, Price: {price}`, then the kind's fields, then the promotion.
///
/// ```text
/// MacBook Air M2, Price: 1450.00, Quantity: 100, Promotion: Second Half price!
/// Windows License, Price: 125.00, Promotion: 30% off!
/// Shipping, Price: 10.00, Max per order: 1, Quantity: 250
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Price: {}", self.name, self.unit_price)?;

        match self.kind {
            ProductKind::Standard => write!(f, ", Quantity: {}", self.quantity)?,
            ProductKind::NonStocked => {}
            ProductKind::Limited { maximum_per_order } => write!(
                f,
                ", Max per order: {}, Quantity: {}",
                maximum_per_order, self.quantity
            )?,
        }

        if let Some(promotion) = &self.promotion {
            write!(f, ", Promotion: {}", promotion.name())?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::promotion::{PercentDiscount, SecondHalfPrice, ThirdOneFree};

    fn macbook(quantity: i64) -> Product {
        Product::new("MacBook Air M2", Money::from_cents(145000), quantity).unwrap()
    }

    #[test]
    fn test_create_normal_product() {
        let product = macbook(100);
        assert_eq!(product.name(), "MacBook Air M2");
        assert_eq!(product.unit_price().cents(), 145000);
        assert_eq!(product.quantity(), 100);
        assert_eq!(product.kind(), ProductKind::Standard);
        assert!(product.is_active());
        assert!(product.promotion().is_none());
    }

    #[test]
    fn test_create_product_with_invalid_details() {
        let empty_name = Product::new("", Money::from_cents(145000), 100);
        assert!(matches!(
            empty_name,
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let negative_price = Product::new("MacBook Air M2", Money::from_cents(-10), 100);
        assert!(matches!(negative_price, Err(CoreError::Validation(_))));

        let negative_stock = Product::new("MacBook Air M2", Money::from_cents(145000), -5);
        assert!(matches!(negative_stock, Err(CoreError::Validation(_))));

        let zero_cap = Product::limited("Shipping", Money::from_cents(1000), 250, 0);
        assert!(matches!(zero_cap, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_product_becomes_inactive_when_quantity_zero() {
        let mut product = macbook(1);
        product.purchase(1).unwrap();
        assert_eq!(product.quantity(), 0);
        assert!(!product.is_active());

        // No automatic reactivation, even if stock comes back
        product.set_quantity(5).unwrap();
        assert!(!product.is_active());

        product.activate();
        assert!(product.is_active());
    }

    #[test]
    fn test_product_purchase_updates_quantity() {
        let mut product = macbook(10);
        let charge = product.purchase(2).unwrap();
        assert_eq!(charge.cents(), 145000 * 2);
        assert_eq!(product.quantity(), 8);
        assert!(product.is_active());
    }

    #[test]
    fn test_buying_more_than_available_quantity_fails() {
        let mut product = macbook(5);
        let err = product.purchase(6).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut product = macbook(5);
        assert!(matches!(
            product.purchase(0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            product.purchase(-2),
            Err(CoreError::InvalidQuantity { requested: -2 })
        ));
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_inactive_product_unavailable() {
        let mut product = macbook(5);
        product.deactivate();
        assert!(matches!(
            product.purchase(1),
            Err(CoreError::Unavailable { .. })
        ));
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_set_quantity_rejects_negative() {
        let mut product = macbook(5);
        assert!(matches!(
            product.set_quantity(-1),
            Err(CoreError::InvalidQuantity { requested: -1 })
        ));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_non_stocked_product() {
        let mut license = Product::non_stocked("Windows License", Money::from_cents(12500)).unwrap();
        assert_eq!(license.quantity(), 0);
        assert!(license.is_active());

        for _ in 0..3 {
            assert_eq!(license.purchase(5).unwrap().cents(), 12500 * 5);
            assert_eq!(license.quantity(), 0);
            assert!(license.is_active());
        }

        license.set_quantity(40).unwrap();
        assert_eq!(license.quantity(), 0);
        assert!(license.is_active());
    }

    #[test]
    fn test_non_stocked_still_checks_quantity_and_status() {
        let mut license = Product::non_stocked("Windows License", Money::from_cents(12500)).unwrap();
        assert!(license.purchase(0).is_err());

        license.deactivate();
        assert!(matches!(
            license.purchase(1),
            Err(CoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_limited_product() {
        let mut shipping = Product::limited("Shipping", Money::from_cents(1000), 250, 1).unwrap();
        assert_eq!(shipping.maximum_per_order(), Some(1));

        assert!(matches!(
            shipping.purchase(2),
            Err(CoreError::OrderLimitExceeded {
                maximum: 1,
                requested: 2,
                ..
            })
        ));
        assert_eq!(shipping.quantity(), 250);

        assert_eq!(shipping.purchase(1).unwrap().cents(), 1000);
        assert_eq!(shipping.quantity(), 249);
    }

    #[test]
    fn test_limited_cap_checked_before_stock() {
        let mut shipping = Product::limited("Shipping", Money::from_cents(1000), 1, 2).unwrap();
        assert!(matches!(
            shipping.purchase(3),
            Err(CoreError::OrderLimitExceeded { .. })
        ));

        let mut drained = Product::limited("Shipping", Money::from_cents(1000), 1, 2).unwrap();
        assert!(matches!(
            drained.purchase(2),
            Err(CoreError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_huge_non_stocked_purchase_rejected() {
        let mut license = Product::non_stocked("Windows License", Money::from_cents(12500)).unwrap();
        assert!(matches!(
            license.purchase(1_000_000_000_000_000),
            Err(CoreError::QuantityTooLarge {
                requested: 1_000_000_000_000_000,
                ..
            })
        ));
        assert!(license.is_active());

        license.set_promotion(Arc::new(PercentDiscount::new("30% off!", 30).unwrap()));
        assert!(matches!(
            license.purchase(i64::MAX),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(license.purchase(4).unwrap().cents(), 35000);
    }

    #[test]
    fn test_overflowing_charge_leaves_stock_unchanged() {
        let mut vault = Product::new("Vault", Money::from_cents(i64::MAX / 2), 3).unwrap();
        assert!(matches!(
            vault.purchase(3),
            Err(CoreError::QuantityTooLarge { requested: 3, .. })
        ));
        assert_eq!(vault.quantity(), 3);
        assert!(vault.is_active());

        assert_eq!(vault.purchase(2).unwrap().cents(), (i64::MAX / 2) * 2);
        assert_eq!(vault.quantity(), 1);
    }

    #[test]
    fn test_quote_does_not_mutate() {
        let product = macbook(5);
        assert_eq!(product.quote(5).unwrap().cents(), 145000 * 5);
        assert!(matches!(
            product.quote(6),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_purchase_with_promotion() {
        let mut product = Product::new("Earbuds", Money::from_cents(1000), 20).unwrap();
        product.set_promotion(Arc::new(ThirdOneFree::new("Third One Free!").unwrap()));

        assert_eq!(product.purchase(7).unwrap().cents(), 5000);
        assert_eq!(product.quantity(), 13);
    }

    #[test]
    fn test_non_stocked_with_promotion() {
        let mut license = Product::non_stocked("Windows License", Money::from_cents(1000)).unwrap();
        license.set_promotion(Arc::new(PercentDiscount::new("30% off!", 30).unwrap()));
        assert_eq!(license.purchase(4).unwrap().cents(), 2800);
    }

    #[test]
    fn test_shared_promotion() {
        let promo: Arc<dyn Promotion> = Arc::new(SecondHalfPrice::new("Second Half price!").unwrap());
        let mut a = Product::new("A", Money::from_cents(1000), 10).unwrap();
        let mut b = Product::new("B", Money::from_cents(2000), 10).unwrap();
        a.set_promotion(Arc::clone(&promo));
        b.set_promotion(Arc::clone(&promo));

        assert_eq!(a.purchase(3).unwrap().cents(), 2500);
        assert_eq!(b.purchase(2).unwrap().cents(), 3000);
        assert_eq!(Arc::strong_count(&promo), 3);

        a.clear_promotion();
        assert_eq!(a.price_for(2).unwrap().cents(), 2000);
        assert_eq!(Arc::strong_count(&promo), 2);
    }

    #[test]
    fn test_display() {
        let mut laptop = macbook(100);
        assert_eq!(laptop.display(), "MacBook Air M2, Price: 1450.00, Quantity: 100");

        laptop.set_promotion(Arc::new(SecondHalfPrice::new("Second Half price!").unwrap()));
        assert_eq!(
            laptop.display(),
            "MacBook Air M2, Price: 1450.00, Quantity: 100, Promotion: Second Half price!"
        );

        let license = Product::non_stocked("Windows License", Money::from_cents(12500)).unwrap();
        assert_eq!(license.display(), "Windows License, Price: 125.00");

        let shipping = Product::limited("Shipping", Money::from_cents(1000), 250, 1).unwrap();
        assert_eq!(
            shipping.to_string(),
            "Shipping, Price: 10.00, Max per order: 1, Quantity: 250"
        );
    }

    #[test]
    fn test_clone_keeps_identity() {
        let product = macbook(3);
        let copy = product.clone();
        assert_eq!(product.id(), copy.id());
        assert_ne!(product.id(), macbook(3).id());
    }

    #[test]
    fn test_product_kind_serde() {
        let json = serde_json::to_string(&ProductKind::Limited {
            maximum_per_order: 1,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"limited","maximum_per_order":1}"#);

        let kind: ProductKind = serde_json::from_str(r#"{"kind":"non_stocked"}"#).unwrap();
        assert_eq!(kind, ProductKind::NonStocked);
    }
}
