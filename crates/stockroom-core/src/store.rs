//! # Store
//!
//! The inventory: an ordered list of products plus the order flow.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Store::checkout(lines)                              │
//! │                                                                         │
//! │  for each OrderLine, in order:                                          │
//! │     │                                                                   │
//! │     ├── product id not in store? ──► skip (warn, recorded on receipt)   │
//! │     │                                                                   │
//! │     ├── quote(qty) fails or total overflows? ──► return Err             │
//! │     │        this line is untouched, earlier lines KEEP their changes   │
//! │     │                                                                   │
//! │     └── ok ──► purchase, receipt line, total = checked sum              │
//! │                                                                         │
//! │  return OrderReceipt { lines, skipped, total }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Rollback
//! An order is not a transaction. Each line is all-or-nothing on its own
//! product, but a failing line does not undo the lines before it. Callers
//! that retry a failed order should rebuild it from the current stock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;
use crate::types::{OrderLine, ProductId};

// =============================================================================
// Receipt
// =============================================================================

/// A charged order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    /// Product name at time of purchase.
    pub name: String,
    pub quantity: i64,
    pub charge: Money,
}

/// Outcome of a successful [`Store::checkout`].
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    /// Charged lines in request order.
    pub lines: Vec<ReceiptLine>,

    /// Lines whose product was not in the store.
    pub skipped: Vec<ProductId>,

    /// Sum of all line charges.
    pub total: Money,

    /// When the order went through, shown on the printed receipt.
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Store
// =============================================================================

/// An ordered collection of products.
///
/// Insertion order is kept and is what listings number by. Nothing stops the
/// same product (same id) from being added twice; lookups use the first one.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Creates a store from an already built catalog.
    pub fn new(products: Vec<Product>) -> Self {
        Store { products }
    }

    /// Appends a product and returns its id.
    pub fn add_product(&mut self, product: Product) -> ProductId {
        let id = product.id();
        self.products.push(product);
        id
    }

    /// Removes the first product with `id`. Unknown ids are a no-op.
    pub fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    /// All products, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total units in stock across every product, active or not.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Active products in insertion order.
    ///
    /// A fresh snapshot on every call, so it reflects purchases made since
    /// the last one.
    pub fn list_active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Processes `lines` and returns the total charge.
    ///
    /// See [`Store::checkout`] for the exact semantics.
    pub fn order(&mut self, lines: &[OrderLine]) -> CoreResult<Money> {
        self.checkout(lines).map(|receipt| receipt.total)
    }

    /// Processes `lines` in order and returns a receipt.
    ///
    /// Lines for products not in this store are skipped. The first line whose
    /// purchase fails aborts the call with that error; earlier lines keep
    /// their stock changes.
    pub fn checkout(&mut self, lines: &[OrderLine]) -> CoreResult<OrderReceipt> {
        let mut receipt_lines = Vec::with_capacity(lines.len());
        let mut skipped = Vec::new();
        let mut total = Money::zero();

        for (index, line) in lines.iter().enumerate() {
            let Some(product) = self.get_mut(line.product_id) else {
                warn!(product_id = %line.product_id, "Order line for unknown product skipped");
                skipped.push(line.product_id);
                continue;
            };

            let line_number = index + 1;
            let (charge, next_total) = product
                .quote(line.quantity)
                .and_then(|charge| {
                    total
                        .checked_add(charge)
                        .ok_or(CoreError::OrderTotalTooLarge { line: line_number })
                })
                .and_then(|next_total| {
                    let charge = product.purchase(line.quantity)?;
                    Ok((charge, next_total))
                })
                .map_err(|e| {
                    warn!(
                        line = line_number,
                        processed = receipt_lines.len(),
                        error = %e,
                        "Order aborted"
                    );
                    e
                })?;

            total = next_total;
            receipt_lines.push(ReceiptLine {
                product_id: line.product_id,
                name: product.name().to_string(),
                quantity: line.quantity,
                charge,
            });
        }

        info!(
            lines = receipt_lines.len(),
            skipped = skipped.len(),
            total = %total,
            "Order completed"
        );

        Ok(OrderReceipt {
            lines: receipt_lines,
            skipped,
            total,
            placed_at: Utc::now(),
        })
    }
}

impl From<Vec<Product>> for Store {
    fn from(products: Vec<Product>) -> Self {
        Store::new(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::{PercentDiscount, SecondHalfPrice, ThirdOneFree};
    use std::sync::Arc;

    fn best_buy() -> Store {
        let mut laptop = Product::new("MacBook Air M2", Money::from_cents(145000), 100).unwrap();
        let mut earbuds =
            Product::new("Bose QuietComfort Earbuds", Money::from_cents(25000), 500).unwrap();
        let phone = Product::new("Google Pixel 7", Money::from_cents(50000), 250).unwrap();
        let mut license = Product::non_stocked("Windows License", Money::from_cents(12500)).unwrap();
        let shipping = Product::limited("Shipping", Money::from_cents(1000), 250, 1).unwrap();

        laptop.set_promotion(Arc::new(SecondHalfPrice::new("Second Half price!").unwrap()));
        earbuds.set_promotion(Arc::new(ThirdOneFree::new("Third One Free!").unwrap()));
        license.set_promotion(Arc::new(PercentDiscount::new("30% off!", 30).unwrap()));

        Store::new(vec![laptop, earbuds, phone, license, shipping])
    }

    fn id_of(store: &Store, name: &str) -> ProductId {
        store
            .products()
            .iter()
            .find(|p| p.name() == name)
            .map(Product::id)
            .unwrap()
    }

    #[test]
    fn test_total_quantity() {
        let store = best_buy();
        assert_eq!(store.total_quantity(), 100 + 500 + 250 + 0 + 250);
    }

    #[test]
    fn test_total_quantity_includes_inactive() {
        let mut store = best_buy();
        let phone = id_of(&store, "Google Pixel 7");
        store.get_mut(phone).unwrap().deactivate();
        assert_eq!(store.total_quantity(), 1100);
    }

    #[test]
    fn test_order_total() {
        let mut store = best_buy();
        let laptop = id_of(&store, "MacBook Air M2");
        let earbuds = id_of(&store, "Bose QuietComfort Earbuds");
        let shipping = id_of(&store, "Shipping");

        let total = store
            .order(&[
                OrderLine::new(laptop, 2),
                OrderLine::new(earbuds, 3),
                OrderLine::new(shipping, 1),
            ])
            .unwrap();

        // 1450 + 725, 2 × 250, 10
        assert_eq!(total.cents(), 217500 + 50000 + 1000);
        assert_eq!(store.get(laptop).unwrap().quantity(), 98);
        assert_eq!(store.get(earbuds).unwrap().quantity(), 497);
        assert_eq!(store.get(shipping).unwrap().quantity(), 249);
    }

    #[test]
    fn test_empty_order_is_zero() {
        let mut store = best_buy();
        assert!(store.order(&[]).unwrap().is_zero());
        assert_eq!(store.total_quantity(), 1100);
    }

    #[test]
    fn test_failed_line_keeps_earlier_mutations() {
        let mut store = best_buy();
        let laptop = id_of(&store, "MacBook Air M2");
        let phone = id_of(&store, "Google Pixel 7");
        let earbuds = id_of(&store, "Bose QuietComfort Earbuds");

        let err = store
            .order(&[
                OrderLine::new(laptop, 2),
                OrderLine::new(phone, 1000),
                OrderLine::new(earbuds, 1),
            ])
            .unwrap_err();

        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(store.get(laptop).unwrap().quantity(), 98);
        assert_eq!(store.get(phone).unwrap().quantity(), 250);
        // Lines after the failure never run
        assert_eq!(store.get(earbuds).unwrap().quantity(), 500);
    }

    #[test]
    fn test_unknown_product_line_skipped() {
        let mut store = best_buy();
        let laptop = id_of(&store, "MacBook Air M2");
        let outsider = Product::new("Outsider", Money::from_cents(100), 10).unwrap();

        let receipt = store
            .checkout(&[
                OrderLine::new(outsider.id(), 5),
                OrderLine::new(laptop, 1),
            ])
            .unwrap();

        assert_eq!(receipt.total.cents(), 145000);
        assert_eq!(receipt.skipped, vec![outsider.id()]);
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].name, "MacBook Air M2");
        assert_eq!(outsider.quantity(), 10);
    }

    #[test]
    fn test_order_limit_aborts_order() {
        let mut store = best_buy();
        let shipping = id_of(&store, "Shipping");
        let err = store.order(&[OrderLine::new(shipping, 2)]).unwrap_err();
        assert!(matches!(err, CoreError::OrderLimitExceeded { .. }));
        assert_eq!(store.get(shipping).unwrap().quantity(), 250);
    }

    #[test]
    fn test_list_active_products_preserves_order() {
        let mut store = best_buy();
        let phone = id_of(&store, "Google Pixel 7");

        store.order(&[OrderLine::new(phone, 250)]).unwrap();
        assert!(!store.get(phone).unwrap().is_active());

        let names: Vec<&str> = store
            .list_active_products()
            .into_iter()
            .map(Product::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "MacBook Air M2",
                "Bose QuietComfort Earbuds",
                "Windows License",
                "Shipping"
            ]
        );
    }

    #[test]
    fn test_depleted_product_rejects_further_orders() {
        let mut store = best_buy();
        let phone = id_of(&store, "Google Pixel 7");
        store.order(&[OrderLine::new(phone, 250)]).unwrap();

        let err = store.order(&[OrderLine::new(phone, 1)]).unwrap_err();
        assert!(matches!(err, CoreError::Unavailable { .. }));
    }

    #[test]
    fn test_add_and_remove_product() {
        let mut store = Store::default();
        assert!(store.is_empty());

        let tv = Product::new("TV", Money::from_cents(30000), 4).unwrap();
        let tv_id = store.add_product(tv.clone());
        store.add_product(tv);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_quantity(), 8);

        let removed = store.remove_product(tv_id).unwrap();
        assert_eq!(removed.name(), "TV");
        assert_eq!(store.len(), 1);
        assert!(store.contains(tv_id));

        store.remove_product(tv_id);
        assert!(store.is_empty());
        assert!(store.remove_product(tv_id).is_none());
    }

    #[test]
    fn test_duplicate_product_uses_first_copy() {
        let tv = Product::new("TV", Money::from_cents(30000), 4).unwrap();
        let id = tv.id();
        let mut store = Store::new(vec![tv.clone(), tv]);

        store.order(&[OrderLine::new(id, 4)]).unwrap();
        assert_eq!(store.products()[0].quantity(), 0);
        assert_eq!(store.products()[1].quantity(), 4);

        // The first copy is now inactive, so it still answers the lookup
        assert!(matches!(
            store.order(&[OrderLine::new(id, 1)]),
            Err(CoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_huge_line_rejected_without_mutation() {
        let mut store = best_buy();
        let laptop = id_of(&store, "MacBook Air M2");
        let license = id_of(&store, "Windows License");

        let err = store
            .order(&[
                OrderLine::new(laptop, 1),
                OrderLine::new(license, 1_000_000_000_000_000),
            ])
            .unwrap_err();

        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(store.get(laptop).unwrap().quantity(), 99);
        assert!(store.get(license).unwrap().is_active());
    }

    #[test]
    fn test_order_total_overflow() {
        let price = Money::from_cents(i64::MAX / 2);
        let first = Product::non_stocked("Bullion", price).unwrap();
        let second = Product::new("Vault", price, 5).unwrap();
        let (first_id, second_id) = (first.id(), second.id());
        let mut store = Store::new(vec![first, second]);

        let err = store
            .order(&[OrderLine::new(first_id, 2), OrderLine::new(second_id, 1)])
            .unwrap_err();

        assert!(matches!(err, CoreError::OrderTotalTooLarge { line: 2 }));
        // The overflowing line never touched stock
        assert_eq!(store.get(second_id).unwrap().quantity(), 5);
    }

    #[test]
    fn test_receipt_timestamp() {
        let mut store = best_buy();
        let phone = id_of(&store, "Google Pixel 7");

        let before = Utc::now();
        let receipt = store.checkout(&[OrderLine::new(phone, 1)]).unwrap();
        let after = Utc::now();

        assert!(receipt.placed_at >= before && receipt.placed_at <= after);
    }

    #[test]
    fn test_receipt_serializes() {
        let mut store = best_buy();
        let license = id_of(&store, "Windows License");
        let receipt = store.checkout(&[OrderLine::new(license, 4)]).unwrap();
        assert_eq!(receipt.total.cents(), 35000);

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total"], 35000);
        assert_eq!(json["lines"][0]["name"], "Windows License");
        assert_eq!(json["lines"][0]["quantity"], 4);
    }
}
