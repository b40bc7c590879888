//! # stockroom-core: Pricing and Inventory Engine
//!
//! Pure business logic for a small retail store: products with stock,
//! promotional pricing, and multi-line orders. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockroom-cli (apps/cli)                     │   │
//! │  │    catalog.toml ──► menu loop ──► order lines ──► receipt       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   store   │  │  product  │  │ promotion │  │   money   │   │   │
//! │  │   │   Store   │─►│  Product  │─►│  Percent  │  │   Money   │   │   │
//! │  │   │  Receipt  │  │   Kind    │  │  2nd Half │  │           │   │   │
//! │  │   │           │  │           │  │  3rd Free │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CONSOLE • DETERMINISTIC PRICING        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The inventory and the order flow
//! - [`product`] - Products and their stock policies
//! - [`promotion`] - Pricing strategies
//! - [`money`] - Integer money
//! - [`types`] - Ids, discount rates, order lines
//! - [`error`] - Domain error types
//! - [`validation`] - Construction-time checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stockroom_core::promotion::ThirdOneFree;
//! use stockroom_core::{Money, OrderLine, Product, Store};
//!
//! let mut earbuds = Product::new("Earbuds", Money::from_cents(25000), 500).unwrap();
//! earbuds.set_promotion(Arc::new(ThirdOneFree::new("Third One Free!").unwrap()));
//! let earbuds_id = earbuds.id();
//!
//! let mut store = Store::new(vec![earbuds]);
//! let total = store.order(&[OrderLine::new(earbuds_id, 3)]).unwrap();
//!
//! assert_eq!(total.cents(), 50000);
//! assert_eq!(store.total_quantity(), 497);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind};
pub use promotion::{PercentDiscount, Promotion, SecondHalfPrice, ThirdOneFree};
pub use store::{OrderReceipt, ReceiptLine, Store};
pub use types::*;
