//! # Catalog Configuration
//!
//! Describes the products and promotions the store starts with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_STORE_NAME="Corner Shop"                                 │
//! │                                                                         │
//! │  2. TOML Catalog File                                                  │
//! │     --catalog <path> / STOCKROOM_CATALOG, else                         │
//! │     ~/.config/stockroom/catalog.toml (Linux)                           │
//! │     ~/Library/Application Support/com.stockroom.stockroom/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The built-in "Best Buy" catalog                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog File Format
//! ```toml
//! [store]
//! name = "Best Buy"
//!
//! [[promotions]]
//! id = "thirty_percent"
//! name = "30% off!"
//! kind = "percent_discount"
//! percent = 30
//!
//! [[products]]
//! name = "Windows License"
//! price_cents = 12500
//! kind = "non_stocked"
//! promotion = "thirty_percent"
//!
//! [[products]]
//! name = "Shipping"
//! price_cents = 1000
//! quantity = 250
//! kind = "limited"
//! maximum = 1
//! ```
//!
//! The file is only checked for consistency here (promotion references,
//! required per-kind fields). Names, prices and stock are validated by the
//! core when the store is built.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use stockroom_core::{
    CoreError, Money, PercentDiscount, Product, Promotion, SecondHalfPrice, Store, ThirdOneFree,
};

use crate::error::{CliError, CliResult};

/// Environment variable that overrides the store's display name.
pub const STORE_NAME_ENV: &str = "STOCKROOM_STORE_NAME";

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Name shown in the welcome and goodbye messages.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Best Buy".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// Which pricing strategy a promotion entry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    PercentDiscount,
    SecondHalfPrice,
    ThirdOneFree,
}

/// A `[[promotions]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionConfig {
    /// Key products use to reference this promotion.
    pub id: String,

    /// Display name, e.g. "Third One Free!".
    pub name: String,

    pub kind: PromotionKind,

    /// Whole percent off, required for `percent_discount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,
}

impl PromotionConfig {
    fn build(&self) -> CliResult<Arc<dyn Promotion>> {
        let promotion: Arc<dyn Promotion> = match self.kind {
            PromotionKind::PercentDiscount => {
                let percent = self.percent.ok_or_else(|| self.missing("percent"))?;
                Arc::new(PercentDiscount::new(&self.name, percent).map_err(CoreError::from)?)
            }
            PromotionKind::SecondHalfPrice => {
                Arc::new(SecondHalfPrice::new(&self.name).map_err(CoreError::from)?)
            }
            PromotionKind::ThirdOneFree => {
                Arc::new(ThirdOneFree::new(&self.name).map_err(CoreError::from)?)
            }
        };
        Ok(promotion)
    }

    fn missing(&self, field: &str) -> CliError {
        CliError::InvalidConfig(format!("promotion '{}' is missing '{}'", self.id, field))
    }
}

// =============================================================================
// Products
// =============================================================================

/// Which stock policy a product entry builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKindConfig {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

/// A `[[products]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Initial stock. Ignored for non-stocked products.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub kind: ProductKindConfig,

    /// Per-order cap, required for `limited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,

    /// Id of a `[[promotions]]` entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl ProductConfig {
    fn build(&self, promotions: &HashMap<&str, Arc<dyn Promotion>>) -> CliResult<Product> {
        let price = Money::from_cents(self.price_cents);

        let mut product = match self.kind {
            ProductKindConfig::Standard => Product::new(&self.name, price, self.quantity)?,
            ProductKindConfig::NonStocked => Product::non_stocked(&self.name, price)?,
            ProductKindConfig::Limited => {
                let maximum = self.maximum.ok_or_else(|| {
                    CliError::InvalidConfig(format!(
                        "limited product '{}' is missing 'maximum'",
                        self.name
                    ))
                })?;
                Product::limited(&self.name, price, self.quantity, maximum)?
            }
        };

        if let Some(promotion_id) = &self.promotion {
            let promotion = promotions
                .get(promotion_id.as_str())
                .ok_or_else(|| unknown_promotion(&self.name, promotion_id))?;
            product.set_promotion(Arc::clone(promotion));
        }

        Ok(product)
    }
}

fn unknown_promotion(product: &str, promotion_id: &str) -> CliError {
    CliError::InvalidConfig(format!(
        "product '{}' references unknown promotion '{}'",
        product, promotion_id
    ))
}

// =============================================================================
// Catalog
// =============================================================================

/// Complete start-up catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub promotions: Vec<PromotionConfig>,

    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

impl Default for CatalogConfig {
    /// The "Best Buy" demo catalog.
    fn default() -> Self {
        let promotion = |id: &str, name: &str, kind, percent| PromotionConfig {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            percent,
        };
        let product = |name: &str, price_cents, quantity, kind, maximum, promotion: Option<&str>| {
            ProductConfig {
                name: name.to_string(),
                price_cents,
                quantity,
                kind,
                maximum,
                promotion: promotion.map(str::to_string),
            }
        };

        CatalogConfig {
            store: StoreSettings::default(),
            promotions: vec![
                promotion("second_half_price", "Second Half price!", PromotionKind::SecondHalfPrice, None),
                promotion("third_one_free", "Third One Free!", PromotionKind::ThirdOneFree, None),
                promotion("thirty_percent", "30% off!", PromotionKind::PercentDiscount, Some(30)),
            ],
            products: vec![
                product("MacBook Air M2", 145000, 100, ProductKindConfig::Standard, None, Some("second_half_price")),
                product("Bose QuietComfort Earbuds", 25000, 500, ProductKindConfig::Standard, None, Some("third_one_free")),
                product("Google Pixel 7", 50000, 250, ProductKindConfig::Standard, None, None),
                product("Windows License", 12500, 0, ProductKindConfig::NonStocked, None, Some("thirty_percent")),
                product("Shipping", 1000, 250, ProductKindConfig::Limited, Some(1), None),
            ],
        }
    }
}

impl CatalogConfig {
    /// Loads the catalog from file and environment on top of the defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default catalog
    /// 2. Catalog file. An explicit `path` must exist; the per-user default
    ///    path is optional.
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                other => {
                    debug!(path = ?other, "No catalog file, using built-in catalog");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a catalog file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading catalog from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`CatalogConfig::load`]).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup(STORE_NAME_ENV) {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }
    }

    /// Checks references between entries.
    pub fn validate(&self) -> CliResult<()> {
        let mut seen = HashSet::new();
        for promotion in &self.promotions {
            if !seen.insert(promotion.id.as_str()) {
                return Err(CliError::InvalidConfig(format!(
                    "duplicate promotion id '{}'",
                    promotion.id
                )));
            }
            if promotion.kind == PromotionKind::PercentDiscount && promotion.percent.is_none() {
                return Err(promotion.missing("percent"));
            }
        }

        for product in &self.products {
            if let Some(id) = &product.promotion {
                if !seen.contains(id.as_str()) {
                    return Err(unknown_promotion(&product.name, id));
                }
            }
            if product.kind == ProductKindConfig::Limited && product.maximum.is_none() {
                return Err(CliError::InvalidConfig(format!(
                    "limited product '{}' is missing 'maximum'",
                    product.name
                )));
            }
        }

        Ok(())
    }

    /// Builds the store, sharing one instance per promotion id.
    pub fn build_store(&self) -> CliResult<Store> {
        let mut promotions: HashMap<&str, Arc<dyn Promotion>> = HashMap::new();
        for entry in &self.promotions {
            promotions.insert(entry.id.as_str(), entry.build()?);
        }

        let products = self
            .products
            .iter()
            .map(|entry| entry.build(&promotions))
            .collect::<CliResult<Vec<_>>>()?;

        info!(
            store = %self.store.name,
            products = products.len(),
            promotions = promotions.len(),
            "Catalog built"
        );

        Ok(Store::new(products))
    }

    /// Returns the per-user catalog path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
