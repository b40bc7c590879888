//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Purchase and order rejections                  │
//! │  └── ValidationError  - Construction-time input failures               │
//! │                                                                         │
//! │  stockroom-cli errors (app crate)                                      │
//! │  └── CliError         - Config, I/O, wraps CoreError                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → message on screen      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant rejects a single call. Nothing here is process-fatal: the
//! caller reports the message and carries on.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by products and the store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Purchase quantity is zero or negative, or a stock level would go
    /// negative.
    #[error("Quantity must be positive, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// The product has been deactivated (explicitly or by running out).
    #[error("{name} is not available at the moment")]
    Unavailable { name: String },

    /// Requested more than the product has in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line (qty: 6)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { name: "MacBook Air M2", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Menu shows: "Oops! Insufficient stock for MacBook Air M2: ..."
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A limited product was asked for more than its per-order cap.
    #[error("Cannot buy more than {maximum} of {name} in a single order (requested {requested})")]
    OrderLimitExceeded {
        name: String,
        maximum: i64,
        requested: i64,
    },

    /// The charge for this many units does not fit in [`crate::Money`].
    #[error("Quantity {requested} of {name} is too large to price")]
    QuantityTooLarge { name: String, requested: i64 },

    /// The running order total no longer fits in [`crate::Money`].
    #[error("Order total is too large (at line {line})")]
    OrderTotalTooLarge { line: usize },

    /// Construction input was rejected.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building products and promotions, so an invalid entity never
/// comes into existence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
