//! # CLI Error Type
//!
//! Errors that can stop the store front from starting or running.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in stockroom-cli                          │
//! │                                                                         │
//! │  Startup                                  In the menu                   │
//! │  ───────                                  ───────────                   │
//! │  catalog.toml unreadable ──► Io           order fails ──► CoreError     │
//! │  catalog.toml malformed ───► ConfigParse        │                       │
//! │  dangling promotion id ────► InvalidConfig      ▼                       │
//! │  bad product values ───────► Core         "Oops! ... Please try that    │
//! │          │                                  again", session continues   │
//! │          ▼                                                              │
//! │  main logs the error and exits non-zero                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the catalog or talking to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid TOML for [`crate::config::CatalogConfig`].
    #[error("Failed to parse catalog: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The catalog parsed but is inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidConfig(String),

    /// A product or promotion in the catalog was rejected by the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
