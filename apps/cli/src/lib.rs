//! # Stockroom CLI Library
//!
//! Wires the catalog config, logging, and the text menu around
//! `stockroom-core`. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (args, logging, startup)
//! ├── config.rs       ◄─── Catalog config: defaults < TOML file < env
//! ├── menu.rs         ◄─── Interactive menu over any BufRead/Write
//! └── error.rs        ◄─── CLI error type
//! ```

pub mod config;
pub mod error;
pub mod menu;

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::CatalogConfig;
use error::CliResult;
use menu::Menu;

/// Stockroom - a text menu store front
#[derive(Debug, Parser)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (TOML). Defaults to catalog.toml in the user config dir.
    #[arg(short, long, env = "STOCKROOM_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Runs the store front on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse arguments ──────────────────────────────────────────────────► │
/// │     • --catalog <path> or STOCKROOM_CATALOG                             │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn, stockroom crates at info                           │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • built-in catalog < catalog file < environment                     │
/// │     • build the Store with shared promotions                            │
/// │                                                                         │
/// │  4. Run the Menu until quit or end of input ──────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing();

    info!("Starting Stockroom");

    let config = CatalogConfig::load(cli.catalog)?;
    let store = config.build_store()?;
    info!(
        store_name = %config.store.name,
        products = store.len(),
        "Catalog loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(store, config.store.name, stdin.lock(), stdout.lock());
    menu.run()?;

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every purchase
/// - `RUST_LOG=stockroom_core=trace` - Trace the core only
/// - Default: WARN, INFO for the stockroom crates
///
/// Logs go to stderr so the menu on stdout stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom_core=info,stockroom_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
