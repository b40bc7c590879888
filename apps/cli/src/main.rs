//! # Stockroom Entry Point
//!
//! The setup lives in lib.rs so it can be tested.

use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    match stockroom_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Stockroom stopped");
            ExitCode::FAILURE
        }
    }
}
