// src/logging.rs
// =============================================================================
// Sets up tracing for the command-line tool.
//
// Log lines go to stderr so stdout stays a clean listing that can be piped
// into grep, sort, etc. RUST_LOG always wins; otherwise we log warnings,
// or everything down to debug with --verbose.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("could not initialize logging: {}", e))
}
