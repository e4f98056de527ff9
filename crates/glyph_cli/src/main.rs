//! forge-glyph command line entry point
//!
//! Regenerates the icon components for the project in the current
//! directory. Log verbosity is controlled with `GLYPH_LOG`.

mod generate;

use anyhow::{Context, Result};
use std::env;

fn main() -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    // Use GLYPH_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("GLYPH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    rt.block_on(generate::run(&args))
}
