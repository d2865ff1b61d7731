//! cli
//!
//! Command-line interface layer for the `mf` inspector.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging from the verbosity flags
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches
//! to the library: dimension configuration loading lives in
//! [`crate::dimension`] and the variation queries in
//! [`crate::dimensionspace`]. Commands only read and print.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};
pub use commands::Context;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // RUST_LOG wins; the flags only pick the fallback filter.
    let filter = if cli.debug {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
