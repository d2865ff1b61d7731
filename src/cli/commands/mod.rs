//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the library to do the actual work
//! 3. Formats and displays output
//!
//! Handlers never mutate anything; every command is a read over a
//! configuration file.

mod completion;
mod fallback;
mod points;
mod validate;
mod variant;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use fallback::fallback;
pub use points::points;
pub use validate::validate;
pub use variant::variant;

use anyhow::{bail, Result};

use crate::cli::args::Command;
use crate::dimensionspace::DimensionSpacePoint;

/// Execution context threaded through command handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Minimal output.
    pub quiet: bool,
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Validate { config } => validate::validate(ctx, &config),
        Command::Points { config } => points::points(ctx, &config),
        Command::Variant { config, a, b } => variant::variant(ctx, &config, &a, &b),
        Command::Fallback { config, point } => fallback::fallback(ctx, &config, &point),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Parse comma-separated `dim=value` pairs into a point.
///
/// A blank string parses as the empty point of a zero-dimensional
/// space.
pub fn parse_dimension_space_point(raw: &str) -> Result<DimensionSpacePoint> {
    let mut pairs = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((dimension, value)) = part.split_once('=') else {
            bail!(
                "malformed coordinate \"{}\": expected dim=value,dim=value",
                part
            );
        };
        pairs.push((dimension.trim().to_string(), value.trim().to_string()));
    }
    Ok(DimensionSpacePoint::from_pairs(pairs)?)
}
