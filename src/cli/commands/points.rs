//! points command - Enumerate the allowed subspace

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::commands::Context;
use crate::dimension::ContentDimensionSource;
use crate::dimensionspace::InterDimensionalVariationGraph;

/// Print every allowed dimension space point, hash first.
pub fn points(ctx: &Context, config_path: &Path) -> Result<()> {
    let source = ContentDimensionSource::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let graph = InterDimensionalVariationGraph::new(source);

    for weighted in graph.weighted_dimension_space_points() {
        println!(
            "{}  {}",
            weighted.identifier(),
            weighted.dimension_space_point().to_json()
        );
    }

    if !ctx.quiet {
        eprintln!(
            "{} allowed point(s)",
            graph.dimension_space_points().len()
        );
    }

    Ok(())
}
