//! fallback command - Print a point's primary generalization chain

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::commands::{parse_dimension_space_point, Context};
use crate::dimension::ContentDimensionSource;
use crate::dimensionspace::InterDimensionalVariationGraph;

/// Print the fallback chain from `point` up to its root, one
/// coordinate set per line, the point itself first.
pub fn fallback(ctx: &Context, config_path: &Path, point: &str) -> Result<()> {
    let source = ContentDimensionSource::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let graph = InterDimensionalVariationGraph::new(source);

    let start = parse_dimension_space_point(point)?;
    if !graph.dimension_space_points().contains(&start) {
        bail!(
            "dimension space point {} is not within the allowed dimension subspace",
            start.to_json()
        );
    }

    let mut current = &start;
    let mut steps = 0usize;
    loop {
        println!("{}", current.to_json());
        match graph.primary_generalization(current) {
            Some(generalization) => {
                current = generalization;
                steps += 1;
            }
            None => break,
        }
    }

    if !ctx.quiet {
        eprintln!("{} fallback step(s) to the root", steps);
    }

    Ok(())
}
