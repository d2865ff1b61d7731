//! variant command - Classify the relation between two points

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::commands::{parse_dimension_space_point, Context};
use crate::dimension::ContentDimensionSource;
use crate::dimensionspace::InterDimensionalVariationGraph;

/// Print how point `a` relates to point `b`.
///
/// Output is a single word (same, specialization, generalization,
/// peer) so the command composes in scripts. Points outside the
/// allowed subspace are warned about but still classified, which by
/// construction makes them peers of everything except themselves.
pub fn variant(ctx: &Context, config_path: &Path, a: &str, b: &str) -> Result<()> {
    let source = ContentDimensionSource::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let graph = InterDimensionalVariationGraph::new(source);

    let point_a = parse_dimension_space_point(a)?;
    let point_b = parse_dimension_space_point(b)?;

    if !ctx.quiet {
        for (label, point) in [("a", &point_a), ("b", &point_b)] {
            if !graph.dimension_space_points().contains(point) {
                eprintln!(
                    "warning: point {} {} is outside the allowed subspace",
                    label,
                    point.to_json()
                );
            }
        }
    }

    println!("{}", graph.variant_type(&point_a, &point_b));
    Ok(())
}
