//! validate command - Check a dimension configuration

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::commands::Context;
use crate::dimension::{
    ContentDimensionSource, DimensionsConfiguration, ValueConfiguration,
};
use crate::dimensionspace::InterDimensionalVariationGraph;

/// Validate a dimension configuration file.
///
/// Hard problems (unparseable TOML, duplicate axes, unknown defaults,
/// invalid identifiers) fail the command. Constraint declarations that
/// reference unknown axes or values survive construction, so they are
/// reported as warnings instead.
pub fn validate(ctx: &Context, config_path: &Path) -> Result<()> {
    let configuration = DimensionsConfiguration::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let warnings = check_constraint_references(&configuration);
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    let source = ContentDimensionSource::from_configuration(&configuration)
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;
    let graph = InterDimensionalVariationGraph::new(source);

    let dimension_count = graph.source().dimensions_ordered_by_priority().len();
    let value_count: usize = graph
        .source()
        .dimensions_ordered_by_priority()
        .iter()
        .map(|dimension| dimension.values().len())
        .sum();
    let point_count = graph.dimension_space_points().len();

    if dimension_count > 0 && point_count == 0 {
        eprintln!("warning: constraints eliminate every dimension value combination");
    }

    if !ctx.quiet {
        println!(
            "configuration OK: {} dimension(s), {} value(s), {} allowed point(s)",
            dimension_count, value_count, point_count
        );
        if !warnings.is_empty() {
            println!("{} warning(s)", warnings.len());
        }
    }

    Ok(())
}

/// Constraints point across axes by raw string; collect the dangling
/// references.
fn check_constraint_references(configuration: &DimensionsConfiguration) -> Vec<String> {
    let declared_axes: BTreeSet<&str> = configuration
        .dimensions
        .iter()
        .map(|dimension| dimension.id.as_str())
        .collect();

    let mut warnings = Vec::new();
    for dimension in &configuration.dimensions {
        for value in &dimension.values {
            collect_value_warnings(
                configuration,
                &declared_axes,
                &dimension.id,
                value,
                &mut warnings,
            );
        }
    }
    warnings
}

fn collect_value_warnings(
    configuration: &DimensionsConfiguration,
    declared_axes: &BTreeSet<&str>,
    axis: &str,
    value: &ValueConfiguration,
    warnings: &mut Vec<String>,
) {
    for (target_axis, entries) in &value.constraints {
        if !declared_axes.contains(target_axis.as_str()) {
            warnings.push(format!(
                "constraint on \"{}\"/\"{}\" references undeclared dimension \"{}\"",
                axis, value.value, target_axis
            ));
            continue;
        }
        for target_value in entries.keys() {
            if target_value == "*" {
                continue;
            }
            if !value_is_declared(configuration, target_axis, target_value) {
                warnings.push(format!(
                    "constraint on \"{}\"/\"{}\" references unknown value \"{}\" of dimension \"{}\"",
                    axis, value.value, target_value, target_axis
                ));
            }
        }
    }

    for specialization in &value.specializations {
        collect_value_warnings(configuration, declared_axes, axis, specialization, warnings);
    }
}

fn value_is_declared(
    configuration: &DimensionsConfiguration,
    axis: &str,
    value: &str,
) -> bool {
    configuration
        .dimensions
        .iter()
        .filter(|dimension| dimension.id == axis)
        .any(|dimension| dimension.values.iter().any(|root| subtree_contains(root, value)))
}

fn subtree_contains(declaration: &ValueConfiguration, value: &str) -> bool {
    declaration.value == value
        || declaration
            .specializations
            .iter()
            .any(|specialization| subtree_contains(specialization, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_configuration_has_no_warnings() {
        let configuration = DimensionsConfiguration::from_toml_str(
            r#"
[[dimension]]
id = "language"
default = "en"

[[dimension.values]]
value = "en"

[[dimension]]
id = "market"
default = "eu"

[[dimension.values]]
value = "eu"
[dimension.values.constraints.language]
"*" = true
en = false
"#,
        )
        .unwrap();
        assert!(check_constraint_references(&configuration).is_empty());
    }

    #[test]
    fn undeclared_axis_in_constraint_is_flagged() {
        let configuration = DimensionsConfiguration::from_toml_str(
            r#"
[[dimension]]
id = "market"
default = "eu"

[[dimension.values]]
value = "eu"
[dimension.values.constraints.region]
"*" = false
"#,
        )
        .unwrap();
        let warnings = check_constraint_references(&configuration);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("undeclared dimension \"region\""));
    }

    #[test]
    fn unknown_value_in_constraint_is_flagged() {
        let configuration = DimensionsConfiguration::from_toml_str(
            r#"
[[dimension]]
id = "language"
default = "en"

[[dimension.values]]
value = "en"

[[dimension]]
id = "market"
default = "eu"

[[dimension.values]]
value = "eu"
[dimension.values.constraints.language]
fr = false
"#,
        )
        .unwrap();
        let warnings = check_constraint_references(&configuration);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unknown value \"fr\""));
    }

    #[test]
    fn nested_specialization_constraints_are_checked() {
        let configuration = DimensionsConfiguration::from_toml_str(
            r#"
[[dimension]]
id = "language"
default = "en"

[[dimension.values]]
value = "en"

[[dimension.values.specializations]]
value = "en-us"
[dimension.values.specializations.constraints.missing]
"*" = true
"#,
        )
        .unwrap();
        let warnings = check_constraint_references(&configuration);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"language\"/\"en-us\""));
    }

    #[test]
    fn wildcard_keys_are_never_flagged() {
        let configuration = DimensionsConfiguration::from_toml_str(
            r#"
[[dimension]]
id = "language"
default = "en"

[[dimension.values]]
value = "en"

[[dimension]]
id = "market"
default = "eu"

[[dimension.values]]
value = "eu"
[dimension.values.constraints.language]
"*" = false
"#,
        )
        .unwrap();
        assert!(check_constraint_references(&configuration).is_empty());
    }
}
