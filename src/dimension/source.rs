//! dimension::source
//!
//! Builds dimension axes from declarative configuration.
//!
//! # Architecture
//!
//! [`ContentDimensionSource`] walks each declared axis depth first,
//! assigning specialization depths from the nesting level and creating
//! one variation edge per nested value. Declaration order is preserved
//! twice over: values keep their order within an axis, and axes keep
//! their order across the source, which is the priority order used for
//! fallback resolution.
//!
//! # Example
//!
//! ```
//! use manifold::dimension::{ContentDimensionId, ContentDimensionSource};
//!
//! let source = ContentDimensionSource::from_toml_str(
//!     r#"
//! [[dimension]]
//! id = "language"
//! default = "en"
//!
//! [[dimension.values]]
//! value = "en"
//!
//! [[dimension.values.specializations]]
//! value = "en-us"
//! "#,
//! )
//! .unwrap();
//!
//! let language = ContentDimensionId::new("language").unwrap();
//! let axis = source.get_dimension(&language).unwrap();
//! assert_eq!(axis.get_value("en-us").unwrap().specialization_depth(), 1);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::dimension::config::{ConfigError, DimensionsConfiguration, ValueConfiguration};
use crate::dimension::dimension::ContentDimension;
use crate::dimension::value::{
    ContentDimensionConstraintSet, ContentDimensionConstraints, ContentDimensionId,
    ContentDimensionValue, ContentDimensionValueVariationEdge, DimensionError,
};

/// All configured dimension axes, ordered by priority.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDimensionSource {
    dimensions: Vec<ContentDimension>,
    index: BTreeMap<ContentDimensionId, usize>,
}

impl ContentDimensionSource {
    /// Build the source from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::DuplicateDimension` if an axis id
    /// appears twice, plus any per-axis validation error.
    pub fn from_configuration(
        configuration: &DimensionsConfiguration,
    ) -> Result<Self, DimensionError> {
        let mut dimensions = Vec::with_capacity(configuration.dimensions.len());
        let mut index = BTreeMap::new();

        for declaration in &configuration.dimensions {
            let id = ContentDimensionId::new(declaration.id.clone())?;
            if index.contains_key(&id) {
                return Err(DimensionError::DuplicateDimension(
                    id.as_str().to_string(),
                ));
            }

            let mut values = Vec::new();
            let mut edges = Vec::new();
            for value_declaration in &declaration.values {
                collect_values(value_declaration, 0, None, &mut values, &mut edges)?;
            }

            let dimension = ContentDimension::new(id.clone(), values, edges, &declaration.default)?;
            index.insert(id, dimensions.len());
            dimensions.push(dimension);
        }

        Ok(Self { dimensions, index })
    }

    /// Parse and build from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let configuration = DimensionsConfiguration::from_toml_str(text)?;
        Ok(Self::from_configuration(&configuration)?)
    }

    /// Load and build from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let configuration = DimensionsConfiguration::load(path)?;
        Ok(Self::from_configuration(&configuration)?)
    }

    /// A source without any dimensions, describing a zero-dimensional
    /// space with exactly one (empty) coordinate.
    pub fn empty() -> Self {
        Self {
            dimensions: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Look up one axis by id.
    pub fn get_dimension(&self, id: &ContentDimensionId) -> Option<&ContentDimension> {
        self.index.get(id).map(|position| &self.dimensions[*position])
    }

    /// All axes in priority order, the order they were declared in.
    pub fn dimensions_ordered_by_priority(&self) -> &[ContentDimension] {
        &self.dimensions
    }

    /// Whether no dimensions are configured.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Depth-first walk over one value declaration subtree.
fn collect_values(
    declaration: &ValueConfiguration,
    depth: u32,
    generalization: Option<&ContentDimensionValue>,
    values: &mut Vec<ContentDimensionValue>,
    edges: &mut Vec<ContentDimensionValueVariationEdge>,
) -> Result<(), DimensionError> {
    let value = ContentDimensionValue::new(
        declaration.value.clone(),
        depth,
        convert_constraints(&declaration.constraints)?,
        declaration.config.clone(),
    )?;

    if let Some(generalization) = generalization {
        edges.push(ContentDimensionValueVariationEdge::new(
            &value,
            generalization,
        )?);
    }

    values.push(value.clone());
    for specialization in &declaration.specializations {
        collect_values(specialization, depth + 1, Some(&value), values, edges)?;
    }
    Ok(())
}

/// Split the raw per-axis constraint maps into wildcard and overrides.
fn convert_constraints(
    raw: &BTreeMap<String, BTreeMap<String, bool>>,
) -> Result<ContentDimensionConstraintSet, DimensionError> {
    let mut set = BTreeMap::new();
    for (axis, entries) in raw {
        let axis_id = ContentDimensionId::new(axis.clone())?;
        let mut constraints = ContentDimensionConstraints::default();
        for (value, allowed) in entries {
            if value == "*" {
                constraints.wildcard_allowed = *allowed;
            } else {
                constraints
                    .identifier_restrictions
                    .insert(value.clone(), *allowed);
            }
        }
        set.insert(axis_id, constraints);
    }
    Ok(ContentDimensionConstraintSet::new(set))
}
