//! dimension
//!
//! Content dimension axes: values, constraints, and configuration.
//!
//! # Modules
//!
//! - [`value`] - Dimension values, combination constraints, variation edges
//! - [`dimension`] - A single validated axis with navigation helpers
//! - [`config`] - Declarative TOML/serde configuration model
//! - [`source`] - Builds ordered axes from configuration
//!
//! # Design Principles
//!
//! - Declaration order is semantic: it is the priority order
//! - Validation happens once, at construction; axes are immutable after
//! - Depth is derived from nesting, never declared

pub mod config;
#[allow(clippy::module_inception)]
pub mod dimension;
pub mod source;
pub mod value;

pub use config::{ConfigError, DimensionConfiguration, DimensionsConfiguration, ValueConfiguration};
pub use dimension::ContentDimension;
pub use source::ContentDimensionSource;
pub use value::{
    ContentDimensionConstraintSet, ContentDimensionConstraints, ContentDimensionId,
    ContentDimensionValue, ContentDimensionValueVariationEdge, DimensionError,
};
