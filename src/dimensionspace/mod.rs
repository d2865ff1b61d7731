//! dimensionspace
//!
//! Dimension space points, point sets, weights, and the
//! inter-dimensional variation graph.
//!
//! # Modules
//!
//! - [`point`] - Coordinate tuples and their identity hashes
//! - [`point_set`] - Ordered, hash-deduplicated point sets
//! - [`weight`] - Per-axis depths and scalar normalization
//! - [`variation`] - The precomputed variation graph
//!
//! # Design Principles
//!
//! - Point identity is the coordinate hash, computed exactly once
//! - Variation edges are wired most-general-first so reads never see a
//!   partially built index
//! - Resolution returns absence; only asserted membership errors

pub mod point;
pub mod point_set;
pub mod variation;
pub mod weight;

pub use point::{DimensionSpacePoint, OriginDimensionSpacePoint, PointError};
pub use point_set::DimensionSpacePointSet;
pub use variation::{InterDimensionalVariationGraph, VariantType, VariationError};
pub use weight::{VariationWeight, WeightError, WeightedDimensionSpacePoint};
