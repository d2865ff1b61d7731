//! dimensionspace::variation
//!
//! The inter-dimensional variation graph over the allowed subspace.
//!
//! # Architecture
//!
//! Construction happens in three passes:
//!
//! 1. The allowed subspace is built as the constrained Cartesian
//!    product of per-axis values; a combination survives only if every
//!    pair of values allows each other.
//! 2. Every point gets a weight (per-axis depths) and its scalar
//!    normalization.
//! 3. Variation edges are wired by walking points most-general-first
//!    (ascending scalar weight). Stepping one axis down one depth
//!    level yields a direct specialization; transitive links are
//!    copied from the generalization's already-complete index.
//!
//! The weight ordering in pass 3 is what makes the indexes complete:
//! every generalization of a point has a strictly smaller scalar
//! weight, so it has been fully wired before the point is reached.
//!
//! # Invariants
//!
//! - All indexed points lie within the allowed subspace.
//! - Weighted maps are injective: distinct generalizations of a point
//!   have distinct weight differences.
//! - A zero-dimensional source yields exactly one (empty) point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimension::ContentDimensionSource;
use crate::dimensionspace::point::DimensionSpacePoint;
use crate::dimensionspace::point_set::DimensionSpacePointSet;
use crate::dimensionspace::weight::{VariationWeight, WeightedDimensionSpacePoint};

/// Errors from variation graph queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariationError {
    #[error("dimension space point {0} is not within the allowed dimension subspace")]
    PointNotFound(String),
}

/// How one dimension space point relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantType {
    /// Equal coordinates.
    Same,
    /// The subject is reachable from the object by specialization steps.
    Specialization,
    /// The subject is reachable from the object by generalization steps.
    Generalization,
    /// Neither point is reachable from the other.
    Peer,
}

impl VariantType {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::Same => "same",
            VariantType::Specialization => "specialization",
            VariantType::Generalization => "generalization",
            VariantType::Peer => "peer",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Precomputed variation structure of the allowed dimension subspace.
///
/// # Example
///
/// ```
/// use manifold::dimension::ContentDimensionSource;
/// use manifold::dimensionspace::{DimensionSpacePoint, InterDimensionalVariationGraph, VariantType};
///
/// let source = ContentDimensionSource::from_toml_str(
///     r#"
/// [[dimension]]
/// id = "language"
/// default = "en"
///
/// [[dimension.values]]
/// value = "en"
///
/// [[dimension.values.specializations]]
/// value = "en-us"
/// "#,
/// )
/// .unwrap();
/// let graph = InterDimensionalVariationGraph::new(source);
///
/// let en = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
/// let en_us = DimensionSpacePoint::from_pairs([("language", "en-us")]).unwrap();
///
/// assert_eq!(graph.variant_type(&en_us, &en), VariantType::Specialization);
/// assert_eq!(graph.primary_generalization(&en_us), Some(&en));
/// ```
#[derive(Debug, Clone)]
pub struct InterDimensionalVariationGraph {
    source: ContentDimensionSource,
    subspace: DimensionSpacePointSet,
    weighted_points: Vec<WeightedDimensionSpacePoint>,
    weight_index: BTreeMap<String, usize>,
    normalized_weights: BTreeMap<String, u64>,
    normalization_base: u64,
    indexed_specializations: BTreeMap<String, DimensionSpacePointSet>,
    indexed_generalizations: BTreeMap<String, DimensionSpacePointSet>,
    weighted_specializations: BTreeMap<String, BTreeMap<u64, DimensionSpacePointSet>>,
    weighted_generalizations: BTreeMap<String, BTreeMap<u64, DimensionSpacePoint>>,
}

impl InterDimensionalVariationGraph {
    /// Build the full variation structure for a dimension source.
    pub fn new(source: ContentDimensionSource) -> Self {
        let normalization_base = source
            .dimensions_ordered_by_priority()
            .iter()
            .map(|dimension| u64::from(dimension.maximum_depth()) + 1)
            .max()
            .unwrap_or(0);

        let weighted_points = build_weighted_points(&source);

        let mut subspace = DimensionSpacePointSet::empty();
        let mut weight_index = BTreeMap::new();
        let mut normalized_weights = BTreeMap::new();
        for (position, weighted) in weighted_points.iter().enumerate() {
            subspace.insert(weighted.dimension_space_point().clone());
            weight_index.insert(weighted.identifier().to_string(), position);
            normalized_weights.insert(
                weighted.identifier().to_string(),
                weighted.weight().normalize(normalization_base),
            );
        }

        let mut graph = Self {
            source,
            subspace,
            weighted_points,
            weight_index,
            normalized_weights,
            normalization_base,
            indexed_specializations: BTreeMap::new(),
            indexed_generalizations: BTreeMap::new(),
            weighted_specializations: BTreeMap::new(),
            weighted_generalizations: BTreeMap::new(),
        };
        graph.wire_variations();
        graph
    }

    /// Wire direct and transitive variation edges, most general first.
    fn wire_variations(&mut self) {
        let mut processing_order: Vec<(u64, DimensionSpacePoint)> = self
            .weighted_points
            .iter()
            .map(|weighted| {
                (
                    weighted.weight().normalize(self.normalization_base),
                    weighted.dimension_space_point().clone(),
                )
            })
            .collect();
        processing_order.sort_by(|(weight_a, point_a), (weight_b, point_b)| {
            weight_a
                .cmp(weight_b)
                .then_with(|| point_a.hash().cmp(point_b.hash()))
        });

        for (generalization_weight, generalization) in &processing_order {
            for dimension in self.source.dimensions_ordered_by_priority() {
                let Some(current_value) = generalization
                    .coordinate(dimension.id())
                    .and_then(|value| dimension.get_value(value))
                else {
                    continue;
                };

                for specialized_value in dimension.specializations(current_value) {
                    let mut coordinates = generalization.coordinates().clone();
                    coordinates
                        .insert(dimension.id().clone(), specialized_value.value().to_string());
                    let specialization = DimensionSpacePoint::from_validated(coordinates);

                    // Also the subspace membership check.
                    let Some(specialization_weight) =
                        self.normalized_weights.get(specialization.hash()).copied()
                    else {
                        continue;
                    };

                    // The direct generalization plus everything above it.
                    let mut ancestors =
                        vec![(*generalization_weight, generalization.clone())];
                    if let Some(transitive) =
                        self.indexed_generalizations.get(generalization.hash())
                    {
                        for ancestor in transitive {
                            if let Some(ancestor_weight) =
                                self.normalized_weights.get(ancestor.hash()).copied()
                            {
                                ancestors.push((ancestor_weight, ancestor.clone()));
                            }
                        }
                    }

                    for (ancestor_weight, ancestor) in ancestors {
                        let weight_difference =
                            specialization_weight.abs_diff(ancestor_weight);

                        self.indexed_generalizations
                            .entry(specialization.hash().to_string())
                            .or_default()
                            .insert(ancestor.clone());
                        self.weighted_generalizations
                            .entry(specialization.hash().to_string())
                            .or_default()
                            .insert(weight_difference, ancestor.clone());

                        self.indexed_specializations
                            .entry(ancestor.hash().to_string())
                            .or_default()
                            .insert(specialization.clone());
                        self.weighted_specializations
                            .entry(ancestor.hash().to_string())
                            .or_default()
                            .entry(weight_difference)
                            .or_default()
                            .insert(specialization.clone());
                    }
                }
            }
        }
    }

    /// The dimension source the graph was built from.
    pub fn source(&self) -> &ContentDimensionSource {
        &self.source
    }

    /// The allowed dimension subspace.
    pub fn dimension_space_points(&self) -> &DimensionSpacePointSet {
        &self.subspace
    }

    /// All allowed points with their weights, in subspace order.
    pub fn weighted_dimension_space_points(&self) -> &[WeightedDimensionSpacePoint] {
        &self.weighted_points
    }

    /// The weighted form of one point, if it is allowed.
    pub fn weighted_dimension_space_point(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&WeightedDimensionSpacePoint> {
        self.weight_index
            .get(point.hash())
            .map(|position| &self.weighted_points[*position])
    }

    /// Resolve a hash back to its interned point.
    pub fn point_by_hash(&self, hash: &str) -> Option<&DimensionSpacePoint> {
        self.subspace.get_by_hash(hash)
    }

    /// The positional-notation base, `max(maximum depth) + 1`.
    pub fn weight_normalization_base(&self) -> u64 {
        self.normalization_base
    }

    /// All transitive specializations of a point, excluding the point.
    pub fn indexed_specializations(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&DimensionSpacePointSet> {
        self.indexed_specializations.get(point.hash())
    }

    /// All transitive generalizations of a point, excluding the point.
    pub fn indexed_generalizations(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&DimensionSpacePointSet> {
        self.indexed_generalizations.get(point.hash())
    }

    /// Specializations keyed by their relative scalar weight.
    pub fn weighted_specializations(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&BTreeMap<u64, DimensionSpacePointSet>> {
        self.weighted_specializations.get(point.hash())
    }

    /// Generalizations keyed by their relative scalar weight.
    ///
    /// The map is injective: each weight difference identifies exactly
    /// one generalization.
    pub fn weighted_generalizations(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&BTreeMap<u64, DimensionSpacePoint>> {
        self.weighted_generalizations.get(point.hash())
    }

    /// The transitive specializations of `origin`, optionally with the
    /// origin itself, minus an excluded set.
    ///
    /// # Errors
    ///
    /// Returns `VariationError::PointNotFound` if `origin` lies outside
    /// the allowed subspace. This is the one resolution operation that
    /// errors rather than returning absence, because the caller asserts
    /// membership.
    pub fn specialization_set(
        &self,
        origin: &DimensionSpacePoint,
        include_origin: bool,
        excluded: Option<&DimensionSpacePointSet>,
    ) -> Result<DimensionSpacePointSet, VariationError> {
        if !self.subspace.contains(origin) {
            return Err(VariationError::PointNotFound(origin.to_json()));
        }

        let mut result = DimensionSpacePointSet::empty();
        if include_origin {
            result.insert(origin.clone());
        }
        if let Some(specializations) = self.indexed_specializations.get(origin.hash()) {
            for specialization in specializations {
                let is_excluded = excluded.is_some_and(|set| set.contains(specialization));
                if !is_excluded {
                    result.insert(specialization.clone());
                }
            }
        }
        Ok(result)
    }

    /// The nearest generalization: the one with the lowest relative
    /// weight, stepping the lowest-priority axis up first.
    pub fn primary_generalization(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&DimensionSpacePoint> {
        self.weighted_generalizations
            .get(point.hash())
            .and_then(|generalizations| generalizations.first_key_value())
            .map(|(_, generalization)| generalization)
    }

    /// All allowed points without any generalization, in subspace
    /// order.
    pub fn root_generalizations(&self) -> Vec<&DimensionSpacePoint> {
        self.weighted_points
            .iter()
            .filter(|weighted| {
                !self
                    .indexed_generalizations
                    .get(weighted.identifier())
                    .is_some_and(|generalizations| !generalizations.is_empty())
            })
            .map(WeightedDimensionSpacePoint::dimension_space_point)
            .collect()
    }

    /// Classify `subject` relative to `object`.
    ///
    /// Points outside the allowed subspace compare as peers unless
    /// their coordinates are equal.
    pub fn variant_type(
        &self,
        subject: &DimensionSpacePoint,
        object: &DimensionSpacePoint,
    ) -> VariantType {
        if subject == object {
            return VariantType::Same;
        }
        if self
            .indexed_specializations
            .get(object.hash())
            .is_some_and(|specializations| specializations.contains(subject))
        {
            return VariantType::Specialization;
        }
        if self
            .indexed_generalizations
            .get(object.hash())
            .is_some_and(|generalizations| generalizations.contains(subject))
        {
            return VariantType::Generalization;
        }
        VariantType::Peer
    }
}

/// The constrained Cartesian product of per-axis values, value-major
/// per axis so the subspace order is deterministic.
fn build_weighted_points(source: &ContentDimensionSource) -> Vec<WeightedDimensionSpacePoint> {
    let mut combinations: Vec<Vec<(usize, usize)>> = vec![Vec::new()];
    let dimensions = source.dimensions_ordered_by_priority();

    for (dimension_position, dimension) in dimensions.iter().enumerate() {
        let mut extended = Vec::new();
        for (value_position, value) in dimension.values().iter().enumerate() {
            for combination in &combinations {
                let allowed = combination.iter().all(|(other_dimension, other_value)| {
                    let other_dimension = &dimensions[*other_dimension];
                    let other_value = &other_dimension.values()[*other_value];
                    value.can_be_combined_with(other_dimension.id(), other_value.value())
                        && other_value.can_be_combined_with(dimension.id(), value.value())
                });
                if allowed {
                    let mut next = combination.clone();
                    next.push((dimension_position, value_position));
                    extended.push(next);
                }
            }
        }
        combinations = extended;
    }

    combinations
        .into_iter()
        .map(|combination| {
            let mut coordinates = BTreeMap::new();
            let mut depths = Vec::with_capacity(combination.len());
            for (dimension_position, value_position) in combination {
                let dimension = &dimensions[dimension_position];
                let value = &dimension.values()[value_position];
                coordinates.insert(dimension.id().clone(), value.value().to_string());
                depths.push((dimension.id().clone(), value.specialization_depth()));
            }
            WeightedDimensionSpacePoint::new(
                DimensionSpacePoint::from_validated(coordinates),
                VariationWeight::new(depths),
            )
        })
        .collect()
}
