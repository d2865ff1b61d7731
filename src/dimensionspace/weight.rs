//! dimensionspace::weight
//!
//! Specialization weights of dimension space points.
//!
//! A weight records, per axis in priority order, how many
//! specialization steps the point's value is away from its root value.
//! Weights collapse to a scalar by positional notation: with base
//! `max(maximum depth) + 1`, the highest-priority axis takes the
//! highest power, so the scalar order is lexicographic in priority
//! order and injective as long as every component stays below the
//! base.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimension::ContentDimensionId;
use crate::dimensionspace::point::DimensionSpacePoint;

/// Errors from weight arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
    #[error("weights span different dimensions and cannot be compared")]
    Incomparable,

    #[error("cannot decrease depth {minuend} by {subtrahend} in dimension '{dimension}'")]
    Underflow {
        dimension: String,
        minuend: u32,
        subtrahend: u32,
    },
}

/// Per-axis specialization depths in priority order.
///
/// # Example
///
/// ```
/// use manifold::dimension::ContentDimensionId;
/// use manifold::dimensionspace::VariationWeight;
///
/// let language = ContentDimensionId::new("language").unwrap();
/// let market = ContentDimensionId::new("market").unwrap();
/// let weight = VariationWeight::new(vec![(language, 1), (market, 2)]);
///
/// // Positional notation: 1 * 3 + 2.
/// assert_eq!(weight.normalize(3), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationWeight {
    components: Vec<(ContentDimensionId, u32)>,
}

impl VariationWeight {
    /// Create a weight from per-axis depths in priority order.
    pub fn new(components: Vec<(ContentDimensionId, u32)>) -> Self {
        Self { components }
    }

    /// The weight of the single point of a zero-dimensional space.
    pub fn empty() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// All components in priority order.
    pub fn components(&self) -> &[(ContentDimensionId, u32)] {
        &self.components
    }

    /// The depth recorded for one axis.
    pub fn depth(&self, dimension: &ContentDimensionId) -> Option<u32> {
        self.components
            .iter()
            .find(|(id, _)| id == dimension)
            .map(|(_, depth)| *depth)
    }

    /// Weights are comparable when they span the same axes in the same
    /// order.
    pub fn can_be_compared_to(&self, other: &Self) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|((a, _), (b, _))| a == b)
    }

    /// Component-wise subtraction.
    ///
    /// # Errors
    ///
    /// Returns `WeightError::Incomparable` for weights over different
    /// axes and `WeightError::Underflow` if any component of `other`
    /// exceeds the matching component of `self`.
    pub fn decrease_by(&self, other: &Self) -> Result<Self, WeightError> {
        if !self.can_be_compared_to(other) {
            return Err(WeightError::Incomparable);
        }
        let mut components = Vec::with_capacity(self.components.len());
        for ((dimension, minuend), (_, subtrahend)) in
            self.components.iter().zip(other.components.iter())
        {
            let difference =
                minuend
                    .checked_sub(*subtrahend)
                    .ok_or_else(|| WeightError::Underflow {
                        dimension: dimension.as_str().to_string(),
                        minuend: *minuend,
                        subtrahend: *subtrahend,
                    })?;
            components.push((dimension.clone(), difference));
        }
        Ok(Self { components })
    }

    /// Collapse to a scalar by positional notation with the given base.
    ///
    /// The first (highest-priority) component takes the highest power.
    /// Injective while every component is below the base.
    pub fn normalize(&self, base: u64) -> u64 {
        self.components
            .iter()
            .fold(0, |total, (_, depth)| total * base + u64::from(*depth))
    }
}

/// A dimension space point paired with its specialization weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedDimensionSpacePoint {
    dimension_space_point: DimensionSpacePoint,
    weight: VariationWeight,
}

impl WeightedDimensionSpacePoint {
    /// Pair a point with its weight.
    pub fn new(dimension_space_point: DimensionSpacePoint, weight: VariationWeight) -> Self {
        Self {
            dimension_space_point,
            weight,
        }
    }

    /// The coordinate tuple.
    pub fn dimension_space_point(&self) -> &DimensionSpacePoint {
        &self.dimension_space_point
    }

    /// The per-axis depths.
    pub fn weight(&self) -> &VariationWeight {
        &self.weight
    }

    /// The point's identity hash.
    pub fn identifier(&self) -> &str {
        self.dimension_space_point.hash()
    }
}
