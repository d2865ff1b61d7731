//! dimensionspace::point_set
//!
//! An ordered set of dimension space points, deduplicated by hash.
//!
//! # Invariants
//!
//! - Each hash appears at most once; later inserts of the same point
//!   are ignored.
//! - Iteration yields points in insertion order.
//! - Equality is set equality, independent of insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dimensionspace::point::DimensionSpacePoint;

/// A set of [`DimensionSpacePoint`]s keyed by their identity hash.
///
/// # Example
///
/// ```
/// use manifold::dimensionspace::{DimensionSpacePoint, DimensionSpacePointSet};
///
/// let en = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
/// let de = DimensionSpacePoint::from_pairs([("language", "de")]).unwrap();
///
/// let set = DimensionSpacePointSet::from_points(vec![en.clone(), de.clone(), en.clone()]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&en));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<DimensionSpacePoint>", into = "Vec<DimensionSpacePoint>")]
pub struct DimensionSpacePointSet {
    points: Vec<DimensionSpacePoint>,
    index: BTreeMap<String, usize>,
}

impl DimensionSpacePointSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from points, keeping first occurrences in order.
    pub fn from_points(points: impl IntoIterator<Item = DimensionSpacePoint>) -> Self {
        let mut set = Self::empty();
        for point in points {
            set.insert(point);
        }
        set
    }

    /// Insert a point; duplicates by hash are ignored.
    pub fn insert(&mut self, point: DimensionSpacePoint) {
        if !self.index.contains_key(point.hash()) {
            self.index.insert(point.hash().to_string(), self.points.len());
            self.points.push(point);
        }
    }

    /// Whether the set contains a point with the same coordinates.
    pub fn contains(&self, point: &DimensionSpacePoint) -> bool {
        self.index.contains_key(point.hash())
    }

    /// Whether the set contains a point with the given hash.
    pub fn contains_hash(&self, hash: &str) -> bool {
        self.index.contains_key(hash)
    }

    /// Look up a point by its hash.
    pub fn get_by_hash(&self, hash: &str) -> Option<&DimensionSpacePoint> {
        self.index.get(hash).map(|position| &self.points[*position])
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[DimensionSpacePoint] {
        &self.points
    }

    /// All hashes in insertion order.
    pub fn point_hashes(&self) -> Vec<&str> {
        self.points.iter().map(DimensionSpacePoint::hash).collect()
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DimensionSpacePoint> {
        self.points.iter()
    }

    /// Points of `self` followed by points of `other` not already
    /// present.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_points(self.iter().chain(other.iter()).cloned())
    }

    /// Points of `self` also present in `other`, in `self`'s order.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::from_points(
            self.iter()
                .filter(|point| other.contains(point))
                .cloned(),
        )
    }

    /// Points of `self` absent from `other`, in `self`'s order.
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_points(
            self.iter()
                .filter(|point| !other.contains(point))
                .cloned(),
        )
    }
}

/// Set equality: same hashes, order ignored.
impl PartialEq for DimensionSpacePointSet {
    fn eq(&self, other: &Self) -> bool {
        self.points.len() == other.points.len()
            && self.index.keys().eq(other.index.keys())
    }
}

impl Eq for DimensionSpacePointSet {}

impl FromIterator<DimensionSpacePoint> for DimensionSpacePointSet {
    fn from_iter<I: IntoIterator<Item = DimensionSpacePoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a DimensionSpacePointSet {
    type Item = &'a DimensionSpacePoint;
    type IntoIter = std::slice::Iter<'a, DimensionSpacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<DimensionSpacePoint>> for DimensionSpacePointSet {
    fn from(points: Vec<DimensionSpacePoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<DimensionSpacePointSet> for Vec<DimensionSpacePoint> {
    fn from(set: DimensionSpacePointSet) -> Self {
        set.points
    }
}
