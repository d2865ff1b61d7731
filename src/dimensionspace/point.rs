//! dimensionspace::point
//!
//! Coordinates in the dimension space.
//!
//! # Architecture
//!
//! A [`DimensionSpacePoint`] is an immutable coordinate tuple with one
//! value per axis. Its hash is computed once at construction from the
//! sorted coordinates, so two points with equal coordinates always
//! carry equal hashes and the hash can serve as a map key anywhere a
//! point identity is needed.
//!
//! [`OriginDimensionSpacePoint`] is the same shape with a distinct
//! type, marking the coordinate where content was originally created
//! rather than where it is merely visible. Conversions in both
//! directions preserve the hash.
//!
//! # Invariants
//!
//! - Coordinate values are non-empty strings.
//! - The hash is injective over coordinate maps.
//! - Serialization carries only the coordinates; the hash is derived.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::dimension::{ContentDimensionId, DimensionError};

/// Number of hex characters kept from the coordinate digest.
const HASH_LENGTH: usize = 32;

/// Errors from constructing dimension space points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointError {
    #[error("coordinate value for dimension '{0}' cannot be empty")]
    EmptyValue(String),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// A coordinate tuple in the dimension space, e.g.
/// `{language: "en", market: "eu"}`.
///
/// # Example
///
/// ```
/// use manifold::dimensionspace::DimensionSpacePoint;
///
/// let a = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
/// let b = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.hash(), b.hash());
///
/// let c = DimensionSpacePoint::from_pairs([("language", "de")]).unwrap();
/// assert_ne!(a.hash(), c.hash());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct DimensionSpacePoint {
    coordinates: BTreeMap<ContentDimensionId, String>,
    hash: String,
}

impl DimensionSpacePoint {
    /// Create a point from validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns `PointError::EmptyValue` if any coordinate value is the
    /// empty string.
    pub fn from_coordinates(
        coordinates: BTreeMap<ContentDimensionId, String>,
    ) -> Result<Self, PointError> {
        for (dimension, value) in &coordinates {
            if value.is_empty() {
                return Err(PointError::EmptyValue(dimension.as_str().to_string()));
            }
        }
        Ok(Self::from_validated(coordinates))
    }

    /// Create a point from raw `(dimension, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension id is invalid or a value is
    /// empty.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PointError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut coordinates = BTreeMap::new();
        for (dimension, value) in pairs {
            coordinates.insert(ContentDimensionId::new(dimension)?, value.into());
        }
        Self::from_coordinates(coordinates)
    }

    /// The single point of a zero-dimensional space.
    pub fn without_dimensions() -> Self {
        Self::from_validated(BTreeMap::new())
    }

    /// Coordinates are known non-empty; used by builders that only ever
    /// insert configured dimension values.
    pub(crate) fn from_validated(coordinates: BTreeMap<ContentDimensionId, String>) -> Self {
        let hash = hash_coordinates(&coordinates);
        Self { coordinates, hash }
    }

    /// All coordinates, sorted by dimension id.
    pub fn coordinates(&self) -> &BTreeMap<ContentDimensionId, String> {
        &self.coordinates
    }

    /// The value of one axis, if present.
    pub fn coordinate(&self, dimension: &ContentDimensionId) -> Option<&str> {
        self.coordinates.get(dimension).map(String::as_str)
    }

    /// The derived identity hash, 32 lowercase hex characters.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// A copy of this point with one coordinate replaced.
    ///
    /// # Errors
    ///
    /// Returns `PointError::EmptyValue` if the new value is empty.
    pub fn vary(
        &self,
        dimension: &ContentDimensionId,
        value: impl Into<String>,
    ) -> Result<Self, PointError> {
        let mut coordinates = self.coordinates.clone();
        coordinates.insert(dimension.clone(), value.into());
        Self::from_coordinates(coordinates)
    }

    /// Canonical JSON rendering of the coordinates, keys sorted.
    pub fn to_json(&self) -> String {
        // BTreeMap keys serialize in sorted order and string values
        // cannot fail to serialize.
        serde_json::to_string(&self.coordinates).unwrap_or_else(|_| "{}".to_string())
    }
}

impl std::fmt::Display for DimensionSpacePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl TryFrom<BTreeMap<String, String>> for DimensionSpacePoint {
    type Error = PointError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_pairs(raw)
    }
}

impl From<DimensionSpacePoint> for BTreeMap<String, String> {
    fn from(point: DimensionSpacePoint) -> Self {
        point
            .coordinates
            .into_iter()
            .map(|(dimension, value)| (dimension.as_str().to_string(), value))
            .collect()
    }
}

/// The coordinate where content was originally created.
///
/// Structurally identical to [`DimensionSpacePoint`] but kept as a
/// distinct type so visibility coordinates and origin coordinates
/// cannot be mixed up in signatures. The hash is shared with the
/// underlying point.
///
/// # Example
///
/// ```
/// use manifold::dimensionspace::{DimensionSpacePoint, OriginDimensionSpacePoint};
///
/// let point = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
/// let origin = OriginDimensionSpacePoint::from_dimension_space_point(point.clone());
/// assert_eq!(origin.hash(), point.hash());
/// assert_eq!(origin.to_dimension_space_point(), point);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginDimensionSpacePoint(DimensionSpacePoint);

impl OriginDimensionSpacePoint {
    /// Create an origin from validated coordinates.
    pub fn from_coordinates(
        coordinates: BTreeMap<ContentDimensionId, String>,
    ) -> Result<Self, PointError> {
        Ok(Self(DimensionSpacePoint::from_coordinates(coordinates)?))
    }

    /// Create an origin from raw `(dimension, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PointError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Self(DimensionSpacePoint::from_pairs(pairs)?))
    }

    /// The single origin of a zero-dimensional space.
    pub fn without_dimensions() -> Self {
        Self(DimensionSpacePoint::without_dimensions())
    }

    /// Reinterpret a visibility coordinate as an origin.
    pub fn from_dimension_space_point(point: DimensionSpacePoint) -> Self {
        Self(point)
    }

    /// The underlying visibility coordinate, cloned.
    pub fn to_dimension_space_point(&self) -> DimensionSpacePoint {
        self.0.clone()
    }

    /// The underlying visibility coordinate, borrowed.
    pub fn as_dimension_space_point(&self) -> &DimensionSpacePoint {
        &self.0
    }

    /// All coordinates, sorted by dimension id.
    pub fn coordinates(&self) -> &BTreeMap<ContentDimensionId, String> {
        self.0.coordinates()
    }

    /// The derived identity hash, equal to the underlying point's hash.
    pub fn hash(&self) -> &str {
        self.0.hash()
    }

    /// Canonical JSON rendering of the coordinates.
    pub fn to_json(&self) -> String {
        self.0.to_json()
    }
}

impl std::fmt::Display for OriginDimensionSpacePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OriginDimensionSpacePoint> for DimensionSpacePoint {
    fn from(origin: OriginDimensionSpacePoint) -> Self {
        origin.0
    }
}

/// Digest the sorted coordinates into a fixed-length identity hash.
///
/// Key and value are separated by a NUL byte and pairs by a newline so
/// that adjacent pairs cannot collide.
fn hash_coordinates(coordinates: &BTreeMap<ContentDimensionId, String>) -> String {
    let mut hasher = Sha256::new();
    for (dimension, value) in coordinates {
        hasher.update(dimension.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(value.as_bytes());
        hasher.update(b"\n");
    }
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(HASH_LENGTH);
    digest
}
