//! dimension::value
//!
//! Values of a single content dimension and their combination constraints.
//!
//! # Types
//!
//! - [`ContentDimensionId`] - Validated axis identifier
//! - [`ContentDimensionValue`] - One value with its specialization depth
//! - [`ContentDimensionConstraints`] - Combination rules against one other axis
//! - [`ContentDimensionConstraintSet`] - Combination rules against all other axes
//! - [`ContentDimensionValueVariationEdge`] - Directed specialization edge
//!
//! # Invariants
//!
//! - A variation edge always connects a value to a generalization exactly
//!   one depth level above it.
//! - An explicit identifier restriction wins over the wildcard default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from dimension model validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("invalid dimension id: {0}")]
    InvalidDimensionId(String),

    #[error("invalid dimension value: {0}")]
    InvalidValue(String),

    #[error("dimension '{0}' has no values")]
    ValuesAreMissing(String),

    #[error("dimension '{0}' has no default value")]
    DefaultValueIsMissing(String),

    #[error("dimension '{dimension}' declares default value '{value}' which is not configured")]
    DefaultValueIsUnknown { dimension: String, value: String },

    #[error("dimension '{dimension}' declares value '{value}' more than once")]
    DuplicateValue { dimension: String, value: String },

    #[error("dimension '{0}' is declared more than once")]
    DuplicateDimension(String),

    #[error("variation edge connects '{specialization}' (depth {specialization_depth}) to '{generalization}' (depth {generalization_depth}), expected a depth difference of one")]
    InvalidVariationEdge {
        specialization: String,
        specialization_depth: u32,
        generalization: String,
        generalization_depth: u32,
    },

    #[error("variation edge references unknown value '{0}'")]
    EdgeValueIsUnknown(String),

    #[error("value '{0}' has more than one generalization")]
    MultipleGeneralizations(String),
}

/// Validated identifier of a content dimension axis, e.g. `language`.
///
/// # Example
///
/// ```
/// use manifold::dimension::ContentDimensionId;
///
/// let id = ContentDimensionId::new("language").unwrap();
/// assert_eq!(id.as_str(), "language");
///
/// assert!(ContentDimensionId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDimensionId(String);

impl ContentDimensionId {
    /// Create a new validated dimension id.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::InvalidDimensionId` if the id is empty or
    /// contains control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, DimensionError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DimensionError::InvalidDimensionId(
                "cannot be empty".into(),
            ));
        }
        if id.chars().any(|c| c.is_ascii_control()) {
            return Err(DimensionError::InvalidDimensionId(
                "cannot contain control characters".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentDimensionId {
    type Error = DimensionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentDimensionId> for String {
    fn from(id: ContentDimensionId) -> Self {
        id.0
    }
}

impl AsRef<str> for ContentDimensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Combination constraints of one dimension value against one other axis.
///
/// The literal `"*"` key of the configuration sets [`wildcard_allowed`];
/// all other keys become identifier-specific entries. An explicit entry
/// always wins over the wildcard default.
///
/// [`wildcard_allowed`]: ContentDimensionConstraints::wildcard_allowed
///
/// # Example
///
/// ```
/// use manifold::dimension::ContentDimensionConstraints;
///
/// let mut constraints = ContentDimensionConstraints::default();
/// assert!(constraints.allows_combination_with("anything"));
///
/// constraints.identifier_restrictions.insert("fr".into(), false);
/// assert!(!constraints.allows_combination_with("fr"));
/// assert!(constraints.allows_combination_with("de"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimensionConstraints {
    /// Whether values without an explicit entry may be combined.
    pub wildcard_allowed: bool,
    /// Per-value overrides of the wildcard default.
    pub identifier_restrictions: BTreeMap<String, bool>,
}

impl ContentDimensionConstraints {
    /// Create constraints with an explicit wildcard flag and overrides.
    pub fn new(wildcard_allowed: bool, identifier_restrictions: BTreeMap<String, bool>) -> Self {
        Self {
            wildcard_allowed,
            identifier_restrictions,
        }
    }

    /// Whether the given value of the other axis may be combined.
    pub fn allows_combination_with(&self, value: &str) -> bool {
        match self.identifier_restrictions.get(value) {
            Some(allowed) => *allowed,
            None => self.wildcard_allowed,
        }
    }
}

impl Default for ContentDimensionConstraints {
    /// Everything is combinable unless restricted.
    fn default() -> Self {
        Self {
            wildcard_allowed: true,
            identifier_restrictions: BTreeMap::new(),
        }
    }
}

/// Combination constraints of one dimension value against all other axes.
///
/// Axes without an entry impose no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentDimensionConstraintSet(
    BTreeMap<ContentDimensionId, ContentDimensionConstraints>,
);

impl ContentDimensionConstraintSet {
    /// Create a constraint set from per-axis constraints.
    pub fn new(constraints: BTreeMap<ContentDimensionId, ContentDimensionConstraints>) -> Self {
        Self(constraints)
    }

    /// Get the constraints against one other axis, if any are declared.
    pub fn get(&self, dimension_id: &ContentDimensionId) -> Option<&ContentDimensionConstraints> {
        self.0.get(dimension_id)
    }

    /// Whether the given value of the given other axis may be combined.
    ///
    /// Axes without declared constraints allow everything.
    pub fn allows_combination_with(&self, dimension_id: &ContentDimensionId, value: &str) -> bool {
        match self.0.get(dimension_id) {
            Some(constraints) => constraints.allows_combination_with(value),
            None => true,
        }
    }

    /// Whether any constraints are declared at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One value of a content dimension.
///
/// Depth 0 is the most general (root) level; each specialization step
/// increases the depth by one. The passthrough `config` carries
/// presentational configuration (labels and the like) verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDimensionValue {
    value: String,
    specialization_depth: u32,
    #[serde(default)]
    constraints: ContentDimensionConstraintSet,
    #[serde(default)]
    config: serde_json::Map<String, serde_json::Value>,
}

impl ContentDimensionValue {
    /// Create a new dimension value.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::InvalidValue` if the value string is empty.
    pub fn new(
        value: impl Into<String>,
        specialization_depth: u32,
        constraints: ContentDimensionConstraintSet,
        config: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DimensionError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DimensionError::InvalidValue("cannot be empty".into()));
        }
        Ok(Self {
            value,
            specialization_depth,
            constraints,
            config,
        })
    }

    /// Shorthand for a value without constraints or passthrough config.
    pub fn plain(value: impl Into<String>, specialization_depth: u32) -> Result<Self, DimensionError> {
        Self::new(
            value,
            specialization_depth,
            ContentDimensionConstraintSet::default(),
            serde_json::Map::new(),
        )
    }

    /// The value string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Distance from the root of the value tree.
    pub fn specialization_depth(&self) -> u32 {
        self.specialization_depth
    }

    /// Combination constraints against other axes.
    pub fn constraints(&self) -> &ContentDimensionConstraintSet {
        &self.constraints
    }

    /// Passthrough configuration.
    pub fn config(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.config
    }

    /// Whether this value may be combined with a value of another axis.
    pub fn can_be_combined_with(&self, dimension_id: &ContentDimensionId, value: &str) -> bool {
        self.constraints.allows_combination_with(dimension_id, value)
    }
}

impl std::fmt::Display for ContentDimensionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A directed variation edge from a specialization to its generalization.
///
/// Valid edges always span exactly one depth level; this is checked at
/// construction so the per-axis value tree cannot contain skips or
/// cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimensionValueVariationEdge {
    specialization: String,
    generalization: String,
}

impl ContentDimensionValueVariationEdge {
    /// Create an edge between two values of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::InvalidVariationEdge` if the
    /// specialization is not exactly one depth level below the
    /// generalization.
    pub fn new(
        specialization: &ContentDimensionValue,
        generalization: &ContentDimensionValue,
    ) -> Result<Self, DimensionError> {
        if specialization.specialization_depth() != generalization.specialization_depth() + 1 {
            return Err(DimensionError::InvalidVariationEdge {
                specialization: specialization.value().to_string(),
                specialization_depth: specialization.specialization_depth(),
                generalization: generalization.value().to_string(),
                generalization_depth: generalization.specialization_depth(),
            });
        }
        Ok(Self {
            specialization: specialization.value().to_string(),
            generalization: generalization.value().to_string(),
        })
    }

    /// The more specific endpoint.
    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    /// The more general endpoint.
    pub fn generalization(&self) -> &str {
        &self.generalization
    }
}
