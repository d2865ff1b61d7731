//! types
//!
//! Strong types for shared graph identifiers.
//!
//! # Types
//!
//! - [`ContentStreamId`] - Identifier of a forkable content stream
//! - [`NodeAggregateId`] - Identifier of a node aggregate across dimensions
//! - [`NodeRelationAnchor`] - Opaque handle relating node rows to hierarchy rows
//! - [`NodeTypeName`] - Fully qualified node type name
//! - [`NodeName`] - Edge name of a node below its parent
//! - [`ReferenceName`] - Name of a reference relation
//! - [`WorkspaceName`] - User-facing workspace identifier
//! - [`NodeAggregateClassification`] - regular / root / tethered
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use manifold::types::{ContentStreamId, NodeAggregateId};
//!
//! // Valid constructions
//! let stream = ContentStreamId::new("cs-identifier").unwrap();
//! let node = NodeAggregateId::new("lady-eleonode-rootford").unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(ContentStreamId::new("").is_err());
//! assert!(NodeAggregateId::new("No Spaces Allowed").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from identifier validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid content stream id: {0}")]
    InvalidContentStreamId(String),

    #[error("invalid node aggregate id: {0}")]
    InvalidNodeAggregateId(String),

    #[error("invalid node relation anchor: {0}")]
    InvalidNodeRelationAnchor(String),

    #[error("invalid node type name: {0}")]
    InvalidNodeTypeName(String),

    #[error("invalid node name: {0}")]
    InvalidNodeName(String),

    #[error("invalid reference name: {0}")]
    InvalidReferenceName(String),

    #[error("invalid workspace name: {0}")]
    InvalidWorkspaceName(String),
}

/// Check that a string consists of lowercase ASCII letters, digits, `-`
/// (and optionally `_`), within a length bound.
fn check_lower_identifier(
    value: &str,
    max_len: usize,
    allow_underscore: bool,
) -> Result<(), String> {
    if value.is_empty() {
        return Err("cannot be empty".into());
    }
    if value.len() > max_len {
        return Err(format!("cannot exceed {max_len} characters"));
    }
    for c in value.chars() {
        let ok = c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '-'
            || (allow_underscore && c == '_');
        if !ok {
            return Err(format!("cannot contain '{c}'"));
        }
    }
    Ok(())
}

/// Identifier of a content stream.
///
/// Content streams are created by fork/creation events and addressed by
/// these ids in hierarchy rows, restriction rows and the projection's
/// read model.
///
/// # Example
///
/// ```
/// use manifold::types::ContentStreamId;
///
/// let id = ContentStreamId::new("cs-identifier").unwrap();
/// assert_eq!(id.as_str(), "cs-identifier");
///
/// // Generated ids are valid by construction
/// let generated = ContentStreamId::random();
/// assert!(ContentStreamId::new(generated.as_str()).is_ok());
///
/// assert!(ContentStreamId::new("").is_err());
/// assert!(ContentStreamId::new("UpperCase").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentStreamId(String);

impl ContentStreamId {
    /// Create a new validated content stream id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidContentStreamId` if the id is empty,
    /// longer than 64 characters, or contains anything other than
    /// lowercase letters, digits and `-`.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        check_lower_identifier(&id, 64, false)
            .map_err(TypeError::InvalidContentStreamId)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id (UUID v4).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentStreamId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentStreamId> for String {
    fn from(id: ContentStreamId) -> Self {
        id.0
    }
}

impl AsRef<str> for ContentStreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentStreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a node aggregate.
///
/// A node aggregate groups the variants of one logical node across all
/// dimension space points; the id is stable across content streams.
///
/// # Example
///
/// ```
/// use manifold::types::NodeAggregateId;
///
/// let id = NodeAggregateId::new("nody-mc-nodeface").unwrap();
/// assert_eq!(id.as_str(), "nody-mc-nodeface");
///
/// assert!(NodeAggregateId::new("").is_err());
/// assert!(NodeAggregateId::new("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeAggregateId(String);

impl NodeAggregateId {
    /// Create a new validated node aggregate id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNodeAggregateId` if the id is empty,
    /// longer than 64 characters, or contains anything other than
    /// lowercase letters, digits, `-` and `_`.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        check_lower_identifier(&id, 64, true)
            .map_err(TypeError::InvalidNodeAggregateId)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id (UUID v4).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeAggregateId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeAggregateId> for String {
    fn from(id: NodeAggregateId) -> Self {
        id.0
    }
}

impl AsRef<str> for NodeAggregateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeAggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque anchor relating a node row to hierarchy and reference rows.
///
/// Anchors identify one materialized node row (one origin variant), not
/// the aggregate. Hierarchy rows store ordered lists of child anchors;
/// reference rows point from a source anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRelationAnchor(String);

impl NodeRelationAnchor {
    /// Create a new validated anchor.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNodeRelationAnchor` if the value is
    /// empty, longer than 64 characters, or contains anything other than
    /// lowercase letters, digits and `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        check_lower_identifier(&value, 64, false)
            .map_err(TypeError::InvalidNodeRelationAnchor)?;
        Ok(Self(value))
    }

    /// Generate a fresh random anchor (UUID v4).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the anchor as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeRelationAnchor {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeRelationAnchor> for String {
    fn from(anchor: NodeRelationAnchor) -> Self {
        anchor.0
    }
}

impl AsRef<str> for NodeRelationAnchor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeRelationAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified node type name, e.g. `acme.site:document`.
///
/// # Example
///
/// ```
/// use manifold::types::NodeTypeName;
///
/// let name = NodeTypeName::new("acme.site:document").unwrap();
/// assert_eq!(name.as_str(), "acme.site:document");
///
/// assert!(NodeTypeName::new("").is_err());
/// assert!(NodeTypeName::new("has whitespace").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeTypeName(String);

impl NodeTypeName {
    /// Create a new validated node type name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNodeTypeName` if the name is empty or
    /// contains whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidNodeTypeName("cannot be empty".into()));
        }
        for c in name.chars() {
            if c.is_whitespace() {
                return Err(TypeError::InvalidNodeTypeName(
                    "cannot contain whitespace".into(),
                ));
            }
            if c.is_ascii_control() {
                return Err(TypeError::InvalidNodeTypeName(
                    "cannot contain control characters".into(),
                ));
            }
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeTypeName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeTypeName> for String {
    fn from(name: NodeTypeName) -> Self {
        name.0
    }
}

impl AsRef<str> for NodeTypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge name of a node below its parent, e.g. `main` or `footer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeName(String);

impl NodeName {
    /// Create a new validated node name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNodeName` if the name is empty, longer
    /// than 255 characters, or contains anything other than lowercase
    /// letters, digits and `-`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_lower_identifier(&name, 255, false)
            .map_err(TypeError::InvalidNodeName)?;
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeName> for String {
    fn from(name: NodeName) -> Self {
        name.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a reference relation, e.g. `related-posts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceName(String);

impl ReferenceName {
    /// Create a new validated reference name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidReferenceName` if the name is empty or
    /// contains whitespace, `:` or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidReferenceName("cannot be empty".into()));
        }
        for c in name.chars() {
            if c.is_whitespace() || c == ':' {
                return Err(TypeError::InvalidReferenceName(format!(
                    "cannot contain '{c}'"
                )));
            }
            if c.is_ascii_control() {
                return Err(TypeError::InvalidReferenceName(
                    "cannot contain control characters".into(),
                ));
            }
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReferenceName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ReferenceName> for String {
    fn from(name: ReferenceName) -> Self {
        name.0
    }
}

impl AsRef<str> for ReferenceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-facing workspace identifier, e.g. `live` or `user-alice`.
///
/// # Example
///
/// ```
/// use manifold::types::WorkspaceName;
///
/// let ws = WorkspaceName::new("user-alice").unwrap();
/// assert_eq!(ws.as_str(), "user-alice");
///
/// assert!(WorkspaceName::new("").is_err());
/// assert!(WorkspaceName::new("this-name-is-way-too-long-for-a-workspace").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceName(String);

impl WorkspaceName {
    /// Create a new validated workspace name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidWorkspaceName` if the name is empty,
    /// longer than 30 characters, or contains anything other than
    /// lowercase letters, digits and `-`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_lower_identifier(&name, 30, false)
            .map_err(TypeError::InvalidWorkspaceName)?;
        Ok(Self(name))
    }

    /// The well-known live workspace.
    pub fn live() -> Self {
        Self("live".into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkspaceName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<WorkspaceName> for String {
    fn from(name: WorkspaceName) -> Self {
        name.0
    }
}

impl AsRef<str> for WorkspaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a node aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAggregateClassification {
    /// An ordinary node created by a user.
    Regular,
    /// A root node without a parent.
    Root,
    /// A node automatically created alongside its parent, addressable by name.
    Tethered,
}

impl NodeAggregateClassification {
    /// The wire value stored in node rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeAggregateClassification::Regular => "regular",
            NodeAggregateClassification::Root => "root",
            NodeAggregateClassification::Tethered => "tethered",
        }
    }
}

impl std::fmt::Display for NodeAggregateClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
