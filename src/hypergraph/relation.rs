//! hypergraph::relation
//!
//! Hyperrelation value types.
//!
//! A hierarchy hyperrelation encodes one ordered sibling set: all
//! children of one parent, in one content stream, in one dimension
//! coordinate. The sibling slicing the SQL layer performs with
//! `unnest ... WITH ORDINALITY` exists here as pure in-memory
//! operations so the contract is testable without a database.
//!
//! # Invariants
//!
//! - Child anchors are ordered and contain no duplicates.
//! - Preceding siblings are returned nearest first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ContentStreamId, NodeAggregateId, NodeRelationAnchor, ReferenceName};

/// Errors from relation construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelationError {
    #[error("hierarchy hyperrelation lists child anchor '{0}' more than once")]
    DuplicateChildAnchor(String),
}

/// One ordered sibling set under a parent anchor.
///
/// # Example
///
/// ```
/// use manifold::hypergraph::HierarchyHyperrelation;
/// use manifold::types::{ContentStreamId, NodeRelationAnchor};
///
/// let anchor = |s: &str| NodeRelationAnchor::new(s).unwrap();
/// let relation = HierarchyHyperrelation::new(
///     ContentStreamId::new("cs-main").unwrap(),
///     "0f81bd8bbb0e2f48ac58a0ceca5ca97d",
///     anchor("parent"),
///     vec![anchor("a"), anchor("b"), anchor("c")],
/// )
/// .unwrap();
///
/// let preceding = relation.preceding_siblings(&anchor("c")).unwrap();
/// assert_eq!(preceding, vec![&anchor("b"), &anchor("a")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyHyperrelation {
    content_stream_id: ContentStreamId,
    dimension_space_point_hash: String,
    parent_node_anchor: NodeRelationAnchor,
    child_node_anchors: Vec<NodeRelationAnchor>,
}

impl HierarchyHyperrelation {
    /// Create a sibling set, rejecting duplicate anchors.
    pub fn new(
        content_stream_id: ContentStreamId,
        dimension_space_point_hash: impl Into<String>,
        parent_node_anchor: NodeRelationAnchor,
        child_node_anchors: Vec<NodeRelationAnchor>,
    ) -> Result<Self, RelationError> {
        let mut seen = BTreeSet::new();
        for anchor in &child_node_anchors {
            if !seen.insert(anchor) {
                return Err(RelationError::DuplicateChildAnchor(
                    anchor.as_str().to_string(),
                ));
            }
        }
        Ok(Self {
            content_stream_id,
            dimension_space_point_hash: dimension_space_point_hash.into(),
            parent_node_anchor,
            child_node_anchors,
        })
    }

    /// The stream this sibling set lives in.
    pub fn content_stream_id(&self) -> &ContentStreamId {
        &self.content_stream_id
    }

    /// The coordinate this sibling set lives in.
    pub fn dimension_space_point_hash(&self) -> &str {
        &self.dimension_space_point_hash
    }

    /// The shared parent anchor.
    pub fn parent_node_anchor(&self) -> &NodeRelationAnchor {
        &self.parent_node_anchor
    }

    /// All child anchors in sibling order.
    pub fn child_node_anchors(&self) -> &[NodeRelationAnchor] {
        &self.child_node_anchors
    }

    /// The 1-based position of an anchor in the sibling order, the
    /// same number the SQL ordinality column yields.
    pub fn ordinality(&self, anchor: &NodeRelationAnchor) -> Option<u64> {
        self.child_node_anchors
            .iter()
            .position(|candidate| candidate == anchor)
            .map(|position| position as u64 + 1)
    }

    /// Whether the anchor is part of this sibling set.
    pub fn contains(&self, anchor: &NodeRelationAnchor) -> bool {
        self.child_node_anchors.contains(anchor)
    }

    /// All siblings of `anchor` in sibling order, excluding the anchor
    /// itself. `None` when the anchor is not in the set.
    pub fn any_siblings(&self, anchor: &NodeRelationAnchor) -> Option<Vec<&NodeRelationAnchor>> {
        if !self.contains(anchor) {
            return None;
        }
        Some(
            self.child_node_anchors
                .iter()
                .filter(|candidate| *candidate != anchor)
                .collect(),
        )
    }

    /// Siblings before `anchor`, nearest first. `None` when the anchor
    /// is not in the set.
    pub fn preceding_siblings(
        &self,
        anchor: &NodeRelationAnchor,
    ) -> Option<Vec<&NodeRelationAnchor>> {
        let position = self
            .child_node_anchors
            .iter()
            .position(|candidate| candidate == anchor)?;
        Some(self.child_node_anchors[..position].iter().rev().collect())
    }

    /// Siblings after `anchor`, nearest first. `None` when the anchor
    /// is not in the set.
    pub fn succeeding_siblings(
        &self,
        anchor: &NodeRelationAnchor,
    ) -> Option<Vec<&NodeRelationAnchor>> {
        let position = self
            .child_node_anchors
            .iter()
            .position(|candidate| candidate == anchor)?;
        Some(self.child_node_anchors[position + 1..].iter().collect())
    }
}

/// Marks node aggregates as hidden in one stream and coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionHyperrelation {
    content_stream_id: ContentStreamId,
    dimension_space_point_hash: String,
    origin_node_aggregate_id: NodeAggregateId,
    affected_node_aggregate_ids: BTreeSet<NodeAggregateId>,
}

impl RestrictionHyperrelation {
    /// Create a restriction covering the affected aggregates.
    pub fn new(
        content_stream_id: ContentStreamId,
        dimension_space_point_hash: impl Into<String>,
        origin_node_aggregate_id: NodeAggregateId,
        affected_node_aggregate_ids: BTreeSet<NodeAggregateId>,
    ) -> Self {
        Self {
            content_stream_id,
            dimension_space_point_hash: dimension_space_point_hash.into(),
            origin_node_aggregate_id,
            affected_node_aggregate_ids,
        }
    }

    /// The stream this restriction applies in.
    pub fn content_stream_id(&self) -> &ContentStreamId {
        &self.content_stream_id
    }

    /// The coordinate this restriction applies in.
    pub fn dimension_space_point_hash(&self) -> &str {
        &self.dimension_space_point_hash
    }

    /// The aggregate the restriction originates from.
    pub fn origin_node_aggregate_id(&self) -> &NodeAggregateId {
        &self.origin_node_aggregate_id
    }

    /// All hidden aggregates, origin included.
    pub fn affected_node_aggregate_ids(&self) -> &BTreeSet<NodeAggregateId> {
        &self.affected_node_aggregate_ids
    }

    /// Whether the given aggregate is hidden by this restriction.
    pub fn affects(&self, node_aggregate_id: &NodeAggregateId) -> bool {
        self.affected_node_aggregate_ids
            .contains(node_aggregate_id)
    }
}

/// A named, ordered reference from a source node to a target
/// aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRelation {
    source_node_anchor: NodeRelationAnchor,
    name: ReferenceName,
    position: u32,
    target_node_aggregate_id: NodeAggregateId,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

impl ReferenceRelation {
    /// Create a reference row.
    pub fn new(
        source_node_anchor: NodeRelationAnchor,
        name: ReferenceName,
        position: u32,
        target_node_aggregate_id: NodeAggregateId,
        properties: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            source_node_anchor,
            name,
            position,
            target_node_aggregate_id,
            properties,
        }
    }

    /// The referencing node's anchor.
    pub fn source_node_anchor(&self) -> &NodeRelationAnchor {
        &self.source_node_anchor
    }

    /// The reference name.
    pub fn name(&self) -> &ReferenceName {
        &self.name
    }

    /// Position among same-named references of the source.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// The referenced aggregate.
    pub fn target_node_aggregate_id(&self) -> &NodeAggregateId {
        &self.target_node_aggregate_id
    }

    /// Reference payload properties.
    pub fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.properties
    }
}
