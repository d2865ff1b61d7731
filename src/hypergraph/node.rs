//! hypergraph::node
//!
//! The node row of the hypergraph projection.

use serde::{Deserialize, Serialize};

use crate::dimensionspace::OriginDimensionSpacePoint;
use crate::types::{
    NodeAggregateClassification, NodeAggregateId, NodeName, NodeRelationAnchor, NodeTypeName,
};

/// One materialized node in the projection.
///
/// The anchor identifies the row itself; several dimension coordinates
/// may share one anchor through hierarchy hyperrelations, so the
/// origin coordinate recorded here is where the node was created, not
/// necessarily where it is being read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    relation_anchor_point: NodeRelationAnchor,
    node_aggregate_id: NodeAggregateId,
    origin_dimension_space_point: OriginDimensionSpacePoint,
    node_type_name: NodeTypeName,
    classification: NodeAggregateClassification,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_name: Option<NodeName>,
}

impl NodeRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        relation_anchor_point: NodeRelationAnchor,
        node_aggregate_id: NodeAggregateId,
        origin_dimension_space_point: OriginDimensionSpacePoint,
        node_type_name: NodeTypeName,
        classification: NodeAggregateClassification,
        properties: serde_json::Map<String, serde_json::Value>,
        node_name: Option<NodeName>,
    ) -> Self {
        Self {
            relation_anchor_point,
            node_aggregate_id,
            origin_dimension_space_point,
            node_type_name,
            classification,
            properties,
            node_name,
        }
    }

    pub fn relation_anchor_point(&self) -> &NodeRelationAnchor {
        &self.relation_anchor_point
    }

    pub fn node_aggregate_id(&self) -> &NodeAggregateId {
        &self.node_aggregate_id
    }

    pub fn origin_dimension_space_point(&self) -> &OriginDimensionSpacePoint {
        &self.origin_dimension_space_point
    }

    /// Hash of the origin coordinate, as stored in the hash column.
    pub fn origin_dimension_space_point_hash(&self) -> &str {
        self.origin_dimension_space_point.hash()
    }

    pub fn node_type_name(&self) -> &NodeTypeName {
        &self.node_type_name
    }

    pub fn classification(&self) -> NodeAggregateClassification {
        self.classification
    }

    pub fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.properties
    }

    /// Property lookup by name.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    pub fn node_name(&self) -> Option<&NodeName> {
        self.node_name.as_ref()
    }
}
