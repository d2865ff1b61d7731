//! hypergraph::query
//!
//! The immutable query builder core and the generic node query.
//!
//! # Architecture
//!
//! A query is a value: `{query text, named parameters, parameter type
//! hints}`. Every `with_*` method clones the receiver, appends one
//! clause, binds its parameters, and returns the extended copy; the
//! receiver is never mutated. A base query can therefore be shared
//! across branches of a query-construction pipeline without
//! interference.
//!
//! Parameters are named (`:contentStreamId` style). Scalars need no
//! hint; array parameters carry an explicit type hint so a transport
//! can expand them correctly.
//!
//! # Example
//!
//! ```
//! use manifold::hypergraph::{
//!     CommonGraphQueryOperations, HypergraphQuery, HypergraphTableNames,
//! };
//! use manifold::types::ContentStreamId;
//!
//! let stream = ContentStreamId::new("cs-main").unwrap();
//! let tables = HypergraphTableNames::default();
//! let base = HypergraphQuery::create(&stream, &tables, false);
//!
//! // Branching never mutates the base.
//! let limited = base.with_limit(10);
//! assert!(!base.query_text().contains("LIMIT"));
//! assert!(limited.query_text().ends_with("LIMIT 10"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dimensionspace::{
    DimensionSpacePoint, DimensionSpacePointSet, OriginDimensionSpacePoint,
};
use crate::hypergraph::filters::{node_type_criteria_clause, NodeTypeCriteria};
use crate::hypergraph::restriction::{restriction_clause, VisibilityConstraints};
use crate::hypergraph::schema::HypergraphTableNames;
use crate::types::{ContentStreamId, NodeAggregateClassification, NodeAggregateId, NodeTypeName};

/// Type hints for parameters a transport cannot infer on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    StringArray,
    IntArray,
}

/// A named parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    String(String),
    Int(i64),
    StringArray(Vec<String>),
    IntArray(Vec<i64>),
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::StringArray(values)
    }
}

impl From<Vec<i64>> for ParameterValue {
    fn from(values: Vec<i64>) -> Self {
        ParameterValue::IntArray(values)
    }
}

/// The shared state of every query shape: accumulated text, named
/// parameters, and type hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParts {
    text: String,
    parameters: BTreeMap<String, ParameterValue>,
    parameter_types: BTreeMap<String, ParameterType>,
}

impl QueryParts {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: BTreeMap::new(),
            parameter_types: BTreeMap::new(),
        }
    }

    /// A copy with the clause appended verbatim.
    pub(crate) fn append(&self, clause: &str) -> Self {
        let mut next = self.clone();
        next.text.push_str(clause);
        next
    }

    /// A copy with one scalar parameter bound.
    pub(crate) fn bind(&self, name: &str, value: impl Into<ParameterValue>) -> Self {
        let mut next = self.clone();
        next.parameters.insert(name.to_string(), value.into());
        next
    }

    /// A copy with one array parameter bound, including its type hint.
    pub(crate) fn bind_with_type(
        &self,
        name: &str,
        value: impl Into<ParameterValue>,
        parameter_type: ParameterType,
    ) -> Self {
        let mut next = self.bind(name, value);
        next.parameter_types
            .insert(name.to_string(), parameter_type);
        next
    }

    /// A copy with the node type criteria clause appended and its array
    /// parameters bound.
    pub(crate) fn append_node_type_criteria(
        &self,
        criteria: &NodeTypeCriteria,
        alias: &str,
    ) -> Self {
        let mut next = self.clone();
        let clause = node_type_criteria_clause(
            criteria,
            alias,
            &mut next.parameters,
            &mut next.parameter_types,
        );
        next.text.push_str(&clause);
        next
    }

    /// The accumulated query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All named parameters bound so far.
    pub fn parameters(&self) -> &BTreeMap<String, ParameterValue> {
        &self.parameters
    }

    /// Type hints for the array parameters.
    pub fn parameter_types(&self) -> &BTreeMap<String, ParameterType> {
        &self.parameter_types
    }
}

/// Operations shared by every query shape.
pub trait CommonGraphQueryOperations: Sized {
    /// The accumulated text, parameters, and hints.
    fn parts(&self) -> &QueryParts;

    /// Rebuild this query shape around extended parts.
    fn from_parts(parts: QueryParts) -> Self;

    /// The accumulated query text.
    fn query_text(&self) -> &str {
        self.parts().text()
    }

    /// All named parameters bound so far.
    fn named_parameters(&self) -> &BTreeMap<String, ParameterValue> {
        self.parts().parameters()
    }

    /// Type hints for the array parameters.
    fn parameter_type_hints(&self) -> &BTreeMap<String, ParameterType> {
        self.parts().parameter_types()
    }

    /// A copy returning at most `limit` rows.
    fn with_limit(&self, limit: u64) -> Self {
        Self::from_parts(self.parts().append(&format!("\nLIMIT {limit}")))
    }

    /// A copy skipping the first `offset` rows.
    fn with_offset(&self, offset: u64) -> Self {
        Self::from_parts(self.parts().append(&format!("\nOFFSET {offset}")))
    }

    /// This query wrapped into a `COUNT(*)` form, keeping all bound
    /// parameters.
    fn to_count_query(&self) -> HypergraphCountQuery {
        HypergraphCountQuery::wrapping(self.parts())
    }
}

/// The generic any-position node query: all nodes of a content stream,
/// narrowable by coordinate, origin, aggregate id, type, and
/// classification.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphQuery {
    parts: QueryParts,
}

impl HypergraphQuery {
    /// The base query over one content stream.
    ///
    /// With `join_restriction_relations` the restriction rows are
    /// left-joined so callers can see which nodes are hidden and in
    /// which coordinate.
    pub fn create(
        content_stream_id: &ContentStreamId,
        table_names: &HypergraphTableNames,
        join_restriction_relations: bool,
    ) -> Self {
        let restriction_select = if join_restriction_relations {
            ",\n    r.dimensionspacepointhash AS disableddimensionspacepointhash"
        } else {
            ""
        };
        let restriction_join = if join_restriction_relations {
            format!(
                "\nLEFT JOIN {restriction} r\n    ON n.nodeaggregateid = ANY(r.affectednodeaggregateids)\n    AND r.contentstreamid = h.contentstreamid\n    AND r.dimensionspacepointhash = h.dimensionspacepointhash",
                restriction = table_names.restriction(),
            )
        } else {
            String::new()
        };

        let text = format!(
            "SELECT n.origindimensionspacepoint, n.nodeaggregateid, n.nodetypename,\n    n.classification, n.properties, n.nodename,\n    h.contentstreamid, h.dimensionspacepoint{restriction_select}\nFROM {hierarchy} h\nJOIN {node} n ON n.relationanchorpoint = ANY(h.childnodeanchors){restriction_join}\nWHERE h.contentstreamid = :contentStreamId",
            hierarchy = table_names.hierarchy(),
            node = table_names.node(),
        );

        Self {
            parts: QueryParts::new(text)
                .bind("contentStreamId", content_stream_id.as_str()),
        }
    }

    /// Narrow to one dimension coordinate.
    pub fn with_dimension_space_point(&self, dimension_space_point: &DimensionSpacePoint) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND h.dimensionspacepointhash = :dimensionSpacePointHash")
                .bind("dimensionSpacePointHash", dimension_space_point.hash()),
        )
    }

    /// Narrow to a set of dimension coordinates.
    pub fn with_dimension_space_points(
        &self,
        dimension_space_points: &DimensionSpacePointSet,
    ) -> Self {
        let hashes: Vec<String> = dimension_space_points
            .iter()
            .map(|point| point.hash().to_string())
            .collect();
        Self::from_parts(
            self.parts
                .append("\nAND h.dimensionspacepointhash IN (:dimensionSpacePointHashes)")
                .bind_with_type(
                    "dimensionSpacePointHashes",
                    hashes,
                    ParameterType::StringArray,
                ),
        )
    }

    /// Narrow to nodes created in one origin coordinate.
    pub fn with_origin_dimension_space_point(
        &self,
        origin_dimension_space_point: &OriginDimensionSpacePoint,
    ) -> Self {
        Self::from_parts(
            self.parts
                .append(
                    "\nAND n.origindimensionspacepointhash = :originDimensionSpacePointHash",
                )
                .bind(
                    "originDimensionSpacePointHash",
                    origin_dimension_space_point.hash(),
                ),
        )
    }

    /// Narrow to one node aggregate.
    pub fn with_node_aggregate_id(&self, node_aggregate_id: &NodeAggregateId) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND n.nodeaggregateid = :nodeAggregateId")
                .bind("nodeAggregateId", node_aggregate_id.as_str()),
        )
    }

    /// Narrow to one node type.
    pub fn with_node_type_name(&self, node_type_name: &NodeTypeName) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND n.nodetypename = :nodeTypeName")
                .bind("nodeTypeName", node_type_name.as_str()),
        )
    }

    /// Narrow to one aggregate classification.
    pub fn with_classification(&self, classification: NodeAggregateClassification) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND n.classification = :classification")
                .bind("classification", classification.as_str()),
        )
    }

    /// Narrow by a node type allow/disallow filter.
    pub fn with_node_type_criteria(&self, criteria: &NodeTypeCriteria) -> Self {
        Self::from_parts(self.parts.append_node_type_criteria(criteria, "n"))
    }

    /// Exclude nodes hidden by restriction rows, unless the constraints
    /// show disabled content.
    pub fn with_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "",
        )))
    }
}

impl CommonGraphQueryOperations for HypergraphQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}

/// A `COUNT(*)` query, either wrapping another query or counting all
/// nodes of one stream and coordinate directly.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphCountQuery {
    parts: QueryParts,
}

impl HypergraphCountQuery {
    /// Count all nodes present in one content stream and coordinate.
    pub fn all_nodes(
        content_stream_id: &ContentStreamId,
        dimension_space_point: &DimensionSpacePoint,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let text = format!(
            "SELECT COUNT(*)\nFROM {hierarchy} h\nJOIN {node} n ON n.relationanchorpoint = ANY(h.childnodeanchors)\nWHERE h.contentstreamid = :contentStreamId\nAND h.dimensionspacepointhash = :dimensionSpacePointHash",
            hierarchy = table_names.hierarchy(),
            node = table_names.node(),
        );
        Self {
            parts: QueryParts::new(text)
                .bind("contentStreamId", content_stream_id.as_str())
                .bind("dimensionSpacePointHash", dimension_space_point.hash()),
        }
    }

    /// Wrap an arbitrary node query into a count.
    pub(crate) fn wrapping(parts: &QueryParts) -> Self {
        Self {
            parts: QueryParts {
                text: format!("SELECT COUNT(*) FROM (\n{}\n) countable", parts.text),
                parameters: parts.parameters.clone(),
                parameter_types: parts.parameter_types.clone(),
            },
        }
    }
}

impl CommonGraphQueryOperations for HypergraphCountQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}
