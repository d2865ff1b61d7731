//! hypergraph::reference
//!
//! The reference relation query.
//!
//! References join both endpoints through their own hierarchy rows, so
//! only references whose source and target are actually present in the
//! content stream and coordinate are returned. The caller picks the
//! select list: `tarn` fields for outgoing references, `srcn` fields
//! for incoming ones.

use crate::dimensionspace::DimensionSpacePoint;
use crate::hypergraph::filters::NodeTypeCriteria;
use crate::hypergraph::query::{CommonGraphQueryOperations, QueryParts};
use crate::hypergraph::restriction::{restriction_clause, VisibilityConstraints};
use crate::hypergraph::schema::HypergraphTableNames;
use crate::types::{ContentStreamId, NodeAggregateId, ReferenceName};

/// References between nodes, traversable in either direction.
///
/// Aliases: `srcn`/`srch` for the source side, `tarn`/`tarh` for the
/// target side, `r` for the reference relation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphReferenceQuery {
    parts: QueryParts,
}

impl HypergraphReferenceQuery {
    pub fn create(
        content_stream_id: &ContentStreamId,
        fields_to_fetch: &str,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let text = format!(
            "SELECT {fields_to_fetch}\nFROM {hierarchy} srch\nJOIN {node} srcn ON srcn.relationanchorpoint = ANY(srch.childnodeanchors)\nJOIN {reference} r ON r.sourcenodeanchor = srcn.relationanchorpoint\nJOIN {node} tarn ON r.targetnodeaggregateid = tarn.nodeaggregateid\nJOIN {hierarchy} tarh ON tarn.relationanchorpoint = ANY(tarh.childnodeanchors)\nWHERE srch.contentstreamid = :contentStreamId\nAND tarh.contentstreamid = :contentStreamId",
            hierarchy = table_names.hierarchy(),
            node = table_names.node(),
            reference = table_names.reference(),
        );
        Self {
            parts: QueryParts::new(text).bind("contentStreamId", content_stream_id.as_str()),
        }
    }

    /// Narrow both endpoints to one dimension coordinate.
    pub fn with_dimension_space_point(&self, dimension_space_point: &DimensionSpacePoint) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND srch.dimensionspacepointhash = :dimensionSpacePointHash\nAND tarh.dimensionspacepointhash = :dimensionSpacePointHash")
                .bind("dimensionSpacePointHash", dimension_space_point.hash()),
        )
    }

    /// Outgoing references of one aggregate.
    pub fn with_source_node_aggregate_id(
        &self,
        source_node_aggregate_id: &NodeAggregateId,
    ) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND srcn.nodeaggregateid = :sourceNodeAggregateId")
                .bind("sourceNodeAggregateId", source_node_aggregate_id.as_str()),
        )
    }

    /// Incoming references to one aggregate.
    pub fn with_target_node_aggregate_id(
        &self,
        target_node_aggregate_id: &NodeAggregateId,
    ) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND tarn.nodeaggregateid = :targetNodeAggregateId")
                .bind("targetNodeAggregateId", target_node_aggregate_id.as_str()),
        )
    }

    /// Narrow to one reference name.
    pub fn with_reference_name(&self, reference_name: &ReferenceName) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND r.name = :referenceName")
                .bind("referenceName", reference_name.as_str()),
        )
    }

    /// Narrow by a node type allow/disallow filter on either endpoint
    /// alias.
    pub fn with_node_type_criteria(&self, criteria: &NodeTypeCriteria, alias: &str) -> Self {
        Self::from_parts(self.parts.append_node_type_criteria(criteria, alias))
    }

    /// Exclude references from hidden source nodes.
    pub fn with_source_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "src",
        )))
    }

    /// Exclude references to hidden target nodes.
    pub fn with_target_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "tar",
        )))
    }

    /// Append an explicit result ordering.
    pub fn ordered_by(&self, orderings: &[&str]) -> Self {
        Self::from_parts(
            self.parts
                .append(&format!("\nORDER BY {}", orderings.join(", "))),
        )
    }
}

impl CommonGraphQueryOperations for HypergraphReferenceQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::query::ParameterValue;

    const TARGET_FIELDS: &str = "tarn.*, tarh.contentstreamid, tarh.dimensionspacepoint";
    const SOURCE_FIELDS: &str = "srcn.*, srch.contentstreamid, srch.dimensionspacepoint";

    fn stream() -> ContentStreamId {
        ContentStreamId::new("cs-main").unwrap()
    }

    fn tables() -> HypergraphTableNames {
        HypergraphTableNames::default()
    }

    #[test]
    fn base_joins_both_endpoints_through_their_hierarchy_rows() {
        let query = HypergraphReferenceQuery::create(&stream(), TARGET_FIELDS, &tables());
        let text = query.query_text();

        assert!(text.starts_with("SELECT tarn.*, tarh.contentstreamid"));
        assert!(text.contains("JOIN cr_default_p_hypergraph_referencerelation r ON r.sourcenodeanchor = srcn.relationanchorpoint"));
        assert!(text.contains("JOIN cr_default_p_hypergraph_node tarn ON r.targetnodeaggregateid = tarn.nodeaggregateid"));
        assert!(text.contains("WHERE srch.contentstreamid = :contentStreamId"));
        assert!(text.contains("AND tarh.contentstreamid = :contentStreamId"));
    }

    #[test]
    fn dimension_point_constrains_both_sides() {
        let point = DimensionSpacePoint::from_pairs([("language", "en")]).unwrap();
        let query = HypergraphReferenceQuery::create(&stream(), TARGET_FIELDS, &tables())
            .with_dimension_space_point(&point);
        let text = query.query_text();

        assert!(text.contains("srch.dimensionspacepointhash = :dimensionSpacePointHash"));
        assert!(text.contains("tarh.dimensionspacepointhash = :dimensionSpacePointHash"));
        assert_eq!(
            query.named_parameters().get("dimensionSpacePointHash"),
            Some(&ParameterValue::String(point.hash().to_string()))
        );
    }

    #[test]
    fn outgoing_references_filter_the_source_side() {
        let source = NodeAggregateId::new("source").unwrap();
        let query = HypergraphReferenceQuery::create(&stream(), TARGET_FIELDS, &tables())
            .with_source_node_aggregate_id(&source)
            .ordered_by(&["r.name", "r.position"]);

        assert!(query
            .query_text()
            .contains("AND srcn.nodeaggregateid = :sourceNodeAggregateId"));
        assert!(query.query_text().ends_with("ORDER BY r.name, r.position"));
    }

    #[test]
    fn incoming_references_filter_the_target_side() {
        let target = NodeAggregateId::new("target").unwrap();
        let query = HypergraphReferenceQuery::create(&stream(), SOURCE_FIELDS, &tables())
            .with_target_node_aggregate_id(&target)
            .ordered_by(&["r.name", "r.position", "srcn.nodeaggregateid"]);

        assert!(query
            .query_text()
            .contains("AND tarn.nodeaggregateid = :targetNodeAggregateId"));
        assert!(query
            .query_text()
            .ends_with("ORDER BY r.name, r.position, srcn.nodeaggregateid"));
    }

    #[test]
    fn named_references_skip_the_name_ordering() {
        let name = ReferenceName::new("related").unwrap();
        let query = HypergraphReferenceQuery::create(&stream(), TARGET_FIELDS, &tables())
            .with_reference_name(&name)
            .ordered_by(&["r.position"]);

        assert!(query.query_text().contains("AND r.name = :referenceName"));
        assert!(query.query_text().ends_with("ORDER BY r.position"));
        assert_eq!(
            query.named_parameters().get("referenceName"),
            Some(&ParameterValue::String("related".to_string()))
        );
    }

    #[test]
    fn source_and_target_restrictions_are_independent() {
        let query = HypergraphReferenceQuery::create(&stream(), TARGET_FIELDS, &tables())
            .with_source_restriction(&VisibilityConstraints::frontend(), &tables())
            .with_target_restriction(&VisibilityConstraints::frontend(), &tables());
        let text = query.query_text();

        assert!(text.contains("srcn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        assert!(text.contains("tarn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        assert!(text.contains("rest.contentstreamid = srch.contentstreamid"));
        assert!(text.contains("rest.contentstreamid = tarh.contentstreamid"));
    }
}
