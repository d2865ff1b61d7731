//! hypergraph::children
//!
//! Hierarchy traversal queries: children, parents, siblings, and
//! recursive subtrees.
//!
//! Parent/child hyperrelations are keyed by parent anchor, so the
//! parent query joins the hierarchy twice: once to locate the parent
//! node's own coverage row, once to locate the row listing its
//! children. Sibling and subtree queries unnest the ordered child
//! anchor list `WITH ORDINALITY` so results come back in sibling
//! order.

use std::collections::BTreeMap;

use crate::dimensionspace::{
    DimensionSpacePoint, DimensionSpacePointSet, OriginDimensionSpacePoint,
};
use crate::hypergraph::filters::{node_type_criteria_clause, NodeTypeCriteria};
use crate::hypergraph::query::{CommonGraphQueryOperations, ParameterType, QueryParts};
use crate::hypergraph::restriction::{restriction_clause, VisibilityConstraints};
use crate::hypergraph::schema::HypergraphTableNames;
use crate::types::{
    ContentStreamId, NodeAggregateClassification, NodeAggregateId, NodeName,
};

/// Children of one parent aggregate.
///
/// Aliases: `pn`/`ph` for the parent node and its coverage row,
/// `cn`/`ch` for the child nodes and the hyperrelation listing them.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphChildQuery {
    parts: QueryParts,
}

impl HypergraphChildQuery {
    pub fn create(
        content_stream_id: &ContentStreamId,
        parent_node_aggregate_id: &NodeAggregateId,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let text = format!(
            "SELECT cn.origindimensionspacepoint, cn.nodeaggregateid, cn.nodetypename,\n    cn.classification, cn.properties, cn.nodename,\n    ch.contentstreamid, ch.dimensionspacepoint\nFROM {node} pn\nJOIN {hierarchy} ph ON pn.relationanchorpoint = ANY(ph.childnodeanchors)\nJOIN {hierarchy} ch ON ch.parentnodeanchor = pn.relationanchorpoint\nJOIN {node} cn ON cn.relationanchorpoint = ANY(ch.childnodeanchors)\nWHERE pn.nodeaggregateid = :parentNodeAggregateId\nAND ph.contentstreamid = :contentStreamId\nAND ch.contentstreamid = :contentStreamId",
            node = table_names.node(),
            hierarchy = table_names.hierarchy(),
        );
        Self {
            parts: QueryParts::new(text)
                .bind("contentStreamId", content_stream_id.as_str())
                .bind("parentNodeAggregateId", parent_node_aggregate_id.as_str()),
        }
    }

    /// Narrow to one dimension coordinate, on both hierarchy rows.
    pub fn with_dimension_space_point(&self, dimension_space_point: &DimensionSpacePoint) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND ph.dimensionspacepointhash = :dimensionSpacePointHash\nAND ch.dimensionspacepointhash = :dimensionSpacePointHash")
                .bind("dimensionSpacePointHash", dimension_space_point.hash()),
        )
    }

    /// Narrow to a set of dimension coordinates, on both hierarchy rows.
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
                .append("\nAND ph.dimensionspacepointhash IN (:dimensionSpacePointHashes)\nAND ch.dimensionspacepointhash IN (:dimensionSpacePointHashes)")
                .bind_with_type(
                    "dimensionSpacePointHashes",
                    hashes,
                    ParameterType::StringArray,
                ),
        )
    }

    /// Narrow to children created in one origin coordinate.
    pub fn with_origin_dimension_space_point(
        &self,
        origin_dimension_space_point: &OriginDimensionSpacePoint,
    ) -> Self {
        Self::from_parts(
            self.parts
                .append(
                    "\nAND cn.origindimensionspacepointhash = :originDimensionSpacePointHash",
                )
                .bind(
                    "originDimensionSpacePointHash",
                    origin_dimension_space_point.hash(),
                ),
        )
    }

    /// Narrow to the child connected through one edge name.
    pub fn with_child_node_name(&self, child_node_name: &NodeName) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND cn.nodename = :childNodeName")
                .bind("childNodeName", child_node_name.as_str()),
        )
    }

    /// Narrow to tethered children only.
    pub fn with_only_tethered(&self) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND cn.classification = :classification")
                .bind(
                    "classification",
                    NodeAggregateClassification::Tethered.as_str(),
                ),
        )
    }

    /// Narrow by a node type allow/disallow filter on the child rows.
    pub fn with_node_type_criteria(&self, criteria: &NodeTypeCriteria) -> Self {
        Self::from_parts(self.parts.append_node_type_criteria(criteria, "cn"))
    }

    /// Exclude hidden children, unless the constraints show disabled
    /// content.
    pub fn with_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "c",
        )))
    }
}

impl CommonGraphQueryOperations for HypergraphChildQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}

/// Parents, traversed upward from a child aggregate.
///
/// Same double join as the child query, inverted: the result rows are
/// the parent nodes `pn` with their own coverage rows `ph`.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphParentQuery {
    parts: QueryParts,
}

impl HypergraphParentQuery {
    pub fn create(
        content_stream_id: &ContentStreamId,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let text = format!(
            "SELECT pn.origindimensionspacepoint, pn.nodeaggregateid, pn.nodetypename,\n    pn.classification, pn.properties, pn.nodename,\n    ph.contentstreamid, ph.dimensionspacepoint\nFROM {node} pn\nJOIN {hierarchy} ph ON pn.relationanchorpoint = ANY(ph.childnodeanchors)\nJOIN {hierarchy} ch ON ch.parentnodeanchor = pn.relationanchorpoint\nJOIN {node} cn ON cn.relationanchorpoint = ANY(ch.childnodeanchors)\nWHERE ph.contentstreamid = :contentStreamId\nAND ch.contentstreamid = :contentStreamId",
            node = table_names.node(),
            hierarchy = table_names.hierarchy(),
        );
        Self {
            parts: QueryParts::new(text).bind("contentStreamId", content_stream_id.as_str()),
        }
    }

    /// Narrow to one dimension coordinate, on both hierarchy rows.
    pub fn with_dimension_space_point(&self, dimension_space_point: &DimensionSpacePoint) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND ph.dimensionspacepointhash = :dimensionSpacePointHash\nAND ch.dimensionspacepointhash = :dimensionSpacePointHash")
                .bind("dimensionSpacePointHash", dimension_space_point.hash()),
        )
    }

    /// The child whose parents are wanted.
    pub fn with_child_node_aggregate_id(&self, child_node_aggregate_id: &NodeAggregateId) -> Self {
        Self::from_parts(
            self.parts
                .append("\nAND cn.nodeaggregateid = :childNodeAggregateId")
                .bind("childNodeAggregateId", child_node_aggregate_id.as_str()),
        )
    }

    /// Narrow to children created in one origin coordinate.
    pub fn with_child_origin_dimension_space_point(
        &self,
        origin_dimension_space_point: &OriginDimensionSpacePoint,
    ) -> Self {
        Self::from_parts(
            self.parts
                .append(
                    "\nAND cn.origindimensionspacepointhash = :originDimensionSpacePointHash",
                )
                .bind(
                    "originDimensionSpacePointHash",
                    origin_dimension_space_point.hash(),
                ),
        )
    }

    /// Exclude hidden parents, unless the constraints show disabled
    /// content.
    pub fn with_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "p",
        )))
    }
}

impl CommonGraphQueryOperations for HypergraphParentQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}

/// Which slice of the ordered sibling set a sibling query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypergraphSiblingQueryMode {
    /// All siblings except the node itself.
    All,
    /// Siblings before the node's own position.
    OnlyPreceding,
    /// Siblings after the node's own position.
    OnlySucceeding,
}

impl HypergraphSiblingQueryMode {
    /// The slicing condition against the node's own ordinal position.
    fn render_condition(&self) -> &'static str {
        match self {
            Self::All => "\nAND siblings.childnodeanchor != n.relationanchorpoint",
            Self::OnlyPreceding => {
                "\nAND siblings.ordinality < array_position(sh.childnodeanchors, n.relationanchorpoint)"
            }
            Self::OnlySucceeding => {
                "\nAND siblings.ordinality > array_position(sh.childnodeanchors, n.relationanchorpoint)"
            }
        }
    }

    /// Preceding siblings read nearest first, so their ordinality
    /// ordering is reversed.
    pub fn is_ordering_to_be_reversed(&self) -> bool {
        matches!(self, Self::OnlyPreceding)
    }
}

/// Siblings of one node: the other members of its parent's ordered
/// child anchor list.
///
/// The entry node is `n`; the shared hyperrelation is `sh`; the
/// resulting sibling nodes are `sn`, joined through the unnested
/// anchor list `siblings` which carries their ordinal positions.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphSiblingQuery {
    parts: QueryParts,
}

impl HypergraphSiblingQuery {
    pub fn create(
        content_stream_id: &ContentStreamId,
        dimension_space_point: &DimensionSpacePoint,
        sibling_node_aggregate_id: &NodeAggregateId,
        mode: HypergraphSiblingQueryMode,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let text = format!(
            "SELECT sn.origindimensionspacepoint, sn.nodeaggregateid, sn.nodetypename,\n    sn.classification, sn.properties, sn.nodename,\n    sh.contentstreamid, sh.dimensionspacepoint\nFROM {node} n\nJOIN {hierarchy} sh ON n.relationanchorpoint = ANY(sh.childnodeanchors)\nJOIN (\n    SELECT *\n    FROM {hierarchy},\n        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor\n) siblings\n    ON siblings.parentnodeanchor = sh.parentnodeanchor\n    AND siblings.contentstreamid = sh.contentstreamid\n    AND siblings.dimensionspacepointhash = sh.dimensionspacepointhash\nJOIN {node} sn ON sn.relationanchorpoint = siblings.childnodeanchor\nWHERE n.nodeaggregateid = :siblingNodeAggregateId\nAND sh.contentstreamid = :contentStreamId\nAND sh.dimensionspacepointhash = :dimensionSpacePointHash{mode_condition}",
            node = table_names.node(),
            hierarchy = table_names.hierarchy(),
            mode_condition = mode.render_condition(),
        );
        Self {
            parts: QueryParts::new(text)
                .bind("contentStreamId", content_stream_id.as_str())
                .bind("dimensionSpacePointHash", dimension_space_point.hash())
                .bind(
                    "siblingNodeAggregateId",
                    sibling_node_aggregate_id.as_str(),
                ),
        }
    }

    /// Order results by ordinal position; reversed for
    /// nearest-sibling-first traversal of preceding siblings.
    pub fn with_ordinality_ordering(&self, reversed: bool) -> Self {
        let direction = if reversed { "DESC" } else { "ASC" };
        Self::from_parts(
            self.parts
                .append(&format!("\nORDER BY siblings.ordinality {direction}")),
        )
    }

    /// Narrow by a node type allow/disallow filter on the sibling rows.
    pub fn with_node_type_criteria(&self, criteria: &NodeTypeCriteria) -> Self {
        Self::from_parts(self.parts.append_node_type_criteria(criteria, "sn"))
    }

    /// Exclude hidden siblings, unless the constraints show disabled
    /// content.
    pub fn with_restriction(
        &self,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        Self::from_parts(self.parts.append(&restriction_clause(
            visibility_constraints,
            table_names,
            "s",
        )))
    }
}

impl CommonGraphQueryOperations for HypergraphSiblingQuery {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn from_parts(parts: QueryParts) -> Self {
        Self { parts }
    }
}

/// A recursive subtree query rooted at one entry aggregate.
///
/// Rendered in one step since its options live inside the recursive
/// term, not at the end of the statement. Rows come back deepest level
/// first, in sibling order within each level, each carrying the parent
/// aggregate id ('ROOT' for the entry node) and its level.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphSubtreeQuery {
    parts: QueryParts,
}

impl HypergraphSubtreeQuery {
    pub fn create(
        content_stream_id: &ContentStreamId,
        dimension_space_point: &DimensionSpacePoint,
        entry_node_aggregate_id: &NodeAggregateId,
        maximum_levels: Option<u32>,
        node_type_criteria: Option<&NodeTypeCriteria>,
        visibility_constraints: &VisibilityConstraints,
        table_names: &HypergraphTableNames,
    ) -> Self {
        let mut parameters = BTreeMap::new();
        let mut parameter_types = BTreeMap::new();
        let criteria_clause = match node_type_criteria {
            Some(criteria) => {
                node_type_criteria_clause(criteria, "cn", &mut parameters, &mut parameter_types)
            }
            None => String::new(),
        };
        let level_clause = if maximum_levels.is_some() {
            "\nAND p.level + 1 <= :maximumLevels"
        } else {
            ""
        };

        let text = format!(
            "WITH RECURSIVE subtree AS (\nSELECT n.*, h.contentstreamid, h.dimensionspacepoint,\n    'ROOT'::varchar AS parentnodeaggregateid,\n    0 AS level,\n    h.ordinality\nFROM {node} n\nINNER JOIN (\n    SELECT *\n    FROM {hierarchy},\n        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor\n) h ON n.relationanchorpoint = h.childnodeanchor\nWHERE n.nodeaggregateid = :entryNodeAggregateId\nAND h.contentstreamid = :contentStreamId\nAND h.dimensionspacepointhash = :dimensionSpacePointHash{entry_restriction}\nUNION ALL\nSELECT cn.*, ch.contentstreamid, ch.dimensionspacepoint,\n    p.nodeaggregateid AS parentnodeaggregateid,\n    p.level + 1 AS level,\n    ch.ordinality\nFROM subtree p\nINNER JOIN (\n    SELECT *\n    FROM {hierarchy},\n        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor\n) ch ON ch.parentnodeanchor = p.relationanchorpoint\nINNER JOIN {node} cn ON cn.relationanchorpoint = ch.childnodeanchor\nWHERE ch.contentstreamid = :contentStreamId\nAND ch.dimensionspacepointhash = :dimensionSpacePointHash{level_clause}{descend_restriction}{criteria_clause}\n)\nSELECT * FROM subtree\nORDER BY level DESC, ordinality ASC",
            node = table_names.node(),
            hierarchy = table_names.hierarchy(),
            entry_restriction = restriction_clause(visibility_constraints, table_names, ""),
            descend_restriction = restriction_clause(visibility_constraints, table_names, "c"),
        );

        let mut parts = QueryParts::new(text)
            .bind("contentStreamId", content_stream_id.as_str())
            .bind("dimensionSpacePointHash", dimension_space_point.hash())
            .bind("entryNodeAggregateId", entry_node_aggregate_id.as_str());
        if let Some(levels) = maximum_levels {
            parts = parts.bind("maximumLevels", i64::from(levels));
        }
        for (name, value) in parameters {
            parts = match parameter_types.get(&name) {
                Some(parameter_type) => parts.bind_with_type(&name, value, *parameter_type),
                None => parts.bind(&name, value),
            };
        }

        Self { parts }
    }
}

impl CommonGraphQueryOperations for HypergraphSubtreeQuery {
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
    use crate::types::NodeTypeName;

    fn stream() -> ContentStreamId {
        ContentStreamId::new("cs-main").unwrap()
    }

    fn tables() -> HypergraphTableNames {
        HypergraphTableNames::default()
    }

    fn point() -> DimensionSpacePoint {
        DimensionSpacePoint::from_pairs([("language", "en")]).unwrap()
    }

    mod child_query {
        use super::*;

        #[test]
        fn base_joins_the_hierarchy_twice() {
            let parent = NodeAggregateId::new("parent").unwrap();
            let query = HypergraphChildQuery::create(&stream(), &parent, &tables());
            let text = query.query_text();

            assert!(text.contains(
                "JOIN cr_default_p_hypergraph_hierarchyhyperrelation ph ON pn.relationanchorpoint = ANY(ph.childnodeanchors)"
            ));
            assert!(text.contains(
                "JOIN cr_default_p_hypergraph_hierarchyhyperrelation ch ON ch.parentnodeanchor = pn.relationanchorpoint"
            ));
            assert!(text.contains("WHERE pn.nodeaggregateid = :parentNodeAggregateId"));
            assert_eq!(
                query.named_parameters().get("parentNodeAggregateId"),
                Some(&ParameterValue::String("parent".to_string()))
            );
        }

        #[test]
        fn dimension_point_constrains_both_hierarchy_rows() {
            let parent = NodeAggregateId::new("parent").unwrap();
            let query = HypergraphChildQuery::create(&stream(), &parent, &tables())
                .with_dimension_space_point(&point());
            let text = query.query_text();

            assert!(text.contains("ph.dimensionspacepointhash = :dimensionSpacePointHash"));
            assert!(text.contains("ch.dimensionspacepointhash = :dimensionSpacePointHash"));
        }

        #[test]
        fn only_tethered_binds_the_classification() {
            let parent = NodeAggregateId::new("parent").unwrap();
            let query =
                HypergraphChildQuery::create(&stream(), &parent, &tables()).with_only_tethered();

            assert!(query
                .query_text()
                .ends_with("AND cn.classification = :classification"));
            assert_eq!(
                query.named_parameters().get("classification"),
                Some(&ParameterValue::String("tethered".to_string()))
            );
        }

        #[test]
        fn child_name_filters_the_child_alias() {
            let parent = NodeAggregateId::new("parent").unwrap();
            let name = NodeName::new("main").unwrap();
            let query = HypergraphChildQuery::create(&stream(), &parent, &tables())
                .with_child_node_name(&name);

            assert!(query.query_text().ends_with("AND cn.nodename = :childNodeName"));
            assert_eq!(
                query.named_parameters().get("childNodeName"),
                Some(&ParameterValue::String("main".to_string()))
            );
        }

        #[test]
        fn restriction_applies_to_child_aliases() {
            let parent = NodeAggregateId::new("parent").unwrap();
            let query = HypergraphChildQuery::create(&stream(), &parent, &tables())
                .with_restriction(&VisibilityConstraints::frontend(), &tables());
            let text = query.query_text();

            assert!(text.contains("rest.contentstreamid = ch.contentstreamid"));
            assert!(text.contains("cn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        }
    }

    mod parent_query {
        use super::*;

        #[test]
        fn selects_the_parent_aliases() {
            let query = HypergraphParentQuery::create(&stream(), &tables());
            let text = query.query_text();

            assert!(text.starts_with("SELECT pn.origindimensionspacepoint"));
            assert!(text.contains("ph.contentstreamid, ph.dimensionspacepoint"));
        }

        #[test]
        fn child_aggregate_filter_targets_the_child_alias() {
            let child = NodeAggregateId::new("child").unwrap();
            let query = HypergraphParentQuery::create(&stream(), &tables())
                .with_child_node_aggregate_id(&child);

            assert!(query
                .query_text()
                .ends_with("AND cn.nodeaggregateid = :childNodeAggregateId"));
            assert_eq!(
                query.named_parameters().get("childNodeAggregateId"),
                Some(&ParameterValue::String("child".to_string()))
            );
        }

        #[test]
        fn restriction_applies_to_parent_aliases() {
            let query = HypergraphParentQuery::create(&stream(), &tables())
                .with_restriction(&VisibilityConstraints::frontend(), &tables());
            let text = query.query_text();

            assert!(text.contains("rest.contentstreamid = ph.contentstreamid"));
            assert!(text.contains("pn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        }
    }

    mod sibling_query {
        use super::*;

        fn sibling_query(mode: HypergraphSiblingQueryMode) -> HypergraphSiblingQuery {
            let sibling = NodeAggregateId::new("sibling").unwrap();
            HypergraphSiblingQuery::create(&stream(), &point(), &sibling, mode, &tables())
        }

        #[test]
        fn base_unnests_the_anchor_list_with_ordinality() {
            let query = sibling_query(HypergraphSiblingQueryMode::All);
            let text = query.query_text();

            assert!(text.contains("unnest(childnodeanchors) WITH ORDINALITY childnodeanchor"));
            assert!(text.contains("siblings.parentnodeanchor = sh.parentnodeanchor"));
            assert!(text.contains("WHERE n.nodeaggregateid = :siblingNodeAggregateId"));
        }

        #[test]
        fn all_mode_excludes_the_node_itself() {
            let query = sibling_query(HypergraphSiblingQueryMode::All);
            assert!(query
                .query_text()
                .ends_with("AND siblings.childnodeanchor != n.relationanchorpoint"));
        }

        #[test]
        fn preceding_mode_slices_below_the_own_position() {
            let query = sibling_query(HypergraphSiblingQueryMode::OnlyPreceding);
            assert!(query.query_text().ends_with(
                "AND siblings.ordinality < array_position(sh.childnodeanchors, n.relationanchorpoint)"
            ));
            assert!(HypergraphSiblingQueryMode::OnlyPreceding.is_ordering_to_be_reversed());
        }

        #[test]
        fn succeeding_mode_slices_above_the_own_position() {
            let query = sibling_query(HypergraphSiblingQueryMode::OnlySucceeding);
            assert!(query.query_text().ends_with(
                "AND siblings.ordinality > array_position(sh.childnodeanchors, n.relationanchorpoint)"
            ));
            assert!(!HypergraphSiblingQueryMode::OnlySucceeding.is_ordering_to_be_reversed());
        }

        #[test]
        fn ordinality_ordering_follows_the_mode() {
            let preceding = sibling_query(HypergraphSiblingQueryMode::OnlyPreceding)
                .with_ordinality_ordering(
                    HypergraphSiblingQueryMode::OnlyPreceding.is_ordering_to_be_reversed(),
                );
            assert!(preceding
                .query_text()
                .ends_with("ORDER BY siblings.ordinality DESC"));

            let succeeding = sibling_query(HypergraphSiblingQueryMode::OnlySucceeding)
                .with_ordinality_ordering(
                    HypergraphSiblingQueryMode::OnlySucceeding.is_ordering_to_be_reversed(),
                );
            assert!(succeeding
                .query_text()
                .ends_with("ORDER BY siblings.ordinality ASC"));
        }

        #[test]
        fn restriction_applies_to_sibling_aliases() {
            let query = sibling_query(HypergraphSiblingQueryMode::All)
                .with_restriction(&VisibilityConstraints::frontend(), &tables());
            let text = query.query_text();

            assert!(text.contains("rest.contentstreamid = sh.contentstreamid"));
            assert!(text.contains("sn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        }
    }

    mod subtree_query {
        use super::*;

        #[test]
        fn recursion_orders_deepest_level_first_in_sibling_order() {
            let entry = NodeAggregateId::new("entry").unwrap();
            let query = HypergraphSubtreeQuery::create(
                &stream(),
                &point(),
                &entry,
                None,
                None,
                &VisibilityConstraints::without_restrictions(),
                &tables(),
            );
            let text = query.query_text();

            assert!(text.starts_with("WITH RECURSIVE subtree AS ("));
            assert!(text.contains("'ROOT'::varchar AS parentnodeaggregateid"));
            assert!(text.contains("p.level + 1 AS level"));
            assert!(text.ends_with("ORDER BY level DESC, ordinality ASC"));
            assert!(!text.contains(":maximumLevels"));
            assert!(!query.named_parameters().contains_key("maximumLevels"));
        }

        #[test]
        fn maximum_levels_bounds_the_recursive_term() {
            let entry = NodeAggregateId::new("entry").unwrap();
            let query = HypergraphSubtreeQuery::create(
                &stream(),
                &point(),
                &entry,
                Some(2),
                None,
                &VisibilityConstraints::without_restrictions(),
                &tables(),
            );

            assert!(query
                .query_text()
                .contains("AND p.level + 1 <= :maximumLevels"));
            assert_eq!(
                query.named_parameters().get("maximumLevels"),
                Some(&ParameterValue::Int(2))
            );
        }

        #[test]
        fn node_type_criteria_bind_inside_the_recursion() {
            let entry = NodeAggregateId::new("entry").unwrap();
            let criteria = NodeTypeCriteria::new(
                vec![NodeTypeName::new("acme:page").unwrap()],
                Vec::new(),
                false,
            );
            let query = HypergraphSubtreeQuery::create(
                &stream(),
                &point(),
                &entry,
                None,
                Some(&criteria),
                &VisibilityConstraints::without_restrictions(),
                &tables(),
            );

            assert!(query
                .query_text()
                .contains("cn.nodetypename IN (:explicitlyAllowedNodeTypeNames)"));
            assert_eq!(
                query.named_parameters().get("explicitlyAllowedNodeTypeNames"),
                Some(&ParameterValue::StringArray(vec!["acme:page".to_string()]))
            );
            assert_eq!(
                query
                    .parameter_type_hints()
                    .get("explicitlyAllowedNodeTypeNames"),
                Some(&ParameterType::StringArray)
            );
        }

        #[test]
        fn restrictions_cover_entry_and_descent() {
            let entry = NodeAggregateId::new("entry").unwrap();
            let query = HypergraphSubtreeQuery::create(
                &stream(),
                &point(),
                &entry,
                None,
                None,
                &VisibilityConstraints::frontend(),
                &tables(),
            );
            let text = query.query_text();

            assert!(text.contains("n.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
            assert!(text.contains("cn.nodeaggregateid = ANY(rest.affectednodeaggregateids)"));
        }
    }
}
