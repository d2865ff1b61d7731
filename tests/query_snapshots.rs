//! Snapshot tests pinning the rendered SQL of the hypergraph query
//! builders.
//!
//! The unit tests assert individual clauses; these snapshots pin the
//! complete composed statements so an accidental reordering or
//! whitespace change in any builder shows up as a reviewable diff.

use manifold::dimensionspace::DimensionSpacePoint;
use manifold::hypergraph::{
    CommonGraphQueryOperations, HypergraphChildQuery, HypergraphCountQuery, HypergraphQuery,
    HypergraphReferenceQuery, HypergraphSiblingQuery, HypergraphSiblingQueryMode,
    HypergraphSubtreeQuery, HypergraphTableNames, NodeTypeCriteria, VisibilityConstraints,
};
use manifold::types::{ContentStreamId, NodeAggregateId, NodeTypeName, ReferenceName};

fn stream() -> ContentStreamId {
    ContentStreamId::new("cs-main").unwrap()
}

fn tables() -> HypergraphTableNames {
    HypergraphTableNames::default()
}

fn point() -> DimensionSpacePoint {
    DimensionSpacePoint::from_pairs([("language", "en")]).unwrap()
}

#[test]
fn generic_query_with_restriction_join_and_pagination() {
    let query = HypergraphQuery::create(&stream(), &tables(), true)
        .with_dimension_space_point(&point())
        .with_node_type_name(&NodeTypeName::new("acme:document").unwrap())
        .with_limit(10)
        .with_offset(20);

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT n.origindimensionspacepoint, n.nodeaggregateid, n.nodetypename,
    n.classification, n.properties, n.nodename,
    h.contentstreamid, h.dimensionspacepoint,
    r.dimensionspacepointhash AS disableddimensionspacepointhash
FROM cr_default_p_hypergraph_hierarchyhyperrelation h
JOIN cr_default_p_hypergraph_node n ON n.relationanchorpoint = ANY(h.childnodeanchors)
LEFT JOIN cr_default_p_hypergraph_restrictionhyperrelation r
    ON n.nodeaggregateid = ANY(r.affectednodeaggregateids)
    AND r.contentstreamid = h.contentstreamid
    AND r.dimensionspacepointhash = h.dimensionspacepointhash
WHERE h.contentstreamid = :contentStreamId
AND h.dimensionspacepointhash = :dimensionSpacePointHash
AND n.nodetypename = :nodeTypeName
LIMIT 10
OFFSET 20
"#);

    let parameters = query.named_parameters();
    assert_eq!(
        parameters.keys().collect::<Vec<_>>(),
        vec!["contentStreamId", "dimensionSpacePointHash", "nodeTypeName"]
    );
}

#[test]
fn child_query_with_coordinate_and_frontend_visibility() {
    let parent = NodeAggregateId::new("parent").unwrap();
    let query = HypergraphChildQuery::create(&stream(), &parent, &tables())
        .with_dimension_space_point(&point())
        .with_restriction(&VisibilityConstraints::frontend(), &tables());

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT cn.origindimensionspacepoint, cn.nodeaggregateid, cn.nodetypename,
    cn.classification, cn.properties, cn.nodename,
    ch.contentstreamid, ch.dimensionspacepoint
FROM cr_default_p_hypergraph_node pn
JOIN cr_default_p_hypergraph_hierarchyhyperrelation ph ON pn.relationanchorpoint = ANY(ph.childnodeanchors)
JOIN cr_default_p_hypergraph_hierarchyhyperrelation ch ON ch.parentnodeanchor = pn.relationanchorpoint
JOIN cr_default_p_hypergraph_node cn ON cn.relationanchorpoint = ANY(ch.childnodeanchors)
WHERE pn.nodeaggregateid = :parentNodeAggregateId
AND ph.contentstreamid = :contentStreamId
AND ch.contentstreamid = :contentStreamId
AND ph.dimensionspacepointhash = :dimensionSpacePointHash
AND ch.dimensionspacepointhash = :dimensionSpacePointHash
AND NOT EXISTS (
    SELECT 1
    FROM cr_default_p_hypergraph_restrictionhyperrelation rest
    WHERE rest.contentstreamid = ch.contentstreamid
    AND rest.dimensionspacepointhash = ch.dimensionspacepointhash
    AND cn.nodeaggregateid = ANY(rest.affectednodeaggregateids)
)
"#);
}

#[test]
fn succeeding_sibling_query_in_sibling_order() {
    let sibling = NodeAggregateId::new("sibling").unwrap();
    let mode = HypergraphSiblingQueryMode::OnlySucceeding;
    let query = HypergraphSiblingQuery::create(&stream(), &point(), &sibling, mode, &tables())
        .with_ordinality_ordering(mode.is_ordering_to_be_reversed());

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT sn.origindimensionspacepoint, sn.nodeaggregateid, sn.nodetypename,
    sn.classification, sn.properties, sn.nodename,
    sh.contentstreamid, sh.dimensionspacepoint
FROM cr_default_p_hypergraph_node n
JOIN cr_default_p_hypergraph_hierarchyhyperrelation sh ON n.relationanchorpoint = ANY(sh.childnodeanchors)
JOIN (
    SELECT *
    FROM cr_default_p_hypergraph_hierarchyhyperrelation,
        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor
) siblings
    ON siblings.parentnodeanchor = sh.parentnodeanchor
    AND siblings.contentstreamid = sh.contentstreamid
    AND siblings.dimensionspacepointhash = sh.dimensionspacepointhash
JOIN cr_default_p_hypergraph_node sn ON sn.relationanchorpoint = siblings.childnodeanchor
WHERE n.nodeaggregateid = :siblingNodeAggregateId
AND sh.contentstreamid = :contentStreamId
AND sh.dimensionspacepointhash = :dimensionSpacePointHash
AND siblings.ordinality > array_position(sh.childnodeanchors, n.relationanchorpoint)
ORDER BY siblings.ordinality ASC
"#);
}

#[test]
fn bounded_subtree_query_with_criteria_and_frontend_visibility() {
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
        Some(2),
        Some(&criteria),
        &VisibilityConstraints::frontend(),
        &tables(),
    );

    insta::assert_snapshot!(query.query_text(), @r#"
WITH RECURSIVE subtree AS (
SELECT n.*, h.contentstreamid, h.dimensionspacepoint,
    'ROOT'::varchar AS parentnodeaggregateid,
    0 AS level,
    h.ordinality
FROM cr_default_p_hypergraph_node n
INNER JOIN (
    SELECT *
    FROM cr_default_p_hypergraph_hierarchyhyperrelation,
        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor
) h ON n.relationanchorpoint = h.childnodeanchor
WHERE n.nodeaggregateid = :entryNodeAggregateId
AND h.contentstreamid = :contentStreamId
AND h.dimensionspacepointhash = :dimensionSpacePointHash
AND NOT EXISTS (
    SELECT 1
    FROM cr_default_p_hypergraph_restrictionhyperrelation rest
    WHERE rest.contentstreamid = h.contentstreamid
    AND rest.dimensionspacepointhash = h.dimensionspacepointhash
    AND n.nodeaggregateid = ANY(rest.affectednodeaggregateids)
)
UNION ALL
SELECT cn.*, ch.contentstreamid, ch.dimensionspacepoint,
    p.nodeaggregateid AS parentnodeaggregateid,
    p.level + 1 AS level,
    ch.ordinality
FROM subtree p
INNER JOIN (
    SELECT *
    FROM cr_default_p_hypergraph_hierarchyhyperrelation,
        unnest(childnodeanchors) WITH ORDINALITY childnodeanchor
) ch ON ch.parentnodeanchor = p.relationanchorpoint
INNER JOIN cr_default_p_hypergraph_node cn ON cn.relationanchorpoint = ch.childnodeanchor
WHERE ch.contentstreamid = :contentStreamId
AND ch.dimensionspacepointhash = :dimensionSpacePointHash
AND p.level + 1 <= :maximumLevels
AND NOT EXISTS (
    SELECT 1
    FROM cr_default_p_hypergraph_restrictionhyperrelation rest
    WHERE rest.contentstreamid = ch.contentstreamid
    AND rest.dimensionspacepointhash = ch.dimensionspacepointhash
    AND cn.nodeaggregateid = ANY(rest.affectednodeaggregateids)
)
AND cn.nodetypename IN (:explicitlyAllowedNodeTypeNames)
)
SELECT * FROM subtree
ORDER BY level DESC, ordinality ASC
"#);
}

#[test]
fn outgoing_reference_query_with_ordering() {
    let source = NodeAggregateId::new("source").unwrap();
    let name = ReferenceName::new("related").unwrap();
    let query = HypergraphReferenceQuery::create(
        &stream(),
        "tarn.*, r.name, tarh.contentstreamid, tarh.dimensionspacepoint",
        &tables(),
    )
    .with_dimension_space_point(&point())
    .with_source_node_aggregate_id(&source)
    .with_reference_name(&name)
    .with_target_restriction(&VisibilityConstraints::frontend(), &tables())
    .ordered_by(&["r.name", "r.position"]);

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT tarn.*, r.name, tarh.contentstreamid, tarh.dimensionspacepoint
FROM cr_default_p_hypergraph_hierarchyhyperrelation srch
JOIN cr_default_p_hypergraph_node srcn ON srcn.relationanchorpoint = ANY(srch.childnodeanchors)
JOIN cr_default_p_hypergraph_referencerelation r ON r.sourcenodeanchor = srcn.relationanchorpoint
JOIN cr_default_p_hypergraph_node tarn ON r.targetnodeaggregateid = tarn.nodeaggregateid
JOIN cr_default_p_hypergraph_hierarchyhyperrelation tarh ON tarn.relationanchorpoint = ANY(tarh.childnodeanchors)
WHERE srch.contentstreamid = :contentStreamId
AND tarh.contentstreamid = :contentStreamId
AND srch.dimensionspacepointhash = :dimensionSpacePointHash
AND tarh.dimensionspacepointhash = :dimensionSpacePointHash
AND srcn.nodeaggregateid = :sourceNodeAggregateId
AND r.name = :referenceName
AND NOT EXISTS (
    SELECT 1
    FROM cr_default_p_hypergraph_restrictionhyperrelation rest
    WHERE rest.contentstreamid = tarh.contentstreamid
    AND rest.dimensionspacepointhash = tarh.dimensionspacepointhash
    AND tarn.nodeaggregateid = ANY(rest.affectednodeaggregateids)
)
ORDER BY r.name, r.position
"#);
}

#[test]
fn count_wrapping_keeps_the_inner_statement_intact() {
    let query = HypergraphQuery::create(&stream(), &tables(), false)
        .with_dimension_space_point(&point())
        .to_count_query();

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT COUNT(*) FROM (
SELECT n.origindimensionspacepoint, n.nodeaggregateid, n.nodetypename,
    n.classification, n.properties, n.nodename,
    h.contentstreamid, h.dimensionspacepoint
FROM cr_default_p_hypergraph_hierarchyhyperrelation h
JOIN cr_default_p_hypergraph_node n ON n.relationanchorpoint = ANY(h.childnodeanchors)
WHERE h.contentstreamid = :contentStreamId
AND h.dimensionspacepointhash = :dimensionSpacePointHash
) countable
"#);
}

#[test]
fn table_names_follow_the_configured_prefix() {
    let tables = HypergraphTableNames::new("cr_blog_p_hypergraph");
    let query = HypergraphCountQuery::all_nodes(&stream(), &point(), &tables);

    insta::assert_snapshot!(query.query_text(), @r#"
SELECT COUNT(*)
FROM cr_blog_p_hypergraph_hierarchyhyperrelation h
JOIN cr_blog_p_hypergraph_node n ON n.relationanchorpoint = ANY(h.childnodeanchors)
WHERE h.contentstreamid = :contentStreamId
AND h.dimensionspacepointhash = :dimensionSpacePointHash
"#);
}
