//! hypergraph
//!
//! The hypergraph projection model and its query builders.
//!
//! # Modules
//!
//! - [`schema`] - Prefixed table names
//! - [`node`] - The materialized node row
//! - [`relation`] - Hierarchy, restriction, and reference relations
//! - [`query`] - The immutable builder core and the generic node query
//! - [`children`] - Child, parent, sibling, and subtree traversal
//! - [`reference`] - Reference traversal in both directions
//! - [`filters`] - Node type allow/disallow criteria
//! - [`restriction`] - Visibility constraints and their clause
//!
//! # Design Principles
//!
//! - Query builders are immutable values; extending one never mutates
//!   the receiver, so base queries can be shared across branches
//! - Sibling order is carried by the ordered child anchor list and
//!   surfaced through `WITH ORDINALITY`; slicing semantics also exist
//!   as pure in-memory operations on [`HierarchyHyperrelation`]
//! - Visibility filtering is rendered by exactly one clause function
//!   and one criteria truth table, shared by every query shape

pub mod children;
pub mod filters;
pub mod node;
pub mod query;
pub mod reference;
pub mod relation;
pub mod restriction;
pub mod schema;

pub use children::{
    HypergraphChildQuery, HypergraphParentQuery, HypergraphSiblingQuery,
    HypergraphSiblingQueryMode, HypergraphSubtreeQuery,
};
pub use filters::NodeTypeCriteria;
pub use node::NodeRecord;
pub use query::{
    CommonGraphQueryOperations, HypergraphCountQuery, HypergraphQuery, ParameterType,
    ParameterValue, QueryParts,
};
pub use reference::HypergraphReferenceQuery;
pub use relation::{
    HierarchyHyperrelation, ReferenceRelation, RelationError, RestrictionHyperrelation,
};
pub use restriction::VisibilityConstraints;
pub use schema::HypergraphTableNames;
