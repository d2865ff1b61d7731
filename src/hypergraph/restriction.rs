//! hypergraph::restriction
//!
//! Visibility constraints and the restriction subquery they render to.
//!
//! A restriction hyperrelation marks a set of node aggregates as hidden
//! in one content stream and dimension coordinate. Queries that must
//! not show hidden content exclude every node whose aggregate id
//! appears in a matching restriction row.

use serde::{Deserialize, Serialize};

use crate::hypergraph::schema::HypergraphTableNames;

/// Whether a query may return content marked as hidden.
///
/// # Example
///
/// ```
/// use manifold::hypergraph::VisibilityConstraints;
///
/// assert!(!VisibilityConstraints::frontend().is_disabled_content_shown());
/// assert!(VisibilityConstraints::without_restrictions().is_disabled_content_shown());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConstraints {
    disabled_content_shown: bool,
}

impl VisibilityConstraints {
    /// Hidden content stays hidden.
    pub fn frontend() -> Self {
        Self {
            disabled_content_shown: false,
        }
    }

    /// Hidden content is returned too.
    pub fn without_restrictions() -> Self {
        Self {
            disabled_content_shown: true,
        }
    }

    /// Whether hidden content may be returned.
    pub fn is_disabled_content_shown(&self) -> bool {
        self.disabled_content_shown
    }
}

/// The clause excluding nodes hidden by a restriction row, or the empty
/// string when the constraints show disabled content.
///
/// `alias_prefix` is prepended to the `h` and `n` aliases so the clause
/// can attach to differently named joins (`""` for `h`/`n`, `"c"` for
/// `ch`/`cn`, `"src"` for `srch`/`srcn`).
pub fn restriction_clause(
    visibility_constraints: &VisibilityConstraints,
    table_names: &HypergraphTableNames,
    alias_prefix: &str,
) -> String {
    if visibility_constraints.is_disabled_content_shown() {
        return String::new();
    }
    format!(
        "\nAND NOT EXISTS (\n    SELECT 1\n    FROM {restriction} rest\n    WHERE rest.contentstreamid = {prefix}h.contentstreamid\n    AND rest.dimensionspacepointhash = {prefix}h.dimensionspacepointhash\n    AND {prefix}n.nodeaggregateid = ANY(rest.affectednodeaggregateids)\n)",
        restriction = table_names.restriction(),
        prefix = alias_prefix,
    )
}
