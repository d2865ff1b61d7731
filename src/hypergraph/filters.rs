//! hypergraph::filters
//!
//! Node type allow/disallow filtering.
//!
//! The combined filter is visibility relevant, so its truth table is
//! fixed:
//!
//! - allow-set and disallow-set both non-empty, wildcard allowed:
//!   `(NOT IN disallow) OR (IN allow)`
//! - allow-set and disallow-set both non-empty, wildcard disallowed:
//!   `(IN allow) AND (NOT IN disallow)`
//! - only allow-set non-empty: `IN allow`, unless the wildcard already
//!   permits everything, in which case no filter applies
//! - only disallow-set non-empty: `NOT IN disallow`
//! - neither set given: no filter
//!
//! The same logic exists twice: rendered as a SQL clause and as the
//! in-memory [`NodeTypeCriteria::matches`], so it stays testable
//! without a database.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hypergraph::query::{ParameterType, ParameterValue};
use crate::types::NodeTypeName;

/// An expanded node type filter: explicit allow and disallow sets plus
/// a wildcard default for everything unnamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeCriteria {
    explicitly_allowed: Vec<NodeTypeName>,
    explicitly_disallowed: Vec<NodeTypeName>,
    wildcard_allowed: bool,
}

impl NodeTypeCriteria {
    /// Create a filter from explicit sets and the wildcard default.
    pub fn new(
        explicitly_allowed: Vec<NodeTypeName>,
        explicitly_disallowed: Vec<NodeTypeName>,
        wildcard_allowed: bool,
    ) -> Self {
        Self {
            explicitly_allowed,
            explicitly_disallowed,
            wildcard_allowed,
        }
    }

    /// The explicitly allowed type names.
    pub fn explicitly_allowed(&self) -> &[NodeTypeName] {
        &self.explicitly_allowed
    }

    /// The explicitly disallowed type names.
    pub fn explicitly_disallowed(&self) -> &[NodeTypeName] {
        &self.explicitly_disallowed
    }

    /// Whether unnamed types pass the filter.
    pub fn is_wildcard_allowed(&self) -> bool {
        self.wildcard_allowed
    }

    /// The in-memory twin of the rendered SQL clause.
    pub fn matches(&self, node_type_name: &NodeTypeName) -> bool {
        let allowed = self.explicitly_allowed.contains(node_type_name);
        let disallowed = self.explicitly_disallowed.contains(node_type_name);

        match (
            self.explicitly_allowed.is_empty(),
            self.explicitly_disallowed.is_empty(),
        ) {
            (false, false) => {
                if self.wildcard_allowed {
                    !disallowed || allowed
                } else {
                    allowed && !disallowed
                }
            }
            (false, true) => self.wildcard_allowed || allowed,
            (true, false) => !disallowed,
            (true, true) => true,
        }
    }
}

/// Render the filter as a SQL clause against `alias.nodetypename`,
/// binding the referenced array parameters.
///
/// Returns the empty string when no filter applies; parameters are
/// only bound when the clause references them.
pub fn node_type_criteria_clause(
    criteria: &NodeTypeCriteria,
    alias: &str,
    parameters: &mut BTreeMap<String, ParameterValue>,
    parameter_types: &mut BTreeMap<String, ParameterType>,
) -> String {
    let allowance = (!criteria.explicitly_allowed.is_empty())
        .then(|| format!("{alias}.nodetypename IN (:explicitlyAllowedNodeTypeNames)"));
    let denial = (!criteria.explicitly_disallowed.is_empty())
        .then(|| format!("{alias}.nodetypename NOT IN (:explicitlyDisallowedNodeTypeNames)"));

    let bind_allowed = |parameters: &mut BTreeMap<String, ParameterValue>,
                            parameter_types: &mut BTreeMap<String, ParameterType>| {
        parameters.insert(
            "explicitlyAllowedNodeTypeNames".to_string(),
            ParameterValue::StringArray(
                criteria
                    .explicitly_allowed
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
            ),
        );
        parameter_types.insert(
            "explicitlyAllowedNodeTypeNames".to_string(),
            ParameterType::StringArray,
        );
    };
    let bind_disallowed = |parameters: &mut BTreeMap<String, ParameterValue>,
                           parameter_types: &mut BTreeMap<String, ParameterType>| {
        parameters.insert(
            "explicitlyDisallowedNodeTypeNames".to_string(),
            ParameterValue::StringArray(
                criteria
                    .explicitly_disallowed
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
            ),
        );
        parameter_types.insert(
            "explicitlyDisallowedNodeTypeNames".to_string(),
            ParameterType::StringArray,
        );
    };

    match (allowance, denial) {
        (Some(allowance), Some(denial)) => {
            bind_allowed(parameters, parameter_types);
            bind_disallowed(parameters, parameter_types);
            if criteria.wildcard_allowed {
                format!("\nAND ({denial} OR {allowance})")
            } else {
                format!("\nAND ({allowance} AND {denial})")
            }
        }
        (Some(allowance), None) => {
            if criteria.wildcard_allowed {
                // The wildcard already permits everything.
                String::new()
            } else {
                bind_allowed(parameters, parameter_types);
                format!("\nAND {allowance}")
            }
        }
        (None, Some(denial)) => {
            bind_disallowed(parameters, parameter_types);
            format!("\nAND {denial}")
        }
        (None, None) => String::new(),
    }
}
