//! hypergraph::schema
//!
//! Table naming for the hypergraph read model.
//!
//! All four tables share a configurable prefix so multiple graphs can
//! live in one database.

use serde::{Deserialize, Serialize};

/// Names of the four hypergraph tables under a common prefix.
///
/// # Example
///
/// ```
/// use manifold::hypergraph::HypergraphTableNames;
///
/// let tables = HypergraphTableNames::new("cr_default_p_hypergraph");
/// assert_eq!(tables.node(), "cr_default_p_hypergraph_node");
/// assert_eq!(
///     tables.hierarchy(),
///     "cr_default_p_hypergraph_hierarchyhyperrelation"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypergraphTableNames {
    prefix: String,
}

impl HypergraphTableNames {
    /// Table names under the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The shared prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Node rows.
    pub fn node(&self) -> String {
        format!("{}_node", self.prefix)
    }

    /// Hierarchy hyperrelation rows, one ordered sibling set each.
    pub fn hierarchy(&self) -> String {
        format!("{}_hierarchyhyperrelation", self.prefix)
    }

    /// Restriction hyperrelation rows marking hidden subtrees.
    pub fn restriction(&self) -> String {
        format!("{}_restrictionhyperrelation", self.prefix)
    }

    /// Reference relation rows.
    pub fn reference(&self) -> String {
        format!("{}_referencerelation", self.prefix)
    }
}

impl Default for HypergraphTableNames {
    fn default() -> Self {
        Self::new("cr_default_p_hypergraph")
    }
}
