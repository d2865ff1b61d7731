//! dimension::config
//!
//! Declarative configuration of the dimension space.
//!
//! Dimensions are declared as an array of tables so their declaration
//! order survives parsing; that order is the priority order used for
//! fallback resolution. Values nest through `specializations`, which
//! assigns each value its depth implicitly.
//!
//! # Example
//!
//! ```toml
//! [[dimension]]
//! id = "language"
//! default = "en"
//!
//! [[dimension.values]]
//! value = "en"
//!
//! [[dimension.values.specializations]]
//! value = "en-us"
//!
//! [[dimension]]
//! id = "market"
//! default = "eu"
//!
//! [[dimension.values]]
//! value = "eu"
//! [dimension.values.constraints.language]
//! "*" = true
//! en-us = false
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimension::value::DimensionError;

/// Errors from loading a dimension configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Root of the dimension configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionsConfiguration {
    /// Dimensions in declaration order, which doubles as priority order.
    #[serde(default, rename = "dimension")]
    pub dimensions: Vec<DimensionConfiguration>,
}

impl DimensionsConfiguration {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if reading fails and
    /// `ConfigError::Parse` on malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// A configuration declaring no dimensions at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Declaration of one dimension axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfiguration {
    /// Axis identifier.
    pub id: String,
    /// The default value, which must be declared below.
    pub default: String,
    /// Root values in declaration order.
    #[serde(default)]
    pub values: Vec<ValueConfiguration>,
}

/// Declaration of one value, possibly with nested specializations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueConfiguration {
    /// The value string.
    pub value: String,
    /// Combination constraints keyed by other axis id. Within an axis,
    /// the `"*"` key sets the wildcard default and every other key is a
    /// per-value override.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, BTreeMap<String, bool>>,
    /// Passthrough configuration, carried verbatim.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub config: serde_json::Map<String, serde_json::Value>,
    /// Values one depth level below this one, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specializations: Vec<ValueConfiguration>,
}

impl ValueConfiguration {
    /// Shorthand for a leaf value without constraints or config.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            constraints: BTreeMap::new(),
            config: serde_json::Map::new(),
            specializations: Vec::new(),
        }
    }

    /// Shorthand for a value with the given specializations.
    pub fn with_specializations(
        value: impl Into<String>,
        specializations: Vec<ValueConfiguration>,
    ) -> Self {
        Self {
            value: value.into(),
            constraints: BTreeMap::new(),
            config: serde_json::Map::new(),
            specializations,
        }
    }
}
