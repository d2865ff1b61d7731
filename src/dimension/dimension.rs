//! dimension::dimension
//!
//! A single content dimension axis: an ordered set of values forming a
//! forest, where each value has at most one direct generalization.
//!
//! # Architecture
//!
//! The constructor validates the whole axis up front (value uniqueness,
//! edge endpoints, single-generalization rule) and precomputes the
//! lookup maps used for navigation. After construction the axis is
//! immutable, so every accessor is infallible or returns an `Option`.
//!
//! # Invariants
//!
//! - Values keep their declaration order.
//! - Every value has at most one direct generalization.
//! - `maximum_depth` is the largest specialization depth of any value.

use std::collections::BTreeMap;

use crate::dimension::value::{
    ContentDimensionId, ContentDimensionValue, ContentDimensionValueVariationEdge, DimensionError,
};

/// One axis of the dimension space.
///
/// # Example
///
/// ```
/// use manifold::dimension::{
///     ContentDimension, ContentDimensionId, ContentDimensionValue,
///     ContentDimensionValueVariationEdge,
/// };
///
/// let en = ContentDimensionValue::plain("en", 0).unwrap();
/// let en_us = ContentDimensionValue::plain("en-us", 1).unwrap();
/// let edge = ContentDimensionValueVariationEdge::new(&en_us, &en).unwrap();
///
/// let dimension = ContentDimension::new(
///     ContentDimensionId::new("language").unwrap(),
///     vec![en, en_us],
///     vec![edge],
///     "en",
/// )
/// .unwrap();
///
/// assert_eq!(dimension.maximum_depth(), 1);
/// assert_eq!(dimension.default_value().value(), "en");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDimension {
    id: ContentDimensionId,
    values: Vec<ContentDimensionValue>,
    index: BTreeMap<String, usize>,
    generalizations: BTreeMap<String, String>,
    specializations: BTreeMap<String, Vec<String>>,
    default_value: String,
    maximum_depth: u32,
}

impl ContentDimension {
    /// Create and validate a dimension axis.
    ///
    /// Values keep the order they are passed in. Edges connect each
    /// specialization to its single direct generalization.
    ///
    /// # Errors
    ///
    /// - `ValuesAreMissing` if no values are given
    /// - `DuplicateValue` if a value string appears twice
    /// - `DefaultValueIsUnknown` if the default is not among the values
    /// - `EdgeValueIsUnknown` if an edge endpoint is not among the values
    /// - `MultipleGeneralizations` if two edges leave the same value
    pub fn new(
        id: ContentDimensionId,
        values: Vec<ContentDimensionValue>,
        edges: Vec<ContentDimensionValueVariationEdge>,
        default_value: &str,
    ) -> Result<Self, DimensionError> {
        if values.is_empty() {
            return Err(DimensionError::ValuesAreMissing(id.as_str().to_string()));
        }

        let mut index = BTreeMap::new();
        let mut maximum_depth = 0;
        for (position, value) in values.iter().enumerate() {
            if index.insert(value.value().to_string(), position).is_some() {
                return Err(DimensionError::DuplicateValue {
                    dimension: id.as_str().to_string(),
                    value: value.value().to_string(),
                });
            }
            maximum_depth = maximum_depth.max(value.specialization_depth());
        }

        if !index.contains_key(default_value) {
            return Err(DimensionError::DefaultValueIsUnknown {
                dimension: id.as_str().to_string(),
                value: default_value.to_string(),
            });
        }

        let mut generalizations = BTreeMap::new();
        let mut specializations: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for edge in &edges {
            for endpoint in [edge.specialization(), edge.generalization()] {
                if !index.contains_key(endpoint) {
                    return Err(DimensionError::EdgeValueIsUnknown(endpoint.to_string()));
                }
            }
            if generalizations
                .insert(
                    edge.specialization().to_string(),
                    edge.generalization().to_string(),
                )
                .is_some()
            {
                return Err(DimensionError::MultipleGeneralizations(
                    edge.specialization().to_string(),
                ));
            }
            specializations
                .entry(edge.generalization().to_string())
                .or_default()
                .push(edge.specialization().to_string());
        }

        Ok(Self {
            id,
            values,
            index,
            generalizations,
            specializations,
            default_value: default_value.to_string(),
            maximum_depth,
        })
    }

    /// The axis identifier.
    pub fn id(&self) -> &ContentDimensionId {
        &self.id
    }

    /// All values in declaration order.
    pub fn values(&self) -> &[ContentDimensionValue] {
        &self.values
    }

    /// Look up a value by its string.
    pub fn get_value(&self, value: &str) -> Option<&ContentDimensionValue> {
        self.index.get(value).map(|position| &self.values[*position])
    }

    /// The configured default value.
    pub fn default_value(&self) -> &ContentDimensionValue {
        // Presence is validated in the constructor.
        &self.values[self.index[&self.default_value]]
    }

    /// The largest specialization depth of any value.
    pub fn maximum_depth(&self) -> u32 {
        self.maximum_depth
    }

    /// All values without a generalization, in declaration order.
    pub fn root_values(&self) -> Vec<&ContentDimensionValue> {
        self.values
            .iter()
            .filter(|value| !self.generalizations.contains_key(value.value()))
            .collect()
    }

    /// The direct generalization of a value, if it has one.
    pub fn generalization(&self, value: &ContentDimensionValue) -> Option<&ContentDimensionValue> {
        self.generalizations
            .get(value.value())
            .and_then(|general| self.get_value(general))
    }

    /// The direct specializations of a value, in declaration order.
    pub fn specializations(&self, value: &ContentDimensionValue) -> Vec<&ContentDimensionValue> {
        self.specializations
            .get(value.value())
            .map(|specials| {
                specials
                    .iter()
                    .filter_map(|special| self.get_value(special))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of generalization steps from `specialization` up to
    /// `generalization`, or `None` if the latter is not an ancestor.
    ///
    /// A value is at distance 0 from itself.
    pub fn generalization_distance(
        &self,
        specialization: &ContentDimensionValue,
        generalization: &ContentDimensionValue,
    ) -> Option<u32> {
        let mut distance = 0;
        let mut current = specialization;
        loop {
            if current.value() == generalization.value() {
                return Some(distance);
            }
            current = self.generalization(current)?;
            distance += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language_axis() -> ContentDimension {
        let en = ContentDimensionValue::plain("en", 0).unwrap();
        let en_us = ContentDimensionValue::plain("en-us", 1).unwrap();
        let en_us_ca = ContentDimensionValue::plain("en-us-ca", 2).unwrap();
        let de = ContentDimensionValue::plain("de", 0).unwrap();

        let edges = vec![
            ContentDimensionValueVariationEdge::new(&en_us, &en).unwrap(),
            ContentDimensionValueVariationEdge::new(&en_us_ca, &en_us).unwrap(),
        ];

        ContentDimension::new(
            ContentDimensionId::new("language").unwrap(),
            vec![en, en_us, en_us_ca, de],
            edges,
            "en",
        )
        .unwrap()
    }

    #[test]
    fn values_keep_declaration_order() {
        let axis = language_axis();
        let ordered: Vec<&str> = axis.values().iter().map(|v| v.value()).collect();
        assert_eq!(ordered, vec!["en", "en-us", "en-us-ca", "de"]);
    }

    #[test]
    fn maximum_depth_is_deepest_value() {
        assert_eq!(language_axis().maximum_depth(), 2);
    }

    #[test]
    fn root_values_have_no_generalization() {
        let axis = language_axis();
        let roots: Vec<&str> = axis.root_values().iter().map(|v| v.value()).collect();
        assert_eq!(roots, vec!["en", "de"]);
    }

    #[test]
    fn generalization_walks_one_level() {
        let axis = language_axis();
        let en_us_ca = axis.get_value("en-us-ca").unwrap();
        let en_us = axis.generalization(en_us_ca).unwrap();
        assert_eq!(en_us.value(), "en-us");
        let en = axis.generalization(en_us).unwrap();
        assert_eq!(en.value(), "en");
        assert!(axis.generalization(en).is_none());
    }

    #[test]
    fn specializations_are_direct_children() {
        let axis = language_axis();
        let en = axis.get_value("en").unwrap();
        let children: Vec<&str> = axis.specializations(en).iter().map(|v| v.value()).collect();
        assert_eq!(children, vec!["en-us"]);
    }

    #[test]
    fn generalization_distance_counts_steps() {
        let axis = language_axis();
        let en = axis.get_value("en").unwrap();
        let en_us_ca = axis.get_value("en-us-ca").unwrap();
        let de = axis.get_value("de").unwrap();

        assert_eq!(axis.generalization_distance(en_us_ca, en), Some(2));
        assert_eq!(axis.generalization_distance(en_us_ca, en_us_ca), Some(0));
        assert_eq!(axis.generalization_distance(en_us_ca, de), None);
        assert_eq!(axis.generalization_distance(en, en_us_ca), None);
    }

    #[test]
    fn empty_axis_rejected() {
        let result = ContentDimension::new(
            ContentDimensionId::new("language").unwrap(),
            vec![],
            vec![],
            "en",
        );
        assert_eq!(
            result,
            Err(DimensionError::ValuesAreMissing("language".to_string()))
        );
    }

    #[test]
    fn duplicate_value_rejected() {
        let result = ContentDimension::new(
            ContentDimensionId::new("language").unwrap(),
            vec![
                ContentDimensionValue::plain("en", 0).unwrap(),
                ContentDimensionValue::plain("en", 0).unwrap(),
            ],
            vec![],
            "en",
        );
        assert!(matches!(result, Err(DimensionError::DuplicateValue { .. })));
    }

    #[test]
    fn unknown_default_rejected() {
        let result = ContentDimension::new(
            ContentDimensionId::new("language").unwrap(),
            vec![ContentDimensionValue::plain("en", 0).unwrap()],
            vec![],
            "fr",
        );
        assert!(matches!(
            result,
            Err(DimensionError::DefaultValueIsUnknown { .. })
        ));
    }

    #[test]
    fn second_generalization_rejected() {
        let en = ContentDimensionValue::plain("en", 0).unwrap();
        let de = ContentDimensionValue::plain("de", 0).unwrap();
        let en_us = ContentDimensionValue::plain("en-us", 1).unwrap();

        let edges = vec![
            ContentDimensionValueVariationEdge::new(&en_us, &en).unwrap(),
            ContentDimensionValueVariationEdge::new(&en_us, &de).unwrap(),
        ];

        let result = ContentDimension::new(
            ContentDimensionId::new("language").unwrap(),
            vec![en, de, en_us],
            edges,
            "en",
        );
        assert_eq!(
            result,
            Err(DimensionError::MultipleGeneralizations("en-us".to_string()))
        );
    }
}
