//! The loaded feature dataset
//!
//! A [`FeatureCatalog`] is the immutable dataset of one session. It is built
//! once from a JSON payload and then only read: every view the analysis
//! engine produces is derived from [`FeatureCatalog::features`].
//!
//! # Payload shapes
//!
//! The static file holds a bare array. The spreadsheet-backed endpoint may
//! wrap the array in an envelope:
//!
//! ```json
//! [ { "id": 1, ... } ]
//! { "data": [ { "id": 1, ... } ] }
//! { "features": [ { "id": 1, ... } ] }
//! ```
//!
//! An object with neither key yields an empty catalog.
//!
//! # Examples
//!
//! ```
//! use featcat_catalog::FeatureCatalog;
//!
//! let catalog = FeatureCatalog::from_json_str(
//!     r#"{"data": [{"id": 1, "geo": "US"}, {"id": 2, "geo": "PH"}]}"#,
//! )
//! .unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get(2).unwrap().geo, "PH");
//! ```

use std::{collections::HashSet, io::Read};

use serde_json::Value;

use crate::{CatalogError, Feature};

/// Immutable collection of features with unique ids.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

impl FeatureCatalog {
    /// Wraps a feature list, checking id uniqueness.
    pub fn new(features: Vec<Feature>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(features.len());
        for feature in &features {
            if !seen.insert(feature.id) {
                return Err(CatalogError::DuplicateId { id: feature.id });
            }
        }
        Ok(Self { features })
    }

    /// Parses a payload in any of the accepted shapes.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let list = match value {
            Value::Array(_) => value,
            Value::Object(mut map) => match map.remove("data").filter(|v| !v.is_null()) {
                Some(data) => data,
                None => map.remove("features").unwrap_or(Value::Null),
            },
            _ => Value::Null,
        };
        let features = if list.is_null() {
            tracing::debug!("feature payload has no recognizable list, using empty catalog");
            vec![]
        } else {
            serde_json::from_value::<Vec<Feature>>(list)?
        };
        tracing::debug!(count = features.len(), "parsed feature payload");
        Self::new(features)
    }

    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, CatalogError>
    where
        R: Read,
    {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up a feature by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let catalog = FeatureCatalog::from_json_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_features_envelope() {
        let catalog = FeatureCatalog::from_json_str(r#"{"features": [{"id": 9}]}"#).unwrap();
        assert_eq!(catalog.features()[0].id, 9);
    }

    #[test]
    fn test_data_takes_precedence_over_features() {
        let catalog =
            FeatureCatalog::from_json_str(r#"{"data": [], "features": [{"id": 9}]}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unrecognized_object_is_empty() {
        let catalog = FeatureCatalog::from_json_str(r#"{"rows": [{"id": 1}]}"#).unwrap();
        assert!(catalog.is_empty());
        let catalog = FeatureCatalog::from_json_str("42").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = FeatureCatalog::from_json_str(r#"[{"id": 3}, {"id": 3}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: 3 }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = FeatureCatalog::from_json_str("[{").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_get_missing() {
        let catalog = FeatureCatalog::default();
        assert!(catalog.get(1).is_none());
        assert!(catalog.into_features().is_empty());
    }
}
