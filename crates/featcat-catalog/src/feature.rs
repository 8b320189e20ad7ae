//! Feature records and their categorical fields
//!
//! A [`Feature`] describes one machine-learning model input: where it is
//! used (geo, product, model, user type), how it is classified (four nested
//! taxonomy levels), and how important it is (SHAP rank, top-N flag).
//!
//! # Unset values
//!
//! Every string field may be empty. An empty string means "unset" and is
//! never a taxonomy value of its own: grouping code files such records under
//! the [`UNKNOWN`] label instead.
//!
//! # Field access
//!
//! Code that works over "any categorical field" goes through [`FilterKey`]
//! and [`Feature::field`], an explicit `match` over the known key set.
//!
//! ```
//! use featcat_catalog::{Feature, FilterKey};
//!
//! let feature = Feature {
//!     id: 1,
//!     geo: "US".into(),
//!     ..Feature::default()
//! };
//! assert_eq!(feature.field(FilterKey::Geo), "US");
//! assert_eq!(feature.field(FilterKey::ModelName), "");
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ParseFilterKeyError, lenient};

/// Label under which unset field values are grouped.
pub const UNKNOWN: &str = "Unknown";

/// Returns `value`, or [`UNKNOWN`] when it is empty.
#[must_use]
pub fn or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}

/// A single model input feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable identifier, unique within a catalog
    #[serde(deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub model_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub geo: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product_business: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub feature_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub primary_category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub feature_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub feature_subtype: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub feature_l3: String,
    /// Top-N membership flag (e.g. `"Top 20"`); empty when not ranked
    #[serde(default, deserialize_with = "lenient::string")]
    pub top_20_50: String,
    /// Importance rank from model explainability; lower is more important
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub shap_rank: Option<f64>,
}

impl Feature {
    /// Value of a categorical field.
    #[must_use]
    pub fn field(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::ModelName => &self.model_name,
            FilterKey::UserType => &self.user_type,
            FilterKey::Geo => &self.geo,
            FilterKey::ProductBusiness => &self.product_business,
            FilterKey::PrimaryCategory => &self.primary_category,
            FilterKey::FeatureType => &self.feature_type,
            FilterKey::FeatureSubtype => &self.feature_subtype,
            FilterKey::FeatureL3 => &self.feature_l3,
            FilterKey::TopRank => &self.top_20_50,
        }
    }

    /// Whether the record carries a top-N flag.
    #[must_use]
    pub fn is_top_ranked(&self) -> bool {
        !self.top_20_50.is_empty()
    }

    /// SHAP rank usable for threshold filtering.
    ///
    /// A rank of zero is a placeholder in the source data and counts as absent.
    #[must_use]
    pub fn effective_shap_rank(&self) -> Option<f64> {
        self.shap_rank.filter(|&rank| rank != 0.0)
    }
}

/// The categorical fields the explorer filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    ModelName,
    UserType,
    Geo,
    ProductBusiness,
    PrimaryCategory,
    FeatureType,
    FeatureSubtype,
    FeatureL3,
    #[serde(rename = "top_20_50")]
    TopRank,
}

impl FilterKey {
    pub const ALL: [FilterKey; 9] = [
        FilterKey::ModelName,
        FilterKey::UserType,
        FilterKey::Geo,
        FilterKey::ProductBusiness,
        FilterKey::PrimaryCategory,
        FilterKey::FeatureType,
        FilterKey::FeatureSubtype,
        FilterKey::FeatureL3,
        FilterKey::TopRank,
    ];

    /// Position of this key in [`FilterKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Field name as it appears in the payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKey::ModelName => "model_name",
            FilterKey::UserType => "user_type",
            FilterKey::Geo => "geo",
            FilterKey::ProductBusiness => "product_business",
            FilterKey::PrimaryCategory => "primary_category",
            FilterKey::FeatureType => "feature_type",
            FilterKey::FeatureSubtype => "feature_subtype",
            FilterKey::FeatureL3 => "feature_l3",
            FilterKey::TopRank => "top_20_50",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FilterKey::ModelName => "Model",
            FilterKey::UserType => "User Type",
            FilterKey::Geo => "Geo",
            FilterKey::ProductBusiness => "Product",
            FilterKey::PrimaryCategory => "Category",
            FilterKey::FeatureType => "Type",
            FilterKey::FeatureSubtype => "Subtype",
            FilterKey::FeatureL3 => "L3",
            FilterKey::TopRank => "Top Rank",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for FilterKey {
    type Err = ParseFilterKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseFilterKeyError {
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_key_round_trips_through_str() {
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>().unwrap(), key);
        }
        assert!("shap_rank".parse::<FilterKey>().is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, key) in FilterKey::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_deserialize_tolerates_spreadsheet_cells() {
        let json = r#"{
            "id": "17",
            "geo": "MX",
            "feature_name": null,
            "primary_category": "Bureau",
            "top_20_50": "",
            "shap_rank": "12"
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.id, 17);
        assert_eq!(feature.geo, "MX");
        assert_eq!(feature.feature_name, "");
        assert_eq!(feature.model_name, "");
        assert_eq!(feature.shap_rank, Some(12.0));
        assert!(!feature.is_top_ranked());
    }

    #[test]
    fn test_non_numeric_shap_rank_is_absent() {
        for raw in [r#""""#, r#""n/a""#, "null", "true"] {
            let json = format!(r#"{{"id": 1, "shap_rank": {raw}}}"#);
            let feature: Feature = serde_json::from_str(&json).unwrap();
            assert_eq!(feature.shap_rank, None, "input {raw}");
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_str::<Feature>(r#"{"geo": "US"}"#).is_err());
    }

    #[test]
    fn test_zero_shap_rank_is_not_effective() {
        let feature = Feature {
            shap_rank: Some(0.0),
            ..Feature::default()
        };
        assert_eq!(feature.effective_shap_rank(), None);
        assert_eq!(feature.shap_rank, Some(0.0));
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(""), UNKNOWN);
        assert_eq!(or_unknown("US"), "US");
    }
}
