//! Multi-key feature filtering
//!
//! This module implements the explorer's filter predicate and the state it
//! is driven by.
//!
//! # Predicate
//!
//! A record passes a [`FilterState`] when all of the following hold:
//!
//! - **Categorical keys**: for every [`FilterKey`] with a non-empty selection,
//!   the record's value for that key is one of the selected values
//!   (OR within a key, AND across keys)
//! - **SHAP threshold**: if a maximum is set, the record has a SHAP rank and
//!   it is at most the maximum (records without a rank are excluded)
//! - **Search**: if the search text is non-empty, it occurs
//!   case-insensitively in the feature name or description
//!
//! # State updates
//!
//! [`FilterState`] is an immutable value. Every mutator consumes the current
//! state and returns the next one, so callers replace their state wholesale
//! and keeping history for undo is a matter of keeping old values.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::filter::FilterState;
//! use featcat_catalog::{Feature, FilterKey};
//!
//! let features = vec![
//!     Feature { id: 1, geo: "US".into(), shap_rank: Some(5.0), ..Feature::default() },
//!     Feature { id: 2, geo: "US".into(), shap_rank: Some(30.0), ..Feature::default() },
//!     Feature { id: 3, geo: "PH".into(), ..Feature::default() },
//! ];
//!
//! let filters = FilterState::default().toggled(FilterKey::Geo, "US");
//! assert_eq!(filters.apply(&features).len(), 2);
//!
//! let filters = filters.with_shap_rank_max(Some(10.0));
//! let ids = filters.apply(&features).iter().map(|f| f.id).collect::<Vec<_>>();
//! assert_eq!(ids, vec![1]);
//! assert_eq!(filters.active_filter_count(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use featcat_catalog::{Feature, FilterKey};
use serde::{Serialize, Serializer, ser::SerializeMap as _};

/// Filters selected by the user.
///
/// The default value is the empty state: no constraint on any key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Selected values per key, indexed by [`FilterKey::index`], in selection order
    selected: [Vec<String>; FilterKey::ALL.len()],
    shap_rank_max: Option<f64>,
    search: String,
}

/// A single active constraint, as shown on a filter badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveFilter {
    Value { key: FilterKey, value: String },
    ShapRankMax { max: f64 },
    Search { text: String },
}

impl FilterState {
    /// Values currently selected for `key`.
    #[must_use]
    pub fn values(&self, key: FilterKey) -> &[String] {
        &self.selected[key.index()]
    }

    #[must_use]
    pub fn is_selected(&self, key: FilterKey, value: &str) -> bool {
        self.values(key).iter().any(|v| v == value)
    }

    #[must_use]
    pub fn shap_rank_max(&self) -> Option<f64> {
        self.shap_rank_max
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Adds `value` to the selection for `key`, or removes it if present.
    #[must_use]
    pub fn toggled(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        let value = value.into();
        let values = &mut self.selected[key.index()];
        if let Some(pos) = values.iter().position(|v| *v == value) {
            values.remove(pos);
        } else {
            values.push(value);
        }
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_shap_rank_max(mut self, shap_rank_max: Option<f64>) -> Self {
        self.shap_rank_max = shap_rank_max;
        self
    }

    /// Clears the selection for one key.
    #[must_use]
    pub fn cleared(mut self, key: FilterKey) -> Self {
        self.selected[key.index()].clear();
        self
    }

    #[must_use]
    pub fn cleared_shap(self) -> Self {
        self.with_shap_rank_max(None)
    }

    /// Whether no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of active constraints: every selected value, plus one for the
    /// SHAP threshold and one for the search text when set.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.selected.iter().map(Vec::len).sum::<usize>()
            + usize::from(self.shap_rank_max.is_some())
            + usize::from(!self.search.is_empty())
    }

    /// Lists active constraints in key order.
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = FilterKey::ALL
            .into_iter()
            .flat_map(|key| {
                self.values(key).iter().map(move |value| ActiveFilter::Value {
                    key,
                    value: value.clone(),
                })
            })
            .collect::<Vec<_>>();
        if let Some(max) = self.shap_rank_max {
            active.push(ActiveFilter::ShapRankMax { max });
        }
        if !self.search.is_empty() {
            active.push(ActiveFilter::Search {
                text: self.search.clone(),
            });
        }
        active
    }

    /// Whether `feature` satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        let categorical = FilterKey::ALL.into_iter().all(|key| {
            let values = self.values(key);
            values.is_empty() || values.iter().any(|v| v == feature.field(key))
        });
        if !categorical {
            return false;
        }

        if let Some(max) = self.shap_rank_max {
            match feature.effective_shap_rank() {
                Some(rank) if rank <= max => {}
                _ => return false,
            }
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_name = feature.feature_name.to_lowercase().contains(&needle);
            let in_description = feature.description.to_lowercase().contains(&needle);
            if !in_name && !in_description {
                return false;
            }
        }

        true
    }

    /// Returns the matching features, in input order.
    #[must_use]
    pub fn apply(&self, features: &[Feature]) -> Vec<Feature> {
        features
            .iter()
            .filter(|feature| self.matches(feature))
            .cloned()
            .collect()
    }
}

impl Serialize for FilterState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(FilterKey::ALL.len() + 2))?;
        for key in FilterKey::ALL {
            map.serialize_entry(key.as_str(), self.values(key))?;
        }
        map.serialize_entry("shap_rank_max", &self.shap_rank_max)?;
        map.serialize_entry("search", &self.search)?;
        map.end()
    }
}

/// Filters `features` by `filters`, preserving input order.
#[must_use]
pub fn apply(features: &[Feature], filters: &FilterState) -> Vec<Feature> {
    filters.apply(features)
}

/// Selectable values for every filter key.
///
/// Each list holds the distinct non-empty values of the key, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    options: BTreeMap<FilterKey, Vec<String>>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_features(features: &[Feature]) -> Self {
        let options = FilterKey::ALL
            .into_iter()
            .map(|key| {
                let values = features
                    .iter()
                    .map(|f| f.field(key))
                    .filter(|v| !v.is_empty())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                (key, values)
            })
            .collect();
        Self { options }
    }

    #[must_use]
    pub fn get(&self, key: FilterKey) -> &[String] {
        self.options.get(&key).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{feature, scenario};

    #[test]
    fn test_empty_state_is_identity() {
        let features = scenario();
        assert_eq!(FilterState::default().apply(&features), features);
        assert!(FilterState::default().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let base = FilterState::default()
            .toggled(FilterKey::Geo, "US")
            .with_search("loan");
        let twice = base
            .clone()
            .toggled(FilterKey::PrimaryCategory, "Bureau")
            .toggled(FilterKey::PrimaryCategory, "Bureau");
        assert_eq!(twice, base);

        let removed_and_readded = base
            .clone()
            .toggled(FilterKey::Geo, "US")
            .toggled(FilterKey::Geo, "US");
        assert_eq!(removed_and_readded, base);
    }

    #[test]
    fn test_scenario_geo_then_shap() {
        let features = scenario();
        let filters = FilterState::default().toggled(FilterKey::Geo, "US");
        assert_eq!(filters.apply(&features).len(), 2);

        let filters = filters.with_shap_rank_max(Some(10.0));
        let result = filters.apply(&features);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], features[0]);
    }

    #[test]
    fn test_shap_threshold_excludes_missing_and_zero_ranks() {
        let mut with_rank = feature(1, "US", "Bureau");
        with_rank.shap_rank = Some(3.0);
        let mut zero_rank = feature(2, "US", "Bureau");
        zero_rank.shap_rank = Some(0.0);
        let no_rank = feature(3, "US", "Bureau");
        let features = vec![with_rank, zero_rank, no_rank];

        let unconstrained = FilterState::default();
        assert_eq!(unconstrained.apply(&features).len(), 3);

        let constrained = unconstrained.with_shap_rank_max(Some(250.0));
        let ids = constrained
            .apply(&features)
            .iter()
            .map(|f| f.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_shap_threshold_is_inclusive() {
        let mut f = feature(1, "US", "Bureau");
        f.shap_rank = Some(10.0);
        let filters = FilterState::default().with_shap_rank_max(Some(10.0));
        assert!(filters.matches(&f));
        let filters = filters.with_shap_rank_max(Some(9.5));
        assert!(!filters.matches(&f));
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let mut by_name = feature(1, "US", "Bureau");
        by_name.feature_name = "Days_Since_Last_LOAN".into();
        let mut by_description = feature(2, "US", "Bureau");
        by_description.description = "Count of loan applications".into();
        let neither = feature(3, "US", "Bureau");
        let features = vec![by_name, by_description, neither];

        let filters = FilterState::default().with_search("Loan");
        let ids = filters
            .apply(&features)
            .iter()
            .map(|f| f.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_or_within_key_and_across_keys() {
        let features = vec![
            feature(1, "US", "Bureau"),
            feature(2, "PH", "Bureau"),
            feature(3, "MX", "Bureau"),
            feature(4, "US", "Cash Flow"),
        ];
        let filters = FilterState::default()
            .toggled(FilterKey::Geo, "US")
            .toggled(FilterKey::Geo, "PH")
            .toggled(FilterKey::PrimaryCategory, "Bureau");
        let ids = filters
            .apply(&features)
            .iter()
            .map(|f| f.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_empty_field_never_matches_selection() {
        let features = vec![feature(1, "", "Bureau")];
        let filters = FilterState::default().toggled(FilterKey::Geo, "US");
        assert!(filters.apply(&features).is_empty());
    }

    #[test]
    fn test_active_filter_count() {
        let filters = FilterState::default()
            .toggled(FilterKey::Geo, "US")
            .toggled(FilterKey::Geo, "PH")
            .toggled(FilterKey::TopRank, "Top 20")
            .with_shap_rank_max(Some(50.0))
            .with_search("bank");
        assert_eq!(filters.active_filter_count(), 5);
        assert_eq!(filters.active_filters().len(), 5);

        let filters = filters.cleared(FilterKey::Geo).cleared_shap().with_search("");
        assert_eq!(filters.active_filter_count(), 1);
        assert_eq!(
            filters.active_filters(),
            vec![ActiveFilter::Value {
                key: FilterKey::TopRank,
                value: "Top 20".into()
            }]
        );
    }

    /// Exhaustively checks soundness and completeness over a small grid of
    /// records and every combination of single-value selections.
    #[test]
    fn test_exhaustive_small_grid() {
        let geos = ["US", "PH", ""];
        let categories = ["Bureau", "Cash Flow", ""];
        let ranks = [None, Some(5.0), Some(40.0)];
        let mut features = vec![];
        let mut id = 0;
        for geo in geos {
            for category in categories {
                for rank in ranks {
                    id += 1;
                    let mut f = feature(id, geo, category);
                    f.shap_rank = rank;
                    features.push(f);
                }
            }
        }

        let geo_choices = [None, Some("US"), Some("PH")];
        let category_choices = [None, Some("Bureau"), Some("Cash Flow")];
        let threshold_choices = [None, Some(10.0), Some(100.0)];
        for geo in geo_choices {
            for category in category_choices {
                for threshold in threshold_choices {
                    let mut filters = FilterState::default().with_shap_rank_max(threshold);
                    if let Some(geo) = geo {
                        filters = filters.toggled(FilterKey::Geo, geo);
                    }
                    if let Some(category) = category {
                        filters = filters.toggled(FilterKey::PrimaryCategory, category);
                    }

                    let included = filters.apply(&features);
                    assert!(included.len() <= features.len());
                    for f in &features {
                        let violated = violations(&filters, f);
                        let is_included = included.iter().any(|g| g.id == f.id);
                        assert_eq!(
                            is_included,
                            violated == 0,
                            "record {f:?} under {filters:?}"
                        );
                    }
                }
            }
        }
    }

    /// Counts violated constraints by walking the badge list.
    fn violations(filters: &FilterState, f: &Feature) -> usize {
        let mut violated = 0;
        for key in FilterKey::ALL {
            let selected = filters
                .active_filters()
                .into_iter()
                .filter_map(|a| match a {
                    ActiveFilter::Value { key: k, value } if k == key => Some(value),
                    _ => None,
                })
                .collect::<Vec<_>>();
            if !selected.is_empty() && !selected.contains(&f.field(key).to_owned()) {
                violated += 1;
            }
        }
        if let Some(max) = filters.shap_rank_max() {
            if f.shap_rank.is_none_or(|r| r > max) {
                violated += 1;
            }
        }
        violated
    }

    #[test]
    fn test_filter_options_sorted_distinct_non_empty() {
        let features = vec![
            feature(1, "US", "Cash Flow"),
            feature(2, "PH", "Bureau"),
            feature(3, "US", ""),
        ];
        let options = FilterOptions::from_features(&features);
        assert_eq!(options.get(FilterKey::Geo), ["PH", "US"]);
        assert_eq!(options.get(FilterKey::PrimaryCategory), ["Bureau", "Cash Flow"]);
        assert!(options.get(FilterKey::FeatureL3).is_empty());
    }

    #[test]
    fn test_serialize_state() {
        let filters = FilterState::default()
            .toggled(FilterKey::Geo, "US")
            .with_shap_rank_max(Some(10.0));
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["geo"], serde_json::json!(["US"]));
        assert_eq!(json["top_20_50"], serde_json::json!([]));
        assert_eq!(json["shap_rank_max"], 10.0);
        assert_eq!(json["search"], "");
    }
}
