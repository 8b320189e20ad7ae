//! Dataset summary
//!
//! [`summarize`] condenses a feature list into the summary view's
//! structures: headline KPIs, the category distribution, per-category
//! breakdowns by geo, model and product, and the four-level taxonomy
//! hierarchy (category → type → subtype → L3).
//!
//! # Hierarchy
//!
//! Each [`HierarchyNode`] carries its own geo and product breakdown, computed
//! from the records under that node. Its `pct` is relative to the whole
//! dataset, not to the parent, so nodes at any depth compare directly.
//!
//! A child level consisting of a single `"Unknown"` node adds nothing over
//! its parent and is omitted.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::summary;
//! use featcat_catalog::Feature;
//!
//! let features = vec![
//!     Feature { id: 1, geo: "US".into(), primary_category: "Bureau".into(), top_20_50: "Top 20".into(), ..Feature::default() },
//!     Feature { id: 2, geo: "PH".into(), primary_category: "Bureau".into(), ..Feature::default() },
//!     Feature { id: 3, geo: "US".into(), primary_category: "Cash Flow".into(), ..Feature::default() },
//!     Feature { id: 4, geo: "US".into(), primary_category: "Cash Flow".into(), ..Feature::default() },
//! ];
//!
//! let summary = summary::summarize(&features);
//! assert_eq!(summary.kpis.total, 4);
//! assert_eq!(summary.kpis.geos, 2);
//! assert_eq!(summary.kpis.top_pct, 25);
//! assert_eq!(summary.tree[0].name, "Bureau");
//! assert_eq!(summary.tree[0].pct, 50.0);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use featcat_catalog::{Feature, FilterKey};
use featcat_stats::{percent, tally::Tally};
use serde::Serialize;

use crate::grouping::{self, Group};

const HIERARCHY_LEVELS: [FilterKey; 4] = [
    FilterKey::PrimaryCategory,
    FilterKey::FeatureType,
    FilterKey::FeatureSubtype,
    FilterKey::FeatureL3,
];

/// Headline numbers of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total: usize,
    /// Distinct non-empty model names
    pub models: usize,
    /// Distinct non-empty geographies
    pub geos: usize,
    /// Distinct non-empty primary categories
    pub categories: usize,
    /// Share of records with a top-N flag, rounded
    pub top_pct: u32,
}

/// One segment of the category distribution bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

/// Where one category's records come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub total: usize,
    pub by_geo: Vec<NamedCount>,
    pub by_model: Vec<NamedCount>,
    pub by_product: Vec<NamedCount>,
}

/// A node of the taxonomy hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    pub count: usize,
    /// Percentage of the whole dataset
    pub pct: f64,
    pub by_geo: BTreeMap<String, usize>,
    pub by_product: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<HierarchyNode>>,
}

impl HierarchyNode {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&HierarchyNode> {
        self.children.as_deref()?.iter().find(|c| c.name == name)
    }

    /// Depth of the subtree rooted here, counting this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(HierarchyNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Everything the summary view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub kpis: Kpis,
    /// Sorted by descending count
    pub category_bar: Vec<CategoryShare>,
    /// One per category, in [`Summary::category_bar`] order
    pub breakdowns: Vec<CategoryBreakdown>,
    pub tree: Vec<HierarchyNode>,
    /// Sorted distinct non-empty geographies
    pub all_geos: Vec<String>,
    /// Sorted distinct non-empty products
    pub all_products: Vec<String>,
}

impl Summary {
    #[must_use]
    pub fn breakdown(&self, category: &str) -> Option<&CategoryBreakdown> {
        self.breakdowns.iter().find(|b| b.name == category)
    }
}

/// Computes the summary structures of `features`.
///
/// An empty input yields zero KPIs and empty lists.
#[must_use]
pub fn summarize(features: &[Feature]) -> Summary {
    let total = features.len();
    let category_bar = ranked(features.iter().map(|f| f.primary_category.as_str()))
        .into_iter()
        .map(|NamedCount { name, count }| CategoryShare {
            pct: percent::percentage(count, total),
            name,
            count,
        })
        .collect::<Vec<_>>();
    let breakdowns = category_bar
        .iter()
        .map(|share| breakdown(features, share))
        .collect();
    let tree = grouping::build_tree(
        features,
        &HIERARCHY_LEVELS,
        &|group: &Group<'_>, children: Option<Vec<HierarchyNode>>| HierarchyNode {
            name: group.name.clone(),
            count: group.len(),
            pct: percent::percentage(group.len(), total),
            by_geo: counts(group.records.iter().map(|f| f.geo.as_str())),
            by_product: counts(group.records.iter().map(|f| f.product_business.as_str())),
            children: children
                .and_then(|c| grouping::collapse_unknown_only(c, HierarchyNode::name)),
        },
    );

    Summary {
        kpis: Kpis {
            total,
            models: distinct(features, FilterKey::ModelName).len(),
            geos: distinct(features, FilterKey::Geo).len(),
            categories: category_bar.len(),
            top_pct: percent::rounded_percentage(
                features.iter().filter(|f| f.is_top_ranked()).count(),
                total,
            ),
        },
        category_bar,
        breakdowns,
        tree,
        all_geos: distinct(features, FilterKey::Geo),
        all_products: distinct(features, FilterKey::ProductBusiness),
    }
}

fn breakdown(features: &[Feature], share: &CategoryShare) -> CategoryBreakdown {
    let records = features
        .iter()
        .filter(|f| f.primary_category == share.name)
        .collect::<Vec<_>>();
    CategoryBreakdown {
        name: share.name.clone(),
        total: share.count,
        by_geo: ranked(records.iter().map(|f| f.geo.as_str())),
        by_model: ranked(records.iter().map(|f| f.model_name.as_str())),
        by_product: ranked(records.iter().map(|f| f.product_business.as_str())),
    }
}

/// Counts non-empty values, most frequent first.
fn ranked<'a>(values: impl Iterator<Item = &'a str>) -> Vec<NamedCount> {
    values
        .filter(|v| !v.is_empty())
        .collect::<Tally<_>>()
        .into_sorted_desc()
        .into_iter()
        .map(|(name, count)| NamedCount {
            name: name.to_owned(),
            count,
        })
        .collect()
}

/// Counts non-empty values by name.
fn counts<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values.filter(|v| !v.is_empty()) {
        *counts.entry(value.to_owned()).or_default() += 1;
    }
    counts
}

fn distinct(features: &[Feature], key: FilterKey) -> Vec<String> {
    features
        .iter()
        .map(|f| f.field(key))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
