//! Row-dimension × category cross-tabulation
//!
//! A [`CrossTab`] counts records per (row, category) cell, where rows are the
//! distinct values of a chosen [`Dimension`] and columns are the distinct
//! primary categories of the dataset.
//!
//! # Row keys
//!
//! For [`Dimension::Geo`] and [`Dimension::ProductBusiness`] a row is a bare
//! field value. Model names repeat across markets with unrelated meanings, so
//! for [`Dimension::ModelName`] a row is the `(geo, product, model)` triple
//! and a record needs all three fields set to be represented.
//!
//! Rows and columns are sorted lexicographically. Records with an empty
//! category or an empty row field are not counted in any cell.
//!
//! # Heat scaling
//!
//! [`CrossTab::max_count`] is the largest cell, floored at 1. Cells are
//! classified into [`HeatLevel`] tiers relative to it.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::crosstab::{self, Dimension, RowKey};
//! use featcat_catalog::Feature;
//!
//! let features = vec![
//!     Feature { id: 1, geo: "US".into(), primary_category: "Bureau".into(), ..Feature::default() },
//!     Feature { id: 2, geo: "US".into(), primary_category: "Cash Flow".into(), ..Feature::default() },
//!     Feature { id: 3, geo: "PH".into(), primary_category: "Bureau".into(), ..Feature::default() },
//! ];
//!
//! let matrix = crosstab::build_matrix(&features, Dimension::Geo);
//! assert_eq!(matrix.categories, ["Bureau", "Cash Flow"]);
//! let ph = RowKey::Value("PH".into());
//! assert_eq!(matrix.cell(&ph, "Bureau"), 1);
//! assert_eq!(matrix.cell(&ph, "Cash Flow"), 0);
//! assert_eq!(matrix.grand_total(), 3);
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use featcat_catalog::{Feature, FilterKey};
use featcat_stats::heat::{self, HeatLevel};
use serde::Serialize;

use crate::ParseDimensionError;

/// Field a cross-tab is broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Geo,
    ModelName,
    ProductBusiness,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Geo,
        Dimension::ModelName,
        Dimension::ProductBusiness,
    ];

    #[must_use]
    pub const fn filter_key(self) -> FilterKey {
        match self {
            Dimension::Geo => FilterKey::Geo,
            Dimension::ModelName => FilterKey::ModelName,
            Dimension::ProductBusiness => FilterKey::ProductBusiness,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.filter_key().as_str()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Geo => "Geography",
            Dimension::ModelName => "Model",
            Dimension::ProductBusiness => "Product",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|dim| dim.as_str() == s)
            .ok_or_else(|| ParseDimensionError {
                input: s.to_owned(),
            })
    }
}

/// Identity of a cross-tab row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum RowKey {
    Value(String),
    Model {
        geo: String,
        product: String,
        model: String,
    },
}

impl RowKey {
    /// The row `feature` belongs to, if it has every field the row needs.
    #[must_use]
    pub fn of(feature: &Feature, dimension: Dimension) -> Option<Self> {
        match dimension {
            Dimension::ModelName => {
                let (geo, product, model) = (
                    &feature.geo,
                    &feature.product_business,
                    &feature.model_name,
                );
                if geo.is_empty() || product.is_empty() || model.is_empty() {
                    return None;
                }
                Some(RowKey::Model {
                    geo: geo.clone(),
                    product: product.clone(),
                    model: model.clone(),
                })
            }
            Dimension::Geo | Dimension::ProductBusiness => {
                let value = feature.field(dimension.filter_key());
                (!value.is_empty()).then(|| RowKey::Value(value.to_owned()))
            }
        }
    }

    /// Filter toggles that select exactly this row's records.
    #[must_use]
    pub fn filters(&self, dimension: Dimension) -> Vec<(FilterKey, String)> {
        match self {
            RowKey::Value(value) => vec![(dimension.filter_key(), value.clone())],
            RowKey::Model {
                geo,
                product,
                model,
            } => vec![
                (FilterKey::Geo, geo.clone()),
                (FilterKey::ProductBusiness, product.clone()),
                (FilterKey::ModelName, model.clone()),
            ],
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Value(value) => f.write_str(value),
            RowKey::Model {
                geo,
                product,
                model,
            } => write!(f, "{geo} / {product} / {model}"),
        }
    }
}

/// One row of a cross-tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabRow {
    pub key: RowKey,
    /// Cell counts, aligned with [`CrossTab::categories`]
    pub counts: Vec<usize>,
    pub total: usize,
}

/// A row-dimension × category count matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub dimension: Dimension,
    pub categories: Vec<String>,
    pub rows: Vec<CrossTabRow>,
    /// Largest cell count, at least 1
    pub max_count: usize,
}

impl CrossTab {
    #[must_use]
    pub fn row(&self, key: &RowKey) -> Option<&CrossTabRow> {
        self.rows.iter().find(|r| r.key == *key)
    }

    /// Count of one cell; zero for unknown rows or categories.
    #[must_use]
    pub fn cell(&self, key: &RowKey, category: &str) -> usize {
        let Some(col) = self.categories.iter().position(|c| c == category) else {
            return 0;
        };
        self.row(key).map_or(0, |row| row.counts[col])
    }

    /// Per-category sums over all rows.
    #[must_use]
    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.categories.len())
            .map(|col| self.rows.iter().map(|row| row.counts[col]).sum())
            .collect()
    }

    #[must_use]
    pub fn grand_total(&self) -> usize {
        self.rows.iter().map(|row| row.total).sum()
    }

    #[must_use]
    pub fn heat_ratio(&self, count: usize) -> f64 {
        heat::heat_ratio(count, self.max_count)
    }

    #[must_use]
    pub fn heat_level(&self, count: usize) -> HeatLevel {
        HeatLevel::classify(count, self.max_count)
    }

    /// Filter toggles that reproduce one cell's records in the explorer.
    #[must_use]
    pub fn drill_down(&self, key: &RowKey, category: &str) -> Vec<(FilterKey, String)> {
        let mut filters = key.filters(self.dimension);
        filters.push((FilterKey::PrimaryCategory, category.to_owned()));
        filters
    }
}

/// Counts `features` by `dimension` and primary category.
#[must_use]
pub fn build_matrix(features: &[Feature], dimension: Dimension) -> CrossTab {
    let categories = features
        .iter()
        .map(|f| f.primary_category.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>();
    let column = categories
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i))
        .collect::<BTreeMap<_, _>>();

    let mut cells = BTreeMap::<RowKey, Vec<usize>>::new();
    for feature in features {
        let Some(key) = RowKey::of(feature, dimension) else {
            continue;
        };
        let counts = cells
            .entry(key)
            .or_insert_with(|| vec![0; categories.len()]);
        if let Some(&col) = column.get(feature.primary_category.as_str()) {
            counts[col] += 1;
        }
    }

    let rows = cells
        .into_iter()
        .map(|(key, counts)| CrossTabRow {
            total: counts.iter().sum(),
            key,
            counts,
        })
        .collect::<Vec<_>>();
    let max_count = rows
        .iter()
        .flat_map(|row| row.counts.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    CrossTab {
        dimension,
        categories: categories.into_iter().map(str::to_owned).collect(),
        rows,
        max_count,
    }
}
