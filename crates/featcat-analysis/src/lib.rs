//! In-memory analytics over a feature catalog
//!
//! This crate turns a flat list of [`Feature`](featcat_catalog::Feature)
//! records into the derived views of the catalog: filtered lists, navigation
//! trees, cross-tab matrices, gap statistics and summaries. Every function
//! is pure and synchronous, and every input, including an empty dataset,
//! produces a well-defined result.
//!
//! # Overview
//!
//! The views are fed from two sources:
//!
//! ## Full Dataset
//!
//! Navigation never depends on the current filters:
//!
//! - **Taxonomy** ([`taxonomy::build`]): Count-trees by category, geo,
//!   product, model and top-N flag, plus the SHAP rank range
//! - **Filter Options** ([`filter::FilterOptions`]): Selectable values per
//!   filter key
//!
//! ## Filtered Dataset
//!
//! Everything else is computed from [`filter::FilterState::apply`]'s output:
//!
//! 1. **Explorer** ([`table`]): Natural-order sort and pagination
//! 2. **Cross-Tab** ([`crosstab::build_matrix`]): Row-dimension × category
//!    counts with heat scaling and drill-down filters
//! 3. **Gap Analysis** ([`gap`]): Canonical coverage heatmap, coverage gaps,
//!    brainstorm targets, manipulation-risk distribution
//! 4. **Summary** ([`summary::summarize`]): KPIs, category distribution,
//!    per-category breakdowns and the four-level hierarchy
//!
//! # Unset Values
//!
//! Empty fields are never a value of their own. Grouping code files them
//! under `"Unknown"`; matrices and breakdowns leave them out.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::{crosstab, filter::FilterState, summary, taxonomy};
//! use featcat_catalog::{Feature, FilterKey};
//!
//! let features = vec![
//!     Feature { id: 1, geo: "US".into(), primary_category: "Bureau".into(), ..Feature::default() },
//!     Feature { id: 2, geo: "PH".into(), primary_category: "Bureau".into(), ..Feature::default() },
//! ];
//!
//! let navigation = taxonomy::build(&features);
//! assert_eq!(navigation.by_geo.len(), 2);
//!
//! let filtered = FilterState::default()
//!     .toggled(FilterKey::Geo, "US")
//!     .apply(&features);
//! let matrix = crosstab::build_matrix(&filtered, crosstab::Dimension::Geo);
//! assert_eq!(matrix.grand_total(), 1);
//! assert_eq!(summary::summarize(&filtered).kpis.total, 1);
//! ```

pub mod crosstab;
pub mod filter;
pub mod gap;
pub mod grouping;
pub mod summary;
pub mod table;
pub mod taxonomy;

#[cfg(test)]
mod test_util;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown dimension: {input} (expected geo, model_name or product_business)")]
pub struct ParseDimensionError {
    #[error(not(source))]
    pub input: String,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown sort column: {input}")]
pub struct ParseSortKeyError {
    #[error(not(source))]
    pub input: String,
}
