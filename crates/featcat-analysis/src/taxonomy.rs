//! Navigation count-trees
//!
//! The sidebar offers the dataset's taxonomy as nested, counted lists. These
//! trees are always built from the full dataset, never the filtered one, so
//! that a navigation option does not vanish once a filter excludes it.
//!
//! # Trees
//!
//! | Field                         | Levels                              |
//! |-------------------------------|-------------------------------------|
//! | [`by_category`]               | category → type → subtype           |
//! | [`by_geo`]                    | geo                                 |
//! | [`by_product`]                | product                             |
//! | [`by_model`]                  | model                               |
//! | [`by_model_grouped`]          | geo → product → model               |
//! | [`by_top_rank`]               | top-N flag (set values only)        |
//!
//! [`by_category`]: TaxonomyStructures::by_category
//! [`by_geo`]: TaxonomyStructures::by_geo
//! [`by_product`]: TaxonomyStructures::by_product
//! [`by_model`]: TaxonomyStructures::by_model
//! [`by_model_grouped`]: TaxonomyStructures::by_model_grouped
//! [`by_top_rank`]: TaxonomyStructures::by_top_rank

use featcat_catalog::{Feature, FilterKey};
use featcat_stats::range::ValueRange;
use serde::Serialize;

use crate::grouping::{self, Group};

/// Range reported when no record has a SHAP rank.
pub const DEFAULT_SHAP_RANGE: ValueRange = ValueRange {
    min: 1.0,
    max: 250.0,
};

const CATEGORY_LEVELS: [FilterKey; 3] = [
    FilterKey::PrimaryCategory,
    FilterKey::FeatureType,
    FilterKey::FeatureSubtype,
];

const MODEL_LEVELS: [FilterKey; 3] = [
    FilterKey::Geo,
    FilterKey::ProductBusiness,
    FilterKey::ModelName,
];

/// A counted node of a navigation tree.
///
/// When `children` is present, `count` equals the sum of the children's
/// counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyNode {
    pub name: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TaxonomyNode>>,
}

impl TaxonomyNode {
    fn from_group(group: &Group<'_>, children: Option<Vec<TaxonomyNode>>) -> Self {
        Self {
            name: group.name.clone(),
            count: group.len(),
            children,
        }
    }

    /// Finds a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TaxonomyNode> {
        self.children.as_deref()?.iter().find(|c| c.name == name)
    }
}

/// All navigation trees of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyStructures {
    pub by_category: Vec<TaxonomyNode>,
    pub by_geo: Vec<TaxonomyNode>,
    pub by_product: Vec<TaxonomyNode>,
    pub by_model: Vec<TaxonomyNode>,
    pub by_model_grouped: Vec<TaxonomyNode>,
    pub by_top_rank: Vec<TaxonomyNode>,
    /// SHAP rank bounds, or [`DEFAULT_SHAP_RANGE`] when no rank is present
    pub shap_range: ValueRange,
}

/// Builds every navigation tree from the full dataset.
///
/// # Examples
///
/// ```
/// use featcat_analysis::taxonomy;
/// use featcat_catalog::Feature;
///
/// let features = vec![
///     Feature { id: 1, primary_category: "Bureau".into(), ..Feature::default() },
///     Feature { id: 2, primary_category: "Cash Flow".into(), ..Feature::default() },
///     Feature { id: 3, primary_category: "Bureau".into(), ..Feature::default() },
/// ];
/// let tree = taxonomy::build(&features);
/// assert_eq!(tree.by_category[0].name, "Bureau");
/// assert_eq!(tree.by_category[0].count, 2);
/// assert_eq!(tree.shap_range, taxonomy::DEFAULT_SHAP_RANGE);
/// ```
#[must_use]
pub fn build(features: &[Feature]) -> TaxonomyStructures {
    TaxonomyStructures {
        by_category: tree(features, &CATEGORY_LEVELS),
        by_geo: tree(features, &[FilterKey::Geo]),
        by_product: tree(features, &[FilterKey::ProductBusiness]),
        by_model: tree(features, &[FilterKey::ModelName]),
        by_model_grouped: tree(features, &MODEL_LEVELS),
        by_top_rank: tree(
            features.iter().filter(|f| f.is_top_ranked()),
            &[FilterKey::TopRank],
        ),
        shap_range: ValueRange::new_or(features.iter().map(|f| f.shap_rank), DEFAULT_SHAP_RANGE),
    }
}

fn tree<'a, I>(records: I, levels: &[FilterKey]) -> Vec<TaxonomyNode>
where
    I: IntoIterator<Item = &'a Feature>,
{
    grouping::build_tree(records, levels, &TaxonomyNode::from_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{portfolio, scenario};

    fn assert_sums(nodes: &[TaxonomyNode]) {
        for node in nodes {
            if let Some(children) = &node.children {
                assert_eq!(
                    node.count,
                    children.iter().map(|c| c.count).sum::<usize>(),
                    "node {}",
                    node.name
                );
                assert_sums(children);
            }
        }
    }

    #[test]
    fn test_scenario_category_counts() {
        let tree = build(&scenario());
        let counts = tree
            .by_category
            .iter()
            .map(|n| (n.name.as_str(), n.count))
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![("Bureau", 2), ("Cash Flow", 1)]);

        let bureau = &tree.by_category[0];
        let types = bureau.children.as_ref().unwrap();
        assert_eq!(types[0].name, "Credit/Loan History");
        assert_eq!(types[1].name, "Unknown");
    }

    #[test]
    fn test_every_tree_sums_to_dataset_size() {
        let features = portfolio();
        let tree = build(&features);
        for nodes in [
            &tree.by_category,
            &tree.by_geo,
            &tree.by_product,
            &tree.by_model,
            &tree.by_model_grouped,
        ] {
            assert_eq!(nodes.iter().map(|n| n.count).sum::<usize>(), features.len());
            assert_sums(nodes);
        }
    }

    #[test]
    fn test_three_levels_deep() {
        let tree = build(&portfolio());
        let subtypes = tree.by_category[0].children.as_ref().unwrap()[0]
            .children
            .as_ref()
            .unwrap();
        assert!(subtypes.iter().all(|n| n.children.is_none()));
    }

    #[test]
    fn test_model_grouping() {
        let tree = build(&portfolio());
        let us = tree.by_model_grouped.iter().find(|n| n.name == "US").unwrap();
        assert_eq!(us.count, 6);
        let cash_advance = us.child("Cash Advance").unwrap();
        assert_eq!(cash_advance.count, 4);
        assert_eq!(cash_advance.child("Boron").unwrap().count, 3);
        assert_eq!(cash_advance.child("Beryllium").unwrap().count, 1);
    }

    #[test]
    fn test_top_rank_only_lists_set_flags() {
        let tree = build(&scenario());
        assert_eq!(
            tree.by_top_rank,
            vec![TaxonomyNode {
                name: "Top 20".into(),
                count: 1,
                children: None
            }]
        );
    }

    #[test]
    fn test_shap_range() {
        let tree = build(&scenario());
        assert_eq!(tree.shap_range, ValueRange { min: 5.0, max: 30.0 });
    }

    #[test]
    fn test_empty_dataset() {
        let tree = build(&[]);
        assert!(tree.by_category.is_empty());
        assert!(tree.by_model_grouped.is_empty());
        assert!(tree.by_top_rank.is_empty());
        assert_eq!(tree.shap_range, DEFAULT_SHAP_RANGE);
    }

    #[test]
    fn test_descending_with_name_tiebreak() {
        let tree = build(&portfolio());
        let geos = tree
            .by_geo
            .iter()
            .map(|n| (n.name.as_str(), n.count))
            .collect::<Vec<_>>();
        assert_eq!(geos, vec![("US", 6), ("PH", 3), ("MX", 2), ("India", 1)]);
    }
}
