//! Recursive group-by over categorical fields
//!
//! The taxonomy trees and the summary hierarchy are both built by
//! partitioning records along an ordered list of fields, one level at a
//! time. This module holds that shared machinery.
//!
//! # Partitioning rules
//!
//! - Records with an empty value for the level's field are grouped under
//!   [`UNKNOWN`](featcat_catalog::UNKNOWN)
//! - Groups are ordered by descending record count, ties broken by name
//! - Every record lands in exactly one group, so a group's size always equals
//!   the sum of its child groups' sizes
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::grouping::{self, Group};
//! use featcat_catalog::{Feature, FilterKey};
//!
//! let features = vec![
//!     Feature { id: 1, geo: "US".into(), ..Feature::default() },
//!     Feature { id: 2, geo: "".into(), ..Feature::default() },
//!     Feature { id: 3, geo: "US".into(), ..Feature::default() },
//! ];
//!
//! let groups = grouping::partition(&features, FilterKey::Geo);
//! let summary = groups.iter().map(|g| (g.name.as_str(), g.len())).collect::<Vec<_>>();
//! assert_eq!(summary, vec![("US", 2), ("Unknown", 1)]);
//!
//! // Nested: geo -> category, each node reporting its size
//! let tree = grouping::build_tree(&features, &[FilterKey::Geo, FilterKey::PrimaryCategory],
//!     &|group: &Group<'_>, children: Option<Vec<usize>>| {
//!         assert_eq!(children.map_or(group.len(), |c| c.iter().sum()), group.len());
//!         group.len()
//!     });
//! assert_eq!(tree, vec![2, 1]);
//! ```

use std::collections::HashMap;

use featcat_catalog::{Feature, FilterKey, or_unknown};
use featcat_stats::tally::sort_desc_by_count;

/// Records sharing one value of a field.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    /// Field value, or `"Unknown"` for unset values
    pub name: String,
    /// Members, in input order
    pub records: Vec<&'a Feature>,
}

impl Group<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Splits `records` by the value of `key`.
pub fn partition<'a, I>(records: I, key: FilterKey) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Feature>,
{
    let mut index = HashMap::<&str, usize>::new();
    let mut groups = Vec::<Group<'a>>::new();
    for record in records {
        let name = or_unknown(record.field(key));
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push(Group {
                name: name.to_owned(),
                records: vec![],
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }
    sort_desc_by_count(&mut groups, |g| (g.name.as_str(), g.len()));
    groups
}

/// Builds a tree by partitioning along `levels`, outermost first.
///
/// `make_node` turns each group into a node. It receives the group and, for
/// every level except the last, the already-built child nodes; at the last
/// level it receives `None`.
pub fn build_tree<'a, I, N, F>(records: I, levels: &[FilterKey], make_node: &F) -> Vec<N>
where
    I: IntoIterator<Item = &'a Feature>,
    F: Fn(&Group<'a>, Option<Vec<N>>) -> N,
{
    let Some((&key, rest)) = levels.split_first() else {
        return vec![];
    };
    partition(records, key)
        .into_iter()
        .map(|group| {
            let children = if rest.is_empty() {
                None
            } else {
                Some(build_tree(group.records.iter().copied(), rest, make_node))
            };
            make_node(&group, children)
        })
        .collect()
}

/// Drops a child level that consists of nothing but one `"Unknown"` node.
///
/// Such a level carries no information beyond its parent, so it is
/// collapsed. `name_of` projects a node onto its name.
pub fn collapse_unknown_only<N, F>(children: Vec<N>, name_of: F) -> Option<Vec<N>>
where
    F: Fn(&N) -> &str,
{
    let only_unknown =
        matches!(children.as_slice(), [only] if name_of(only) == featcat_catalog::UNKNOWN);
    if children.is_empty() || only_unknown {
        None
    } else {
        Some(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{feature, portfolio};

    #[test]
    fn test_partition_empty() {
        let groups = partition(&[], FilterKey::Geo);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_partition_keeps_input_order_within_group() {
        let features = vec![
            feature(1, "US", ""),
            feature(2, "PH", ""),
            feature(3, "US", ""),
        ];
        let groups = partition(&features, FilterKey::Geo);
        assert_eq!(groups[0].name, "US");
        let ids = groups[0].records.iter().map(|f| f.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unknown_participates_in_sorting() {
        let features = vec![
            feature(1, "", "Bureau"),
            feature(2, "", "Bureau"),
            feature(3, "US", "Bureau"),
        ];
        let names = partition(&features, FilterKey::Geo)
            .into_iter()
            .map(|g| g.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Unknown", "US"]);
    }

    #[test]
    fn test_tree_counts_are_consistent() {
        #[derive(Debug)]
        struct Node {
            count: usize,
            children: Option<Vec<Node>>,
        }

        fn check(node: &Node) {
            if let Some(children) = &node.children {
                assert_eq!(node.count, children.iter().map(|c| c.count).sum::<usize>());
                children.iter().for_each(check);
            }
        }

        let features = portfolio();
        let levels = [
            FilterKey::PrimaryCategory,
            FilterKey::FeatureType,
            FilterKey::FeatureSubtype,
            FilterKey::FeatureL3,
        ];
        let tree = build_tree(&features, &levels, &|group: &Group<'_>, children| Node {
            count: group.len(),
            children,
        });
        assert_eq!(tree.iter().map(|n| n.count).sum::<usize>(), features.len());
        tree.iter().for_each(check);
    }

    #[test]
    fn test_collapse_unknown_only() {
        let level = |names: &[&str]| names.iter().map(|&n| n.to_owned()).collect::<Vec<_>>();
        assert_eq!(collapse_unknown_only(level(&["Unknown"]), String::as_str), None);
        assert_eq!(collapse_unknown_only(level(&[]), String::as_str), None);
        assert_eq!(
            collapse_unknown_only(level(&["Payroll"]), String::as_str),
            Some(level(&["Payroll"]))
        );
        assert_eq!(
            collapse_unknown_only(level(&["Unknown", "Payroll"]), String::as_str),
            Some(level(&["Unknown", "Payroll"]))
        );
    }
}
