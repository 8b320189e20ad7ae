//! Explorer table ordering and paging
//!
//! The explorer lists filtered features sorted by one column and split into
//! fixed-size pages.
//!
//! Columns compare as text with numeric-aware ordering (see
//! [`natural_cmp`]), so `"v10"` sorts after `"v9"` and SHAP ranks sort by
//! value. Absent values compare as empty strings.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::table::{self, SortDirection, SortKey, SortOrder};
//! use featcat_catalog::Feature;
//!
//! let mut features = vec![
//!     Feature { id: 1, shap_rank: Some(12.0), ..Feature::default() },
//!     Feature { id: 2, shap_rank: Some(3.0), ..Feature::default() },
//!     Feature { id: 3, shap_rank: None, ..Feature::default() },
//! ];
//! table::sort_features(&mut features, SortOrder::new(SortKey::ShapRank, SortDirection::Asc));
//! let ids = features.iter().map(|f| f.id).collect::<Vec<_>>();
//! assert_eq!(ids, vec![3, 2, 1]);
//!
//! let page = table::paginate(&features, 0, 2);
//! assert_eq!((page.first, page.last, page.total_pages), (1, 2, 2));
//! ```

use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt,
    iter::Peekable,
    str::{Chars, FromStr},
};

use featcat_catalog::{Feature, FilterKey};
use serde::Serialize;

use crate::ParseSortKeyError;

/// Rows per explorer page.
pub const PAGE_SIZE: usize = 50;

/// A sortable explorer column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Geo,
    ProductBusiness,
    ModelName,
    UserType,
    #[default]
    FeatureName,
    Description,
    PrimaryCategory,
    FeatureType,
    FeatureSubtype,
    FeatureL3,
    #[serde(rename = "top_20_50")]
    TopRank,
    ShapRank,
}

impl SortKey {
    pub const ALL: [SortKey; 13] = [
        SortKey::Id,
        SortKey::Geo,
        SortKey::ProductBusiness,
        SortKey::ModelName,
        SortKey::UserType,
        SortKey::FeatureName,
        SortKey::Description,
        SortKey::PrimaryCategory,
        SortKey::FeatureType,
        SortKey::FeatureSubtype,
        SortKey::FeatureL3,
        SortKey::TopRank,
        SortKey::ShapRank,
    ];

    /// The categorical field behind this column, if it is one.
    #[must_use]
    pub const fn filter_key(self) -> Option<FilterKey> {
        match self {
            SortKey::Geo => Some(FilterKey::Geo),
            SortKey::ProductBusiness => Some(FilterKey::ProductBusiness),
            SortKey::ModelName => Some(FilterKey::ModelName),
            SortKey::UserType => Some(FilterKey::UserType),
            SortKey::PrimaryCategory => Some(FilterKey::PrimaryCategory),
            SortKey::FeatureType => Some(FilterKey::FeatureType),
            SortKey::FeatureSubtype => Some(FilterKey::FeatureSubtype),
            SortKey::FeatureL3 => Some(FilterKey::FeatureL3),
            SortKey::TopRank => Some(FilterKey::TopRank),
            SortKey::Id | SortKey::FeatureName | SortKey::Description | SortKey::ShapRank => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Geo => "geo",
            SortKey::ProductBusiness => "product_business",
            SortKey::ModelName => "model_name",
            SortKey::UserType => "user_type",
            SortKey::FeatureName => "feature_name",
            SortKey::Description => "description",
            SortKey::PrimaryCategory => "primary_category",
            SortKey::FeatureType => "feature_type",
            SortKey::FeatureSubtype => "feature_subtype",
            SortKey::FeatureL3 => "feature_l3",
            SortKey::TopRank => "top_20_50",
            SortKey::ShapRank => "shap_rank",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Geo => "Geo",
            SortKey::ProductBusiness => "Product",
            SortKey::ModelName => "Model",
            SortKey::UserType => "User",
            SortKey::FeatureName => "Feature Name",
            SortKey::Description => "Description",
            SortKey::PrimaryCategory => "Category",
            SortKey::FeatureType => "Type",
            SortKey::FeatureSubtype => "Subtype",
            SortKey::FeatureL3 => "L3",
            SortKey::TopRank => "Top",
            SortKey::ShapRank => "SHAP",
        }
    }

    /// The column's value as displayed and compared.
    #[must_use]
    pub fn value(self, feature: &Feature) -> Cow<'_, str> {
        match self {
            SortKey::Id => Cow::Owned(feature.id.to_string()),
            SortKey::FeatureName => Cow::Borrowed(&feature.feature_name),
            SortKey::Description => Cow::Borrowed(&feature.description),
            SortKey::ShapRank => feature
                .shap_rank
                .map_or(Cow::Borrowed(""), |rank| Cow::Owned(rank.to_string())),
            _ => self
                .filter_key()
                .map_or(Cow::Borrowed(""), |key| Cow::Borrowed(feature.field(key))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortKeyError {
                input: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next order after a click on a column header.
    ///
    /// Clicking the current column flips the direction; clicking another
    /// column sorts it ascending.
    #[must_use]
    pub fn clicked(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }
}

/// Sorts `features` in place. Equal values keep their relative order.
pub fn sort_features(features: &mut [Feature], order: SortOrder) {
    features.sort_by(|a, b| {
        let ord = natural_cmp(&order.key.value(a), &order.key.value(b));
        match order.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Compares strings treating digit runs as numbers.
///
/// Text compares case-insensitively first; a full byte comparison breaks
/// remaining ties so the order is total.
///
/// ```
/// use std::cmp::Ordering;
/// use featcat_analysis::table::natural_cmp;
///
/// assert_eq!(natural_cmp("v9", "v10"), Ordering::Less);
/// assert_eq!(natural_cmp("30", "5"), Ordering::Greater);
/// assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(natural_cmp("", "a"), Ordering::Less);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut xs = a.chars().peekable();
    let mut ys = b.chars().peekable();
    loop {
        let ord = match (xs.peek().copied(), ys.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                cmp_digits(&take_digits(&mut xs), &take_digits(&mut ys))
            }
            (Some(x), Some(y)) => {
                xs.next();
                ys.next();
                x.to_lowercase().cmp(y.to_lowercase())
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Zero-based page index, clamped to the last page
    pub page: usize,
    pub total_pages: usize,
    /// One-based position of the first item, 0 when empty
    pub first: usize,
    /// One-based position of the last item, 0 when empty
    pub last: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Slices out page `page` (zero-based) of `items`.
///
/// A page index past the end yields the last page. An empty list has zero
/// pages and an empty page 0.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let start = page * page_size;
    let end = (start + page_size).min(total);
    Page {
        items: &items[start..end],
        page,
        total_pages,
        first: if total == 0 { 0 } else { start + 1 },
        last: end,
        total,
    }
}
