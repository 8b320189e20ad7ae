//! Coverage and gap analysis
//!
//! Three views compare the dataset against fixed expectations:
//!
//! - **Geo coverage**: a [`GeoMatrix`] over the canonical geographies and
//!   categories, where sparsely populated cells are reported as
//!   [`CoverageGap`]s
//! - **Brainstorm comparison**: feature counts per target area of the feature
//!   brainstorming framework ([`BRAINSTORM_SECTIONS`]), classified against
//!   their planned counts
//! - **Manipulation risk**: the share of records per [`RiskLevel`]
//!
//! [`KNOWN_GAPS`] lists documented gaps that cannot be derived from the data.
//!
//! # Examples
//!
//! ```
//! use featcat_analysis::gap::{self, GapStatus};
//! use featcat_catalog::Feature;
//!
//! let features = vec![
//!     Feature { id: 1, geo: "PH".into(), primary_category: "Bureau".into(), ..Feature::default() },
//! ];
//!
//! let matrix = gap::GeoMatrix::build(&features);
//! assert_eq!(matrix.cell("PH", "Bureau"), 1);
//! assert_eq!(matrix.cell("PH", "Cash Flow"), 0);
//!
//! assert_eq!(GapStatus::classify(50, Some(100)), GapStatus::Partial);
//! assert_eq!(GapStatus::classify(3, None), GapStatus::Neutral);
//! ```

use std::collections::BTreeMap;

use featcat_catalog::{Feature, FilterKey, or_unknown};
use featcat_stats::{
    heat::{self, HeatLevel},
    percent,
};
use serde::Serialize;

/// Geographies of the coverage heatmap, in display order.
pub const GEO_ORDER: [&str; 4] = ["India", "MX", "PH", "US"];

/// Categories of the coverage heatmap, in display order.
pub const CATEGORY_ORDER: [&str; 6] = [
    "Bureau",
    "Cash Flow",
    "Device Data",
    "Loan Activity",
    "Platform Data",
    "User-Reported Data",
];

/// Cells with fewer records than this are coverage gaps.
pub const COVERAGE_GAP_THRESHOLD: usize = 10;

/// One geography's row of the coverage heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoMatrixRow {
    pub geo: &'static str,
    /// Counts aligned with [`CATEGORY_ORDER`]
    pub counts: [usize; CATEGORY_ORDER.len()],
    pub total: usize,
}

/// Canonical geography × category coverage matrix.
///
/// Every pair of [`GEO_ORDER`] and [`CATEGORY_ORDER`] is present, zero when
/// no record falls into it. Records outside the canonical lists are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoMatrix {
    pub categories: [&'static str; CATEGORY_ORDER.len()],
    pub rows: [GeoMatrixRow; GEO_ORDER.len()],
    /// Largest cell count, at least 1
    pub max_count: usize,
}

/// A sparsely populated heatmap cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub geo: &'static str,
    pub category: &'static str,
    pub count: usize,
}

impl GeoMatrix {
    #[must_use]
    pub fn build(features: &[Feature]) -> Self {
        let mut rows = GEO_ORDER.map(|geo| GeoMatrixRow {
            geo,
            counts: [0; CATEGORY_ORDER.len()],
            total: 0,
        });
        for feature in features {
            let row = GEO_ORDER.iter().position(|&g| g == feature.geo);
            let col = CATEGORY_ORDER
                .iter()
                .position(|&c| c == feature.primary_category);
            if let (Some(row), Some(col)) = (row, col) {
                rows[row].counts[col] += 1;
                rows[row].total += 1;
            }
        }
        let max_count = rows
            .iter()
            .flat_map(|row| row.counts)
            .max()
            .unwrap_or(0)
            .max(1);
        Self {
            categories: CATEGORY_ORDER,
            rows,
            max_count,
        }
    }

    /// Count of one cell; zero outside the canonical lists.
    #[must_use]
    pub fn cell(&self, geo: &str, category: &str) -> usize {
        let row = self.rows.iter().find(|r| r.geo == geo);
        let col = self.categories.iter().position(|&c| c == category);
        match (row, col) {
            (Some(row), Some(col)) => row.counts[col],
            _ => 0,
        }
    }

    #[must_use]
    pub fn heat_level(&self, count: usize) -> HeatLevel {
        HeatLevel::classify(count, self.max_count)
    }

    /// Continuous shading intensity of a cell.
    #[must_use]
    pub fn opacity(&self, count: usize) -> f64 {
        heat::opacity(count, self.max_count)
    }

    /// Cells with fewer than `threshold` records, fewest first.
    ///
    /// Cells with equal counts keep heatmap order (geography, then category).
    #[must_use]
    pub fn coverage_gaps(&self, threshold: usize) -> Vec<CoverageGap> {
        let mut gaps = self
            .rows
            .iter()
            .flat_map(|row| {
                self.categories
                    .iter()
                    .zip(row.counts)
                    .filter(|&(_, count)| count < threshold)
                    .map(|(&category, count)| CoverageGap {
                        geo: row.geo,
                        category,
                        count,
                    })
            })
            .collect::<Vec<_>>();
        gaps.sort_by_key(|gap| gap.count);
        gaps
    }
}

/// Which taxonomy values count toward a brainstorm category.
///
/// A record matches when any configured rule matches: an exact category, an
/// exact type, or a subtype containing one of the fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxonomyMatch {
    pub primary_category: &'static [&'static str],
    pub feature_type: &'static [&'static str],
    pub feature_subtype: &'static [&'static str],
}

impl TaxonomyMatch {
    const NONE: Self = Self {
        primary_category: &[],
        feature_type: &[],
        feature_subtype: &[],
    };

    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        self.primary_category.contains(&feature.primary_category.as_str())
            || self.feature_type.contains(&feature.feature_type.as_str())
            || self
                .feature_subtype
                .iter()
                .any(|fragment| feature.feature_subtype.contains(fragment))
    }
}

/// A target area of the feature brainstorming framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrainstormCategory {
    pub id: &'static str,
    pub label: &'static str,
    /// Planned feature count; `None` for open-ended areas
    pub planned: Option<usize>,
    pub description: &'static str,
    pub taxonomy_match: TaxonomyMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrainstormSection {
    pub id: &'static str,
    pub label: &'static str,
    pub categories: &'static [BrainstormCategory],
}

pub static BRAINSTORM_SECTIONS: [BrainstormSection; 3] = [
    BrainstormSection {
        id: "internal",
        label: "Internal Data",
        categories: &[
            BrainstormCategory {
                id: "loans",
                label: "Loans",
                planned: Some(30),
                description: "Loan amounts, counts, tenure, time sequence",
                taxonomy_match: TaxonomyMatch {
                    feature_type: &["Credit/Loan History"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "repayment",
                label: "Repayment",
                planned: Some(50),
                description: "Repayment amounts, rates, days since repay",
                taxonomy_match: TaxonomyMatch {
                    feature_subtype: &[
                        "Collections, Recoveries, Repayments",
                        "Payment Behavior",
                        "Repayment Metrics",
                    ],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "applications",
                label: "Applications",
                planned: Some(50),
                description: "Application counts, desired amounts, timing",
                taxonomy_match: TaxonomyMatch {
                    feature_type: &["Loan Application"],
                    feature_subtype: &["Application Timing", "Application Counts"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "collections",
                label: "Collections",
                planned: Some(10),
                description: "Call results, PTP, connect rates",
                taxonomy_match: TaxonomyMatch {
                    feature_subtype: &["Collections, Recoveries, Repayments"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "app_install",
                label: "App Installation",
                planned: Some(30),
                description: "App types, popularity, blacklist, install timing",
                taxonomy_match: TaxonomyMatch {
                    feature_type: &["App Ecosystem"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "user_profile",
                label: "User Profile",
                planned: Some(10),
                description: "Age, ID type, income, gender, education",
                taxonomy_match: TaxonomyMatch {
                    primary_category: &["User-Reported Data"],
                    feature_type: &["Questionnaire", "KYC/Identity"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "device_behavior",
                label: "Device & App Behavior",
                planned: Some(10),
                description: "Login times, password changes, IP counts",
                taxonomy_match: TaxonomyMatch {
                    feature_type: &["Device Hardware and Network", "User Engagement"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "marketing",
                label: "Marketing/Acquisition",
                planned: Some(5),
                description: "Channels, referral tiers",
                taxonomy_match: TaxonomyMatch {
                    feature_type: &["Acquisition Channel"],
                    ..TaxonomyMatch::NONE
                },
            },
        ],
    },
    BrainstormSection {
        id: "sms",
        label: "SMS Data",
        categories: &[BrainstormCategory {
            id: "sms_all",
            label: "SMS Features",
            planned: Some(100),
            description: "Overdue, due reminders, inquiries, transactions",
            taxonomy_match: TaxonomyMatch {
                feature_type: &["SMS"],
                ..TaxonomyMatch::NONE
            },
        }],
    },
    BrainstormSection {
        id: "external",
        label: "External Data",
        categories: &[
            BrainstormCategory {
                id: "bureau",
                label: "Bureau",
                planned: None,
                description: "Credit bureau data (CIBI, Experian, etc.)",
                taxonomy_match: TaxonomyMatch {
                    primary_category: &["Bureau"],
                    ..TaxonomyMatch::NONE
                },
            },
            BrainstormCategory {
                id: "cashflow",
                label: "Cash Flow (Bank)",
                planned: None,
                description: "Bank transaction data (Plaid, etc.)",
                taxonomy_match: TaxonomyMatch {
                    primary_category: &["Cash Flow"],
                    ..TaxonomyMatch::NONE
                },
            },
        ],
    },
];

/// Progress of a brainstorm category toward its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// At or above the planned count
    AtTarget,
    /// At least half of the planned count
    Partial,
    /// Below half of the planned count
    Gap,
    /// No planned count
    Neutral,
}

impl GapStatus {
    /// Classifies `current` against `planned`.
    ///
    /// A planned count of zero is always met.
    #[must_use]
    pub fn classify(current: usize, planned: Option<usize>) -> Self {
        match planned {
            None => Self::Neutral,
            Some(planned) if current >= planned => Self::AtTarget,
            Some(planned) if current * 2 >= planned => Self::Partial,
            Some(_) => Self::Gap,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AtTarget => "at target",
            Self::Partial => "partial",
            Self::Gap => "gap",
            Self::Neutral => "neutral",
        }
    }
}

/// A brainstorm category paired with its observed counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrainstormCategoryResult {
    #[serde(flatten)]
    pub category: &'static BrainstormCategory,
    pub current: usize,
    /// Matching records per geography, canonical geographies always present
    pub by_geo: BTreeMap<String, usize>,
    pub status: GapStatus,
    /// Percentage of the plan reached, capped at 100; `None` without a plan
    pub progress: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrainstormSectionResult {
    pub id: &'static str,
    pub label: &'static str,
    pub categories: Vec<BrainstormCategoryResult>,
    /// Sum of the categories' current counts
    pub total: usize,
}

/// Counts `features` against every brainstorm category.
///
/// A record matching several categories counts toward each of them.
#[must_use]
pub fn brainstorm(features: &[Feature]) -> Vec<BrainstormSectionResult> {
    BRAINSTORM_SECTIONS
        .iter()
        .map(|section| {
            let categories = section
                .categories
                .iter()
                .map(|category| compare(category, features))
                .collect::<Vec<_>>();
            BrainstormSectionResult {
                id: section.id,
                label: section.label,
                total: categories.iter().map(|c| c.current).sum(),
                categories,
            }
        })
        .collect()
}

fn compare(category: &'static BrainstormCategory, features: &[Feature]) -> BrainstormCategoryResult {
    let mut by_geo = GEO_ORDER
        .iter()
        .map(|&geo| (geo.to_owned(), 0))
        .collect::<BTreeMap<_, _>>();
    let mut current = 0;
    for feature in features
        .iter()
        .filter(|f| category.taxonomy_match.matches(f))
    {
        current += 1;
        *by_geo.entry(or_unknown(&feature.geo).to_owned()).or_default() += 1;
    }
    BrainstormCategoryResult {
        category,
        current,
        by_geo,
        status: GapStatus::classify(current, category.planned),
        progress: category
            .planned
            .map(|planned| match planned {
                0 => 100,
                _ => percent::rounded_percentage(current, planned).min(100),
            }),
    }
}

/// How easily a category's data can be gamed by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low (Third-Party)",
            RiskLevel::Medium => "Medium (On-Us)",
            RiskLevel::High => "High (Self-Reported)",
        }
    }

    #[must_use]
    pub const fn categories(self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &["Bureau", "Cash Flow"],
            RiskLevel::Medium => &["Device Data", "Loan Activity"],
            RiskLevel::High => &["User-Reported Data", "Platform Data"],
        }
    }

    /// The bucket of a primary category, if it is mapped.
    #[must_use]
    pub fn of(primary_category: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.categories().contains(&primary_category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBucket {
    pub level: RiskLevel,
    pub label: &'static str,
    pub count: usize,
    /// Share of all records, rounded on its own
    pub percentage: u32,
}

/// Splits `features` into the three risk buckets.
///
/// Percentages are relative to the whole dataset, including records whose
/// category has no bucket, and are rounded independently.
#[must_use]
pub fn risk_distribution(features: &[Feature]) -> [RiskBucket; 3] {
    let mut counts = [0; RiskLevel::ALL.len()];
    for level in features.iter().filter_map(|f| RiskLevel::of(&f.primary_category)) {
        counts[level as usize] += 1;
    }
    RiskLevel::ALL.map(|level| RiskBucket {
        level,
        label: level.label(),
        count: counts[level as usize],
        percentage: percent::rounded_percentage(counts[level as usize], features.len()),
    })
}

/// Geography value of a known gap that spans every market.
pub const ALL_GEOS: &str = "All";

/// A documented gap that the dataset cannot show by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownGap {
    pub id: &'static str,
    pub geo: &'static str,
    pub category: &'static str,
    pub current: usize,
    pub description: &'static str,
}

impl KnownGap {
    /// Filter toggles showing the gap's records, unless it spans every market.
    #[must_use]
    pub fn drill_down(&self) -> Option<Vec<(FilterKey, String)>> {
        (self.geo != ALL_GEOS).then(|| {
            vec![
                (FilterKey::Geo, self.geo.to_owned()),
                (FilterKey::PrimaryCategory, self.category.to_owned()),
            ]
        })
    }
}

pub static KNOWN_GAPS: [KnownGap; 6] = [
    KnownGap {
        id: "ph_bureau",
        geo: "PH",
        category: "Bureau",
        current: 0,
        description: "No bureau features - CIBI/LenderLink not integrated",
    },
    KnownGap {
        id: "india_cashflow",
        geo: "India",
        category: "Cash Flow",
        current: 4,
        description: "Minimal bank data - mostly bureau-focused",
    },
    KnownGap {
        id: "ph_sms",
        geo: "PH",
        category: "SMS",
        current: 0,
        description: "No SMS features in production",
    },
    KnownGap {
        id: "us_sms",
        geo: "US",
        category: "SMS",
        current: 0,
        description: "No SMS features in production",
    },
    KnownGap {
        id: "mx_bureau",
        geo: "MX",
        category: "Bureau",
        current: 15,
        description: "Limited bureau coverage",
    },
    KnownGap {
        id: "lenderlink",
        geo: ALL_GEOS,
        category: "LenderLink",
        current: 0,
        description: "LenderLink features not tagged in taxonomy",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{feature, portfolio, scenario, tagged};

    #[test]
    fn test_geo_matrix_has_every_cell() {
        let matrix = GeoMatrix::build(&scenario());
        assert_eq!(matrix.rows.len(), GEO_ORDER.len());
        assert_eq!(matrix.cell("PH", "Bureau"), 1);
        assert_eq!(matrix.cell("PH", "Cash Flow"), 0);
        assert_eq!(matrix.cell("India", "Platform Data"), 0);
        assert_eq!(matrix.cell("US", "Bureau"), 1);
        assert_eq!(matrix.max_count, 1);
    }

    #[test]
    fn test_geo_matrix_ignores_unlisted_values() {
        let features = vec![
            feature(1, "BR", "Bureau"),
            feature(2, "US", "Telco"),
            feature(3, "", "Bureau"),
        ];
        let matrix = GeoMatrix::build(&features);
        assert!(matrix.rows.iter().all(|r| r.total == 0));
        assert_eq!(matrix.max_count, 1);
    }

    #[test]
    fn test_coverage_gaps_sorted_ascending_and_stable() {
        let mut features = (1..=12)
            .map(|id| feature(id, "US", "Bureau"))
            .collect::<Vec<_>>();
        features.extend((13..=15).map(|id| feature(id, "PH", "Cash Flow")));
        let matrix = GeoMatrix::build(&features);
        let gaps = matrix.coverage_gaps(COVERAGE_GAP_THRESHOLD);

        assert_eq!(gaps.len(), GEO_ORDER.len() * CATEGORY_ORDER.len() - 1);
        assert!(gaps.windows(2).all(|w| w[0].count <= w[1].count));
        assert_eq!(
            gaps[0],
            CoverageGap {
                geo: "India",
                category: "Bureau",
                count: 0
            }
        );
        assert_eq!(
            gaps.last().unwrap(),
            &CoverageGap {
                geo: "PH",
                category: "Cash Flow",
                count: 3
            }
        );
        assert!(!gaps.iter().any(|g| g.geo == "US" && g.category == "Bureau"));
    }

    #[test]
    fn test_opacity_scales_with_max() {
        let features = (1..=4)
            .map(|id| feature(id, "MX", "Bureau"))
            .collect::<Vec<_>>();
        let matrix = GeoMatrix::build(&features);
        assert!((matrix.opacity(4) - 0.75).abs() < 1e-9);
        assert!((matrix.opacity(0) - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_gap_status_thresholds() {
        assert_eq!(GapStatus::classify(50, Some(100)), GapStatus::Partial);
        assert_eq!(GapStatus::classify(100, Some(100)), GapStatus::AtTarget);
        assert_eq!(GapStatus::classify(120, Some(100)), GapStatus::AtTarget);
        assert_eq!(GapStatus::classify(20, Some(100)), GapStatus::Gap);
        assert_eq!(GapStatus::classify(49, Some(100)), GapStatus::Gap);
        assert_eq!(GapStatus::classify(0, None), GapStatus::Neutral);
        assert_eq!(GapStatus::classify(1000, None), GapStatus::Neutral);
        assert_eq!(GapStatus::classify(0, Some(0)), GapStatus::AtTarget);
        // 5 planned: 3 is over half, 2 is not
        assert_eq!(GapStatus::classify(3, Some(5)), GapStatus::Partial);
        assert_eq!(GapStatus::classify(2, Some(5)), GapStatus::Gap);
    }

    #[test]
    fn test_matchers() {
        let loans = &BRAINSTORM_SECTIONS[0].categories[0];
        let repayment = &BRAINSTORM_SECTIONS[0].categories[1];
        let record = tagged(
            1,
            ("PH", "", ""),
            ("Loan Activity", "Credit/Loan History", "Late Payment Behavior Flags", ""),
        );
        assert!(loans.taxonomy_match.matches(&record));
        // subtype fragments match by containment
        assert!(repayment.taxonomy_match.matches(&record));

        let unrelated = tagged(2, ("PH", "", ""), ("Bureau", "Credit Report", "", ""));
        assert!(!loans.taxonomy_match.matches(&unrelated));
        assert!(!repayment.taxonomy_match.matches(&unrelated));
    }

    #[test]
    fn test_brainstorm_counts() {
        let results = brainstorm(&portfolio());
        let find = |id: &str| {
            results
                .iter()
                .flat_map(|s| &s.categories)
                .find(|c| c.category.id == id)
                .unwrap()
        };

        let loans = find("loans");
        assert_eq!(loans.current, 3);
        assert_eq!(loans.by_geo["US"], 2);
        assert_eq!(loans.by_geo["PH"], 1);
        assert_eq!(loans.by_geo["India"], 0);
        assert_eq!(loans.status, GapStatus::Gap);
        assert_eq!(loans.progress, Some(10));

        assert_eq!(find("repayment").current, 3);
        assert_eq!(find("collections").current, 1);
        assert_eq!(find("applications").current, 1);
        assert_eq!(find("app_install").current, 1);
        assert_eq!(find("user_profile").current, 2);
        assert_eq!(find("device_behavior").current, 1);
        assert_eq!(find("sms_all").current, 1);

        let bureau = find("bureau");
        assert_eq!(bureau.current, 3);
        assert_eq!(bureau.status, GapStatus::Neutral);
        assert_eq!(bureau.progress, None);

        let internal = &results[0];
        assert_eq!(
            internal.total,
            internal.categories.iter().map(|c| c.current).sum::<usize>()
        );
    }

    #[test]
    fn test_brainstorm_progress_is_capped() {
        let features = (1..=8)
            .map(|id| tagged(id, ("MX", "", ""), ("Platform Data", "Acquisition Channel", "", "")))
            .collect::<Vec<_>>();
        let results = brainstorm(&features);
        let marketing = results[0]
            .categories
            .iter()
            .find(|c| c.category.id == "marketing")
            .unwrap();
        assert_eq!(marketing.current, 8);
        assert_eq!(marketing.progress, Some(100));
        assert_eq!(marketing.status, GapStatus::AtTarget);
    }

    #[test]
    fn test_brainstorm_unset_geo_counts_as_unknown() {
        let features = vec![tagged(1, ("", "", ""), ("Bureau", "", "", ""))];
        let results = brainstorm(&features);
        let bureau = &results[2].categories[0];
        assert_eq!(bureau.by_geo["Unknown"], 1);
        assert_eq!(bureau.by_geo.values().sum::<usize>(), bureau.current);
    }

    #[test]
    fn test_risk_distribution_example() {
        let mut features = vec![];
        let tags = [
            ("Bureau", 4),
            ("Device Data", 3),
            ("User-Reported Data", 3),
        ];
        for (category, n) in tags {
            for _ in 0..n {
                features.push(feature(features.len() as u64 + 1, "US", category));
            }
        }
        let buckets = risk_distribution(&features);
        let percentages = buckets
            .iter()
            .map(|b| (b.level, b.percentage))
            .collect::<Vec<_>>();
        assert_eq!(
            percentages,
            vec![
                (RiskLevel::Low, 40),
                (RiskLevel::Medium, 30),
                (RiskLevel::High, 30)
            ]
        );
    }

    #[test]
    fn test_risk_percentages_are_not_renormalized() {
        let features = vec![
            feature(1, "US", "Bureau"),
            feature(2, "US", "Loan Activity"),
            feature(3, "US", "Platform Data"),
        ];
        let buckets = risk_distribution(&features);
        assert!(buckets.iter().all(|b| b.percentage == 33));
        assert_eq!(buckets.iter().map(|b| b.percentage).sum::<u32>(), 99);
    }

    #[test]
    fn test_risk_unmapped_and_empty() {
        let features = vec![feature(1, "US", "Telco"), feature(2, "US", "Cash Flow")];
        let buckets = risk_distribution(&features);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].percentage, 50);
        assert_eq!(buckets[1].count + buckets[2].count, 0);

        let buckets = risk_distribution(&[]);
        assert!(buckets.iter().all(|b| b.count == 0 && b.percentage == 0));
        assert_eq!(buckets[2].label, "High (Self-Reported)");
    }

    #[test]
    fn test_known_gap_drill_down() {
        assert_eq!(
            KNOWN_GAPS[0].drill_down(),
            Some(vec![
                (FilterKey::Geo, "PH".into()),
                (FilterKey::PrimaryCategory, "Bureau".into())
            ])
        );
        let lenderlink = KNOWN_GAPS.iter().find(|g| g.id == "lenderlink").unwrap();
        assert_eq!(lenderlink.drill_down(), None);
    }
}
