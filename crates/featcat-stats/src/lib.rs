//! Counting and scaling utilities for the featcat workspace.
//!
//! This crate provides the small statistical building blocks the analysis
//! engine composes into its views:
//!
//! - **Tallies**: Count keyed values while remembering discovery order
//! - **Percentages**: Zero-guarded shares, exact or rounded
//! - **Heat scaling**: Map a cell count onto a fixed set of intensity tiers
//! - **Value ranges**: Minimum and maximum over optional numeric samples
//!
//! # Modules
//!
//! - [`tally`]: Frequency counting with deterministic descending ordering
//! - [`percent`]: Percentage helpers that never divide by zero
//! - [`heat`]: Heat ratios and the tier thresholds consumers color by
//! - [`range`]: Numeric ranges over sparse data
//!
//! # Examples
//!
//! ## Counting values
//!
//! ```
//! use featcat_stats::tally::Tally;
//!
//! let tally = ["US", "PH", "US"].into_iter().collect::<Tally<_>>();
//! assert_eq!(tally.get(&"US"), 2);
//! assert_eq!(tally.into_sorted_desc(), vec![("US", 2), ("PH", 1)]);
//! ```
//!
//! ## Computing percentages
//!
//! ```
//! use featcat_stats::percent;
//!
//! assert_eq!(percent::rounded_percentage(1, 3), 33);
//! assert_eq!(percent::rounded_percentage(5, 0), 0);
//! ```
//!
//! ## Classifying heat
//!
//! ```
//! use featcat_stats::heat::HeatLevel;
//!
//! assert_eq!(HeatLevel::classify(0, 10), HeatLevel::Empty);
//! assert_eq!(HeatLevel::classify(8, 10), HeatLevel::Strong);
//! ```

pub mod heat;
pub mod percent;
pub mod range;
pub mod tally;
