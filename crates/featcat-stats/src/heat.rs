//! Heat scaling for cross-tab cells
//!
//! A heatmap cell is colored by the ratio of its count to the largest count
//! in the matrix. The ratio is partitioned into fixed tiers; the thresholds
//! are a contract that every renderer colors by, so they live here and
//! nowhere else.
//!
//! | Tier               | Condition               |
//! |--------------------|-------------------------|
//! | [`HeatLevel::Empty`]  | `count == 0`         |
//! | [`HeatLevel::Strong`] | `ratio >= 0.7`       |
//! | [`HeatLevel::Medium`] | `ratio > 0.4`        |
//! | [`HeatLevel::Light`]  | `ratio > 0.2`        |
//! | [`HeatLevel::Faint`]  | otherwise            |
//!
//! # Examples
//!
//! ```
//! use featcat_stats::heat::{self, HeatLevel};
//!
//! assert_eq!(heat::heat_ratio(5, 10), 0.5);
//! assert_eq!(HeatLevel::classify(5, 10), HeatLevel::Medium);
//! assert_eq!(HeatLevel::classify(1, 10), HeatLevel::Faint);
//! ```

use serde::Serialize;

/// Lower bound (inclusive) of the strongest tier.
pub const STRONG_THRESHOLD: f64 = 0.7;
/// Lower bound (exclusive) of the medium tier.
pub const MEDIUM_THRESHOLD: f64 = 0.4;
/// Lower bound (exclusive) of the light tier.
pub const LIGHT_THRESHOLD: f64 = 0.2;

/// Ratio of `count` to `max_count`.
///
/// `max_count` is floored at 1, so an all-zero matrix yields ratio 0.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn heat_ratio(count: usize, max_count: usize) -> f64 {
    count as f64 / max_count.max(1) as f64
}

/// Color-intensity tier of a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    Empty,
    Faint,
    Light,
    Medium,
    Strong,
}

impl HeatLevel {
    /// Classifies a cell by its count and the matrix maximum.
    #[must_use]
    pub fn classify(count: usize, max_count: usize) -> Self {
        if count == 0 {
            return Self::Empty;
        }
        let ratio = heat_ratio(count, max_count);
        if ratio >= STRONG_THRESHOLD {
            Self::Strong
        } else if ratio > MEDIUM_THRESHOLD {
            Self::Medium
        } else if ratio > LIGHT_THRESHOLD {
            Self::Light
        } else {
            Self::Faint
        }
    }

    /// Short glyph used by text renderers.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Faint => '.',
            Self::Light => ':',
            Self::Medium => '*',
            Self::Strong => '#',
        }
    }
}

/// Continuous shading alpha for renderers that blend a base color.
///
/// Maps the (clamped) ratio onto `0.15..=0.75`.
#[must_use]
pub fn opacity(count: usize, max_count: usize) -> f64 {
    if max_count == 0 {
        return 0.15;
    }
    0.15 + heat_ratio(count, max_count).min(1.0) * 0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_empty_even_with_zero_max() {
        assert_eq!(HeatLevel::classify(0, 0), HeatLevel::Empty);
        assert_eq!(HeatLevel::classify(0, 100), HeatLevel::Empty);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(HeatLevel::classify(7, 10), HeatLevel::Strong);
        assert_eq!(HeatLevel::classify(10, 10), HeatLevel::Strong);
        assert_eq!(HeatLevel::classify(69, 100), HeatLevel::Medium);
        assert_eq!(HeatLevel::classify(41, 100), HeatLevel::Medium);
        assert_eq!(HeatLevel::classify(40, 100), HeatLevel::Light);
        assert_eq!(HeatLevel::classify(21, 100), HeatLevel::Light);
        assert_eq!(HeatLevel::classify(20, 100), HeatLevel::Faint);
        assert_eq!(HeatLevel::classify(1, 100), HeatLevel::Faint);
    }

    #[test]
    fn test_ratio_floors_max_at_one() {
        assert!((heat_ratio(0, 0)).abs() < f64::EPSILON);
        assert!((heat_ratio(1, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_opacity_range() {
        assert!((opacity(0, 0) - 0.15).abs() < 1e-9);
        assert!((opacity(10, 10) - 0.75).abs() < 1e-9);
        assert!((opacity(5, 10) - 0.45).abs() < 1e-9);
    }
}
