//! Zero-guarded percentages
//!
//! Every share shown in the catalog is computed against some total that may
//! be zero (an empty dataset, an empty filter result). These helpers return
//! `0` in that case instead of `NaN`.
//!
//! Rounded percentages are computed independently per bucket. A set of them
//! is not guaranteed to sum to exactly 100 and is never renormalized: each
//! value stays faithful to its own count.
//!
//! ```
//! use featcat_stats::percent;
//!
//! let counts = [1, 1, 1];
//! let total = counts.iter().sum();
//! let pcts = counts
//!     .iter()
//!     .map(|&c| percent::rounded_percentage(c, total))
//!     .collect::<Vec<_>>();
//! assert_eq!(pcts, vec![33, 33, 33]);
//! ```

/// Share of `count` in `total` as a percentage in `0.0..=100.0`.
///
/// Returns `0.0` when `total` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Share of `count` in `total`, rounded to the nearest whole percent.
///
/// Halves round away from zero. Returns `0` when `total` is zero.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn rounded_percentage(count: usize, total: usize) -> u32 {
    percentage(count, total).round() as u32
}
