/// Closed numeric range observed in a dataset.
///
/// Computed over sparse samples: values that are absent or `NaN` do not
/// contribute.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ValueRange {
    /// The minimum observed value.
    pub min: f64,
    /// The maximum observed value.
    pub max: f64,
}

impl ValueRange {
    /// Computes the range of the finite-or-infinite, non-`NaN` values.
    ///
    /// # Returns
    ///
    /// * `Some(ValueRange)` - if at least one non-`NaN` value exists
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// # use featcat_stats::range::ValueRange;
    /// let range = ValueRange::new([Some(30.0), None, Some(5.0), Some(f64::NAN)]).unwrap();
    /// assert_eq!(range.min, 5.0);
    /// assert_eq!(range.max, 30.0);
    ///
    /// assert!(ValueRange::new([None, Some(f64::NAN)]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<Self>, v| {
                Some(match acc {
                    None => Self { min: v, max: v },
                    Some(r) => Self {
                        min: r.min.min(v),
                        max: r.max.max(v),
                    },
                })
            })
    }

    /// Like [`ValueRange::new`], substituting `default` when nothing was observed.
    #[must_use]
    pub fn new_or<I>(values: I, default: Self) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self::new(values).unwrap_or(default)
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}
