/// Descriptive statistics summarizing a numeric sample.
///
/// This structure contains the measures of central tendency and dispersion
/// reported for numeric columns: count, mean, sample standard deviation and
/// the extrema of a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the sample.
    pub count: usize,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean (average) of the sample.
    pub mean: f64,
    /// The sample variance (Bessel-corrected, denominator `n - 1`).
    pub variance: f64,
    /// The sample standard deviation, `sqrt(variance)`.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from a sequence of values.
    ///
    /// The variance uses Bessel's correction. A sample with a single value has
    /// a variance and standard deviation of exactly `0.0`.
    ///
    /// Extrema are selected with [`f64::total_cmp`], so the result does not
    /// depend on the position of `NaN` values in the input.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use colstats_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(stats.count, 3);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 3.0);
    /// assert_eq!(stats.mean, 2.0);
    /// assert_eq!(stats.std_dev, 1.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        Self::from_slice(&values)
    }

    /// Computes descriptive statistics from a slice of values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the slice contains at least one value
    /// * `None` - if the slice is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use colstats_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_slice(&[4.0]).unwrap();
    /// assert_eq!(stats.mean, 4.0);
    /// assert_eq!(stats.std_dev, 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values.iter().fold((first, first), |(min, max), &v| {
            (
                if v.total_cmp(&min).is_lt() { v } else { min },
                if v.total_cmp(&max).is_gt() { v } else { max },
            )
        });

        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = if count > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_sample() {
        assert!(DescriptiveStats::new(Vec::<f64>::new()).is_none());
        assert!(DescriptiveStats::from_slice(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_zero_std_dev() {
        let stats = DescriptiveStats::from_slice(&[42.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 42.5);
        assert_eq!(stats.max, 42.5);
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_bessel_corrected_std_dev() {
        // Sum of squared deviations is 32; population variance would be 4.0.
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_close(stats.mean, 5.0);
        assert_close(stats.variance, 32.0 / 7.0);
        assert_close(stats.std_dev, (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_three_values() {
        let stats = DescriptiveStats::new([3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_close(stats.mean, 2.0);
        assert_close(stats.std_dev, 1.0);
    }

    #[test]
    fn test_negative_and_fractional_values() {
        let stats = DescriptiveStats::new([-1.5, 0.5, -3.0]).unwrap();
        assert_eq!(stats.min, -3.0);
        assert_eq!(stats.max, 0.5);
        assert_close(stats.mean, -4.0 / 3.0);
    }

    #[test]
    fn test_infinite_values_bound_extrema() {
        let stats = DescriptiveStats::new([1.0, f64::INFINITY, f64::NEG_INFINITY]).unwrap();
        assert_eq!(stats.min, f64::NEG_INFINITY);
        assert_eq!(stats.max, f64::INFINITY);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_constant_sample() {
        let stats = DescriptiveStats::new(vec![7.0; 10]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, stats.max);
    }
}
