//! Descriptive statistics for numeric markers.
//!
//! The scale of a numeric marker defaults to the Tukey fences
//! `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`, clipped to the observed data range.

use super::filter::ScaleBounds;

/// Multiplier applied to the IQR for the outlier fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// Quantile `q` (0..=1) of an ascending slice, interpolating linearly
/// between the two closest ranks.
///
/// Returns `NaN` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Summary of a numeric marker column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/non-finite values
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    pub iqr: f64,
    /// Lower outlier fence
    pub lower: f64,
    /// Upper outlier fence
    pub upper: f64,
}

impl ScaleStats {
    /// Compute statistics over the present, finite values.
    ///
    /// Returns `None` when no such value exists.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let mut finite: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return None;
        }
        let missing = values.len() - finite.len();
        finite.sort_by(f64::total_cmp);

        let q1 = quantile(&finite, 0.25);
        let q3 = quantile(&finite, 0.75);
        let iqr = q3 - q1;

        Some(Self {
            count: finite.len(),
            missing,
            min: finite[0],
            max: finite[finite.len() - 1],
            q1,
            q3,
            iqr,
            lower: q1 - FENCE_FACTOR * iqr,
            upper: q3 + FENCE_FACTOR * iqr,
        })
    }

    /// Default lower end of the colour scale: `max(min, lower fence)`.
    pub fn default_min(&self) -> f64 {
        self.min.max(self.lower)
    }

    /// Default upper end of the colour scale: `min(max, upper fence)`.
    pub fn default_max(&self) -> f64 {
        self.max.min(self.upper)
    }

    pub fn default_bounds(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.default_min(),
            max: self.default_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_quantile_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.25) - 1.75).abs() < 1e-10);
        assert!((quantile(&data, 0.5) - 2.5).abs() < 1e-10);
        assert!((quantile(&data, 0.75) - 3.25).abs() < 1e-10);
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_outlier_fences() {
        let stats = ScaleStats::from_values(&some(&[1.0, 2.0, 3.0, 4.0, 100.0])).unwrap();

        assert!((stats.q1 - 2.0).abs() < 1e-10);
        assert!((stats.q3 - 4.0).abs() < 1e-10);
        assert!((stats.iqr - 2.0).abs() < 1e-10);
        assert!((stats.lower + 1.0).abs() < 1e-10);
        assert!((stats.upper - 7.0).abs() < 1e-10);
        assert_eq!(stats.default_min(), 1.0);
        assert!((stats.default_max() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_variance() {
        let stats = ScaleStats::from_values(&some(&[3.0, 3.0, 3.0])).unwrap();
        assert_eq!(stats.iqr, 0.0);
        assert_eq!(stats.lower, stats.q1);
        assert_eq!(stats.upper, stats.q1);
        assert_eq!(stats.default_min(), 3.0);
        assert_eq!(stats.default_max(), 3.0);
    }

    #[test]
    fn test_missing_values_skipped() {
        let stats = ScaleStats::from_values(&[Some(5.0), None, Some(1.0), Some(f64::NAN)]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);

        assert!(ScaleStats::from_values(&[None, None]).is_none());
    }
}
