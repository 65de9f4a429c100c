// ---------------------------------------------------------------------------
// Filter predicate: inclusive value range on a numeric marker
// ---------------------------------------------------------------------------

/// Inclusive range `[min, max]` of a numeric marker's colour scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Return indices of rows whose value lies within `bounds`.
///
/// A row passes when:
/// * its value is present, and
/// * `bounds.min <= value <= bounds.max`
///
/// Missing and NaN values never pass. An inverted range (`min > max`)
/// selects nothing.
pub fn filtered_indices(values: &[Option<f64>], bounds: ScaleBounds) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_some_and(|x| bounds.contains(x)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_excludes_outlier() {
        let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)];
        let bounds = ScaleBounds { min: 1.0, max: 7.0 };
        assert_eq!(filtered_indices(&values, bounds), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filter_inclusive_and_missing() {
        let values = [Some(1.0), None, Some(f64::NAN), Some(7.0), Some(7.5)];
        let bounds = ScaleBounds { min: 1.0, max: 7.0 };
        assert_eq!(filtered_indices(&values, bounds), vec![0, 3]);
    }

    #[test]
    fn test_filter_inverted_range() {
        let values = [Some(1.0), Some(2.0)];
        let bounds = ScaleBounds { min: 2.0, max: 1.0 };
        assert!(filtered_indices(&values, bounds).is_empty());
    }
}
