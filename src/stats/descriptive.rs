use serde::Serialize;

use super::StatsError;
use crate::data::model::{Column, HousingTable};

/// Arithmetic mean of `values`.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyResult);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of one column of the table.
pub fn summary_stats(table: &HousingTable, column: Column) -> Result<f64, StatsError> {
    mean(&table.column(column))
}

/// Sample standard deviation (`n - 1` denominator). `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values).ok()?;
    let ss = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile `p` in `[0, 1]` of ascending `sorted` values, interpolating
/// linearly between the two closest ranks.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "quantile of an empty slice");
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Box plot spread
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers (1.5 × IQR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value not below `q1 - 1.5 * iqr`.
    pub lower_whisker: f64,
    /// Largest value not above `q3 + 1.5 * iqr`.
    pub upper_whisker: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn new(values: &[f64]) -> Result<Self, StatsError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Err(StatsError::EmptyResult);
        };

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

        let mut inside = sorted
            .iter()
            .copied()
            .filter(|v| (lo_fence..=hi_fence).contains(v));
        // The quartiles lie inside the fences, so at least one value does too.
        let lower_whisker = inside.next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(lower_whisker);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect();

        Ok(BoxStats {
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Mean `y` for each distinct `x`, ordered by `x`.
pub fn grouped_mean(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));

    let mut out: Vec<[f64; 2]> = Vec::new();
    let mut count = 0usize;
    for [x, y] in sorted {
        match out.last_mut() {
            Some(last) if last[0] == x => {
                count += 1;
                last[1] += (y - last[1]) / count as f64;
            }
            _ => {
                out.push([x, y]);
                count = 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::record;

    #[test]
    fn mean_of_single_row_is_that_value() {
        let table = HousingTable::from_records(vec![record(27.5, 6.1)]);
        assert_eq!(summary_stats(&table, Column::Medv), Ok(27.5));
        assert_eq!(summary_stats(&table, Column::Rm), Ok(6.1));
    }

    #[test]
    fn mean_of_empty_table_is_empty_result() {
        let table = HousingTable::default();
        assert_eq!(summary_stats(&table, Column::Medv), Err(StatsError::EmptyResult));
    }

    #[test]
    fn mean_and_std_dev() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Ok(2.5));
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-9);
        assert_eq!(sample_std_dev(&[1.0]), None);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(quantile_sorted(&sorted, 0.5), 2.5);
        assert_eq!(quantile_sorted(&sorted, 0.25), 1.75);
        assert_eq!(quantile_sorted(&sorted, 1.0), 4.0);
    }

    #[test]
    fn box_stats_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let stats = BoxStats::new(&values).unwrap();
        assert_eq!(stats.q1, 3.25);
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.q3, 7.75);
        assert_eq!(stats.iqr(), 4.5);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 9.0);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn box_stats_of_single_value() {
        let stats = BoxStats::new(&[4.0]).unwrap();
        assert_eq!((stats.lower_whisker, stats.median, stats.upper_whisker), (4.0, 4.0, 4.0));
        assert!(stats.outliers.is_empty());
        assert_eq!(BoxStats::new(&[]), Err(StatsError::EmptyResult));
    }

    #[test]
    fn grouped_mean_averages_duplicate_x() {
        let points = [[20.2, 10.0], [14.7, 30.0], [20.2, 20.0], [14.7, 40.0], [17.0, 25.0]];
        assert_eq!(
            grouped_mean(&points),
            vec![[14.7, 35.0], [17.0, 25.0], [20.2, 15.0]]
        );
    }

    proptest! {
        #[test]
        fn box_stats_are_ordered(values in prop::collection::vec(0.0f64..100.0, 1..60)) {
            let stats = BoxStats::new(&values).unwrap();
            prop_assert!(stats.min <= stats.q1);
            prop_assert!(stats.q1 <= stats.median && stats.median <= stats.q3);
            prop_assert!(stats.q3 <= stats.max);
            prop_assert!(stats.min <= stats.lower_whisker);
            prop_assert!(stats.lower_whisker <= stats.upper_whisker);
            prop_assert!(stats.upper_whisker <= stats.max);
            prop_assert_eq!(
                stats.outliers.len() + values.iter().filter(|v| (stats.lower_whisker..=stats.upper_whisker).contains(v)).count(),
                values.len()
            );

            let m = mean(&values).unwrap();
            prop_assert!(stats.min - 1e-9 <= m && m <= stats.max + 1e-9);
        }
    }
}
