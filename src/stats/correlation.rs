use std::cmp::Ordering;

use serde::Serialize;

use super::StatsError;
use crate::data::model::{Column, HousingTable};

/// Pearson correlation coefficient of two equally long series.
///
/// `None` when there are fewer than two points or either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - mean_x, yi - mean_y);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Whether a series has at least two points and is not constant.
fn varies(values: &[f64]) -> bool {
    values.len() >= 2 && values.iter().any(|v| *v != values[0])
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Square matrix of pairwise Pearson correlations, row-major over `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Correlation at `(row, col)`; `None` where it is undefined.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values[row * self.columns.len() + col]
    }

    /// Correlation between two named columns.
    pub fn between(&self, a: Column, b: Column) -> Option<f64> {
        let row = self.columns.iter().position(|&c| c == a)?;
        let col = self.columns.iter().position(|&c| c == b)?;
        self.get(row, col)
    }
}

/// Pairwise Pearson correlation across every column of the table.
///
/// The diagonal is exactly 1.0 for each non-constant column; entries involving
/// a constant column are undefined.
pub fn correlation_matrix(table: &HousingTable) -> Result<CorrelationMatrix, StatsError> {
    correlation_matrix_of(table, &Column::ALL)
}

/// Correlation matrix restricted to `columns`, in the given order.
pub fn correlation_matrix_of(
    table: &HousingTable,
    columns: &[Column],
) -> Result<CorrelationMatrix, StatsError> {
    if table.is_empty() {
        return Err(StatsError::EmptyResult);
    }
    let series: Vec<Vec<f64>> = columns.iter().map(|&c| table.column(c)).collect();
    let n = columns.len();
    let mut values = vec![None; n * n];
    for i in 0..n {
        values[i * n + i] = varies(&series[i]).then_some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }
    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Ranked correlation against a target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedCorrelation {
    pub feature: Column,
    pub correlation: Option<f64>,
}

/// Orders defined correlations descending, undefined ones last.
fn descending(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Correlation of every column with `target`, sorted descending.
///
/// The target itself is included; its self-correlation of 1.0 ranks first.
pub fn ranked_correlation(
    table: &HousingTable,
    target: Column,
) -> Result<Vec<RankedCorrelation>, StatsError> {
    if table.is_empty() {
        return Err(StatsError::EmptyResult);
    }
    let target_values = table.column(target);
    let self_correlation = varies(&target_values).then_some(1.0);

    let mut ranked: Vec<RankedCorrelation> = std::iter::once(RankedCorrelation {
        feature: target,
        correlation: self_correlation,
    })
    .chain(
        Column::ALL
            .into_iter()
            .filter(|&c| c != target)
            .map(|c| RankedCorrelation {
                feature: c,
                correlation: pearson(&table.column(c), &target_values),
            }),
    )
    .collect();

    // Stable: the target stays ahead of any feature that ties at 1.0.
    ranked.sort_by(|a, b| descending(&a.correlation, &b.correlation));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::HousingRecord;

    fn sample_table() -> HousingTable {
        let rows = [
            // (rm, lstat, crim, tax, medv)
            (6.575, 4.98, 0.006, 296.0, 24.0),
            (6.421, 9.14, 0.027, 242.0, 21.6),
            (7.185, 4.03, 0.027, 242.0, 34.7),
            (6.998, 2.94, 0.032, 222.0, 33.4),
            (6.012, 12.43, 0.088, 311.0, 22.9),
            (5.631, 29.93, 0.211, 311.0, 16.5),
            (6.004, 17.10, 0.171, 311.0, 18.9),
        ];
        HousingTable::from_records(
            rows.iter()
                .map(|&(rm, lstat, crim, tax, medv)| HousingRecord {
                    rm,
                    lstat,
                    crim,
                    tax,
                    medv,
                    chas: 0.0,
                    ..HousingRecord::default()
                })
                .collect(),
        )
    }

    #[test]
    fn pearson_of_linear_series() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), Some(1.0));
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), Some(-1.0));
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let table = sample_table();
        let matrix = correlation_matrix(&table).unwrap();
        assert_eq!(matrix.len(), Column::ALL.len());

        for (i, &column) in matrix.columns.iter().enumerate() {
            let constant = !varies(&table.column(column));
            assert_eq!(matrix.get(i, i), (!constant).then_some(1.0), "{column}");
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        // CHAS is constant in the sample.
        assert_eq!(matrix.between(Column::Chas, Column::Medv), None);
        assert!(matrix.between(Column::Rm, Column::Medv).unwrap() > 0.8);
        assert!(matrix.between(Column::Lstat, Column::Medv).unwrap() < -0.7);
    }

    #[test]
    fn ranking_is_descending_and_starts_with_target() {
        let ranked = ranked_correlation(&sample_table(), Column::Medv).unwrap();
        assert_eq!(ranked.len(), Column::ALL.len());
        assert_eq!(ranked[0].feature, Column::Medv);
        assert_eq!(ranked[0].correlation, Some(1.0));

        let defined: Vec<f64> = ranked.iter().filter_map(|r| r.correlation).collect();
        assert!(defined.windows(2).all(|w| w[0] >= w[1]));
        // Undefined correlations trail the defined ones.
        let first_undefined = ranked.iter().position(|r| r.correlation.is_none()).unwrap();
        assert!(ranked[first_undefined..].iter().all(|r| r.correlation.is_none()));
        assert_eq!(ranked[1].feature, Column::Rm);
    }

    #[test]
    fn empty_table_is_empty_result() {
        let empty = HousingTable::default();
        assert_eq!(correlation_matrix(&empty), Err(StatsError::EmptyResult));
        assert_eq!(ranked_correlation(&empty, Column::Medv), Err(StatsError::EmptyResult));
    }

    #[test]
    fn single_row_has_no_defined_correlations() {
        let table = HousingTable::from_records(vec![HousingRecord {
            medv: 20.0,
            rm: 6.0,
            ..HousingRecord::default()
        }]);
        let ranked = ranked_correlation(&table, Column::Medv).unwrap();
        assert!(ranked.iter().all(|r| r.correlation.is_none()));
        assert_eq!(ranked[0].feature, Column::Medv);
    }
}
