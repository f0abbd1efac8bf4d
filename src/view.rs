use serde::Serialize;

use crate::data::filter::{filter_by_range, FilterState};
use crate::data::model::{Column, HousingTable};
use crate::stats::correlation::{
    correlation_matrix, ranked_correlation, CorrelationMatrix, RankedCorrelation,
};
use crate::stats::density::{Histogram, KernelDensity, KDE_POINTS};
use crate::stats::descriptive::{grouped_mean, summary_stats, BoxStats};
use crate::stats::regression::LinearFit;
use crate::stats::StatsError;

/// The variable every chart is plotted against.
pub const TARGET: Column = Column::Medv;

/// Features shown in the pair plot.
pub const PAIR_FEATURES: [Column; 4] = [Column::Rm, Column::Lstat, Column::Ptratio, Column::Medv];

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// Headline metrics for the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub avg_price: f64,
    pub avg_rooms: f64,
    pub avg_ptratio: f64,
}

impl Kpis {
    pub fn compute(table: &HousingTable) -> Result<Self, StatsError> {
        Ok(Kpis {
            avg_price: summary_stats(table, Column::Medv)?,
            avg_rooms: summary_stats(table, Column::Rm)?,
            avg_ptratio: summary_stats(table, Column::Ptratio)?,
        })
    }
}

/// A histogram with its density curve scaled to counts.
#[derive(Debug, Clone)]
pub struct Distribution {
    pub histogram: Histogram,
    pub density: Option<Vec<[f64; 2]>>,
    pub bandwidth: Option<f64>,
}

impl Distribution {
    pub fn compute(values: &[f64]) -> Result<Self, StatsError> {
        let histogram = Histogram::new(values)?;
        let scale = values.len() as f64 * histogram.bin_width();
        let kde = KernelDensity::new(values);
        Ok(Distribution {
            histogram,
            density: kde.as_ref().map(|kde| kde.curve(KDE_POINTS, scale)),
            bandwidth: kde.as_ref().map(KernelDensity::bandwidth),
        })
    }
}

/// Scatter of one feature against the target with a least-squares line.
#[derive(Debug, Clone)]
pub struct DriverSeries {
    pub feature: Column,
    pub points: Vec<[f64; 2]>,
    pub fit: Option<LinearFit>,
    /// Fitted line across the observed feature range.
    pub line: Option<[[f64; 2]; 2]>,
}

impl DriverSeries {
    pub fn compute(table: &HousingTable, feature: Column) -> Self {
        let points = table.pairs(feature, TARGET);
        let fit = LinearFit::new(&points);
        let line = fit
            .zip(table.bounds(feature))
            .map(|(fit, (lo, hi))| fit.segment(lo, hi));
        DriverSeries {
            feature,
            points,
            fit,
            line,
        }
    }
}

/// Lower-triangle pair plot: per-feature values plus diagonal densities.
#[derive(Debug, Clone)]
pub struct PairPlot {
    pub features: Vec<Column>,
    pub values: Vec<Vec<f64>>,
    pub densities: Vec<Option<Vec<[f64; 2]>>>,
}

impl PairPlot {
    pub fn compute(table: &HousingTable, features: &[Column]) -> Self {
        let values: Vec<Vec<f64>> = features.iter().map(|&c| table.column(c)).collect();
        let densities = values
            .iter()
            .map(|v| KernelDensity::new(v).map(|kde| kde.curve(KDE_POINTS, 1.0)))
            .collect();
        PairPlot {
            features: features.to_vec(),
            values,
            densities,
        }
    }

    /// `(x, y)` points for the cell at `(row, col)`; `x` is feature `col`.
    pub fn cell(&self, row: usize, col: usize) -> Vec<[f64; 2]> {
        self.values[col]
            .iter()
            .zip(&self.values[row])
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

/// Everything the five pages draw, derived from one filtered table.
#[derive(Debug, Clone)]
pub struct Charts {
    // Overview
    pub kpis: Kpis,
    pub price_distribution: Distribution,
    pub rooms_vs_price: Vec<[f64; 2]>,
    // Trend analysis
    pub tax_vs_price: Vec<[f64; 2]>,
    pub ptratio_trend: Vec<[f64; 2]>,
    pub price_box: BoxStats,
    pub rooms_box: BoxStats,
    // Correlation & comparison
    pub correlation: CorrelationMatrix,
    pub pair_plot: PairPlot,
    // Price drivers
    pub lstat_driver: DriverSeries,
    pub crime_driver: DriverSeries,
    pub feature_impact: Vec<RankedCorrelation>,
}

impl Charts {
    /// Fails with [`StatsError::EmptyResult`] when `table` has no rows.
    pub fn compute(table: &HousingTable) -> Result<Self, StatsError> {
        Ok(Charts {
            kpis: Kpis::compute(table)?,
            price_distribution: Distribution::compute(&table.column(Column::Medv))?,
            rooms_vs_price: table.pairs(Column::Rm, TARGET),
            tax_vs_price: table.pairs(Column::Tax, TARGET),
            ptratio_trend: grouped_mean(&table.pairs(Column::Ptratio, TARGET)),
            price_box: BoxStats::new(&table.column(Column::Medv))?,
            rooms_box: BoxStats::new(&table.column(Column::Rm))?,
            correlation: correlation_matrix(table)?,
            pair_plot: PairPlot::compute(table, &PAIR_FEATURES),
            lstat_driver: DriverSeries::compute(table, Column::Lstat),
            crime_driver: DriverSeries::compute(table, Column::Crim),
            feature_impact: ranked_correlation(table, TARGET)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard view – pure function of (dataset, filters)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardView {
    /// The filter state this view was computed from.
    pub filters: FilterState,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub charts: Result<Charts, StatsError>,
}

impl DashboardView {
    pub fn compute(dataset: &HousingTable, filters: &FilterState) -> Self {
        let filtered = filter_by_range(dataset, filters);
        log::debug!(
            "Recomputing view: {} of {} rows pass price {:?} / rooms {:?}",
            filtered.len(),
            dataset.len(),
            filters.price,
            filters.rooms
        );
        if filtered.is_empty() {
            log::warn!("No rows match the current filters");
        }
        DashboardView {
            filters: *filters,
            total_rows: dataset.len(),
            filtered_rows: filtered.len(),
            charts: Charts::compute(&filtered),
        }
    }

    pub fn summary(&self) -> DashboardSummary {
        let charts = self.charts.as_ref().ok();
        DashboardSummary {
            filters: self.filters,
            total_rows: self.total_rows,
            filtered_rows: self.filtered_rows,
            kpis: charts.map(|c| c.kpis),
            price: charts.map(|c| c.price_box.clone()),
            rooms: charts.map(|c| c.rooms_box.clone()),
            lstat_fit: charts.and_then(|c| c.lstat_driver.fit),
            crime_fit: charts.and_then(|c| c.crime_driver.fit),
            feature_impact: charts.map(|c| c.feature_impact.clone()),
            correlation: charts.map(|c| c.correlation.clone()),
        }
    }
}

/// Serializable digest of a view, printed by `--summary`. Statistics are
/// `null` when no rows match the filters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub filters: FilterState,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub kpis: Option<Kpis>,
    pub price: Option<BoxStats>,
    pub rooms: Option<BoxStats>,
    pub lstat_fit: Option<LinearFit>,
    pub crime_fit: Option<LinearFit>,
    pub feature_impact: Option<Vec<RankedCorrelation>>,
    pub correlation: Option<CorrelationMatrix>,
}
