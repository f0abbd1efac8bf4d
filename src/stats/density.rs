use std::f64::consts::PI;

use serde::Serialize;

use super::descriptive::{quantile_sorted, sample_std_dev};
use super::StatsError;

/// Upper bound on automatic bin counts so a tiny IQR cannot explode the chart.
const MAX_BINS: usize = 256;

/// Number of evaluation points for density curves.
pub const KDE_POINTS: usize = 200;

/// Density curves extend this many bandwidths past the data range.
const KDE_CUT: f64 = 3.0;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram over the data range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// One bin: `[start, end)`, except the last bin which also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl Histogram {
    /// Bin `values` with an automatically chosen bin count: the larger of the
    /// Sturges and Freedman–Diaconis estimates.
    pub fn new(values: &[f64]) -> Result<Self, StatsError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Err(StatsError::EmptyResult);
        };
        if max == min {
            return Ok(Self::with_bounds(&sorted, min - 0.5, max + 0.5, 1));
        }
        Ok(Self::with_bounds(&sorted, min, max, auto_bin_count(&sorted)))
    }

    /// Bin `values` into `num_bins` equal bins spanning `[lo, hi]`. Values
    /// outside the span are ignored.
    pub fn with_bounds(values: &[f64], lo: f64, hi: f64, num_bins: usize) -> Self {
        let num_bins = num_bins.max(1);
        let width = (hi - lo) / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                start: lo + width * i as f64,
                end: if i + 1 == num_bins {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &v in values {
            if !(lo..=hi).contains(&v) {
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }
        Histogram { bins }
    }

    pub fn bin_width(&self) -> f64 {
        self.bins.first().map_or(0.0, |b| b.end - b.start)
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len() as f64;
    let range = sorted[sorted.len() - 1] - sorted[0];

    let sturges = n.log2().ceil() as usize + 1;
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd_width = 2.0 * iqr / n.cbrt();
    let fd = if fd_width > 0.0 {
        (range / fd_width).ceil() as usize
    } else {
        0
    };
    sturges.max(fd).clamp(1, MAX_BINS)
}

// ---------------------------------------------------------------------------
// Gaussian kernel density estimate
// ---------------------------------------------------------------------------

/// Gaussian KDE with Scott's rule bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensity {
    values: Vec<f64>,
    bandwidth: f64,
    min: f64,
    max: f64,
}

impl KernelDensity {
    /// `None` for fewer than two values or zero spread.
    pub fn new(values: &[f64]) -> Option<Self> {
        let std_dev = sample_std_dev(values)?;
        if std_dev <= 0.0 {
            return None;
        }
        let bandwidth = std_dev * (values.len() as f64).powf(-0.2);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(KernelDensity {
            values: values.to_vec(),
            bandwidth,
            min,
            max,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.values.len() as f64 * h * (2.0 * PI).sqrt());
        norm * self
            .values
            .iter()
            .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
            .sum::<f64>()
    }

    /// Density evaluated on `points` evenly spaced positions reaching three
    /// bandwidths beyond the data, each multiplied by `scale`.
    pub fn curve(&self, points: usize, scale: f64) -> Vec<[f64; 2]> {
        let lo = self.min - KDE_CUT * self.bandwidth;
        let hi = self.max + KDE_CUT * self.bandwidth;
        let steps = points.max(2) - 1;
        (0..=steps)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / steps as f64;
                [x, self.density(x) * scale]
            })
            .collect()
    }
}
