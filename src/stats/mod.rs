//! Statistics over (filtered) housing tables.
//!
//! - [`descriptive`]: means, quartiles, box-plot spreads, per-x grouped means
//! - [`correlation`]: Pearson correlation matrix and correlation ranking
//! - [`regression`]: least-squares line fits for scatter overlays
//! - [`density`]: histogram binning and Gaussian kernel density estimation
//!
//! Operations over a whole table fail with [`StatsError::EmptyResult`] when the
//! table has no rows. Quantities that exist but are undefined for the given
//! data (correlation against a constant column, a fit over one point) are
//! returned as `None`.

use thiserror::Error;

pub mod correlation;
pub mod density;
pub mod descriptive;
pub mod regression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no rows match the current filters")]
    EmptyResult,
}
