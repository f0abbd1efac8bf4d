use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{FilterState, Interval};
use crate::data::loader::DEFAULT_DATA_PATH;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Housing CSV to visualize
    #[arg(long, env = "HOUSING_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Print the filtered statistics as JSON instead of opening a window
    #[arg(long)]
    pub summary: bool,

    /// Lower price bound ($1000s)
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Upper price bound ($1000s)
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Lower average room count bound
    #[arg(long)]
    pub room_min: Option<f64>,

    /// Upper average room count bound
    #[arg(long)]
    pub room_max: Option<f64>,
}

impl Cli {
    /// Override `defaults` with any bounds given on the command line, clamped
    /// into the default ranges.
    pub fn initial_filters(&self, defaults: &FilterState) -> FilterState {
        let price = Interval::new(
            self.price_min.unwrap_or(defaults.price.min),
            self.price_max.unwrap_or(defaults.price.max),
        );
        let rooms = Interval::new(
            self.room_min.unwrap_or(defaults.rooms.min),
            self.room_max.unwrap_or(defaults.rooms.max),
        );
        FilterState::new(
            price.clamped_to(defaults.price),
            rooms.clamped_to(defaults.rooms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> FilterState {
        FilterState::new(Interval::new(5.0, 50.0), Interval::new(3.5, 8.8))
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["housing-dashboard"]).unwrap();
        assert!(!cli.summary);
        assert_eq!(cli.initial_filters(&defaults()), defaults());
    }

    #[test]
    fn flags_override_and_clamp() {
        let cli = Cli::try_parse_from([
            "housing-dashboard",
            "--data",
            "other.csv",
            "--summary",
            "--price-min",
            "20",
            "--room-max",
            "12",
        ])
        .unwrap();
        assert_eq!(cli.data, PathBuf::from("other.csv"));
        assert!(cli.summary);
        assert_eq!(
            cli.initial_filters(&defaults()),
            FilterState::new(Interval::new(20.0, 50.0), Interval::new(3.5, 8.8))
        );
    }
}
