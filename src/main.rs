mod app;
mod color;
mod config;
mod data;
mod state;
mod stats;
mod ui;
mod view;

use std::io::Write;

use anyhow::{Context, Result};
use app::HousingDashboardApp;
use clap::Parser;
use config::Cli;
use data::filter::init_filter_state;
use data::loader::DatasetCache;
use eframe::egui;
use view::DashboardView;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cache = DatasetCache::new(&cli.data);
    let dataset = match cache.load() {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", cache.path().display());
            return Err(e).context("housing dataset is unavailable");
        }
    };
    let filters = cli.initial_filters(&init_filter_state(&dataset));

    if cli.summary {
        let summary = DashboardView::compute(&dataset, &filters).summary();
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &summary).context("writing summary")?;
        writeln!(out)?;
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "🏡 Housing Data BI Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(HousingDashboardApp::new(dataset, filters)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
