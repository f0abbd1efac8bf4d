use std::sync::Arc;

use eframe::egui;

use crate::data::filter::FilterState;
use crate::data::model::HousingTable;
use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HousingDashboardApp {
    pub state: AppState,
}

impl HousingDashboardApp {
    pub fn new(dataset: Arc<HousingTable>, filters: FilterState) -> Self {
        Self {
            state: AppState::with_filters(dataset, filters),
        }
    }
}

impl eframe::App for HousingDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            pages::central_panel(ui, &self.state);
        });
    }
}
