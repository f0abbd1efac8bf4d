use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::Interval;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left navigation / filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🏡 BI Dashboard Navigation");
    ui.separator();

    ui.label("Go to");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }

    ui.add_space(12.0);
    ui.heading("🔍 Filters");
    ui.separator();

    ui.strong("Select Price Range ($1000s):");
    let price = range_sliders(ui, state.filters.price, state.bounds.price, Some(1.0));
    if price != state.filters.price {
        state.set_price_range(price);
    }

    ui.add_space(8.0);
    ui.strong("Filter by Rooms (RM):");
    let rooms = range_sliders(ui, state.filters.rooms, state.bounds.rooms, None);
    if rooms != state.filters.rooms {
        state.set_room_range(rooms);
    }

    ui.add_space(8.0);
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

fn bound_slider<'a>(value: &'a mut f64, bounds: Interval, step: Option<f64>, text: &str) -> Slider<'a> {
    let slider = Slider::new(value, bounds.min..=bounds.max).text(text);
    match step {
        Some(step) => slider.step_by(step).fixed_decimals(0),
        None => slider.fixed_decimals(2),
    }
}

/// A min/max slider pair. Dragging one handle past the other pushes it along.
fn range_sliders(ui: &mut Ui, current: Interval, bounds: Interval, step: Option<f64>) -> Interval {
    let mut range = current;
    if ui.add(bound_slider(&mut range.min, bounds, step, "min")).changed() && range.min > range.max {
        range.max = range.min;
    }
    if ui.add(bound_slider(&mut range.max, bounds, step, "max")).changed() && range.max < range.min {
        range.min = range.max;
    }
    range
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(RichText::new("🏡 Housing Data BI Dashboard").strong());

        ui.separator();

        ui.label(format!(
            "{} of {} rows match",
            state.view.filtered_rows, state.view.total_rows
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
