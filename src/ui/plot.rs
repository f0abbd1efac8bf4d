use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Rect, Sense, Stroke, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, MarkerShape, Plot, PlotUi,
    Points,
};

use crate::color::{contrast_text, heat_color, viridis_palette, with_alpha};
use crate::stats::correlation::{CorrelationMatrix, RankedCorrelation};
use crate::stats::descriptive::BoxStats;
use crate::view::{Distribution, PairPlot};

pub const CHART_HEIGHT: f32 = 280.0;
const PAIR_CELL: f32 = 170.0;
const SCATTER_RADIUS: f32 = 2.5;

/// Axis labels for a chart.
pub struct Axes<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

/// Show an interactive chart with the shared size and interaction settings.
fn show_chart(ui: &mut Ui, id: &str, axes: &Axes<'_>, add: impl FnOnce(&mut PlotUi)) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(axes.x)
        .y_axis_label(axes.y)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, add);
}

// ---------------------------------------------------------------------------
// Distribution: histogram + density
// ---------------------------------------------------------------------------

pub fn histogram(ui: &mut Ui, id: &str, dist: &Distribution, color: Color32, axes: &Axes<'_>) {
    let bars: Vec<Bar> = dist
        .histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                .width(bin.end - bin.start)
                .fill(with_alpha(color, 0.6))
                .stroke(Stroke::new(1.0, color))
        })
        .collect();

    show_chart(ui, id, axes, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(color).name("Count"));
        if let Some(curve) = &dist.density {
            plot_ui.line(Line::new(curve.clone()).color(color).width(2.0).name("KDE"));
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter / line
// ---------------------------------------------------------------------------

/// Scatter plot, optionally overlaid with a straight fitted line.
pub fn scatter(
    ui: &mut Ui,
    id: &str,
    series: &[[f64; 2]],
    color: Color32,
    axes: &Axes<'_>,
    fit: Option<([[f64; 2]; 2], Color32)>,
) {
    show_chart(ui, id, axes, |plot_ui| {
        plot_ui.points(
            Points::new(series.to_vec())
                .color(with_alpha(color, 0.7))
                .radius(SCATTER_RADIUS)
                .filled(true),
        );
        if let Some((segment, line_color)) = fit {
            plot_ui.line(
                Line::new(segment.to_vec())
                    .color(line_color)
                    .width(2.0)
                    .name("Least squares"),
            );
        }
    });
}

pub fn line(ui: &mut Ui, id: &str, series: &[[f64; 2]], color: Color32, axes: &Axes<'_>) {
    show_chart(ui, id, axes, |plot_ui| {
        plot_ui.line(Line::new(series.to_vec()).color(color).width(2.0));
    });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

pub fn box_plot(ui: &mut Ui, id: &str, stats: &BoxStats, color: Color32, label: &str) {
    let spread = BoxSpread::new(
        stats.lower_whisker,
        stats.q1,
        stats.median,
        stats.q3,
        stats.upper_whisker,
    );
    let elem = BoxElem::new(0.0, spread)
        .name(label)
        .box_width(0.5)
        .whisker_width(0.3)
        .fill(with_alpha(color, 0.7))
        .stroke(Stroke::new(1.5, color));
    let outliers: Vec<[f64; 2]> = stats.outliers.iter().map(|&v| [0.0, v]).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label(label)
        .show_x(false)
        .include_x(-1.0)
        .include_x(1.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label));
            plot_ui.points(
                Points::new(outliers)
                    .name("Outliers")
                    .shape(MarkerShape::Diamond)
                    .radius(3.0)
                    .color(color),
            );
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated correlation heatmap. Undefined cells are left blank.
pub fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.len();
    if n == 0 {
        return;
    }
    let label_width = 64.0;
    let cell = ((ui.available_width() - label_width) / n as f32).clamp(24.0, 56.0);
    let size = egui::vec2(label_width + cell * n as f32, label_width + cell * n as f32);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional((cell * 0.28).clamp(8.0, 12.0));

    for (i, column) in matrix.columns.iter().enumerate() {
        let offset = label_width + cell * (i as f32 + 0.5);
        // Row labels on the left, column labels along the top.
        painter.text(
            rect.min + egui::vec2(label_width - 6.0, offset),
            Align2::RIGHT_CENTER,
            column.name(),
            font.clone(),
            text_color,
        );
        painter.text(
            rect.min + egui::vec2(offset, label_width - 6.0),
            Align2::CENTER_BOTTOM,
            column.name(),
            font.clone(),
            text_color,
        );

        for j in 0..n {
            let Some(r) = matrix.get(i, j) else {
                continue;
            };
            let min = rect.min + egui::vec2(label_width + cell * j as f32, label_width + cell * i as f32);
            let cell_rect = Rect::from_min_size(min, egui::vec2(cell, cell));
            let fill = heat_color(r);
            painter.rect_filled(cell_rect.shrink(0.5), CornerRadius::ZERO, fill);
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                format!("{r:.2}"),
                font.clone(),
                contrast_text(fill),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Pair plot (lower triangle)
// ---------------------------------------------------------------------------

pub fn pair_grid(ui: &mut Ui, pair: &PairPlot, color: Color32) {
    let n = pair.features.len();
    egui::Grid::new("pair_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for row in 0..n {
                for col in 0..n {
                    if col > row {
                        ui.label("");
                        continue;
                    }
                    let x_label = if row + 1 == n { pair.features[col].name() } else { "" };
                    let y_label = if col == 0 { pair.features[row].name() } else { "" };
                    let plot = Plot::new(("pair", row, col))
                        .width(PAIR_CELL)
                        .height(PAIR_CELL)
                        .x_axis_label(x_label)
                        .y_axis_label(y_label)
                        .allow_scroll(false)
                        .allow_drag(false)
                        .allow_zoom(false);

                    if row == col {
                        let density = pair.densities[row].clone();
                        plot.show(ui, |plot_ui| {
                            if let Some(curve) = density {
                                plot_ui.line(Line::new(curve).color(color).width(1.5));
                            }
                        });
                    } else {
                        let cell = pair.cell(row, col);
                        plot.show(ui, |plot_ui| {
                            plot_ui.points(
                                Points::new(cell)
                                    .color(with_alpha(color, 0.6))
                                    .radius(1.5)
                                    .filled(true),
                            );
                        });
                    }
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked correlation bars + table
// ---------------------------------------------------------------------------

/// Feature name for a bar-chart axis mark; bars sit at integer positions with
/// the first feature at the top.
pub fn feature_label(value: f64, names: &[String]) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let from_top = names.len() as i64 - 1 - rounded as i64;
    usize::try_from(from_top)
        .ok()
        .and_then(|i| names.get(i))
        .cloned()
        .unwrap_or_default()
}

pub fn ranked_bars(ui: &mut Ui, id: &str, ranked: &[RankedCorrelation]) {
    let colors = viridis_palette(ranked.len());
    let n = ranked.len();
    let bars: Vec<Bar> = ranked
        .iter()
        .zip(colors)
        .enumerate()
        .filter_map(|(i, (entry, fill))| {
            let r = entry.correlation?;
            Some(
                Bar::new((n - 1 - i) as f64, r)
                    .width(0.7)
                    .fill(fill)
                    .name(entry.feature.name()),
            )
        })
        .collect();
    let names: Vec<String> = ranked.iter().map(|r| r.feature.name().to_owned()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT + 80.0)
        .x_axis_label("Correlation with MEDV")
        .include_x(-1.0)
        .include_x(1.0)
        .allow_scroll(false)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            feature_label(mark.value, &names)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

pub fn ranked_table(ui: &mut Ui, ranked: &[RankedCorrelation]) {
    TableBuilder::new(ui)
        .vscroll(false)
        .striped(true)
        .column(TableColumn::auto().at_least(80.0))
        .column(TableColumn::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Feature");
            });
            header.col(|ui| {
                ui.strong("Correlation");
            });
        })
        .body(|mut body| {
            for entry in ranked {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(entry.feature.name());
                    });
                    row.col(|ui| {
                        match entry.correlation {
                            Some(r) => ui.label(format!("{r:+.3}")),
                            None => ui.weak("undefined"),
                        };
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_label_maps_positions_top_down() {
        let names: Vec<String> = ["MEDV", "RM", "LSTAT"].iter().map(|s| s.to_string()).collect();
        assert_eq!(feature_label(2.0, &names), "MEDV");
        assert_eq!(feature_label(1.0, &names), "RM");
        assert_eq!(feature_label(0.0, &names), "LSTAT");
        assert_eq!(feature_label(0.5, &names), "");
        assert_eq!(feature_label(3.0, &names), "");
        assert_eq!(feature_label(-1.0, &names), "");
    }
}
