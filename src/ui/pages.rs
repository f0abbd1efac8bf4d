use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::color;
use crate::data::model::Column;
use crate::state::{AppState, Page};
use crate::ui::plot::{self, Axes};
use crate::view::{Charts, TARGET};

// ---------------------------------------------------------------------------
// Page dispatch (central panel)
// ---------------------------------------------------------------------------

/// Render the selected page in the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match (state.page, &state.view.charts) {
            (Page::BusinessInsights, _) => business_insights(ui),
            (page, Err(err)) => no_data(ui, page, &err.to_string()),
            (Page::Overview, Ok(charts)) => overview(ui, charts),
            (Page::TrendAnalysis, Ok(charts)) => trend_analysis(ui, charts),
            (Page::Correlation, Ok(charts)) => correlation(ui, charts),
            (Page::PriceDrivers, Ok(charts)) => price_drivers(ui, charts),
        });
}

fn no_data(ui: &mut Ui, page: Page, reason: &str) {
    ui.heading(page.label());
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(format!("No data: {reason}.")).size(18.0).color(Color32::GRAY));
        ui.label("Widen the price or room range in the sidebar.");
    });
}

fn correlation_caption(charts: &Charts, feature: Column) -> String {
    match charts.correlation.between(feature, TARGET) {
        Some(r) => format!("r = {r:+.2}"),
        None => "r undefined".to_owned(),
    }
}

fn metric(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

// ---------------------------------------------------------------------------
// 📊 Overview
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, charts: &Charts) {
    ui.heading("📊 Dataset Overview and KPIs");
    ui.add_space(8.0);

    let kpis = charts.kpis;
    ui.columns(3, |cols| {
        metric(&mut cols[0], "🏠 Average Price", format!("${:.2}K", kpis.avg_price));
        metric(&mut cols[1], "🛏 Avg Rooms", format!("{:.2}", kpis.avg_rooms));
        metric(&mut cols[2], "🎓 Avg PTRATIO", format!("{:.2}", kpis.avg_ptratio));
    });

    ui.separator();
    ui.strong("Price Distribution");
    let dist = &charts.price_distribution;
    let caption = match dist.bandwidth {
        Some(bw) => format!("{} homes, KDE bandwidth {bw:.2}", dist.histogram.total()),
        None => format!("{} homes", dist.histogram.total()),
    };
    ui.weak(caption);
    plot::histogram(
        ui,
        "price_hist",
        dist,
        color::PRICE_HIST,
        &Axes { x: "Median Value ($1000s)", y: "Count" },
    );

    ui.separator();
    ui.strong("Relationship Between Rooms and Price");
    plot::scatter(
        ui,
        "rooms_vs_price",
        &charts.rooms_vs_price,
        color::ROOMS_SCATTER,
        &Axes { x: "RM", y: "MEDV" },
        None,
    );
}

// ---------------------------------------------------------------------------
// 📈 Trend analysis
// ---------------------------------------------------------------------------

fn trend_analysis(ui: &mut Ui, charts: &Charts) {
    ui.heading("📈 Trend & Distribution Analysis");
    ui.add_space(8.0);

    ui.columns(2, |cols| {
        cols[0].strong("TAX vs PRICE");
        cols[0].weak(correlation_caption(charts, Column::Tax));
        plot::scatter(
            &mut cols[0],
            "tax_vs_price",
            &charts.tax_vs_price,
            color::TAX_SCATTER,
            &Axes { x: "TAX", y: "MEDV" },
            None,
        );
        cols[1].strong("PTRATIO vs PRICE");
        cols[1].weak(correlation_caption(charts, Column::Ptratio));
        plot::line(
            &mut cols[1],
            "ptratio_vs_price",
            &charts.ptratio_trend,
            color::PTRATIO_LINE,
            &Axes { x: "PTRATIO", y: "mean MEDV" },
        );
    });

    ui.separator();
    ui.strong("Outlier Detection (Boxplots)");
    ui.columns(2, |cols| {
        let price = &charts.price_box;
        cols[0].label(format!(
            "Price outliers: {} (IQR {:.2})",
            price.outliers.len(),
            price.iqr()
        ));
        plot::box_plot(&mut cols[0], "price_box", price, color::PRICE_BOX, "MEDV");

        let rooms = &charts.rooms_box;
        cols[1].label(format!(
            "Room count outliers: {} (IQR {:.2})",
            rooms.outliers.len(),
            rooms.iqr()
        ));
        plot::box_plot(&mut cols[1], "rooms_box", rooms, color::ROOMS_BOX, "RM");
    });
}

// ---------------------------------------------------------------------------
// 💠 Correlation & comparison
// ---------------------------------------------------------------------------

fn correlation(ui: &mut Ui, charts: &Charts) {
    ui.heading("💠 Correlation and Feature Relationships");
    ui.add_space(8.0);

    ui.strong("Correlation Heatmap");
    plot::heatmap(ui, &charts.correlation);

    ui.separator();
    ui.strong("Pairplot (Top 4 Features)");
    plot::pair_grid(ui, &charts.pair_plot, color::PAIR_SCATTER);
}

// ---------------------------------------------------------------------------
// 📉 Price drivers
// ---------------------------------------------------------------------------

fn price_drivers(ui: &mut Ui, charts: &Charts) {
    ui.heading("📉 Key Drivers of Housing Prices");
    ui.add_space(8.0);

    ui.columns(2, |cols| {
        let lstat = &charts.lstat_driver;
        cols[0].strong("LSTAT (Lower Status %) vs PRICE");
        plot::scatter(
            &mut cols[0],
            "lstat_vs_price",
            &lstat.points,
            color::LSTAT_SCATTER,
            &Axes { x: lstat.feature.name(), y: TARGET.name() },
            lstat.line.map(|l| (l, Color32::RED)),
        );

        let crime = &charts.crime_driver;
        cols[1].strong("Crime Rate (CRIM) vs PRICE");
        plot::scatter(
            &mut cols[1],
            "crim_vs_price",
            &crime.points,
            color::CRIME_SCATTER,
            &Axes { x: crime.feature.name(), y: TARGET.name() },
            crime.line.map(|l| (l, Color32::BLACK)),
        );
    });

    ui.separator();
    ui.strong("Feature Importance (Correlation with MEDV)");
    ui.columns(2, |cols| {
        plot::ranked_bars(&mut cols[0], "feature_impact", &charts.feature_impact);
        plot::ranked_table(&mut cols[1], &charts.feature_impact);
    });
}

// ---------------------------------------------------------------------------
// 💡 Business insights (static)
// ---------------------------------------------------------------------------

const FINDINGS: [(&str, &str); 5] = [
    (
        "More rooms → higher price:",
        "A positive correlation between average rooms and price shows that larger homes command a premium.",
    ),
    (
        "Crime rate reduces price:",
        "High-CRIM areas consistently show lower property values, critical for urban policy decisions.",
    ),
    (
        "Education matters:",
        "Neighborhoods with a lower pupil-teacher ratio (PTRATIO) see higher prices; families prefer educational quality.",
    ),
    (
        "Wealth factor:",
        "Higher LSTAT (lower-status percentage) corresponds to lower prices, highlighting socioeconomic influence.",
    ),
    (
        "Taxes impact affordability:",
        "TAX correlates moderately with price, indicating that tax policy may indirectly affect housing demand.",
    ),
];

const APPLICATIONS: [(&str, &str); 3] = [
    (
        "For Real Estate Developers:",
        "Identify ideal zones for premium projects (low crime, low PTRATIO, high RM).",
    ),
    (
        "For City Planners:",
        "Improve affordability by targeting education and crime parameters.",
    ),
    (
        "For Investors:",
        "Use this dashboard to locate undervalued but promising areas.",
    ),
];

fn bullets(ui: &mut Ui, items: &[(&str, &str)]) {
    for (lead, text) in items {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("•");
            ui.label(RichText::new(*lead).strong());
            ui.label(*text);
        });
    }
}

fn business_insights(ui: &mut Ui) {
    ui.heading("💡 Strategic Business Insights");
    ui.add_space(8.0);

    ui.label(RichText::new("🧭 Summary of Findings").size(20.0).strong());
    bullets(ui, &FINDINGS);

    ui.separator();
    ui.label(RichText::new("💼 Business Application").size(20.0).strong());
    bullets(ui, &APPLICATIONS);

    ui.add_space(16.0);
    ui.label(
        RichText::new("📍 Developed by Soumyashree Patnaik | Business Intelligence Dashboard Project")
            .italics(),
    );
}
