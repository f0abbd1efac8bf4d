use std::sync::Arc;

use crate::data::filter::{init_filter_state, FilterState, Interval};
use crate::data::model::HousingTable;
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    TrendAnalysis,
    Correlation,
    PriceDrivers,
    BusinessInsights,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::TrendAnalysis,
        Page::Correlation,
        Page::PriceDrivers,
        Page::BusinessInsights,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "📊 Overview",
            Page::TrendAnalysis => "📈 Trend Analysis",
            Page::Correlation => "💠 Correlation & Comparison",
            Page::PriceDrivers => "📉 Price Drivers",
            Page::BusinessInsights => "💡 Business Insights",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Shared handle to the cached dataset.
    pub dataset: Arc<HousingTable>,

    /// Full-range filters derived from the dataset; slider limits.
    pub bounds: FilterState,

    /// Current filter selection.
    pub filters: FilterState,

    /// Selected navigation page.
    pub page: Page,

    /// Derived statistics for `view.filters`.
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    #[cfg(test)]
    pub fn new(dataset: Arc<HousingTable>) -> Self {
        let bounds = init_filter_state(&dataset);
        Self::with_filters(dataset, bounds)
    }

    /// Start with a specific filter selection, clamped into the dataset range.
    pub fn with_filters(dataset: Arc<HousingTable>, filters: FilterState) -> Self {
        let bounds = init_filter_state(&dataset);
        let filters = FilterState::new(
            filters.price.clamped_to(bounds.price),
            filters.rooms.clamped_to(bounds.rooms),
        );
        let view = DashboardView::compute(&dataset, &filters);
        let status_message = view.charts.as_ref().err().map(|e| e.to_string());
        AppState {
            dataset,
            bounds,
            filters,
            page: Page::default(),
            view,
            status_message,
        }
    }

    /// Recompute the view if the filters changed since it was last built.
    /// Returns whether a recomputation happened.
    pub fn refresh(&mut self) -> bool {
        if self.view.filters == self.filters {
            return false;
        }
        self.view = DashboardView::compute(&self.dataset, &self.filters);
        self.status_message = self.view.charts.as_ref().err().map(|e| e.to_string());
        true
    }

    pub fn set_price_range(&mut self, range: Interval) {
        self.filters.price = range.clamped_to(self.bounds.price);
        self.refresh();
    }

    pub fn set_room_range(&mut self, range: Interval) {
        self.filters.rooms = range.clamped_to(self.bounds.rooms);
        self.refresh();
    }

    /// Restore the full-range filters.
    pub fn reset_filters(&mut self) {
        self.filters = self.bounds;
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn state() -> AppState {
        let rows = [(10.0, 5.0), (20.0, 6.0), (30.0, 7.0)];
        let table = HousingTable::from_records(rows.iter().map(|&(m, r)| record(m, r)).collect());
        AppState::new(Arc::new(table))
    }

    #[test]
    fn starts_with_everything_visible() {
        let state = state();
        assert_eq!(state.filters, state.bounds);
        assert_eq!(state.view.filtered_rows, 3);
        assert_eq!(state.page, Page::Overview);
    }

    #[test]
    fn refresh_only_recomputes_on_change() {
        let mut state = state();
        assert!(!state.refresh());

        state.filters.price = Interval::new(15.0, 30.0);
        assert!(state.refresh());
        assert_eq!(state.view.filtered_rows, 2);
        assert!(!state.refresh());
    }

    #[test]
    fn setters_clamp_into_bounds() {
        let mut state = state();
        state.set_room_range(Interval::new(6.5, 100.0));
        assert_eq!(state.filters.rooms, Interval::new(6.5, 7.0));
        assert_eq!(state.view.filtered_rows, 1);

        state.set_price_range(Interval::new(25.0, 12.0));
        assert_eq!(state.filters.price, Interval::new(12.0, 25.0));
        assert_eq!(state.view.filtered_rows, 0);
        assert!(state.status_message.is_some());

        state.reset_filters();
        assert_eq!(state.view.filtered_rows, 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn empty_initial_selection_sets_status() {
        let rows = [(10.0, 5.0), (20.0, 6.0), (30.0, 7.0)];
        let table = HousingTable::from_records(rows.iter().map(|&(m, r)| record(m, r)).collect());
        let filters = FilterState::new(Interval::new(30.0, 30.0), Interval::new(5.0, 5.0));
        let state = AppState::with_filters(Arc::new(table), filters);
        assert_eq!(state.view.filtered_rows, 0);
        assert_eq!(
            state.status_message.as_deref(),
            Some("no rows match the current filters")
        );
    }
}
