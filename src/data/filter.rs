use serde::Serialize;

use super::model::{Column, HousingRecord, HousingTable};

// ---------------------------------------------------------------------------
// Closed numeric interval
// ---------------------------------------------------------------------------

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Interval { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamp `self` into `outer`, keeping `min <= max`.
    pub fn clamped_to(self, outer: Interval) -> Interval {
        let min = self.min.clamp(outer.min, outer.max);
        let max = self.max.clamp(outer.min, outer.max);
        if min <= max {
            Interval { min, max }
        } else {
            Interval { min: max, max: min }
        }
    }
}

// ---------------------------------------------------------------------------
// Filter predicate: price (MEDV) and room count (RM) ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterState {
    /// Median value range in $1000s.
    pub price: Interval,
    /// Average room count range.
    pub rooms: Interval,
}

impl FilterState {
    pub fn new(price: Interval, rooms: Interval) -> Self {
        FilterState { price, rooms }
    }

    /// A record passes when both its MEDV and its RM lie in their intervals.
    pub fn matches(&self, record: &HousingRecord) -> bool {
        self.price.contains(record.medv) && self.rooms.contains(record.rm)
    }
}

/// Initialise a [`FilterState`] spanning the whole dataset (i.e., show everything).
///
/// The price range snaps outward to whole thousands since the price slider
/// moves in integer steps. An empty dataset yields `[0, 0]` ranges.
pub fn init_filter_state(dataset: &HousingTable) -> FilterState {
    let (price_lo, price_hi) = dataset.bounds(Column::Medv).unwrap_or((0.0, 0.0));
    let (rooms_lo, rooms_hi) = dataset.bounds(Column::Rm).unwrap_or((0.0, 0.0));
    FilterState {
        price: Interval::new(price_lo.floor(), price_hi.ceil()),
        rooms: Interval::new(rooms_lo, rooms_hi),
    }
}

/// Rows whose MEDV lies in `filters.price` and whose RM lies in
/// `filters.rooms`, in source order. An empty result is valid.
pub fn filter_by_range(dataset: &HousingTable, filters: &FilterState) -> HousingTable {
    HousingTable::from_records(
        dataset
            .records
            .iter()
            .filter(|record| filters.matches(record))
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::record;

    fn table(rows: &[(f64, f64)]) -> HousingTable {
        HousingTable::from_records(rows.iter().map(|&(medv, rm)| record(medv, rm)).collect())
    }

    #[test]
    fn keeps_rows_inside_both_intervals() {
        let dataset = table(&[(10.0, 5.0), (20.0, 6.0), (30.0, 7.0)]);
        let filters = FilterState::new(Interval::new(15.0, 30.0), Interval::new(5.0, 7.0));

        let filtered = filter_by_range(&dataset, &filters);

        assert_eq!(filtered, table(&[(20.0, 6.0), (30.0, 7.0)]));
    }

    #[test]
    fn bounds_are_inclusive() {
        let dataset = table(&[(15.0, 5.0), (30.0, 7.0)]);
        let filters = FilterState::new(Interval::new(15.0, 30.0), Interval::new(5.0, 7.0));
        assert_eq!(filter_by_range(&dataset, &filters).len(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let dataset = table(&[(10.0, 5.0)]);
        let filters = FilterState::new(Interval::new(40.0, 50.0), Interval::new(5.0, 7.0));
        assert!(filter_by_range(&dataset, &filters).is_empty());
    }

    #[test]
    fn initial_state_covers_every_row() {
        let dataset = table(&[(5.4, 3.561), (21.7, 6.2), (48.3, 8.78)]);
        let filters = init_filter_state(&dataset);
        assert_eq!(filters.price, Interval::new(5.0, 49.0));
        assert_eq!(filters.rooms, Interval::new(3.561, 8.78));
        assert_eq!(filter_by_range(&dataset, &filters), dataset);
    }

    #[test]
    fn clamped_to_orders_and_bounds() {
        let outer = Interval::new(0.0, 10.0);
        assert_eq!(Interval::new(-5.0, 20.0).clamped_to(outer), outer);
        assert_eq!(Interval::new(8.0, 2.0).clamped_to(outer), Interval::new(2.0, 8.0));
        assert_eq!(Interval::new(3.0, 4.0).clamped_to(outer), Interval::new(3.0, 4.0));
    }

    fn rows() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.0f64..60.0, 3.0f64..9.0), 0..64)
    }

    fn interval(lo: f64, hi: f64) -> impl Strategy<Value = Interval> {
        (lo..hi, lo..hi).prop_map(|(a, b)| Interval::new(a.min(b), a.max(b)))
    }

    proptest! {
        #[test]
        fn filter_is_exact(rows in rows(), price in interval(0.0, 60.0), rooms in interval(3.0, 9.0)) {
            let dataset = table(&rows);
            let filters = FilterState::new(price, rooms);
            let filtered = filter_by_range(&dataset, &filters);

            for r in &filtered.records {
                prop_assert!(price.min <= r.medv && r.medv <= price.max);
                prop_assert!(rooms.min <= r.rm && r.rm <= rooms.max);
            }
            let expected: Vec<HousingRecord> = dataset
                .records
                .iter()
                .filter(|r| price.contains(r.medv) && rooms.contains(r.rm))
                .copied()
                .collect();
            prop_assert_eq!(filtered.records, expected);
        }

        #[test]
        fn filter_is_idempotent(rows in rows(), price in interval(0.0, 60.0), rooms in interval(3.0, 9.0)) {
            let filters = FilterState::new(price, rooms);
            let once = filter_by_range(&table(&rows), &filters);
            let twice = filter_by_range(&once, &filters);
            prop_assert_eq!(once, twice);
        }
    }
}
