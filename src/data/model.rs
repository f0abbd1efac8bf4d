use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column – one numeric attribute of the housing dataset
// ---------------------------------------------------------------------------

/// The fixed column schema of the housing dataset, in source-file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Column {
    Crim,
    Zn,
    Indus,
    Chas,
    Nox,
    Rm,
    Age,
    Dis,
    Rad,
    Tax,
    Ptratio,
    B,
    Lstat,
    Medv,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::Crim,
        Column::Zn,
        Column::Indus,
        Column::Chas,
        Column::Nox,
        Column::Rm,
        Column::Age,
        Column::Dis,
        Column::Rad,
        Column::Tax,
        Column::Ptratio,
        Column::B,
        Column::Lstat,
        Column::Medv,
    ];

    /// Header name as it appears in the CSV file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Crim => "CRIM",
            Column::Zn => "ZN",
            Column::Indus => "INDUS",
            Column::Chas => "CHAS",
            Column::Nox => "NOX",
            Column::Rm => "RM",
            Column::Age => "AGE",
            Column::Dis => "DIS",
            Column::Rad => "RAD",
            Column::Tax => "TAX",
            Column::Ptratio => "PTRATIO",
            Column::B => "B",
            Column::Lstat => "LSTAT",
            Column::Medv => "MEDV",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// HousingRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single, fully populated row of the housing dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HousingRecord {
    /// Per-capita crime rate by town.
    pub crim: f64,
    pub zn: f64,
    pub indus: f64,
    pub chas: f64,
    pub nox: f64,
    /// Average number of rooms per dwelling.
    pub rm: f64,
    pub age: f64,
    pub dis: f64,
    pub rad: f64,
    /// Property tax rate per $10,000.
    pub tax: f64,
    /// Pupil-teacher ratio by town.
    pub ptratio: f64,
    pub b: f64,
    /// Percentage of lower-status population.
    pub lstat: f64,
    /// Median home value in $1000s.
    pub medv: f64,
}

impl HousingRecord {
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Crim => self.crim,
            Column::Zn => self.zn,
            Column::Indus => self.indus,
            Column::Chas => self.chas,
            Column::Nox => self.nox,
            Column::Rm => self.rm,
            Column::Age => self.age,
            Column::Dis => self.dis,
            Column::Rad => self.rad,
            Column::Tax => self.tax,
            Column::Ptratio => self.ptratio,
            Column::B => self.b,
            Column::Lstat => self.lstat,
            Column::Medv => self.medv,
        }
    }
}

// ---------------------------------------------------------------------------
// HousingTable – the complete loaded (or filtered) dataset
// ---------------------------------------------------------------------------

/// An ordered set of records. Row order follows the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingTable {
    pub records: Vec<HousingRecord>,
}

impl HousingTable {
    pub fn from_records(records: Vec<HousingRecord>) -> Self {
        HousingTable { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one column, in row order.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.get(column)).collect()
    }

    /// `(x, y)` pairs for a scatter of two columns.
    pub fn pairs(&self, x: Column, y: Column) -> Vec<[f64; 2]> {
        self.records.iter().map(|r| [r.get(x), r.get(y)]).collect()
    }

    /// Observed `(min, max)` of a column, or `None` when the table is empty.
    pub fn bounds(&self, column: Column) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.get(column)).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
    }
}

#[cfg(test)]
pub(crate) fn record(medv: f64, rm: f64) -> HousingRecord {
    HousingRecord {
        medv,
        rm,
        ..HousingRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_match_csv_header() {
        let header: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            header.join(","),
            "CRIM,ZN,INDUS,CHAS,NOX,RM,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT,MEDV"
        );
    }

    #[test]
    fn bounds_tracks_min_and_max() {
        let table = HousingTable::from_records(vec![record(24.0, 6.5), record(12.0, 7.1), record(50.0, 5.0)]);
        assert_eq!(table.bounds(Column::Medv), Some((12.0, 50.0)));
        assert_eq!(table.bounds(Column::Rm), Some((5.0, 7.1)));
        assert_eq!(HousingTable::default().bounds(Column::Medv), None);
    }

    #[test]
    fn get_reads_every_column() {
        let r = HousingRecord {
            crim: 1.0,
            zn: 2.0,
            indus: 3.0,
            chas: 4.0,
            nox: 5.0,
            rm: 6.0,
            age: 7.0,
            dis: 8.0,
            rad: 9.0,
            tax: 10.0,
            ptratio: 11.0,
            b: 12.0,
            lstat: 13.0,
            medv: 14.0,
        };
        let values: Vec<f64> = Column::ALL.iter().map(|&c| r.get(c)).collect();
        assert_eq!(values, (1..=14).map(f64::from).collect::<Vec<_>>());
    }
}
