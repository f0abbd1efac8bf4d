use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Column, HousingRecord, HousingTable};

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "HousingData.csv";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read dataset {}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("dataset {} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: Column },
}

// ---------------------------------------------------------------------------
// One-shot dataset cache
// ---------------------------------------------------------------------------

/// Loads the dataset on first use and hands out the same immutable table on
/// every later call. The cache is never invalidated.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    table: OnceLock<Arc<HousingTable>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached table, reading the file only the first time.
    pub fn load(&self) -> Result<Arc<HousingTable>, DataError> {
        if let Some(table) = self.table.get() {
            log::debug!("dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(table));
        }
        let table = load_csv(&self.path)?;
        Ok(Arc::clone(self.table.get_or_init(|| Arc::new(table))))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row before missing-value exclusion. Cells that are empty or do not
/// parse as numbers (`NA`, `NULL`, free text) become `None`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct RawRecord {
    #[serde(deserialize_with = "csv::invalid_option")]
    crim: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    zn: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    indus: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    chas: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    nox: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    rm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    age: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    dis: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    rad: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    tax: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    ptratio: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    b: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    lstat: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    medv: Option<f64>,
}

impl RawRecord {
    /// `None` if any field is missing. `NaN` and infinite cells parse as
    /// floats but count as missing too.
    fn complete(self) -> Option<HousingRecord> {
        let present = |cell: Option<f64>| cell.filter(|v| v.is_finite());
        Some(HousingRecord {
            crim: present(self.crim)?,
            zn: present(self.zn)?,
            indus: present(self.indus)?,
            chas: present(self.chas)?,
            nox: present(self.nox)?,
            rm: present(self.rm)?,
            age: present(self.age)?,
            dis: present(self.dis)?,
            rad: present(self.rad)?,
            tax: present(self.tax)?,
            ptratio: present(self.ptratio)?,
            b: present(self.b)?,
            lstat: present(self.lstat)?,
            medv: present(self.medv)?,
        })
    }
}

/// Read the housing CSV and drop every row that has a missing value.
///
/// The header must contain all 14 schema columns (any order, extra columns are
/// ignored). A record with a wrong field count is a read failure.
pub fn load_csv(path: &Path) -> Result<HousingTable, DataError> {
    let unavailable = |source| DataError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    };

    log::info!("Loading housing dataset from {}", path.display());
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(unavailable)?;

    let headers = reader.headers().map_err(unavailable)?.clone();
    if let Some(column) = Column::ALL
        .into_iter()
        .find(|c| !headers.iter().any(|h| h == c.name()))
    {
        return Err(DataError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for result in reader.deserialize::<RawRecord>() {
        match result.map_err(unavailable)?.complete() {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    log::info!(
        "Loaded {} rows ({dropped} dropped for missing values)",
        records.len()
    );
    Ok(HousingTable::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "CRIM,ZN,INDUS,CHAS,NOX,RM,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT,MEDV";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{body}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             0.00632,18,2.31,0,0.538,6.575,65.2,4.09,1,296,15.3,396.9,4.98,24\n\
             0.02731,0,7.07,0,0.469,6.421,78.9,4.9671,2,242,17.8,396.9,NA,21.6\n\
             0.02729,,7.07,0,0.469,7.185,61.1,4.9671,2,242,17.8,392.83,4.03,34.7\n\
             0.03237,0,2.18,0,0.458,6.998,45.8,6.0622,3,222,18.7,394.63,2.94,33.4\n"
        ));
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column(Column::Medv), vec![24.0, 33.4]);
        assert_eq!(table.records[0].tax, 296.0);
        assert_eq!(table.records[1].lstat, 2.94);
    }

    #[test]
    fn drops_rows_with_nan_cells() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             0.00632,18,2.31,0,0.538,6.575,65.2,4.09,1,296,15.3,396.9,4.98,24\n\
             0.02731,0,7.07,0,0.469,6.421,78.9,4.9671,2,242,NaN,396.9,9.14,21.6\n\
             0.02729,0,7.07,0,0.469,7.185,61.1,4.9671,2,242,17.8,392.83,nan,34.7\n\
             0.03237,0,2.18,0,0.458,6.998,45.8,6.0622,3,222,18.7,394.63,2.94,inf\n"
        ));
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.column(Column::Ptratio), vec![15.3]);
        assert!(table.records.iter().all(|r| Column::ALL.iter().all(|&c| r.get(c).is_finite())));
    }

    #[test]
    fn drops_rows_with_non_numeric_text() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             0.00632,18,2.31,0,0.538,6.575,65.2,4.09,1,296,15.3,396.9,4.98,24\n\
             0.02731,0,7.07,0,0.469,unknown,78.9,4.9671,2,242,17.8,396.9,9.14,21.6\n\
             0.02729,0,7.07,N/A,0.469,7.185,61.1,4.9671,2,242,17.8,392.83,4.03,34.7\n\
             NULL,0,2.18,0,0.458,6.998,45.8,6.0622,3,222,18.7,394.63,2.94,33.4\n"
        ));
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.column(Column::Medv), vec![24.0]);
    }

    #[test]
    fn header_order_does_not_matter() {
        let file = write_csv(
            "MEDV,RM,CRIM,ZN,INDUS,CHAS,NOX,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT,EXTRA\n\
             24,6.5,0.1,0,1,0,0.5,60,4,1,300,15,390,5,x\n",
        );
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.records[0].medv, 24.0);
        assert_eq!(table.records[0].rm, 6.5);
        assert_eq!(table.records[0].lstat, 5.0);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }), "{err:?}");
    }

    #[test]
    fn missing_schema_column_is_reported() {
        let file = write_csv("CRIM,ZN,INDUS,CHAS,NOX,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT,MEDV\n1,2,3,4,5,6,7,8,9,10,11,12,13\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(
            matches!(err, DataError::MissingColumn { column: Column::Rm, .. }),
            "{err:?}"
        );
    }

    #[test]
    fn cache_reads_the_file_only_once() {
        let file = write_csv(&format!(
            "{HEADER}\n0.1,0,1,0,0.5,6.5,60,4,1,300,15,390,5,24\n"
        ));
        let path = file.path().to_path_buf();
        let cache = DatasetCache::new(&path);

        let first = cache.load().unwrap();
        // The second load must not touch the file system.
        file.close().unwrap();
        assert!(!path.exists());
        let second = cache.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn cache_does_not_remember_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DatasetCache::new(&path);
        assert!(cache.load().is_err());

        std::fs::write(&path, format!("{HEADER}\n0.1,0,1,0,0.5,6.5,60,4,1,300,15,390,5,24\n")).unwrap();
        assert_eq!(cache.load().unwrap().len(), 1);
    }
}
