use crate::error::{ExploreError, Result};
use crate::selector::{City, Selectors};
use crate::structs::{CityTable, Dataset, RawTrip, Schema};
use crate::transform::{apply, build_dataset};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;

const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

/// A city's source file exactly as read, before any parsing of its cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Reads a headed CSV from any reader.
    ///
    /// Rows may be shorter or longer than the header; such rows are kept
    /// here and judged field by field in [`dataset_from_raw`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let rows = csv_reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Optional columns this source carries.
    pub fn schema(&self) -> Schema {
        Schema {
            has_gender: self.has_column("Gender"),
            has_birth_year: self.has_column("Birth Year"),
        }
    }
}

/// Parses a raw table into an enriched, unfiltered dataset.
///
/// # Errors
///
/// Returns `ExploreError::Data` if a required column is missing. Rows that
/// fail to parse are skipped and counted in `Dataset::skipped`.
pub fn dataset_from_raw(city: City, raw: &RawTable) -> Result<Dataset> {
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !raw.has_column(c)) {
        return Err(ExploreError::Data(format!(
            "Column not found in {} data: {}",
            city.title(),
            missing
        )));
    }

    let mut unreadable = 0;
    let mut rows = Vec::with_capacity(raw.len());
    for (i, record) in raw.rows.iter().enumerate() {
        match record.deserialize::<RawTrip>(Some(&raw.headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                // header is line 1
                warn!("Skipping {} row {}: {}", city.title(), i + 2, e);
                unreadable += 1;
            }
        }
    }

    let dataset = build_dataset(city, raw.schema(), rows, unreadable);
    debug!(
        "Loaded {} trips for {} ({} skipped)",
        dataset.len(),
        city.title(),
        dataset.skipped
    );
    Ok(dataset)
}

/// Loads city trip logs from the locations in a [`CityTable`].
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    table: CityTable,
}

impl DatasetLoader {
    pub fn new(table: CityTable) -> Self {
        Self { table }
    }

    /// Reads the city's source file without interpreting any cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the city has no configured source or the file
    /// cannot be opened or is not valid CSV.
    pub fn load_raw(&self, city: City) -> Result<RawTable> {
        let path = self.table.source(city).ok_or_else(|| {
            ExploreError::Data(format!("No data source configured for {}", city.title()))
        })?;
        debug!("Reading CSV file: {}", path.display());
        let file = File::open(path)?;
        RawTable::from_reader(file)
    }

    /// Reads, enriches and filters the trips of `city`.
    pub fn load(&self, city: City, selectors: Selectors) -> Result<Dataset> {
        let raw = self.load_raw(city)?;
        self.load_from(city, &raw, selectors)
    }

    /// Enriches and filters a table already read with [`Self::load_raw`].
    pub fn load_from(&self, city: City, raw: &RawTable, selectors: Selectors) -> Result<Dataset> {
        let dataset = dataset_from_raw(city, raw)?;
        Ok(apply(&dataset, selectors))
    }
}
