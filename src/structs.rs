use crate::selector::City;
use chrono::{NaiveDateTime, Weekday};
use log::{Log, Metadata, Record as LogRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Number of raw rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Simple logger implementation
///
/// Writes to stderr so log lines stay out of the interactive transcript.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Runtime configuration gathered from the command line.
#[derive(Debug, Clone)]
pub struct ExploreConfig {
    pub data_dir: PathBuf,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

impl ExploreConfig {
    pub fn city_table(&self) -> CityTable {
        CityTable::in_dir(&self.data_dir)
    }
}

/// Read-only lookup from city to the CSV file holding its trips.
#[derive(Debug, Clone)]
pub struct CityTable {
    sources: HashMap<City, PathBuf>,
}

impl CityTable {
    /// Maps every supported city to its default file name inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let sources = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.file_name())))
            .collect();
        Self { sources }
    }

    /// Builds a table from explicit paths; cities left out have no source.
    pub fn from_paths(paths: impl IntoIterator<Item = (City, PathBuf)>) -> Self {
        Self {
            sources: paths.into_iter().collect(),
        }
    }

    pub fn source(&self, city: City) -> Option<&Path> {
        self.sources.get(&city).map(PathBuf::as_path)
    }
}

/// One CSV row as it appears in the source file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default, deserialize_with = "csv::invalid_option")]
    pub birth_year: Option<f64>,
}

/// Trip with its start-time derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: u32,
    pub day_of_week: Weekday,
    pub start_hour: u32,
    pub route: String,
}

/// Optional columns present in a city's source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Trips of one city, possibly narrowed by a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub city: City,
    pub schema: Schema,
    pub trips: Vec<TripRecord>,
    /// Source rows dropped because they could not be parsed.
    pub skipped: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
