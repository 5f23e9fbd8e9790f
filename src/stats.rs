use crate::selector::{City, weekday_name};
use crate::structs::Dataset;
use chrono::{Month, Weekday};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

const NO_DATA: &str = "no data";

/// Counts each distinct value, most frequent first.
///
/// Values with equal counts keep the order in which they were first seen,
/// so the result never depends on hash iteration order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match positions.get(&value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value; ties go to the value seen first.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}

fn or_no_data<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| NO_DATA.to_string(), ToString::to_string)
}

/// Most common month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Option<u32>,
    pub day_of_week: Option<Weekday>,
    pub start_hour: Option<u32>,
}

impl TimeStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let trips = &dataset.trips;
        Self {
            month: mode(trips.iter().map(|t| t.month)),
            day_of_week: mode(trips.iter().map(|t| t.day_of_week)),
            start_hour: mode(trips.iter().map(|t| t.start_hour)),
        }
    }

    pub fn month_name(&self) -> Option<&'static str> {
        self.month
            .and_then(|m| u8::try_from(m).ok())
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most common month: {}", self.month_name().unwrap_or(NO_DATA))?;
        writeln!(
            f,
            "Most common day of week: {}",
            self.day_of_week.map(weekday_name).unwrap_or(NO_DATA)
        )?;
        writeln!(f, "Most common start hour: {}", or_no_data(&self.start_hour))
    }
}

/// Most popular start station, end station and route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub route: Option<String>,
}

impl StationStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let trips = &dataset.trips;
        Self {
            start_station: mode(trips.iter().map(|t| t.start_station.as_str())).map(String::from),
            end_station: mode(trips.iter().map(|t| t.end_station.as_str())).map(String::from),
            route: mode(trips.iter().map(|t| t.route.as_str())).map(String::from),
        }
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most commonly used start station: {}",
            or_no_data(&self.start_station)
        )?;
        writeln!(
            f,
            "Most commonly used end station: {}",
            or_no_data(&self.end_station)
        )?;
        writeln!(
            f,
            "Most frequent combination of start station and end station trip: \n{}",
            or_no_data(&self.route)
        )
    }
}

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    /// `None` when there are no trips.
    pub mean: Option<f64>,
    pub count: usize,
}

impl DurationStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let count = dataset.trips.len();
        let total: f64 = dataset.trips.iter().map(|t| t.trip_duration).sum();
        let mean = (count > 0).then(|| total / count as f64);
        Self { total, mean, count }
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total travel time: {}", self.total)?;
        match self.mean {
            Some(mean) => writeln!(f, "Mean travel time: {}", mean),
            None => writeln!(f, "Mean travel time: undefined (no trips)"),
        }
    }
}

/// A statistic over an optional column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column<T> {
    /// The city's source has no such column.
    Missing,
    Present(T),
}

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

impl BirthYears {
    /// `None` when no trip carries a usable birth year.
    pub fn from_years(years: &[i32]) -> Option<Self> {
        Some(Self {
            earliest: *years.iter().min()?,
            latest: *years.iter().max()?,
            most_common: mode(years.iter().copied())?,
        })
    }
}

/// User type, gender and birth year breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub city: City,
    pub user_types: Vec<(String, usize)>,
    pub genders: Column<Vec<(String, usize)>>,
    pub birth_years: Column<Option<BirthYears>>,
}

impl UserStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let trips = &dataset.trips;
        let user_types = value_counts(trips.iter().filter_map(|t| t.user_type.clone()));

        let genders = if dataset.schema.has_gender {
            Column::Present(value_counts(trips.iter().filter_map(|t| t.gender.clone())))
        } else {
            Column::Missing
        };

        let birth_years = if dataset.schema.has_birth_year {
            let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
            Column::Present(BirthYears::from_years(&years))
        } else {
            Column::Missing
        };

        Self {
            city: dataset.city,
            user_types,
            genders,
            birth_years,
        }
    }
}

/// Renders counts as an aligned two-column table.
pub fn format_counts(counts: &[(String, usize)]) -> String {
    if counts.is_empty() {
        return NO_DATA.to_string();
    }
    let value_width = counts.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|(_, c)| c.to_string().len())
        .max()
        .unwrap_or(0);

    counts
        .iter()
        .map(|(value, count)| format!("{:<value_width$}    {:>count_width$}", value, count))
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Counts of user types:")?;
        writeln!(f, "{}", format_counts(&self.user_types))?;

        match &self.genders {
            Column::Present(genders) => {
                writeln!(f, "\nCounts of gender:")?;
                writeln!(f, "{}", format_counts(genders))?;
            }
            Column::Missing => writeln!(f, "\nNo gender statistics for {}", self.city.title())?,
        }

        match &self.birth_years {
            Column::Present(Some(years)) => {
                writeln!(f, "\nEarliest year of birth: {}", years.earliest)?;
                writeln!(f, "Most recent year of birth: {}", years.latest)?;
                writeln!(f, "Most common year of birth: {}", years.most_common)
            }
            Column::Present(None) => writeln!(f, "\nYear of birth: {}", NO_DATA),
            Column::Missing => writeln!(f, "No birth year statistics for {}", self.city.title()),
        }
    }
}
