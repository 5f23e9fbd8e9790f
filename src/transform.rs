use crate::selector::{City, DaySelector, MonthSelector, Selectors};
use crate::structs::{Dataset, RawTrip, Schema, TripRecord};
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::{debug, warn};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a `Start Time` cell, accepting an optional fractional second.
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Builds the "Start Station: X, End Station: Y" route label.
pub fn route_label(start: &str, end: &str) -> String {
    format!("Start Station: {}, End Station: {}", start, end)
}

/// Turns a source row into a trip with its derived fields.
///
/// Returns `None` when the start timestamp cannot be parsed or the trip
/// duration is not a finite number; callers count and skip such rows.
pub fn enrich(raw: RawTrip) -> Option<TripRecord> {
    let start_time = parse_start_time(&raw.start_time)?;
    if !raw.trip_duration.is_finite() {
        return None;
    }
    let route = route_label(&raw.start_station, &raw.end_station);

    Some(TripRecord {
        month: start_time.month(),
        day_of_week: start_time.weekday(),
        start_hour: start_time.hour(),
        start_time,
        end_time: raw.end_time,
        route,
        start_station: raw.start_station,
        end_station: raw.end_station,
        trip_duration: raw.trip_duration,
        user_type: non_blank(raw.user_type),
        gender: non_blank(raw.gender),
        birth_year: raw.birth_year.and_then(birth_year),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn birth_year(value: f64) -> Option<i32> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i32)
    } else {
        None
    }
}

/// Collects enriched trips into a dataset, counting rows that fail to parse.
pub fn build_dataset(
    city: City,
    schema: Schema,
    rows: impl IntoIterator<Item = RawTrip>,
    already_skipped: usize,
) -> Dataset {
    let mut skipped = already_skipped;
    let trips = rows
        .into_iter()
        .filter_map(|raw| {
            let (start, duration) = (raw.start_time.clone(), raw.trip_duration);
            let trip = enrich(raw);
            if trip.is_none() {
                warn!(
                    "Skipping row with Start Time {:?}, Trip Duration {}",
                    start,
                    duration
                );
                skipped += 1;
            }
            trip
        })
        .collect();

    Dataset {
        city,
        schema,
        trips,
        skipped,
    }
}

fn month_matches(trip: &TripRecord, month: MonthSelector) -> bool {
    month.ordinal().is_none_or(|ordinal| trip.month == ordinal)
}

fn day_matches(trip: &TripRecord, day: DaySelector) -> bool {
    match day {
        DaySelector::All => true,
        DaySelector::Only(weekday) => trip.day_of_week == weekday,
    }
}

/// Keeps the trips matching both selectors, preserving source order.
///
/// The input dataset is left untouched; a new dataset is returned.
pub fn filter(dataset: &Dataset, month: MonthSelector, day: DaySelector) -> Dataset {
    let trips: Vec<TripRecord> = dataset
        .trips
        .iter()
        .filter(|trip| month_matches(trip, month) && day_matches(trip, day))
        .cloned()
        .collect();

    debug!(
        "Filter month={} day={} kept {} of {} trips",
        month,
        day,
        trips.len(),
        dataset.trips.len()
    );

    Dataset {
        city: dataset.city,
        schema: dataset.schema,
        trips,
        skipped: dataset.skipped,
    }
}

/// Applies both halves of `selectors` in one pass.
pub fn apply(dataset: &Dataset, selectors: Selectors) -> Dataset {
    filter(dataset, selectors.month, selectors.day)
}
