use chrono::{Month, Weekday};
use lib::{
    City, CityTable, DatasetLoader, DaySelector, MonthSelector, Selectors, Session, StationStats,
    TimeStats, UserStats, filter,
};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn loader() -> DatasetLoader {
    DatasetLoader::new(CityTable::in_dir(&fixtures()))
}

fn run_session(script: &str) -> String {
    let mut out = Vec::new();
    Session::new(loader(), script.as_bytes(), &mut out)
        .run()
        .expect("session should finish cleanly");
    String::from_utf8(out).unwrap()
}

#[test]
fn test_unfiltered_load_keeps_every_row() {
    let loader = loader();
    for city in City::ALL {
        let raw = loader.load_raw(city).unwrap();
        let dataset = loader.load(city, Selectors::default()).unwrap();
        assert_eq!(dataset.len(), raw.len(), "{}", city);
        assert_eq!(dataset.skipped, 0);
    }
}

#[test]
fn test_month_spelling_does_not_matter() {
    let loader = loader();
    let results: Vec<usize> = ["JANUARY", "January", "january"]
        .iter()
        .map(|m| {
            let month: MonthSelector = m.parse().unwrap();
            loader
                .load(City::Chicago, Selectors::new(month, DaySelector::All))
                .unwrap()
                .len()
        })
        .collect();
    assert_eq!(results, vec![4, 4, 4]);
}

#[test]
fn test_chicago_statistics() {
    let dataset = loader().load(City::Chicago, Selectors::default()).unwrap();

    let time = TimeStats::from_dataset(&dataset);
    assert_eq!(time.month_name(), Some("January"));
    assert_eq!(time.day_of_week, Some(Weekday::Mon));
    assert_eq!(time.start_hour, Some(8));

    let stations = StationStats::from_dataset(&dataset);
    assert_eq!(
        stations.start_station.as_deref(),
        Some("Clinton St & Washington Blvd")
    );
    assert_eq!(
        stations.end_station.as_deref(),
        Some("Canal St & Madison St")
    );

    let text = UserStats::from_dataset(&dataset).to_string();
    assert!(text.contains("Subscriber    10"));
    assert!(text.contains("Customer       2"));
    assert!(text.contains("Earliest year of birth: 1975"));
    assert!(text.contains("Most recent year of birth: 1992"));
    assert!(text.contains("Most common year of birth: 1990"));
}

#[test]
fn test_filtered_dataset_matches_selectors() {
    let dataset = loader().load(City::NewYorkCity, Selectors::default()).unwrap();
    let march = filter(&dataset, MonthSelector::Only(Month::March), DaySelector::All);
    assert_eq!(march.len(), 3);
    assert!(march.trips.iter().all(|t| t.month == 3));

    let march_mondays = filter(&march, MonthSelector::All, DaySelector::Only(Weekday::Mon));
    let mondays_in_march = filter(
        &filter(&dataset, MonthSelector::All, DaySelector::Only(Weekday::Mon)),
        MonthSelector::Only(Month::March),
        DaySelector::All,
    );
    assert_eq!(march_mondays, mondays_in_march);
    assert_eq!(march_mondays.len(), 2);
}

#[test]
fn test_washington_has_no_demographics() {
    let dataset = loader().load(City::Washington, Selectors::default()).unwrap();
    let text = UserStats::from_dataset(&dataset).to_string();

    assert!(text.contains("Counts of user types:\nSubscriber    4\nCustomer      1"));
    assert!(text.contains("No gender statistics for Washington"));
    assert!(text.contains("No birth year statistics for Washington"));
}

#[test]
fn test_full_session() {
    let text = run_session("Springfield\nchicago\nyes\nyes\nno\nfebruary\nfriday\nno\n");

    assert!(text.contains("Incorrect choice, please select data"));
    assert_eq!(text.matches("another 5 rows").count(), 2);
    assert!(text.contains("Most common month: February"));
    assert!(text.contains("Most common day of week: Friday"));
    assert!(text.contains("Total travel time: 370"));
    assert!(text.contains("Mean travel time: 370"));
    assert!(text.contains("Counts of gender:"));
    assert_eq!(text.matches("Would you like to restart?").count(), 1);
}

#[test]
fn test_session_with_empty_selection_and_restart() {
    let text = run_session("chicago\nno\njune\nsaturday\nYes\nwashington\nno\nAll\nall\nno\n");

    assert!(text.contains("No trips match the selected filters."));
    assert!(text.contains("Most common month: no data"));
    assert!(text.contains("Mean travel time: undefined (no trips)"));
    assert!(text.contains("No gender statistics for Washington"));
    assert_eq!(text.matches("Would you like to restart?").count(), 2);
}

#[test]
fn test_session_ends_when_input_runs_out() {
    let text = run_session("chicago\nno\nmarch\n");
    assert!(text.contains("Select a day"));
    assert!(!text.contains("Calculating"));
}
