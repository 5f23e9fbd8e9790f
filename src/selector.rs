use crate::error::ExploreError;
use chrono::{Month, Weekday};
use std::fmt;
use std::str::FromStr;

/// Months covered by the published trip logs, in calendar order.
pub const SUPPORTED_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday ("Monday", ...).
///
/// chrono only formats the three-letter abbreviation, so the long form is
/// spelled out here.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Cities with a published trip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case identifier the user types at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Title-cased name used in report text.
    pub fn title(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Default CSV file name of the city's trip log.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for City {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.key() == wanted)
            .ok_or_else(|| ExploreError::Data(format!("Unknown city: {}", s.trim())))
    }
}

/// Month constraint applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelector {
    #[default]
    All,
    Only(Month),
}

impl MonthSelector {
    /// 1-based month number the selector keeps, `None` for "all".
    pub fn ordinal(self) -> Option<u32> {
        match self {
            MonthSelector::All => None,
            MonthSelector::Only(month) => Some(month.number_from_month()),
        }
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str("all"),
            MonthSelector::Only(month) => f.write_str(month.name()),
        }
    }
}

impl FromStr for MonthSelector {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthSelector::All);
        }
        SUPPORTED_MONTHS
            .into_iter()
            .find(|month| month.name().to_lowercase() == wanted)
            .map(MonthSelector::Only)
            .ok_or_else(|| ExploreError::Data(format!("Unsupported month: {}", s.trim())))
    }
}

/// Day-of-week constraint applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelector {
    #[default]
    All,
    Only(Weekday),
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::All => f.write_str("all"),
            DaySelector::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

impl FromStr for DaySelector {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DaySelector::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).to_lowercase() == wanted)
            .map(DaySelector::Only)
            .ok_or_else(|| ExploreError::Data(format!("Unknown day: {}", s.trim())))
    }
}

/// The month and day filters chosen for one exploration round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selectors {
    pub month: MonthSelector,
    pub day: DaySelector,
}

impl Selectors {
    pub fn new(month: MonthSelector, day: DaySelector) -> Self {
        Self { month, day }
    }
}
