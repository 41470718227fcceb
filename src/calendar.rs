//! City, month and weekday enumerations.
//!
//! The month and weekday lists are the user-facing display enumerations with
//! `all` at position 0. Converting between a display position and chrono's
//! accessors happens only here:
//!
//! | enumeration | display positions | chrono accessor                      | shift |
//! |-------------|-------------------|--------------------------------------|-------|
//! | month       | 1..=6 (Jan..Jun)  | `month()`, 1-based                   | none  |
//! | weekday     | 1..=7 (Mon..Sun)  | `weekday().num_days_from_monday()`   | -1/+1 |

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::error::{FilterKind, InvalidFilterError};

/// Supported cities and their data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

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
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.name() == wanted)
            .ok_or_else(|| InvalidFilterError::new(FilterKind::City, s))
    }
}

/// Month filter. Only January through June are selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

const MONTH_NAMES: [&str; 7] = ["all", "january", "february", "march", "april", "may", "june"];

impl Month {
    pub const ALL: [Month; 7] = [
        Month::All,
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn position(self) -> usize {
        self as usize
    }

    pub fn from_position(position: usize) -> Option<Month> {
        Month::ALL.get(position).copied()
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.position()]
    }

    /// The value of `NaiveDateTime::month()` this filter keeps, or `None`
    /// for [`Month::All`].
    pub fn accessor(self) -> Option<u32> {
        match self {
            Month::All => None,
            month => Some(month.position() as u32),
        }
    }

    /// Inverse of [`Month::accessor`]. Months outside the filter range
    /// yield `None`.
    pub fn from_accessor(month: u32) -> Option<Month> {
        match month {
            0 => None,
            m => Month::from_position(m as usize),
        }
    }

    pub fn matches(self, start_time: &NaiveDateTime) -> bool {
        self.accessor().is_none_or(|m| start_time.month() == m)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MONTH_NAMES
            .iter()
            .position(|name| *name == wanted)
            .and_then(Month::from_position)
            .ok_or_else(|| InvalidFilterError::new(FilterKind::Month, s))
    }
}

/// Weekday filter. Orders Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const DAY_NAMES: [&str; 8] = [
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

impl Day {
    pub const ALL: [Day; 8] = [
        Day::All,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn position(self) -> usize {
        self as usize
    }

    pub fn from_position(position: usize) -> Option<Day> {
        Day::ALL.get(position).copied()
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.position()]
    }

    /// The value of `weekday().num_days_from_monday()` this filter keeps
    /// (display position - 1), or `None` for [`Day::All`].
    pub fn accessor(self) -> Option<u32> {
        match self {
            Day::All => None,
            day => Some(day.position() as u32 - 1),
        }
    }

    /// Inverse of [`Day::accessor`]: display position = accessor + 1.
    pub fn from_accessor(days_from_monday: u32) -> Option<Day> {
        Day::from_position(days_from_monday as usize + 1)
    }

    pub fn matches(self, start_time: &NaiveDateTime) -> bool {
        self.accessor()
            .is_none_or(|d| start_time.weekday().num_days_from_monday() == d)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DAY_NAMES
            .iter()
            .position(|name| *name == wanted)
            .and_then(Day::from_position)
            .ok_or_else(|| InvalidFilterError::new(FilterKind::Day, s))
    }
}

/// Calendar name for a 1-based month number, including months the filter
/// enumeration does not cover.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Capitalises the first letter of a display name (`"monday"` -> `"Monday"`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
