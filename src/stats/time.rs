//! Most frequent times of travel.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::calendar::{Day, month_name};
use crate::error::NoDataError;
use crate::filter::FilteredView;
use crate::stats::mode::{Mode, mode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Calendar month number, 1-based.
    pub most_common_month: Mode<u32>,
    pub most_common_weekday: Mode<Day>,
    /// Hour of day, 0..=23.
    pub most_common_start_hour: Mode<u32>,
}

impl TimeStats {
    pub fn from_view(view: &FilteredView<'_>) -> Result<Self, NoDataError> {
        let most_common_month = mode(view.iter().map(|r| r.start_time.month())).ok_or(NoDataError)?;

        let most_common_weekday = mode(
            view.iter()
                .filter_map(|r| Day::from_accessor(r.start_time.weekday().num_days_from_monday())),
        )
        .ok_or(NoDataError)?;

        let most_common_start_hour =
            mode(view.iter().map(|r| r.start_time.hour())).ok_or(NoDataError)?;

        Ok(Self {
            most_common_month,
            most_common_weekday,
            most_common_start_hour,
        })
    }

    /// Lower-case name of the most common month, matching the filter
    /// enumeration's names. Months past June still resolve via the calendar.
    pub fn month_name(&self) -> String {
        month_name(self.most_common_month.value)
            .map(str::to_lowercase)
            .unwrap_or_else(|| "unknown".to_string())
    }
}
