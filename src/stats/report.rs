use serde::Serialize;
use tracing::info;

use crate::calendar::{City, Day, Month};
use crate::error::NoDataError;
use crate::filter::{FilterCriteria, FilteredView};
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};

/// Every statistic group for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripReport {
    pub city: City,
    pub month: Month,
    pub day: Day,
    pub trip_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl TripReport {
    #[tracing::instrument(skip(view), fields(trips = view.len()))]
    pub fn from_view(
        criteria: FilterCriteria,
        view: &FilteredView<'_>,
    ) -> Result<Self, NoDataError> {
        let report = Self {
            city: criteria.city,
            month: criteria.month,
            day: criteria.day,
            trip_count: view.len(),
            time: TimeStats::from_view(view)?,
            stations: StationStats::from_view(view)?,
            durations: DurationStats::from_view(view)?,
            users: UserStats::from_view(view)?,
        };
        info!(trips = report.trip_count, "Report computed");
        Ok(report)
    }
}
