//! Rendering of statistics and raw records.
//!
//! Supports the plain-text console report, pretty JSON, and debug logging.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::calendar::capitalize;
use crate::pager::Page;
use crate::stats::{
    Column, DurationStats, StationStats, TimeStats, TripReport, UserStats, ValueCount,
};

pub const RULE: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TripReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON followed by a newline.
pub fn write_json(w: &mut impl Write, report: &TripReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_time_stats(w: &mut impl Write, stats: &TimeStats) -> io::Result<()> {
    writeln!(w, "The most common month is {}.", capitalize(&stats.month_name()))?;
    writeln!(
        w,
        "The most common weekday is {}.",
        capitalize(stats.most_common_weekday.value.name())
    )?;
    writeln!(
        w,
        "The most common hour of the day to start is {} o'clock.",
        stats.most_common_start_hour.value
    )
}

pub fn write_station_stats(w: &mut impl Write, stats: &StationStats) -> io::Result<()> {
    writeln!(
        w,
        "The most commonly used start station is \"{}\".",
        stats.most_common_start_station.value
    )?;
    writeln!(
        w,
        "The most commonly used end station is \"{}\".",
        stats.most_common_end_station.value
    )?;
    writeln!(
        w,
        "The most frequent combination of start station and end station trip is {}.",
        stats.most_common_route.value
    )
}

pub fn write_duration_stats(w: &mut impl Write, stats: &DurationStats) -> io::Result<()> {
    writeln!(
        w,
        "The total travel time of all {} selected trips is {} s.",
        stats.trip_count, stats.total_duration
    )?;
    writeln!(w, "The mean travel time per trip is {} s.", stats.mean_duration)?;
    writeln!(
        w,
        "The shortest trip took {} s, the longest {} s.",
        stats.shortest, stats.longest
    )
}

pub fn write_user_stats(w: &mut impl Write, stats: &UserStats) -> io::Result<()> {
    writeln!(w, "Counts of User Type:")?;
    write_counts(w, &stats.user_type_counts)?;

    match &stats.gender_counts {
        Column::Available(counts) => {
            writeln!(w, "Total Gender count:")?;
            write_counts(w, counts)?;
        }
        Column::NoValues => writeln!(w, "No gender was recorded for the selected trips.")?,
        Column::Unavailable => {
            writeln!(w, "Gender information is not available for this city.")?
        }
    }

    match &stats.birth_years {
        Column::Available(years) => {
            writeln!(w, "Earliest birth year: {}", years.earliest)?;
            writeln!(w, "Most recent birth year: {}", years.latest)?;
            writeln!(w, "Most common birth year: {}", years.most_common.value)?;
        }
        Column::NoValues => writeln!(w, "No birth year was recorded for the selected trips.")?,
        Column::Unavailable => {
            writeln!(w, "Birth year information is not available for this city.")?
        }
    }
    Ok(())
}

fn write_counts(w: &mut impl Write, counts: &[ValueCount]) -> io::Result<()> {
    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0);
    for row in counts {
        writeln!(w, "  {:<width$}  {}", row.value, row.count)?;
    }
    Ok(())
}

pub fn write_elapsed(w: &mut impl Write, elapsed: Duration) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "This took {:.6} seconds.", elapsed.as_secs_f64())?;
    writeln!(w, "{RULE}")
}

/// Writes every section of a report without timings.
pub fn write_report(w: &mut impl Write, report: &TripReport) -> io::Result<()> {
    writeln!(
        w,
        "{} trips in {} (month: {}, day: {})",
        report.trip_count,
        capitalize(report.city.name()),
        report.month,
        report.day
    )?;
    writeln!(w, "{RULE}")?;
    for section in Section::ALL {
        writeln!(w, "\n{}\n", section.title())?;
        match section {
            Section::Time => write_time_stats(w, &report.time)?,
            Section::Stations => write_station_stats(w, &report.stations)?,
            Section::Durations => write_duration_stats(w, &report.durations)?,
            Section::Users => write_user_stats(w, &report.users)?,
        }
        writeln!(w, "{RULE}")?;
    }
    Ok(())
}

/// The four statistic groups, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Time,
    Stations,
    Durations,
    Users,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Time,
        Section::Stations,
        Section::Durations,
        Section::Users,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Time => "Calculating The Most Frequent Times of Travel...",
            Section::Stations => "Calculating The Most Popular Stations and Trip...",
            Section::Durations => "Calculating Trip Duration...",
            Section::Users => "Calculating User Stats...",
        }
    }
}

/// Writes one pager step as a table of raw records.
pub fn write_page(w: &mut impl Write, page: &Page<'_, '_>) -> io::Result<()> {
    for (i, record) in page.records.iter().enumerate() {
        let end_time = record
            .end_time
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let gender = record.gender.as_deref().unwrap_or("-");
        let birth_year = record
            .birth_year
            .map(|y| (y.trunc() as i32).to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            w,
            "{:>7}  {}  {}  {:>6} s  {} -> {}  {}  {}  {}",
            page.offset + i,
            record.start_time,
            end_time,
            record.trip_duration,
            record.start_station,
            record.end_station,
            record.user_type,
            gender,
            birth_year
        )?;
    }
    Ok(())
}
