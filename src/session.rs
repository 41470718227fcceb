//! Interactive exploration loop.
//!
//! A session asks for a city, month and day, prints every statistic group
//! for that selection, optionally pages through the raw records, and offers
//! to start over. Input and output are generic so the loop runs against
//! in-memory buffers in tests.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::calendar::{City, Day, Month};
use crate::error::{NoDataError, Result};
use crate::filter::{FilterCriteria, FilteredView};
use crate::output::{
    RULE, Section, write_duration_stats, write_elapsed, write_page, write_station_stats,
    write_time_stats, write_user_stats,
};
use crate::pager::Pager;
use crate::records::RecordStore;
use crate::stats::{DurationStats, StationStats, TimeStats, TripReport, UserStats};

/// Loads, filters and aggregates one selection.
///
/// # Errors
///
/// [`Error::DataSource`](crate::error::Error::DataSource) if the city data
/// cannot be loaded, [`Error::NoData`](crate::error::Error::NoData) if no
/// trip matches the filters.
pub fn build_report(store: &mut RecordStore, criteria: FilterCriteria) -> Result<TripReport> {
    let set = store.load(criteria.city)?;
    let view = set.filter(criteria.month, criteria.day);
    Ok(TripReport::from_view(criteria, &view)?)
}

pub struct Session<R, W> {
    input: R,
    output: W,
    store: RecordStore,
    page_size: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, store: RecordStore, page_size: usize) -> Self {
        Self {
            input,
            output,
            store,
            page_size,
        }
    }

    /// Runs until the user declines to restart or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(criteria) = self.prompt_filters()? else {
                return Ok(());
            };
            info!(
                city = %criteria.city,
                month = %criteria.month,
                day = %criteria.day,
                "Selection made"
            );

            if !self.explore(criteria)? {
                return Ok(());
            }

            writeln!(self.output, "\nWould you like to restart? Enter yes or no.")?;
            match read_answer(&mut self.input)? {
                Some(answer) if answer == "yes" => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Returns `None` when input ends before all three values are given.
    fn prompt_filters(&mut self) -> io::Result<Option<FilterCriteria>> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let cities = City::ALL.map(City::name);
        let Some(city) = prompt_choice::<City>(
            &mut self.input,
            &mut self.output,
            "Which city would you like to explore?",
            &cities,
        )?
        else {
            return Ok(None);
        };

        let months = Month::ALL.map(Month::name);
        let Some(month) = prompt_choice::<Month>(
            &mut self.input,
            &mut self.output,
            "Data of which month would you like to explore?",
            &months,
        )?
        else {
            return Ok(None);
        };

        let days = Day::ALL.map(Day::name);
        let Some(day) = prompt_choice::<Day>(
            &mut self.input,
            &mut self.output,
            "Data of which day in the week would you like to explore?",
            &days,
        )?
        else {
            return Ok(None);
        };

        writeln!(self.output, "{RULE}")?;
        Ok(Some(FilterCriteria::new(city, month, day)))
    }

    /// Prints the statistics and runs the pager. Returns `false` if input
    /// ended during paging.
    fn explore(&mut self, criteria: FilterCriteria) -> io::Result<bool> {
        let set = match self.store.load(criteria.city) {
            Ok(set) => set,
            Err(e) => {
                error!(city = %criteria.city, error = %e, "Failed to load city data");
                writeln!(
                    self.output,
                    "Could not load data for {}: {e}",
                    criteria.city
                )?;
                return Ok(true);
            }
        };

        let view = set.filter(criteria.month, criteria.day);
        write_sections(&mut self.output, &view)?;

        if view.is_empty() {
            return Ok(true);
        }
        page_raw_data(&mut self.input, &mut self.output, &view, self.page_size)
    }
}

/// Prints every statistic group with its computation time.
fn write_sections(w: &mut impl Write, view: &FilteredView<'_>) -> io::Result<()> {
    for section in Section::ALL {
        writeln!(w, "\n{}\n", section.title())?;
        let started = Instant::now();

        let written = match section {
            Section::Time => TimeStats::from_view(view).map(|s| write_time_stats(w, &s)),
            Section::Stations => StationStats::from_view(view).map(|s| write_station_stats(w, &s)),
            Section::Durations => {
                DurationStats::from_view(view).map(|s| write_duration_stats(w, &s))
            }
            Section::Users => UserStats::from_view(view).map(|s| write_user_stats(w, &s)),
        };
        match written {
            Ok(result) => result?,
            Err(NoDataError) => {
                warn!(section = ?section, "No data for selection");
                writeln!(w, "No data for this selection.")?;
            }
        }

        write_elapsed(w, started.elapsed())?;
    }
    Ok(())
}

/// Shows raw records page by page while the user answers "yes" or "y".
fn page_raw_data(
    input: &mut impl BufRead,
    output: &mut impl Write,
    view: &FilteredView<'_>,
    page_size: usize,
) -> io::Result<bool> {
    let mut pager = Pager::new(view, page_size);
    let mut question = format!(
        "Would you like to see {page_size} lines of the filtered raw data? \
         Enter \"yes\" or \"y\" to continue, anything else to abort: "
    );

    loop {
        write!(output, "{question}")?;
        output.flush()?;
        let answer = match read_answer(input)? {
            Some(answer) => answer,
            None => return Ok(false),
        };
        if answer != "yes" && answer != "y" {
            return Ok(true);
        }

        if let Some(page) = pager.next_page() {
            write_page(output, &page)?;
            if page.last {
                writeln!(output, "End of filtered raw data. No more lines to print.")?;
                return Ok(true);
            }
        }

        question = format!(
            "Would you like to see {page_size} more lines of the filtered raw data? \
             Enter \"yes\" or \"y\" to continue, anything else to abort: "
        );
    }
}

/// Asks until the answer parses as `T`. Returns `None` at end of input.
fn prompt_choice<T: std::str::FromStr>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    description: &str,
    options: &[&str],
) -> io::Result<Option<T>> {
    let listed = options
        .iter()
        .map(|o| format!("\"{o}\""))
        .collect::<Vec<_>>()
        .join(", ");

    loop {
        write!(output, "{description} ({listed}): ")?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        match answer.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(
                output,
                "\"{answer}\" is not an available option. Please enter again."
            )?,
        }
    }
}

/// One trimmed, lower-cased line, or `None` at end of input.
fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
