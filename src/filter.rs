//! Month and weekday filtering over a [`RecordSet`].

use tracing::debug;

use crate::calendar::{City, Day, Month};
use crate::error::InvalidFilterError;
use crate::records::{RecordSet, Schema, TripRecord};

/// A validated `(city, month, day)` selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    pub city: City,
    pub month: Month,
    pub day: Day,
}

impl FilterCriteria {
    pub fn new(city: City, month: Month, day: Day) -> Self {
        Self { city, month, day }
    }

    /// Validates raw selections against their enumerations.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self, InvalidFilterError> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

/// An ordered subset of a [`RecordSet`]. Borrowing keeps the source
/// untouched; views can be filtered again.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    schema: Schema,
    records: Vec<&'a TripRecord>,
}

impl<'a> FilteredView<'a> {
    /// Every record of the set, unfiltered.
    pub fn all(set: &'a RecordSet) -> Self {
        Self {
            schema: set.schema(),
            records: set.records().iter().collect(),
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[&'a TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Narrows this view further. See [`apply`].
    pub fn filter(&self, month: Month, day: Day) -> FilteredView<'a> {
        apply(self, month, day)
    }
}

/// Keeps the records whose start time falls in `month` and on `day`.
/// [`Month::All`] and [`Day::All`] impose no constraint.
pub fn apply<'a>(view: &FilteredView<'a>, month: Month, day: Day) -> FilteredView<'a> {
    let records: Vec<&'a TripRecord> = view
        .iter()
        .filter(|r| month.matches(&r.start_time) && day.matches(&r.start_time))
        .collect();

    debug!(
        month = %month,
        day = %day,
        before = view.len(),
        after = records.len(),
        "Applied filter"
    );

    FilteredView {
        schema: view.schema,
        records,
    }
}

/// [`apply`] for unvalidated month and day names.
pub fn apply_names<'a>(
    view: &FilteredView<'a>,
    month: &str,
    day: &str,
) -> Result<FilteredView<'a>, InvalidFilterError> {
    Ok(apply(view, month.parse()?, day.parse()?))
}

impl RecordSet {
    /// Filters the whole set.
    #[tracing::instrument(skip(self), fields(city = %self.city()))]
    pub fn filter(&self, month: Month, day: Day) -> FilteredView<'_> {
        apply(&FilteredView::all(self), month, day)
    }
}
