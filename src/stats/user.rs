//! User type, gender and birth year statistics.

use serde::Serialize;

use crate::error::NoDataError;
use crate::filter::FilteredView;
use crate::stats::mode::{Mode, ValueCount, mode, value_counts};

/// Outcome of a statistic over an optional column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Column<T> {
    Available(T),
    /// The column exists for this city but every cell in the view is blank.
    NoValues,
    /// The city's data has no such column.
    Unavailable,
}

impl<T> Column<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Column::Available(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Column::Unavailable)
    }
}

/// Birth years truncated to whole years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: Mode<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_type_counts: Vec<ValueCount>,
    pub gender_counts: Column<Vec<ValueCount>>,
    pub birth_years: Column<BirthYearStats>,
}

impl UserStats {
    pub fn from_view(view: &FilteredView<'_>) -> Result<Self, NoDataError> {
        if view.is_empty() {
            return Err(NoDataError);
        }
        let schema = view.schema();

        let user_type_counts = value_counts(view.iter().map(|r| r.user_type.as_str()));

        let gender_counts = if schema.gender {
            let table = value_counts(view.iter().filter_map(|r| r.gender.as_deref()));
            if table.is_empty() {
                Column::NoValues
            } else {
                Column::Available(table)
            }
        } else {
            Column::Unavailable
        };

        let birth_years = if schema.birth_year {
            let years: Vec<i32> = view
                .iter()
                .filter_map(|r| r.birth_year)
                .map(truncate_year)
                .collect();
            match birth_year_stats(&years) {
                Some(stats) => Column::Available(stats),
                None => Column::NoValues,
            }
        } else {
            Column::Unavailable
        };

        Ok(Self {
            user_type_counts,
            gender_counts,
            birth_years,
        })
    }
}

fn truncate_year(year: f64) -> i32 {
    year.trunc() as i32
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{City, Day, Month};
    use crate::filter::tests::trip;
    use crate::records::{RecordSet, Schema, TripRecord};

    fn rider(user_type: &str, gender: Option<&str>, birth_year: Option<f64>) -> TripRecord {
        TripRecord {
            user_type: user_type.to_string(),
            gender: gender.map(str::to_string),
            birth_year,
            ..trip(2017, 1, 2, 8, 60)
        }
    }

    const FULL: Schema = Schema {
        gender: true,
        birth_year: true,
    };

    #[test]
    fn test_full_schema() {
        let set = RecordSet::new(
            City::Chicago,
            FULL,
            vec![
                rider("Subscriber", Some("Male"), Some(1989.0)),
                rider("Subscriber", Some("Female"), Some(1992.0)),
                rider("Customer", Some("Male"), Some(1989.0)),
                rider("Customer", None, None),
                rider("Subscriber", None, Some(1943.0)),
            ],
        );
        let stats = UserStats::from_view(&set.filter(Month::All, Day::All)).unwrap();

        assert_eq!(stats.user_type_counts[0].value, "Subscriber");
        assert_eq!(stats.user_type_counts[0].count, 3);
        assert_eq!(stats.user_type_counts[1].value, "Customer");
        assert_eq!(stats.user_type_counts[1].count, 2);

        let genders = stats.gender_counts.as_available().unwrap();
        assert_eq!(genders.len(), 2);
        assert_eq!(genders[0].value, "Male");
        assert_eq!(genders[0].count, 2);

        let years = stats.birth_years.as_available().unwrap();
        assert_eq!(years.earliest, 1943);
        assert_eq!(years.latest, 1992);
        assert_eq!(years.most_common.value, 1989);
        assert_eq!(years.most_common.count, 2);
    }

    #[test]
    fn test_missing_columns_are_unavailable() {
        let set = RecordSet::new(
            City::Washington,
            Schema::default(),
            vec![rider("Subscriber", None, None)],
        );
        let stats = UserStats::from_view(&set.filter(Month::All, Day::All)).unwrap();
        assert!(stats.gender_counts.is_unavailable());
        assert!(stats.birth_years.is_unavailable());
    }

    #[test]
    fn test_blank_columns_have_no_values() {
        let set = RecordSet::new(City::Chicago, FULL, vec![rider("Customer", None, None)]);
        let stats = UserStats::from_view(&set.filter(Month::All, Day::All)).unwrap();
        assert_eq!(stats.gender_counts, Column::NoValues);
        assert_eq!(stats.birth_years, Column::NoValues);
    }

    #[test]
    fn test_single_user_type_counts_whole_view() {
        let set = RecordSet::new(
            City::Chicago,
            Schema::default(),
            vec![
                rider("Subscriber", None, None),
                rider("Subscriber", None, None),
                rider("Subscriber", None, None),
            ],
        );
        let view = set.filter(Month::All, Day::All);
        let stats = UserStats::from_view(&view).unwrap();
        assert_eq!(stats.user_type_counts.len(), 1);
        assert_eq!(stats.user_type_counts[0].count, view.len());
    }

    #[test]
    fn test_truncate_year() {
        assert_eq!(truncate_year(1989.0), 1989);
        assert_eq!(truncate_year(1989.9), 1989);
    }

    #[test]
    fn test_empty_view() {
        let set = RecordSet::new(City::Chicago, FULL, vec![]);
        let err = UserStats::from_view(&set.filter(Month::All, Day::All)).unwrap_err();
        assert_eq!(err, NoDataError);
    }
}
