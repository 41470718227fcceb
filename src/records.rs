//! Trip records and the per-city record store.
//!
//! Each city publishes one CSV file. The required columns are the same for
//! every city; `Gender` and `Birth Year` only exist for some of them, so the
//! [`Schema`] of a [`RecordSet`] is decided from the header at load time.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::{debug, info};

use crate::calendar::City;
use crate::error::DataSourceError;

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const TRIP_DURATION: &str = "Trip Duration";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single bicycle rental.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Whole seconds.
    pub trip_duration: u64,
    pub user_type: String,
    pub gender: Option<String>,
    /// Source data stores years as reals (`1989.0`).
    pub birth_year: Option<f64>,
}

/// Optional columns available for a city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub gender: bool,
    pub birth_year: bool,
}

/// All trips for one city, in file order. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct RecordSet {
    city: City,
    schema: Schema,
    records: Vec<TripRecord>,
}

impl RecordSet {
    pub fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    /// Parses a city CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] if a required column is missing, the CSV
    /// is malformed, or a required value cannot be parsed.
    pub fn from_reader<R: io::Read>(city: City, reader: R) -> Result<Self, DataSourceError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns = Columns::locate(rdr.headers()?)?;
        let schema = columns.schema();

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            records.push(columns.parse(&row)?);
        }

        debug!(city = %city, rows = records.len(), ?schema, "Parsed trip records");

        Ok(Self {
            city,
            schema,
            records,
        })
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads every trip for `city` from its CSV file in `data_dir`.
#[tracing::instrument(skip_all, fields(city = %city))]
pub fn load(city: City, data_dir: &Path) -> Result<RecordSet, DataSourceError> {
    let path = data_dir.join(city.file_name());
    let file = File::open(&path).map_err(|source| DataSourceError::Io {
        path: path.clone(),
        source,
    })?;

    let set = RecordSet::from_reader(city, io::BufReader::new(file))?;
    info!(path = %path.display(), rows = set.len(), "City data loaded");
    Ok(set)
}

/// Loads city data on first use and keeps it for the rest of the session.
#[derive(Debug)]
pub struct RecordStore {
    data_dir: PathBuf,
    cache: HashMap<City, RecordSet>,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load(&mut self, city: City) -> Result<&RecordSet, DataSourceError> {
        match self.cache.entry(city) {
            Entry::Occupied(entry) => {
                debug!(city = %city, "Using cached city data");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(load(city, &self.data_dir)?)),
        }
    }

    pub fn is_cached(&self, city: City) -> bool {
        self.cache.contains_key(&city)
    }
}

/// Header positions of the columns we read.
struct Columns {
    start_time: usize,
    end_time: Option<usize>,
    start_station: usize,
    end_station: usize,
    trip_duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, DataSourceError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| find(name).ok_or(DataSourceError::MissingColumn(name));

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: find(END_TIME),
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            trip_duration: require(TRIP_DURATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }

    fn parse(&self, row: &StringRecord) -> Result<TripRecord, DataSourceError> {
        let line = row.position().map_or(0, |p| p.line());

        let required = |idx: usize, column: &'static str| match row.get(idx).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DataSourceError::BlankField { line, column }),
        };
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let start_time = required(self.start_time, START_TIME)?;
        let start_time =
            parse_timestamp(start_time).ok_or_else(|| DataSourceError::InvalidTimestamp {
                line,
                value: start_time.to_string(),
            })?;

        let end_time = optional(self.end_time)
            .map(|value| {
                parse_timestamp(value).ok_or_else(|| DataSourceError::InvalidTimestamp {
                    line,
                    value: value.to_string(),
                })
            })
            .transpose()?;

        let duration = required(self.trip_duration, TRIP_DURATION)?;
        let trip_duration =
            parse_duration(duration).ok_or_else(|| DataSourceError::InvalidDuration {
                line,
                value: duration.to_string(),
            })?;

        let birth_year = optional(self.birth_year)
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|year| year.is_finite())
                    .ok_or_else(|| DataSourceError::InvalidBirthYear {
                        line,
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        Ok(TripRecord {
            start_time,
            end_time,
            start_station: required(self.start_station, START_STATION)?.to_string(),
            end_station: required(self.end_station, END_STATION)?.to_string(),
            trip_duration,
            user_type: required(self.user_type, USER_TYPE)?.to_string(),
            gender: optional(self.gender).map(str::to_string),
            birth_year,
        })
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Whole seconds. Fractional values are truncated; negatives and values
/// beyond `u64::MAX` are rejected.
fn parse_duration(value: &str) -> Option<u64> {
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    // `u64::MAX as f64` rounds up to 2^64, the first value that no longer fits
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0 && *secs < u64::MAX as f64)
        .map(|secs| secs.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_parse_city_with_optional_columns() {
        let set = RecordSet::from_reader(City::Chicago, CHICAGO.as_bytes()).unwrap();

        assert_eq!(set.city(), City::Chicago);
        assert_eq!(
            set.schema(),
            Schema {
                gender: true,
                birth_year: true
            }
        );
        assert_eq!(set.len(), 2);

        let first = &set.records()[0];
        assert_eq!(first.start_time.month(), 6);
        assert_eq!(first.start_time.hour(), 15);
        assert_eq!(first.trip_duration, 321);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992.0));
        assert!(first.end_time.is_some());

        let second = &set.records()[1];
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn test_parse_city_without_optional_columns() {
        let set = RecordSet::from_reader(City::Washington, WASHINGTON.as_bytes()).unwrap();

        assert_eq!(set.schema(), Schema::default());
        assert_eq!(set.records()[0].trip_duration, 489);
        assert_eq!(set.records()[0].gender, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Start Time,Start Station,End Station,User Type\n";
        let err = RecordSet::from_reader(City::Chicago, csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataSourceError::MissingColumn("Trip Duration")));
    }

    #[test]
    fn test_invalid_timestamp_reports_line() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,100,A,B,Subscriber
yesterday,100,A,B,Subscriber
";
        let err = RecordSet::from_reader(City::Chicago, csv.as_bytes()).unwrap_err();
        match err {
            DataSourceError::InvalidTimestamp { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,-5,A,B,Subscriber
";
        let err = RecordSet::from_reader(City::Chicago, csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataSourceError::InvalidDuration { .. }));
    }

    #[test]
    fn test_blank_required_field() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,100,A,B,
";
        let err = RecordSet::from_reader(City::Chicago, csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::BlankField {
                column: "User Type",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01T00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 00:07:57.123").is_some());
        assert!(parse_timestamp("01/01/2017").is_none());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("600"), Some(600));
        assert_eq!(parse_duration("489.966"), Some(489));
        assert_eq!(parse_duration("-1"), None);
        assert_eq!(parse_duration("NaN"), None);
        assert_eq!(parse_duration("ten"), None);
        assert_eq!(parse_duration("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_duration("18446744073709551616"), None);
        assert_eq!(parse_duration("1e30"), None);
        assert_eq!(parse_duration("1e19"), Some(10_000_000_000_000_000_000));
    }

    #[test]
    fn test_oversized_duration_is_rejected_on_load() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,1e30,A,B,Subscriber
";
        let err = RecordSet::from_reader(City::Washington, csv.as_bytes()).unwrap_err();
        match err {
            DataSourceError::InvalidDuration { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "1e30");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_store_caches_per_city() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();

        let mut store = RecordStore::new(dir.path());
        assert!(!store.is_cached(City::Washington));
        assert_eq!(store.load(City::Washington).unwrap().len(), 1);
        assert!(store.is_cached(City::Washington));

        // Cached data survives the file disappearing.
        std::fs::remove_file(dir.path().join("washington.csv")).unwrap();
        assert_eq!(store.load(City::Washington).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(City::Chicago, dir.path()).unwrap_err();
        match err {
            DataSourceError::Io { path, .. } => assert!(path.ends_with("chicago.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
