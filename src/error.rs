//! Error types for loading, filtering and aggregating trip data.

use std::path::PathBuf;

use thiserror::Error;

/// The trip data for a city could not be read or parsed.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("line {line}: invalid trip duration '{value}'")]
    InvalidDuration { line: u64, value: String },

    #[error("line {line}: invalid birth year '{value}'")]
    InvalidBirthYear { line: u64, value: String },

    #[error("line {line}: required field '{column}' is blank")]
    BlankField { line: u64, column: &'static str },
}

/// Which enumeration a rejected filter value was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    City,
    Month,
    Day,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::City => f.write_str("city"),
            FilterKind::Month => f.write_str("month"),
            FilterKind::Day => f.write_str("day"),
        }
    }
}

/// A filter value outside its enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {kind}")]
pub struct InvalidFilterError {
    pub kind: FilterKind,
    pub value: String,
}

impl InvalidFilterError {
    pub fn new(kind: FilterKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A statistic was requested over a view with no records.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no data for this selection")]
pub struct NoDataError;

/// Invalid runtime configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidPageSize { key: &'static str, value: String },
}

/// Any failure of a single filter-and-aggregate request.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error(transparent)]
    NoData(#[from] NoDataError),
}

pub type Result<T> = std::result::Result<T, Error>;
