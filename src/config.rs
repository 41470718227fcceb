//! Runtime configuration from the environment.
//!
//! `.env` is loaded by the binary before [`Config::from_env`] runs.
//! Command-line flags override these values.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::pager::DEFAULT_PAGE_SIZE;

pub const DATA_DIR_VAR: &str = "BIKESHARE_DATA_DIR";
pub const PAGE_SIZE_VAR: &str = "BIKESHARE_PAGE_SIZE";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";

const DEFAULT_LOG_FILE: &str = "logs/bikeshare.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the per-city CSV files.
    pub data_dir: PathBuf,
    /// Raw records shown per pager step.
    pub page_size: usize,
    pub log_file_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(dir) = lookup(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup(PAGE_SIZE_VAR) {
            config.page_size = parse_page_size(PAGE_SIZE_VAR, &size)?;
        }
        if let Some(path) = lookup(LOG_FILE_VAR) {
            config.log_file_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, page_size: Option<usize>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(size) = page_size {
            self.page_size = size;
        }
        self
    }
}

fn parse_page_size(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidPageSize {
            key,
            value: value.to_string(),
        }),
    }
}
