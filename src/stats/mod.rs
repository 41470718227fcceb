//! Descriptive statistics over a [`FilteredView`](crate::filter::FilteredView).
//!
//! Each group is computed independently and fails with
//! [`NoDataError`](crate::error::NoDataError) when the view is empty. Every
//! "most common" value goes through [`mode::mode`], so ties always resolve
//! to the smallest value.

pub mod duration;
pub mod mode;
pub mod report;
pub mod station;
pub mod time;
pub mod user;

pub use duration::DurationStats;
pub use mode::{Mode, ValueCount};
pub use report::TripReport;
pub use station::{Route, StationStats};
pub use time::TimeStats;
pub use user::{BirthYearStats, Column, UserStats};
