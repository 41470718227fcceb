//! Trip duration totals and averages.

use serde::Serialize;

use crate::error::NoDataError;
use crate::filter::FilteredView;

/// All values are whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    /// Summed in `u128` so any number of `u64` durations fits.
    pub total_duration: u128,
    /// Rounded half to even.
    pub mean_duration: u64,
    pub shortest: u64,
    pub longest: u64,
}

impl DurationStats {
    pub fn from_view(view: &FilteredView<'_>) -> Result<Self, NoDataError> {
        let trip_count = view.len();
        let total_duration: u128 = view.iter().map(|r| u128::from(r.trip_duration)).sum();
        let shortest = view.iter().map(|r| r.trip_duration).min().ok_or(NoDataError)?;
        let longest = view.iter().map(|r| r.trip_duration).max().ok_or(NoDataError)?;

        Ok(Self {
            trip_count,
            total_duration,
            mean_duration: rounded_mean(total_duration, trip_count as u128),
            shortest,
            longest,
        })
    }
}

/// `total / count` rounded half to even in integer arithmetic.
/// `count` must be non-zero.
///
/// The mean of `u64` values never exceeds the largest of them, so the
/// result always fits back into `u64`.
fn rounded_mean(total: u128, count: u128) -> u64 {
    let quotient = total / count;
    let remainder = total % count;
    let rounded = match (remainder * 2).cmp(&count) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    };
    u64::try_from(rounded).unwrap_or(u64::MAX)
}
