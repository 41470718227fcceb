//! Most popular stations and trip.

use std::fmt;

use serde::Serialize;

use crate::error::NoDataError;
use crate::filter::FilteredView;
use crate::stats::mode::{Mode, mode};

/// A start/end station pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" to \"{}\"", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Mode<String>,
    pub most_common_end_station: Mode<String>,
    /// Ties go to the lexicographically smallest `(start, end)` pair.
    pub most_common_route: Mode<Route>,
}

impl StationStats {
    pub fn from_view(view: &FilteredView<'_>) -> Result<Self, NoDataError> {
        let start = mode(view.iter().map(|r| r.start_station.as_str())).ok_or(NoDataError)?;
        let end = mode(view.iter().map(|r| r.end_station.as_str())).ok_or(NoDataError)?;
        let route = mode(
            view.iter()
                .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
        )
        .ok_or(NoDataError)?;

        Ok(Self {
            most_common_start_station: start.map(str::to_string),
            most_common_end_station: end.map(str::to_string),
            most_common_route: route.map(|(start, end)| Route {
                start: start.to_string(),
                end: end.to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{City, Day, Month};
    use crate::filter::tests::trip;
    use crate::records::{RecordSet, Schema, TripRecord};

    fn ride(start: &str, end: &str) -> TripRecord {
        TripRecord {
            start_station: start.to_string(),
            end_station: end.to_string(),
            ..trip(2017, 1, 2, 8, 60)
        }
    }

    #[test]
    fn test_station_and_route_modes() {
        let set = RecordSet::new(
            City::Chicago,
            Schema::default(),
            vec![
                ride("Canal St", "Clark St"),
                ride("Canal St", "Clark St"),
                ride("Canal St", "State St"),
                ride("Lake Shore Dr", "State St"),
            ],
        );
        let stats = StationStats::from_view(&set.filter(Month::All, Day::All)).unwrap();

        assert_eq!(stats.most_common_start_station.value, "Canal St");
        assert_eq!(stats.most_common_start_station.count, 3);
        // Clark St and State St both appear twice as end stations.
        assert_eq!(stats.most_common_end_station.value, "Clark St");
        assert!(stats.most_common_end_station.tie_broken);
        assert_eq!(
            stats.most_common_route.value,
            Route {
                start: "Canal St".into(),
                end: "Clark St".into()
            }
        );
        assert_eq!(stats.most_common_route.count, 2);
    }

    #[test]
    fn test_route_display() {
        let route = Route {
            start: "Lake Shore Dr & Monroe St".into(),
            end: "Streeter Dr & Grand Ave".into(),
        };
        assert_eq!(
            route.to_string(),
            "\"Lake Shore Dr & Monroe St\" to \"Streeter Dr & Grand Ave\""
        );
    }

    #[test]
    fn test_route_tie_break_is_lexicographic() {
        let set = RecordSet::new(
            City::Chicago,
            Schema::default(),
            vec![ride("B", "A"), ride("A", "Z")],
        );
        let stats = StationStats::from_view(&set.filter(Month::All, Day::All)).unwrap();
        assert_eq!(stats.most_common_route.value.start, "A");
        assert_eq!(stats.most_common_route.value.end, "Z");
    }

    #[test]
    fn test_empty_view() {
        let set = RecordSet::new(City::Chicago, Schema::default(), vec![]);
        assert!(StationStats::from_view(&set.filter(Month::All, Day::All)).is_err());
    }
}
