//! Rules of the Guelph Transit feed

use crate::agency_tools::AgencyTools;
use crate::model::Headsign;
use crate::objects::{Calendar, CalendarDate, Route, Stop, Trip};
use crate::parser::ParserConfig;
use crate::trip_spec::RouteTripSpec;
use crate::{colors, headsign, ids, names, route_trips, service, Error, Gtfs};
use rgb::RGB8;
use std::collections::HashSet;

pub struct GuelphTransit {
    good_enough_accepted: bool,
    service_ids: HashSet<String>,
}

impl GuelphTransit {
    /// Computes the services worth generating once, before the feed is walked
    pub fn new(gtfs: &Gtfs, config: &ParserConfig) -> Self {
        let service_ids = service::useful_service_ids(
            gtfs,
            config.effective_reference_date(),
            config.lookahead_days,
        );
        Self {
            good_enough_accepted: config.good_enough_accepted,
            service_ids,
        }
    }

    fn is_useful(&self, service_id: &str) -> bool {
        self.service_ids.contains(service_id)
    }
}

impl AgencyTools for GuelphTransit {
    fn excluding_all(&self) -> bool {
        self.service_ids.is_empty()
    }

    fn exclude_calendar(&self, calendar: &Calendar) -> bool {
        !self.is_useful(&calendar.id)
    }

    fn exclude_calendar_date(&self, calendar_date: &CalendarDate) -> bool {
        !self.is_useful(&calendar_date.service_id)
    }

    fn exclude_trip(&self, trip: &Trip) -> bool {
        !self.is_useful(&trip.service_id)
    }

    fn route_id(&self, route: &Route) -> Result<i64, Error> {
        ids::route_id(route, self.good_enough_accepted)
    }

    fn route_short_name(&self, route: &Route) -> String {
        route.short_name.split_whitespace().collect()
    }

    fn route_long_name(&self, route: &Route) -> Result<String, Error> {
        names::route_long_name(route)
    }

    fn agency_color(&self) -> Result<RGB8, Error> {
        colors::agency_color()
    }

    /// The colour of the feed is ignored, the agency's own table is more accurate
    fn route_color(&self, route: &Route) -> Result<RGB8, Error> {
        colors::route_color(&route.short_name)
    }

    fn stop_id(&self, stop: &Stop) -> Result<i32, Error> {
        ids::stop_id(stop)
    }

    fn clean_stop_name(&self, name: &str) -> String {
        names::clean_stop_name(name)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        names::clean_trip_headsign(headsign)
    }

    /// `None` for routes split by their [RouteTripSpec]
    ///
    /// Loop and bound headsigns collapse to a plain compass point.
    fn trip_headsign(&self, route_id: i64, trip: &Trip) -> Option<Headsign> {
        if route_trips::route_trip_spec(route_id).is_some() {
            return None;
        }
        let raw = trip.trip_headsign.as_deref().unwrap_or_default();
        let lower = raw.to_lowercase();
        let text = if lower.contains("northbound") || lower.contains("north loop") {
            "North".to_owned()
        } else if lower.contains("southbound") || lower.contains("south loop") {
            "South".to_owned()
        } else {
            self.clean_trip_headsign(raw)
        };
        Some(Headsign::Text(text))
    }

    fn direction_finder_enabled(&self) -> bool {
        false
    }

    fn route_trip_spec(&self, route_id: i64) -> Option<&RouteTripSpec> {
        route_trips::route_trip_spec(route_id)
    }

    fn merge_headsign(&self, route_id: i64, first: &str, second: &str) -> Result<String, Error> {
        headsign::merge_headsign(route_id, first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;
    use std::cmp::Ordering;

    fn tools() -> GuelphTransit {
        GuelphTransit {
            good_enough_accepted: false,
            service_ids: ["weekday".to_owned()].into_iter().collect(),
        }
    }

    fn trip(headsign: &str) -> Trip {
        Trip {
            id: "t".to_owned(),
            service_id: "weekday".to_owned(),
            route_id: "99".to_owned(),
            trip_headsign: Some(headsign.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn loop_headsigns() {
        let tools = tools();
        assert_eq!(
            Some(Headsign::Text("North".to_owned())),
            tools.trip_headsign(99, &trip("99 Mainline Northbound"))
        );
        assert_eq!(
            Some(Headsign::Text("South".to_owned())),
            tools.trip_headsign(99, &trip("South Loop"))
        );
        assert_eq!(
            Some(Headsign::Text("Stone Rd Mall".to_owned())),
            tools.trip_headsign(8888, &trip("8 Stone Road Mall"))
        );
        assert_eq!(None, tools.trip_headsign(1, &trip("anything")));
    }

    #[test]
    fn service_exclusions() {
        let tools = tools();
        assert!(!tools.excluding_all());
        assert!(!tools.exclude_trip(&trip("x")));
        let mut other = trip("x");
        other.service_id = "sunday".to_owned();
        assert!(tools.exclude_trip(&other));
        let empty = GuelphTransit {
            good_enough_accepted: false,
            service_ids: HashSet::new(),
        };
        assert!(empty.excluding_all());
    }

    #[test]
    fn compare_early_uses_anchors() {
        let tools = tools();
        assert_eq!(
            Some(Ordering::Less),
            tools.compare_early(1, Direction::East, 112, 5845)
        );
        assert_eq!(None, tools.compare_early(99, Direction::East, 112, 5845));
    }

    #[test]
    fn route_rules() {
        let tools = tools();
        let route = Route {
            id: "r50".to_owned(),
            short_name: "50U".to_owned(),
            long_name: "".to_owned(),
            route_color: Some(RGB8::new(0, 0, 0)),
            ..Default::default()
        };
        assert_eq!(21050, tools.route_id(&route).unwrap());
        let spaced = Route {
            short_name: " 50 U ".to_owned(),
            ..Default::default()
        };
        assert_eq!("50U", tools.route_short_name(&spaced));
        assert_eq!("Stone Road Express", tools.route_long_name(&route).unwrap());
        assert_eq!(RGB8::new(0xA5, 0x46, 0x86), tools.route_color(&route).unwrap());
        assert!(!tools.exclude_route(&route));
    }
}
