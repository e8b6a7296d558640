use crate::clean::clean_label;
use crate::model::{Direction, Headsign};
use crate::objects::{Calendar, CalendarDate, Route, RouteType, Stop, Trip};
use crate::trip_spec::RouteTripSpec;
use crate::Error;
use rgb::RGB8;
use std::cmp::Ordering;

/// Agency specific behaviour of [crate::parser::generate]
///
/// Every method but [AgencyTools::agency_color] has a default that keeps the feed as is.
/// An agency only overrides what its feed gets wrong.
pub trait AgencyTools {
    /// When true, nothing is generated at all
    fn excluding_all(&self) -> bool {
        false
    }

    fn exclude_calendar(&self, _calendar: &Calendar) -> bool {
        false
    }

    fn exclude_calendar_date(&self, _calendar_date: &CalendarDate) -> bool {
        false
    }

    fn exclude_trip(&self, _trip: &Trip) -> bool {
        false
    }

    /// Routes of another mode than the agency's are dropped
    fn exclude_route(&self, route: &Route) -> bool {
        route.route_type != self.agency_route_type()
    }

    fn agency_route_type(&self) -> RouteType {
        RouteType::Bus
    }

    fn route_id(&self, route: &Route) -> Result<i64, Error> {
        route
            .id
            .trim()
            .parse()
            .map_err(|_| Error::UnmappableRouteId {
                short_name: route.short_name.clone(),
                gtfs_route_id: route.id.clone(),
            })
    }

    fn route_short_name(&self, route: &Route) -> String {
        route.short_name.trim().to_owned()
    }

    fn route_long_name(&self, route: &Route) -> Result<String, Error> {
        Ok(clean_label(&route.long_name))
    }

    fn agency_color(&self) -> Result<RGB8, Error>;

    /// Colour given by the feed, the agency colour otherwise
    fn route_color(&self, route: &Route) -> Result<RGB8, Error> {
        match route.route_color {
            Some(color) => Ok(color),
            None => self.agency_color(),
        }
    }

    fn stop_id(&self, stop: &Stop) -> Result<i32, Error> {
        stop.id.trim().parse().map_err(|_| Error::MalformedStop {
            stop_id: stop.id.clone(),
            stop_code: stop.code.clone(),
        })
    }

    fn clean_stop_name(&self, name: &str) -> String {
        clean_label(name)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        clean_label(headsign)
    }

    /// Headsign of a trip of a route without [RouteTripSpec]
    fn trip_headsign(&self, _route_id: i64, trip: &Trip) -> Option<Headsign> {
        let headsign = trip.trip_headsign.as_deref().unwrap_or_default();
        Some(Headsign::Text(self.clean_trip_headsign(headsign)))
    }

    /// When enabled, trips without `direction_id` get one headsign id per distinct headsign
    fn direction_finder_enabled(&self) -> bool {
        true
    }

    fn route_trip_spec(&self, _route_id: i64) -> Option<&RouteTripSpec> {
        None
    }

    /// Order of two stops of a logical trip, when the route's anchors know both
    fn compare_early(
        &self,
        route_id: i64,
        direction: Direction,
        a: i32,
        b: i32,
    ) -> Option<Ordering> {
        self.route_trip_spec(route_id)?
            .compare(direction, &a.to_string(), &b.to_string())
    }

    /// Label for two differing headsigns of the same logical trip
    fn merge_headsign(&self, route_id: i64, first: &str, second: &str) -> Result<String, Error> {
        Err(Error::UnexpectedHeadsignMerge {
            route_id,
            first: first.to_owned(),
            second: second.to_owned(),
        })
    }
}
