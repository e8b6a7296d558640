//! Normalized objects produced from the feed and written by [crate::output]

use rgb::RGB8;
use std::fmt;

/// Compass direction of a trip, used by the routes whose directions are given by hand
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// Headsign id of the direction, distinct from the 0/1 GTFS `direction_id`
    pub fn id(self) -> i32 {
        match self {
            Direction::East => 2,
            Direction::West => 3,
            Direction::North => 4,
            Direction::South => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::East => "East",
            Direction::West => "West",
            Direction::North => "North",
            Direction::South => "South",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a rider reads on the front of the bus
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Headsign {
    Text(String),
    /// Compass label of a [crate::RouteTripSpec] direction declared without a text headsign
    Direction(Direction),
}

impl Headsign {
    /// Kind column of the trips table: 0 for free text, 1 for a compass direction
    pub fn kind(&self) -> u8 {
        match self {
            Headsign::Text(_) => 0,
            Headsign::Direction(_) => 1,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Headsign::Text(text) => text,
            Headsign::Direction(direction) => direction.label(),
        }
    }
}

impl From<&str> for Headsign {
    fn from(text: &str) -> Self {
        Headsign::Text(text.to_owned())
    }
}

impl From<Direction> for Headsign {
    fn from(direction: Direction) -> Self {
        Headsign::Direction(direction)
    }
}

impl fmt::Display for Headsign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MRoute {
    pub id: i64,
    pub short_name: String,
    pub long_name: String,
    pub color: RGB8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MStop {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A logical trip: every GTFS trip of a route sharing the same headsign id
#[derive(Debug, Clone, PartialEq)]
pub struct MTrip {
    pub route_id: i64,
    pub headsign: Headsign,
    pub headsign_id: i32,
}

impl MTrip {
    pub fn id(&self) -> i64 {
        self.route_id * 100 + i64::from(self.headsign_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MTripStop {
    pub trip_id: i64,
    pub stop_id: i32,
    /// 1-based position of the stop in the merged stop list
    pub stop_sequence: u32,
}

/// Everything generated for one feed, sorted by id
#[derive(Debug, Default)]
pub struct MSpec {
    pub routes: Vec<MRoute>,
    pub trips: Vec<MTrip>,
    pub stops: Vec<MStop>,
    pub trip_stops: Vec<MTripStop>,
}

impl MSpec {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.trips.is_empty() && self.stops.is_empty()
    }

    pub fn get_route(&self, id: i64) -> Option<&MRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn get_stop(&self, id: i32) -> Option<&MStop> {
        self.stops.iter().find(|s| s.id == id)
    }

    /// Stop ids of a logical trip, in stop sequence order
    pub fn trip_stop_ids(&self, trip_id: i64) -> Vec<i32> {
        self.trip_stops
            .iter()
            .filter(|ts| ts.trip_id == trip_id)
            .map(|ts| ts.stop_id)
            .collect()
    }

    pub fn print_stats(&self) {
        log::info!("Generated data:");
        log::info!("  Routes: {}", self.routes.len());
        log::info!("  Trips: {}", self.trips.len());
        log::info!("  Stops: {}", self.stops.len());
        log::info!("  Trip stops: {}", self.trip_stops.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_ids() {
        let trip = MTrip {
            route_id: 21050,
            headsign: Direction::East.into(),
            headsign_id: Direction::East.id(),
        };
        assert_eq!(2105002, trip.id());
        assert_eq!("East", trip.headsign.value());
        assert_eq!(1, trip.headsign.kind());
        assert_eq!(0, Headsign::from("University Ctr").kind());
    }
}
