//! Hand-written direction layout for routes whose GTFS direction data is not usable
//!
//! A [RouteTripSpec] gives each of the two directions of a route a headsign and an
//! ordered list of anchor stops. GTFS trips are assigned to the direction whose anchors
//! they visit most, in order, and the anchors break ties when stop lists are merged.

use crate::model::{Direction, Headsign};
use crate::Error;
use std::cmp::Ordering;

/// Minimum number of anchors a trip must visit to be classified
pub const MIN_MATCHED_ANCHORS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct TripDirection {
    pub direction: Direction,
    pub headsign: Headsign,
    /// Stop ids, as decimal strings of the derived stop id
    pub anchors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteTripSpec {
    pub route_id: i64,
    directions: [TripDirection; 2],
}

impl RouteTripSpec {
    pub fn new(
        route_id: i64,
        first: Direction,
        first_headsign: impl Into<Headsign>,
        second: Direction,
        second_headsign: impl Into<Headsign>,
    ) -> Self {
        let direction = |direction: Direction, headsign: Headsign| TripDirection {
            direction,
            headsign,
            anchors: Vec::new(),
        };
        Self {
            route_id,
            directions: [
                direction(first, first_headsign.into()),
                direction(second, second_headsign.into()),
            ],
        }
    }

    /// Appends anchors to one of the two directions; other directions are ignored
    pub fn add_trip_sort(mut self, direction: Direction, anchors: &[&str]) -> Self {
        if let Some(d) = self
            .directions
            .iter_mut()
            .find(|d| d.direction == direction)
        {
            d.anchors.extend(anchors.iter().map(|a| a.to_string()));
        }
        self
    }

    pub fn directions(&self) -> &[TripDirection] {
        &self.directions
    }

    pub fn direction(&self, direction: Direction) -> Option<&TripDirection> {
        self.directions.iter().find(|d| d.direction == direction)
    }

    /// Assigns a trip, given its ordered stop ids, to one of the two directions
    pub fn classify(&self, trip_id: &str, stop_ids: &[String]) -> Result<&TripDirection, Error> {
        let [first, second] = &self.directions;
        let first_count = matched_anchors(&first.anchors, stop_ids);
        let second_count = matched_anchors(&second.anchors, stop_ids);
        let unclassifiable = |reason: String| Error::UnclassifiableTrip {
            route_id: self.route_id,
            trip_id: trip_id.to_owned(),
            reason,
        };
        match first_count.cmp(&second_count) {
            Ordering::Equal if first_count >= MIN_MATCHED_ANCHORS => Err(unclassifiable(format!(
                "{} anchors matched in both directions",
                first_count
            ))),
            Ordering::Greater if first_count >= MIN_MATCHED_ANCHORS => Ok(first),
            Ordering::Less if second_count >= MIN_MATCHED_ANCHORS => Ok(second),
            _ => Err(unclassifiable(format!(
                "only {} anchors matched",
                first_count.max(second_count)
            ))),
        }
    }

    /// Order of two stops along a direction, when both are anchors of it
    pub fn compare(&self, direction: Direction, a: &str, b: &str) -> Option<Ordering> {
        let anchors = &self.direction(direction)?.anchors;
        let position = |stop_id: &str| anchors.iter().position(|anchor| anchor == stop_id);
        Some(position(a)?.cmp(&position(b)?))
    }
}

/// Greedy in-order matching: each anchor is looked for after the previous match
fn matched_anchors(anchors: &[String], stop_ids: &[String]) -> usize {
    let mut count = 0;
    let mut from = 0;
    for anchor in anchors {
        if let Some(position) = stop_ids[from..].iter().position(|s| s == anchor) {
            count += 1;
            from += position + 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> RouteTripSpec {
        RouteTripSpec::new(
            1,
            Direction::East,
            "University Ctr",
            Direction::West,
            "Edinburgh @ Laurelwood",
        )
        .add_trip_sort(Direction::East, &["112", "356", "5844", "5845"])
        .add_trip_sort(Direction::West, &["5845", "106", "112"])
    }

    fn stops(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classify_by_anchors() {
        let spec = spec();
        let east = spec
            .classify("t1", &stops(&["112", "113", "356", "5844", "5845"]))
            .unwrap();
        assert_eq!(Direction::East, east.direction);
        let west = spec
            .classify("t2", &stops(&["5845", "5846", "106", "112"]))
            .unwrap();
        assert_eq!(Direction::West, west.direction);
        assert_eq!(Headsign::from("Edinburgh @ Laurelwood"), west.headsign);
    }

    #[test]
    fn anchors_must_be_in_order() {
        // 112 then 5845 matches 2 East anchors, 5845 alone matches 1 West anchor
        let spec = spec();
        let d = spec.classify("t", &stops(&["112", "5845"])).unwrap();
        assert_eq!(Direction::East, d.direction);
    }

    #[test]
    fn unclassifiable_trips() {
        let spec = spec();
        assert!(matches!(
            spec.classify("t", &stops(&["1", "2", "3"])),
            Err(Error::UnclassifiableTrip { .. })
        ));
        assert!(spec.classify("t", &stops(&["356"])).is_err());
        // both directions share the same anchors
        let tie = RouteTripSpec::new(2, Direction::North, "A", Direction::South, "B")
            .add_trip_sort(Direction::North, &["1", "2"])
            .add_trip_sort(Direction::South, &["1", "2"]);
        assert!(tie.classify("t", &stops(&["1", "2"])).is_err());
    }

    #[test]
    fn compare_anchors() {
        let spec = spec();
        assert_eq!(
            Some(Ordering::Less),
            spec.compare(Direction::East, "112", "5844")
        );
        assert_eq!(
            Some(Ordering::Greater),
            spec.compare(Direction::West, "112", "106")
        );
        assert_eq!(None, spec.compare(Direction::East, "112", "999"));
        assert_eq!(None, spec.compare(Direction::North, "112", "5844"));
    }
}
