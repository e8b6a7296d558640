//! Walks a [Gtfs] feed through an [AgencyTools] implementation and builds the [MSpec]

use crate::agency_tools::AgencyTools;
use crate::model::{Direction, Headsign, MRoute, MSpec, MStop, MTrip, MTripStop};
use crate::objects::Trip;
use crate::trip_spec::RouteTripSpec;
use crate::{Error, Gtfs};
use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Allows to parameterize which part of the feed is generated
///
/// ```
///let mut config = guelph_transit_gtfs::ParserConfig::default();
///config
///    .reference_date(chrono::NaiveDate::from_ymd_opt(2019, 2, 1).unwrap())
///    .lookahead_days(7);
///assert_eq!(7, config.lookahead_days);
///assert!(!config.good_enough_accepted);
///```
#[derive(Derivative, Debug, Clone)]
#[derivative(Default)]
pub struct ParserConfig {
    /// First day of the generated schedule, today (UTC) when not set
    pub reference_date: Option<NaiveDate>,
    /// Services not running within this many days after the reference date are skipped
    #[derivative(Default(value = "30"))]
    pub lookahead_days: u16,
    /// Also maps the seasonal routes whose ids are only good enough
    pub good_enough_accepted: bool,
}

impl ParserConfig {
    pub fn reference_date(&mut self, date: NaiveDate) -> &mut Self {
        self.reference_date = Some(date);
        self
    }

    pub fn lookahead_days(&mut self, days: u16) -> &mut Self {
        self.lookahead_days = days;
        self
    }

    pub fn accept_good_enough(&mut self) -> &mut Self {
        self.good_enough_accepted = true;
        self
    }

    pub fn effective_reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Trips of a route sharing a headsign id, with the stop ids of each member trip
struct LogicalTrip {
    headsign: Headsign,
    headsign_id: i32,
    direction: Option<Direction>,
    stop_lists: Vec<Vec<i32>>,
}

/// Normalizes the whole feed
///
/// Routes are mapped first so that an id collision fails before any trip is looked at.
/// Routes left without any trip are not part of the result.
pub fn generate<T: AgencyTools + ?Sized>(gtfs: &Gtfs, tools: &T) -> Result<MSpec, Error> {
    if tools.excluding_all() {
        log::warn!("Every service is excluded, nothing to generate");
        return Ok(MSpec::default());
    }
    let routes = map_routes(gtfs, tools)?;
    let service_ids = kept_service_ids(gtfs, tools);
    let trips: Vec<&Trip> = gtfs
        .trips
        .values()
        .filter(|t| {
            routes.contains_key(t.route_id.as_str())
                && service_ids.contains(t.service_id.as_str())
                && !tools.exclude_trip(t)
        })
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .collect();
    log::info!("{} trips kept out of {}", trips.len(), gtfs.trips.len());

    let (stops, stop_ids) = map_stops(&trips, tools)?;
    let mut spec = MSpec {
        stops,
        ..Default::default()
    };
    let trips_by_route = trips
        .into_iter()
        .map(|t| (t.route_id.as_str(), t))
        .into_group_map();

    for (gtfs_route_id, route) in routes.into_iter().sorted_by_key(|(_, r)| r.id) {
        let route_trips = match trips_by_route.get(gtfs_route_id) {
            Some(route_trips) => route_trips,
            None => {
                log::debug!("Route {} has no trip left, skipped", route.id);
                continue;
            }
        };
        let logical_trips = match tools.route_trip_spec(route.id) {
            Some(route_spec) => split_by_spec(route_spec, route_trips, &stop_ids)?,
            None => split_by_headsign(route.id, route_trips, &stop_ids, tools)?,
        };
        for logical_trip in logical_trips {
            let direction = logical_trip.direction;
            let trip = MTrip {
                route_id: route.id,
                headsign: logical_trip.headsign,
                headsign_id: logical_trip.headsign_id,
            };
            let merged = logical_trip
                .stop_lists
                .into_iter()
                .sorted_by(|a, b| b.len().cmp(&a.len()))
                .fold(Vec::new(), |merged, stop_list| {
                    merge_stop_lists(&merged, &stop_list, |a, b| {
                        direction.and_then(|d| tools.compare_early(route.id, d, a, b))
                    })
                });
            let trip_id = trip.id();
            spec.trip_stops
                .extend(merged.into_iter().enumerate().map(|(i, stop_id)| MTripStop {
                    trip_id,
                    stop_id,
                    stop_sequence: i as u32 + 1,
                }));
            spec.trips.push(trip);
        }
        spec.routes.push(route);
    }

    spec.trips.sort_by_key(MTrip::id);
    spec.trip_stops.sort_by_key(|ts| (ts.trip_id, ts.stop_sequence));
    spec.print_stats();
    Ok(spec)
}

fn map_routes<'a, T: AgencyTools + ?Sized>(
    gtfs: &'a Gtfs,
    tools: &T,
) -> Result<HashMap<&'a str, MRoute>, Error> {
    let mut routes = HashMap::new();
    let mut gtfs_ids: HashMap<i64, &str> = HashMap::new();
    for route in gtfs.routes.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        if tools.exclude_route(route) {
            log::debug!("Route {} excluded", route.id);
            continue;
        }
        let id = tools.route_id(route)?;
        if let Some(first) = gtfs_ids.insert(id, &route.id) {
            return Err(Error::DuplicateRouteId {
                route_id: id,
                first: first.to_owned(),
                second: route.id.clone(),
            });
        }
        routes.insert(
            route.id.as_str(),
            MRoute {
                id,
                short_name: tools.route_short_name(route),
                long_name: tools.route_long_name(route)?,
                color: tools.route_color(route)?,
            },
        );
    }
    Ok(routes)
}

fn kept_service_ids<'a, T: AgencyTools + ?Sized>(gtfs: &'a Gtfs, tools: &T) -> HashSet<&'a str> {
    let calendars = gtfs
        .calendar
        .values()
        .filter(|c| !tools.exclude_calendar(c))
        .map(|c| c.id.as_str());
    let calendar_dates = gtfs
        .calendar_dates
        .values()
        .flatten()
        .filter(|cd| !tools.exclude_calendar_date(cd))
        .map(|cd| cd.service_id.as_str());
    calendars.chain(calendar_dates).collect()
}

/// Stops of the kept trips, and the derived id of every GTFS stop id
///
/// Two GTFS stops deriving the same id keep the first one met.
fn map_stops<'a, T: AgencyTools + ?Sized>(
    trips: &[&'a Trip],
    tools: &T,
) -> Result<(Vec<MStop>, HashMap<&'a str, i32>), Error> {
    let mut stop_ids: HashMap<&'a str, i32> = HashMap::new();
    let mut stops: BTreeMap<i32, MStop> = BTreeMap::new();
    for &trip in trips {
        for stop_time in &trip.stop_times {
            let stop = &*stop_time.stop;
            if stop_ids.contains_key(stop.id.as_str()) {
                continue;
            }
            let id = tools.stop_id(stop)?;
            stop_ids.insert(stop.id.as_str(), id);
            match stops.entry(id) {
                Entry::Occupied(first) => {
                    log::warn!(
                        "Stop {} ({}) has the same id {} as {}, ignored",
                        stop.id,
                        stop.name,
                        id,
                        first.get().name
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(MStop {
                        id,
                        code: stop.code.clone().unwrap_or_default(),
                        name: tools.clean_stop_name(&stop.name),
                        latitude: stop.latitude,
                        longitude: stop.longitude,
                    });
                }
            }
        }
    }
    Ok((stops.into_values().collect(), stop_ids))
}

fn trip_stop_ids(trip: &Trip, stop_ids: &HashMap<&str, i32>) -> Vec<i32> {
    trip.stop_times
        .iter()
        .filter_map(|st| stop_ids.get(st.stop.id.as_str()).copied())
        .collect()
}

fn split_by_spec(
    route_spec: &RouteTripSpec,
    trips: &[&Trip],
    stop_ids: &HashMap<&str, i32>,
) -> Result<Vec<LogicalTrip>, Error> {
    let mut logical_trips: BTreeMap<i32, LogicalTrip> = BTreeMap::new();
    for trip in trips {
        let stops = trip_stop_ids(trip, stop_ids);
        let anchors_to_match: Vec<String> = stops.iter().map(i32::to_string).collect();
        let trip_direction = route_spec.classify(&trip.id, &anchors_to_match)?;
        let headsign_id = trip_direction.direction.id();
        logical_trips
            .entry(headsign_id)
            .or_insert_with(|| LogicalTrip {
                headsign: trip_direction.headsign.clone(),
                headsign_id,
                direction: Some(trip_direction.direction),
                stop_lists: Vec::new(),
            })
            .stop_lists
            .push(stops);
    }
    Ok(logical_trips.into_values().collect())
}

fn split_by_headsign<T: AgencyTools + ?Sized>(
    route_id: i64,
    trips: &[&Trip],
    stop_ids: &HashMap<&str, i32>,
    tools: &T,
) -> Result<Vec<LogicalTrip>, Error> {
    let mut logical_trips: BTreeMap<i32, LogicalTrip> = BTreeMap::new();
    let mut found_headsigns: Vec<Headsign> = Vec::new();
    for trip in trips {
        let headsign = tools
            .trip_headsign(route_id, trip)
            .unwrap_or_else(|| Headsign::Text(String::new()));
        let headsign_id = match trip.direction_id {
            Some(direction) => direction.as_int(),
            None if tools.direction_finder_enabled() => {
                match found_headsigns.iter().position(|h| *h == headsign) {
                    Some(position) => position as i32,
                    None => {
                        found_headsigns.push(headsign.clone());
                        found_headsigns.len() as i32 - 1
                    }
                }
            }
            None => 0,
        };
        let stops = trip_stop_ids(trip, stop_ids);
        match logical_trips.entry(headsign_id) {
            Entry::Vacant(entry) => {
                entry.insert(LogicalTrip {
                    headsign,
                    headsign_id,
                    direction: None,
                    stop_lists: vec![stops],
                });
            }
            Entry::Occupied(mut entry) => {
                let logical_trip = entry.get_mut();
                if logical_trip.headsign != headsign {
                    let merged = tools.merge_headsign(
                        route_id,
                        logical_trip.headsign.value(),
                        headsign.value(),
                    )?;
                    logical_trip.headsign = Headsign::Text(merged);
                }
                logical_trip.stop_lists.push(stops);
            }
        }
    }
    Ok(logical_trips.into_values().collect())
}

/// Merges two ordered stop lists into one list visiting every stop once
///
/// Common stops keep both lists in sync. When neither of the two current stops appears
/// further in the other list, `compare` decides; without an answer the existing list goes first.
pub fn merge_stop_lists<F>(existing: &[i32], incoming: &[i32], compare: F) -> Vec<i32>
where
    F: Fn(i32, i32) -> Option<Ordering>,
{
    let mut merged = Vec::with_capacity(existing.len().max(incoming.len()));
    let mut seen = HashSet::new();
    let (mut i, mut j) = (0, 0);
    while i < existing.len() && j < incoming.len() {
        let (a, b) = (existing[i], incoming[j]);
        if seen.contains(&a) {
            i += 1;
            continue;
        }
        if seen.contains(&b) {
            j += 1;
            continue;
        }
        let next = if a == b {
            i += 1;
            j += 1;
            a
        } else {
            let a_later_in_incoming = incoming[j..].contains(&a);
            let b_later_in_existing = existing[i..].contains(&b);
            match (a_later_in_incoming, b_later_in_existing) {
                (false, true) => {
                    i += 1;
                    a
                }
                (true, false) => {
                    j += 1;
                    b
                }
                _ if compare(a, b) == Some(Ordering::Greater) => {
                    j += 1;
                    b
                }
                _ => {
                    i += 1;
                    a
                }
            }
        };
        seen.insert(next);
        merged.push(next);
    }
    for &stop_id in existing[i..].iter().chain(&incoming[j..]) {
        if seen.insert(stop_id) {
            merged.push(stop_id);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guelph::GuelphTransit;
    use crate::objects::{Calendar, Route, Stop, StopTime};
    use std::sync::Arc;

    fn feed(routes: &[(&str, &str)]) -> Gtfs {
        let mut gtfs = Gtfs::default();
        gtfs.calendar.insert(
            "weekday".to_owned(),
            Calendar {
                id: "weekday".to_owned(),
                monday: true,
                tuesday: true,
                wednesday: true,
                thursday: true,
                friday: true,
                saturday: false,
                sunday: false,
                start_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
            },
        );
        for (id, short_name) in routes {
            let route = Route {
                id: id.to_string(),
                short_name: short_name.to_string(),
                long_name: "Gordon".to_owned(),
                ..Default::default()
            };
            gtfs.routes.insert(route.id.clone(), route);
        }
        gtfs
    }

    /// Stops named only by digits get them as stop code
    fn add_trip(gtfs: &mut Gtfs, id: &str, route_id: &str, headsign: &str, stops: &[&str]) {
        let stop_times = stops
            .iter()
            .enumerate()
            .map(|(i, stop_id)| StopTime {
                stop: Arc::new(Stop {
                    id: stop_id.to_string(),
                    code: Some(stop_id.to_string())
                        .filter(|code| code.chars().all(|c| c.is_ascii_digit())),
                    name: "Guelph Central Station".to_owned(),
                    ..Default::default()
                }),
                stop_sequence: i as u16 + 1,
                ..Default::default()
            })
            .collect();
        let trip = Trip {
            id: id.to_owned(),
            service_id: "weekday".to_owned(),
            route_id: route_id.to_owned(),
            trip_headsign: Some(headsign.to_owned()),
            direction_id: None,
            stop_times,
        };
        gtfs.trips.insert(trip.id.clone(), trip);
    }

    fn generate_feed(gtfs: &Gtfs) -> Result<MSpec, Error> {
        let mut config = ParserConfig::default();
        config.reference_date(NaiveDate::from_ymd_opt(2019, 2, 1).unwrap());
        generate(gtfs, &GuelphTransit::new(gtfs, &config))
    }

    #[test]
    fn duplicate_route_ids() {
        let gtfs = feed(&[("r1", "1"), ("r01", "01")]);
        match generate_feed(&gtfs) {
            Err(Error::DuplicateRouteId {
                route_id,
                first,
                second,
            }) => {
                assert_eq!(1, route_id);
                assert_eq!("r01", first);
                assert_eq!("r1", second);
            }
            other => panic!("unexpected result {:?}", other.map(|s| s.routes)),
        }
    }

    #[test]
    fn unlisted_headsign_merge() {
        let mut gtfs = feed(&[("r99", "99")]);
        add_trip(&mut gtfs, "t1", "r99", "Foo", &["5850", "6047"]);
        add_trip(&mut gtfs, "t2", "r99", "Bar", &["6047", "5850"]);
        assert!(matches!(
            generate_feed(&gtfs),
            Err(Error::UnexpectedHeadsignMerge { route_id: 99, .. })
        ));
    }

    #[test]
    fn malformed_stop() {
        let mut gtfs = feed(&[("r99", "99")]);
        add_trip(&mut gtfs, "t1", "r99", "North", &["5850", "Downtown"]);
        assert!(matches!(
            generate_feed(&gtfs),
            Err(Error::MalformedStop { stop_code: None, .. })
        ));
    }

    /// Default rules, plus a route 7 split between a compass label and a text headsign
    struct CompassLoop(RouteTripSpec);

    impl AgencyTools for CompassLoop {
        fn agency_color(&self) -> Result<rgb::RGB8, Error> {
            Ok(rgb::RGB8::new(0, 0x55, 0xA5))
        }

        fn route_trip_spec(&self, route_id: i64) -> Option<&RouteTripSpec> {
            Some(&self.0).filter(|spec| spec.route_id == route_id)
        }
    }

    #[test]
    fn compass_headsigns() {
        let mut gtfs = feed(&[("7", "7")]);
        add_trip(&mut gtfs, "t1", "7", "Loop", &["10", "20", "30"]);
        add_trip(&mut gtfs, "t2", "7", "Loop", &["30", "20", "10"]);
        let north = Direction::North;
        let loop_spec = RouteTripSpec::new(7, north, north, Direction::South, "Downtown")
            .add_trip_sort(Direction::North, &["10", "30"])
            .add_trip_sort(Direction::South, &["30", "10"]);
        let spec = generate(&gtfs, &CompassLoop(loop_spec)).unwrap();

        assert_eq!(Headsign::Direction(Direction::North), spec.trips[0].headsign);
        let mut buffer = Vec::new();
        crate::output::write_trips(&spec.trips, &mut buffer).unwrap();
        assert_eq!(
            "704,7,1,North,4\n705,7,0,Downtown,5\n",
            String::from_utf8(buffer).unwrap()
        );
    }

    #[test]
    fn unclassifiable_trip() {
        let mut gtfs = feed(&[("r1", "1")]);
        add_trip(&mut gtfs, "t1", "r1", "Gordon", &["5850", "6047"]);
        assert!(matches!(
            generate_feed(&gtfs),
            Err(Error::UnclassifiableTrip { route_id: 1, .. })
        ));
    }

    #[test]
    fn merge_common_stops() {
        let merged = merge_stop_lists(&[1, 2, 3], &[1, 4, 3], |_, _| None);
        assert_eq!(vec![1, 2, 4, 3], merged);
        assert_eq!(vec![1, 2, 3], merge_stop_lists(&[], &[1, 2, 3], |_, _| None));
        assert_eq!(vec![1, 2, 3], merge_stop_lists(&[1, 2, 3], &[2, 3], |_, _| None));
    }

    #[test]
    fn merge_tie_break() {
        let merged = merge_stop_lists(&[1, 2, 5], &[1, 3, 5], |a, b| {
            if (a, b) == (2, 3) {
                Some(Ordering::Greater)
            } else {
                None
            }
        });
        assert_eq!(vec![1, 3, 2, 5], merged);
        let merged = merge_stop_lists(&[1, 2, 5], &[1, 3, 5], |_, _| None);
        assert_eq!(vec![1, 2, 3, 5], merged);
    }

    #[test]
    fn merge_never_repeats_a_stop() {
        let merged = merge_stop_lists(&[1, 2, 1, 3], &[3, 2], |_, _| None);
        let unique: HashSet<_> = merged.iter().collect();
        assert_eq!(unique.len(), merged.len());
        assert_eq!(3, merged.len());
    }

    #[test]
    fn config_defaults() {
        let config = ParserConfig::default();
        assert_eq!(30, config.lookahead_days);
        assert!(config.reference_date.is_none());
        assert!(!config.good_enough_accepted);
    }
}
