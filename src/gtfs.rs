use crate::{objects::*, Error, RawGtfs};
use chrono::prelude::NaiveDate;
use chrono::Duration;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Data structure with all the GTFS objects
///
/// This structure is easier to use than the [RawGtfs] structure: objects are indexed
/// by their identifier and trips own their ordered stop times.
#[derive(Default)]
pub struct Gtfs {
    pub read_duration: i64,
    pub calendar: HashMap<String, Calendar>,
    pub calendar_dates: HashMap<String, Vec<CalendarDate>>,
    pub stops: HashMap<String, Arc<Stop>>,
    pub routes: HashMap<String, Route>,
    pub trips: HashMap<String, Trip>,
    pub agencies: Vec<Agency>,
    pub sha256: Option<String>,
}

impl TryFrom<RawGtfs> for Gtfs {
    type Error = Error;

    fn try_from(raw: RawGtfs) -> Result<Gtfs, Error> {
        let stops: HashMap<String, Arc<Stop>> = raw
            .stops?
            .into_iter()
            .map(|s| (s.id.clone(), Arc::new(s)))
            .collect();
        let trips = create_trips(raw.trips?, raw.stop_times?, &stops)?;

        Ok(Gtfs {
            stops,
            routes: to_map(raw.routes?),
            trips,
            agencies: raw.agencies?,
            calendar: to_map(raw.calendar.unwrap_or_else(|| Ok(Vec::new()))?),
            calendar_dates: raw
                .calendar_dates
                .unwrap_or_else(|| Ok(Vec::new()))?
                .into_iter()
                .map(|cd| (cd.service_id.clone(), cd))
                .into_group_map(),
            read_duration: raw.read_duration,
            sha256: raw.sha256,
        })
    }
}

impl Gtfs {
    pub fn print_stats(&self) {
        log::info!("GTFS data:");
        log::info!("  Read in {} ms", self.read_duration);
        log::info!("  Stops: {}", self.stops.len());
        log::info!("  Routes: {}", self.routes.len());
        log::info!("  Trips: {}", self.trips.len());
        log::info!("  Agencies: {}", self.agencies.len());
        log::info!("  Calendars: {}", self.calendar.len());
        if let Some(sha256) = &self.sha256 {
            log::info!("  sha256: {}", sha256);
        }
    }

    /// Reads from an url (if starts with http), or a local path (either a directory or zipped file)
    /// To read from an url, build with read-url feature
    pub fn new(gtfs: &str) -> Result<Gtfs, Error> {
        RawGtfs::new(gtfs).and_then(Gtfs::try_from)
    }

    /// Reads the GTFS from a local zip archive or local directory
    pub fn from_path<P>(path: P) -> Result<Gtfs, Error>
    where
        P: AsRef<std::path::Path>,
    {
        RawGtfs::from_path(path).and_then(Gtfs::try_from)
    }

    pub fn from_reader<T: std::io::Read + std::io::Seek>(reader: T) -> Result<Gtfs, Error> {
        RawGtfs::from_reader(reader).and_then(Gtfs::try_from)
    }

    /// Days, as offsets from `start_date`, on which the service runs.
    ///
    /// Offsets before `start_date` are never returned. Days added by calendar_dates.txt
    /// come first, in file order, followed by the calendar days.
    pub fn trip_days(&self, service_id: &str, start_date: NaiveDate) -> Vec<u16> {
        let offset = |date: NaiveDate| date.signed_duration_since(start_date).num_days();
        let exceptions = self.calendar_dates.get(service_id).map_or(&[][..], Vec::as_slice);
        let removed: HashSet<i64> = exceptions
            .iter()
            .filter(|cd| cd.exception_type == Exception::Deleted)
            .map(|cd| offset(cd.date))
            .collect();
        let added = exceptions
            .iter()
            .filter(|cd| cd.exception_type == Exception::Added)
            .map(|cd| offset(cd.date))
            .filter(|days| *days >= 0);
        let regular = self
            .calendar
            .get(service_id)
            .into_iter()
            .flat_map(|calendar| {
                (0..=offset(calendar.end_date))
                    .filter(move |days| calendar.runs_on(start_date + Duration::days(*days)))
            })
            .filter(|days| !removed.contains(days));
        added
            .chain(regular)
            .filter_map(|days| u16::try_from(days).ok())
            .collect()
    }

    /// Every service id known to calendar.txt or calendar_dates.txt
    pub fn service_ids(&self) -> HashSet<&str> {
        self.calendar
            .keys()
            .chain(self.calendar_dates.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn get_stop<'a>(&'a self, id: &str) -> Result<&'a Stop, Error> {
        lookup(&self.stops, id).map(|stop| &**stop)
    }

    pub fn get_trip<'a>(&'a self, id: &str) -> Result<&'a Trip, Error> {
        lookup(&self.trips, id)
    }

    pub fn get_route<'a>(&'a self, id: &str) -> Result<&'a Route, Error> {
        lookup(&self.routes, id)
    }

    pub fn get_calendar<'a>(&'a self, id: &str) -> Result<&'a Calendar, Error> {
        lookup(&self.calendar, id)
    }
}

fn lookup<'a, O>(objects: &'a HashMap<String, O>, id: &str) -> Result<&'a O, Error> {
    objects
        .get(id)
        .ok_or_else(|| Error::ReferenceError(id.to_owned()))
}

fn to_map<O: Id>(objects: impl IntoIterator<Item = O>) -> HashMap<String, O> {
    objects
        .into_iter()
        .map(|o| (o.id().to_owned(), o))
        .collect()
}

/// Links the stop times to their trip, ordered by `stop_sequence`
fn create_trips(
    raw_trips: Vec<RawTrip>,
    raw_stop_times: Vec<RawStopTime>,
    stops: &HashMap<String, Arc<Stop>>,
) -> Result<HashMap<String, Trip>, Error> {
    let mut trips = to_map(raw_trips.into_iter().map(Trip::from));
    for stop_time in raw_stop_times {
        let stop = lookup(stops, &stop_time.stop_id)?;
        let stop_time_of_trip = StopTime::new(&stop_time, Arc::clone(stop));
        trips
            .get_mut(&stop_time.trip_id)
            .ok_or_else(|| Error::ReferenceError(stop_time.trip_id.clone()))?
            .stop_times
            .push(stop_time_of_trip);
    }
    for trip in trips.values_mut() {
        trip.stop_times.sort_by_key(|st| st.stop_sequence);
    }
    Ok(trips)
}
