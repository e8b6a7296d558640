use crate::serde_helpers::*;
use chrono::{Datelike, NaiveDate, Weekday};
use rgb::RGB8;
use std::sync::Arc;

pub trait Id {
    fn id(&self) -> &str;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LocationType {
    #[default]
    StopPoint,
    StopArea,
    StationEntrance,
    GenericNode,
    BoardingArea,
}

impl<'de> ::serde::Deserialize<'de> for LocationType {
    fn deserialize<D>(deserializer: D) -> Result<LocationType, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        let i = Option::<u16>::deserialize(deserializer)?;
        Ok(match i {
            Some(1) => LocationType::StopArea,
            Some(2) => LocationType::StationEntrance,
            Some(3) => LocationType::GenericNode,
            Some(4) => LocationType::BoardingArea,
            _ => LocationType::StopPoint,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RouteType {
    Tramway,
    Subway,
    Rail,
    #[default]
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    /// Extended or invalid route types, kept so the route can still be excluded
    Other(u16),
}

impl<'de> ::serde::Deserialize<'de> for RouteType {
    fn deserialize<D>(deserializer: D) -> Result<RouteType, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        use RouteType::*;
        Ok(match u16::deserialize(deserializer)? {
            0 => Tramway,
            1 => Subway,
            2 => Rail,
            3 => Bus,
            4 => Ferry,
            5 => CableCar,
            6 => Gondola,
            7 => Funicular,
            other => Other(other),
        })
    }
}

/// `direction_id` of trips.txt
#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectionType {
    #[serde(rename = "0")]
    Outbound,
    #[serde(rename = "1")]
    Inbound,
}

impl DirectionType {
    pub fn as_int(self) -> i32 {
        match self {
            DirectionType::Outbound => 0,
            DirectionType::Inbound => 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Calendar {
    #[serde(rename = "service_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_bool")]
    pub monday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub tuesday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub wednesday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub thursday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub friday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub saturday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub sunday: bool,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}

impl Id for Calendar {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Calendar {
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Is the service running on this date, calendar_dates.txt exceptions aside
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date && self.valid_weekday(date)
    }
}

#[derive(Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Exception {
    #[serde(rename = "1")]
    Added,
    #[serde(rename = "2")]
    Deleted,
}

#[derive(Debug, Deserialize)]
pub struct CalendarDate {
    pub service_id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub exception_type: Exception,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Stop {
    #[serde(rename = "stop_id")]
    pub id: String,
    #[serde(rename = "stop_code")]
    pub code: Option<String>,
    #[serde(rename = "stop_name")]
    pub name: String,
    #[serde(default)]
    pub location_type: LocationType,
    pub parent_station: Option<String>,
    #[serde(deserialize_with = "de_with_optional_float")]
    #[serde(rename = "stop_lon", default)]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "de_with_optional_float")]
    #[serde(rename = "stop_lat", default)]
    pub latitude: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawStopTime {
    pub trip_id: String,
    #[serde(deserialize_with = "deserialize_optional_time", default)]
    pub arrival_time: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_time", default)]
    pub departure_time: Option<u32>,
    pub stop_id: String,
    pub stop_sequence: u16,
}

#[derive(Debug, Default)]
pub struct StopTime {
    pub arrival_time: Option<u32>,
    pub stop: Arc<Stop>,
    pub departure_time: Option<u32>,
    pub stop_sequence: u16,
}

impl StopTime {
    pub fn new(raw: &RawStopTime, stop: Arc<Stop>) -> Self {
        Self {
            arrival_time: raw.arrival_time,
            departure_time: raw.departure_time,
            stop,
            stop_sequence: raw.stop_sequence,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Route {
    #[serde(rename = "route_id")]
    pub id: String,
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
    pub route_type: RouteType,
    pub agency_id: Option<String>,
    #[serde(deserialize_with = "deserialize_option_color", default)]
    pub route_color: Option<RGB8>,
}

impl Id for Route {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTrip {
    #[serde(rename = "trip_id")]
    pub id: String,
    pub service_id: String,
    pub route_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub direction_id: Option<DirectionType>,
}

#[derive(Debug, Default)]
pub struct Trip {
    pub id: String,
    pub service_id: String,
    pub route_id: String,
    pub trip_headsign: Option<String>,
    pub direction_id: Option<DirectionType>,
    pub stop_times: Vec<StopTime>,
}

impl Id for Trip {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A trip without stop times yet
impl From<RawTrip> for Trip {
    fn from(raw: RawTrip) -> Self {
        Self {
            id: raw.id,
            service_id: raw.service_id,
            route_id: raw.route_id,
            trip_headsign: raw.trip_headsign,
            direction_id: raw.direction_id,
            stop_times: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Agency {
    #[serde(rename = "agency_id")]
    pub id: Option<String>,
    #[serde(rename = "agency_name")]
    pub name: String,
    #[serde(rename = "agency_url")]
    pub url: String,
    #[serde(rename = "agency_timezone")]
    pub timezone: String,
}

