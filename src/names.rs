//! Guelph specific cleaning pipelines for route long names, trip headsigns and stop names
//!
//! A pipeline is an ordered list of `&str -> String` steps. A step can expose text an
//! earlier step removes (a route number behind a bound word), so the whole pipeline is
//! run again over its own output until the text stops changing.

use crate::clean::*;
use crate::ids::{route_number, COMMUNITY_BUS_RSN, GORDON_CORRIDOR_RSN};
use crate::objects::Route;
use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;

pub const INDUSTRIAL_SHORT: &str = "Ind";

type Step = fn(&str) -> String;

lazy_static! {
    static ref STARTS_WITH_ROUTE: Regex = Regex::new(r"(?i)^route\s*\d*[a-z]*\s*-?\s*").unwrap();
    static ref STARTS_WITH_ROUTE_NUMBER: Regex = Regex::new(r"^\s*(\d+\s+)+").unwrap();
    static ref BOUND_WORDS: Regex = Regex::new(r"(?i)\b(north|south|east|west)bound\b").unwrap();
    static ref INDUSTRIAL: Regex = clean_words(&["industrial"]);
    static ref COMMUNITY_BUS: Regex = Regex::new(r"(?i)^community\s+bus\b[\s:\-]*").unwrap();
    static ref DEPART_ARRIVE: Regex = Regex::new(r"(?i)(\s+(arrival|depart))+[\s.,\-]*$").unwrap();
    static ref PLATFORM: Regex = clean_words(&["platform"]);
}

const ROUTE_LONG_NAME_STEPS: &[Step] = &[strip_route_prefix, clean_label];

const TRIP_HEADSIGN_STEPS: &[Step] = &[
    keep_to_and_remove_via,
    clean_at,
    drop_bound_words,
    shorten_industrial,
    strip_community_bus,
    strip_route_number_echo,
    clean_numbers,
    clean_street_types,
    clean_label,
];

const STOP_NAME_STEPS: &[Step] = &[
    clean_at,
    drop_depart_arrive,
    shorten_platform,
    clean_bounds,
    remove_points,
    clean_street_types,
    clean_numbers,
    clean_label,
];

/// Long names used when the feed leaves a route without one, by route number
const LONG_NAMES: [(i64, &str); 28] = [
    (1, "College Edinburgh"),
    (2, "West Loop"),
    (3, "East Loop"),
    (4, "York"),
    (5, "Gordon"),
    (6, "Harvard Ironwood"),
    (7, "Kortright Downey"),
    (8, "Stone Road Mall"),
    (9, "Waterloo"),
    (10, "Imperial"),
    (11, "Willow West"),
    (12, "General Hospital"),
    (13, "Victoria Road Recreation Centre"),
    (14, "Grange"),
    (15, "University College"),
    (16, "Southgate"),
    (17, "Woodlawn Watson"),
    (18, "Watson Woodlawn"),
    (20, "Northwest Industrial"),
    (40, "Northwest Industrial"),
    (41, "Hanlon Industrial"),
    (50, "Stone Road Express"),
    (51, "Colonial Drive"),
    (52, "Kortright Downey"),
    (56, "Victoria Express"),
    (57, "Harvard Express"),
    (58, "Edinburgh Express"),
    (99, "Mainline"),
];

const MAX_PASSES: usize = 4;

fn run(steps: &[Step], s: &str) -> String {
    let mut text = s.to_owned();
    for _ in 0..MAX_PASSES {
        let next = steps.iter().fold(text.clone(), |acc, step| step(&acc));
        if next == text {
            break;
        }
        text = next;
    }
    text
}

fn strip_route_prefix(s: &str) -> String {
    STARTS_WITH_ROUTE.replace(s, "").into_owned()
}

fn strip_route_number_echo(s: &str) -> String {
    STARTS_WITH_ROUTE_NUMBER.replace(s, "").into_owned()
}

fn drop_bound_words(s: &str) -> String {
    BOUND_WORDS.replace_all(s, "").into_owned()
}

fn shorten_industrial(s: &str) -> String {
    INDUSTRIAL.replace_all(s, INDUSTRIAL_SHORT).into_owned()
}

fn strip_community_bus(s: &str) -> String {
    COMMUNITY_BUS.replace(s, "").into_owned()
}

fn drop_depart_arrive(s: &str) -> String {
    DEPART_ARRIVE.replace(s, "").into_owned()
}

fn shorten_platform(s: &str) -> String {
    PLATFORM.replace_all(s, "P").into_owned()
}

pub fn clean_trip_headsign(headsign: &str) -> String {
    run(TRIP_HEADSIGN_STEPS, headsign)
}

pub fn clean_stop_name(name: &str) -> String {
    run(STOP_NAME_STEPS, name)
}

/// Cleaned long name of a route, falling back on the known names when the feed has none
pub fn route_long_name(route: &Route) -> Result<String, Error> {
    let cleaned = run(ROUTE_LONG_NAME_STEPS, &route.long_name);
    if !cleaned.is_empty() {
        return Ok(cleaned);
    }
    fallback_long_name(&route.short_name)
        .map(|name| run(ROUTE_LONG_NAME_STEPS, name))
        .ok_or_else(|| Error::UnmappableLongName {
            short_name: route.short_name.clone(),
            long_name: route.long_name.clone(),
        })
}

fn fallback_long_name(short_name: &str) -> Option<&'static str> {
    match short_name {
        COMMUNITY_BUS_RSN => Some("Community Bus"),
        GORDON_CORRIDOR_RSN => Some("Gordon Corridor"),
        _ => {
            let number = route_number(short_name)?;
            LONG_NAMES
                .iter()
                .find(|(n, _)| *n == number)
                .map(|(_, name)| *name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(short_name: &str, long_name: &str) -> Route {
        Route {
            id: "1".to_owned(),
            short_name: short_name.to_owned(),
            long_name: long_name.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn long_names() {
        assert_eq!(
            "Edinburgh Clockwise",
            route_long_name(&route("1A", "Route 1A - Edinburgh Clockwise")).unwrap()
        );
        assert_eq!(
            "Stone Road Mall",
            route_long_name(&route("8", "Stone Road Mall")).unwrap()
        );
        assert_eq!("Mainline", route_long_name(&route("99", "")).unwrap());
        assert_eq!("Gordon", route_long_name(&route("5", "Route 5")).unwrap());
        assert_eq!("Community Bus", route_long_name(&route("Com", "")).unwrap());
        assert!(matches!(
            route_long_name(&route("77", " ")),
            Err(Error::UnmappableLongName { .. })
        ));
    }

    #[test]
    fn trip_headsigns() {
        assert_eq!("Stone Rd Mall", clean_trip_headsign("8 Stone Road Mall"));
        assert_eq!(
            "Northwest Ind",
            clean_trip_headsign("Downtown to Northwest Industrial via Woodlawn")
        );
        assert_eq!("Gordon @ Vaughan", clean_trip_headsign("Gordon at Vaughan southbound"));
        assert_eq!("Stone Rd Mall", clean_trip_headsign("Community Bus - Stone Road Mall"));
        assert_eq!("Stone Rd Mall", clean_trip_headsign("Westbound 8 Stone Road Mall"));
        assert_eq!("", clean_trip_headsign(""));
    }

    #[test]
    fn stop_names() {
        assert_eq!(
            "Guelph Central Sta P 21",
            clean_stop_name("Guelph Central Station Platform 21")
        );
        assert_eq!(
            "Victoria Rd South @ Macalister Blvd SB",
            clean_stop_name("Victoria Road South at Macalister Boulevard southbound")
        );
        assert_eq!("University Ctr P 3", clean_stop_name("University Centre Platform 3 Depart"));
        assert_eq!("Gordon St @ Arkell Rd", clean_stop_name("Gordon St. & Arkell Road"));
        assert_eq!("University Ctr", clean_stop_name("University Centre Depart."));
        assert_eq!("Gordon", clean_stop_name("Gordon Depart -"));
    }

    #[test]
    fn pipelines_are_idempotent() {
        let samples = [
            "Guelph Central Station Platform 21",
            "Victoria Road South at Macalister Boulevard southbound",
            "University Centre Platform 3 arrival arrival",
            "10 20 Downtown to Northwest Industrial via Woodlawn",
            "Gordon St. & Arkell Road",
            "Route 1A - Edinburgh Clockwise",
            "  first   street  ",
            "Westbound 8 Stone Road Mall",
            "Community Bus - 8 Stone Road Mall",
            "University Centre Depart.",
            "Gordon Depart -",
            "Stone Road Mall arrival, ",
        ];
        for sample in samples {
            let stop_name = clean_stop_name(sample);
            assert_eq!(stop_name, clean_stop_name(&stop_name), "{}", sample);
            let headsign = clean_trip_headsign(sample);
            assert_eq!(headsign, clean_trip_headsign(&headsign), "{}", sample);
        }
    }
}
