//! Stable integer identifiers derived from the agency's route short names and stop ids

use crate::objects::{Route, Stop};
use crate::Error;

pub const COMMUNITY_BUS_RSN: &str = "Com";
pub const COMMUNITY_BUS_RID: i64 = 9_998;
pub const GORDON_CORRIDOR_RSN: &str = "GC";
pub const GORDON_CORRIDOR_RID: i64 = 9_999;

/// Offsets added to the route number, keyed by the trailing letter of the short name
pub const RID_ENDS_WITH_A: i64 = 1_000;
pub const RID_ENDS_WITH_B: i64 = 2_000;
pub const RID_ENDS_WITH_U: i64 = 21_000;

/// Largest route id whose trip ids (`route_id * 100 + headsign_id`) still fit an `i64`
pub const MAX_ROUTE_ID: i64 = i64::MAX / 100;

/// Short name prefixes of seasonal services only mapped in good enough mode
pub const GOOD_ENOUGH_PREFIXES: [&str; 2] = ["Zone ", "NYE "];

/// Stops whose GTFS id cannot be parsed, mapped by hand
const STOP_ID_OVERRIDES: [(&str, i32); 1] = [(
    "Route5A-0549_Victoria Road South at Macalister Boulevard southbound",
    619,
)];

/// Integer id of a route
///
/// Resolution order:
/// 1. the special short names `Com` and `GC`,
/// 2. an all-digit short name,
/// 3. a number followed by an `A`, `B` or `U` band letter,
/// 4. with `good_enough_accepted`, a `Zone ` or `NYE ` short name uses its GTFS route id.
///
/// Anything else, or an id outside `0..=MAX_ROUTE_ID`, is an [Error::UnmappableRouteId].
pub fn route_id(route: &Route, good_enough_accepted: bool) -> Result<i64, Error> {
    let short_name = route.short_name.as_str();
    short_name_id(short_name)
        .or_else(|| {
            if good_enough_accepted
                && GOOD_ENOUGH_PREFIXES
                    .iter()
                    .any(|prefix| short_name.starts_with(prefix))
            {
                route.id.trim().parse().ok()
            } else {
                None
            }
        })
        .filter(|id| (0..=MAX_ROUTE_ID).contains(id))
        .ok_or_else(|| Error::UnmappableRouteId {
            short_name: short_name.to_owned(),
            gtfs_route_id: route.id.clone(),
        })
}

fn short_name_id(short_name: &str) -> Option<i64> {
    match short_name {
        COMMUNITY_BUS_RSN => return Some(COMMUNITY_BUS_RID),
        GORDON_CORRIDOR_RSN => return Some(GORDON_CORRIDOR_RID),
        _ => {}
    }
    if is_digits(short_name) {
        return short_name.parse().ok();
    }
    let number = route_number(short_name)?;
    let offset = match short_name.chars().last()? {
        'A' => RID_ENDS_WITH_A,
        'B' => RID_ENDS_WITH_B,
        'U' => RID_ENDS_WITH_U,
        _ => return None,
    };
    offset.checked_add(number)
}

/// First run of digits of a short name, `50` for `50U`
pub fn route_number(short_name: &str) -> Option<i64> {
    let start = short_name.find(|c: char| c.is_ascii_digit())?;
    let digits = &short_name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Integer id of a stop
///
/// The override table wins, then a numeric stop code, then the digits found between the
/// first `-` and the following `_` of the stop id (`1015-0213_Foo` gives 213).
pub fn stop_id(stop: &Stop) -> Result<i32, Error> {
    if let Some((_, id)) = STOP_ID_OVERRIDES.iter().find(|(gtfs_id, _)| *gtfs_id == stop.id) {
        return Ok(*id);
    }
    let code = stop.code.as_deref().map(str::trim).unwrap_or_default();
    if is_digits(code) {
        if let Ok(id) = code.parse() {
            return Ok(id);
        }
    }
    composite_stop_id(&stop.id).ok_or_else(|| Error::MalformedStop {
        stop_id: stop.id.clone(),
        stop_code: stop.code.clone(),
    })
}

fn composite_stop_id(gtfs_id: &str) -> Option<i32> {
    let (_, after_dash) = gtfs_id.split_once('-')?;
    let (digits, _) = after_dash.split_once('_')?;
    if is_digits(digits) {
        digits.parse().ok()
    } else {
        None
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
