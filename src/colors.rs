use crate::ids::{route_number, COMMUNITY_BUS_RSN, GOOD_ENOUGH_PREFIXES, GORDON_CORRIDOR_RSN};
use crate::serde_helpers::parse_color;
use crate::Error;
use rgb::RGB8;

pub const AGENCY_COLOR: &str = "00A6E5";

const COMMUNITY_BUS_COLOR: &str = "D14625";
const GORDON_CORRIDOR_COLOR: &str = "921B1E";
const SEASONAL_COLOR: &str = "ED1C24";

const ROUTE_COLORS: [(i64, &str); 28] = [
    (1, "EC008C"),
    (2, "EC008C"),
    (3, "91469B"),
    (4, "1988B7"),
    (5, "921B1E"),
    (6, "ED1C24"),
    (7, "682C91"),
    (8, "0082B1"),
    (9, "5C7AAE"),
    (10, "A54686"),
    (11, "5C7AAE"),
    (12, "008290"),
    (13, "811167"),
    (14, "485E88"),
    (15, "8F7140"),
    (16, "29712A"),
    (17, "CB640A"),
    (18, "CB640A"),
    (20, "556940"),
    (40, "005689"),
    (41, "405D18"),
    (50, "A54686"),
    (51, "405D18"),
    (52, "485E88"),
    (56, "ED1C24"),
    (57, "5C7AAE"),
    (58, "91469B"),
    (99, "4F832E"),
];

pub fn agency_color() -> Result<RGB8, Error> {
    parse_color(AGENCY_COLOR)
}

/// Colour of a route, keyed by its short name
///
/// Band letters do not matter: `1A`, `1B` and `1` share a colour.
pub fn route_color(short_name: &str) -> Result<RGB8, Error> {
    let hex = match short_name {
        COMMUNITY_BUS_RSN => Some(COMMUNITY_BUS_COLOR),
        GORDON_CORRIDOR_RSN => Some(GORDON_CORRIDOR_COLOR),
        _ if GOOD_ENOUGH_PREFIXES
            .iter()
            .any(|prefix| short_name.starts_with(prefix)) =>
        {
            Some(SEASONAL_COLOR)
        }
        _ => route_number(short_name).and_then(|number| {
            ROUTE_COLORS
                .iter()
                .find(|(n, _)| *n == number)
                .map(|(_, hex)| *hex)
        }),
    };
    match hex {
        Some(hex) => parse_color(hex),
        None => Err(Error::UnmappableColor(short_name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde_helpers::color_to_hex;

    #[test]
    fn route_colors() {
        assert_eq!("EC008C", color_to_hex(&route_color("1A").unwrap()));
        assert_eq!("EC008C", color_to_hex(&route_color("2B").unwrap()));
        assert_eq!("A54686", color_to_hex(&route_color("50U").unwrap()));
        assert_eq!("4F832E", color_to_hex(&route_color("99").unwrap()));
        assert_eq!("D14625", color_to_hex(&route_color("Com").unwrap()));
        assert_eq!("921B1E", color_to_hex(&route_color("GC").unwrap()));
        assert_eq!("ED1C24", color_to_hex(&route_color("Zone 3").unwrap()));
        assert_eq!("ED1C24", color_to_hex(&route_color("NYE Shuttle").unwrap()));
        assert_eq!("00A6E5", color_to_hex(&agency_color().unwrap()));
    }

    #[test]
    fn unmappable_colors() {
        assert!(matches!(
            route_color("77"),
            Err(Error::UnmappableColor(_))
        ));
        assert!(route_color("Express").is_err());
    }
}
