//! Direction layouts of the Guelph routes whose GTFS trips cannot be split by `direction_id`
//!
//! Anchor comments: `==` marks a stop both directions go through, `!=` a stop past the
//! point where their paths part, `++` an intermediate anchor.

use crate::model::Direction::{East, North, South, West};
use crate::trip_spec::RouteTripSpec;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const UNIVERSITY_CENTER: &str = "University Ctr";
pub const GUELPH_CENTRAL_STATION: &str = "Guelph Central Sta";
pub const STONE_ROAD_MALL: &str = "Stone Road Mall";

lazy_static! {
    static ref ALL_ROUTE_TRIPS: HashMap<i64, RouteTripSpec> = route_trip_specs()
        .into_iter()
        .map(|spec| (spec.route_id, spec))
        .collect();
}

/// Direction layout of a route, `None` for routes split by their GTFS `direction_id`
pub fn route_trip_spec(route_id: i64) -> Option<&'static RouteTripSpec> {
    ALL_ROUTE_TRIPS.get(&route_id)
}

/// Ids of every route with a hand-written direction layout
pub fn route_ids() -> impl Iterator<Item = i64> {
    ALL_ROUTE_TRIPS.keys().copied()
}

fn route_trip_specs() -> Vec<RouteTripSpec> {
    vec![
        RouteTripSpec::new(1, East, UNIVERSITY_CENTER, West, "Edinburgh @ Laurelwood")
            .add_trip_sort(East, &[
                "112",
                "356",  // ==
                "5844",
                "5845",
            ])
            .add_trip_sort(West, &[
                "5845",
                "106",  // ++
                "112",
            ]),
        RouteTripSpec::new(2, East, UNIVERSITY_CENTER, West, "Edinburgh @ Ironwood")
            .add_trip_sort(East, &[
                "162",
                "168",  // ++
                "5834",
            ])
            .add_trip_sort(West, &[
                "5847",
                "157",  // ++
                "162",
            ]),
        RouteTripSpec::new(3, North, "Woodlawn @ Edinburgh", South, GUELPH_CENTRAL_STATION)
            .add_trip_sort(North, &[
                "5841",
                "305",  // ++
                "231",
            ])
            .add_trip_sort(South, &[
                "231",
                "389",
                "392",  // ++
                "1130", // ==
                "5837",
                "5841",
            ]),
        RouteTripSpec::new(4, East, "Watson @ Guelph Transit", West, GUELPH_CENTRAL_STATION)
            .add_trip_sort(East, &[
                "5849",
                "360",
                "416",
            ])
            .add_trip_sort(West, &[
                "416",
                "422",  // ++
                "5850",
            ]),
        RouteTripSpec::new(5, North, UNIVERSITY_CENTER, South, "Frederick @ Waterford")
            .add_trip_sort(North, &[
                "520",
                "528",
                "168",  // ==
                "169",  // !=
                "5844", // !=
                "5845", // !=
            ])
            .add_trip_sort(South, &[
                "5844",
                "5915", // ++
                "520",
            ]),
        RouteTripSpec::new(6, East, UNIVERSITY_CENTER, West, "Ironwood @ Kortright")
            .add_trip_sort(East, &[
                "615",
                "621",  // ++
                "5843",
            ])
            .add_trip_sort(West, &[
                "5831",
                "608",  // ++
                "612",
                "615",
            ]),
        RouteTripSpec::new(7, East, "Ptarmigan @ Downey", West, UNIVERSITY_CENTER)
            .add_trip_sort(East, &[
                "5843",
                "706",  // ++
                "709",
                "713",
            ])
            .add_trip_sort(West, &[
                "713",
                "717",
                "5831",
            ]),
        RouteTripSpec::new(8, North, GUELPH_CENTRAL_STATION, South, STONE_ROAD_MALL)
            .add_trip_sort(North, &[
                "813",
                "819",  // ++
                "5849",
            ])
            .add_trip_sort(South, &[
                "5850",
                "808",  // ++
                "813",
            ]),
        RouteTripSpec::new(9, East, GUELPH_CENTRAL_STATION, West, "Elmira @ West Acres")
            .add_trip_sort(East, &[
                "213",
                "919",  // ++
                "6067", // ==
                "5833",
                "5852",
            ])
            .add_trip_sort(West, &[
                "5839",
                "904",  // ++
                "213",
            ]),
        RouteTripSpec::new(10, East, GUELPH_CENTRAL_STATION, West, "Imperial @ Ferman")
            .add_trip_sort(East, &[
                "1015",
                "1022", // ++
                "5860",
            ])
            .add_trip_sort(West, &[
                "5858",
                "1008", // ++
                "1015",
            ]),
        RouteTripSpec::new(11, East, GUELPH_CENTRAL_STATION, West, "Silvercreek @ Greengate")
            .add_trip_sort(East, &[
                "2035",
                "1122",
                "5859",
            ])
            .add_trip_sort(West, &[
                "5851",
                "1105", // ++
                "2035",
            ]),
        RouteTripSpec::new(12, North, "Woodlawn @ Victoria", South, GUELPH_CENTRAL_STATION)
            .add_trip_sort(North, &[
                "5860",
                "1207", // ++
                "1214",
            ])
            .add_trip_sort(South, &[
                "1214",
                "1221", // ++
                "5858",
            ]),
        RouteTripSpec::new(13, East, "Eastview @ Starwood", West, GUELPH_CENTRAL_STATION)
            .add_trip_sort(East, &[
                "5837",
                "1313", // ++
                "370",
            ])
            .add_trip_sort(West, &[
                "370",
                "1324",
                "1130", // ==
                "5837",
                "5841",
            ]),
        RouteTripSpec::new(14, East, "Watson @ Fleming", West, GUELPH_CENTRAL_STATION)
            .add_trip_sort(East, &[
                "5859",
                "1406", // ++
                "332",
            ])
            .add_trip_sort(West, &[
                "332",
                "1418", // ++
                "5851",
            ]),
        RouteTripSpec::new(15, East, UNIVERSITY_CENTER, West, "College @ Flanders")
            .add_trip_sort(East, &[
                "1508",
                "118",
                "5847",
            ])
            .add_trip_sort(West, &[
                "5834",
                "207",  // ++
                "1508",
            ]),
        RouteTripSpec::new(16, East, "Southgate", West, "Clair @ Gordon")
            .add_trip_sort(East, &[
                "6058",
                "1619",
                "1621", // ++
                "1624",
            ])
            .add_trip_sort(West, &[
                "1624",
                "1627", // ++
                "1631", // ==
                "6058", // !=
                "6006", // !=
                "6101",
            ]),
        RouteTripSpec::new(17, North, "Woodlawn Smart Ctrs", South, UNIVERSITY_CENTER)
            .add_trip_sort(North, &[
                "5836",
                "1501", // ++
                "5942",
                "5917",
            ])
            .add_trip_sort(South, &[
                "5917",
                "223",
                "320",
                "321",
                "333",
                "339",  // ++
                "5836",
            ]),
        RouteTripSpec::new(18, North, "Eastview @ Victoria", South, UNIVERSITY_CENTER)
            .add_trip_sort(North, &[
                "5840",
                "366",
                "372",
            ])
            .add_trip_sort(South, &[
                "372",
                "378",  // ++
                "379",
                "278",
                "6047",
                "1520", // ==
                "5840", // !=
            ]),
        RouteTripSpec::new(20, East, GUELPH_CENTRAL_STATION, West, "Imperial @ Galaxy Cinema")
            .add_trip_sort(East, &[
                "2028",
                "1130", // ==
                "5833",
                "5839",
            ])
            .add_trip_sort(West, &[
                "5833",
                "5863", // ++
                "2028",
            ]),
        RouteTripSpec::new(40, North, GUELPH_CENTRAL_STATION, South, STONE_ROAD_MALL)
            .add_trip_sort(North, &[
                "6047",
                "6047",
                "5850",
                "5850",
            ])
            .add_trip_sort(South, &[
                "5850",
                "156",
                "6047",
            ]),
        RouteTripSpec::new(21_050, East, UNIVERSITY_CENTER, West, "Stone @ Edinburgh")
            .add_trip_sort(East, &[
                "207",
                "114",
                "1516", // ++
                "5846",
            ])
            .add_trip_sort(West, &[
                "5846",
                "1501", // ++
                "207",
            ]),
        RouteTripSpec::new(21_051, East, UNIVERSITY_CENTER, West, "Janefield @ Mason")
            .add_trip_sort(East, &[
                "116",
                "1520", // ==
                "5845",
                "5847",
            ])
            .add_trip_sort(West, &[
                "5845",
                "115",
                "116",
            ]),
        RouteTripSpec::new(21_052, North, UNIVERSITY_CENTER, South, "Edinburgh @ Rickson")
            .add_trip_sort(North, &[
                "166",
                "167",
                "171",  // ++
                "5845",
            ])
            .add_trip_sort(South, &[
                "5847",
                "703",  // ++
                "166",
            ]),
        RouteTripSpec::new(21_056, North, UNIVERSITY_CENTER, South, "Goodwin @ Samuel")
            .add_trip_sort(North, &[
                "6014",
                "5605",
                "169",  // ++
                "5842",
            ])
            .add_trip_sort(South, &[
                "5842",
                "104",  // ++
                "6014",
            ]),
        RouteTripSpec::new(21_057, East, UNIVERSITY_CENTER, West, "Ironwood @ Reid")
            .add_trip_sort(East, &[
                "5706",
                "5709", // ++
                "5846",
            ])
            .add_trip_sort(West, &[
                "5838",
                "1503", // ++
                "5706",
            ]),
        RouteTripSpec::new(21_058, East, UNIVERSITY_CENTER, West, "Edinburgh @ Ironwood")
            .add_trip_sort(East, &[
                "162",
                "721",  // ++
                "5838",
            ])
            .add_trip_sort(West, &[
                "5846",
                "1501", // ++
                "162",
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip_spec::MIN_MATCHED_ANCHORS;

    #[test]
    fn every_direction_has_anchors() {
        assert_eq!(26, route_ids().count());
        for route_id in route_ids() {
            let spec = route_trip_spec(route_id).unwrap();
            for direction in spec.directions() {
                assert!(
                    direction.anchors.len() >= MIN_MATCHED_ANCHORS,
                    "route {} {}",
                    route_id,
                    direction.direction
                );
                assert!(direction
                    .anchors
                    .iter()
                    .all(|a| !a.is_empty() && a.chars().all(|c| c.is_ascii_digit())));
            }
        }
    }

    #[test]
    fn known_layouts() {
        assert!(route_trip_spec(99).is_none());
        let route_52u = route_trip_spec(21_052).unwrap();
        assert_eq!(
            vec!["5847", "703", "166"],
            route_52u.direction(South).unwrap().anchors
        );
        assert_eq!(
            UNIVERSITY_CENTER,
            route_52u.direction(North).unwrap().headsign.value()
        );
    }

    #[test]
    fn layouts_follow_the_feed_notes() {
        let anchors = |route_id: i64, direction: crate::model::Direction| {
            route_trip_spec(route_id)
                .and_then(|spec| spec.direction(direction))
                .map(|d| d.anchors.clone())
                .unwrap_or_default()
        };
        assert_eq!(vec!["112", "356", "5844", "5845"], anchors(1, East));
        assert_eq!(vec!["5845", "106", "112"], anchors(1, West));
        assert_eq!(
            vec!["231", "389", "392", "1130", "5837", "5841"],
            anchors(3, South)
        );
        assert_eq!(vec!["370", "1324", "1130", "5837", "5841"], anchors(13, West));
        assert_eq!(vec!["6047", "6047", "5850", "5850"], anchors(40, North));
        assert_eq!(vec!["5850", "156", "6047"], anchors(40, South));
    }
}
