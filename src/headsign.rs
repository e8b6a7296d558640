//! Known pairs of headsigns that may share a logical trip

use crate::ids::RID_ENDS_WITH_U;
use crate::route_trips::{GUELPH_CENTRAL_STATION, UNIVERSITY_CENTER};
use crate::Error;

struct MergeRule {
    route_id: i64,
    /// Every headsign allowed in the group, the canonical one last
    headsigns: &'static [&'static str],
}

impl MergeRule {
    fn canonical(&self) -> &'static str {
        self.headsigns.last().copied().unwrap_or_default()
    }

    fn accepts(&self, headsign: &str) -> bool {
        self.headsigns.iter().any(|h| *h == headsign)
    }
}

const MERGE_RULES: [MergeRule; 12] = [
    MergeRule {
        route_id: 1,
        headsigns: &["Edinburgh @ Laurelwood", "Edinburgh College"],
    },
    MergeRule {
        route_id: 2,
        headsigns: &["Edinburgh @ Ironwood", "College Edinburgh"],
    },
    MergeRule {
        route_id: 5,
        headsigns: &["Frederick @ Waterford", UNIVERSITY_CENTER, "Goodwin"],
    },
    MergeRule {
        route_id: 6,
        headsigns: &["Ironwood @ Kortright", UNIVERSITY_CENTER, "Harvard Ironwood"],
    },
    MergeRule {
        route_id: 7,
        headsigns: &["Ptarmigan @ Downey", "Kortright Downey"],
    },
    MergeRule {
        route_id: 15,
        headsigns: &["College @ Flanders", UNIVERSITY_CENTER, "University College"],
    },
    MergeRule {
        route_id: 16,
        headsigns: &["Clair @ Gordon", "Southgate"],
    },
    MergeRule {
        route_id: 17,
        headsigns: &["Imperial @ Willow", "Woodlawn Watson"],
    },
    MergeRule {
        route_id: 18,
        headsigns: &["Eastview @ Victoria", "Watson Woodlawn"],
    },
    MergeRule {
        route_id: 20,
        headsigns: &["Imperial @ Galaxy Cinema", GUELPH_CENTRAL_STATION, "Northwest Ind"],
    },
    MergeRule {
        route_id: RID_ENDS_WITH_U + 59,
        headsigns: &["Gordon @ Vaughan", "Clairfields"],
    },
    MergeRule {
        route_id: 99,
        headsigns: &["", "North"],
    },
];

/// Label shared by two headsigns grouped under the same logical trip
///
/// Identical headsigns merge to themselves; any other pair must be listed for the route.
pub fn merge_headsign(route_id: i64, first: &str, second: &str) -> Result<String, Error> {
    if first == second {
        return Ok(first.to_owned());
    }
    MERGE_RULES
        .iter()
        .find(|rule| rule.route_id == route_id && rule.accepts(first) && rule.accepts(second))
        .map(|rule| rule.canonical().to_owned())
        .ok_or_else(|| Error::UnexpectedHeadsignMerge {
            route_id,
            first: first.to_owned(),
            second: second.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_merges() {
        assert_eq!(
            "Edinburgh College",
            merge_headsign(1, "Edinburgh @ Laurelwood", "Edinburgh College").unwrap()
        );
        assert_eq!(
            "Edinburgh College",
            merge_headsign(1, "Edinburgh College", "Edinburgh @ Laurelwood").unwrap()
        );
        assert_eq!(
            "Goodwin",
            merge_headsign(5, "Frederick @ Waterford", "University Ctr").unwrap()
        );
        assert_eq!(
            "Clairfields",
            merge_headsign(21059, "Gordon @ Vaughan", "Clairfields").unwrap()
        );
        assert_eq!("North", merge_headsign(99, "", "North").unwrap());
        assert_eq!(
            "Northwest Ind",
            merge_headsign(20, "Guelph Central Sta", "Imperial @ Galaxy Cinema").unwrap()
        );
    }

    #[test]
    fn identical_headsigns() {
        assert_eq!("Anything", merge_headsign(42, "Anything", "Anything").unwrap());
    }

    #[test]
    fn unexpected_merges() {
        assert!(matches!(
            merge_headsign(1, "Edinburgh @ Laurelwood", "Goodwin"),
            Err(Error::UnexpectedHeadsignMerge { route_id: 1, .. })
        ));
        assert!(merge_headsign(2, "Edinburgh @ Laurelwood", "Edinburgh College").is_err());
        assert!(merge_headsign(99, "", "South").is_err());
    }
}
