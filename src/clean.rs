//! Generic label cleaning shared by every cleaning pipeline.
//!
//! Each helper is a pure `&str -> String` step. Word matches use `\b` so that a
//! replacement never eats the separator needed by the next match, which keeps every
//! helper idempotent.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Builds a case-insensitive regex matching any of `words` as a whole word
pub fn clean_words(words: &[&str]) -> Regex {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    // only fails on regex size limits, which a handful of escaped words never reach
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).unwrap()
}

const STREET_TYPE_WORDS: &[(&[&str], &str)] = &[
    (&["avenue"], "Ave"),
    (&["boulevard"], "Blvd"),
    (&["centre", "center"], "Ctr"),
    (&["circle"], "Cir"),
    (&["court"], "Ct"),
    (&["crescent"], "Cres"),
    (&["drive"], "Dr"),
    (&["highway"], "Hwy"),
    (&["lane"], "Ln"),
    (&["parkway"], "Pkwy"),
    (&["place"], "Pl"),
    (&["road"], "Rd"),
    (&["square"], "Sq"),
    (&["station"], "Sta"),
    (&["street"], "St"),
    (&["terrace"], "Ter"),
];

const ORDINAL_WORDS: &[(&str, &str)] = &[
    ("first", "1st"),
    ("second", "2nd"),
    ("third", "3rd"),
    ("fourth", "4th"),
    ("fifth", "5th"),
    ("sixth", "6th"),
    ("seventh", "7th"),
    ("eighth", "8th"),
    ("ninth", "9th"),
    ("tenth", "10th"),
];

lazy_static! {
    static ref AT: Regex = clean_words(&["at"]);
    static ref AMPERSAND: Regex = Regex::new(r"\s*&\s*").unwrap();
    static ref STARTS_WITH_TO: Regex = Regex::new(r"(?i)^.*\sto\s+").unwrap();
    static ref ENDS_WITH_VIA: Regex = Regex::new(r"(?i)\s+via\s.*$").unwrap();
    static ref BOUNDS: Regex = Regex::new(r"(?i)\b(north|south|east|west)bound\b").unwrap();
    static ref POINTS: Regex = Regex::new(r"(\w)\.(\W|$)").unwrap();
    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)\b(\d+)(st|nd|rd|th)\b").unwrap();
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref SPACE_AFTER_PARENTHESIS: Regex = Regex::new(r"\(\s+").unwrap();
    static ref SPACE_BEFORE_PARENTHESIS: Regex = Regex::new(r"\s+\)").unwrap();
    static ref STREET_TYPES: Vec<(Regex, &'static str)> = STREET_TYPE_WORDS
        .iter()
        .map(|(words, short)| (clean_words(words), *short))
        .collect();
    static ref NUMBER_WORDS: Vec<(Regex, &'static str)> = ORDINAL_WORDS
        .iter()
        .map(|(word, number)| (clean_words(&[*word]), *number))
        .collect();
}

/// `at` and `&` between two names become the `@` junction marker
pub fn clean_at(s: &str) -> String {
    let s = AT.replace_all(s, "@");
    AMPERSAND.replace_all(&s, " @ ").into_owned()
}

/// `Downtown to Stone Road Mall via Gordon` becomes `Stone Road Mall`
pub fn keep_to_and_remove_via(s: &str) -> String {
    let s = STARTS_WITH_TO.replace(s, "");
    ENDS_WITH_VIA.replace(&s, "").into_owned()
}

/// `northbound` becomes `NB`, and so on for the other compass points
pub fn clean_bounds(s: &str) -> String {
    BOUNDS
        .replace_all(s, |caps: &Captures| {
            let initial = caps[1].chars().next().unwrap_or_default();
            format!("{}B", initial.to_ascii_uppercase())
        })
        .into_owned()
}

pub fn remove_points(s: &str) -> String {
    POINTS.replace_all(s, "${1}${2}").into_owned()
}

pub fn clean_street_types(s: &str) -> String {
    STREET_TYPES
        .iter()
        .fold(s.to_owned(), |acc, (regex, short)| {
            regex.replace_all(&acc, *short).into_owned()
        })
}

/// Spelled-out ordinals become digits and ordinal suffixes are lower-cased (`2ND` -> `2nd`)
pub fn clean_numbers(s: &str) -> String {
    let s = NUMBER_WORDS
        .iter()
        .fold(s.to_owned(), |acc, (regex, number)| {
            regex.replace_all(&acc, *number).into_owned()
        });
    ORDINAL_SUFFIX
        .replace_all(&s, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_ascii_lowercase())
        })
        .into_owned()
}

/// Final step of every pipeline: single spaces, no dangling separators, capitalized words
pub fn clean_label(s: &str) -> String {
    let s = SPACES.replace_all(s, " ");
    let s = SPACE_AFTER_PARENTHESIS.replace_all(&s, "(");
    let s = SPACE_BEFORE_PARENTHESIS.replace_all(&s, ")");
    let s = s.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '/' | ';' | ':'));
    s.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junction_marker() {
        assert_eq!("Watson @ Fleming", clean_at("Watson at Fleming"));
        assert_eq!("Gordon @ Clair", clean_at("Gordon & Clair"));
        assert_eq!("Watson Parkway", clean_at("Watson Parkway"));
        assert_eq!("Stone @ Edinburgh", clean_at("Stone AT Edinburgh"));
    }

    #[test]
    fn to_and_via() {
        assert_eq!(
            "Stone Road Mall",
            keep_to_and_remove_via("Downtown to Stone Road Mall via Gordon")
        );
        assert_eq!("Toronto Street", keep_to_and_remove_via("Toronto Street"));
    }

    #[test]
    fn bounds_and_points() {
        assert_eq!("Victoria @ Norma NB", clean_bounds("Victoria @ Norma northbound"));
        assert_eq!("Woodlawn WB", clean_bounds("Woodlawn Westbound"));
        assert_eq!("St Joseph's", remove_points("St. Joseph's"));
        assert_eq!("Gordon St S", remove_points("Gordon St. S."));
    }

    #[test]
    fn street_types_and_numbers() {
        assert_eq!(
            "Victoria Rd S @ Macalister Blvd",
            clean_street_types("Victoria Road S @ Macalister Boulevard")
        );
        assert_eq!("University Ctr", clean_street_types("University Centre"));
        assert_eq!("Stone Rd", clean_street_types("Stone Rd"));
        assert_eq!("2nd Ave", clean_numbers("Second Ave"));
        assert_eq!("21st Century", clean_numbers("21ST Century"));
    }

    #[test]
    fn label() {
        assert_eq!("Imperial @ Galaxy Cinema", clean_label("  imperial  @ galaxy Cinema - "));
        assert_eq!("Southgate (485)", clean_label("Southgate ( 485 )"));
        assert_eq!("", clean_label("  "));
    }
}
