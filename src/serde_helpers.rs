use chrono::NaiveDate;
use rgb::RGB8;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::Serializer;

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s: &str = Deserialize::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(serde::de::Error::custom)
}

/// Parses a GTFS `HH:MM:SS` time into seconds since the start of the service day.
///
/// Hours may exceed 24 for trips running past midnight.
pub fn parse_time(s: &str) -> Result<u32, crate::Error> {
    let invalid = || crate::Error::InvalidTime(s.to_owned());
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [h, m, sec] if !h.is_empty() && m.len() == 2 && sec.len() == 2 => {
            let number = |part: &str| part.parse::<u32>().map_err(|_| invalid());
            Ok(number(*h)? * 3600 + number(*m)? * 60 + number(*sec)?)
        }
        _ => Err(invalid()),
    }
}

pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<&str> = Deserialize::deserialize(deserializer)?;

    match s {
        None => Ok(None),
        Some(t) => parse_time(t).map(Some).map_err(de::Error::custom),
    }
}

pub fn de_with_optional_float<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).and_then(|s| {
        let s = s.trim();
        if s.is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some).map_err(de::Error::custom)
        }
    })
}

pub fn parse_color(s: &str) -> Result<RGB8, crate::Error> {
    let s = s.trim();
    let invalid = || crate::Error::InvalidColor(s.to_owned());
    if s.len() != 6 || !s.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGB8::new(channel(0)?, channel(2)?, channel(4)?))
}

pub fn deserialize_option_color<'de, D>(de: D) -> Result<Option<RGB8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<&str> = Deserialize::deserialize(de)?;
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(c) => parse_color(c).map(Some).map_err(de::Error::custom),
    }
}

/// Upper-case `RRGGBB`, the form used in every output table.
pub fn color_to_hex(color: &RGB8) -> String {
    format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

pub fn serialize_color<S>(color: &RGB8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(color_to_hex(color).as_str())
}

pub fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: &str = Deserialize::deserialize(deserializer)?;
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        &_ => Err(serde::de::Error::custom(format!(
            "Invalid value `{s}`, expected 0 or 1"
        ))),
    }
}

#[test]
fn test_deserialize_time() {
    #[derive(Deserialize)]
    struct Test {
        #[serde(deserialize_with = "deserialize_optional_time")]
        time: Option<u32>,
    }
    let data_in = "time\n01:01:01\n";
    let parsed: Test = csv::Reader::from_reader(data_in.as_bytes())
        .deserialize()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(Some(3600 + 60 + 1), parsed.time);

    let data_in_late_night = "time\n25:35:42\n";
    let parsed_late_night: Test = csv::Reader::from_reader(data_in_late_night.as_bytes())
        .deserialize()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(Some((25 * 3600) + (35 * 60) + 42), parsed_late_night.time);

    assert!(parse_time("1:1:1").is_err());
    assert!(parse_time("10:61").is_err());
}

#[test]
fn test_parse_color() {
    assert_eq!(RGB8::new(0xD1, 0x46, 0x25), parse_color("D14625").unwrap());
    assert_eq!(RGB8::new(0x91, 0x46, 0x9B), parse_color("91469b").unwrap());
    assert_eq!(RGB8::new(0x4F, 0x83, 0x2E), parse_color("4F832E ").unwrap());
    assert!(parse_color("blue").is_err());
    assert_eq!("00A6E5", color_to_hex(&RGB8::new(0x00, 0xA6, 0xE5)));
}
