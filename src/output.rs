//! Headerless CSV tables written from an [MSpec]

use crate::model::{MRoute, MSpec, MStop, MTrip, MTripStop};
use crate::serde_helpers::serialize_color;
use crate::Error;
use rgb::RGB8;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const ROUTES_FILE: &str = "gtfs_rts_routes";
pub const TRIPS_FILE: &str = "gtfs_rts_trips";
pub const STOPS_FILE: &str = "gtfs_rts_stops";
pub const TRIP_STOPS_FILE: &str = "gtfs_rts_trip_stops";

#[derive(Serialize)]
struct RouteRow<'a> {
    id: i64,
    short_name: &'a str,
    long_name: &'a str,
    #[serde(serialize_with = "serialize_color")]
    color: RGB8,
}

#[derive(Serialize)]
struct TripRow<'a> {
    id: i64,
    route_id: i64,
    headsign_kind: u8,
    headsign_value: &'a str,
    headsign_id: i32,
}

#[derive(Serialize)]
struct StopRow<'a> {
    id: i32,
    code: &'a str,
    name: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Serialize)]
struct TripStopRow {
    trip_id: i64,
    stop_id: i32,
    stop_sequence: u32,
}

fn write_rows<W, R, I>(writer: W, file_name: &str, rows: I) -> Result<(), Error>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let csv_error = |source| Error::CSVError {
        file_name: file_name.to_owned(),
        source,
        line_in_error: None,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_routes<W: Write>(routes: &[MRoute], writer: W) -> Result<(), Error> {
    write_rows(
        writer,
        ROUTES_FILE,
        routes.iter().map(|r| RouteRow {
            id: r.id,
            short_name: &r.short_name,
            long_name: &r.long_name,
            color: r.color,
        }),
    )
}

pub fn write_trips<W: Write>(trips: &[MTrip], writer: W) -> Result<(), Error> {
    write_rows(
        writer,
        TRIPS_FILE,
        trips.iter().map(|t| TripRow {
            id: t.id(),
            route_id: t.route_id,
            headsign_kind: t.headsign.kind(),
            headsign_value: t.headsign.value(),
            headsign_id: t.headsign_id,
        }),
    )
}

pub fn write_stops<W: Write>(stops: &[MStop], writer: W) -> Result<(), Error> {
    write_rows(
        writer,
        STOPS_FILE,
        stops.iter().map(|s| StopRow {
            id: s.id,
            code: &s.code,
            name: &s.name,
            latitude: s.latitude,
            longitude: s.longitude,
        }),
    )
}

pub fn write_trip_stops<W: Write>(trip_stops: &[MTripStop], writer: W) -> Result<(), Error> {
    write_rows(
        writer,
        TRIP_STOPS_FILE,
        trip_stops.iter().map(|ts| TripStopRow {
            trip_id: ts.trip_id,
            stop_id: ts.stop_id,
            stop_sequence: ts.stop_sequence,
        }),
    )
}

fn create<P: AsRef<Path>>(output_dir: P, prefix: &str, file_name: &str) -> Result<File, Error> {
    let name = format!("{}{}", prefix, file_name);
    File::create(output_dir.as_ref().join(&name)).map_err(|e| Error::NamedFileIO {
        file_name: name,
        source: Box::new(e),
    })
}

/// Writes the four tables in `output_dir`, each file name starting with `prefix`
pub fn write_spec<P: AsRef<Path>>(spec: &MSpec, output_dir: P, prefix: &str) -> Result<(), Error> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;
    write_routes(&spec.routes, create(output_dir, prefix, ROUTES_FILE)?)?;
    write_trips(&spec.trips, create(output_dir, prefix, TRIPS_FILE)?)?;
    write_stops(&spec.stops, create(output_dir, prefix, STOPS_FILE)?)?;
    write_trip_stops(&spec.trip_stops, create(output_dir, prefix, TRIP_STOPS_FILE)?)?;
    log::info!("Tables written to {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, Headsign};

    #[test]
    fn route_rows() {
        let mut buffer = Vec::new();
        let routes = [MRoute {
            id: 21050,
            short_name: "50U".to_owned(),
            long_name: "Stone Road Express".to_owned(),
            color: RGB8::new(0xA5, 0x46, 0x86),
        }];
        write_routes(&routes, &mut buffer).unwrap();
        assert_eq!(
            "21050,50U,Stone Road Express,A54686\n",
            String::from_utf8(buffer).unwrap()
        );
    }

    #[test]
    fn trip_and_stop_rows() {
        let mut buffer = Vec::new();
        let trips = [
            MTrip {
                route_id: 1,
                headsign: Headsign::from("University Ctr"),
                headsign_id: Direction::East.id(),
            },
            MTrip {
                route_id: 99,
                headsign: Headsign::Direction(Direction::North),
                headsign_id: 0,
            },
        ];
        write_trips(&trips, &mut buffer).unwrap();
        assert_eq!(
            "102,1,0,University Ctr,2\n9900,99,1,North,0\n",
            String::from_utf8(buffer).unwrap()
        );

        let mut buffer = Vec::new();
        let stops = [MStop {
            id: 213,
            code: "".to_owned(),
            name: "Foo St @ Bar Ave SB".to_owned(),
            latitude: Some(43.5),
            longitude: None,
        }];
        write_stops(&stops, &mut buffer).unwrap();
        assert_eq!(
            "213,,Foo St @ Bar Ave SB,43.5,\n",
            String::from_utf8(buffer).unwrap()
        );
    }
}
