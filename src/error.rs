use thiserror::Error;

#[derive(Debug)]
pub struct LineError {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

/// An error that can occur when reading the feed or applying the agency rules.
///
/// None of the agency variants are recoverable: each one means the static tables
/// of this crate are out of date with the published feed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not find file {0}")]
    MissingFile(String),
    #[error("The id {0} is not known")]
    ReferenceError(String),
    #[error("Could not read GTFS: {0} is neither a file nor a directory")]
    NotFileNorDirectory(String),
    #[error("'{0}' is not a valid time")]
    InvalidTime(String),
    #[error("'{0}' is not a valid color")]
    InvalidColor(String),
    #[error("impossible to read file")]
    IO(#[from] std::io::Error),
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        file_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[cfg(feature = "read-url")]
    #[error("impossible to remotely access file")]
    Fetch(#[from] reqwest::Error),
    #[error("impossible to read csv file '{file_name}'")]
    CSVError {
        file_name: String,
        #[source]
        source: csv::Error,
        line_in_error: Option<LineError>,
    },
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    #[error("Can't find route ID for '{short_name}' (route_id: {gtfs_route_id})")]
    UnmappableRouteId {
        short_name: String,
        gtfs_route_id: String,
    },
    #[error("Route ID {route_id} derived for both '{first}' and '{second}'")]
    DuplicateRouteId {
        route_id: i64,
        first: String,
        second: String,
    },
    #[error("Unexpected route long name '{long_name}' for route '{short_name}'")]
    UnmappableLongName {
        short_name: String,
        long_name: String,
    },
    #[error("Unexpected route color for '{0}'")]
    UnmappableColor(String),
    #[error("Unexpected trips to merge for route {route_id}: '{first}' and '{second}'")]
    UnexpectedHeadsignMerge {
        route_id: i64,
        first: String,
        second: String,
    },
    #[error("Error while getting stop ID for '{stop_id}' (stop_code: {stop_code:?})")]
    MalformedStop {
        stop_id: String,
        stop_code: Option<String>,
    },
    #[error("Trip {trip_id} of route {route_id} matches no single direction ({reason})")]
    UnclassifiableTrip {
        route_id: i64,
        trip_id: String,
        reason: String,
    },
}
