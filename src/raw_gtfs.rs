use crate::error::LineError;
use crate::objects::*;
use crate::{Error, GtfsReader};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sha2::digest::Digest;
use sha2::Sha256;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Files of the feed this crate looks at. Anything else (shapes, fares...) is ignored.
const GTFS_FILES: [&str; 7] = [
    "agency.txt",
    "calendar.txt",
    "calendar_dates.txt",
    "routes.txt",
    "stops.txt",
    "stop_times.txt",
    "trips.txt",
];

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// The csv tables of a feed, barely parsed
///
/// Each table keeps its own `Result` so a broken optional file can be reported
/// without hiding the others. To work on the transit data, use [crate::Gtfs].
#[derive(Debug)]
pub struct RawGtfs {
    /// Time needed to read and parse the feed in milliseconds
    pub read_duration: i64,
    /// `None` when calendar.txt is absent
    pub calendar: Option<Result<Vec<Calendar>, Error>>,
    /// `None` when calendar_dates.txt is absent
    pub calendar_dates: Option<Result<Vec<CalendarDate>, Error>>,
    pub stops: Result<Vec<Stop>, Error>,
    pub routes: Result<Vec<Route>, Error>,
    pub trips: Result<Vec<RawTrip>, Error>,
    pub agencies: Result<Vec<Agency>, Error>,
    /// Empty when the reader was told to skip them
    pub stop_times: Result<Vec<RawStopTime>, Error>,
    /// Every file present in the feed
    pub files: Vec<String>,
    /// sha256 sum of the feed, only computed for archives
    pub sha256: Option<String>,
}

/// Parses one csv table, skipping a leading UTF-8 byte order mark
fn parse_table<R, O>(mut reader: R, file_name: &str) -> Result<Vec<O>, Error>
where
    R: Read,
    O: DeserializeOwned,
{
    let csv_error = |source, line_in_error| Error::CSVError {
        file_name: file_name.to_owned(),
        source,
        line_in_error,
    };
    let mut start = Vec::with_capacity(UTF8_BOM.len());
    reader
        .by_ref()
        .take(UTF8_BOM.len() as u64)
        .read_to_end(&mut start)
        .map_err(|e| Error::NamedFileIO {
            file_name: file_name.to_owned(),
            source: Box::new(e),
        })?;
    if start == UTF8_BOM {
        start.clear();
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(start.as_slice().chain(reader));
    let headers = csv_reader
        .headers()
        .map_err(|e| csv_error(e, None))?
        .clone();

    csv_reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| csv_error(e, None))?;
            record.deserialize(Some(&headers)).map_err(|e| {
                csv_error(
                    e,
                    Some(LineError {
                        headers: headers.iter().map(str::to_owned).collect(),
                        values: record.iter().map(str::to_owned).collect(),
                    }),
                )
            })
        })
        .collect()
}

/// Somewhere the tables of a feed can be read from
trait TableSource {
    /// `None` when the feed has no such file
    fn table<O: DeserializeOwned>(&mut self, file_name: &str) -> Option<Result<Vec<O>, Error>>;

    fn mandatory_table<O: DeserializeOwned>(&mut self, file_name: &str) -> Result<Vec<O>, Error> {
        self.table(file_name)
            .unwrap_or_else(|| Err(Error::MissingFile(file_name.to_owned())))
    }
}

struct DirectorySource<'a>(&'a Path);

impl TableSource for DirectorySource<'_> {
    fn table<O: DeserializeOwned>(&mut self, file_name: &str) -> Option<Result<Vec<O>, Error>> {
        let path = self.0.join(file_name);
        if !path.is_file() {
            return None;
        }
        Some(
            File::open(path)
                .map_err(|e| Error::NamedFileIO {
                    file_name: file_name.to_owned(),
                    source: Box::new(e),
                })
                .and_then(|file| parse_table(file, file_name)),
        )
    }
}

struct ArchiveSource<R> {
    archive: zip::ZipArchive<R>,
    /// Index in the archive of each known file, wherever it is nested
    entries: HashMap<&'static str, usize>,
    files: Vec<String>,
}

impl<R: Read + Seek> ArchiveSource<R> {
    fn new(mut archive: zip::ZipArchive<R>) -> Result<Self, Error> {
        let mut entries = HashMap::new();
        let mut files = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            files.push(file.name().to_owned());
            let base_name = Path::new(file.name()).file_name().and_then(|n| n.to_str());
            if let Some(gtfs_file) = GTFS_FILES.iter().find(|f| Some(**f) == base_name) {
                entries.insert(*gtfs_file, i);
            }
        }
        Ok(Self {
            archive,
            entries,
            files,
        })
    }
}

impl<R: Read + Seek> TableSource for ArchiveSource<R> {
    fn table<O: DeserializeOwned>(&mut self, file_name: &str) -> Option<Result<Vec<O>, Error>> {
        let index = *self.entries.get(file_name)?;
        Some(
            self.archive
                .by_index(index)
                .map_err(|e| Error::NamedFileIO {
                    file_name: file_name.to_owned(),
                    source: Box::new(e),
                })
                .and_then(|file| parse_table(file, file_name)),
        )
    }
}

fn summary<T>(objs: &Result<Vec<T>, Error>) -> String {
    match objs {
        Ok(objs) => format!("{} objects", objs.len()),
        Err(e) => format!("Could not read {}", e),
    }
}

fn optional_summary<T>(objs: &Option<Result<Vec<T>, Error>>) -> String {
    objs.as_ref()
        .map_or_else(|| "File not present".to_owned(), summary)
}

impl RawGtfs {
    /// Logs the number of objects of each table, mostly to check everything was read
    pub fn print_stats(&self) {
        log::info!("GTFS data:");
        log::info!("  Read in {} ms", self.read_duration);
        log::info!("  Stops: {}", summary(&self.stops));
        log::info!("  Routes: {}", summary(&self.routes));
        log::info!("  Trips: {}", summary(&self.trips));
        log::info!("  Agencies: {}", summary(&self.agencies));
        log::info!("  Stop times: {}", summary(&self.stop_times));
        log::info!("  Calendar: {}", optional_summary(&self.calendar));
        log::info!("  Calendar dates: {}", optional_summary(&self.calendar_dates));
    }

    /// Reads from an url (if starts with http), or a local path (either a directory or zipped file)
    ///
    /// To read from an url, build with read-url feature
    pub fn new(gtfs: &str) -> Result<Self, Error> {
        Self::new_params(gtfs, &GtfsReader::default())
    }

    #[cfg(feature = "read-url")]
    pub(crate) fn new_params(gtfs: &str, params: &GtfsReader) -> Result<Self, Error> {
        if gtfs.starts_with("http") {
            Self::from_url_params(gtfs, params)
        } else {
            Self::from_path_params(gtfs, params)
        }
    }

    #[cfg(not(feature = "read-url"))]
    pub(crate) fn new_params(gtfs: &str, params: &GtfsReader) -> Result<Self, Error> {
        Self::from_path_params(gtfs, params)
    }

    /// Reads the raw GTFS from a local zip archive or local directory
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_path_params(path, &GtfsReader::default())
    }

    pub(crate) fn from_path_params<P: AsRef<Path>>(
        path: P,
        params: &GtfsReader,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        if path.is_file() {
            Self::from_reader_params(File::open(path)?, params)
        } else if path.is_dir() {
            let started = Utc::now();
            let files = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok()?.path().to_str().map(str::to_owned))
                .collect();
            let tables = Self::read_tables(&mut DirectorySource(path), params, started);
            Ok(Self { files, ..tables })
        } else {
            Err(Error::NotFileNorDirectory(path.display().to_string()))
        }
    }

    /// Reads the raw GTFS from a remote url
    ///
    /// The library must be built with the read-url feature
    #[cfg(feature = "read-url")]
    pub fn from_url<U: reqwest::IntoUrl>(url: U) -> Result<Self, Error> {
        Self::from_url_params(url, &GtfsReader::default())
    }

    #[cfg(feature = "read-url")]
    pub(crate) fn from_url_params<U: reqwest::IntoUrl>(
        url: U,
        params: &GtfsReader,
    ) -> Result<Self, Error> {
        let mut body = Vec::new();
        reqwest::blocking::get(url)?.read_to_end(&mut body)?;
        Self::from_reader_params(std::io::Cursor::new(body), params)
    }

    /// Reads a zipped feed from anything implementing [Read] and [Seek]
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, Error> {
        Self::from_reader_params(reader, &GtfsReader::default())
    }

    pub(crate) fn from_reader_params<R: Read + Seek>(
        reader: R,
        params: &GtfsReader,
    ) -> Result<Self, Error> {
        let started = Utc::now();
        let mut reader = std::io::BufReader::new(reader);
        let mut hasher = Sha256::new();
        std::io::copy(&mut reader, &mut hasher)?;
        let sha256 = format!("{:x}", hasher.finalize());

        let mut source = ArchiveSource::new(zip::ZipArchive::new(reader)?)?;
        let tables = Self::read_tables(&mut source, params, started);
        Ok(Self {
            files: source.files,
            sha256: Some(sha256),
            ..tables
        })
    }

    fn read_tables<S: TableSource>(
        source: &mut S,
        params: &GtfsReader,
        started: DateTime<Utc>,
    ) -> Self {
        let stop_times = if params.read_stop_times {
            source.mandatory_table("stop_times.txt")
        } else {
            Ok(Vec::new())
        };
        Self {
            agencies: source.mandatory_table("agency.txt"),
            calendar: source.table("calendar.txt"),
            calendar_dates: source.table("calendar_dates.txt"),
            routes: source.mandatory_table("routes.txt"),
            stops: source.mandatory_table("stops.txt"),
            trips: source.mandatory_table("trips.txt"),
            stop_times,
            files: Vec::new(),
            sha256: None,
            read_duration: Utc::now().signed_duration_since(started).num_milliseconds(),
        }
    }
}
