use crate::{Error, Gtfs, RawGtfs};
use std::path::Path;

/// Allows to parameterize how the parsing library behaves
///
/// ```no_run
///let gtfs = guelph_transit_gtfs::GtfsReader::default()
///    .without_stop_times()
///    .read("input/gtfs.zip")?;
///assert!(gtfs.trips.values().all(|t| t.stop_times.is_empty()));
/// # Ok::<(), guelph_transit_gtfs::Error>(())
///```
#[derive(Derivative)]
#[derivative(Default)]
pub struct GtfsReader {
    /// [crate::objects::StopTime] are very large and only needed to split and order trips.
    /// This allows to skip reading them when only routes and stops are wanted
    #[derivative(Default(value = "true"))]
    pub read_stop_times: bool,
}

impl GtfsReader {
    /// Configures the reader to not read the stop times
    ///
    /// Returns Self and can be chained
    pub fn without_stop_times(&mut self) -> &mut Self {
        self.read_stop_times = false;
        self
    }

    /// Reads from an url (if starts with `"http"`), or a local path
    /// (either a directory or zipped file)
    ///
    /// To read from an url, build with read-url feature
    pub fn read(&self, gtfs: &str) -> Result<Gtfs, Error> {
        RawGtfs::new_params(gtfs, self).and_then(Gtfs::try_from)
    }

    /// Reads the raw GTFS from a local zip archive or local directory
    pub fn raw_from_path<P>(&self, path: P) -> Result<RawGtfs, Error>
    where
        P: AsRef<Path>,
    {
        RawGtfs::from_path_params(path, self)
    }

    /// Reads the GTFS from a local zip archive or local directory
    pub fn from_path<P>(&self, path: P) -> Result<Gtfs, Error>
    where
        P: AsRef<Path>,
    {
        RawGtfs::from_path_params(path, self).and_then(Gtfs::try_from)
    }
}
