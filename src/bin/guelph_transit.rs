//! Reads a Guelph Transit GTFS feed and writes the normalized route, trip and stop tables.
use clap::Parser;
use guelph_transit_gtfs::{generate, output, Error, GtfsReader, GuelphTransit, ParserConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct GuelphTransitApp {
    /// GTFS zip archive or directory (or url with the read-url feature)
    input: String,
    /// Directory receiving the generated tables
    output_dir: PathBuf,
    /// Prepended to every generated file name
    prefix: Option<String>,
}

impl GuelphTransitApp {
    fn run(&self) -> Result<(), Error> {
        let gtfs = GtfsReader::default().read(&self.input)?;
        gtfs.print_stats();
        let tools = GuelphTransit::new(&gtfs, &ParserConfig::default());
        let spec = generate(&gtfs, &tools)?;
        output::write_spec(
            &spec,
            &self.output_dir,
            self.prefix.as_deref().unwrap_or_default(),
        )
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match GuelphTransitApp::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
