/*! Converts the Guelph Transit [GTFS](https://gtfs.org/) feed into normalized tables

The feed is read with [Gtfs] (or [RawGtfs] for the bare csv content), then walked by
[generate] through the agency rules of [GuelphTransit]: stable integer ids for routes and
stops, cleaned labels, colours, and trips grouped by direction.

```no_run
use guelph_transit_gtfs::{generate, output, Gtfs, GuelphTransit, ParserConfig};

let gtfs = Gtfs::new("fixtures/guelph")?;
let tools = GuelphTransit::new(&gtfs, &ParserConfig::default());
let spec = generate(&gtfs, &tools)?;
output::write_spec(&spec, "out", "")?;
# Ok::<(), guelph_transit_gtfs::Error>(())
```
*/
#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

pub mod agency_tools;
pub mod clean;
pub mod colors;
mod error;
mod gtfs;
mod gtfs_reader;
pub mod guelph;
pub mod headsign;
pub mod ids;
pub mod model;
pub mod names;
pub mod objects;
pub mod output;
pub mod parser;
mod raw_gtfs;
pub mod route_trips;
mod serde_helpers;
pub mod service;
pub mod trip_spec;


pub use agency_tools::AgencyTools;
pub use error::Error;
pub use gtfs::Gtfs;
pub use gtfs_reader::GtfsReader;
pub use guelph::GuelphTransit;
pub use model::{Direction, Headsign, MRoute, MSpec, MStop, MTrip, MTripStop};
pub use objects::*;
pub use parser::{generate, ParserConfig};
pub use raw_gtfs::RawGtfs;
pub use trip_spec::RouteTripSpec;
