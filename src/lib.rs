//! Extract GPS and sensor telemetry embedded in dashcam MP4 containers
//! and convert it to standard geospatial interchange formats.
//! Does not and will not support any kind of video de/encoding.
//!
//! Telemetry records are located by scanning the raw container bytes for
//! vendor marker signatures rather than walking the atom tree, since the
//! devices in question write their GPS chunks as free-form atoms that are
//! frequently misaligned, truncated, or shifted by firmware bugs.
//!
//! ```rs
//! use dashgps::extract_telemetry;
//! use std::path::Path;
//!
//! fn main() -> Result<(), dashgps::TelemetryError> {
//!     let track = extract_telemetry(Path::new("VIDEO.MP4"))?;
//!
//!     for sample in track.iter() {
//!         println!("{:.6}, {:.6}", sample.latitude, sample.longitude);
//!     }
//!
//!     // Derived track queries for export consumers.
//!     println!("{:?}", track.duration());
//!     println!("{:?}", track.bounds());
//!
//!     Ok(())
//! }
//! ```

pub mod consts;
pub mod errors;
pub mod export;
pub mod nmea;
pub mod parser;
pub mod record;
pub mod scanner;
pub mod track;
pub mod tests;

pub use consts::{BRAND_YOUQING, GPS_MARKER, RECORD_LEN};
pub use errors::TelemetryError;
pub use parser::{extract_telemetry, get_parser, TelemetryParser, YouqingParser, PARSERS};
pub use record::{ChunkOutcome, RejectReason};
pub use scanner::{Candidate, ChunkScanner};
pub use track::{TelemetrySample, TelemetryTrack};
