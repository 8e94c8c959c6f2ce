//! Parser contract and format registry.
//!
//! One parser per supported device format. Detection reads only a bounded
//! file prefix so that answering "can you handle this" never costs a full
//! scan of a multi-gigabyte video.

mod youqing;

use std::path::Path;

use crate::errors::TelemetryError;
use crate::track::TelemetryTrack;

pub use youqing::YouqingParser;

/// A dashcam telemetry parser for one device format family.
pub trait TelemetryParser: Sync {
    /// Human-readable name for this parser.
    fn name(&self) -> &'static str;

    /// Format identifiers this parser handles.
    fn formats(&self) -> &'static [&'static str];

    /// Whether this parser recognises the file.
    /// Must read only a bounded prefix; I/O failures mean "no".
    fn can_parse(&self, path: &Path) -> bool;

    /// Extract telemetry from the file.
    fn parse(&self, path: &Path) -> Result<TelemetryTrack, TelemetryError>;
}

/// Registered parsers. Order matters: first match wins.
pub static PARSERS: &[&dyn TelemetryParser] = &[&YouqingParser];

/// Returns the first registered parser that recognises the file.
pub fn get_parser(path: &Path) -> Result<&'static dyn TelemetryParser, TelemetryError> {
    PARSERS
        .iter()
        .copied()
        .find(|parser| parser.can_parse(path))
        .ok_or_else(|| TelemetryError::UnsupportedFormat(path.display().to_string()))
}

/// Extracts telemetry from a dashcam video file,
/// auto-detecting the format.
pub fn extract_telemetry(path: &Path) -> Result<TelemetryTrack, TelemetryError> {
    get_parser(path)?.parse(path)
}
