//! Interchange-format writers over the track read contract.
//!
//! All exporters are pure consumers of [`TelemetryTrack`]: iteration in
//! order plus the derived duration/bounds queries. None of them touch
//! the parse pipeline.

mod csv;
mod geojson;
mod gpx;
mod kml;

use std::fs;
use std::path::Path;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::errors::TelemetryError;
use crate::track::TelemetryTrack;

pub use csv::export_csv;
pub use geojson::export_geojson;
pub use gpx::export_gpx;
pub use kml::export_kml;

/// ISO 8601 / RFC 3339 with the trailing `Z`; all timestamps are UTC.
const UTC_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Formats a sample timestamp for export output.
pub(crate) fn format_utc(timestamp: &PrimitiveDateTime) -> String {
    timestamp.format(UTC_FORMAT).unwrap_or_default()
}

/// File stem of the track's source video, or `fallback` when
/// the track carries no source.
pub(crate) fn source_stem<'a>(track: &'a TelemetryTrack, fallback: &'a str) -> String {
    match Path::new(track.source()).file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => fallback.to_owned(),
    }
}

/// Minimal XML text/attribute escaping for the hand-written writers.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Creates the output file's parent directories if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), TelemetryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(TelemetryError::WriteFailure)?;
        }
    }
    Ok(())
}
