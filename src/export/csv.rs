//! CSV exporter.
//!
//! Fixed column set, compatible with spreadsheet tools and data-science
//! workflows. Absent optional fields render as empty cells.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::errors::TelemetryError;
use crate::track::TelemetryTrack;

use super::{ensure_parent, format_utc};

const CSV_COLUMNS: &str = "timestamp,latitude,longitude,altitude,speed_kmh,heading,fix_quality,satellites,gsensor_x,gsensor_y,gsensor_z";

/// Exports a track as CSV, one row per sample.
pub fn export_csv(track: &TelemetryTrack, path: &Path) -> Result<(), TelemetryError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(TelemetryError::WriteFailure)?;
    let mut writer = BufWriter::new(file);
    write_csv(track, &mut writer).map_err(TelemetryError::WriteFailure)?;
    writer.flush().map_err(TelemetryError::WriteFailure)
}

fn write_csv<W: Write>(track: &TelemetryTrack, w: &mut W) -> io::Result<()> {
    writeln!(w, "{CSV_COLUMNS}")?;
    for sample in track.iter() {
        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{},{},{}",
            sample.timestamp.map(|t| format_utc(&t)).unwrap_or_default(),
            sample.latitude,
            sample.longitude,
            opt(sample.altitude),
            sample.speed,
            sample.heading,
            sample.fix_quality,
            sample.satellites,
            opt(sample.accel_x),
            opt(sample.accel_y),
            opt(sample.accel_z),
        )?;
    }
    Ok(())
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
