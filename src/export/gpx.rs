//! GPX (GPS Exchange Format) exporter.
//!
//! GPX is the universal standard for GPS data interchange, supported by
//! Strava, Garmin, Komoot, and most mapping applications.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::errors::TelemetryError;
use crate::track::TelemetryTrack;

use super::{ensure_parent, format_utc, source_stem, xml_escape};

/// Exports a track as a single GPX 1.1 `<trk>`/`<trkseg>`.
///
/// Speed is converted km/h to m/s per the GPX convention and written,
/// together with course, as a point extension when present.
pub fn export_gpx(track: &TelemetryTrack, path: &Path) -> Result<(), TelemetryError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(TelemetryError::WriteFailure)?;
    let mut writer = BufWriter::new(file);
    write_gpx(track, &mut writer).map_err(TelemetryError::WriteFailure)?;
    writer.flush().map_err(TelemetryError::WriteFailure)
}

fn write_gpx<W: Write>(track: &TelemetryTrack, w: &mut W) -> io::Result<()> {
    let creator = track
        .device_info()
        .get("format")
        .map(String::as_str)
        .unwrap_or("dashgps");

    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<gpx version="1.1" creator="{}" xmlns="http://www.topografix.com/GPX/1/1">"#,
        xml_escape(creator)
    )?;
    writeln!(w, "  <metadata>")?;
    writeln!(
        w,
        "    <name>{}</name>",
        xml_escape(&source_stem(track, "Dashcam Track"))
    )?;
    writeln!(
        w,
        "    <desc>GPS track extracted from dashcam video</desc>"
    )?;
    writeln!(w, "  </metadata>")?;
    writeln!(w, "  <trk>")?;
    writeln!(w, "    <trkseg>")?;

    for sample in track.iter() {
        writeln!(
            w,
            r#"      <trkpt lat="{}" lon="{}">"#,
            sample.latitude, sample.longitude
        )?;
        if let Some(altitude) = sample.altitude {
            writeln!(w, "        <ele>{altitude}</ele>")?;
        }
        if let Some(timestamp) = sample.timestamp {
            writeln!(w, "        <time>{}</time>", format_utc(&timestamp))?;
        }
        if sample.speed > 0.0 || sample.heading > 0.0 {
            writeln!(w, "        <extensions>")?;
            if sample.speed > 0.0 {
                writeln!(w, "          <speed>{}</speed>", sample.speed / 3.6)?;
            }
            if sample.heading > 0.0 {
                writeln!(w, "          <course>{}</course>", sample.heading)?;
            }
            writeln!(w, "        </extensions>")?;
        }
        writeln!(w, "      </trkpt>")?;
    }

    writeln!(w, "    </trkseg>")?;
    writeln!(w, "  </trk>")?;
    writeln!(w, "</gpx>")
}
