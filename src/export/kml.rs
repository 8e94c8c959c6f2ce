//! KML (Keyhole Markup Language) exporter for Google Earth.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::errors::TelemetryError;
use crate::track::{TelemetrySample, TelemetryTrack};

use super::{ensure_parent, format_utc, source_stem, xml_escape};

const ICON_START: &str = "http://maps.google.com/mapfiles/kml/paddle/grn-circle.png";
const ICON_END: &str = "http://maps.google.com/mapfiles/kml/paddle/red-circle.png";

/// Exports a track as a KML document: the route as a styled
/// `LineString` plus Start/End placemarks.
pub fn export_kml(track: &TelemetryTrack, path: &Path) -> Result<(), TelemetryError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(TelemetryError::WriteFailure)?;
    let mut writer = BufWriter::new(file);
    write_kml(track, &mut writer).map_err(TelemetryError::WriteFailure)?;
    writer.flush().map_err(TelemetryError::WriteFailure)
}

fn write_kml<W: Write>(track: &TelemetryTrack, w: &mut W) -> io::Result<()> {
    let name = xml_escape(&source_stem(track, "Dashcam Track"));

    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(w, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(w, "  <Document>")?;
    writeln!(w, "    <name>{name}</name>")?;
    writeln!(w, "    <Folder>")?;
    writeln!(w, "      <name>{name}</name>")?;

    if !track.is_empty() {
        write_route(track, w)?;
        write_endpoint(w, "Start", track.first(), ICON_START)?;
        write_endpoint(w, "End", track.last(), ICON_END)?;
    }

    writeln!(w, "    </Folder>")?;
    writeln!(w, "  </Document>")?;
    writeln!(w, "</kml>")
}

fn write_route<W: Write>(track: &TelemetryTrack, w: &mut W) -> io::Result<()> {
    // Clamp to ground unless the format actually provided altitudes.
    let altitude_mode = match track.iter().any(|s| s.altitude.is_some()) {
        true => "absolute",
        false => "clampToGround",
    };

    writeln!(w, "      <Placemark>")?;
    writeln!(w, "        <name>Route</name>")?;
    writeln!(
        w,
        "        <description>GPS track with {} points</description>",
        track.len()
    )?;
    writeln!(w, "        <Style>")?;
    writeln!(w, "          <LineStyle>")?;
    // KML colors are aabbggrr; solid red.
    writeln!(w, "            <color>ff0000ff</color>")?;
    writeln!(w, "            <width>3</width>")?;
    writeln!(w, "          </LineStyle>")?;
    writeln!(w, "        </Style>")?;
    writeln!(w, "        <LineString>")?;
    writeln!(w, "          <altitudeMode>{altitude_mode}</altitudeMode>")?;
    write!(w, "          <coordinates>")?;
    for (i, sample) in track.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        write!(
            w,
            "{},{},{}",
            sample.longitude,
            sample.latitude,
            sample.altitude.unwrap_or(0.0)
        )?;
    }
    writeln!(w, "</coordinates>")?;
    writeln!(w, "        </LineString>")?;
    writeln!(w, "      </Placemark>")
}

fn write_endpoint<W: Write>(
    w: &mut W,
    name: &str,
    sample: Option<&TelemetrySample>,
    icon: &str,
) -> io::Result<()> {
    let Some(sample) = sample else {
        return Ok(());
    };
    writeln!(w, "      <Placemark>")?;
    writeln!(w, "        <name>{name}</name>")?;
    if let Some(timestamp) = sample.timestamp {
        writeln!(
            w,
            "        <description>{name}: {}</description>",
            format_utc(&timestamp)
        )?;
    }
    writeln!(w, "        <Style>")?;
    writeln!(w, "          <IconStyle>")?;
    writeln!(w, "            <Icon><href>{icon}</href></Icon>")?;
    writeln!(w, "          </IconStyle>")?;
    writeln!(w, "        </Style>")?;
    writeln!(w, "        <Point>")?;
    writeln!(
        w,
        "          <coordinates>{},{}</coordinates>",
        sample.longitude, sample.latitude
    )?;
    writeln!(w, "        </Point>")?;
    writeln!(w, "      </Placemark>")
}
