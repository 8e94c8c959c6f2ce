//! GeoJSON exporter.
//!
//! GeoJSON is ideal for web mapping (Leaflet, Mapbox, OpenLayers) and can
//! be imported directly into PostGIS. The output holds one `LineString`
//! feature for the route plus one `Point` feature per sample.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::errors::TelemetryError;
use crate::track::TelemetryTrack;

use super::{ensure_parent, format_utc, source_stem};

/// Exports a track as a GeoJSON `FeatureCollection`.
pub fn export_geojson(track: &TelemetryTrack, path: &Path) -> Result<(), TelemetryError> {
    ensure_parent(path)?;

    let mut features: Vec<Value> = Vec::new();

    if !track.is_empty() {
        features.push(route_feature(track));
    }

    for (index, sample) in track.iter().enumerate() {
        let mut properties = Map::new();
        properties.insert("type".to_owned(), json!("point"));
        properties.insert("index".to_owned(), json!(index));
        properties.insert("speed_kmh".to_owned(), json!(sample.speed));
        properties.insert("heading".to_owned(), json!(sample.heading));
        properties.insert("fix_quality".to_owned(), json!(sample.fix_quality));
        if let Some(timestamp) = sample.timestamp {
            properties.insert("timestamp".to_owned(), json!(format_utc(&timestamp)));
        }
        if let Some(altitude) = sample.altitude {
            properties.insert("altitude_m".to_owned(), json!(altitude));
        }
        if sample.accel_x.is_some() {
            properties.insert(
                "gsensor".to_owned(),
                json!({
                    "x": sample.accel_x,
                    "y": sample.accel_y,
                    "z": sample.accel_z,
                }),
            );
        }

        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [sample.longitude, sample.latitude],
            },
            "properties": properties,
        }));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    let file = File::create(path).map_err(TelemetryError::WriteFailure)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &collection)
        .map_err(|err| TelemetryError::WriteFailure(err.into()))?;
    writer.flush().map_err(TelemetryError::WriteFailure)
}

/// The route `LineString` with track-level properties.
fn route_feature(track: &TelemetryTrack) -> Value {
    let coordinates: Vec<Value> = track
        .iter()
        .map(|sample| json!([sample.longitude, sample.latitude]))
        .collect();

    let mut properties = Map::new();
    properties.insert("type".to_owned(), json!("route"));
    properties.insert("name".to_owned(), json!(source_stem(track, "track")));
    properties.insert("point_count".to_owned(), json!(track.len()));
    if let Some(duration) = track.duration() {
        properties.insert(
            "duration_seconds".to_owned(),
            json!(duration.as_seconds_f64()),
        );
    }
    if let Some((min_lat, min_lon, max_lat, max_lon)) = track.bounds() {
        properties.insert(
            "bounds".to_owned(),
            json!({
                "min_lat": min_lat,
                "min_lon": min_lon,
                "max_lat": max_lat,
                "max_lon": max_lon,
            }),
        );
    }
    if !track.device_info().is_empty() {
        properties.insert("device".to_owned(), json!(track.device_info()));
    }

    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
        "properties": properties,
    })
}
