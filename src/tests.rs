#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use time::macros::datetime;
    use time::Duration;

    use crate::consts::{BRAND_YOUQING, GPS_MARKER, RECORD_LEN};
    use crate::export::{export_csv, export_geojson, export_gpx, export_kml};
    use crate::nmea::{decimal_to_nmea, nmea_to_decimal};
    use crate::parser::{extract_telemetry, get_parser, TelemetryParser, YouqingParser};
    use crate::record::{decode, ChunkOutcome, RejectReason};
    use crate::scanner::ChunkScanner;
    use crate::track::{TelemetrySample, TelemetryTrack};

    /// Builds a full 256-byte record window with the given field values.
    /// `date` is `(year, month, day)`, `clock` is `(hour, minute, second)`.
    fn record_bytes(
        lat_nmea: f32,
        lon_nmea: f32,
        date: (u32, u32, u32),
        clock: (u32, u32, u32),
        status: &[u8; 3],
        speed: Option<f32>,
    ) -> Vec<u8> {
        let mut buf = vec![0_u8; RECORD_LEN];
        buf[0..8].copy_from_slice(GPS_MARKER);
        buf[8..12].copy_from_slice(&248_u32.to_le_bytes());
        buf[12..22].copy_from_slice(BRAND_YOUQING);
        buf[36..40].copy_from_slice(&lat_nmea.to_le_bytes());
        buf[40..44].copy_from_slice(&lon_nmea.to_le_bytes());
        buf[44..48].copy_from_slice(&date.0.to_le_bytes());
        buf[48..52].copy_from_slice(&clock.0.to_le_bytes());
        buf[52..56].copy_from_slice(&clock.1.to_le_bytes());
        buf[56..60].copy_from_slice(&date.2.to_le_bytes());
        buf[60..64].copy_from_slice(&date.1.to_le_bytes());
        buf[64..68].copy_from_slice(&clock.2.to_le_bytes());
        buf[68..71].copy_from_slice(status);
        if let Some(v) = speed {
            buf[108..112].copy_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Southern-hemisphere latitude, eastern longitude, active fix,
    /// 2024-04-20 14:24:12, 45.5 km/h.
    fn sample_record() -> Vec<u8> {
        record_bytes(
            3840.7339,
            7716.2932,
            (24, 4, 20),
            (14, 24, 12),
            b"ASE",
            Some(45.5),
        )
    }

    fn expect_sample(outcome: ChunkOutcome) -> TelemetrySample {
        match outcome {
            ChunkOutcome::Sample(sample) => sample,
            ChunkOutcome::Rejected(reason) => panic!("unexpected rejection: {reason:?}"),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dashgps-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, content: &[u8]) -> PathBuf {
        let path = temp_path(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    // --- NMEA codec ---

    #[test]
    fn nmea_decode_latitude() {
        assert!((nmea_to_decimal(3840.7339) - 38.678898).abs() < 1e-5);
    }

    #[test]
    fn nmea_decode_longitude() {
        assert!((nmea_to_decimal(7716.2932) - 77.271553).abs() < 1e-5);
    }

    #[test]
    fn nmea_round_trip() {
        for degrees in [
            -179.99, -90.0, -38.678898, -0.5, 0.25, 38.678898, 77.271553, 179.99,
        ] {
            let recovered = nmea_to_decimal(decimal_to_nmea(degrees));
            assert!(
                (recovered - degrees).abs() < 1e-9,
                "{degrees} -> {recovered}"
            );
        }
    }

    // --- Record decoder ---

    #[test]
    fn decoder_rejects_short_candidate() {
        let buf = sample_record();
        assert!(matches!(
            decode(&buf[..70]),
            ChunkOutcome::Rejected(RejectReason::Truncated(70))
        ));
        assert!(matches!(
            decode(&[]),
            ChunkOutcome::Rejected(RejectReason::Truncated(0))
        ));
    }

    #[test]
    fn decoder_accepts_minimum_length() {
        let buf = sample_record();
        let sample = expect_sample(decode(&buf[..71]));
        // Too short to carry the speed field.
        assert_eq!(sample.speed, 0.0);
        assert_eq!(sample.fix_quality, 1);
    }

    #[test]
    fn decoder_rejects_zero_coordinates() {
        let zero_lat = record_bytes(0.0, 7716.2932, (24, 4, 20), (14, 24, 12), b"ASE", None);
        assert!(matches!(
            decode(&zero_lat),
            ChunkOutcome::Rejected(RejectReason::NoFix)
        ));

        let zero_lon = record_bytes(3840.7339, 0.0, (24, 4, 20), (14, 24, 12), b"ASE", None);
        assert!(matches!(
            decode(&zero_lon),
            ChunkOutcome::Rejected(RejectReason::NoFix)
        ));
    }

    #[test]
    fn decoder_applies_hemisphere_signs() {
        let sample = expect_sample(decode(&sample_record()));
        assert!((sample.latitude + 38.678898).abs() < 1e-4);
        assert!((sample.longitude - 77.271553).abs() < 1e-4);
    }

    #[test]
    fn decoder_north_west_hemispheres() {
        let buf = record_bytes(
            3840.7339,
            7716.2932,
            (24, 4, 20),
            (14, 24, 12),
            b"ANW",
            None,
        );
        let sample = expect_sample(decode(&buf));
        assert!((sample.latitude - 38.678898).abs() < 1e-4);
        assert!((sample.longitude + 77.271553).abs() < 1e-4);
    }

    #[test]
    fn decoder_two_digit_year() {
        let sample = expect_sample(decode(&sample_record()));
        assert_eq!(sample.timestamp, Some(datetime!(2024-04-20 14:24:12)));
    }

    #[test]
    fn decoder_four_digit_year() {
        let buf = record_bytes(
            3840.7339,
            7716.2932,
            (2024, 4, 20),
            (14, 24, 12),
            b"ASE",
            None,
        );
        let sample = expect_sample(decode(&buf));
        assert_eq!(sample.timestamp, Some(datetime!(2024-04-20 14:24:12)));
    }

    #[test]
    fn decoder_normalises_hour_overflow() {
        let buf = record_bytes(
            3840.7339,
            7716.2932,
            (24, 4, 20),
            (25, 24, 12),
            b"ASE",
            None,
        );
        let sample = expect_sample(decode(&buf));
        assert_eq!(sample.timestamp, Some(datetime!(2024-04-20 01:24:12)));
    }

    #[test]
    fn decoder_keeps_sample_on_invalid_date() {
        let buf = record_bytes(
            3840.7339,
            7716.2932,
            (24, 13, 20),
            (14, 24, 12),
            b"ASE",
            None,
        );
        let sample = expect_sample(decode(&buf));
        assert!(sample.timestamp.is_none());
        assert!((sample.latitude + 38.678898).abs() < 1e-4);
        assert!((sample.longitude - 77.271553).abs() < 1e-4);
    }

    #[test]
    fn decoder_fix_quality_from_status() {
        let buf = record_bytes(
            3840.7339,
            7716.2932,
            (24, 4, 20),
            (14, 24, 12),
            b"VSE",
            None,
        );
        let sample = expect_sample(decode(&buf));
        assert_eq!(sample.fix_quality, 0);
        assert!(!sample.is_valid());
    }

    #[test]
    fn decoder_speed_within_range() {
        let sample = expect_sample(decode(&sample_record()));
        assert!((sample.speed - 45.5).abs() < 1e-4);
    }

    #[test]
    fn decoder_speed_out_of_range_is_absent() {
        for bad in [812.0_f32, -3.0, f32::NAN] {
            let buf = record_bytes(
                3840.7339,
                7716.2932,
                (24, 4, 20),
                (14, 24, 12),
                b"ASE",
                Some(bad),
            );
            let sample = expect_sample(decode(&buf));
            assert_eq!(sample.speed, 0.0, "speed {bad} should read as absent");
        }
    }

    #[test]
    fn decoder_layout_absent_fields() {
        let sample = expect_sample(decode(&sample_record()));
        assert_eq!(sample.heading, 0.0);
        assert!(sample.altitude.is_none());
        assert_eq!(sample.satellites, 0);
        assert!(sample.accel_x.is_none());
        assert!(sample.accel_y.is_none());
        assert!(sample.accel_z.is_none());
    }

    // --- Chunk scanner ---

    #[test]
    fn scanner_empty_and_marker_free_buffers() {
        assert_eq!(ChunkScanner::new(&[]).count(), 0);
        let noise = vec![0xab_u8; 4096];
        assert_eq!(ChunkScanner::new(&noise).count(), 0);
    }

    #[test]
    fn scanner_yields_candidate_at_marker() {
        let mut buf = vec![0_u8; 64];
        buf.extend_from_slice(&sample_record());
        buf.extend(std::iter::repeat(0_u8).take(64));

        let candidates: Vec<_> = ChunkScanner::new(&buf).collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].offset, 64);
        assert_eq!(candidates[0].data.len(), RECORD_LEN);
    }

    #[test]
    fn scanner_short_window_at_end_of_buffer() {
        let record = sample_record();
        let buf = &record[..100];

        let candidates: Vec<_> = ChunkScanner::new(buf).collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].data.len(), 100);
    }

    #[test]
    fn scanner_skips_wrong_brand() {
        let mut buf = sample_record();
        buf[12..22].copy_from_slice(b"SOMEOTHERX");
        assert_eq!(ChunkScanner::new(&buf).count(), 0);
    }

    #[test]
    fn scanner_resyncs_after_false_positive() {
        // Two marker matches 8 bytes apart: the first one's brand bytes
        // are the second marker's tail so its check fails, the second is
        // genuine. The resync stride must re-examine offset 8.
        let mut buf = vec![0_u8; 8 + RECORD_LEN];
        buf[0..8].copy_from_slice(GPS_MARKER);
        buf[8..].copy_from_slice(&sample_record());

        let offsets: Vec<usize> = ChunkScanner::new(&buf).map(|c| c.offset).collect();
        assert_eq!(offsets, vec![8]);
    }

    #[test]
    fn scanner_finds_overlapping_records() {
        // Second marker only 24 bytes after the first: both windows
        // overlap, both must be yielded in ascending offset order.
        let record = sample_record();
        let mut buf = vec![0_u8; 24 + RECORD_LEN];
        buf[..24].copy_from_slice(&record[..24]);
        buf[24..].copy_from_slice(&record);

        let offsets: Vec<usize> = ChunkScanner::new(&buf).map(|c| c.offset).collect();
        assert_eq!(offsets, vec![0, 24]);
    }

    // --- Format detection ---

    #[test]
    fn detector_accepts_marker_in_prefix() {
        let mut content = vec![0_u8; 512];
        content.extend_from_slice(&sample_record());
        let path = write_temp("detect-ok.mp4", &content);
        assert!(YouqingParser.can_parse(&path));
        assert!(get_parser(&path).is_ok());
    }

    #[test]
    fn detector_rejects_marker_free_file() {
        let path = write_temp("detect-none.mp4", &[0x11_u8; 2048]);
        assert!(!YouqingParser.can_parse(&path));
        assert!(get_parser(&path).is_err());
    }

    #[test]
    fn detector_rejects_unreadable_file() {
        assert!(!YouqingParser.can_parse(Path::new("/nonexistent/nope.mp4")));
    }

    // --- Full pipeline ---

    #[test]
    fn end_to_end_single_record() {
        let mut content = vec![0_u8; 128];
        content.extend_from_slice(&sample_record());
        content.extend(std::iter::repeat(0_u8).take(256));
        let path = write_temp("e2e.mp4", &content);

        let track = extract_telemetry(&path).unwrap();
        assert_eq!(track.len(), 1);

        let sample = track.first().unwrap();
        assert_eq!(sample.fix_quality, 1);
        assert!((sample.latitude + 38.678898).abs() < 1e-4);
        assert!((sample.longitude - 77.271553).abs() < 1e-4);
        assert!((sample.speed - 45.5).abs() < 1e-4);
        assert_eq!(sample.heading, 0.0);
        assert!(sample.is_valid());

        assert_eq!(
            track.device_info().get("format").map(String::as_str),
            Some("YOUQINGGPS")
        );
        assert_eq!(track.source(), path.display().to_string());
    }

    #[test]
    fn parse_marker_free_buffer_yields_empty_track() {
        let path = write_temp("no-marker.mp4", &[0x22_u8; 1024]);
        let track = YouqingParser.parse(&path).unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn assembler_keeps_scan_order() {
        let first = record_bytes(
            3840.7339,
            7716.2932,
            (24, 4, 20),
            (14, 24, 12),
            b"ASE",
            None,
        );
        let second = record_bytes(3841.0, 7716.5, (24, 4, 20), (14, 24, 13), b"ASE", None);
        let mut content = first;
        content.extend_from_slice(&second);
        let path = write_temp("order.mp4", &content);

        let track = extract_telemetry(&path).unwrap();
        assert_eq!(track.len(), 2);
        assert!(track.get(0).unwrap().timestamp < track.get(1).unwrap().timestamp);
        assert_eq!(track.duration(), Some(Duration::seconds(1)));
    }

    #[test]
    fn corrupt_record_does_not_abort_scan() {
        let mut corrupt = sample_record();
        corrupt[36..44].fill(0); // zeroed coordinates, rejected
        let mut content = corrupt;
        content.extend_from_slice(&sample_record());
        let path = write_temp("corrupt.mp4", &content);

        let track = extract_telemetry(&path).unwrap();
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn missing_file_is_read_failure() {
        let err = YouqingParser
            .parse(Path::new("/nonexistent/nope.mp4"))
            .unwrap_err();
        assert!(matches!(err, crate::TelemetryError::ReadFailure(_)));
    }

    // --- Data model ---

    #[test]
    fn sample_validity_bounds() {
        assert!(TelemetrySample::new(38.678898, -77.271553).is_valid());
        assert!(!TelemetrySample::new(100.0, 0.0).is_valid());
        assert!(!TelemetrySample::new(0.0, 200.0).is_valid());

        let no_fix = TelemetrySample {
            fix_quality: 0,
            ..TelemetrySample::new(38.0, -77.0)
        };
        assert!(!no_fix.is_valid());
    }

    #[test]
    fn track_empty_queries() {
        let track = TelemetryTrack::default();
        assert_eq!(track.len(), 0);
        assert!(track.is_empty());
        assert!(track.duration().is_none());
        assert!(track.bounds().is_none());
        assert!(track.first().is_none());
    }

    #[test]
    fn track_duration_and_bounds() {
        let track = demo_track();
        assert_eq!(track.duration(), Some(Duration::seconds(2)));

        let (min_lat, min_lon, max_lat, max_lon) = track.bounds().unwrap();
        assert_eq!(min_lat, 38.678898);
        assert_eq!(max_lat, 38.679000);
        assert_eq!(min_lon, -77.271650);
        assert_eq!(max_lon, -77.271553);
    }

    #[test]
    fn track_filter_valid_returns_new_track() {
        let samples = vec![
            TelemetrySample::new(38.0, -77.0),
            TelemetrySample {
                fix_quality: 0,
                ..TelemetrySample::new(0.0, 0.0)
            },
            TelemetrySample::new(39.0, -78.0),
        ];
        let track = TelemetryTrack::new(samples, "drive.mp4", BTreeMap::new());

        let filtered = track.filter_valid();
        assert_eq!(filtered.len(), 2);
        // Original is untouched.
        assert_eq!(track.len(), 3);
        assert_eq!(filtered.source(), track.source());
    }

    // --- Exporters ---

    fn demo_track() -> TelemetryTrack {
        let samples = vec![
            TelemetrySample {
                timestamp: Some(datetime!(2024-04-20 14:24:12)),
                speed: 45.5,
                ..TelemetrySample::new(38.678898, -77.271553)
            },
            TelemetrySample {
                timestamp: Some(datetime!(2024-04-20 14:24:13)),
                speed: 46.1,
                ..TelemetrySample::new(38.678950, -77.271650)
            },
            TelemetrySample {
                timestamp: Some(datetime!(2024-04-20 14:24:14)),
                speed: 44.9,
                ..TelemetrySample::new(38.679000, -77.271600)
            },
        ];
        TelemetryTrack::new(
            samples,
            "/videos/drive.mp4",
            BTreeMap::from([("format".to_owned(), "YOUQINGGPS".to_owned())]),
        )
    }

    #[test]
    fn gpx_export_shape() {
        let path = temp_path("out.gpx");
        export_gpx(&demo_track(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"<gpx version="1.1" creator="YOUQINGGPS""#));
        assert!(text.contains("<name>drive</name>"));
        assert_eq!(text.matches("<trkpt").count(), 3);
        assert!(text.contains("<time>2024-04-20T14:24:12Z</time>"));
        // 45.5 km/h -> m/s
        assert!(text.contains("<speed>12.638"));
    }

    #[test]
    fn geojson_export_shape() {
        let path = temp_path("out.geojson");
        export_geojson(&demo_track(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["type"], "FeatureCollection");

        let features = value["features"].as_array().unwrap();
        // Route LineString plus one Point per sample.
        assert_eq!(features.len(), 4);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        assert_eq!(features[0]["properties"]["point_count"], 3);
        assert_eq!(features[0]["properties"]["device"]["format"], "YOUQINGGPS");
        assert_eq!(features[1]["geometry"]["type"], "Point");
        assert_eq!(features[1]["properties"]["speed_kmh"], 45.5);
        assert_eq!(features[1]["properties"]["timestamp"], "2024-04-20T14:24:12Z");
    }

    #[test]
    fn kml_export_shape() {
        let path = temp_path("out.kml");
        export_kml(&demo_track(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#));
        assert!(text.contains("<name>drive</name>"));
        assert!(text.contains("<name>Route</name>"));
        assert!(text.contains("<name>Start</name>"));
        assert!(text.contains("<name>End</name>"));
        assert!(text.contains("<color>ff0000ff</color>"));
        // No altitudes in the track.
        assert!(text.contains("<altitudeMode>clampToGround</altitudeMode>"));
    }

    #[test]
    fn csv_export_shape() {
        let path = temp_path("out.csv");
        export_csv(&demo_track(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("timestamp,latitude,longitude"));
        assert!(lines[1].starts_with("2024-04-20T14:24:12Z,38.678898,-77.271553,"));
        // Absent optionals render as empty trailing cells.
        assert!(lines[1].ends_with(",,,"));
    }
}
