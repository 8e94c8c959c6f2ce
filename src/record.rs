//! Decoding of a single candidate window into a telemetry sample.
//!
//! Record layout (little-endian, byte offsets from window start):
//!
//! ```ignore
//! [0:4]     'free' - MP4 atom type
//! [4:8]     'GPS ' - GPS marker
//! [8:12]    payload size (u32)
//! [12:22]   'YOUQINGGPS' - brand identifier
//! [22:36]   padding / unknown
//! [36:40]   latitude (f32, NMEA DDMM.MMMM)
//! [40:44]   longitude (f32, NMEA DDDMM.MMMM)
//! [44:48]   year (u32, two-digit offset from 2000 OR full four digits)
//! [48:52]   hour (u32, may exceed 23 on some encoders)
//! [52:56]   minute (u32)
//! [56:60]   day (u32)
//! [60:64]   month (u32)
//! [64:68]   second (u32)
//! [68:71]   status (ASCII: A=Active, N/S, E/W)
//! [108:112] speed (f32, km/h, optional)
//! ```

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::consts::{MAX_SPEED_KMH, MIN_RECORD_LEN, SPEED_OFFSET};
use crate::nmea::nmea_to_decimal;
use crate::track::TelemetrySample;

/// Outcome of decoding one candidate window.
///
/// Rejection is per-candidate and silent: the caller skips the window
/// and the scan continues, so a corrupt record anywhere in a
/// multi-gigabyte file never aborts extraction of the rest.
#[derive(Debug)]
pub enum ChunkOutcome {
    /// Candidate decoded into a sample.
    Sample(TelemetrySample),
    /// Candidate failed validation and is skipped.
    Rejected(RejectReason),
}

/// Why a candidate window was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Window shorter than the minimum required field set.
    Truncated(usize),
    /// Zero NMEA coordinate, the encoder's "no data" sentinel.
    NoFix,
    /// Field extraction failed.
    FieldRead,
}

/// Fixed-layout record body, bytes `[36:71)` of the window.
#[derive(Debug, BinRead)]
#[br(little)]
struct RawRecord {
    #[br(pad_before = 36)]
    lat_nmea: f32,
    lon_nmea: f32,
    year: u32,
    hour: u32,
    minute: u32,
    day: u32,
    month: u32,
    second: u32,
    /// Fix status, latitude hemisphere, longitude hemisphere.
    status: [u8; 3],
}

impl RawRecord {
    /// Calendar timestamp from the six integer fields.
    ///
    /// The year field is ambiguous in the wild: some encoders store an
    /// offset from 2000, others the full four-digit year. Values below
    /// 100 are taken as offsets. Hours are normalised modulo 24 since
    /// some devices report 24+.
    ///
    /// Returns `None` when the components do not form a real calendar
    /// date/time; the sample's coordinates and speed remain usable.
    fn timestamp(&self) -> Option<PrimitiveDateTime> {
        let year = match self.year < 100 {
            true => 2000 + self.year,
            false => self.year,
        };
        let date = Date::from_calendar_date(
            i32::try_from(year).ok()?,
            Month::try_from(u8::try_from(self.month).ok()?).ok()?,
            u8::try_from(self.day).ok()?,
        )
        .ok()?;
        let time = Time::from_hms(
            (self.hour % 24) as u8,
            u8::try_from(self.minute).ok()?,
            u8::try_from(self.second).ok()?,
        )
        .ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }
}

/// Decodes a candidate window into a telemetry sample, or rejects it.
///
/// Altitude, satellite count, and accelerometer axes are not present
/// in this record layout and are left absent.
pub fn decode(chunk: &[u8]) -> ChunkOutcome {
    if chunk.len() < MIN_RECORD_LEN {
        return ChunkOutcome::Rejected(RejectReason::Truncated(chunk.len()));
    }

    let mut cursor = Cursor::new(chunk);
    let raw = match RawRecord::read(&mut cursor) {
        Ok(raw) => raw,
        Err(_) => return ChunkOutcome::Rejected(RejectReason::FieldRead),
    };

    // Zero coordinates mean the receiver had no data at all.
    if raw.lat_nmea == 0.0 || raw.lon_nmea == 0.0 {
        return ChunkOutcome::Rejected(RejectReason::NoFix);
    }

    let mut latitude = nmea_to_decimal(raw.lat_nmea as f64);
    let mut longitude = nmea_to_decimal(raw.lon_nmea as f64);

    // Hemisphere indicators; anything but S/W reads as positive.
    if raw.status[1] == b'S' {
        latitude = -latitude;
    }
    if raw.status[2] == b'W' {
        longitude = -longitude;
    }

    // Speed is optional trailing data. Out-of-range values (including
    // NaN) are treated as absent rather than rejecting the sample.
    let speed = match chunk.len() >= SPEED_OFFSET + 4 {
        true => {
            cursor.set_position(SPEED_OFFSET as u64);
            match cursor.read_le::<f32>() {
                Ok(raw_speed) if (0.0..MAX_SPEED_KMH).contains(&(raw_speed as f64)) => {
                    raw_speed as f64
                }
                _ => 0.0,
            }
        }
        false => 0.0,
    };

    ChunkOutcome::Sample(TelemetrySample {
        latitude,
        longitude,
        timestamp: raw.timestamp(),
        speed,
        // Not available in this record layout.
        heading: 0.0,
        altitude: None,
        fix_quality: u8::from(raw.status[0] == b'A'),
        satellites: 0,
        accel_x: None,
        accel_y: None,
        accel_z: None,
    })
}
