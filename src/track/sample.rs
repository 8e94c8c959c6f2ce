//! A single decoded telemetry sample.

use time::PrimitiveDateTime;

/// One decoded instant of position/motion/sensor data.
///
/// Samples are created by the record decoder and never mutated after
/// creation. Fields a given record layout does not carry keep their
/// defaults (`None` for the optionals, 0 otherwise); "unknown" heading
/// is indistinguishable from 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Decimal degrees, signed, south negative.
    pub latitude: f64,
    /// Decimal degrees, signed, west negative.
    pub longitude: f64,
    /// UTC, second precision.
    pub timestamp: Option<PrimitiveDateTime>,
    /// km/h, non-negative.
    pub speed: f64,
    /// Degrees from north, 0-360.
    pub heading: f64,
    /// Meters.
    pub altitude: Option<f64>,
    /// 0 = invalid/no fix, 1 = GPS, 2 = DGPS.
    pub fix_quality: u8,
    /// Number of satellites used.
    pub satellites: u32,
    /// G-sensor axes. All three present or all three absent in practice.
    pub accel_x: Option<f64>,
    pub accel_y: Option<f64>,
    pub accel_z: Option<f64>,
}

impl TelemetrySample {
    /// New sample at the given position with all other fields defaulted
    /// (valid single-constellation fix, no timestamp, no motion).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: None,
            speed: 0.0,
            heading: 0.0,
            altitude: None,
            fix_quality: 1,
            satellites: 0,
            accel_x: None,
            accel_y: None,
            accel_z: None,
        }
    }

    /// A sample is valid iff its coordinates are within range
    /// and the receiver had a fix.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.fix_quality > 0
    }
}
