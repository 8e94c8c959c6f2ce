//! NMEA coordinate conversion.
//!
//! NMEA encodes angles as degrees and decimal minutes packed into a
//! single float: `DDMM.MMMM` for latitude, `DDDMM.MMMM` for longitude.
//! E.g. `3840.7339` reads as 38° 40.7339'.

/// Converts an NMEA-encoded angle to decimal degrees.
///
/// No sign handling: hemisphere is carried by a separate status byte
/// and applied by the caller. A raw value of exactly 0 is the
/// encoder's "no fix" sentinel and should be filtered out before
/// conversion.
pub fn nmea_to_decimal(nmea_val: f64) -> f64 {
    let degrees = (nmea_val / 100.0).trunc();
    let minutes = nmea_val - degrees * 100.0;
    degrees + minutes / 60.0
}

/// Converts decimal degrees to the NMEA encoding.
/// Exact algebraic inverse of [`nmea_to_decimal`].
pub fn decimal_to_nmea(decimal_deg: f64) -> f64 {
    let degrees = decimal_deg.trunc();
    let minutes = (decimal_deg - degrees) * 60.0;
    degrees * 100.0 + minutes
}
