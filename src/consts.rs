//! Marker signatures and layout constants for the YOUQING GPS record format.
//!
//! The format is used by many Chinese dashcam brands built on the YOUQING
//! chipset (REDTIGER, WolfBox, various OEMs). GPS data is stored in
//! plaintext inside free-form atoms tagged `freeGPS `, with a brand
//! identifier following the atom header.

/// 8-byte marker opening a free-form GPS atom:
/// `free` atom FourCC followed by the `GPS ` tag.
pub const GPS_MARKER: &[u8] = b"freeGPS ";

/// 10-byte brand identifier located [`BRAND_OFFSET`] bytes
/// after the start of the marker.
pub const BRAND_YOUQING: &[u8] = b"YOUQINGGPS";

/// Byte offset of the brand identifier relative to the marker,
/// i.e. after `free` + `GPS ` + 32-bit payload size.
pub const BRAND_OFFSET: usize = 12;

/// Fixed size of a candidate record window in bytes.
pub const RECORD_LEN: usize = 256;

/// Bytes to advance past a marker match before resuming the search.
/// Deliberately the marker length rather than the record length:
/// records may be packed closer together than [`RECORD_LEN`], and the
/// bytes following a rejected false positive must be re-examined.
pub const RESYNC_STRIDE: usize = 8;

/// Minimum candidate length holding the required field set
/// (coordinates, date/time components, status bytes).
pub const MIN_RECORD_LEN: usize = 71;

/// Byte offset of the optional speed field within a record window.
pub const SPEED_OFFSET: usize = 108;

/// Speed sanity ceiling in km/h. Values at or above this are treated
/// as absent. Undocumented device heuristic, kept as observed in the wild.
pub const MAX_SPEED_KMH: f64 = 500.0;

/// Number of bytes of file prefix inspected during format detection.
pub const DETECT_PREFIX_LEN: usize = 10 * 1024 * 1024;
