//! Linear scan over raw container bytes for candidate GPS records.
//!
//! The YOUQING devices write their telemetry as free-form atoms that are
//! not reliably reachable through the atom tree (sizes lie, records get
//! shifted by firmware bugs), so the scanner ignores container structure
//! entirely and searches the whole buffer for the marker signature.

use crate::consts::{BRAND_OFFSET, BRAND_YOUQING, GPS_MARKER, RECORD_LEN, RESYNC_STRIDE};

/// A fixed-size byte window at a marker match location,
/// not yet validated as a genuine record.
///
/// `data` is normally [`RECORD_LEN`] bytes but may be shorter when the
/// window extends past end of buffer. The decoder length-checks before use.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Byte offset of the marker match from start of buffer.
    pub offset: usize,
    /// Window contents, starting at the marker.
    pub data: &'a [u8],
}

/// Lazy iterator over candidate record windows in a byte buffer.
///
/// A strict single forward pass: at each marker match the cursor advances
/// by [`RESYNC_STRIDE`] bytes regardless of whether the brand check
/// succeeded, so overlapping records are all found and the bytes after a
/// false positive are re-examined. Never seeks backward.
#[derive(Debug)]
pub struct ChunkScanner<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ChunkScanner<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }
}

impl<'a> Iterator for ChunkScanner<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = find_marker(self.data, self.cursor)?;
            self.cursor = pos + RESYNC_STRIDE;

            // Brand identifier sits at a fixed offset past the marker.
            // A mismatch (or a window too short to hold it) is a false
            // positive: resume the search without yielding.
            let brand = self
                .data
                .get(pos + BRAND_OFFSET..pos + BRAND_OFFSET + BRAND_YOUQING.len());
            if brand != Some(BRAND_YOUQING) {
                continue;
            }

            let end = (pos + RECORD_LEN).min(self.data.len());
            return Some(Candidate {
                offset: pos,
                data: &self.data[pos..end],
            });
        }
    }
}

/// Returns the byte offset of the first marker match at or after `from`.
pub(crate) fn find_marker(data: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(GPS_MARKER.len())
        .position(|window| window == GPS_MARKER)
        .map(|pos| from + pos)
}
