//! Parser for YOUQINGGPS format dashcam videos.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::consts::{BRAND_OFFSET, BRAND_YOUQING, DETECT_PREFIX_LEN};
use crate::errors::TelemetryError;
use crate::record::{self, ChunkOutcome};
use crate::scanner::{find_marker, ChunkScanner};
use crate::track::{TelemetrySample, TelemetryTrack};

use super::TelemetryParser;

/// Parser for MP4 files carrying YOUQING-chipset GPS records.
pub struct YouqingParser;

impl TelemetryParser for YouqingParser {
    fn name(&self) -> &'static str {
        "YOUQINGGPS"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["YOUQINGGPS", "REDTIGER", "WolfBox"]
    }

    /// Checks for the marker signature within the first 10 MiB.
    /// Only the first marker match is inspected for the brand identifier.
    fn can_parse(&self, path: &Path) -> bool {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => return false,
        };
        let mut prefix = Vec::new();
        if file
            .take(DETECT_PREFIX_LEN as u64)
            .read_to_end(&mut prefix)
            .is_err()
        {
            return false;
        }

        let Some(pos) = find_marker(&prefix, 0) else {
            return false;
        };
        prefix.get(pos + BRAND_OFFSET..pos + BRAND_OFFSET + BRAND_YOUQING.len())
            == Some(BRAND_YOUQING)
    }

    /// Extracts all decodable GPS records from the file, in scan order.
    ///
    /// The file is read fully into memory before scanning begins; the
    /// handle is released either way. A file with no marker parses to an
    /// empty track rather than an error, and rejected candidates are
    /// skipped silently.
    fn parse(&self, path: &Path) -> Result<TelemetryTrack, TelemetryError> {
        let content = fs::read(path)?;

        let mut samples: Vec<TelemetrySample> = Vec::new();
        for candidate in ChunkScanner::new(&content) {
            match record::decode(candidate.data) {
                ChunkOutcome::Sample(sample) => samples.push(sample),
                ChunkOutcome::Rejected(reason) => {
                    log::trace!(
                        "skipping candidate at offset {}: {reason:?}",
                        candidate.offset
                    );
                }
            }
        }
        log::debug!("{}: decoded {} samples", path.display(), samples.len());

        Ok(TelemetryTrack::new(
            samples,
            path.display().to_string(),
            BTreeMap::from([("format".to_owned(), self.name().to_owned())]),
        ))
    }
}
