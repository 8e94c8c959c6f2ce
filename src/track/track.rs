//! An ordered sequence of telemetry samples with source metadata.

use std::collections::BTreeMap;

use time::Duration;

use super::TelemetrySample;

/// A collection of samples forming a track.
///
/// Samples are kept in scan order, which for these containers equals
/// chronological order; the track never re-sorts. Created once per parse
/// and read-only thereafter: filtering produces a new track.
#[derive(Debug, Clone, Default)]
pub struct TelemetryTrack {
    samples: Vec<TelemetrySample>,
    source: String,
    device_info: BTreeMap<String, String>,
}

impl TelemetryTrack {
    pub fn new(
        samples: Vec<TelemetrySample>,
        source: impl Into<String>,
        device_info: BTreeMap<String, String>,
    ) -> Self {
        Self {
            samples,
            source: source.into(),
            device_info,
        }
    }

    /// Number of samples in the track.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TelemetrySample> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&TelemetrySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TelemetrySample> {
        self.samples.last()
    }

    /// Path/name of the source video file.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Free-form device metadata, e.g. `{"format": "YOUQINGGPS"}`.
    pub fn device_info(&self) -> &BTreeMap<String, String> {
        &self.device_info
    }

    /// Track duration from first to last timestamp.
    /// `None` with fewer than two samples or missing timestamps.
    pub fn duration(&self) -> Option<Duration> {
        if self.samples.len() < 2 {
            return None;
        }
        let first = self.samples.first()?.timestamp?;
        let last = self.samples.last()?.timestamp?;
        Some(last - first)
    }

    /// Bounding box as `(min_lat, min_lon, max_lat, max_lon)`,
    /// or `None` for an empty track.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.samples.first()?;
        let init = (
            first.latitude,
            first.longitude,
            first.latitude,
            first.longitude,
        );
        Some(self.samples.iter().fold(init, |acc, s| {
            (
                acc.0.min(s.latitude),
                acc.1.min(s.longitude),
                acc.2.max(s.latitude),
                acc.3.max(s.longitude),
            )
        }))
    }

    /// Returns a new track containing only valid samples.
    /// The original track is untouched.
    pub fn filter_valid(&self) -> TelemetryTrack {
        TelemetryTrack {
            samples: self
                .samples
                .iter()
                .filter(|s| s.is_valid())
                .cloned()
                .collect(),
            source: self.source.clone(),
            device_info: self.device_info.clone(),
        }
    }
}
