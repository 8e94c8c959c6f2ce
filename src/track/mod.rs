//! Telemetry data model: immutable samples and the ordered track they form.

mod sample;
mod track;

pub use sample::TelemetrySample;
pub use track::TelemetryTrack;
