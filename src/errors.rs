//! File-level extraction and export errors.
//!
//! Only file-level conditions surface here. Record-level anomalies
//! (rejected candidates, malformed timestamps) are absorbed during the
//! scan so that a single corrupt record never fails the whole file.

use std::fmt;

/// Telemetry extraction/export errors.
#[derive(Debug)]
pub enum TelemetryError {
    /// No registered parser recognises the file.
    UnsupportedFormat(String),
    /// I/O error opening or reading the source file.
    /// Fatal for that file's parse, never retried internally.
    ReadFailure(std::io::Error),
    /// I/O error writing an export target.
    WriteFailure(std::io::Error),
}

impl std::error::Error for TelemetryError {}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::UnsupportedFormat(path) => write!(f, "No parser found for: {path}"),
            TelemetryError::ReadFailure(err) => write!(f, "Failed to read file: {err}"),
            TelemetryError::WriteFailure(err) => write!(f, "Failed to write output: {err}"),
        }
    }
}

/// Converts std::io::Error to TelemetryError.
/// Read is the default direction; export paths map
/// to `WriteFailure` explicitly.
impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::ReadFailure(err)
    }
}
