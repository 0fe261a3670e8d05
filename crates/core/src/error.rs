//! Error types for trackball-config-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No trackball matched the VID/PID filter (or the requested path).
    #[error("no trackball found: {0}")]
    NoDeviceFound(String),

    /// Opening, reading from, or writing to the HID device failed.
    #[error("device I/O error during {op}: {message}")]
    DeviceIo { op: &'static str, message: String },

    /// The configuration report failed length, report ID, or checksum checks.
    #[error("malformed configuration record: {0}")]
    MalformedRecord(MalformedReason),

    /// Value out of the range a field accepts.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl Error {
    /// Wrap a lower-level HID failure with the operation that triggered it.
    pub fn device_io(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::DeviceIo {
            op,
            message: err.to_string(),
        }
    }
}

/// Why a configuration report was rejected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("expected report ID {expected}, got {actual}")]
    ReportId { expected: u8, actual: u8 },

    #[error("checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    Checksum { stored: u32, computed: u32 },
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
