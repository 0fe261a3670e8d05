//! trackball-config-core: configuration record codec and HID transport.
//!
//! This crate reads and writes the dual-sensor trackball's configuration
//! record, which the firmware exposes as a single HID feature report.

pub mod codec;
pub mod comm;
pub mod device;
pub mod error;
pub mod functions;
#[cfg(test)]
mod integration_tests;
pub mod record;
pub mod safety;
pub mod transport;

/// Trackball USB Vendor ID.
pub const TRACKBALL_VID: u16 = 0xCAFE;
/// Trackball USB Product ID.
pub const TRACKBALL_PID: u16 = 0xBADA;

/// Feature report ID carrying the configuration record.
pub const CONFIG_REPORT_ID: u8 = 3;
/// Configuration protocol version understood by this crate.
pub const CONFIG_VERSION: u8 = 1;
/// Record size as declared by the firmware (without report ID prefix).
pub const CONFIG_SIZE: usize = 26;
/// Full feature report length, report ID included.
pub const CONFIG_REPORT_LEN: usize = CONFIG_SIZE + 1;
/// Trailing CRC-32 length.
pub const CHECKSUM_LEN: usize = 4;

/// Number of motion sensors.
pub const SENSOR_COUNT: usize = 2;
/// Number of configurable buttons.
pub const BUTTON_COUNT: usize = 4;

/// Smallest raw CPI value the firmware applies.
pub const CPI_RAW_MIN: u8 = 1;
/// Largest raw CPI value the firmware applies.
pub const CPI_RAW_MAX: u8 = 120;
/// Counts-per-inch represented by one raw CPI step.
pub const CPI_UNIT: u32 = 100;
