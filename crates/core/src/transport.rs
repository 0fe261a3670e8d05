//! HID feature-report transport abstraction.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! the simulated trackball used in tests share the same interface.

use crate::error::{Error, Result};
use crate::{CONFIG_REPORT_ID, CONFIG_REPORT_LEN};
use tracing::{debug, trace};

/// Abstraction over HID feature-report I/O.
///
/// Buffers follow the hidapi convention: byte 0 is the report ID, the payload
/// follows it.
pub trait FeatureTransport: Send {
    /// Read a feature report. `buf[0]` selects the report ID on entry.
    /// Returns the number of bytes written into `buf`, report ID included.
    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize>;

    /// Write a feature report. `data[0]` is the report ID.
    fn send_feature_report(&self, data: &[u8]) -> Result<()>;
}

/// Fetch the raw configuration report.
///
/// A short or long read is a transport failure, not a malformed record: the
/// bytes never arrived intact.
pub fn read_config_report(transport: &dyn FeatureTransport) -> Result<[u8; CONFIG_REPORT_LEN]> {
    let mut buf = [0u8; CONFIG_REPORT_LEN];
    buf[0] = CONFIG_REPORT_ID;

    let n = transport.get_feature_report(&mut buf)?;
    trace!(
        len = n,
        report_hex = format_args!("{:02X?}", &buf[..n.min(CONFIG_REPORT_LEN)]),
        "config report RX"
    );

    if n != CONFIG_REPORT_LEN {
        return Err(Error::DeviceIo {
            op: "read config",
            message: format!("expected {CONFIG_REPORT_LEN} bytes, device returned {n}"),
        });
    }

    debug!("configuration report read");
    Ok(buf)
}

/// Send an encoded configuration report.
pub fn write_config_report(
    transport: &dyn FeatureTransport,
    report: &[u8; CONFIG_REPORT_LEN],
) -> Result<()> {
    trace!(report_hex = format_args!("{:02X?}", report), "config report TX");
    transport.send_feature_report(report)?;
    debug!("configuration report written");
    Ok(())
}
