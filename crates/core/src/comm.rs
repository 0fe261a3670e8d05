//! Load/save flow and error classification.
//!
//! Every call runs one complete feature-report exchange. Failures are
//! returned as-is; the device is never retried automatically, since a
//! failed transfer usually means it needs to be re-plugged or re-selected.

use crate::codec;
use crate::device::{self, DeviceHandle};
use crate::error::{Error, Result};
use crate::record::ConfigurationRecord;
use crate::transport::{read_config_report, write_config_report, FeatureTransport};
use tracing::{debug, info};

/// Classification of errors for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// No device, or the device went away mid-operation.
    Disconnected,
    /// The OS refused access, typically a missing udev rule.
    PermissionDenied,
    /// The device answered with a record this tool cannot accept.
    Protocol,
    /// Anything else, including rejected user input.
    Other,
}

impl ErrorClass {
    /// Classify an error for the hint shown next to it.
    pub fn classify(err: &Error) -> Self {
        match err {
            Error::NoDeviceFound(_) => Self::Disconnected,
            Error::MalformedRecord(_) => Self::Protocol,
            Error::DeviceIo { message, .. } => {
                let lower = message.to_lowercase();
                if lower.contains("disconnect")
                    || lower.contains("no such device")
                    || lower.contains("not found")
                {
                    Self::Disconnected
                } else if lower.contains("permission")
                    || lower.contains("access denied")
                    || lower.contains("access is denied")
                {
                    Self::PermissionDenied
                } else {
                    Self::Other
                }
            }
            Error::OutOfRange { .. } => Self::Other,
        }
    }

    /// Suggested user action, if there is a useful one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Disconnected => Some("check the cable, then re-select the device and retry"),
            Self::PermissionDenied => {
                Some("grant access to the hidraw device (e.g. a udev rule for CAFE:BADA)")
            }
            Self::Protocol => Some("firmware and tool may disagree on the protocol version"),
            Self::Other => None,
        }
    }
}

/// Read and decode the configuration from an open transport.
pub fn load_config(transport: &dyn FeatureTransport) -> Result<ConfigurationRecord> {
    let report = read_config_report(transport)?;
    let record = codec::decode(&report)?;
    debug!(version = record.version, "Configuration loaded");
    Ok(record)
}

/// Encode and write a configuration to an open transport.
///
/// The header is normalised first: current protocol version, no command.
pub fn save_config(transport: &dyn FeatureTransport, record: &ConfigurationRecord) -> Result<()> {
    let report = codec::encode(&record.prepared_for_save());
    write_config_report(transport, &report)?;
    debug!("Configuration saved");
    Ok(())
}

/// Open the device, load its configuration, and close it.
pub fn load_from_device(handle: &DeviceHandle) -> Result<ConfigurationRecord> {
    let report = device::read_config(handle)?;
    let record = codec::decode(&report)?;
    info!(device = %handle.label, "Loaded configuration");
    Ok(record)
}

/// Open the device, save a configuration, and close it.
pub fn save_to_device(handle: &DeviceHandle, record: &ConfigurationRecord) -> Result<()> {
    let report = codec::encode(&record.prepared_for_save());
    device::write_config(handle, &report)?;
    info!(device = %handle.label, "Saved configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedReason;
    use crate::transport::mock::{Fault, SimulatedTrackball};
    use crate::CONFIG_VERSION;

    #[test]
    fn classify_missing_device() {
        let err = Error::NoDeviceFound("nothing connected".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Disconnected);
    }

    #[test]
    fn classify_io_disconnect_message() {
        let err = Error::device_io("get feature report", "No such device");
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Disconnected);
    }

    #[test]
    fn classify_io_permission_message() {
        let err = Error::device_io("open", "/dev/hidraw3: Permission denied");
        assert_eq!(ErrorClass::classify(&err), ErrorClass::PermissionDenied);
        let err = Error::device_io("open", "Access is denied.");
        assert_eq!(ErrorClass::classify(&err), ErrorClass::PermissionDenied);
    }

    #[test]
    fn classify_malformed_record() {
        let err = Error::MalformedRecord(MalformedReason::Checksum {
            stored: 0,
            computed: 1,
        });
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Protocol);
        assert!(ErrorClass::Protocol.hint().is_some());
    }

    #[test]
    fn classify_other() {
        let err = Error::device_io("send feature report", "Broken pipe");
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Other);
        assert_eq!(ErrorClass::Other.hint(), None);
    }

    #[test]
    fn load_config_decodes_device_record() {
        let device = SimulatedTrackball::new();
        let record = load_config(&device).unwrap();
        assert_eq!(record, ConfigurationRecord::default());
    }

    #[test]
    fn load_config_rejects_corrupted_report() {
        let device = SimulatedTrackball::new();
        device.inject(Some(Fault::CorruptRead));
        assert!(matches!(
            load_config(&device),
            Err(Error::MalformedRecord(MalformedReason::Checksum { .. }))
        ));
    }

    #[test]
    fn save_config_normalises_header() {
        let device = SimulatedTrackball::new();
        let mut record = ConfigurationRecord::default();
        record.version = 9;
        record.command = 1;
        record.normal.sensors[1].cpi = crate::record::Cpi(20);

        save_config(&device, &record).unwrap();

        let written = &device.writes()[0];
        assert_eq!(written[1], CONFIG_VERSION);
        assert_eq!(written[2], 0);
        let stored = device.stored();
        assert_eq!(stored.normal.sensors[1].cpi.counts_per_inch(), 2000);
        assert_eq!(stored.command, 0);
    }

    #[test]
    fn save_config_propagates_unplug() {
        let device = SimulatedTrackball::new();
        device.inject(Some(Fault::Unplugged));
        let err = save_config(&device, &ConfigurationRecord::default()).unwrap_err();
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Disconnected);
    }
}
