//! Device discovery and hidapi-backed feature-report I/O.

use crate::error::{Error, Result};
use crate::transport::{read_config_report, write_config_report, FeatureTransport};
use crate::{CONFIG_REPORT_LEN, TRACKBALL_PID, TRACKBALL_VID};
use serde::Serialize;
use std::ffi::CString;
use tracing::{debug, info};

/// A connected trackball, as found by [`enumerate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceHandle {
    /// Manufacturer and product strings.
    pub label: String,
    /// Platform HID path used to open the device.
    #[serde(serialize_with = "serialize_path")]
    pub path: CString,
    pub serial: Option<String>,
}

impl DeviceHandle {
    /// Path as displayable text.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

fn serialize_path<S: serde::Serializer>(
    path: &CString,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_string_lossy())
}

/// One entry of the raw HID enumeration, before filtering.
#[derive(Debug, Clone)]
pub struct DeviceListing {
    pub vendor_id: u16,
    pub product_id: u16,
    pub path: CString,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial: Option<String>,
}

impl From<&hidapi::DeviceInfo> for DeviceListing {
    fn from(info: &hidapi::DeviceInfo) -> Self {
        Self {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            path: info.path().to_owned(),
            manufacturer: info.manufacturer_string().map(str::to_string),
            product: info.product_string().map(str::to_string),
            serial: info.serial_number().map(str::to_string),
        }
    }
}

/// Keep only trackballs from a HID enumeration.
///
/// A composite device can show up once per interface; each listing is kept
/// since only the path distinguishes them.
pub fn filter_devices(listings: impl IntoIterator<Item = DeviceListing>) -> Vec<DeviceHandle> {
    listings
        .into_iter()
        .filter(|l| l.vendor_id == TRACKBALL_VID && l.product_id == TRACKBALL_PID)
        .map(|l| {
            let label = [l.manufacturer.as_deref(), l.product.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            DeviceHandle {
                label: if label.is_empty() {
                    format!("{TRACKBALL_VID:04X}:{TRACKBALL_PID:04X}")
                } else {
                    label
                },
                path: l.path,
                serial: l.serial,
            }
        })
        .collect()
}

/// List all connected trackballs.
///
/// No match is not an error; the result is simply empty.
pub fn enumerate() -> Result<Vec<DeviceHandle>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::device_io("enumerate", e))?;

    let devices = filter_devices(api.device_list().map(DeviceListing::from));
    for dev in &devices {
        info!(
            label = %dev.label,
            vid = format_args!("0x{:04X}", TRACKBALL_VID),
            pid = format_args!("0x{:04X}", TRACKBALL_PID),
            path = %dev.path_str(),
            "Found trackball"
        );
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Pick a device: the one at `path`, or the first one when no path is given.
pub fn select_device<'a>(
    devices: &'a [DeviceHandle],
    path: Option<&str>,
) -> Result<&'a DeviceHandle> {
    match path {
        Some(path) => devices
            .iter()
            .find(|d| d.path.to_bytes() == path.as_bytes())
            .ok_or_else(|| Error::NoDeviceFound(format!("no trackball at path {path}"))),
        None => devices.first().ok_or_else(|| {
            Error::NoDeviceFound(format!(
                "no device with VID 0x{TRACKBALL_VID:04X} PID 0x{TRACKBALL_PID:04X} connected"
            ))
        }),
    }
}

/// Feature-report transport over an open hidapi device.
///
/// The device is closed when this value is dropped.
pub struct HidDeviceTransport {
    device: hidapi::HidDevice,
}

impl HidDeviceTransport {
    pub fn open(handle: &DeviceHandle) -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::device_io("open", e))?;
        let device = api
            .open_path(handle.path.as_c_str())
            .map_err(|e| Error::device_io("open", format!("{}: {e}", handle.path_str())))?;
        debug!(path = %handle.path_str(), "Opened trackball");
        Ok(Self { device })
    }
}

impl FeatureTransport for HidDeviceTransport {
    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize> {
        self.device
            .get_feature_report(buf)
            .map_err(|e| Error::device_io("get feature report", e))
    }

    fn send_feature_report(&self, data: &[u8]) -> Result<()> {
        self.device
            .send_feature_report(data)
            .map_err(|e| Error::device_io("send feature report", e))
    }
}

/// Open the device, read the raw configuration report, and close it.
pub fn read_config(handle: &DeviceHandle) -> Result<[u8; CONFIG_REPORT_LEN]> {
    let transport = HidDeviceTransport::open(handle)?;
    read_config_report(&transport)
}

/// Open the device, write an already encoded configuration report, and close it.
pub fn write_config(handle: &DeviceHandle, report: &[u8; CONFIG_REPORT_LEN]) -> Result<()> {
    let transport = HidDeviceTransport::open(handle)?;
    write_config_report(&transport, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(vid: u16, pid: u16, path: &str) -> DeviceListing {
        DeviceListing {
            vendor_id: vid,
            product_id: pid,
            path: CString::new(path).unwrap(),
            manufacturer: Some("Acme".into()),
            product: Some("Trackball".into()),
            serial: None,
        }
    }

    #[test]
    fn filter_keeps_only_trackballs() {
        let devices = filter_devices(vec![
            listing(0x046D, 0xC08B, "/dev/hidraw0"),
            listing(0xCAFE, 0xBADA, "/dev/hidraw1"),
            listing(0xCAFE, 0x0001, "/dev/hidraw2"),
        ]);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].path_str(), "/dev/hidraw1");
        assert_eq!(devices[0].label, "Acme Trackball");
    }

    #[test]
    fn filter_without_match_is_empty() {
        let devices = filter_devices(vec![listing(0x046D, 0xC08B, "/dev/hidraw0")]);
        assert!(devices.is_empty());
        assert!(filter_devices(Vec::new()).is_empty());
    }

    #[test]
    fn label_falls_back_to_ids() {
        let mut l = listing(0xCAFE, 0xBADA, "/dev/hidraw3");
        l.manufacturer = None;
        l.product = None;
        assert_eq!(filter_devices(vec![l])[0].label, "CAFE:BADA");

        let mut l = listing(0xCAFE, 0xBADA, "/dev/hidraw3");
        l.manufacturer = None;
        assert_eq!(filter_devices(vec![l])[0].label, "Trackball");
    }

    #[test]
    fn select_first_or_by_path() {
        let devices = filter_devices(vec![
            listing(0xCAFE, 0xBADA, "/dev/hidraw1"),
            listing(0xCAFE, 0xBADA, "/dev/hidraw4"),
        ]);
        assert_eq!(select_device(&devices, None).unwrap().path_str(), "/dev/hidraw1");
        assert_eq!(
            select_device(&devices, Some("/dev/hidraw4"))
                .unwrap()
                .path_str(),
            "/dev/hidraw4"
        );
        assert!(matches!(
            select_device(&devices, Some("/dev/hidraw9")),
            Err(Error::NoDeviceFound(_))
        ));
    }

    #[test]
    fn select_from_empty_list_is_no_device() {
        assert!(matches!(
            select_device(&[], None),
            Err(Error::NoDeviceFound(_))
        ));
    }
}
