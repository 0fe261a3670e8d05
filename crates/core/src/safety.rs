//! Advisory checks on configuration records.
//!
//! The codec is deliberately permissive: it carries any code the firmware
//! sends. Front ends use this module to point out values the firmware will
//! ignore before writing them back.
//!
//! ## What the firmware does with odd values
//! - **CPI**: applied only when the raw value is in 1..=120 (100..12000 CPI);
//!   otherwise the sensor keeps its previous setting.
//! - **Function codes**: unknown axis codes move nothing, unknown button
//!   codes do nothing.
//! - **Shifted profile**: only active while a button mapped to Shift in the
//!   normal profile is held.

use crate::error::Result;
use crate::functions::{AxisFunction, ButtonFunction};
use crate::record::{ConfigurationRecord, Cpi, ProfileMapping};
use crate::CONFIG_VERSION;

/// Validate a counts-per-inch value typed by the user.
pub fn validate_cpi(counts_per_inch: u32) -> Result<Cpi> {
    Cpi::from_counts_per_inch(counts_per_inch)
}

/// Where in the record a finding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    SensorX { sensor: usize, shifted: bool },
    SensorY { sensor: usize, shifted: bool },
    SensorCpi { sensor: usize, shifted: bool },
    Button { button: usize, shifted: bool },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = |shifted: bool| if shifted { " (shifted)" } else { "" };
        match *self {
            Self::SensorX { sensor, shifted } => {
                write!(f, "sensor {} X axis{}", sensor + 1, suffix(shifted))
            }
            Self::SensorY { sensor, shifted } => {
                write!(f, "sensor {} Y axis{}", sensor + 1, suffix(shifted))
            }
            Self::SensorCpi { sensor, shifted } => {
                write!(f, "sensor {} CPI{}", sensor + 1, suffix(shifted))
            }
            Self::Button { button, shifted } => {
                write!(f, "button {}{}", button + 1, suffix(shifted))
            }
        }
    }
}

/// Something in a record the firmware will not act on as the user may expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    UnrecognizedAxis { at: Location, code: i8 },
    UnrecognizedButton { at: Location, code: i8 },
    UnsupportedCpi { at: Location, cpi: Cpi },
    UnsupportedVersion { version: u8 },
    /// The shifted profile differs from normal but no button is mapped to Shift.
    UnreachableShiftedProfile,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedAxis { at, code } => {
                write!(f, "{at}: unrecognized axis function code {code}")
            }
            Self::UnrecognizedButton { at, code } => {
                write!(f, "{at}: unrecognized button function code {code}")
            }
            Self::UnsupportedCpi { at, cpi } => write!(
                f,
                "{at}: raw CPI {} is outside 1..=120 and will be ignored by the device",
                cpi.raw()
            ),
            Self::UnsupportedVersion { version } => write!(
                f,
                "record version {version} differs from supported version {CONFIG_VERSION}"
            ),
            Self::UnreachableShiftedProfile => write!(
                f,
                "shifted profile is configured but no button is mapped to Shift"
            ),
        }
    }
}

/// List everything in `record` the firmware will ignore or cannot reach.
pub fn review(record: &ConfigurationRecord) -> Vec<Finding> {
    let mut findings = Vec::new();

    if record.version != CONFIG_VERSION {
        findings.push(Finding::UnsupportedVersion {
            version: record.version,
        });
    }

    review_profile(&record.normal, false, &mut findings);
    review_profile(&record.shifted, true, &mut findings);

    if record.normal.shift_button().is_none() && record.shifted != record.normal {
        findings.push(Finding::UnreachableShiftedProfile);
    }

    findings
}

fn review_profile(profile: &ProfileMapping, shifted: bool, findings: &mut Vec<Finding>) {
    for (sensor, mapping) in profile.sensors.iter().enumerate() {
        if AxisFunction::from_code(mapping.x).is_none() {
            findings.push(Finding::UnrecognizedAxis {
                at: Location::SensorX { sensor, shifted },
                code: mapping.x,
            });
        }
        if AxisFunction::from_code(mapping.y).is_none() {
            findings.push(Finding::UnrecognizedAxis {
                at: Location::SensorY { sensor, shifted },
                code: mapping.y,
            });
        }
        if !mapping.cpi.is_supported() {
            findings.push(Finding::UnsupportedCpi {
                at: Location::SensorCpi { sensor, shifted },
                cpi: mapping.cpi,
            });
        }
    }
    for (button, &code) in profile.buttons.iter().enumerate() {
        if ButtonFunction::from_code(code).is_none() {
            findings.push(Finding::UnrecognizedButton {
                at: Location::Button { button, shifted },
                code,
            });
        }
    }
}
