//! Typed view of the trackball configuration record.
//!
//! The firmware keeps two parallel profiles: `normal`, and `shifted`, which is
//! active while a button mapped to [`ButtonFunction::Shift`] is held. Function
//! fields hold raw wire codes so that codes unknown to this crate survive a
//! load/save cycle; see [`crate::functions`] for their meaning.

use crate::error::{Error, Result};
use crate::functions::{AxisFunction, ButtonFunction};
use crate::{BUTTON_COUNT, CONFIG_VERSION, CPI_RAW_MAX, CPI_RAW_MIN, CPI_UNIT, SENSOR_COUNT};
use serde::{Deserialize, Serialize};

/// Sensor sensitivity as stored on the wire (hundreds of counts per inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpi(pub u8);

impl Cpi {
    /// Build from a true counts-per-inch value.
    ///
    /// The value must be a multiple of 100 within 100..=12000.
    pub fn from_counts_per_inch(cpi: u32) -> Result<Self> {
        let min = CPI_RAW_MIN as u32 * CPI_UNIT;
        let max = CPI_RAW_MAX as u32 * CPI_UNIT;
        if !(min..=max).contains(&cpi) || cpi % CPI_UNIT != 0 {
            return Err(Error::OutOfRange {
                field: "cpi",
                value: cpi,
                min,
                max,
            });
        }
        Ok(Self((cpi / CPI_UNIT) as u8))
    }

    /// Raw wire value.
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// True sensitivity in counts per inch.
    pub fn counts_per_inch(&self) -> u32 {
        self.0 as u32 * CPI_UNIT
    }

    /// Whether the firmware will apply this value. Others are ignored on-device.
    pub fn is_supported(&self) -> bool {
        (CPI_RAW_MIN..=CPI_RAW_MAX).contains(&self.0)
    }
}

impl std::fmt::Display for Cpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} CPI", self.counts_per_inch())
    }
}

/// Axis functions and sensitivity of one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorMapping {
    /// Axis function code for the sensor's X axis.
    pub x: i8,
    /// Axis function code for the sensor's Y axis.
    pub y: i8,
    pub cpi: Cpi,
}

impl SensorMapping {
    pub fn new(x: AxisFunction, y: AxisFunction, cpi: Cpi) -> Self {
        Self {
            x: x.code(),
            y: y.code(),
            cpi,
        }
    }
}

/// One complete function mapping: both sensors and all buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileMapping {
    pub sensors: [SensorMapping; SENSOR_COUNT],
    /// Button function codes, button 1 first.
    pub buttons: [i8; BUTTON_COUNT],
}

impl ProfileMapping {
    /// Index of the first button mapped to Shift, if any.
    pub fn shift_button(&self) -> Option<usize> {
        self.buttons
            .iter()
            .position(|&code| code == ButtonFunction::Shift.code())
    }
}

/// The full device configuration, as exchanged in one feature report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    /// Protocol version byte.
    pub version: u8,
    /// Reserved command byte. Round-tripped, never interpreted.
    pub command: i8,
    pub normal: ProfileMapping,
    pub shifted: ProfileMapping,
}

impl ConfigurationRecord {
    /// A record with the given profiles and the current protocol header.
    pub fn new(normal: ProfileMapping, shifted: ProfileMapping) -> Self {
        Self {
            version: CONFIG_VERSION,
            command: 0,
            normal,
            shifted,
        }
    }

    /// Copy with the header every save writes: current version, no command.
    pub fn prepared_for_save(self) -> Self {
        Self {
            version: CONFIG_VERSION,
            command: 0,
            ..self
        }
    }

    /// The profile selected by `shifted`.
    pub fn profile(&self, shifted: bool) -> &ProfileMapping {
        if shifted {
            &self.shifted
        } else {
            &self.normal
        }
    }

    pub fn profile_mut(&mut self, shifted: bool) -> &mut ProfileMapping {
        if shifted {
            &mut self.shifted
        } else {
            &mut self.normal
        }
    }
}

impl Default for ConfigurationRecord {
    /// The firmware's factory configuration.
    fn default() -> Self {
        let profile = ProfileMapping {
            sensors: [
                SensorMapping::new(
                    AxisFunction::CursorX,
                    AxisFunction::CursorYInverted,
                    Cpi(6),
                ),
                SensorMapping::new(AxisFunction::VerticalScroll, AxisFunction::None, Cpi(8)),
            ],
            buttons: [
                ButtonFunction::Button1.code(),
                ButtonFunction::Button1.code(),
                ButtonFunction::Button2.code(),
                ButtonFunction::Button3.code(),
            ],
        };
        Self::new(profile, profile)
    }
}
