//! Configuration record wire encoding and decoding.
//!
//! Feature report 3 layout (27 bytes, little-endian):
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | report ID (3) |
//! | 1 | version |
//! | 2 | command |
//! | 3..7 | sensor 1 X/Y, sensor 2 X/Y axis codes (`i8`) |
//! | 7..11 | shifted sensor 1 X/Y, sensor 2 X/Y axis codes (`i8`) |
//! | 11..13 | sensor 1, sensor 2 CPI (`u8`) |
//! | 13..15 | shifted sensor 1, sensor 2 CPI (`u8`) |
//! | 15..19 | button 1..4 codes (`i8`) |
//! | 19..23 | shifted button 1..4 codes (`i8`) |
//! | 23..27 | CRC-32 (IEEE) over bytes 1..23 |
//!
//! The firmware checksums its own struct, which starts at the version byte,
//! so the report ID is never covered.

use crate::error::{Error, MalformedReason, Result};
use crate::record::{ConfigurationRecord, Cpi, ProfileMapping};
use crate::{CHECKSUM_LEN, CONFIG_REPORT_ID, CONFIG_REPORT_LEN};
use tracing::{trace, warn};

const VERSION_OFFSET: usize = 1;
const COMMAND_OFFSET: usize = 2;
const AXES_OFFSET: usize = 3;
const SHIFTED_AXES_OFFSET: usize = 7;
const CPI_OFFSET: usize = 11;
const SHIFTED_CPI_OFFSET: usize = 13;
const BUTTONS_OFFSET: usize = 15;
const SHIFTED_BUTTONS_OFFSET: usize = 19;
const CHECKSUM_OFFSET: usize = CONFIG_REPORT_LEN - CHECKSUM_LEN;

/// IEEE 802.3 CRC-32, as computed by the firmware.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Encode a record into a complete feature report, checksum included.
///
/// Every field is written as stored; build the record with
/// [`ConfigurationRecord::prepared_for_save`] to send the header a save expects.
pub fn encode(record: &ConfigurationRecord) -> [u8; CONFIG_REPORT_LEN] {
    let mut buf = [0u8; CONFIG_REPORT_LEN];
    buf[0] = CONFIG_REPORT_ID;
    buf[VERSION_OFFSET] = record.version;
    buf[COMMAND_OFFSET] = record.command as u8;
    write_profile(&mut buf, &record.normal, AXES_OFFSET, CPI_OFFSET, BUTTONS_OFFSET);
    write_profile(
        &mut buf,
        &record.shifted,
        SHIFTED_AXES_OFFSET,
        SHIFTED_CPI_OFFSET,
        SHIFTED_BUTTONS_OFFSET,
    );

    let crc = checksum(&buf[VERSION_OFFSET..CHECKSUM_OFFSET]);
    buf[CHECKSUM_OFFSET..].copy_from_slice(&crc.to_le_bytes());

    trace!(report_hex = format_args!("{:02X?}", buf), "config encoded");
    buf
}

/// Decode and verify a feature report read from the device.
///
/// Only the framing is checked: length, report ID and checksum. Function
/// codes and CPI values are taken as-is.
pub fn decode(data: &[u8]) -> Result<ConfigurationRecord> {
    trace!(report_hex = format_args!("{:02X?}", data), "config decode");

    if data.len() != CONFIG_REPORT_LEN {
        return Err(malformed(MalformedReason::Length {
            expected: CONFIG_REPORT_LEN,
            actual: data.len(),
        }));
    }

    if data[0] != CONFIG_REPORT_ID {
        return Err(malformed(MalformedReason::ReportId {
            expected: CONFIG_REPORT_ID,
            actual: data[0],
        }));
    }

    let mut stored = [0u8; CHECKSUM_LEN];
    stored.copy_from_slice(&data[CHECKSUM_OFFSET..]);
    let stored = u32::from_le_bytes(stored);
    let computed = checksum(&data[VERSION_OFFSET..CHECKSUM_OFFSET]);
    if stored != computed {
        return Err(malformed(MalformedReason::Checksum { stored, computed }));
    }

    Ok(ConfigurationRecord {
        version: data[VERSION_OFFSET],
        command: data[COMMAND_OFFSET] as i8,
        normal: read_profile(data, AXES_OFFSET, CPI_OFFSET, BUTTONS_OFFSET),
        shifted: read_profile(
            data,
            SHIFTED_AXES_OFFSET,
            SHIFTED_CPI_OFFSET,
            SHIFTED_BUTTONS_OFFSET,
        ),
    })
}

fn malformed(reason: MalformedReason) -> Error {
    warn!(%reason, "rejecting configuration report");
    Error::MalformedRecord(reason)
}

fn write_profile(
    buf: &mut [u8],
    profile: &ProfileMapping,
    axes: usize,
    cpi: usize,
    buttons: usize,
) {
    for (i, sensor) in profile.sensors.iter().enumerate() {
        buf[axes + 2 * i] = sensor.x as u8;
        buf[axes + 2 * i + 1] = sensor.y as u8;
        buf[cpi + i] = sensor.cpi.raw();
    }
    for (i, &code) in profile.buttons.iter().enumerate() {
        buf[buttons + i] = code as u8;
    }
}

fn read_profile(data: &[u8], axes: usize, cpi: usize, buttons: usize) -> ProfileMapping {
    let mut profile = ProfileMapping::default();
    for (i, sensor) in profile.sensors.iter_mut().enumerate() {
        sensor.x = data[axes + 2 * i] as i8;
        sensor.y = data[axes + 2 * i + 1] as i8;
        sensor.cpi = Cpi(data[cpi + i]);
    }
    for (i, code) in profile.buttons.iter_mut().enumerate() {
        *code = data[buttons + i] as i8;
    }
    profile
}
