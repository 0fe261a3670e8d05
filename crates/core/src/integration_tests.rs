//! Integration tests: exercise the full flow using a simulated trackball.
//!
//! The simulated device checks checksums and versions the way the firmware
//! does, so these tests cover load → edit → save → reload through the codec,
//! the transport helpers, and the review pass together.

#[cfg(test)]
mod tests {
    use crate::codec;
    use crate::comm::{load_config, save_config, ErrorClass};
    use crate::error::Error;
    use crate::functions::{AxisFunction, ButtonFunction};
    use crate::record::{ConfigurationRecord, Cpi};
    use crate::safety::{self, Finding};
    use crate::transport::mock::{Fault, SimulatedTrackball};
    use crate::transport::{read_config_report, write_config_report};

    /// Test: load, remap, save, and reload returns the edited record.
    #[test]
    fn full_edit_cycle() {
        let device = SimulatedTrackball::new();

        let mut record = load_config(&device).unwrap();
        assert_eq!(record, ConfigurationRecord::default());

        record.normal.buttons[3] = ButtonFunction::Shift.code();
        record.shifted.buttons[3] = ButtonFunction::Shift.code();
        record.shifted.sensors[0].x = AxisFunction::HorizontalScroll.code();
        record.shifted.sensors[0].y = AxisFunction::VerticalScrollInverted.code();
        record.shifted.sensors[0].cpi = safety::validate_cpi(300).unwrap();
        assert!(safety::review(&record).is_empty());

        save_config(&device, &record).unwrap();

        let reloaded = load_config(&device).unwrap();
        assert_eq!(reloaded, record);
        assert_eq!(reloaded.shifted.sensors[0].cpi.counts_per_inch(), 300);
    }

    /// Test: a record read from the device re-encodes to the same bytes.
    #[test]
    fn reload_and_resave_is_byte_identical() {
        let mut initial = ConfigurationRecord::default();
        initial.normal.sensors[1].y = AxisFunction::HorizontalScroll.code();
        initial.shifted.buttons[0] = ButtonFunction::ClickDrag.code();
        let device = SimulatedTrackball::with_record(&initial);

        let raw = read_config_report(&device).unwrap();
        let record = codec::decode(&raw).unwrap();
        assert_eq!(codec::encode(&record), raw);

        save_config(&device, &record).unwrap();
        assert_eq!(device.writes(), vec![raw.to_vec()]);
    }

    /// Test: codes this tool does not know survive a load/save cycle.
    #[test]
    fn unknown_codes_pass_through_device() {
        let mut initial = ConfigurationRecord::default();
        initial.normal.sensors[0].x = 99;
        initial.normal.buttons[1] = 23;
        initial.shifted = initial.normal;
        let device = SimulatedTrackball::with_record(&initial);

        let record = load_config(&device).unwrap();
        assert_eq!(record.normal.sensors[0].x, 99);
        assert_eq!(record.normal.buttons[1], 23);

        let findings = safety::review(&record);
        assert_eq!(findings.len(), 4);
        assert!(findings.iter().all(|f| matches!(
            f,
            Finding::UnrecognizedAxis { .. } | Finding::UnrecognizedButton { .. }
        )));

        save_config(&device, &record).unwrap();
        assert_eq!(device.stored(), initial);
    }

    /// Test: a corrupted report is surfaced, and the device state is untouched.
    #[test]
    fn corrupted_read_is_surfaced() {
        let device = SimulatedTrackball::new();
        device.inject(Some(Fault::CorruptRead));

        let err = load_config(&device).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Protocol);
        assert!(device.writes().is_empty());
    }

    /// Test: the device drops a report with a broken checksum.
    #[test]
    fn device_rejects_corrupted_write() {
        let device = SimulatedTrackball::new();
        let mut record = ConfigurationRecord::default();
        record.normal.sensors[0].cpi = Cpi(40);
        let mut report = codec::encode(&record);
        report[11] ^= 0x01;

        write_config_report(&device, &report).unwrap();
        assert_eq!(device.stored(), ConfigurationRecord::default());
    }

    /// Test: unplugging between load and save fails the save without retrying.
    #[test]
    fn unplug_between_load_and_save() {
        let device = SimulatedTrackball::new();
        let mut record = load_config(&device).unwrap();
        record.normal.buttons[0] = ButtonFunction::Button5.code();

        device.inject(Some(Fault::Unplugged));
        let err = save_config(&device, &record).unwrap_err();
        assert!(matches!(err, Error::DeviceIo { .. }));
        assert!(device.writes().is_empty());

        device.inject(None);
        assert_eq!(load_config(&device).unwrap(), ConfigurationRecord::default());
    }

    /// Test: a short read is a transport error, not a decode error.
    #[test]
    fn short_read_is_device_io() {
        let device = SimulatedTrackball::new();
        device.inject(Some(Fault::ShortRead(5)));
        assert!(matches!(
            load_config(&device),
            Err(Error::DeviceIo { .. })
        ));
    }
}
