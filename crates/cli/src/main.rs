//! trackball-config CLI: command-line trackball configuration tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::str::FromStr;
use trackball_config_core::comm::{self, ErrorClass};
use trackball_config_core::device::{self, DeviceHandle};
use trackball_config_core::error::Error;
use trackball_config_core::functions::{
    describe_axis, describe_button, AxisFunction, ButtonFunction,
};
use trackball_config_core::record::{ConfigurationRecord, Cpi, ProfileMapping};
use trackball_config_core::{safety, BUTTON_COUNT, SENSOR_COUNT};

#[derive(Parser)]
#[command(
    name = "trackball-config",
    version,
    about = "Configure the dual-sensor trackball firmware"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected trackballs.
    ListDevices {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration stored on the device.
    Show {
        /// HID path of the device (default: first trackball found).
        #[arg(long)]
        device: Option<String>,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Change one or more fields and save to the device.
    Set {
        /// HID path of the device (default: first trackball found).
        #[arg(long)]
        device: Option<String>,
        /// Edit the shifted profile instead of the normal one.
        #[arg(long)]
        shifted: bool,
        /// FIELD=VALUE, e.g. sensor1-x=cursor-x, sensor2-cpi=800, button4=shift.
        #[arg(required = true)]
        assignments: Vec<Assignment>,
    },
    /// Write the factory configuration to the device.
    Reset {
        /// HID path of the device (default: first trackball found).
        #[arg(long)]
        device: Option<String>,
    },
    /// List the function names accepted by `set`.
    Functions,
}

/// A record field addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SensorX(usize),
    SensorY(usize),
    SensorCpi(usize),
    Button(usize),
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let unknown = || {
            format!(
                "unknown field '{s}'. Valid fields: sensor1-x, sensor1-y, sensor1-cpi, \
                 sensor2-x, sensor2-y, sensor2-cpi, button1..button{BUTTON_COUNT}"
            )
        };

        if let Some(rest) = lower.strip_prefix("button") {
            let n: usize = rest.parse().map_err(|_| unknown())?;
            return match n {
                1..=BUTTON_COUNT => Ok(Self::Button(n - 1)),
                _ => Err(unknown()),
            };
        }

        let rest = lower.strip_prefix("sensor").ok_or_else(unknown)?;
        let (n, axis) = rest.split_once('-').ok_or_else(unknown)?;
        let n: usize = n.parse().map_err(|_| unknown())?;
        if !(1..=SENSOR_COUNT).contains(&n) {
            return Err(unknown());
        }
        match axis {
            "x" => Ok(Self::SensorX(n - 1)),
            "y" => Ok(Self::SensorY(n - 1)),
            "cpi" => Ok(Self::SensorCpi(n - 1)),
            _ => Err(unknown()),
        }
    }
}

/// A parsed FIELD=VALUE pair, already checked against the field's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assignment {
    SensorX(usize, i8),
    SensorY(usize, i8),
    SensorCpi(usize, Cpi),
    Button(usize, i8),
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
        let value = value.trim();

        match field.parse::<Field>()? {
            Field::SensorX(sensor) => Ok(Self::SensorX(sensor, parse_axis(value)?)),
            Field::SensorY(sensor) => Ok(Self::SensorY(sensor, parse_axis(value)?)),
            Field::Button(button) => {
                let code = match ButtonFunction::from_name(value) {
                    Some(function) => function.code(),
                    None => parse_code(value, "button function")?,
                };
                Ok(Self::Button(button, code))
            }
            Field::SensorCpi(sensor) => {
                let cpi: u32 = value
                    .parse()
                    .map_err(|_| format!("CPI must be a number, got '{value}'"))?;
                let cpi = safety::validate_cpi(cpi).map_err(|e| e.to_string())?;
                Ok(Self::SensorCpi(sensor, cpi))
            }
        }
    }
}

impl Assignment {
    fn apply(&self, profile: &mut ProfileMapping) {
        match *self {
            Self::SensorX(sensor, code) => profile.sensors[sensor].x = code,
            Self::SensorY(sensor, code) => profile.sensors[sensor].y = code,
            Self::SensorCpi(sensor, cpi) => profile.sensors[sensor].cpi = cpi,
            Self::Button(button, code) => profile.buttons[button] = code,
        }
    }
}

fn parse_axis(value: &str) -> std::result::Result<i8, String> {
    match AxisFunction::from_name(value) {
        Some(function) => Ok(function.code()),
        None => parse_code(value, "axis function"),
    }
}

/// Parse a raw function code. Values outside the signed byte range are refused.
fn parse_code(value: &str, what: &str) -> std::result::Result<i8, String> {
    let wide: i64 = value
        .parse()
        .map_err(|_| format!("unknown {what} '{value}'. Run `trackball-config functions`"))?;
    i8::try_from(wide).map_err(|_| format!("{what} code {wide} does not fit in a signed byte"))
}

/// Attach the hint for an error class to a core error.
fn present(err: Error) -> anyhow::Error {
    match ErrorClass::classify(&err).hint() {
        Some(hint) => anyhow::anyhow!("{err} ({hint})"),
        None => anyhow::Error::new(err),
    }
}

fn open_device(path: Option<&str>) -> Result<DeviceHandle> {
    let devices = device::enumerate().map_err(present)?;
    device::select_device(&devices, path).cloned().map_err(present)
}

fn render_record(record: &ConfigurationRecord) -> String {
    let mut rows: Vec<(String, String, String)> = Vec::new();
    for sensor in 0..SENSOR_COUNT {
        let (n, s) = (&record.normal.sensors[sensor], &record.shifted.sensors[sensor]);
        rows.push((
            format!("Sensor {} X axis", sensor + 1),
            describe_axis(n.x),
            describe_axis(s.x),
        ));
        rows.push((
            format!("Sensor {} Y axis", sensor + 1),
            describe_axis(n.y),
            describe_axis(s.y),
        ));
        rows.push((
            format!("Sensor {} CPI", sensor + 1),
            describe_cpi(n.cpi),
            describe_cpi(s.cpi),
        ));
    }
    for button in 0..BUTTON_COUNT {
        rows.push((
            format!("Button {}", button + 1),
            describe_button(record.normal.buttons[button]),
            describe_button(record.shifted.buttons[button]),
        ));
    }

    let mut out = format!("Version: {}\n", record.version);
    out.push_str(&format!("{:<18}{:<24}{}\n", "", "Normal", "Shifted"));
    for (label, normal, shifted) in rows {
        out.push_str(&format!("{label:<18}{normal:<24}{shifted}\n"));
    }
    out
}

fn describe_cpi(cpi: Cpi) -> String {
    if cpi.is_supported() {
        cpi.to_string()
    } else {
        format!("Unsupported (raw {})", cpi.raw())
    }
}

fn print_findings(record: &ConfigurationRecord) {
    for finding in safety::review(record) {
        tracing::warn!(%finding, "configuration review");
        eprintln!("warning: {finding}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices { json } => {
            let devices = device::enumerate().map_err(present)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else if devices.is_empty() {
                println!("No trackballs found.");
                println!("Ensure the trackball is connected and you can access its hidraw node.");
            } else {
                for dev in &devices {
                    println!("{} (path: {})", dev.label, dev.path_str());
                }
            }
        }
        Commands::Show { device, json } => {
            let handle = open_device(device.as_deref())?;
            let record = comm::load_from_device(&handle).map_err(present)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Device: {} ({})", handle.label, handle.path_str());
                print!("{}", render_record(&record));
                print_findings(&record);
            }
        }
        Commands::Set {
            device,
            shifted,
            assignments,
        } => {
            let handle = open_device(device.as_deref())?;
            let mut record = comm::load_from_device(&handle)
                .map_err(present)
                .context("loading current configuration")?;
            for assignment in &assignments {
                assignment.apply(record.profile_mut(shifted));
            }
            print_findings(&record);
            comm::save_to_device(&handle, &record).map_err(present)?;
            println!(
                "Saved {} change(s) to the {} profile of {}",
                assignments.len(),
                if shifted { "shifted" } else { "normal" },
                handle.label
            );
        }
        Commands::Reset { device } => {
            let handle = open_device(device.as_deref())?;
            comm::save_to_device(&handle, &ConfigurationRecord::default()).map_err(present)?;
            println!("Factory configuration written to {}", handle.label);
        }
        Commands::Functions => {
            println!("Axis functions (sensorN-x, sensorN-y):");
            for function in AxisFunction::ALL {
                println!("  {:>3}  {}", function.code(), function.label());
            }
            println!("Button functions (buttonN):");
            for function in ButtonFunction::ALL {
                println!("  {:>3}  {}", function.code(), function.label());
            }
            println!("CPI (sensorN-cpi): 100..12000 in steps of 100");
        }
    }

    Ok(())
}
