//! CPU temperature sources for the compensation step.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use enviro_core::{CpuThermalReader, SensorError};
use log::warn;

/// Default sysfs thermal zone on the Raspberry Pi
pub const SYSFS_THERMAL_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

const VCGENCMD: &str = "vcgencmd";

/// Parse `vcgencmd measure_temp` output, e.g. `temp=45.0'C`.
pub fn parse_vcgencmd(output: &str) -> Option<f64> {
    let start = output.find('=')? + 1;
    let end = output.rfind('\'')?;
    output.get(start..end)?.trim().parse().ok()
}

/// Parse a sysfs thermal zone value in millidegrees Celsius.
pub fn parse_millidegrees(contents: &str) -> Option<f64> {
    contents
        .trim()
        .parse::<i64>()
        .ok()
        .map(|millis| millis as f64 / 1000.0)
}

/// Reads the SoC temperature through the firmware `vcgencmd` tool.
#[derive(Debug, Default)]
pub struct VcgencmdThermal;

impl CpuThermalReader for VcgencmdThermal {
    fn read_cpu_temperature(&mut self) -> Result<f64, SensorError> {
        let output = Command::new(VCGENCMD)
            .arg("measure_temp")
            .output()
            .map_err(|e| {
                warn!("Failed to run {}: {}", VCGENCMD, e);
                SensorError::ReadFailed {
                    sensor: VCGENCMD,
                    operation: "measure_temp",
                    details: "could not run command",
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_vcgencmd(&stdout).ok_or_else(|| {
            warn!("Unexpected {} output: {:?}", VCGENCMD, stdout);
            SensorError::ReadFailed {
                sensor: VCGENCMD,
                operation: "measure_temp",
                details: "unexpected output",
            }
        })
    }
}

/// Reads the SoC temperature from a sysfs thermal zone.
#[derive(Debug, Clone)]
pub struct SysfsThermal {
    path: PathBuf,
}

impl SysfsThermal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for SysfsThermal {
    fn default() -> Self {
        Self::new(SYSFS_THERMAL_PATH)
    }
}

impl CpuThermalReader for SysfsThermal {
    fn read_cpu_temperature(&mut self) -> Result<f64, SensorError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            warn!("Failed to read {}: {}", self.path.display(), e);
            SensorError::ReadFailed {
                sensor: "thermal_zone",
                operation: "read",
                details: "could not read file",
            }
        })?;

        parse_millidegrees(&contents).ok_or(SensorError::ReadFailed {
            sensor: "thermal_zone",
            operation: "read",
            details: "not a millidegree value",
        })
    }
}

/// Slowly drifting CPU temperature for desktop runs.
#[derive(Debug, Default)]
pub struct SimulatedThermal {
    tick: u64,
}

impl CpuThermalReader for SimulatedThermal {
    fn read_cpu_temperature(&mut self) -> Result<f64, SensorError> {
        let t = self.tick as f64;
        self.tick += 1;
        Ok(50.0 + 3.0 * (t / 90.0).sin() + 0.4 * (t / 7.0).cos())
    }
}

/// Which CPU temperature source to use, chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuSource {
    #[default]
    Vcgencmd,
    Sysfs,
    Simulated,
}

impl FromStr for CpuSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vcgencmd" => Ok(Self::Vcgencmd),
            "sysfs" => Ok(Self::Sysfs),
            "simulated" => Ok(Self::Simulated),
            other => Err(format!(
                "unknown CPU source '{}' (expected vcgencmd, sysfs or simulated)",
                other
            )),
        }
    }
}

impl fmt::Display for CpuSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vcgencmd => write!(f, "vcgencmd"),
            Self::Sysfs => write!(f, "sysfs"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// The selected source, usable wherever a [`CpuThermalReader`] is expected.
#[derive(Debug)]
pub enum HostThermal {
    Vcgencmd(VcgencmdThermal),
    Sysfs(SysfsThermal),
    Simulated(SimulatedThermal),
}

impl From<CpuSource> for HostThermal {
    fn from(source: CpuSource) -> Self {
        match source {
            CpuSource::Vcgencmd => Self::Vcgencmd(VcgencmdThermal),
            CpuSource::Sysfs => Self::Sysfs(SysfsThermal::default()),
            CpuSource::Simulated => Self::Simulated(SimulatedThermal::default()),
        }
    }
}

impl CpuThermalReader for HostThermal {
    fn read_cpu_temperature(&mut self) -> Result<f64, SensorError> {
        match self {
            Self::Vcgencmd(reader) => reader.read_cpu_temperature(),
            Self::Sysfs(reader) => reader.read_cpu_temperature(),
            Self::Simulated(reader) => reader.read_cpu_temperature(),
        }
    }
}
