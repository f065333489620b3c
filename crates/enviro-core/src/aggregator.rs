//! One polling cycle: read every sensor and assemble a [`Reading`].

use log::{info, warn};

use crate::compensation::{CpuFilter, CpuSmoother, compensate};
use crate::config::{Config, Variant};
use crate::reading::{DeviceIdentity, Reading};
use crate::sensors::{CpuThermalReader, ParticulateReadings, SensorError, SensorPort};

/// Lux is only trusted while proximity stays below this count.
pub const LIGHT_PROXIMITY_LIMIT: u16 = 10;

/// Lux reported while something covers the light sensor.
pub const COVERED_LUX: f64 = 1.0;

/// Gas resistances come in ohms and are reported in kΩ.
const OHMS_PER_KILOHM: f64 = 1000.0;

/// Whether the particulate sensor takes part in polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticulateStatus {
    /// Read every cycle
    Available,
    /// Not connected; never read for the rest of the process
    Absent,
}

/// Collects one [`Reading`] per cycle from the board.
pub struct ReadingAggregator {
    identity: DeviceIdentity,
    cpu_filter: CpuFilter,
    compensation_factor: f64,
    light_proximity_limit: u16,
    particulates: ParticulateStatus,
}

impl ReadingAggregator {
    pub fn new(config: &Config, identity: DeviceIdentity) -> Self {
        let cpu_filter = match config.variant {
            Variant::Logger => CpuFilter::Raw,
            Variant::Display => CpuFilter::Smoothed(CpuSmoother::new()),
        };
        let particulates = if config.particulates_enabled {
            ParticulateStatus::Available
        } else {
            ParticulateStatus::Absent
        };

        Self {
            identity,
            cpu_filter,
            compensation_factor: config.compensation_factor,
            light_proximity_limit: config.light_proximity_limit,
            particulates,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Seed CPU smoothing with one reading before the first cycle.
    pub fn prime_cpu<C: CpuThermalReader>(&mut self, cpu: &mut C) -> Result<(), SensorError> {
        let temperature = cpu.read_cpu_temperature()?;
        self.cpu_filter.prime(temperature);
        Ok(())
    }

    /// Check once at startup whether a particulate sensor is connected.
    ///
    /// A serial timeout marks the sensor absent for the rest of the process.
    /// Any other failure keeps it in the polling set; the per-cycle retry
    /// handles flaky reads.
    pub fn probe_particulates<S: SensorPort>(&mut self, sensors: &mut S) -> ParticulateStatus {
        if self.particulates == ParticulateStatus::Absent {
            return self.particulates;
        }

        match sensors.read_particulates() {
            Ok(_) => info!("Particulate sensor detected"),
            Err(e) if e.is_serial_timeout() => {
                info!("No particulate sensor connected: {}", e);
                self.particulates = ParticulateStatus::Absent;
            }
            Err(e) => warn!("Particulate sensor probe failed, will keep polling: {}", e),
        }
        self.particulates
    }

    /// Read every sensor once.
    ///
    /// Any failure outside the particulate sensor aborts the cycle. Particulate
    /// failures only leave those fields empty.
    pub fn aggregate<S, C>(&mut self, sensors: &mut S, cpu: &mut C) -> Result<Reading, SensorError>
    where
        S: SensorPort,
        C: CpuThermalReader,
    {
        let cpu_temperature = self.cpu_filter.apply(cpu.read_cpu_temperature()?);
        let raw_temperature = sensors.read_temperature()?;
        let temperature = compensate(raw_temperature, cpu_temperature, self.compensation_factor);

        let pressure = sensors.read_pressure()?;
        let humidity = sensors.read_humidity()?;

        let gas = sensors.read_gas()?;

        let proximity = sensors.read_proximity()?;
        let lux = if proximity < self.light_proximity_limit {
            sensors.read_lux()?
        } else {
            COVERED_LUX
        };

        let particulates = match self.particulates {
            ParticulateStatus::Available => read_particulates_with_retry(sensors),
            ParticulateStatus::Absent => None,
        };

        Ok(Reading {
            temperature: Some(temperature),
            pressure: Some(pressure),
            humidity: Some(humidity),
            lux: Some(lux),
            oxidised: Some(gas.oxidising / OHMS_PER_KILOHM),
            reduced: Some(gas.reducing / OHMS_PER_KILOHM),
            nh3: Some(gas.nh3 / OHMS_PER_KILOHM),
            pm1: particulates.map(|pm| pm.pm1),
            pm2_5: particulates.map(|pm| pm.pm2_5),
            pm10: particulates.map(|pm| pm.pm10),
            proximity: Some(proximity),
            device: self.identity.clone(),
        })
    }
}

/// Read the particulate sensor, resetting and retrying exactly once after a
/// read timeout.
fn read_particulates_with_retry<S: SensorPort>(sensors: &mut S) -> Option<ParticulateReadings> {
    match sensors.read_particulates() {
        Ok(values) => Some(values),
        Err(e) if e.is_read_timeout() => {
            warn!("{}, resetting particulate sensor", e);
            let retried = sensors
                .reset_particulates()
                .and_then(|()| sensors.read_particulates());
            match retried {
                Ok(values) => Some(values),
                Err(e) => {
                    warn!("Particulate retry failed, skipping this cycle: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!("Particulate read failed, skipping this cycle: {}", e);
            None
        }
    }
}
