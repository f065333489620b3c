//! The polling cycle: read every sensor once and hand the result to a sink.

use embassy_time::Instant;
use log::{debug, error, info};
use thiserror_no_std::Error;

use crate::aggregator::{ParticulateStatus, ReadingAggregator};
use crate::config::{Config, Variant};
use crate::output::{OutputError, OutputSink};
use crate::reading::{DeviceIdentity, Reading};
use crate::sensors::{CpuThermalReader, SensorError, SensorPort};

/// Notice emitted once when no particulate sensor answers at startup
pub const NO_PARTICULATE_SENSOR: &str = "no PMS sensor connected";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("sensor read failed: {0}")]
    Sensor(#[from] SensorError),
    #[error("output failed: {0}")]
    Output(#[from] OutputError),
}

/// Ties the board, the CPU thermal source and an output sink together.
pub struct Monitor<S, C, O> {
    sensors: S,
    cpu: C,
    aggregator: ReadingAggregator,
    sink: O,
    variant: Variant,
}

impl<S, C, O> Monitor<S, C, O>
where
    S: SensorPort,
    C: CpuThermalReader,
    O: OutputSink,
{
    pub fn new(sensors: S, cpu: C, sink: O, identity: DeviceIdentity, config: &Config) -> Self {
        Self {
            sensors,
            cpu,
            aggregator: ReadingAggregator::new(config, identity),
            sink,
            variant: config.variant,
        }
    }

    /// One-time startup: probe the particulate sensor and prime CPU smoothing.
    pub fn start(&mut self) -> Result<ParticulateStatus, OutputError> {
        info!(
            "Starting {:?} for {}",
            self.variant,
            self.aggregator.identity().device_id()
        );

        let status = self.aggregator.probe_particulates(&mut self.sensors);
        if status == ParticulateStatus::Absent {
            self.sink.notice(NO_PARTICULATE_SENSOR)?;
        }

        if self.variant == Variant::Display
            && let Err(e) = self.aggregator.prime_cpu(&mut self.cpu)
        {
            // The first cycle primes the smoother instead
            error!("Failed to prime CPU temperature smoothing: {}", e);
        }

        Ok(status)
    }

    /// Run one cycle at `now`.
    ///
    /// A sensor failure skips the sink for this cycle.
    pub fn cycle(&mut self, now: Instant) -> Result<Reading, CycleError> {
        let reading = self
            .aggregator
            .aggregate(&mut self.sensors, &mut self.cpu)?;
        debug!("Cycle reading: {:?}", reading);

        self.sink.emit(&reading, now)?;
        Ok(reading)
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }
}
