//! Synthetic sensor board for running without the Enviro+ hardware.
//!
//! Values follow slow overlapping sine waves so the display pages and log
//! lines change in a plausible way. The wave clock advances once per cycle,
//! on the temperature read that every cycle starts with.

use enviro_core::{GasReadings, ParticulateReadings, SensorError, SensorPort};
use log::debug;

/// Proximity reported for one cycle after [`SimulatedBoard::tap`]
pub const TAP_PROXIMITY: u16 = 2000;

const PMS: &str = "PMS5003";

/// Whether a particulate sensor is attached to the simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatedPms {
    #[default]
    Connected,
    /// Every read times out on the serial line
    Missing,
}

#[derive(Debug, Default)]
pub struct SimulatedBoard {
    tick: u64,
    pms: SimulatedPms,
    pending_taps: u32,
    pending_pms_timeouts: u32,
    resets: u32,
}

impl SimulatedBoard {
    pub fn new(pms: SimulatedPms) -> Self {
        Self {
            pms,
            ..Self::default()
        }
    }

    /// Cover the proximity sensor for the next cycle.
    pub fn tap(&mut self) {
        self.pending_taps += 1;
    }

    /// Make the next `count` particulate reads time out.
    pub fn fail_particulate_reads(&mut self, count: u32) {
        self.pending_pms_timeouts += count;
    }

    /// Number of particulate sensor resets so far
    pub fn resets(&self) -> u32 {
        self.resets
    }

    fn t(&self) -> f64 {
        self.tick as f64
    }
}

impl SensorPort for SimulatedBoard {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        self.tick += 1;
        let t = self.t();
        Ok(30.0 + 2.0 * (t / 60.0).sin() + 0.3 * (t / 11.0).cos())
    }

    fn read_pressure(&mut self) -> Result<f64, SensorError> {
        let t = self.t();
        Ok(1010.0 + 4.0 * (t / 300.0).sin())
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        let t = self.t();
        Ok(45.0 + 8.0 * (t / 180.0).sin() + 1.5 * (t / 23.0).cos())
    }

    fn read_gas(&mut self) -> Result<GasReadings, SensorError> {
        let t = self.t();
        Ok(GasReadings {
            oxidising: 20_000.0 + 5_000.0 * (t / 45.0).sin(),
            reducing: 400_000.0 + 60_000.0 * (t / 75.0).sin(),
            nh3: 90_000.0 + 20_000.0 * (t / 120.0).cos(),
        })
    }

    fn read_lux(&mut self) -> Result<f64, SensorError> {
        let t = self.t();
        Ok(150.0 + 100.0 * (t / 240.0).sin())
    }

    fn read_proximity(&mut self) -> Result<u16, SensorError> {
        if self.pending_taps > 0 {
            self.pending_taps -= 1;
            debug!("Simulated tap");
            return Ok(TAP_PROXIMITY);
        }
        Ok(0)
    }

    fn read_particulates(&mut self) -> Result<ParticulateReadings, SensorError> {
        if self.pms == SimulatedPms::Missing {
            return Err(SensorError::SerialTimeout { sensor: PMS });
        }
        if self.pending_pms_timeouts > 0 {
            self.pending_pms_timeouts -= 1;
            return Err(SensorError::ReadTimeout { sensor: PMS });
        }

        let t = self.t();
        let pm1 = (6.0 + 4.0 * (t / 90.0).sin()) as u16;
        let pm2_5 = pm1 + 3 + (2.0 * (t / 30.0).cos() + 2.0) as u16;
        let pm10 = pm2_5 + 4;
        Ok(ParticulateReadings { pm1, pm2_5, pm10 })
    }

    fn reset_particulates(&mut self) -> Result<(), SensorError> {
        if self.pms == SimulatedPms::Missing {
            return Err(SensorError::SerialTimeout { sensor: PMS });
        }
        self.resets += 1;
        Ok(())
    }
}
