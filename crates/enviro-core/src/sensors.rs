//! Capability traits for the board's sensors.
//!
//! The drivers themselves (BME280, LTR559, MICS6814 gas, PMS5003) live
//! outside this crate. Anything that can answer these calls can be polled by
//! the [`ReadingAggregator`](crate::aggregator::ReadingAggregator).

use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not deliver a frame in time; worth a reset and retry
    #[error("{sensor}: read timed out")]
    ReadTimeout { sensor: &'static str },

    /// The sensor never answered on its serial line; treat it as absent
    #[error("{sensor}: serial timeout, sensor not connected")]
    SerialTimeout { sensor: &'static str },

    #[error("{sensor}: {operation} failed: {details}")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
        details: &'static str,
    },
}

impl SensorError {
    pub fn is_read_timeout(&self) -> bool {
        matches!(self, Self::ReadTimeout { .. })
    }

    pub fn is_serial_timeout(&self) -> bool {
        matches!(self, Self::SerialTimeout { .. })
    }
}

/// Raw gas resistances in ohms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasReadings {
    pub oxidising: f64,
    pub reducing: f64,
    pub nh3: f64,
}

/// Particulate concentrations in µg/m³ (standard atmosphere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticulateReadings {
    pub pm1: u16,
    pub pm2_5: u16,
    pub pm10: u16,
}

/// Blocking access to every sensor on the board.
///
/// Calls are made in sequence from a single owner, so implementations need no
/// internal locking.
pub trait SensorPort {
    /// Ambient temperature in °C, uncompensated
    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    /// Pressure in hPa
    fn read_pressure(&mut self) -> Result<f64, SensorError>;

    /// Relative humidity in %
    fn read_humidity(&mut self) -> Result<f64, SensorError>;

    fn read_gas(&mut self) -> Result<GasReadings, SensorError>;

    fn read_lux(&mut self) -> Result<f64, SensorError>;

    /// Raw proximity count; larger means closer
    fn read_proximity(&mut self) -> Result<u16, SensorError>;

    fn read_particulates(&mut self) -> Result<ParticulateReadings, SensorError>;

    /// Reset the particulate sensor before a retry
    fn reset_particulates(&mut self) -> Result<(), SensorError>;
}

/// Source of the CPU die temperature in °C.
pub trait CpuThermalReader {
    fn read_cpu_temperature(&mut self) -> Result<f64, SensorError>;
}
