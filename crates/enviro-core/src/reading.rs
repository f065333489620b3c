//! Per-cycle reading record and the fixed set of displayed variables.

use alloc::string::String;
use core::fmt;

/// Number of variables the board reports (and the display pages through).
pub const VARIABLE_COUNT: usize = 10;

/// The quantities reported each cycle, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Temperature,
    Pressure,
    Humidity,
    Light,
    Oxidised,
    Reduced,
    Nh3,
    Pm1,
    Pm25,
    Pm10,
}

impl Variable {
    /// All variables in display order.
    pub const ALL: [Variable; VARIABLE_COUNT] = [
        Self::Temperature,
        Self::Pressure,
        Self::Humidity,
        Self::Light,
        Self::Oxidised,
        Self::Reduced,
        Self::Nh3,
        Self::Pm1,
        Self::Pm25,
        Self::Pm10,
    ];

    /// Position of this variable in [`Variable::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < VARIABLE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Oxidised => "oxidised",
            Self::Reduced => "reduced",
            Self::Nh3 => "nh3",
            Self::Pm1 => "pm1",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
        }
    }

    /// Four-character name used on the combined page
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Temperature => "temp",
            Self::Pressure => "pres",
            Self::Humidity => "humi",
            Self::Light => "ligh",
            Self::Oxidised => "oxid",
            Self::Reduced => "redu",
            Self::Nh3 => "nh3",
            Self::Pm1 => "pm1",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "C",
            Self::Pressure => "hPa",
            Self::Humidity => "%",
            Self::Light => "Lux",
            Self::Oxidised | Self::Reduced | Self::Nh3 => "kO",
            Self::Pm1 | Self::Pm25 | Self::Pm10 => "ug/m3",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of the host board, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceIdentity {
    serial: String,
}

impl DeviceIdentity {
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
        }
    }

    /// Bare hardware serial number
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Device id in the `raspi-<serial>` form
    pub fn device_id(&self) -> String {
        let mut id = String::from("raspi-");
        id.push_str(&self.serial);
        id
    }
}

/// Everything read from the board during one polling cycle.
///
/// Values are kept at sensor precision: temperature already compensated,
/// pressure in hPa, gas resistances in kΩ. Any per-output rounding happens
/// when the reading is formatted (see [`crate::record`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reading {
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub lux: Option<f64>,
    pub oxidised: Option<f64>,
    pub reduced: Option<f64>,
    pub nh3: Option<f64>,
    pub pm1: Option<u16>,
    pub pm2_5: Option<u16>,
    pub pm10: Option<u16>,
    /// Proximity read during the cycle; drives page changes, never logged
    pub proximity: Option<u16>,
    pub device: DeviceIdentity,
}

impl Reading {
    /// Value of a variable as a float, `None` when it was not read this cycle.
    pub fn value(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Temperature => self.temperature,
            Variable::Pressure => self.pressure,
            Variable::Humidity => self.humidity,
            Variable::Light => self.lux,
            Variable::Oxidised => self.oxidised,
            Variable::Reduced => self.reduced,
            Variable::Nh3 => self.nh3,
            Variable::Pm1 => self.pm1.map(f64::from),
            Variable::Pm25 => self.pm2_5.map(f64::from),
            Variable::Pm10 => self.pm10.map(f64::from),
        }
    }

    /// Whether the particulate fields were populated this cycle
    pub fn has_particulates(&self) -> bool {
        self.pm1.is_some() && self.pm2_5.is_some() && self.pm10.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_order_matches_index() {
        for (i, variable) in Variable::ALL.iter().enumerate() {
            assert_eq!(variable.index(), i);
            assert_eq!(Variable::from_index(i), Some(*variable));
        }
        assert_eq!(Variable::from_index(VARIABLE_COUNT), None);
    }

    #[test]
    fn test_absent_is_not_zero() {
        let reading = Reading {
            pm1: Some(0),
            ..Reading::default()
        };
        assert_eq!(reading.value(Variable::Pm1), Some(0.0));
        assert_eq!(reading.value(Variable::Pm10), None);
        assert!(!reading.has_particulates());
    }

    #[test]
    fn test_device_id() {
        let identity = DeviceIdentity::new("00000000abcdef01");
        assert_eq!(identity.serial(), "00000000abcdef01");
        assert_eq!(identity.device_id(), "raspi-00000000abcdef01");
    }
}
