//! Structured records written by the logger variant.
//!
//! Values are logged as integers: temperature, humidity, gas and lux
//! truncated toward zero, pressure in hundredths of a hPa rounded to the
//! nearest ten.

use serde::Serialize;

use crate::reading::Reading;

/// Round an integer to the nearest multiple of ten, ties to even.
///
/// `101325` rounds to `101320`, `101335` to `101340`.
pub fn round_to_tens_half_even(value: i64) -> i64 {
    let remainder = value.rem_euclid(10);
    let base = value - remainder;
    match remainder {
        0..=4 => base,
        6..=9 => base + 10,
        _ => {
            if (base / 10) % 2 == 0 {
                base
            } else {
                base + 10
            }
        }
    }
}

/// Pressure as logged: hPa scaled by 100, truncated, rounded to tens.
pub fn logged_pressure(pressure_hpa: f64) -> i64 {
    round_to_tens_half_even((pressure_hpa * 100.0) as i64)
}

/// One logger line. Absent fields are left out of the output entirely.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxidised: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nh3: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lux: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm1: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm10: Option<u16>,
    pub serial: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn from_reading(reading: &'a Reading) -> Self {
        let truncate = |value: Option<f64>| value.map(|v| v as i64);

        Self {
            temperature: truncate(reading.temperature),
            pressure: reading.pressure.map(logged_pressure),
            humidity: truncate(reading.humidity),
            oxidised: truncate(reading.oxidised),
            reduced: truncate(reading.reduced),
            nh3: truncate(reading.nh3),
            lux: truncate(reading.lux),
            pm1: reading.pm1,
            pm25: reading.pm2_5,
            pm10: reading.pm10,
            serial: reading.device.serial(),
        }
    }
}

/// Informational line, e.g. when a sensor is missing at startup.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRecord<'a> {
    pub info: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::DeviceIdentity;

    #[test]
    fn test_round_to_tens_half_even() {
        assert_eq!(round_to_tens_half_even(101320), 101320);
        assert_eq!(round_to_tens_half_even(101324), 101320);
        assert_eq!(round_to_tens_half_even(101325), 101320);
        assert_eq!(round_to_tens_half_even(101326), 101330);
        assert_eq!(round_to_tens_half_even(101335), 101340);
        assert_eq!(round_to_tens_half_even(5), 0);
        assert_eq!(round_to_tens_half_even(15), 20);
        assert_eq!(round_to_tens_half_even(-15), -20);
        assert_eq!(round_to_tens_half_even(-25), -20);
    }

    #[test]
    fn test_logged_pressure() {
        assert_eq!(logged_pressure(1013.2), 101320);
        assert_eq!(logged_pressure(1013.25), 101320);
        assert_eq!(logged_pressure(1013.35), 101340);
        assert_eq!(logged_pressure(998.76), 99880);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let reading = Reading {
            temperature: Some(8.888),
            humidity: Some(45.99),
            oxidised: Some(12.9),
            lux: Some(-0.5),
            device: DeviceIdentity::new("abc"),
            ..Reading::default()
        };
        let record = LogRecord::from_reading(&reading);
        assert_eq!(record.temperature, Some(8));
        assert_eq!(record.humidity, Some(45));
        assert_eq!(record.oxidised, Some(12));
        assert_eq!(record.lux, Some(0));
        assert_eq!(record.serial, "abc");
    }

    #[test]
    fn test_missing_particulates_are_omitted() {
        let reading = Reading {
            temperature: Some(21.0),
            device: DeviceIdentity::new("abc"),
            ..Reading::default()
        };
        let json = serde_json::to_string(&LogRecord::from_reading(&reading)).unwrap();
        assert_eq!(json, r#"{"temperature":21,"serial":"abc"}"#);
    }

    #[test]
    fn test_zero_particulates_are_kept() {
        let reading = Reading {
            pm1: Some(0),
            pm2_5: Some(0),
            pm10: Some(0),
            device: DeviceIdentity::new("abc"),
            ..Reading::default()
        };
        let json = serde_json::to_string(&LogRecord::from_reading(&reading)).unwrap();
        assert_eq!(json, r#"{"pm1":0,"pm25":0,"pm10":0,"serial":"abc"}"#);
    }
}
