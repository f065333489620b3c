//! Band assessment for sensor values
//!
//! Each variable has four ascending breakpoints splitting its range into five
//! bands, from dangerously low to dangerously high. The band picks the colour
//! used on the display.

use crate::reading::Variable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Four ascending breakpoints for one variable.
///
/// A breakpoint of `-1` below every real value effectively disables the
/// lower bands for variables that cannot go negative.
pub type Breakpoints = [f64; 4];

/// Band a value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    DangerouslyLow,
    Low,
    Normal,
    High,
    DangerouslyHigh,
}

impl Band {
    const ORDER: [Band; 5] = [
        Self::DangerouslyLow,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::DangerouslyHigh,
    ];

    /// Breakpoints for a variable, in the units the display shows
    /// (hPa for pressure, kΩ for gas).
    pub const fn breakpoints(variable: Variable) -> Breakpoints {
        match variable {
            Variable::Temperature => [4.0, 18.0, 28.0, 35.0],
            Variable::Pressure => [250.0, 650.0, 1013.25, 1015.0],
            Variable::Humidity => [20.0, 30.0, 60.0, 70.0],
            Variable::Light => [-1.0, -1.0, 30000.0, 100000.0],
            Variable::Oxidised => [-1.0, -1.0, 40.0, 50.0],
            Variable::Reduced => [-1.0, -1.0, 450.0, 550.0],
            Variable::Nh3 => [-1.0, -1.0, 200.0, 300.0],
            Variable::Pm1 | Variable::Pm25 | Variable::Pm10 => [-1.0, -1.0, 50.0, 100.0],
        }
    }

    /// Band for `value` given four ascending breakpoints.
    ///
    /// The band is one past the last breakpoint the value strictly exceeds.
    pub fn classify(value: f64, breakpoints: &Breakpoints) -> Self {
        let mut band = 0;
        for (i, limit) in breakpoints.iter().enumerate() {
            if value > *limit {
                band = i + 1;
            }
        }
        Self::ORDER[band]
    }

    /// Assess a value of the given variable
    pub fn assess(variable: Variable, value: f64) -> Self {
        Self::classify(value, &Self::breakpoints(variable))
    }

    /// Display colour for this band
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::DangerouslyLow => Rgb565::BLUE,
            Self::Low => Rgb565::CYAN,
            Self::Normal => Rgb565::GREEN,
            Self::High => Rgb565::YELLOW,
            Self::DangerouslyHigh => Rgb565::RED,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DangerouslyLow => "Dangerously low",
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::DangerouslyHigh => "Dangerously high",
        }
    }
}
