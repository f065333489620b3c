//! Runtime configuration shared by the logger and display variants.

use serde::Deserialize;

/// Which output the process drives.
///
/// The variant also decides whether the CPU temperature is smoothed before
/// compensation: the display smooths, the logger never does.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One JSON record per cycle on stdout
    #[default]
    Logger,
    /// Paged rendering on the attached display
    Display,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    /// Delay between two polling cycles
    pub poll_interval_ms: u64,
    /// Divisor applied to the CPU/ambient temperature gap
    pub compensation_factor: f64,
    /// Proximity value a tap has to exceed to advance the display page
    pub proximity_threshold: u16,
    /// Minimum time between two page changes
    pub tap_debounce_ms: u64,
    /// Lux is only read while proximity stays below this value
    pub light_proximity_limit: u16,
    /// Whether to look for a particulate sensor at all
    pub particulates_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Logger,
            poll_interval_ms: 1000,
            compensation_factor: crate::compensation::COMPENSATION_FACTOR,
            proximity_threshold: crate::mode::PROXIMITY_TAP_THRESHOLD,
            tap_debounce_ms: crate::mode::TAP_DEBOUNCE_MS,
            light_proximity_limit: crate::aggregator::LIGHT_PROXIMITY_LIMIT,
            particulates_enabled: true,
        }
    }
}

impl Config {
    /// Configuration for the given output variant with every other field defaulted.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}
