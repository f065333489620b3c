//! Display page selection driven by proximity taps.

use core::fmt;

use embassy_time::{Duration, Instant};
use log::debug;

use crate::reading::{VARIABLE_COUNT, Variable};

/// Proximity count a tap has to exceed
pub const PROXIMITY_TAP_THRESHOLD: u16 = 1500;

/// Minimum time between two page changes, in milliseconds
pub const TAP_DEBOUNCE_MS: u64 = 500;

/// Number of pages: one per variable plus the combined page
pub const MODE_COUNT: usize = VARIABLE_COUNT + 1;

/// Page currently shown on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Large readout of one variable
    Single(Variable),
    /// Every variable with a trend line
    Combined,
}

impl DisplayMode {
    /// Mode for a page index; indices wrap around [`MODE_COUNT`].
    pub fn from_index(index: usize) -> Self {
        match Variable::from_index(index % MODE_COUNT) {
            Some(variable) => Self::Single(variable),
            None => Self::Combined,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Single(variable) => variable.index(),
            Self::Combined => VARIABLE_COUNT,
        }
    }

    /// The page after this one, wrapping back to the first
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Single(Variable::Temperature)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(variable) => write!(f, "{}", variable),
            Self::Combined => f.write_str("all"),
        }
    }
}

/// Debounced page cycling.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: DisplayMode,
    threshold: u16,
    debounce: Duration,
    last_transition: Option<Instant>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(
            PROXIMITY_TAP_THRESHOLD,
            Duration::from_millis(TAP_DEBOUNCE_MS),
        )
    }
}

impl ModeController {
    pub fn new(threshold: u16, debounce: Duration) -> Self {
        Self {
            mode: DisplayMode::default(),
            threshold,
            debounce,
            last_transition: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Feed one proximity reading taken at `now`.
    ///
    /// Returns `true` when the page changed. The debounce is exclusive: a tap
    /// exactly `debounce` after the last change is ignored.
    pub fn update(&mut self, proximity: u16, now: Instant) -> bool {
        if proximity <= self.threshold {
            return false;
        }

        let settled = match self.last_transition {
            Some(last) => now.saturating_duration_since(last) > self.debounce,
            None => true,
        };
        if !settled {
            return false;
        }

        self.mode = self.mode.next();
        self.last_transition = Some(now);
        debug!("Display mode changed to {}", self.mode);
        true
    }
}
