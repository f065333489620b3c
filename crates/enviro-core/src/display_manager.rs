//! Display sink: pages through the variables on the attached panel.
//!
//! Every cycle the manager
//! - feeds the proximity reading to the [`ModeController`],
//! - pushes every value read this cycle into its history, whatever page is
//!   showing,
//! - renders the active page into the framebuffer and flushes the changed
//!   region to the panel.
//!
//! A variable that was not read this cycle (a failed particulate read) keeps
//! its previous value on screen.

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::config::Config;
use crate::framebuffer::{DISPLAY_WIDTH_PX, FrameBuffer};
use crate::history::Histories;
use crate::mode::{DisplayMode, ModeController};
use crate::output::{OutputError, OutputSink, describe};
use crate::pages::{self, LatestValues};
use crate::reading::{Reading, VARIABLE_COUNT, Variable};

/// History length: one value per pixel column
pub const HISTORY_LEN: usize = DISPLAY_WIDTH_PX as usize;

/// Owns the panel and everything needed to draw it.
pub struct DisplayManager<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: D,
    frame: FrameBuffer,
    mode: ModeController,
    histories: Histories<HISTORY_LEN>,
    latest: LatestValues,
}

impl<D> DisplayManager<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    pub fn new(display: D, config: &Config) -> Self {
        Self {
            display,
            frame: FrameBuffer::new(),
            mode: ModeController::new(
                config.proximity_threshold,
                Duration::from_millis(config.tap_debounce_ms),
            ),
            histories: Histories::default(),
            latest: [None; VARIABLE_COUNT],
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode.mode()
    }

    pub fn latest(&self, variable: Variable) -> Option<f64> {
        self.latest[variable.index()]
    }

    pub fn histories(&self) -> &Histories<HISTORY_LEN> {
        &self.histories
    }

    fn record(&mut self, reading: &Reading) {
        for variable in Variable::ALL {
            match reading.value(variable) {
                Some(value) => {
                    self.histories.push(variable, value);
                    self.latest[variable.index()] = Some(value);
                }
                None => debug!("No new {} value, keeping the previous one", variable),
            }
        }
    }

    /// Draw the active page and push the changes to the panel.
    pub fn render(&mut self) -> Result<(), OutputError> {
        // Drawing into the framebuffer cannot fail
        pages::draw_mode(&mut self.frame, self.mode.mode(), &self.latest, &self.histories).ok();

        self.frame
            .flush(&mut self.display)
            .map_err(|e| OutputError::Display(describe(e)))
    }
}

impl<D> OutputSink for DisplayManager<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    fn emit(&mut self, reading: &Reading, now: Instant) -> Result<(), OutputError> {
        if let Some(proximity) = reading.proximity
            && self.mode.update(proximity, now)
        {
            info!("Showing page: {}", self.mode.mode());
        }

        self.record(reading);
        self.render()
    }

    fn notice(&mut self, message: &str) -> Result<(), OutputError> {
        info!("{}", message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Band;
    use crate::reading::DeviceIdentity;

    fn reading(temperature: f64, pm10: Option<u16>, proximity: u16) -> Reading {
        Reading {
            temperature: Some(temperature),
            pressure: Some(1013.2),
            humidity: Some(45.0),
            lux: Some(100.0),
            oxidised: Some(12.0),
            reduced: Some(400.0),
            nh3: Some(90.0),
            pm1: pm10,
            pm2_5: pm10,
            pm10,
            proximity: Some(proximity),
            device: DeviceIdentity::new("abc"),
        }
    }

    fn manager() -> DisplayManager<FrameBuffer> {
        DisplayManager::new(FrameBuffer::new(), &Config::default())
    }

    #[test]
    fn test_renders_first_page_with_band_background() {
        let mut manager = manager();
        manager
            .emit(&reading(30.0, Some(5), 0), Instant::from_millis(0))
            .unwrap();
        assert_eq!(manager.mode(), DisplayMode::Single(Variable::Temperature));
        assert_eq!(
            manager.display().pixel(0, 0),
            Some(Band::assess(Variable::Temperature, 30.0).color())
        );
    }

    #[test]
    fn test_tap_advances_page() {
        let mut manager = manager();
        manager
            .emit(&reading(22.0, Some(5), 2000), Instant::from_millis(0))
            .unwrap();
        assert_eq!(manager.mode(), DisplayMode::Single(Variable::Pressure));
        // 1013.2 hPa sits in the normal band
        assert_eq!(manager.display().pixel(0, 0), Some(Rgb565::GREEN));

        // Same touch still held within the debounce window
        manager
            .emit(&reading(22.0, Some(5), 2000), Instant::from_millis(300))
            .unwrap();
        assert_eq!(manager.mode(), DisplayMode::Single(Variable::Pressure));
    }

    #[test]
    fn test_histories_update_on_every_page() {
        let mut manager = manager();
        for i in 0..3 {
            manager
                .emit(&reading(20.0 + i as f64, Some(5), 0), Instant::from_millis(i * 1000))
                .unwrap();
        }
        let temps: alloc::vec::Vec<f64> =
            manager.histories().get(Variable::Temperature).recent(3).collect();
        assert_eq!(temps, [20.0, 21.0, 22.0]);
        let pm: alloc::vec::Vec<f64> = manager.histories().get(Variable::Pm10).recent(3).collect();
        assert_eq!(pm, [5.0, 5.0, 5.0]);
        assert_eq!(manager.histories().get(Variable::Pm10).len(), HISTORY_LEN);
    }

    #[test]
    fn test_missing_particulates_stay_stale() {
        let mut manager = manager();
        manager
            .emit(&reading(20.0, Some(42), 0), Instant::from_millis(0))
            .unwrap();
        manager
            .emit(&reading(21.0, None, 0), Instant::from_millis(1000))
            .unwrap();

        assert_eq!(manager.latest(Variable::Pm10), Some(42.0));
        assert_eq!(manager.latest(Variable::Temperature), Some(21.0));
        let pm: alloc::vec::Vec<f64> = manager.histories().get(Variable::Pm10).recent(2).collect();
        assert_eq!(pm, [1.0, 42.0]);
    }

    #[test]
    fn test_combined_page_after_ten_taps() {
        let mut manager = manager();
        for i in 0..10 {
            manager
                .emit(&reading(22.0, Some(5), 2000), Instant::from_millis(i * 1000))
                .unwrap();
        }
        assert_eq!(manager.mode(), DisplayMode::Combined);
    }
}
