//! Page rendering for the display variant.
//!
//! Each [`DisplayMode`] has one page: a large readout for a single variable
//! or the combined overview of every variable with its trend line.

pub mod combined;
pub mod constants;
pub mod single;
pub mod sparkline;

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::history::Histories;
use crate::mode::DisplayMode;
use crate::reading::VARIABLE_COUNT;

pub use combined::CombinedPage;
pub use single::SinglePage;

/// Latest known value per variable; `None` until first read.
pub type LatestValues = [Option<f64>; VARIABLE_COUNT];

/// Capacity of a formatted readout
pub const VALUE_TEXT_LEN: usize = 12;

/// One-decimal readout, in exponent form when the plain form does not fit.
pub fn format_value(value: f64) -> String<VALUE_TEXT_LEN> {
    let mut text = String::new();
    if write!(text, "{:.1}", value).is_err() {
        text.clear();
        write!(text, "{:.1e}", value).ok();
    }
    text
}

/// Draw the page for `mode` onto `display`.
pub fn draw_mode<D, const N: usize>(
    display: &mut D,
    mode: DisplayMode,
    latest: &LatestValues,
    histories: &Histories<N>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match mode {
        DisplayMode::Single(variable) => {
            SinglePage::new(variable, latest[variable.index()]).draw(display)
        }
        DisplayMode::Combined => CombinedPage::new(latest, histories).draw(display),
    }
}
