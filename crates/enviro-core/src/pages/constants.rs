//! Layout constants shared by the pages

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Text shown for a variable that has not been read yet
pub(crate) const MISSING_VALUE: &str = "--";

/// Text on a band-coloured background
pub(crate) const TEXT_ON_BAND: Rgb565 = Rgb565::BLACK;

/// Status line for a variable without a value
pub(crate) const NO_DATA_STATUS: &str = "no data";

/// Text and background for a variable without a value
pub(crate) const TEXT_NO_DATA: Rgb565 = Rgb565::WHITE;
pub(crate) const BACKGROUND_NO_DATA: Rgb565 = Rgb565::BLACK;

/// Background of the combined page
pub(crate) const COMBINED_BACKGROUND: Rgb565 = Rgb565::BLACK;

// ============================================================================
// Combined page grid
// ============================================================================

/// Number of columns on the combined page
pub(crate) const COMBINED_COLUMNS: usize = 2;

/// Number of rows per column on the combined page
pub(crate) const COMBINED_ROWS: usize = 5;

/// Height of the label text within a cell in pixels
pub(crate) const CELL_TEXT_HEIGHT_PX: u32 = 10;

/// Left padding of the label text in pixels
pub(crate) const CELL_TEXT_PADDING_LEFT_PX: i32 = 1;
