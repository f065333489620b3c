//! Single-variable page: band-coloured background and a large readout.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_layout::layout::linear::LinearLayout;
use embedded_layout::prelude::*;
use heapless::String;

use super::constants::{
    BACKGROUND_NO_DATA, MISSING_VALUE, NO_DATA_STATUS, TEXT_NO_DATA, TEXT_ON_BAND,
};
use super::format_value;
use crate::framebuffer::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use crate::metrics::Band;
use crate::reading::Variable;

/// Readout of one variable, e.g. `temperature` over `21.4 C` over `Normal`.
pub struct SinglePage {
    variable: Variable,
    value: Option<f64>,
    bounds: Rectangle,
}

impl SinglePage {
    pub fn new(variable: Variable, value: Option<f64>) -> Self {
        Self {
            variable,
            value,
            bounds: Rectangle::new(
                Point::zero(),
                Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
            ),
        }
    }

    pub fn band(&self) -> Option<Band> {
        self.value.map(|v| Band::assess(self.variable, v))
    }

    pub fn background(&self) -> Rgb565 {
        self.band().map_or(BACKGROUND_NO_DATA, Band::color)
    }

    /// Value line: one decimal followed by the unit
    pub fn value_text(&self) -> String<24> {
        let mut text = String::new();
        let unit = self.variable.unit();
        match self.value {
            Some(value) => write!(text, "{} {}", format_value(value), unit).ok(),
            None => text.push_str(MISSING_VALUE).ok(),
        };
        text
    }

    /// Band of the value in words, e.g. `High`
    pub fn status_text(&self) -> &'static str {
        self.band().map_or(NO_DATA_STATUS, Band::label)
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background()))
            .draw(display)?;

        let text_color = if self.value.is_some() {
            TEXT_ON_BAND
        } else {
            TEXT_NO_DATA
        };
        let style = MonoTextStyle::new(&FONT_10X20, text_color);
        let status_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let value_text = self.value_text();

        LinearLayout::vertical(
            Chain::new(Text::new(self.variable.name(), Point::zero(), style))
                .append(Text::new(value_text.as_str(), Point::zero(), style))
                .append(Text::new(self.status_text(), Point::zero(), status_style)),
        )
        .with_alignment(horizontal::Center)
        .arrange()
        .align_to(&self.bounds, horizontal::Center, vertical::Center)
        .draw(display)?;

        Ok(())
    }
}
