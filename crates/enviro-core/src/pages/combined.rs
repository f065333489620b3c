//! Combined page: every variable as a compact row with its trend line.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::{LatestValues, format_value};
use super::constants::{
    CELL_TEXT_HEIGHT_PX, CELL_TEXT_PADDING_LEFT_PX, COMBINED_BACKGROUND, COMBINED_COLUMNS,
    COMBINED_ROWS, MISSING_VALUE, TEXT_NO_DATA,
};
use super::sparkline::Sparkline;
use crate::framebuffer::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use crate::history::Histories;
use crate::metrics::Band;
use crate::reading::Variable;

const CELL_WIDTH_PX: u32 = DISPLAY_WIDTH_PX as u32 / COMBINED_COLUMNS as u32;
const CELL_HEIGHT_PX: u32 = DISPLAY_HEIGHT_PX as u32 / COMBINED_ROWS as u32;

pub struct CombinedPage<'a, const N: usize> {
    latest: &'a LatestValues,
    histories: &'a Histories<N>,
}

impl<'a, const N: usize> CombinedPage<'a, N> {
    pub fn new(latest: &'a LatestValues, histories: &'a Histories<N>) -> Self {
        Self { latest, histories }
    }

    /// Cell of a variable: first column top to bottom, then the second.
    pub fn cell(variable: Variable) -> Rectangle {
        let column = variable.index() / COMBINED_ROWS;
        let row = variable.index() % COMBINED_ROWS;
        Rectangle::new(
            Point::new(
                (column as u32 * CELL_WIDTH_PX) as i32,
                (row as u32 * CELL_HEIGHT_PX) as i32,
            ),
            Size::new(CELL_WIDTH_PX, CELL_HEIGHT_PX),
        )
    }

    /// Row colour: the band of the latest value
    pub fn color(&self, variable: Variable) -> Rgb565 {
        self.latest[variable.index()]
            .map(|v| Band::assess(variable, v).color())
            .unwrap_or(TEXT_NO_DATA)
    }

    pub fn label(&self, variable: Variable) -> String<20> {
        let mut text = String::new();
        let name = variable.short_name();
        match self.latest[variable.index()] {
            Some(value) => write!(text, "{} {}", name, format_value(value)).ok(),
            None => write!(text, "{} {}", name, MISSING_VALUE).ok(),
        };
        text
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(COMBINED_BACKGROUND)?;

        for variable in Variable::ALL {
            let cell = Self::cell(variable);
            let color = self.color(variable);

            let label = self.label(variable);
            Text::with_baseline(
                label.as_str(),
                cell.top_left + Point::new(CELL_TEXT_PADDING_LEFT_PX, 0),
                MonoTextStyle::new(&FONT_6X10, color),
                Baseline::Top,
            )
            .draw(display)?;

            let graph_area = Rectangle::new(
                cell.top_left + Point::new(0, CELL_TEXT_HEIGHT_PX as i32),
                Size::new(cell.size.width, cell.size.height - CELL_TEXT_HEIGHT_PX),
            );
            Sparkline::new(self.histories.get(variable), graph_area, variable).draw(display)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::reading::VARIABLE_COUNT;

    #[test]
    fn test_cells_tile_the_display() {
        assert_eq!(
            CombinedPage::<4>::cell(Variable::Temperature),
            Rectangle::new(Point::new(0, 0), Size::new(80, 16))
        );
        assert_eq!(
            CombinedPage::<4>::cell(Variable::Light),
            Rectangle::new(Point::new(0, 48), Size::new(80, 16))
        );
        assert_eq!(
            CombinedPage::<4>::cell(Variable::Reduced),
            Rectangle::new(Point::new(80, 0), Size::new(80, 16))
        );
        assert_eq!(
            CombinedPage::<4>::cell(Variable::Pm10),
            Rectangle::new(Point::new(80, 64), Size::new(80, 16))
        );
    }

    #[test]
    fn test_labels_and_colors() {
        let mut latest = [None; VARIABLE_COUNT];
        latest[Variable::Temperature.index()] = Some(21.46);
        latest[Variable::Pm25.index()] = Some(120.0);
        let histories = Histories::<4>::default();
        let page = CombinedPage::new(&latest, &histories);

        assert_eq!(page.label(Variable::Temperature).as_str(), "temp 21.5");
        assert_eq!(page.label(Variable::Pm1).as_str(), "pm1 --");
        assert_eq!(page.color(Variable::Temperature), Rgb565::GREEN);
        assert_eq!(page.color(Variable::Pm25), Rgb565::RED);
        assert_eq!(page.color(Variable::Pm1), TEXT_NO_DATA);
    }

    #[test]
    fn test_label_of_huge_value_keeps_a_number() {
        let mut latest = [None; VARIABLE_COUNT];
        latest[Variable::Light.index()] = Some(1e14);
        let histories = Histories::<4>::default();
        let page = CombinedPage::new(&latest, &histories);
        assert_eq!(page.label(Variable::Light).as_str(), "ligh 1.0e14");
    }

    #[test]
    fn test_trend_line_colored_per_value() {
        let mut latest = [None; VARIABLE_COUNT];
        latest[Variable::Pm10.index()] = Some(75.0);
        let mut histories = Histories::<160>::default();
        histories.push(Variable::Pm10, 75.0);

        let mut frame = FrameBuffer::new();
        CombinedPage::new(&latest, &histories).draw(&mut frame).unwrap();

        let cell = CombinedPage::<160>::cell(Variable::Pm10);
        let graph_top = cell.top_left.y as usize + CELL_TEXT_HEIGHT_PX as usize;
        let graph_bottom = (cell.top_left.y as u32 + cell.size.height) as usize - 1;

        // Filler values of 1 are normal, the newest 75 is high
        let green = (80..158)
            .filter(|&x| frame.pixel(x, graph_bottom) == Some(Rgb565::GREEN))
            .count();
        assert_eq!(green, 78);
        assert_eq!(frame.pixel(159, graph_top), Some(Rgb565::YELLOW));
    }
}
