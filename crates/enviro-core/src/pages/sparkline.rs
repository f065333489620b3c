//! Tiny trend line drawn from a history buffer.
//!
//! Each segment takes the band colour of the value it ends on, so a trend
//! that crosses a breakpoint changes colour where it crosses.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::history::HistoryBuffer;
use crate::metrics::Band;
use crate::reading::Variable;

/// Ranges narrower than this are drawn as a flat line
const MIN_RANGE: f64 = 1e-9;

/// Trend line of the newest values of a history, one value per pixel column.
pub struct Sparkline<'a, const N: usize> {
    history: &'a HistoryBuffer<N>,
    area: Rectangle,
    variable: Variable,
}

impl<'a, const N: usize> Sparkline<'a, N> {
    pub fn new(history: &'a HistoryBuffer<N>, area: Rectangle, variable: Variable) -> Self {
        Self {
            history,
            area,
            variable,
        }
    }

    fn columns(&self) -> usize {
        (self.area.size.width as usize).min(self.history.len())
    }

    /// Pixel row for `value` given the plotted range.
    fn row(&self, value: f64, lo: f64, hi: f64) -> i32 {
        let span = (self.area.size.height.max(1) - 1) as f64;
        let bottom = self.area.top_left.y + span as i32;
        let range = hi - lo;
        let offset = if range < MIN_RANGE {
            span / 2.0
        } else {
            (value - lo) / range * span
        };
        // offset is within [0, span], so adding 0.5 and truncating rounds it
        bottom - (offset + 0.5) as i32
    }

    /// Points to plot with the value behind each, left to right.
    fn samples(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        let columns = self.columns();
        let (lo, hi) = self
            .history
            .recent(columns)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let x0 = self.area.top_left.x;

        self.history
            .recent(columns)
            .enumerate()
            .map(move |(i, value)| (Point::new(x0 + i as i32, self.row(value, lo, hi)), value))
    }

    /// Points to plot, left to right.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples().map(|(point, _)| point)
    }

    /// Colour of a point or of the segment ending on it
    pub fn color(&self, value: f64) -> Rgb565 {
        Band::assess(self.variable, value).color()
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut previous: Option<Point> = None;
        for (point, value) in self.samples() {
            let color = self.color(value);
            match previous {
                Some(start) => Line::new(start, point)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(display)?,
                None => Pixel(point, color).draw(display)?,
            }
            previous = Some(point);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use alloc::vec::Vec;

    fn area() -> Rectangle {
        Rectangle::new(Point::new(10, 20), Size::new(4, 5))
    }

    #[test]
    fn test_newest_values_map_to_columns() {
        let mut history = HistoryBuffer::<6>::filled(0.0);
        for v in [0.0, 4.0, 2.0, 1.0] {
            history.push(v);
        }
        let points: Vec<Point> = Sparkline::new(&history, area(), Variable::Humidity)
            .points()
            .collect();
        // Range 0..4 maps onto rows 24 (bottom) to 20 (top)
        assert_eq!(
            points,
            [
                Point::new(10, 24),
                Point::new(11, 20),
                Point::new(12, 22),
                Point::new(13, 23),
            ]
        );
    }

    #[test]
    fn test_flat_history_is_centered() {
        let history = HistoryBuffer::<8>::filled(7.0);
        let points: Vec<Point> = Sparkline::new(&history, area(), Variable::Humidity)
            .points()
            .collect();
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.y == 22));
    }

    #[test]
    fn test_segments_take_the_band_of_their_end_value() {
        // Humidity: 45 is normal, 65 high, 75 dangerously high
        let mut history = HistoryBuffer::<4>::filled(45.0);
        history.push(65.0);
        history.push(75.0);
        let area = Rectangle::new(Point::new(0, 0), Size::new(4, 11));
        let sparkline = Sparkline::new(&history, area, Variable::Humidity);

        let mut frame = FrameBuffer::new();
        sparkline.draw(&mut frame).unwrap();

        let points: Vec<Point> = sparkline.points().collect();
        assert_eq!(
            points,
            [
                Point::new(0, 10),
                Point::new(1, 10),
                Point::new(2, 3),
                Point::new(3, 0),
            ]
        );
        assert_eq!(frame.pixel(0, 10), Some(Rgb565::GREEN));
        assert_eq!(frame.pixel(1, 9), Some(Rgb565::YELLOW));
        assert_eq!(frame.pixel(3, 0), Some(Rgb565::RED));
    }
}
