//! In-memory framebuffer with changed-region tracking.
//!
//! Pages draw into this RAM buffer instead of the panel. After a frame is
//! complete only the bounding box of changed pixels is pushed to the display,
//! which keeps SPI traffic to the small panel low between identical frames.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Panel width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 160;

/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 80;

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Full-panel RGB565 buffer implementing `DrawTarget`.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a black framebuffer. The first flush pushes the whole panel.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            dirty: Some(DirtyRect {
                min_x: 0,
                min_y: 0,
                max_x: WIDTH - 1,
                max_y: HEIGHT - 1,
            }),
        }
    }

    /// Color of a pixel, `None` outside the panel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x < WIDTH && y < HEIGHT {
            Some(self.pixels[y * WIDTH + x])
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Push the changed region to `display` and reset the change tracking.
    ///
    /// Does nothing when no pixel changed since the last flush.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let width = rect.max_x - rect.min_x + 1;
        let height = rect.max_y - rect.min_y + 1;

        debug!(
            "Flushing {}x{} region at ({}, {})",
            width, height, rect.min_x, rect.min_y
        );

        let area = Rectangle::new(
            Point::new(rect.min_x as i32, rect.min_y as i32),
            Size::new(width as u32, height as u32),
        );

        let pixels = &self.pixels;
        let rows = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * WIDTH + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, rows)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < WIDTH
                && (coord.y as usize) < HEIGHT
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clamp = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        let x = area.top_left.x as i64;
        let y = area.top_left.y as i64;
        let x_start = clamp(x, WIDTH);
        let y_start = clamp(y, HEIGHT);
        let x_end = clamp(x + area.size.width as i64, WIDTH);
        let y_end = clamp(y + area.size.height as i64, HEIGHT);

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    /// Records the areas pushed by `flush`.
    struct Panel {
        flushed: Vec<Rectangle>,
    }

    impl OriginDimensions for Panel {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for Panel {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, _colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.flushed.push(*area);
            Ok(())
        }
    }

    #[test]
    fn test_first_flush_covers_panel() {
        let mut frame = FrameBuffer::new();
        let mut panel = Panel { flushed: Vec::new() };
        frame.flush(&mut panel).unwrap();
        assert_eq!(panel.flushed, [Rectangle::new(Point::zero(), Size::new(160, 80))]);
        assert!(!frame.is_dirty());
    }

    #[test]
    fn test_flush_only_changed_region() {
        let mut frame = FrameBuffer::new();
        let mut panel = Panel { flushed: Vec::new() };
        frame.flush(&mut panel).unwrap();

        Rectangle::new(Point::new(10, 5), Size::new(4, 3))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut frame)
            .unwrap();
        frame.flush(&mut panel).unwrap();
        assert_eq!(
            panel.flushed[1],
            Rectangle::new(Point::new(10, 5), Size::new(4, 3))
        );
        assert_eq!(frame.pixel(11, 6), Some(Rgb565::RED));

        // Redrawing the same pixels changes nothing
        frame
            .fill_solid(&Rectangle::new(Point::new(10, 5), Size::new(4, 3)), Rgb565::RED)
            .unwrap();
        frame.flush(&mut panel).unwrap();
        assert_eq!(panel.flushed.len(), 2);
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut frame = FrameBuffer::new();
        frame
            .fill_solid(&Rectangle::new(Point::new(150, 70), Size::new(50, 50)), Rgb565::BLUE)
            .unwrap();
        assert_eq!(frame.pixel(159, 79), Some(Rgb565::BLUE));
        assert_eq!(frame.pixel(160, 79), None);

        frame
            .fill_solid(&Rectangle::new(Point::new(-5, -5), Size::new(10, 10)), Rgb565::RED)
            .unwrap();
        assert_eq!(frame.pixel(4, 4), Some(Rgb565::RED));
        assert_eq!(frame.pixel(5, 5), Some(Rgb565::BLACK));
    }
}
