//! Shared helpers for unit tests

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Draw target that counts pixels inside and outside an expected region.
pub struct CountingTarget {
    size: Size,
    region: Rectangle,
    pub drawn: usize,
    pub outside: usize,
}

impl CountingTarget {
    pub fn new(size: Size, region: Rectangle) -> Self {
        Self {
            size,
            region,
            drawn: 0,
            outside: 0,
        }
    }
}

impl OriginDimensions for CountingTarget {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for CountingTarget {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, _) in pixels {
            if self.region.contains(point) {
                self.drawn += 1;
            } else {
                self.outside += 1;
            }
        }
        Ok(())
    }
}
