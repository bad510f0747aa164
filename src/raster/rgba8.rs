//! 8-bit straight-alpha backend over [`image::RgbaImage`].
//!
//! Pixels are premultiplied on read and un-premultiplied on write, so the resampler still
//! interpolates premultiplied values. Writes quantize to 8 bits.

use image::RgbaImage;

use crate::foundation::core::Rgba;
use crate::raster::{Raster, RasterMut};

/// Adapter exposing an [`RgbaImage`] as a [`Raster`] / [`RasterMut`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rgba8Surface {
    image: RgbaImage,
}

impl Rgba8Surface {
    /// Transparent image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap a decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Borrow the underlying image.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Unwrap into the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for Rgba8Surface {
    fn from(image: RgbaImage) -> Self {
        Self::from_image(image)
    }
}

impl Raster for Rgba8Surface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        Rgba::from_straight_rgba8(self.image.get_pixel(x, y).0)
    }
}

impl RasterMut for Rgba8Surface {
    fn set_pixel(&mut self, x: u32, y: u32, c: Rgba) {
        self.image.put_pixel(x, y, image::Rgba(c.to_straight_rgba8()));
    }

    fn reset(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/rgba8.rs"]
mod tests;
