//! Raster capability traits shared by every pixel backend.
//!
//! The resampler is written once against [`Raster`] / [`RasterMut`]; backends only supply
//! dimensions and per-pixel access in premultiplied [`Rgba`].

pub(crate) mod rgba8;
pub(crate) mod sample;
pub(crate) mod surface;

use crate::foundation::core::Rgba;

/// Interpolation kernel used when sampling a raster at fractional coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Floor to the containing pixel.
    Nearest,
    /// Bilinear over the 2x2 neighborhood.
    Linear,
    /// Catmull-Rom bicubic over the 4x4 neighborhood.
    Cubic,
}

/// Render quality knob: lower is better.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Quality(pub u8);

impl Quality {
    /// Best quality.
    pub const BEST: Self = Self(0);

    /// Kernel tier: cubic up to 4, linear up to 6, nearest beyond.
    pub fn interpolation(self) -> Interpolation {
        match self.0 {
            0..=4 => Interpolation::Cubic,
            5..=6 => Interpolation::Linear,
            _ => Interpolation::Nearest,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(4)
    }
}

/// Read access to a rectangular grid of premultiplied pixels.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Pixel at `(x, y)`; callers keep `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Rgba;

    /// Return `true` when the raster holds no pixels.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Nearest-neighbor sample at pixel-space coordinates.
    fn sample_nearest(&self, u: f64, v: f64) -> Rgba {
        sample::nearest(self, u, v)
    }

    /// Bilinear sample at pixel-space coordinates.
    fn sample_linear(&self, u: f64, v: f64) -> Rgba {
        sample::linear(self, u, v)
    }

    /// Bicubic sample at pixel-space coordinates, clamped to a valid premultiplied value.
    fn sample_cubic(&self, u: f64, v: f64) -> Rgba {
        sample::cubic(self, u, v)
    }

    /// Sample with the given kernel.
    fn sample(&self, interpolation: Interpolation, u: f64, v: f64) -> Rgba {
        match interpolation {
            Interpolation::Nearest => self.sample_nearest(u, v),
            Interpolation::Linear => self.sample_linear(u, v),
            Interpolation::Cubic => self.sample_cubic(u, v),
        }
    }
}

/// Write access on top of [`Raster`].
pub trait RasterMut: Raster {
    /// Store a premultiplied pixel at `(x, y)`.
    fn set_pixel(&mut self, x: u32, y: u32, c: Rgba);

    /// Resize to `width x height`, every pixel transparent.
    fn reset(&mut self, width: u32, height: u32);

    /// Overwrite every pixel with `c`.
    fn fill(&mut self, c: Rgba) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, c);
            }
        }
    }

    /// Overwrite every pixel with transparent.
    fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mod.rs"]
mod tests;
