//! A raster placed on a world-space rectangle.

use image::RgbaImage;

use crate::foundation::core::{LayerId, Point, Rect, Rgba};
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::surface::Surface;
use crate::raster::{Interpolation, Quality, Raster, RasterMut};
use crate::render::context::{Context, PROGRESS_ROWS};
use crate::render::desc::RenderDesc;
use crate::render::progress::ProgressCallback;

/// An image whose pixel `(0, 0)` corner sits at `tl` and whose far corner sits at `br`.
///
/// Outside that rectangle the layer is transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    surface: Surface,
    placement: RenderDesc,
    interpolation: Interpolation,
    id: LayerId,
}

impl ImageLayer {
    /// Place `surface` on the rectangle spanned by `tl` and `br`.
    pub fn new(surface: Surface, tl: Point, br: Point) -> WarpResult<Self> {
        let placement = RenderDesc::new(tl, br, surface.width(), surface.height());
        placement.validate()?;
        if surface.is_empty() {
            return Err(WarpError::validation("image layer needs at least one pixel"));
        }
        Ok(Self {
            surface,
            placement,
            interpolation: Interpolation::Linear,
            id: LayerId(0),
        })
    }

    /// Place a straight-alpha RGBA8 image.
    pub fn from_rgba8(image: &RgbaImage, tl: Point, br: Point) -> WarpResult<Self> {
        let surface = Surface::from_fn(image.width(), image.height(), |x, y| {
            Rgba::from_straight_rgba8(image.get_pixel(x, y).0)
        });
        Self::new(surface, tl, br)
    }

    /// Kernel used by [`Context::color_at`]; renders use the quality tier instead.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Id returned by hits on opaque pixels.
    pub fn with_id(mut self, id: LayerId) -> Self {
        self.id = id;
        self
    }

    /// The placed pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    fn pixel_coords(&self, p: Point) -> Option<(f64, f64)> {
        let u = (p.x - self.placement.tl.x) * self.placement.pw();
        let v = (p.y - self.placement.tl.y) * self.placement.ph();
        let inside = u >= 0.0
            && v >= 0.0
            && u < f64::from(self.surface.width())
            && v < f64::from(self.surface.height());
        inside.then_some((u, v))
    }

    fn sample(&self, interpolation: Interpolation, p: Point) -> Rgba {
        match self.pixel_coords(p) {
            Some((u, v)) => self.surface.sample(interpolation, u, v),
            None => Rgba::TRANSPARENT,
        }
    }
}

impl Context for ImageLayer {
    fn color_at(&self, p: Point) -> Rgba {
        self.sample(self.interpolation, p)
    }

    fn hit_test(&self, p: Point) -> Option<LayerId> {
        let (u, v) = self.pixel_coords(p)?;
        (!self.surface.sample_nearest(u, v).is_transparent()).then_some(self.id)
    }

    fn full_bounding_rect(&self) -> Rect {
        self.placement.rect()
    }

    fn render(
        &self,
        target: &mut dyn RasterMut,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        desc.validate()?;
        target.reset(desc.w, desc.h);
        let interpolation = quality.interpolation();
        for y in 0..desc.h {
            for x in 0..desc.w {
                target.set_pixel(x, y, self.sample(interpolation, desc.pixel_point(x, y)));
            }
            if y % PROGRESS_ROWS == 0 && !progress.amount_complete(u64::from(y), u64::from(desc.h))
            {
                target.clear();
                return Err(WarpError::Cancelled);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/image_layer.rs"]
mod tests;
