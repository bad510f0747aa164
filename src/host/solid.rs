use crate::foundation::core::{LayerId, Point, Rect, Rgba};
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::rect::RectExt;
use crate::raster::{Quality, RasterMut};
use crate::render::context::Context;
use crate::render::desc::RenderDesc;
use crate::render::progress::ProgressCallback;

/// An infinite plane of one color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor {
    /// Premultiplied fill color.
    pub color: Rgba,
    /// Reported by hit tests when the color is not transparent.
    pub id: LayerId,
}

impl SolidColor {
    /// A plane of `color` with layer id `0`.
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            id: LayerId(0),
        }
    }
}

impl Context for SolidColor {
    fn color_at(&self, _p: Point) -> Rgba {
        self.color
    }

    fn hit_test(&self, _p: Point) -> Option<LayerId> {
        (!self.color.is_transparent()).then_some(self.id)
    }

    fn full_bounding_rect(&self) -> Rect {
        Rect::full_plane()
    }

    fn render(
        &self,
        target: &mut dyn RasterMut,
        _quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        desc.validate()?;
        target.reset(desc.w, desc.h);
        target.fill(self.color);
        if !progress.amount_complete(u64::from(desc.h), u64::from(desc.h)) {
            target.clear();
            return Err(WarpError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/solid.rs"]
mod tests;
