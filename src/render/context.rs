//! What a warp needs from the content beneath it.

use crate::foundation::core::{LayerId, Point, Rect, Rgba};
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::{Quality, RasterMut};
use crate::render::desc::RenderDesc;
use crate::render::progress::ProgressCallback;

/// Rows rendered between progress reports.
pub(crate) const PROGRESS_ROWS: u32 = 32;

/// The upstream image a warp resamples.
///
/// Implementations must be usable through `&self` only: a warp may query and render the
/// same context from several strips at once.
pub trait Context {
    /// Color at a world point.
    fn color_at(&self, p: Point) -> Rgba;

    /// Topmost layer hit at a world point, if any.
    fn hit_test(&self, p: Point) -> Option<LayerId>;

    /// Bounds of all content; [`RectExt::full_plane`](crate::RectExt::full_plane) when
    /// unbounded.
    fn full_bounding_rect(&self) -> Rect;

    /// Rasterize the window `desc` into `target`, resizing it to `desc.w x desc.h`.
    fn render(
        &self,
        target: &mut dyn RasterMut,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()>;
}

impl<C: Context + ?Sized> Context for &C {
    fn color_at(&self, p: Point) -> Rgba {
        (**self).color_at(p)
    }

    fn hit_test(&self, p: Point) -> Option<LayerId> {
        (**self).hit_test(p)
    }

    fn full_bounding_rect(&self) -> Rect {
        (**self).full_bounding_rect()
    }

    fn render(
        &self,
        target: &mut dyn RasterMut,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        (**self).render(target, quality, desc, progress)
    }
}

/// Render by evaluating `color_at` at the top-left corner of every pixel.
///
/// Suitable for analytic contexts; reports progress every 32 rows.
pub fn render_by_color_at<C: Context + ?Sized>(
    ctx: &C,
    target: &mut dyn RasterMut,
    desc: &RenderDesc,
    progress: &mut dyn ProgressCallback,
) -> WarpResult<()> {
    desc.validate()?;
    target.reset(desc.w, desc.h);
    for y in 0..desc.h {
        for x in 0..desc.w {
            target.set_pixel(x, y, ctx.color_at(desc.pixel_point(x, y)));
        }
        if y % PROGRESS_ROWS == 0 && !progress.amount_complete(u64::from(y), u64::from(desc.h))
        {
            target.clear();
            return Err(WarpError::Cancelled);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
