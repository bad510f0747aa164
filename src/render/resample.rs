//! The per-pixel resampling loop.

use crate::foundation::core::{Point, Rect, Rgba};
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::rect::RectExt;
use crate::raster::{Interpolation, Raster, RasterMut};
use crate::render::context::{Context, PROGRESS_ROWS};
use crate::render::desc::RenderDesc;
use crate::render::progress::ProgressCallback;
use crate::transform::homography::Homography;

/// Everything the loop needs besides the rasters themselves.
pub struct Resampler<'a, C: ?Sized> {
    /// Mapping between world (destination) and source space.
    pub homography: &'a Homography,
    /// Source-space rectangle outside of which pixels are transparent.
    pub clip_rect: Rect,
    /// Pixels whose source depth is not in `(0, horizon)` are transparent.
    pub horizon: f64,
    /// Description of the already rendered source tile.
    pub tile_desc: &'a RenderDesc,
    /// Kernel used inside the tile.
    pub interpolation: Interpolation,
    /// Fallback for points that land outside the tile.
    pub context: &'a C,
}

impl<C: Context + ?Sized> Resampler<'_, C> {
    /// Color of one destination point.
    #[inline]
    pub fn shade<S: Raster + ?Sized>(&self, tile: &S, point: Point, pw: f64, ph: f64) -> Rgba {
        let tmp = self.homography.map_forward(point);
        let z = self.homography.depth_backward(tmp);
        if !self.clip_rect.contains_closed(tmp) || !(z > 0.0 && z < self.horizon) {
            return Rgba::TRANSPARENT;
        }

        let u = (tmp.x - self.tile_desc.tl.x) * pw;
        let v = (tmp.y - self.tile_desc.tl.y) * ph;
        let inside = u >= 0.0
            && v >= 0.0
            && u < f64::from(tile.width())
            && v < f64::from(tile.height());
        if inside {
            tile.sample(self.interpolation, u, v)
        } else {
            // also catches NaN
            self.context.color_at(tmp)
        }
    }

    /// Fill `dest` (already sized to `desc`) row by row.
    ///
    /// Progress is reported every 32 rows; on cancellation `dest` is cleared before the error
    /// is returned.
    pub fn run<S, D>(
        &self,
        tile: &S,
        dest: &mut D,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()>
    where
        S: Raster + ?Sized,
        D: RasterMut + ?Sized,
    {
        let pw = self.tile_desc.pw();
        let ph = self.tile_desc.ph();
        for y in 0..desc.h {
            for x in 0..desc.w {
                let c = self.shade(tile, desc.pixel_point(x, y), pw, ph);
                dest.set_pixel(x, y, c);
            }
            if y % PROGRESS_ROWS == 0 && !progress.amount_complete(u64::from(y), u64::from(desc.h))
            {
                dest.clear();
                return Err(WarpError::Cancelled);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
