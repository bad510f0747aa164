//! The warp layer: parameters, cached homography, and the render entry points.

use crate::foundation::core::{LayerId, Point, Rect, Rgba};
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::rect::RectExt;
use crate::layer::params::{ParamValue, WarpParams};
use crate::raster::surface::Surface;
use crate::raster::{Quality, RasterMut};
use crate::render::RenderOpts;
use crate::render::context::Context;
use crate::render::desc::RenderDesc;
use crate::render::progress::{ProgressCallback, ProgressStage};
use crate::render::region::{clip_region, project_region, source_desc};
use crate::render::resample::Resampler;
use crate::transform::homography::{Homography, Quad};
use crate::transform::transformation::Transformation;

const PROGRESS_TOTAL: u64 = 10_000;
const PROGRESS_SPLIT: u64 = 9_000;

/// Maps the content of a source rectangle onto an arbitrary destination quad.
///
/// Mutating parameters needs `&mut self`; all queries and renders take `&self`, so a warp
/// can be rendered from several threads at once.
#[derive(Clone, Debug)]
pub struct Warp {
    params: WarpParams,
    homography: Homography,
    opts: RenderOpts,
}

impl Default for Warp {
    fn default() -> Self {
        Self::build(WarpParams::default())
    }
}

impl Warp {
    /// Validate `params` and build the homography.
    pub fn new(params: WarpParams) -> WarpResult<Self> {
        params.validate()?;
        Ok(Self::build(params))
    }

    fn build(params: WarpParams) -> Self {
        let homography = Homography::new(params.src_tl, params.src_br, &params.dest_quad());
        Self {
            params,
            homography,
            opts: RenderOpts::default(),
        }
    }

    /// Replace the render options.
    pub fn with_opts(mut self, opts: RenderOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Current render options.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Current parameters.
    pub fn params(&self) -> &WarpParams {
        &self.params
    }

    /// The cached source ↔ world mapping.
    pub fn homography(&self) -> &Homography {
        &self.homography
    }

    fn rebuild(&mut self) {
        self.homography.rebuild(
            self.params.src_tl,
            self.params.src_br,
            &self.params.dest_quad(),
        );
    }

    /// Replace every parameter at once.
    pub fn set_params(&mut self, params: WarpParams) -> WarpResult<()> {
        params.validate()?;
        self.params = params;
        self.rebuild();
        Ok(())
    }

    /// Move the source rectangle.
    pub fn set_src(&mut self, tl: Point, br: Point) -> WarpResult<()> {
        let params = WarpParams {
            src_tl: tl,
            src_br: br,
            ..self.params.clone()
        };
        self.set_params(params)
    }

    /// Move the four destination corners.
    pub fn set_dest(&mut self, quad: Quad) -> WarpResult<()> {
        let params = WarpParams {
            dest_tl: quad.tl,
            dest_tr: quad.tr,
            dest_bl: quad.bl,
            dest_br: quad.br,
            ..self.params.clone()
        };
        self.set_params(params)
    }

    /// Toggle clipping.
    pub fn set_clip(&mut self, clip: bool) {
        self.params.clip = clip;
    }

    /// Change the horizon depth.
    pub fn set_horizon(&mut self, horizon: f64) -> WarpResult<()> {
        self.set_param("horizon", ParamValue::Real(horizon))
    }

    /// Set one parameter by name; control points rebuild the matrix.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> WarpResult<()> {
        if self.params.set(name, value)? {
            self.rebuild();
        }
        Ok(())
    }

    /// Read one parameter by name.
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name)
    }

    /// Map a world point into the source and check clip and horizon.
    fn source_point(&self, p: Point) -> Option<Point> {
        let newpos = self.homography.map_forward(p);
        if self.params.clip && !self.params.src_rect().contains_closed(newpos) {
            return None;
        }
        Some(newpos)
    }

    /// Color of the warped content at world point `p`.
    pub fn color_at<C: Context + ?Sized>(&self, ctx: &C, p: Point) -> Rgba {
        let Some(newpos) = self.source_point(p) else {
            return Rgba::TRANSPARENT;
        };
        let z = self.homography.depth_backward(newpos);
        if z > 0.0 && z < self.params.horizon {
            ctx.color_at(newpos)
        } else {
            Rgba::TRANSPARENT
        }
    }

    /// Layer hit at world point `p` after unwarping it. No horizon test is applied.
    pub fn hit_test<C: Context + ?Sized>(&self, ctx: &C, p: Point) -> Option<LayerId> {
        let newpos = self.source_point(p)?;
        ctx.hit_test(newpos)
    }

    /// The warp may cover any point of the plane.
    pub fn bounding_rect(&self) -> Rect {
        Rect::full_plane()
    }

    /// Bounds of the warped upstream content.
    pub fn full_bounding_rect<C: Context + ?Sized>(&self, ctx: &C) -> Rect {
        let mut under = ctx.full_bounding_rect();
        if self.params.clip {
            under = under.intersect(self.params.src_rect());
        }
        self.transform().transform_bounds(under)
    }

    /// The source → world transform.
    pub fn transform(&self) -> Transformation {
        Transformation::from_matrix(*self.homography.matrix())
    }

    /// The source window a host must render to produce `desc`, or `None` when nothing is
    /// visible.
    pub fn sub_render_desc(&self, desc: &RenderDesc) -> Option<RenderDesc> {
        let clip = self.params.clip.then(|| self.params.dest_quad().bounds());
        let region = project_region(&self.homography, desc.rect(), clip, self.params.horizon)?;
        Some(source_desc(
            region.bounds,
            desc,
            region.zoom,
            self.opts.max_tile_side,
        ))
    }

    /// Render the warped `ctx` into `dest`, resized to `desc.w x desc.h`.
    ///
    /// Progress runs from 0 to 10000: the upstream tile render takes the first 9000.
    pub fn render<C: Context + ?Sized>(
        &self,
        ctx: &C,
        dest: &mut dyn RasterMut,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        let mut tile = Surface::default();
        self.render_with_tile(ctx, dest, &mut tile, quality, desc, progress)
    }

    /// [`Warp::render`] with a caller-provided scratch tile.
    #[tracing::instrument(
        skip_all,
        fields(w = desc.w, h = desc.h, quality = quality.0, clip = self.params.clip)
    )]
    pub fn render_with_tile<C, T>(
        &self,
        ctx: &C,
        dest: &mut dyn RasterMut,
        tile: &mut T,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()>
    where
        C: Context + ?Sized,
        T: RasterMut,
    {
        desc.validate()?;
        dest.reset(desc.w, desc.h);

        let render_rect = desc.rect();
        let dest_rect = self.params.dest_quad().bounds();
        if self.params.clip && !render_rect.touches(&dest_rect) {
            tracing::debug!(?render_rect, ?dest_rect, "window misses destination quad");
            return Ok(());
        }

        let clip = self.params.clip.then_some(dest_rect);
        let Some(region) = project_region(&self.homography, render_rect, clip, self.params.horizon)
        else {
            return Ok(());
        };

        let mut clip_rect = Rect::full_plane();
        if self.params.clip {
            clip_rect = clip_rect.intersect(self.params.src_rect());
        }
        clip_rect = clip_rect.intersect(ctx.full_bounding_rect());

        let bounds = clip_region(region.bounds, clip_rect);
        let tile_desc = source_desc(bounds, desc, region.zoom, self.opts.max_tile_side);
        if tile_desc.w == 0 || tile_desc.h == 0 {
            tracing::debug!(?tile_desc, "empty source tile");
            return Ok(());
        }
        tracing::debug!(?tile_desc, zoom = region.zoom, "rendering source tile");

        tile.reset(tile_desc.w, tile_desc.h);
        {
            let mut stage = ProgressStage::new(&mut *progress, 0, PROGRESS_SPLIT, PROGRESS_TOTAL);
            ctx.render(tile, quality, &tile_desc, &mut stage)
                .map_err(|e| match e {
                    WarpError::Cancelled | WarpError::Upstream(_) => e,
                    other => WarpError::upstream(other.to_string()),
                })?;
        }
        if tile.width() != tile_desc.w || tile.height() != tile_desc.h {
            return Err(WarpError::upstream(format!(
                "context rendered {}x{} for a {}x{} tile",
                tile.width(),
                tile.height(),
                tile_desc.w,
                tile_desc.h
            )));
        }

        let resampler = Resampler {
            homography: &self.homography,
            clip_rect,
            horizon: self.params.horizon,
            tile_desc: &tile_desc,
            interpolation: quality.interpolation(),
            context: ctx,
        };
        {
            let mut stage = ProgressStage::new(
                &mut *progress,
                PROGRESS_SPLIT,
                PROGRESS_TOTAL,
                PROGRESS_TOTAL,
            );
            resampler.run(&*tile, dest, desc, &mut stage)?;
        }

        if !progress.amount_complete(PROGRESS_TOTAL, PROGRESS_TOTAL) {
            dest.clear();
            return Err(WarpError::Cancelled);
        }
        Ok(())
    }

    /// Stack this warp over `under`, yielding a context that can itself be warped.
    pub fn over<'a, C: Context + ?Sized>(&'a self, under: &'a C) -> WarpedContext<'a, C> {
        WarpedContext { warp: self, under }
    }
}

/// A warp applied to the context beneath it.
pub struct WarpedContext<'a, C: ?Sized> {
    warp: &'a Warp,
    under: &'a C,
}

impl<C: Context + ?Sized> Context for WarpedContext<'_, C> {
    fn color_at(&self, p: Point) -> Rgba {
        self.warp.color_at(self.under, p)
    }

    fn hit_test(&self, p: Point) -> Option<LayerId> {
        self.warp.hit_test(self.under, p)
    }

    fn full_bounding_rect(&self) -> Rect {
        self.warp.full_bounding_rect(self.under)
    }

    fn render(
        &self,
        target: &mut dyn RasterMut,
        quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        self.warp.render(self.under, target, quality, desc, progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/warp.rs"]
mod tests;
