//! Projection of a destination window into the source rectangle a host must render.
//!
//! Only the four corners of the window are mapped. Under a perspective transform the image
//! of a rectangle is not bounded by the images of its corners, and a horizon crossing the
//! window's interior goes unnoticed; this is an accepted approximation.

use crate::foundation::core::{Point, Rect};
use crate::foundation::rect::RectExt;
use crate::render::desc::RenderDesc;
use crate::transform::homography::Homography;

/// Added to a zero-width (or zero-height) source extent before computing densities.
pub const DEGENERATE_NUDGE: f64 = 0.001;

/// Initial running minimum depth; any surviving corner replaces it.
const MIN_DEPTH_SEED: f64 = 1e13;

/// Source-space bounds of a destination window plus how much to oversample them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedRegion {
    /// Bounding box of the surviving projected corners, in source space.
    pub bounds: Rect,
    /// `1 + (max_depth - min_depth)` over the surviving corners.
    pub zoom: f64,
}

/// Map the corners of `window` (intersected with `clip` when given) into source space.
///
/// Corners whose depth falls outside `(0, 2 * horizon)` are dropped. Returns `None` when no
/// corner survives or the homography is singular.
pub fn project_region(
    h: &Homography,
    window: Rect,
    clip: Option<Rect>,
    horizon: f64,
) -> Option<ProjectedRegion> {
    if h.is_singular() {
        tracing::debug!("singular homography; projected region is empty");
        return None;
    }

    let other = match clip {
        Some(c) => window.intersect(c),
        None => window,
    };
    let corners = [
        Point::new(other.x0, other.y0),
        Point::new(other.x1, other.y1),
        Point::new(other.x0, other.y1),
        Point::new(other.x1, other.y0),
    ];

    let mut bounds: Option<Rect> = None;
    let (mut min_z, mut max_z) = (MIN_DEPTH_SEED, 0.0_f64);
    for c in corners {
        let p = h.map_forward(c);
        let z = h.depth_backward(p);
        if !(z > 0.0 && z < 2.0 * horizon) {
            continue;
        }
        bounds = Some(match bounds {
            Some(b) => b.union_pt(p),
            None => Rect::from_points(p, p),
        });
        min_z = min_z.min(z);
        max_z = max_z.max(z);
    }

    let region = bounds.map(|bounds| ProjectedRegion {
        bounds,
        zoom: 1.0 + (max_z - min_z),
    });
    tracing::debug!(?region, "projected destination window");
    region
}

/// The render description for the source tile covering `bounds`.
///
/// Degenerate extents are nudged by [`DEGENERATE_NUDGE`], the tile keeps the orientation of
/// `dest`, and its side is `ceil(max(dest.w, dest.h) * zoom)` capped at `max_tile_side`.
pub fn source_desc(bounds: Rect, dest: &RenderDesc, zoom: f64, max_tile_side: u32) -> RenderDesc {
    let min = Point::new(bounds.x0, bounds.y0);
    let mut max = Point::new(bounds.x1, bounds.y1);
    if min.x == max.x {
        max.x += DEGENERATE_NUDGE;
    }
    if min.y == max.y {
        max.y += DEGENERATE_NUDGE;
    }

    let (tl_x, br_x) = if dest.tl.x > dest.br.x {
        (max.x, min.x)
    } else {
        (min.x, max.x)
    };
    let (tl_y, br_y) = if dest.tl.y > dest.br.y {
        (max.y, min.y)
    } else {
        (min.y, max.y)
    };
    let tl = Point::new(tl_x, tl_y);
    let br = Point::new(br_x, br_y);

    let tmp_d = f64::from(dest.w.max(dest.h));
    let src_pw = tmp_d * zoom / (br.x - tl.x);
    let src_ph = tmp_d * zoom / (br.y - tl.y);

    let side = |v: f64| -> u32 {
        if !(v > 0.0) {
            return 0;
        }
        let v = v.ceil();
        if v > f64::from(max_tile_side) {
            tracing::debug!(requested = v, max_tile_side, "source tile side capped");
            max_tile_side
        } else {
            v as u32
        }
    };

    RenderDesc::new(
        tl,
        br,
        side(src_pw * (br.x - tl.x)),
        side(src_ph * (br.y - tl.y)),
    )
}

/// Intersect `region` with the active clip rectangle.
///
/// Disjoint inputs collapse to a zero-area rectangle on the clip edge nearest the region;
/// [`source_desc`] nudges it into a thin tile and every pixel outside that tile falls back to
/// the context's `color_at`.
pub fn clip_region(region: Rect, clip_rect: Rect) -> Rect {
    let r = region.intersect(clip_rect);
    let bounds = Rect::new(r.x0, r.y0, r.x1.max(r.x0), r.y1.max(r.y0));
    if bounds.has_no_area() {
        tracing::debug!(?region, ?clip_rect, ?bounds, "projected region collapsed by clip rect");
    }
    bounds
}

#[cfg(test)]
#[path = "../../tests/unit/render/region.rs"]
mod tests;
