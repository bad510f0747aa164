//! Source-rectangle → destination-quad homography and the point mappers built on it.
//!
//! Naming follows the warp layer's point of view: *forward* maps a world (destination) point
//! back into the source rectangle, *backward* maps a source point out into the world.

use crate::foundation::core::{Point, Rect};
use crate::transform::matrix::Matrix3;

/// The four destination corners of a warp.
///
/// No convexity or orientation is assumed; self-intersecting quads still produce a
/// (visually degenerate) matrix.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    /// Destination of the source top-left corner.
    pub tl: Point,
    /// Destination of the source top-right corner.
    pub tr: Point,
    /// Destination of the source bottom-left corner.
    pub bl: Point,
    /// Destination of the source bottom-right corner.
    pub br: Point,
}

impl Quad {
    /// The quad formed by the corners of the rectangle spanned by `tl` and `br`.
    pub fn from_rect(tl: Point, br: Point) -> Self {
        Self {
            tl,
            tr: Point::new(br.x, tl.y),
            bl: Point::new(tl.x, br.y),
            br,
        }
    }

    /// Corners in `tl, tr, br, bl` winding order.
    pub fn corners(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Axis-aligned bounding box of the four corners.
    pub fn bounds(&self) -> Rect {
        let [tl, tr, br, bl] = self.corners();
        Rect::from_points(tl, br).union_pt(tr).union_pt(bl)
    }
}

/// Build the source → destination matrix.
///
/// The destination corners are first reordered so that `t1..t4` are the images of the unit
/// square corners `(0,0), (1,0), (0,1), (1,1)` of the normalized source rectangle, whichever
/// diagonal order `src_tl`/`src_br` were given in. The unit-square matrix is then composed
/// with the scale+translate that maps the source rectangle onto the unit square.
pub fn build_matrix(src_tl: Point, src_br: Point, dest: &Quad) -> Matrix3 {
    let x1 = src_tl.x.min(src_br.x);
    let y1 = src_tl.y.min(src_br.y);
    let x2 = src_tl.x.max(src_br.x);
    let y2 = src_tl.y.max(src_br.y);

    let (mut t1, mut t2, mut t3, mut t4) = (dest.bl, dest.br, dest.tl, dest.tr);
    if src_br.x < src_tl.x {
        std::mem::swap(&mut t3, &mut t4);
        std::mem::swap(&mut t1, &mut t2);
    }
    if src_br.y > src_tl.y {
        std::mem::swap(&mut t3, &mut t1);
        std::mem::swap(&mut t4, &mut t2);
    }

    let scalex = if x2 - x1 > 0.0 { 1.0 / (x2 - x1) } else { 1.0 };
    let scaley = if y2 - y1 > 0.0 { 1.0 / (y2 - y1) } else { 1.0 };

    let unit = unit_square_to_quad(t1, t2, t3, t4);
    let scaletrans = Matrix3([
        [scalex, 0.0, -x1 * scalex],
        [0.0, scaley, -y1 * scaley],
        [0.0, 0.0, 1.0],
    ]);
    unit * scaletrans
}

fn unit_square_to_quad(t1: Point, t2: Point, t3: Point, t4: Point) -> Matrix3 {
    let dx1 = t2.x - t4.x;
    let dx2 = t3.x - t4.x;
    let dx3 = t1.x - t2.x + t4.x - t3.x;

    let dy1 = t2.y - t4.y;
    let dy2 = t3.y - t4.y;
    let dy3 = t1.y - t2.y + t4.y - t3.y;

    if dx3 == 0.0 && dy3 == 0.0 {
        return Matrix3([
            [t2.x - t1.x, t4.x - t2.x, t1.x],
            [t2.y - t1.y, t4.y - t2.y, t1.y],
            [0.0, 0.0, 1.0],
        ]);
    }

    // Both determinants zero means the quad has no projective solution; 1.0 is a fixed
    // fallback, not a derived coefficient.
    let det2 = dx1 * dy2 - dy1 * dx2;
    let det1 = dx3 * dy2 - dy3 * dx2;
    let g = if det1 == 0.0 && det2 == 0.0 {
        1.0
    } else {
        det1 / det2
    };
    let det1 = dx1 * dy3 - dy1 * dx3;
    let h = if det1 == 0.0 && det2 == 0.0 {
        1.0
    } else {
        det1 / det2
    };

    Matrix3([
        [t2.x - t1.x + g * t2.x, t3.x - t1.x + h * t3.x, t1.x],
        [t2.y - t1.y + g * t2.y, t3.y - t1.y + h * t3.y, t1.y],
        [g, h, 1.0],
    ])
}

/// Cached forward matrix and inverse for one warp instance.
///
/// When a rebuild produces a matrix with a determinant of exactly zero the previous inverse
/// is kept (stale) and [`Homography::is_singular`] reports it. Before the first successful
/// rebuild the inverse is the identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Homography {
    matrix: Matrix3,
    inverse: Matrix3,
    singular: bool,
}

impl Homography {
    /// Build from a source rectangle and destination quad.
    pub fn new(src_tl: Point, src_br: Point, dest: &Quad) -> Self {
        let mut h = Self::default();
        h.rebuild(src_tl, src_br, dest);
        h
    }

    /// Recompute the matrix after any control point changed.
    pub fn rebuild(&mut self, src_tl: Point, src_br: Point, dest: &Quad) {
        self.matrix = build_matrix(src_tl, src_br, dest);
        match self.matrix.inverted() {
            Some(inv) => {
                self.inverse = inv;
                self.singular = false;
            }
            None => {
                tracing::warn!(
                    ?src_tl,
                    ?src_br,
                    ?dest,
                    "singular warp matrix; keeping previous inverse"
                );
                self.singular = true;
            }
        }
    }

    /// Source → world matrix.
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// World → source matrix (possibly stale, see [`Homography::is_singular`]).
    pub fn inverse(&self) -> &Matrix3 {
        &self.inverse
    }

    /// Return `true` when the last rebuild produced a non-invertible matrix.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Map a world point into source space.
    #[inline]
    pub fn map_forward(&self, p: Point) -> Point {
        self.inverse.transform_point(p)
    }

    /// Map a source point into world space.
    #[inline]
    pub fn map_backward(&self, p: Point) -> Point {
        self.matrix.transform_point(p)
    }

    /// Homogeneous depth of a world point under the inverse matrix.
    #[inline]
    pub fn depth_forward(&self, p: Point) -> f64 {
        self.inverse.depth(p)
    }

    /// Homogeneous depth of a source point under the forward matrix; used for horizon tests.
    #[inline]
    pub fn depth_backward(&self, p: Point) -> f64 {
        self.matrix.depth(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/homography.rs"]
mod tests;
