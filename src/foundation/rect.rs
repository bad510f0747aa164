//! Bounds helpers on top of [`kurbo::Rect`].
//!
//! All helpers assume a normalized rectangle (`x0 <= x1`, `y0 <= y1`); build rectangles with
//! [`Rect::from_points`] when corner order is unknown.

use crate::foundation::core::{Point, Rect};

/// Extra rectangle operations used by the region projector and resampler.
pub trait RectExt {
    /// The unbounded rectangle covering the whole plane.
    fn full_plane() -> Rect;

    /// Return `true` if any extent is infinite.
    fn is_unbounded(&self) -> bool;

    /// Point containment including the boundary.
    fn contains_closed(&self, p: Point) -> bool;

    /// Closed overlap test: touching rectangles intersect.
    fn touches(&self, other: &Rect) -> bool;

    /// Return `true` when either side has no extent.
    fn has_no_area(&self) -> bool;

    /// Bounding box of a set of points, `None` for an empty set.
    fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect>;
}

impl RectExt for Rect {
    fn full_plane() -> Rect {
        Rect::new(
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::INFINITY,
        )
    }

    fn is_unbounded(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .any(|v| v.is_infinite())
    }

    fn contains_closed(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    fn touches(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    fn has_no_area(&self) -> bool {
        !(self.x1 > self.x0 && self.y1 > self.y0)
    }

    fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rect.rs"]
mod tests;
