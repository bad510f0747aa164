use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::rect::RectExt;
use crate::transform::matrix::Matrix3;

/// A planar point transform, either affine or fully projective.
///
/// Affine transforms stay on [`kurbo::Affine`] so that callers composing plain placements
/// never pay for (or lose precision to) the homogeneous division.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transformation {
    /// Affine transform.
    Affine(Affine),
    /// Projective transform; points with zero depth map to infinity.
    Perspective(Matrix3),
}

impl Default for Transformation {
    fn default() -> Self {
        Self::Affine(Affine::IDENTITY)
    }
}

impl Transformation {
    /// Classify a matrix: exactly-affine matrices become [`Transformation::Affine`].
    pub fn from_matrix(m: Matrix3) -> Self {
        match m.to_affine() {
            Some(a) => Self::Affine(a),
            None => Self::Perspective(m),
        }
    }

    /// The homogeneous matrix of this transform.
    pub fn matrix(&self) -> Matrix3 {
        match self {
            Self::Affine(a) => Matrix3::from_affine(*a),
            Self::Perspective(m) => *m,
        }
    }

    /// Map a point.
    pub fn transform_point(&self, p: Point) -> Point {
        match self {
            Self::Affine(a) => *a * p,
            Self::Perspective(m) => m.transform_point(p),
        }
    }

    /// Inverse transform, `None` when singular.
    pub fn inverted(&self) -> Option<Self> {
        match self {
            Self::Affine(a) => {
                if a.determinant() == 0.0 {
                    None
                } else {
                    Some(Self::Affine(a.inverse()))
                }
            }
            Self::Perspective(m) => m.inverted().map(Self::Perspective),
        }
    }

    /// Compose `self` followed by `next` into a single transform.
    ///
    /// Returns `None` when the product has non-finite coefficients.
    pub fn try_merge(&self, next: &Self) -> Option<Self> {
        let merged = match (self, next) {
            (Self::Affine(a), Self::Affine(b)) => Self::Affine(*b * *a),
            _ => Self::Perspective(next.matrix() * self.matrix()),
        };
        merged.is_finite().then_some(merged)
    }

    /// Bounding box of the image of `bounds`.
    ///
    /// The full plane maps to itself. For perspective transforms the four corners are
    /// projected; if any corner reaches or crosses the horizon (non-positive depth) the
    /// image is unbounded and the full plane is returned.
    pub fn transform_bounds(&self, bounds: Rect) -> Rect {
        if bounds.is_unbounded() {
            return Rect::full_plane();
        }
        match self {
            Self::Affine(a) => a.transform_rect_bbox(bounds),
            Self::Perspective(m) => {
                let corners = [
                    Point::new(bounds.x0, bounds.y0),
                    Point::new(bounds.x1, bounds.y0),
                    Point::new(bounds.x1, bounds.y1),
                    Point::new(bounds.x0, bounds.y1),
                ];
                if corners.iter().any(|&c| !(m.depth(c) > 0.0)) {
                    return Rect::full_plane();
                }
                Rect::bounding(corners.map(|c| m.transform_point(c))).unwrap_or(bounds)
            }
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Affine(a) => a.is_finite(),
            Self::Perspective(m) => m.0.iter().flatten().all(|v| v.is_finite()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/transformation.rs"]
mod tests;
