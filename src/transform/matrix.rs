use std::ops::Mul;

use crate::foundation::core::{Affine, Point};

/// Row-major 3x3 matrix acting on homogeneous column vectors `(x, y, 1)`.
///
/// `m[2]` is the projective row; its dot product with `(x, y, 1)` is the homogeneous depth.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix3(pub [[f64; 3]; 3]);

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// The identity transform.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Embed a 2D affine transform (last row `(0, 0, 1)`).
    pub fn from_affine(a: Affine) -> Self {
        let [a0, a1, a2, a3, a4, a5] = a.as_coeffs();
        Self([[a0, a2, a4], [a1, a3, a5], [0.0, 0.0, 1.0]])
    }

    /// Convert back to an affine transform when the projective row is exactly `(0, 0, 1)`.
    pub fn to_affine(&self) -> Option<Affine> {
        if !self.is_affine() {
            return None;
        }
        let m = &self.0;
        Some(Affine::new([
            m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2],
        ]))
    }

    /// Return `true` when the projective row is exactly `(0, 0, 1)`.
    pub fn is_affine(&self) -> bool {
        self.0[2] == [0.0, 0.0, 1.0]
    }

    /// Determinant by cofactor expansion along the first column.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[1][0] * (m[0][1] * m[2][2] - m[0][2] * m[2][1])
            + m[2][0] * (m[0][1] * m[1][2] - m[0][2] * m[1][1])
    }

    /// Adjugate-over-determinant inverse.
    ///
    /// Returns `None` only when the determinant is exactly `0.0`; nearly singular matrices
    /// still invert, with correspondingly large coefficients.
    #[rustfmt::skip]
    pub fn inverted(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let d = 1.0 / det;
        let m = &self.0;
        Some(Self([
            [
                 (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * d,
                -(m[0][1] * m[2][2] - m[0][2] * m[2][1]) * d,
                 (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * d,
            ],
            [
                -(m[1][0] * m[2][2] - m[1][2] * m[2][0]) * d,
                 (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * d,
                -(m[0][0] * m[1][2] - m[0][2] * m[1][0]) * d,
            ],
            [
                 (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * d,
                -(m[0][0] * m[2][1] - m[0][1] * m[2][0]) * d,
                 (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * d,
            ],
        ]))
    }

    /// Homogeneous depth `w` of `p` (no division).
    #[inline]
    pub fn depth(&self, p: Point) -> f64 {
        let r = &self.0[2];
        r[0] * p.x + r[1] * p.y + r[2]
    }

    /// Project `p` and divide by its depth.
    ///
    /// A zero depth is not special-cased: the result is infinite or NaN.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.0;
        let w = self.depth(p);
        Point::new(
            (m[0][0] * p.x + m[0][1] * p.y + m[0][2]) / w,
            (m[1][0] * p.x + m[1][1] * p.y + m[1][2]) / w,
        )
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Matrix3(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
