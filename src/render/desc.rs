use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{WarpError, WarpResult};

/// A world-space window rasterized to `w x h` pixels.
///
/// `tl` maps to the corner of pixel `(0, 0)` and `br` to the far corner of pixel
/// `(w-1, h-1)`. Either axis may be flipped (`br.y < tl.y` is the usual y-up layout), in
/// which case the matching pixel density is negative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderDesc {
    /// World position of the top-left pixel corner.
    pub tl: Point,
    /// World position of the bottom-right pixel corner.
    pub br: Point,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl RenderDesc {
    /// Build a description.
    pub fn new(tl: Point, br: Point, w: u32, h: u32) -> Self {
        Self { tl, br, w, h }
    }

    /// Pixels per world unit along x (signed).
    pub fn pw(&self) -> f64 {
        f64::from(self.w) / (self.br.x - self.tl.x)
    }

    /// Pixels per world unit along y (signed).
    pub fn ph(&self) -> f64 {
        f64::from(self.h) / (self.br.y - self.tl.y)
    }

    /// Normalized world rectangle covered by the window.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.tl, self.br)
    }

    /// World position of the top-left corner of pixel `(x, y)`.
    #[inline]
    pub fn pixel_point(&self, x: u32, y: u32) -> Point {
        Point::new(
            self.tl.x + f64::from(x) / self.pw(),
            self.tl.y + f64::from(y) / self.ph(),
        )
    }

    /// The window covering pixel rows `y0..y1` of `self`, at the same density.
    pub fn rows(&self, y0: u32, y1: u32) -> Self {
        let ph = self.ph();
        Self {
            tl: Point::new(self.tl.x, self.tl.y + f64::from(y0) / ph),
            br: Point::new(self.br.x, self.tl.y + f64::from(y1) / ph),
            w: self.w,
            h: y1.saturating_sub(y0),
        }
    }

    /// Reject non-finite corners and zero-extent axes that carry pixels.
    pub fn validate(&self) -> WarpResult<()> {
        if ![self.tl.x, self.tl.y, self.br.x, self.br.y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(WarpError::validation(format!(
                "render desc corners must be finite: {:?} / {:?}",
                self.tl, self.br
            )));
        }
        if (self.w > 0 && self.tl.x == self.br.x) || (self.h > 0 && self.tl.y == self.br.y) {
            return Err(WarpError::validation(
                "render desc has zero world extent on a non-empty axis",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/desc.rs"]
mod tests;
