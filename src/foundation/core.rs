pub use kurbo::{Affine, Point, Rect, Vec2};

/// Opaque identifier a host context returns from hit tests.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u64);

/// Premultiplied RGBA color with `f32` channels in `[0, 1]`.
///
/// Every raster backend converts to and from this representation at its boundary, so all
/// interpolation happens on premultiplied values.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel premultiplied by alpha.
    pub r: f32,
    /// Green channel premultiplied by alpha.
    pub g: f32,
    /// Blue channel premultiplied by alpha.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Build from already premultiplied channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from straight channels.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert straight-alpha channels into premultiplied form.
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied `f32`.
    pub fn from_straight_rgba8(px: [u8; 4]) -> Self {
        let f = |c: u8| f32::from(c) / 255.0;
        Self::from_straight(f(px[0]), f(px[1]), f(px[2]), f(px[3]))
    }

    /// Convert back to straight-alpha RGBA8, rounding to nearest.
    pub fn to_straight_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        if c.a <= 0.0 {
            return [0, 0, 0, 0];
        }
        let q = |v: f32| ((v * 255.0).round() as i32).clamp(0, 255) as u8;
        [q(c.r / c.a), q(c.g / c.a), q(c.b / c.a), q(c.a)]
    }

    /// Return `true` when alpha is zero (or below).
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Clamp alpha into `[0, 1]` and color channels into `[0, alpha]`.
    ///
    /// Cubic kernels overshoot; this restores a valid premultiplied value.
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        Self {
            r: self.r.clamp(0.0, a),
            g: self.g.clamp(0.0, a),
            b: self.b.clamp(0.0, a),
            a,
        }
    }

    pub(crate) fn scale(self, k: f32) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a * k,
        }
    }

    pub(crate) fn add(self, o: Self) -> Self {
        Self {
            r: self.r + o.r,
            g: self.g + o.g,
            b: self.b + o.b,
            a: self.a + o.a,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
