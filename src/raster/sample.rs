//! Interpolation kernels over any [`Raster`].
//!
//! Sample coordinates use the pixel-corner convention: pixel `(x, y)` covers
//! `[x, x+1) × [y, y+1)` and integer coordinates land exactly on a pixel. Neighbors outside
//! the raster are clamped to the nearest edge pixel.

use crate::foundation::core::Rgba;
use crate::raster::Raster;

#[inline]
fn clamp_index(i: i64, len: u32) -> u32 {
    i.clamp(0, i64::from(len) - 1) as u32
}

#[inline]
fn edge<R: Raster + ?Sized>(r: &R, x: i64, y: i64) -> Rgba {
    r.pixel(clamp_index(x, r.width()), clamp_index(y, r.height()))
}

/// Catmull-Rom weights (`a = -0.5`) for taps at offsets `-1, 0, 1, 2` from `floor(u)`.
#[inline]
pub(crate) fn catmull_rom_weights(t: f32) -> [f32; 4] {
    [
        ((-0.5 * t + 1.0) * t - 0.5) * t,
        (1.5 * t - 2.5) * t * t + 1.0,
        ((-1.5 * t + 2.0) * t + 0.5) * t,
        (0.5 * t - 0.5) * t * t,
    ]
}

pub(crate) fn nearest<R: Raster + ?Sized>(r: &R, u: f64, v: f64) -> Rgba {
    if r.width() == 0 || r.height() == 0 {
        return Rgba::TRANSPARENT;
    }
    edge(r, u.floor() as i64, v.floor() as i64)
}

pub(crate) fn linear<R: Raster + ?Sized>(r: &R, u: f64, v: f64) -> Rgba {
    if r.width() == 0 || r.height() == 0 {
        return Rgba::TRANSPARENT;
    }
    let (x0, y0) = (u.floor(), v.floor());
    let (fx, fy) = ((u - x0) as f32, (v - y0) as f32);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = edge(r, x0, y0)
        .scale(1.0 - fx)
        .add(edge(r, x0.saturating_add(1), y0).scale(fx));
    let bottom = edge(r, x0, y0.saturating_add(1))
        .scale(1.0 - fx)
        .add(edge(r, x0.saturating_add(1), y0.saturating_add(1)).scale(fx));
    top.scale(1.0 - fy).add(bottom.scale(fy))
}

pub(crate) fn cubic<R: Raster + ?Sized>(r: &R, u: f64, v: f64) -> Rgba {
    if r.width() == 0 || r.height() == 0 {
        return Rgba::TRANSPARENT;
    }
    let (x0, y0) = (u.floor(), v.floor());
    let wx = catmull_rom_weights((u - x0) as f32);
    let wy = catmull_rom_weights((v - y0) as f32);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = Rgba::TRANSPARENT;
    for (j, ky) in wy.iter().enumerate() {
        let y = y0.saturating_add(j as i64 - 1);
        let mut row = Rgba::TRANSPARENT;
        for (i, kx) in wx.iter().enumerate() {
            row = row.add(edge(r, x0.saturating_add(i as i64 - 1), y).scale(*kx));
        }
        acc = acc.add(row.scale(*ky));
    }
    acc.clamped()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sample.rs"]
mod tests;
