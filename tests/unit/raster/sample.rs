use super::*;
use crate::raster::surface::Surface;
use crate::raster::{Interpolation, Raster};

fn row_stripe() -> Surface {
    // 4x4, only row 1 opaque white.
    Surface::from_fn(4, 4, |_, y| {
        if y == 1 {
            Rgba::opaque(1.0, 1.0, 1.0)
        } else {
            Rgba::TRANSPARENT
        }
    })
}

fn ramp() -> Surface {
    Surface::from_fn(4, 1, |x, _| {
        let a = x as f32 / 3.0;
        Rgba::new(a, 0.0, 0.0, a)
    })
}

#[test]
fn weights_sum_to_one_and_interpolate_at_zero() {
    assert_eq!(catmull_rom_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    for t in [0.1_f32, 0.25, 0.5, 0.9] {
        let s: f32 = catmull_rom_weights(t).iter().sum();
        assert!((s - 1.0).abs() < 1e-6);
    }
    assert_eq!(catmull_rom_weights(0.5), [-0.0625, 0.5625, 0.5625, -0.0625]);
}

#[test]
fn integer_coordinates_hit_pixels_exactly() {
    let s = ramp();
    for x in 0..4 {
        let want = s.pixel(x, 0);
        for k in [
            Interpolation::Nearest,
            Interpolation::Linear,
            Interpolation::Cubic,
        ] {
            assert_eq!(s.sample(k, f64::from(x), 0.0), want, "{k:?} at {x}");
        }
    }
}

#[test]
fn half_pixel_offset_separates_tiers() {
    let s = row_stripe();
    assert_eq!(s.sample_nearest(0.0, 1.5).a, 1.0);
    assert!((s.sample_linear(0.0, 1.5).a - 0.5).abs() < 1e-6);
    assert!((s.sample_cubic(0.0, 1.5).a - 0.5625).abs() < 1e-6);
}

#[test]
fn cubic_overshoot_is_clamped() {
    // A lone opaque pixel next to transparent ones makes negative lobes.
    let s = Surface::from_fn(4, 1, |x, _| {
        if x == 2 {
            Rgba::opaque(1.0, 1.0, 1.0)
        } else {
            Rgba::TRANSPARENT
        }
    });
    let c = s.sample_cubic(0.5, 0.0);
    assert!(c.a >= 0.0 && c.r >= 0.0 && c.r <= c.a);
}

#[test]
fn edges_clamp_and_empty_is_transparent() {
    let s = ramp();
    assert_eq!(s.sample_linear(3.5, 0.0), s.pixel(3, 0));
    assert_eq!(s.sample_nearest(-3.0, -7.0), s.pixel(0, 0));
    assert!(Surface::default().sample_cubic(0.0, 0.0).is_transparent());
}
