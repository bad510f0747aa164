use super::*;
use crate::foundation::core::LayerId;
use crate::raster::Quality;
use crate::raster::surface::Surface;
use crate::render::progress::NoProgress;
use crate::transform::homography::Quad;

const FALLBACK: Rgba = Rgba::new(0.0, 0.5, 0.0, 0.5);

struct Fallback;

impl Context for Fallback {
    fn color_at(&self, _p: Point) -> Rgba {
        FALLBACK
    }

    fn hit_test(&self, _p: Point) -> Option<LayerId> {
        None
    }

    fn full_bounding_rect(&self) -> Rect {
        Rect::full_plane()
    }

    fn render(
        &self,
        _target: &mut dyn RasterMut,
        _quality: Quality,
        _desc: &RenderDesc,
        _progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        Err(WarpError::upstream("not used"))
    }
}

fn identity() -> Homography {
    let tl = Point::new(-2.0, 2.0);
    let br = Point::new(2.0, -2.0);
    Homography::new(tl, br, &Quad::from_rect(tl, br))
}

fn checker() -> Surface {
    Surface::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba::opaque(1.0, 1.0, 1.0)
        } else {
            Rgba::TRANSPARENT
        }
    })
}

#[test]
fn identity_copies_the_tile() {
    let h = identity();
    let tile_desc = RenderDesc::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), 4, 4);
    let tile = checker();
    for interpolation in [
        Interpolation::Nearest,
        Interpolation::Linear,
        Interpolation::Cubic,
    ] {
        let r = Resampler {
            homography: &h,
            clip_rect: Rect::full_plane(),
            horizon: 4.0,
            tile_desc: &tile_desc,
            interpolation,
            context: &Fallback,
        };
        let mut dest = Surface::new(4, 4);
        r.run(&tile, &mut dest, &tile_desc, &mut NoProgress).unwrap();
        assert_eq!(dest, tile, "{interpolation:?}");
    }
}

#[test]
fn outside_tile_uses_context_and_outside_clip_is_transparent() {
    let h = identity();
    let tile_desc = RenderDesc::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), 4, 4);
    let tile = checker();
    let r = Resampler {
        homography: &h,
        clip_rect: Rect::new(-2.0, -4.0, 4.0, 4.0),
        horizon: 4.0,
        tile_desc: &tile_desc,
        interpolation: Interpolation::Nearest,
        context: &Fallback,
    };
    // x from -4 to 4, one pixel per unit.
    let wide = RenderDesc::new(Point::new(-4.0, 2.0), Point::new(4.0, -2.0), 8, 4);
    let mut dest = Surface::new(8, 4);
    r.run(&tile, &mut dest, &wide, &mut NoProgress).unwrap();

    let row = dest.row(0);
    assert!(row[0].is_transparent() && row[1].is_transparent());
    assert_eq!(row[2], tile.pixel(0, 0));
    assert_eq!(row[5], tile.pixel(3, 0));
    assert_eq!(row[6], FALLBACK);
    assert_eq!(row[7], FALLBACK);
}

#[test]
fn depth_outside_horizon_is_transparent() {
    let h = identity();
    let tile_desc = RenderDesc::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), 4, 4);
    let r = Resampler {
        homography: &h,
        clip_rect: Rect::full_plane(),
        horizon: 1.0,
        tile_desc: &tile_desc,
        interpolation: Interpolation::Nearest,
        context: &Fallback,
    };
    let mut dest = Surface::new(4, 4);
    r.run(&checker(), &mut dest, &tile_desc, &mut NoProgress).unwrap();
    assert!(dest.pixels().iter().all(|p| p.is_transparent()));
}

#[test]
fn cancellation_clears_destination() {
    let h = identity();
    let tile_desc = RenderDesc::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), 4, 4);
    let r = Resampler {
        homography: &h,
        clip_rect: Rect::full_plane(),
        horizon: 4.0,
        tile_desc: &tile_desc,
        interpolation: Interpolation::Nearest,
        context: &Fallback,
    };
    let mut dest = Surface::new(4, 4);
    let mut cancel = |_: u64, _: u64| false;
    let err = r
        .run(&checker(), &mut dest, &tile_desc, &mut cancel)
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(dest.pixels().iter().all(|p| p.is_transparent()));
}
