use super::*;
use crate::raster::Raster;
use crate::raster::surface::Surface;
use crate::render::progress::NoProgress;

#[test]
fn fills_the_requested_window() {
    let red = SolidColor::new(Rgba::opaque(1.0, 0.0, 0.0));
    let desc = RenderDesc::new(Point::new(0.0, 1.0), Point::new(3.0, 0.0), 3, 2);
    let mut s = Surface::default();
    red.render(&mut s, Quality::default(), &desc, &mut NoProgress)
        .unwrap();
    assert_eq!((s.width(), s.height()), (3, 2));
    assert!(s.pixels().iter().all(|p| *p == red.color));
    assert!(red.full_bounding_rect().is_unbounded());
}

#[test]
fn transparent_plane_is_never_hit() {
    let clear = SolidColor::new(Rgba::TRANSPARENT);
    assert_eq!(clear.hit_test(Point::ZERO), None);
    let mut opaque = SolidColor::new(Rgba::opaque(0.0, 0.0, 0.0));
    opaque.id = LayerId(3);
    assert_eq!(opaque.hit_test(Point::new(1e9, -1e9)), Some(LayerId(3)));
}
