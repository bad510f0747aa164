use super::*;
use crate::raster::surface::Surface;

#[test]
fn quality_tiers_select_kernels() {
    assert_eq!(Quality::BEST.interpolation(), Interpolation::Cubic);
    assert_eq!(Quality(4).interpolation(), Interpolation::Cubic);
    assert_eq!(Quality(5).interpolation(), Interpolation::Linear);
    assert_eq!(Quality(6).interpolation(), Interpolation::Linear);
    assert_eq!(Quality(7).interpolation(), Interpolation::Nearest);
    assert_eq!(Quality(10).interpolation(), Interpolation::Nearest);
}

#[test]
fn default_fill_and_clear_touch_every_pixel() {
    let mut s = Surface::new(3, 2);
    assert!(!s.is_empty());
    RasterMut::fill(&mut s, Rgba::opaque(1.0, 0.0, 0.0));
    assert!(s.pixels().iter().all(|p| p.a == 1.0));
    s.clear();
    assert!(s.pixels().iter().all(|p| p.is_transparent()));
    assert!(Surface::default().is_empty());
}
