use super::*;
use crate::foundation::core::{LayerId, Point, Rect, Rgba};
use crate::foundation::rect::RectExt;
use crate::layer::params::WarpParams;
use crate::render::context::render_by_color_at;

struct Gradient;

impl Context for Gradient {
    fn color_at(&self, p: Point) -> Rgba {
        Rgba::opaque(((p.x + 2.0) / 4.0) as f32, ((2.0 - p.y) / 4.0) as f32, 0.5)
    }

    fn hit_test(&self, _p: Point) -> Option<LayerId> {
        None
    }

    fn full_bounding_rect(&self) -> Rect {
        Rect::full_plane()
    }

    fn render(
        &self,
        target: &mut dyn RasterMut,
        _quality: Quality,
        desc: &RenderDesc,
        progress: &mut dyn ProgressCallback,
    ) -> WarpResult<()> {
        render_by_color_at(self, target, desc, progress)
    }
}

fn identity_warp() -> Warp {
    Warp::new(WarpParams {
        dest_tl: Point::new(-2.0, 2.0),
        dest_tr: Point::new(2.0, 2.0),
        dest_bl: Point::new(-2.0, -2.0),
        dest_br: Point::new(2.0, -2.0),
        ..WarpParams::default()
    })
    .unwrap()
}

fn desc() -> RenderDesc {
    RenderDesc::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), 16, 16)
}

#[test]
fn strips_cover_every_row_once() {
    assert_eq!(strip_ranges(10, 4), vec![(0, 4), (4, 8), (8, 10)]);
    assert_eq!(strip_ranges(3, 0), vec![(0, 1), (1, 2), (2, 3)]);
    assert!(strip_ranges(0, 4).is_empty());
}

#[test]
fn sequential_and_parallel_match_a_single_render() {
    let warp = identity_warp();
    let d = desc();

    let mut full = Surface::default();
    warp.render(&Gradient, &mut full, Quality::default(), &d, &mut NoProgress)
        .unwrap();
    let expected = Surface::from_fn(16, 16, |x, y| Gradient.color_at(d.pixel_point(x, y)));
    assert_eq!(full, expected);

    let mut seen = Vec::new();
    let mut record = |c: u64, t: u64| {
        seen.push((c, t));
        true
    };
    let mut seq = Surface::default();
    let stats = render_tiled(
        &warp,
        &Gradient,
        &mut seq,
        Quality::default(),
        &d,
        &RenderThreading {
            parallel: false,
            rows_per_strip: 4,
            threads: None,
        },
        &mut record,
    )
    .unwrap();
    assert_eq!(stats, TileStats { strips: 4, rows: 16 });
    assert_eq!(seq, full);
    assert_eq!(seen, vec![(4, 16), (8, 16), (12, 16), (16, 16)]);

    let mut par = Surface::default();
    render_tiled(
        &warp,
        &Gradient,
        &mut par,
        Quality::default(),
        &d,
        &RenderThreading {
            parallel: true,
            rows_per_strip: 4,
            threads: Some(2),
        },
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(par, full);
}

#[test]
fn cancellation_clears_destination() {
    let mut dest = Surface::new(16, 16);
    let mut stop = |_: u64, _: u64| false;
    let err = render_tiled(
        &identity_warp(),
        &Gradient,
        &mut dest,
        Quality::default(),
        &desc(),
        &RenderThreading {
            rows_per_strip: 4,
            ..RenderThreading::default()
        },
        &mut stop,
    )
    .unwrap_err();
    assert!(err.is_cancelled());
    assert!(dest.pixels().iter().all(|p| p.is_transparent()));
}

#[test]
fn zero_threads_is_rejected() {
    let mut dest = Surface::default();
    let err = render_tiled(
        &identity_warp(),
        &Gradient,
        &mut dest,
        Quality::default(),
        &desc(),
        &RenderThreading {
            parallel: true,
            rows_per_strip: 4,
            threads: Some(0),
        },
        &mut NoProgress,
    )
    .unwrap_err();
    assert!(err.to_string().contains("threads"));
}
