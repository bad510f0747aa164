use super::*;

fn default_quad() -> Quad {
    Quad {
        tl: Point::new(-1.8, 2.1),
        tr: Point::new(1.8, 2.1),
        bl: Point::new(-2.2, -2.0),
        br: Point::new(2.2, -2.0),
    }
}

fn assert_near(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} vs {b:?}");
}

#[test]
fn square_onto_itself_is_exact_identity() {
    let tl = Point::new(-2.0, 2.0);
    let br = Point::new(2.0, -2.0);
    let h = Homography::new(tl, br, &Quad::from_rect(tl, br));
    assert_eq!(*h.matrix(), Matrix3::IDENTITY);
    assert_eq!(*h.inverse(), Matrix3::IDENTITY);
    assert!(!h.is_singular());
    assert_eq!(h.map_forward(Point::new(0.25, -1.5)), Point::new(0.25, -1.5));
}

#[test]
fn source_corners_land_on_destination_corners() {
    let quad = default_quad();
    for (src_tl, src_br) in [
        (Point::new(-2.0, 2.0), Point::new(2.0, -2.0)),
        (Point::new(2.0, -2.0), Point::new(-2.0, 2.0)),
        (Point::new(-2.0, -2.0), Point::new(2.0, 2.0)),
    ] {
        let h = Homography::new(src_tl, src_br, &quad);
        let src_tr = Point::new(src_br.x, src_tl.y);
        let src_bl = Point::new(src_tl.x, src_br.y);
        assert_near(h.map_backward(src_tl), quad.tl);
        assert_near(h.map_backward(src_tr), quad.tr);
        assert_near(h.map_backward(src_bl), quad.bl);
        assert_near(h.map_backward(src_br), quad.br);
    }
}

#[test]
fn forward_then_backward_round_trips() {
    let h = Homography::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), &default_quad());
    for p in [
        Point::new(0.0, 0.0),
        Point::new(1.3, -0.7),
        Point::new(-1.9, 1.9),
        Point::new(2.0, -2.0),
    ] {
        assert_near(h.map_backward(h.map_forward(p)), p);
        assert_near(h.map_forward(h.map_backward(p)), p);
    }
}

#[test]
fn source_rect_has_positive_depth() {
    let h = Homography::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), &default_quad());
    for p in default_quad().corners() {
        let s = h.map_forward(p);
        let z = h.depth_backward(s);
        assert!(z > 0.0 && z < 2.0, "depth {z} at {s:?}");
    }
    assert!(!h.matrix().is_affine());
}

#[test]
fn parallelogram_keeps_exact_affine_row() {
    let quad = Quad {
        tl: Point::new(-1.0, 2.0),
        tr: Point::new(3.0, 2.0),
        bl: Point::new(-2.0, -1.0),
        br: Point::new(2.0, -1.0),
    };
    let h = Homography::new(Point::new(-2.0, 2.0), Point::new(2.0, -2.0), &quad);
    assert_eq!(h.matrix().0[2], [0.0, 0.0, 1.0]);
    assert!(h.matrix().is_affine());
}

#[test]
fn collapsed_quad_is_singular_and_keeps_stale_inverse() {
    let tl = Point::new(-2.0, 2.0);
    let br = Point::new(2.0, -2.0);
    let mut h = Homography::new(
        tl,
        br,
        &Quad {
            tl: Point::new(-1.0, 1.0),
            tr: Point::new(1.0, 1.0),
            bl: Point::new(-1.0, -1.0),
            br: Point::new(1.0, -1.0),
        },
    );
    let before = *h.inverse();

    let dot = Point::new(0.5, 0.5);
    h.rebuild(
        tl,
        br,
        &Quad {
            tl: dot,
            tr: dot,
            bl: dot,
            br: dot,
        },
    );
    assert!(h.is_singular());
    assert_eq!(h.matrix().determinant(), 0.0);
    assert_eq!(*h.inverse(), before);
    assert_eq!(h.map_backward(Point::new(1.0, 1.0)), dot);

    h.rebuild(tl, br, &Quad::from_rect(tl, br));
    assert!(!h.is_singular());
    assert_eq!(*h.inverse(), Matrix3::IDENTITY);
}

#[test]
fn quad_bounds_cover_all_corners() {
    let q = default_quad();
    assert_eq!(q.bounds(), Rect::new(-2.2, -2.0, 2.2, 2.1));

    let bowtie = Quad {
        tl: Point::new(0.0, 0.0),
        tr: Point::new(1.0, 3.0),
        bl: Point::new(-1.0, 2.0),
        br: Point::new(2.0, 1.0),
    };
    assert_eq!(bowtie.bounds(), Rect::new(-1.0, 0.0, 2.0, 3.0));
}
