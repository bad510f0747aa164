use super::*;

fn assert_close(a: &Matrix3, b: &Matrix3, eps: f64) {
    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (a.0[i][j] - b.0[i][j]).abs() < eps,
                "m[{i}][{j}]: {} vs {}",
                a.0[i][j],
                b.0[i][j]
            );
        }
    }
}

#[test]
fn inverse_of_translation_is_exact() {
    let m = Matrix3([[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]);
    let inv = m.inverted().unwrap();
    assert_eq!(
        inv,
        Matrix3([[1.0, 0.0, 1.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]])
    );
}

#[test]
fn inverse_times_matrix_is_identity_for_projective() {
    let m = Matrix3([[2.0, 0.3, -1.0], [0.1, 1.5, 0.7], [0.05, -0.2, 1.0]]);
    let inv = m.inverted().unwrap();
    assert_close(&(m * inv), &Matrix3::IDENTITY, 1e-12);
    assert_close(&(inv * m), &Matrix3::IDENTITY, 1e-12);
}

#[test]
fn singular_matrix_has_no_inverse() {
    let m = Matrix3([[0.0, 0.0, 0.5], [0.0, 0.0, 0.5], [0.0, 0.0, 1.0]]);
    assert_eq!(m.determinant(), 0.0);
    assert!(m.inverted().is_none());
}

#[test]
fn transform_point_divides_by_depth() {
    let m = Matrix3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.0, 1.0]]);
    let p = Point::new(2.0, 4.0);
    assert_eq!(m.depth(p), 2.0);
    assert_eq!(m.transform_point(p), Point::new(1.0, 2.0));

    let at_infinity = m.transform_point(Point::new(-2.0, 1.0));
    assert!(!at_infinity.x.is_finite());
}

#[test]
fn affine_embedding_roundtrips() {
    let a = Affine::translate((3.0, -1.0)) * Affine::scale_non_uniform(2.0, 0.5);
    let m = Matrix3::from_affine(a);
    assert!(m.is_affine());
    assert_eq!(m.to_affine(), Some(a));

    let p = Point::new(1.5, -2.0);
    let q = m.transform_point(p);
    let r = a * p;
    assert!((q - r).hypot() < 1e-12);

    let proj = Matrix3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.1, 0.0, 1.0]]);
    assert!(proj.to_affine().is_none());
}
