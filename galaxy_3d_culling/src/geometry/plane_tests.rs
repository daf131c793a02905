use glam::{Vec3, Vec4};
use super::*;

const EPS: f32 = 1e-5;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_plane_from_vec4() {
    let plane = Plane::from_vec4(Vec4::new(0.0, 1.0, 0.0, -3.0));
    assert_eq!(plane.normal(), Vec3::Y);
    assert_eq!(plane.d(), -3.0);
    assert_eq!(Plane::from(Vec4::new(0.0, 1.0, 0.0, -3.0)), plane);
    assert_eq!(plane.to_vec4(), Vec4::new(0.0, 1.0, 0.0, -3.0));
}

#[test]
fn test_plane_from_point_normal() {
    let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert_eq!(plane.d(), -5.0);
    assert!(plane.distance(Vec3::new(7.0, -2.0, 5.0)).abs() < EPS);
}

#[test]
fn test_plane_setters() {
    let mut plane = Plane::default();

    plane.set(Vec3::X, 2.0);
    assert_eq!(plane, Plane::new(Vec3::X, 2.0));

    plane.set_from_point(Vec3::Y, Vec3::new(1.0, 4.0, 1.0));
    assert_eq!(plane, Plane::new(Vec3::Y, -4.0));

    plane.set_from_vec4(Vec4::new(0.0, 0.0, -1.0, 8.0));
    assert_eq!(plane, Plane::new(Vec3::NEG_Z, 8.0));
}

// ============================================================================
// distance
// ============================================================================

#[test]
fn test_distance_zero_on_plane() {
    let normal = Vec3::new(1.0, 2.0, -2.0).normalize();
    let point = Vec3::new(3.0, -1.0, 4.0);
    let plane = Plane::from_point_normal(point, normal);

    // Any point on the plane: point + vector orthogonal to the normal
    let tangent = normal.any_orthonormal_vector();
    for k in [-10.0, -1.0, 0.0, 0.5, 25.0] {
        assert!(plane.distance(point + tangent * k).abs() < 1e-4);
    }
}

#[test]
fn test_distance_along_normal() {
    let normal = Vec3::new(-3.0, 0.0, 4.0).normalize();
    let point = Vec3::new(1.0, 1.0, 1.0);
    let plane = Plane::from_point_normal(point, normal);

    for k in [-7.5, -1.0, 0.25, 3.0, 100.0] {
        let d = plane.distance(point + normal * k);
        assert!((d - k).abs() < 1e-4, "expected {}, got {}", k, d);
    }
}

#[test]
fn test_distance_sign_follows_normal() {
    let plane = Plane::new(Vec3::Y, 0.0);
    assert!(plane.distance(Vec3::new(0.0, 1.0, 0.0)) > 0.0);
    assert!(plane.distance(Vec3::new(0.0, -1.0, 0.0)) < 0.0);
}

// ============================================================================
// intersection_with_line
// ============================================================================

#[test]
fn test_line_intersection_hits_plane() {
    let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
    let hit = plane
        .intersection_with_line(Vec3::new(1.0, 10.0, -3.0), Vec3::new(0.0, -2.0, 0.0))
        .expect("line is not parallel");

    assert!(hit.abs_diff_eq(Vec3::new(1.0, 2.0, -3.0), EPS));
    assert!(plane.distance(hit).abs() < EPS);
}

#[test]
fn test_line_intersection_behind_start_point() {
    // t < 0 is still a valid intersection: this is a line, not a ray
    let plane = Plane::new(Vec3::Z, 0.0);
    let hit = plane.intersection_with_line(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
    assert!(hit.abs_diff_eq(Vec3::ZERO, EPS));
}

#[test]
fn test_line_parallel_to_plane_has_no_intersection() {
    let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::Y);
    for start in [Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::new(-3.0, -1.0, 9.0)] {
        assert!(plane.intersection_with_line(start, Vec3::X).is_none());
        assert!(plane.intersection_with_line(start, Vec3::new(1.0, 0.0, -1.0)).is_none());
    }
}

#[test]
fn test_zero_line_vector_has_no_intersection() {
    let plane = Plane::new(Vec3::new(0.0, 0.6, 0.8), 1.0);
    assert!(plane.intersection_with_line(Vec3::ONE, Vec3::ZERO).is_none());
}

#[test]
fn test_nearly_parallel_line_still_intersects() {
    // Exact-zero policy: a tiny but non-zero denominator is not rejected
    let plane = Plane::new(Vec3::Y, 0.0);
    let hit = plane.intersection_with_line(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1e-6, 0.0));
    assert!(hit.is_some());
}

// ============================================================================
// normalized
// ============================================================================

#[test]
fn test_normalized_scales_normal_and_offset() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, 2.0), -4.0).normalized();
    assert!(plane.normal().abs_diff_eq(Vec3::Z, EPS));
    assert!((plane.d() + 2.0).abs() < EPS);
}

#[test]
fn test_normalized_zero_normal_unchanged() {
    let plane = Plane::new(Vec3::ZERO, 3.0);
    assert_eq!(plane.normalized(), plane);
}

#[test]
fn test_plane_is_pod() {
    let plane = Plane::new(Vec3::new(1.0, 2.0, 3.0), 4.0);
    let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&plane));
    assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
}
