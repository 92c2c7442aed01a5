//! Tests for frame construction and quaternion extraction.

use super::*;
use approx::assert_abs_diff_eq;
use glam::EulerRot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

fn assert_vec_close(actual: Vector3, expected: Vector3, tolerance: f64) {
    assert!(
        (actual - expected).length() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn assert_same_rotation(a: DQuat, b: DQuat) {
    assert_abs_diff_eq!(a.dot(b).abs(), 1.0, epsilon = 1e-9);
}

/// Normal of the tilted test monitor: +Y rotated 15° about X then 10° about Y.
fn tilted_normal() -> Vector3 {
    let about_x = DMat3::from_rotation_x(15f64.to_radians());
    let about_y = DMat3::from_rotation_y(10f64.to_radians());
    about_y * (about_x * Vector3::Y)
}

// =============================================================================
// FRAME CONSTRUCTION
// =============================================================================

#[test]
fn test_axis_aligned_surface_gives_identity() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let (frame, q) = build_frame(&plane, Vector3::ZERO, Vector3::X).unwrap();

    assert_vec_close(frame.local_x, Vector3::X, 1e-12);
    assert_vec_close(frame.local_y, Vector3::Y, 1e-12);
    assert_vec_close(frame.local_z, Vector3::Z, 1e-12);
    assert_same_rotation(q, DQuat::IDENTITY);
}

#[test]
fn test_reversed_reference_points_flip_in_plane_axes() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let (frame, _) = build_frame(&plane, Vector3::X, Vector3::ZERO).unwrap();

    assert_vec_close(frame.local_x, -Vector3::X, 1e-12);
    assert_vec_close(frame.local_y, Vector3::Y, 1e-12);
    assert_vec_close(frame.local_z, -Vector3::Z, 1e-12);
}

#[test]
fn test_tilted_surface_frame_is_orthonormal() {
    let normal = tilted_normal();
    let plane = Plane::from_point_normal(Vector3::new(250.0, -400.0, 200.0), normal).unwrap();
    let right = Vector3::Z.cross(normal).normalize();
    let p1 = Vector3::new(250.0, -400.0, 200.0) - right * 200.0;
    let p2 = Vector3::new(250.0, -400.0, 200.0) + right * 200.0;

    let (frame, q) = build_frame(&plane, p1, p2).unwrap();

    assert!(frame.is_orthonormal(1e-9));
    assert_vec_close(frame.local_y, normal, 1e-12);
    // Reference points exactly on the plane: local X matches their direction.
    assert_vec_close(frame.local_x, right, 1e-9);
    assert_vec_close(q * Vector3::X, frame.local_x, 1e-9);
    assert_vec_close(q * Vector3::Y, frame.local_y, 1e-9);
    assert_vec_close(q * Vector3::Z, frame.local_z, 1e-9);
    assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_off_plane_reference_points_still_orthogonal() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let p1 = Vector3::new(0.0, 3.0, 0.0);
    let p2 = Vector3::new(10.0, -2.0, 0.0);

    let (frame, _) = build_frame(&plane, p1, p2).unwrap();

    assert!(frame.is_orthonormal(1e-12));
    assert_vec_close(frame.local_x, Vector3::X, 1e-12);
}

#[test]
fn test_coincident_reference_points() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let p = Vector3::new(1.0, 2.0, 3.0);

    assert!(matches!(
        build_frame(&plane, p, p),
        Err(GeometryError::DegenerateReferencePoints { .. })
    ));
}

#[test]
fn test_reference_points_along_normal() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let p1 = Vector3::new(1.0, 0.0, 1.0);
    let p2 = Vector3::new(1.0, 5.0, 1.0);

    assert!(matches!(
        build_frame(&plane, p1, p2),
        Err(GeometryError::DegenerateReferencePoints { .. })
    ));
}

#[test]
fn test_zero_normal_plane() {
    let plane = Plane {
        a: 0.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    assert!(matches!(
        build_frame(&plane, Vector3::ZERO, Vector3::X),
        Err(GeometryError::DegeneratePlane { .. })
    ));
}

#[test]
fn test_random_frames_are_right_handed_rotations() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut built = 0;
    while built < 200 {
        let normal = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let p1 = Vector3::new(
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        );
        let p2 = Vector3::new(
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        );
        let Ok(plane) = Plane::from_point_normal(p1, normal) else {
            continue;
        };
        let Ok((frame, q)) = build_frame(&plane, p1, p2) else {
            continue;
        };
        built += 1;

        assert!(frame.is_orthonormal(1e-6));
        assert_vec_close(frame.local_x.cross(frame.local_y), frame.local_z, 1e-9);
        assert_abs_diff_eq!(frame.rotation_matrix().determinant(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-12);
        assert_vec_close(q * Vector3::X, frame.local_x, 1e-9);
        assert_vec_close(q * Vector3::Y, frame.local_y, 1e-9);
        assert_vec_close(q * Vector3::Z, frame.local_z, 1e-9);
    }
}

// =============================================================================
// QUATERNION EXTRACTION
// =============================================================================

#[test]
fn test_identity_matrix() {
    let q = quaternion_from_matrix(&DMat3::IDENTITY);
    assert_same_rotation(q, DQuat::IDENTITY);
    assert!(q.w > 0.0);
}

#[test]
fn test_half_turns_use_diagonal_branches() {
    for axis in [Vector3::X, Vector3::Y, Vector3::Z] {
        let expected = DQuat::from_axis_angle(axis, PI);
        let q = quaternion_from_matrix(&DMat3::from_quat(expected));

        assert_same_rotation(q, expected);
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_quarter_turn_about_z() {
    let m = DMat3::from_rotation_z(FRAC_PI_2);
    let q = quaternion_from_matrix(&m);

    assert_vec_close(q * Vector3::X, Vector3::Y, 1e-12);
    assert_abs_diff_eq!(q.z, (0.5f64).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_round_trip_reproduces_quaternion_up_to_sign() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let expected = DQuat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(-PI..PI),
            rng.gen_range(-PI..PI),
            rng.gen_range(-PI..PI),
        );
        let q = quaternion_from_matrix(&DMat3::from_quat(expected));

        assert_same_rotation(q, expected);
        assert!(q.w >= 0.0);
    }
}
