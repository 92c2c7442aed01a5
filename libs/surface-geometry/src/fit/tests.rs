//! Tests for plane fitting.

use super::*;
use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grid of points on `z = 0.1·x − 0.2·y + 5`, perturbed along Z.
fn tilted_grid(noise: f64, rng: &mut StdRng) -> Vec<Point3D> {
    let mut points = Vec::new();
    for i in 0..20 {
        for j in 0..20 {
            let x = -50.0 + i as f64 * 100.0 / 19.0;
            let y = -50.0 + j as f64 * 100.0 / 19.0;
            let jitter = if noise > 0.0 {
                rng.gen_range(-noise..=noise)
            } else {
                0.0
            };
            points.push(Vector3::new(x, y, 0.1 * x - 0.2 * y + 5.0 + jitter));
        }
    }
    points
}

fn tilted_normal() -> Vector3 {
    Vector3::new(-0.1, 0.2, 1.0).normalize()
}

fn angle_between(a: Vector3, b: Vector3) -> f64 {
    a.dot(b).abs().min(1.0).acos()
}

#[test]
fn test_unit_square_fits_xy_plane() {
    let points = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
    ];
    let plane = fit_plane(&points).unwrap();

    assert_abs_diff_eq!(plane.a, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(plane.b, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(plane.c, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(plane.d, 0.0, epsilon = 1e-12);
}

#[test]
fn test_exact_points_recover_plane() {
    let mut rng = StdRng::seed_from_u64(7);
    let points = tilted_grid(0.0, &mut rng);
    let fit = fit_plane_detailed(&points).unwrap();

    let expected = Plane::from_point_normal(Vector3::new(0.0, 0.0, 5.0), tilted_normal()).unwrap();
    assert!(fit.plane.approx_eq_up_to_scale(&expected, 1e-9));
    assert!(fit.rms_residual < 1e-9);
    assert!(fit.conditioning < 1e-12);
    for p in &points {
        assert_abs_diff_eq!(fit.plane.residual(*p), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_three_points_are_enough() {
    let points = [
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
    ];
    let plane = fit_plane(&points).unwrap();
    let expected = Plane::new(1.0, 1.0, 1.0, 1.0).unwrap();

    assert!(plane.approx_eq_up_to_scale(&expected, 1e-9));
}

#[test]
fn test_order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = tilted_grid(0.5, &mut rng);
    let mut reversed = points.clone();
    reversed.reverse();

    let a = fit_plane(&points).unwrap();
    let b = fit_plane(&reversed).unwrap();
    assert!(a.approx_eq_up_to_scale(&b, 1e-9));
}

#[test]
fn test_noise_degrades_normal_gradually() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut errors = Vec::new();
    for sigma in [0.001, 0.1, 1.0] {
        let plane = fit_plane(&tilted_grid(sigma, &mut rng)).unwrap();
        let error = angle_between(plane.unit_normal().unwrap(), tilted_normal());
        assert!(
            error < 0.01 * sigma,
            "sigma {sigma}: angular error {error} too large"
        );
        errors.push(error);
    }
    assert!(errors[2] > errors[0]);
}

#[test]
fn test_too_few_points() {
    let points = [Vector3::ZERO, Vector3::X];
    let err = fit_plane(&points).unwrap_err();
    assert!(matches!(err, GeometryError::DegenerateGeometry { .. }));
    assert!(matches!(
        fit_plane(&[]),
        Err(GeometryError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_collinear_points() {
    let points: Vec<Point3D> = (0..10)
        .map(|i| Vector3::new(1.0, 2.0, 3.0) * i as f64)
        .collect();
    assert!(matches!(
        fit_plane(&points),
        Err(GeometryError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_coincident_points() {
    let points = [Vector3::splat(4.0); 5];
    assert!(matches!(
        fit_plane(&points),
        Err(GeometryError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_non_finite_points() {
    let points = [Vector3::ZERO, Vector3::X, Vector3::new(0.0, f64::NAN, 0.0)];
    assert!(fit_plane(&points).is_err());
}

#[test]
fn test_blob_reports_poor_conditioning() {
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<Point3D> = (0..500)
        .map(|_| {
            Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();
    let fit = fit_plane_detailed(&points).unwrap();

    assert!(fit.conditioning > 0.5, "conditioning {}", fit.conditioning);
}

#[test]
fn test_eigenvalues_ascending() {
    let mut rng = StdRng::seed_from_u64(5);
    let fit = fit_plane_detailed(&tilted_grid(0.2, &mut rng)).unwrap();

    assert!(fit.eigenvalues[0] <= fit.eigenvalues[1]);
    assert!(fit.eigenvalues[1] <= fit.eigenvalues[2]);
}

#[test]
fn test_normal_sign_is_canonical() {
    let points = [
        Vector3::new(0.0, -3.0, 0.0),
        Vector3::new(1.0, -3.0, 0.0),
        Vector3::new(0.0, -3.0, 1.0),
    ];
    let plane = fit_plane(&points).unwrap();

    assert_abs_diff_eq!(plane.b, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(plane.d, -3.0, epsilon = 1e-12);
}
