//! Thin wrapper around `glam::DVec3` shared across the geometry modules.
//!
//! `glam` already provides dot, cross, scaling and normalization; the
//! helpers here only add the tolerance-aware normalization the calibration
//! code needs so that higher layers never divide by a near-zero length.

use config::constants::DIRECTION_EPSILON;

pub use glam::DVec3 as Vector3;

/// A calibration sample in world coordinates.
pub type Point3D = Vector3;

/// Normalizes `v`, or returns `None` when its length is below
/// [`DIRECTION_EPSILON`].
///
/// # Examples
/// ```
/// use surface_geometry::vector::{normalize_checked, Vector3};
/// let v = normalize_checked(Vector3::new(3.0, 0.0, 4.0)).unwrap();
/// assert!((v.length() - 1.0).abs() < 1e-12);
/// assert!(normalize_checked(Vector3::ZERO).is_none());
/// ```
pub fn normalize_checked(v: Vector3) -> Option<Vector3> {
    let length = v.length();
    if !length.is_finite() || length < DIRECTION_EPSILON {
        return None;
    }
    Some(v / length)
}

/// Mean of a set of points, `None` when the set is empty.
pub fn centroid(points: &[Point3D]) -> Option<Point3D> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::ZERO, |acc, p| acc + *p);
    Some(sum / points.len() as f64)
}
