//! # Plane Fitting
//!
//! Total-least-squares plane fit through a cloud of calibration samples.
//!
//! ## Algorithm
//!
//! 1. Compute the centroid of the samples
//! 2. Build the 3×3 scatter matrix of the centered samples
//! 3. The eigenvector of the smallest eigenvalue is the plane normal
//! 4. `d = normal · centroid`
//!
//! This minimizes `Σ (a·xᵢ + b·yᵢ + c·zᵢ − d)²` subject to `a² + b² + c² = 1`.
//! The result does not depend on the order of the samples.

use config::constants::{MIN_PLANE_SAMPLES, RANK_THRESHOLD};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::plane::Plane;
use crate::vector::{centroid, Point3D, Vector3};

/// Full output of a plane fit, including conditioning diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneFit {
    /// Fitted plane with a unit normal.
    pub plane: Plane,
    /// Mean of the samples; lies on the fitted plane.
    pub centroid: Point3D,
    /// Scatter matrix eigenvalues in ascending order.
    pub eigenvalues: [f64; 3],
    /// Ratio of the smallest to the middle eigenvalue.
    ///
    /// Near 0 for a well-defined plane. Values approaching 1 mean the
    /// normal direction is poorly determined (a blob rather than a sheet).
    pub conditioning: f64,
    /// Root mean square distance of the samples from the plane.
    pub rms_residual: f64,
}

/// Fits a plane to `points`.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] for fewer than three points,
/// non-finite coordinates, or points that are coincident or collinear.
///
/// # Example
///
/// ```rust
/// use surface_geometry::{fit_plane, Plane, Vector3};
///
/// let points = [
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
///     Vector3::new(1.0, 1.0, 0.0),
/// ];
/// let plane = fit_plane(&points).unwrap();
/// let expected = Plane::new(0.0, 0.0, 1.0, 0.0).unwrap();
/// assert!(plane.approx_eq_up_to_scale(&expected, 1e-9));
/// ```
pub fn fit_plane(points: &[Point3D]) -> GeometryResult<Plane> {
    fit_plane_detailed(points).map(|fit| fit.plane)
}

/// Fits a plane to `points` and reports how well-posed the fit was.
pub fn fit_plane_detailed(points: &[Point3D]) -> GeometryResult<PlaneFit> {
    if points.len() < MIN_PLANE_SAMPLES {
        return Err(GeometryError::degenerate_geometry(format!(
            "insufficient points: got {}, need at least {}",
            points.len(),
            MIN_PLANE_SAMPLES
        )));
    }
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(GeometryError::degenerate_geometry(format!(
            "non-finite sample {bad}"
        )));
    }

    let center = centroid(points)
        .ok_or_else(|| GeometryError::degenerate_geometry("no samples"))?;

    let mut scatter = Matrix3::<f64>::zeros();
    for p in points {
        let q = *p - center;
        let v = nalgebra::Vector3::new(q.x, q.y, q.z);
        scatter += v * v.transpose();
    }

    let eigen = scatter.symmetric_eigen();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| eigen.eigenvalues[i].total_cmp(&eigen.eigenvalues[j]));
    let eigenvalues = order.map(|i| eigen.eigenvalues[i].max(0.0));
    let [smallest, middle, largest] = eigenvalues;

    // Rank 2 is required: one significant eigenvalue means a line, none a point.
    if largest <= RANK_THRESHOLD || middle < RANK_THRESHOLD * largest {
        return Err(GeometryError::degenerate_geometry(format!(
            "samples do not span a plane (eigenvalues {smallest:e}, {middle:e}, {largest:e})"
        )));
    }

    let column = eigen.eigenvectors.column(order[0]);
    let normal = canonical_sign(Vector3::new(column[0], column[1], column[2]).normalize());
    let plane = Plane::from_point_normal(center, normal)?;

    let sum_sq: f64 = points.iter().map(|p| plane.residual(*p).powi(2)).sum();
    let rms_residual = (sum_sq / points.len() as f64).sqrt();

    Ok(PlaneFit {
        plane,
        centroid: center,
        eigenvalues,
        conditioning: smallest / middle,
        rms_residual,
    })
}

/// Flips `normal` so its dominant component is positive.
///
/// Eigenvectors carry an arbitrary sign; pinning it keeps repeated fits of
/// the same surface comparable.
fn canonical_sign(normal: Vector3) -> Vector3 {
    let abs = normal.abs();
    let dominant = if abs.x >= abs.y && abs.x >= abs.z {
        normal.x
    } else if abs.y >= abs.z {
        normal.y
    } else {
        normal.z
    };
    if dominant < 0.0 {
        -normal
    } else {
        normal
    }
}

#[cfg(test)]
mod tests;
