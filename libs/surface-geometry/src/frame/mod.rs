//! # Orientation Frame
//!
//! Builds the canonical orientation of a calibrated surface from its fitted
//! plane and two reference points taken across its width.
//!
//! ## Construction
//!
//! 1. `local_y` = unit plane normal (out of the surface)
//! 2. `x_dir`   = unit direction from `p1` to `p2`
//! 3. `local_z` = `x_dir × local_y` (up along the surface)
//! 4. `local_x` = `local_y × local_z`
//!
//! `local_x` is re-derived instead of reusing `x_dir`, so the basis is
//! exactly orthogonal even when the reference points sit slightly off the
//! plane. It only approximates `x_dir`.
//!
//! ## Known Limitation
//!
//! The construction is only valid for surfaces whose rotation does not
//! include a component about the world Y axis large enough to bring `x_dir`
//! close to the normal. Reference points along the normal are rejected with
//! [`GeometryError::DegenerateReferencePoints`]; no general fix is attempted.

mod quaternion;

#[cfg(test)]
mod tests;

pub use quaternion::quaternion_from_matrix;

use config::constants::ORTHOGONALITY_TOLERANCE;
use glam::{DMat3, DQuat};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::plane::Plane;
use crate::vector::{normalize_checked, Point3D, Vector3};

/// Right-handed orthonormal basis attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationFrame {
    /// Across the surface, approximately from `p1` towards `p2`.
    pub local_x: Vector3,
    /// Surface normal.
    pub local_y: Vector3,
    /// Up along the surface.
    pub local_z: Vector3,
}

impl OrientationFrame {
    /// Rotation matrix whose columns are the local axes.
    ///
    /// Multiplying it by a world unit axis yields the matching local axis.
    pub fn rotation_matrix(&self) -> DMat3 {
        DMat3::from_cols(self.local_x, self.local_y, self.local_z)
    }

    /// Unit quaternion equivalent to [`Self::rotation_matrix`].
    pub fn quaternion(&self) -> DQuat {
        quaternion_from_matrix(&self.rotation_matrix())
    }

    /// Checks unit length and pairwise orthogonality within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.local_x, self.local_y, self.local_z];
        let unit = axes.iter().all(|a| (a.length() - 1.0).abs() <= tolerance);
        let orthogonal = self.local_x.dot(self.local_y).abs() <= tolerance
            && self.local_y.dot(self.local_z).abs() <= tolerance
            && self.local_z.dot(self.local_x).abs() <= tolerance;
        unit && orthogonal
    }
}

/// Builds the orientation frame and quaternion of a surface.
///
/// # Errors
///
/// - [`GeometryError::DegeneratePlane`] if the plane normal has zero length
/// - [`GeometryError::DegenerateReferencePoints`] if `p1` and `p2` coincide
///   or the line through them is parallel to the plane normal
///
/// # Example
///
/// ```rust
/// use surface_geometry::{build_frame, Plane, Vector3};
///
/// let plane = Plane::new(0.0, 1.0, 0.0, -400.0).unwrap();
/// let (frame, q) = build_frame(
///     &plane,
///     Vector3::new(0.0, -400.0, 200.0),
///     Vector3::new(500.0, -400.0, 200.0),
/// )
/// .unwrap();
/// assert!((frame.local_z - Vector3::Z).length() < 1e-12);
/// assert!((q.w - 1.0).abs() < 1e-12);
/// ```
pub fn build_frame(
    plane: &Plane,
    p1: Point3D,
    p2: Point3D,
) -> GeometryResult<(OrientationFrame, DQuat)> {
    let local_y = plane.unit_normal()?;

    let x_dir = normalize_checked(p2 - p1).ok_or_else(|| {
        GeometryError::degenerate_reference_points(format!(
            "reference points {p1} and {p2} coincide"
        ))
    })?;

    let local_z = normalize_checked(x_dir.cross(local_y)).ok_or_else(|| {
        GeometryError::degenerate_reference_points(format!(
            "direction {x_dir} from {p1} to {p2} is parallel to the surface normal {local_y}"
        ))
    })?;

    let local_x = local_y.cross(local_z).normalize();

    let frame = OrientationFrame {
        local_x,
        local_y,
        local_z,
    };
    debug_assert!(frame.is_orthonormal(ORTHOGONALITY_TOLERANCE));

    Ok((frame, frame.quaternion()))
}
