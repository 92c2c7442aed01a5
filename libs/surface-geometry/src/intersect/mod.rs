//! # Ray–Surface Intersection
//!
//! Geometric model of a rangefinder ray meeting a bounded rectangle. This is
//! the inverse of the calibration pipeline: it is used to simulate sensor
//! readings and to check fitted geometry against a known surface.

use config::constants::PARALLEL_RAY_EPSILON;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{normalize_checked, Point3D, Vector3};

// =============================================================================
// SURFACE DEFINITION
// =============================================================================

/// A flat rectangle in world coordinates.
///
/// `up` only has to be roughly along the surface; it is re-orthogonalized
/// against `normal` before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDefinition {
    /// Center of the rectangle.
    pub center: Point3D,
    /// Direction the surface faces.
    pub normal: Vector3,
    /// Approximate "up" direction on the surface.
    pub up: Vector3,
    /// Extent along the right axis.
    pub width: f64,
    /// Extent along the up axis.
    pub height: f64,
}

/// Orthonormal in-plane axes of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBasis {
    /// Unit normal.
    pub normal: Vector3,
    /// Unit `up × normal`.
    pub right: Vector3,
    /// Unit `normal × right`.
    pub up: Vector3,
}

impl SurfaceDefinition {
    /// Creates a surface definition after checking it describes a rectangle.
    pub fn new(
        center: Point3D,
        normal: Vector3,
        up: Vector3,
        width: f64,
        height: f64,
    ) -> GeometryResult<Self> {
        let surface = Self {
            center,
            normal,
            up,
            width,
            height,
        };
        let has_area = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !has_area || !center.is_finite() {
            return Err(GeometryError::degenerate_geometry(format!(
                "surface {width} x {height} at {center} has no area"
            )));
        }
        surface.basis()?;
        Ok(surface)
    }

    /// Re-orthogonalized axes of the surface.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegeneratePlane`] when the normal has zero length or
    /// `up` is parallel to it.
    pub fn basis(&self) -> GeometryResult<SurfaceBasis> {
        let normal = normalize_checked(self.normal).ok_or_else(|| {
            GeometryError::degenerate_plane(format!(
                "surface normal {} has zero length",
                self.normal
            ))
        })?;
        let right = normalize_checked(self.up.cross(normal)).ok_or_else(|| {
            GeometryError::degenerate_plane(format!(
                "up vector {} is parallel to the surface normal {normal}",
                self.up
            ))
        })?;
        let up = normal.cross(right).normalize();
        Ok(SurfaceBasis { normal, right, up })
    }

    /// Whether in-plane coordinates `(u, v)` fall inside the rectangle.
    #[inline]
    pub fn contains(&self, u: f64, v: f64) -> bool {
        u.abs() <= self.width / 2.0 && v.abs() <= self.height / 2.0
    }
}

// =============================================================================
// RAY HIT
// =============================================================================

/// Outcome of casting a ray at a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayHit {
    /// The ray meets the rectangle.
    Hit {
        /// Distance along the unit ray direction.
        distance: f64,
        /// Intersection point in world coordinates.
        point: Point3D,
    },
    /// Parallel, behind the origin, or outside the rectangle.
    Miss,
}

impl RayHit {
    /// Returns true for a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, RayHit::Hit { .. })
    }

    /// Hit distance, if any.
    #[inline]
    pub fn distance(&self) -> Option<f64> {
        match self {
            RayHit::Hit { distance, .. } => Some(*distance),
            RayHit::Miss => None,
        }
    }

    /// Hit point, if any.
    #[inline]
    pub fn point(&self) -> Option<Point3D> {
        match self {
            RayHit::Hit { point, .. } => Some(*point),
            RayHit::Miss => None,
        }
    }
}

// =============================================================================
// INTERSECTION
// =============================================================================

/// Casts the ray `origin + t·direction` at `surface`.
///
/// `direction` does not need to be unit length; the returned distance is
/// measured along its normalized form. A degenerate direction or surface
/// never hits.
///
/// # Example
///
/// ```rust
/// use surface_geometry::{intersect, SurfaceDefinition, Vector3};
///
/// let monitor = SurfaceDefinition::new(
///     Vector3::new(0.0, -400.0, 0.0),
///     Vector3::Y,
///     Vector3::Z,
///     500.0,
///     300.0,
/// )
/// .unwrap();
/// let hit = intersect(Vector3::ZERO, -Vector3::Y, &monitor);
/// assert_eq!(hit.distance(), Some(400.0));
/// ```
pub fn intersect(origin: Point3D, direction: Vector3, surface: &SurfaceDefinition) -> RayHit {
    let Some(direction) = normalize_checked(direction) else {
        return RayHit::Miss;
    };
    let Ok(basis) = surface.basis() else {
        return RayHit::Miss;
    };

    let denom = direction.dot(basis.normal);
    if denom.abs() < PARALLEL_RAY_EPSILON {
        return RayHit::Miss;
    }

    let t = (surface.center - origin).dot(basis.normal) / denom;
    if t < 0.0 {
        return RayHit::Miss;
    }

    let point = origin + direction * t;
    let offset = point - surface.center;
    let u = offset.dot(basis.right);
    let v = offset.dot(basis.up);

    if surface.contains(u, v) {
        RayHit::Hit { distance: t, point }
    } else {
        RayHit::Miss
    }
}
