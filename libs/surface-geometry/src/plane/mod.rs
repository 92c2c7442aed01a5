//! # Plane
//!
//! Plane in general form `A·x + B·y + C·z = D`.
//!
//! The normal `(A, B, C)` is not required to be unit length; consumers that
//! need a unit normal call [`Plane::unit_normal`] or [`Plane::normalized`].

use config::constants::DIRECTION_EPSILON;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{normalize_checked, Point3D, Vector3};

// =============================================================================
// PLANE
// =============================================================================

/// A plane `a·x + b·y + c·z = d`.
///
/// # Example
///
/// ```rust
/// use surface_geometry::{Plane, Vector3};
///
/// let floor = Plane::new(0.0, 0.0, 2.0, 0.0).unwrap();
/// assert_eq!(floor.residual(Vector3::new(5.0, 5.0, 1.0)), 2.0);
/// assert_eq!(floor.signed_distance(Vector3::new(5.0, 5.0, 1.0)), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// X coefficient of the normal.
    pub a: f64,
    /// Y coefficient of the normal.
    pub b: f64,
    /// Z coefficient of the normal.
    pub c: f64,
    /// Offset, `normal · p` for every point `p` on the plane.
    pub d: f64,
}

impl Plane {
    /// Creates a plane, rejecting a zero or non-finite normal and a
    /// non-finite offset.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> GeometryResult<Self> {
        let plane = Self { a, b, c, d };
        if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
            return Err(GeometryError::degenerate_plane(format!(
                "coefficients ({a}, {b}, {c}, {d}) are not finite"
            )));
        }
        if plane.normal().length() < DIRECTION_EPSILON {
            return Err(GeometryError::degenerate_plane(format!(
                "normal ({a}, {b}, {c}) has zero length"
            )));
        }
        Ok(plane)
    }

    /// Creates the plane through `point` with the given `normal`.
    ///
    /// The normal is normalized, so the resulting `d` is the signed distance
    /// of the plane from the origin.
    pub fn from_point_normal(point: Point3D, normal: Vector3) -> GeometryResult<Self> {
        let n = normalize_checked(normal).ok_or_else(|| {
            GeometryError::degenerate_plane(format!("normal {normal} has zero length"))
        })?;
        Ok(Self {
            a: n.x,
            b: n.y,
            c: n.z,
            d: n.dot(point),
        })
    }

    /// The raw normal `(a, b, c)`.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// The normal scaled to unit length.
    pub fn unit_normal(&self) -> GeometryResult<Vector3> {
        normalize_checked(self.normal()).ok_or_else(|| {
            GeometryError::degenerate_plane(format!(
                "normal ({}, {}, {}) has zero length",
                self.a, self.b, self.c
            ))
        })
    }

    /// The same plane with a unit normal.
    pub fn normalized(&self) -> GeometryResult<Self> {
        let length = self.normal().length();
        if length < DIRECTION_EPSILON {
            return Err(GeometryError::degenerate_plane(format!(
                "normal ({}, {}, {}) has zero length",
                self.a, self.b, self.c
            )));
        }
        Ok(Self {
            a: self.a / length,
            b: self.b / length,
            c: self.c / length,
            d: self.d / length,
        })
    }

    /// The same plane with the normal reversed.
    pub fn flip(&self) -> Self {
        Self {
            a: -self.a,
            b: -self.b,
            c: -self.c,
            d: -self.d,
        }
    }

    /// Algebraic residual `a·x + b·y + c·z − d`.
    #[inline]
    pub fn residual(&self, point: Point3D) -> f64 {
        self.normal().dot(point) - self.d
    }

    /// Signed Euclidean distance from the plane.
    ///
    /// Positive on the side the normal points to. Returns NaN for a plane
    /// with a zero normal.
    pub fn signed_distance(&self, point: Point3D) -> f64 {
        self.residual(point) / self.normal().length()
    }

    /// Solves the plane equation for `y` at the given `x` and `z`.
    ///
    /// Fails when the plane is (nearly) parallel to the Y axis, since every
    /// or no `y` satisfies the equation there.
    pub fn solve_y(&self, x: f64, z: f64) -> GeometryResult<f64> {
        let unit = self.normalized()?;
        if unit.b.abs() < DIRECTION_EPSILON {
            return Err(GeometryError::degenerate_plane(format!(
                "plane ({}, {}, {}, {}) is parallel to the Y axis",
                self.a, self.b, self.c, self.d
            )));
        }
        Ok((unit.d - unit.a * x - unit.c * z) / unit.b)
    }

    /// Checks whether two planes describe the same set of points, allowing
    /// for any non-zero scale including a sign flip.
    pub fn approx_eq_up_to_scale(&self, other: &Plane, tolerance: f64) -> bool {
        let (Ok(p), Ok(q)) = (self.normalized(), other.normalized()) else {
            return false;
        };
        let close = |q: Plane| {
            (p.a - q.a).abs() <= tolerance
                && (p.b - q.b).abs() <= tolerance
                && (p.c - q.c).abs() <= tolerance
                && (p.d - q.d).abs() <= tolerance
        };
        close(q) || close(q.flip())
    }
}
