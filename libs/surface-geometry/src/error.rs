//! # Geometry Errors
//!
//! Error types for the calibration geometry core.
//!
//! ## Error Policy
//!
//! - NO fallback values when a computation is ill-posed
//! - Every failure is reported to the caller, nothing is retried
//! - Messages carry the offending quantity for debugging

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the geometry core.
///
/// All of them are caused by the input and cannot be fixed by retrying
/// with the same data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Too few samples, or samples that do not span a plane.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// A scan produced no hits at all.
    #[error("No surface detected: {message}")]
    NoSurfaceDetected { message: String },

    /// A plane with a zero-length normal, or one that cannot be solved
    /// along the requested axis.
    #[error("Degenerate plane: {message}")]
    DegeneratePlane { message: String },

    /// Reference points coincide or lie along the surface normal.
    #[error("Degenerate reference points: {message}")]
    DegenerateReferencePoints { message: String },
}

impl GeometryError {
    /// Creates a degenerate geometry error.
    pub fn degenerate_geometry(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a no-surface error.
    pub fn no_surface(message: impl Into<String>) -> Self {
        Self::NoSurfaceDetected {
            message: message.into(),
        }
    }

    /// Creates a degenerate plane error.
    pub fn degenerate_plane(message: impl Into<String>) -> Self {
        Self::DegeneratePlane {
            message: message.into(),
        }
    }

    /// Creates a degenerate reference points error.
    pub fn degenerate_reference_points(message: impl Into<String>) -> Self {
        Self::DegenerateReferencePoints {
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

// =============================================================================
// TESTS
// =============================================================================
