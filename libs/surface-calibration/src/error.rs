//! # Calibration Errors
//!
//! Error types for the scanning and calibration layer.

use config::constants::ConfigError;
use surface_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while calibrating a surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Failure reported by the geometry core.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A scan that cannot be executed.
    #[error("Invalid scan: {message}")]
    InvalidScan { message: String },

    /// Edges that do not enclose an area.
    #[error("Degenerate extent: {message}")]
    DegenerateExtent { message: String },
}

impl CalibrationError {
    /// Creates an invalid scan error.
    pub fn invalid_scan(message: impl Into<String>) -> Self {
        Self::InvalidScan {
            message: message.into(),
        }
    }

    /// Creates a degenerate extent error.
    pub fn degenerate_extent(message: impl Into<String>) -> Self {
        Self::DegenerateExtent {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
