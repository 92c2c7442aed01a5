//! # Config Crate
//!
//! Centralized configuration constants for the planar surface calibration
//! pipeline. All tolerances, sensor limits and tunable parameters are defined
//! here so the geometry core and the scanning layer agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, CalibrationConfig, SENSOR_MAX_RANGE_MM};
//!
//! assert!(approx_zero(1e-12));
//!
//! let cfg = CalibrationConfig::default();
//! assert_eq!(cfg.max_range_mm, SENSOR_MAX_RANGE_MM);
//! ```
//!
//! ## Units
//!
//! - Lengths are millimetres unless a name says otherwise
//! - Angles are radians

pub mod constants;
