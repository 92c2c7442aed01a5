//! # Surface Calibration
//!
//! Scanning layer that feeds the [`surface_geometry`] core and packages its
//! output.
//!
//! The hardware side (moving a sensor, asking a frame system where it is)
//! lives outside this crate. It is represented only by the [`PointSampler`]
//! capability: a restartable, finite sequence of scan samples. A simulated
//! rangefinder and linear scans implement it for tests and dry runs.
//!
//! ## Example
//!
//! ```rust
//! use config::constants::CalibrationConfig;
//! use surface_calibration::{
//!     calibrate, reference_monitor, LinearScan, ScanAxis, SimulatedRangefinder, SurfacePose,
//! };
//! use surface_geometry::Vector3;
//!
//! let config = CalibrationConfig::default();
//! let sensor = SimulatedRangefinder::new(reference_monitor(), &config);
//! let look = -Vector3::Y;
//!
//! let x_scan = LinearScan::new(Vector3::new(-50.0, -100.0, 200.0), look, ScanAxis::X, 5.0, 121).unwrap();
//! let z_scan = LinearScan::new(Vector3::new(250.0, -100.0, 0.0), look, ScanAxis::Z, 5.0, 81).unwrap();
//!
//! let result = calibrate(&sensor.along(x_scan), &sensor.along(z_scan), &config).unwrap();
//! let pose = SurfacePose::from_result(&result).unwrap();
//! assert!((pose.center.x - 250.0).abs() < 5.0);
//! ```

pub mod calibrate;
pub mod error;
pub mod sampler;
pub mod scan;
pub mod sensor;

// Re-export public API
pub use calibrate::{calibrate, CalibrationResult, SurfaceExtent, SurfacePose};
pub use error::CalibrationError;
pub use sampler::{PointSampler, ScanSample};
pub use scan::{LinearScan, ScanAxis, SimulatedScan};
pub use sensor::{reference_monitor, RangeReading, SensorPose, SimulatedRangefinder};
