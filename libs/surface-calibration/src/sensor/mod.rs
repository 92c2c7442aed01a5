//! # Simulated Rangefinder
//!
//! A virtual ultrasonic rangefinder pointed at a known surface. Used to dry
//! run scans and to test the calibration pipeline end to end.
//!
//! Readings follow the physical sensor: millimetres, a small measurement
//! error on hits, and the maximum range on a miss. The error is a
//! deterministic function of the sensor position (`sin(x + z)` scaled by
//! the configured amplitude), so repeated scans reproduce exactly.

use config::constants::{CalibrationConfig, MM_PER_METER};
use glam::DMat3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use surface_geometry::{intersect, Point3D, RayHit, SurfaceDefinition, Vector3};

use crate::scan::{LinearScan, SimulatedScan};

/// Where the sensor is and where it looks, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPose {
    /// Sensor origin.
    pub position: Point3D,
    /// Look direction, any non-zero length.
    pub direction: Vector3,
}

impl SensorPose {
    /// Creates a sensor pose.
    pub fn new(position: Point3D, direction: Vector3) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// A single distance reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeReading {
    /// Measured distance; the maximum range on a miss.
    pub distance_mm: f64,
    /// Whether the ray met the surface. Geometric callers should rely on
    /// this rather than on the distance.
    pub hit: bool,
}

impl RangeReading {
    /// Distance in metres, the unit the physical sensor reports.
    #[inline]
    pub fn distance_meters(&self) -> f64 {
        self.distance_mm / MM_PER_METER
    }
}

/// The virtual monitor used for dry runs.
///
/// 500 × 300 mm, centered at (250, −400, 200) mm, facing +Y after a 15°
/// rotation about X followed by 10° about Y. The compound rotation keeps the
/// plane off every world axis.
pub fn reference_monitor() -> SurfaceDefinition {
    let about_x = DMat3::from_rotation_x(15f64.to_radians());
    let about_y = DMat3::from_rotation_y(10f64.to_radians());
    SurfaceDefinition {
        center: Vector3::new(250.0, -400.0, 200.0),
        normal: about_y * (about_x * Vector3::Y),
        up: Vector3::Z,
        width: 500.0,
        height: 300.0,
    }
}

/// Rangefinder simulated against a caller-supplied surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedRangefinder {
    surface: SurfaceDefinition,
    max_range_mm: f64,
    noise_amplitude_mm: f64,
}

impl SimulatedRangefinder {
    /// Creates a sensor looking at `surface` with range and noise from
    /// `config`.
    pub fn new(surface: SurfaceDefinition, config: &CalibrationConfig) -> Self {
        Self {
            surface,
            max_range_mm: config.max_range_mm,
            noise_amplitude_mm: config.noise_amplitude_mm,
        }
    }

    /// The simulated surface.
    pub fn surface(&self) -> &SurfaceDefinition {
        &self.surface
    }

    /// Exact ray cast without noise or range substitution.
    pub fn cast(&self, pose: &SensorPose) -> RayHit {
        intersect(pose.position, pose.direction, &self.surface)
    }

    /// Measurement error added to a hit seen from `position`.
    pub fn noise(&self, position: Point3D) -> f64 {
        (position.x + position.z).sin() * self.noise_amplitude_mm
    }

    /// Takes one reading.
    pub fn reading(&self, pose: &SensorPose) -> RangeReading {
        let p = pose.position;
        match self.cast(pose) {
            RayHit::Hit { distance, .. } => {
                let distance_mm = distance + self.noise(p);
                log::debug!(
                    "simulated sensor: HIT at {distance_mm:.2} mm (pos: {:.1},{:.1},{:.1})",
                    p.x,
                    p.y,
                    p.z
                );
                RangeReading {
                    distance_mm,
                    hit: true,
                }
            }
            RayHit::Miss => {
                log::debug!(
                    "simulated sensor: MISS, returning max range (pos: {:.1},{:.1},{:.1})",
                    p.x,
                    p.y,
                    p.z
                );
                RangeReading {
                    distance_mm: self.max_range_mm,
                    hit: false,
                }
            }
        }
    }

    /// Takes readings for many poses in parallel, preserving their order.
    pub fn sweep(&self, poses: &[SensorPose]) -> Vec<RangeReading> {
        poses.par_iter().map(|pose| self.reading(pose)).collect()
    }

    /// Runs `scan` against this sensor.
    pub fn along(&self, scan: LinearScan) -> SimulatedScan<'_> {
        SimulatedScan::new(self, scan)
    }
}
