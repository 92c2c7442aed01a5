//! # Linear Scans
//!
//! A scan moves the sensor in equal steps along one world axis while it
//! keeps looking in a fixed direction. [`SimulatedScan`] runs such a scan
//! against a [`SimulatedRangefinder`] and exposes it as a [`PointSampler`].

use serde::{Deserialize, Serialize};
use surface_geometry::vector::normalize_checked;
use surface_geometry::{Point3D, Vector3};

use crate::error::CalibrationError;
use crate::sampler::{PointSampler, ScanSample};
use crate::sensor::{SensorPose, SimulatedRangefinder};

/// World axis a scan moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAxis {
    /// Horizontal, across the surface width.
    X,
    /// Vertical, across the surface height.
    Z,
}

impl ScanAxis {
    /// Unit vector of the axis.
    pub fn unit(self) -> Vector3 {
        match self {
            ScanAxis::X => Vector3::X,
            ScanAxis::Z => Vector3::Z,
        }
    }

    /// Coordinate of `point` along the axis.
    pub fn coordinate(self, point: Point3D) -> f64 {
        match self {
            ScanAxis::X => point.x,
            ScanAxis::Z => point.z,
        }
    }
}

/// Equal-step motion of the sensor along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScan {
    start: Point3D,
    direction: Vector3,
    axis: ScanAxis,
    step: f64,
    count: usize,
}

impl LinearScan {
    /// Creates a scan of `count` poses starting at `start`, `step` apart
    /// along `axis`, all looking along `direction`.
    ///
    /// A negative `step` scans towards decreasing coordinates.
    pub fn new(
        start: Point3D,
        direction: Vector3,
        axis: ScanAxis,
        step: f64,
        count: usize,
    ) -> Result<Self, CalibrationError> {
        let direction = normalize_checked(direction).ok_or_else(|| {
            CalibrationError::invalid_scan(format!("look direction {direction} has zero length"))
        })?;
        if !step.is_finite() || step == 0.0 {
            return Err(CalibrationError::invalid_scan(format!(
                "step must be finite and non-zero: {step}"
            )));
        }
        if !start.is_finite() {
            return Err(CalibrationError::invalid_scan(format!(
                "start {start} is not finite"
            )));
        }
        Ok(Self {
            start,
            direction,
            axis,
            step,
            count,
        })
    }

    /// Axis the scan moves along.
    pub fn axis(&self) -> ScanAxis {
        self.axis
    }

    /// Number of poses.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true for a scan without poses.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sensor poses in scan order.
    pub fn poses(&self) -> impl Iterator<Item = SensorPose> + '_ {
        let offset = self.axis.unit() * self.step;
        (0..self.count)
            .map(move |i| SensorPose::new(self.start + offset * i as f64, self.direction))
    }
}

/// A [`LinearScan`] executed against a simulated sensor.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedScan<'a> {
    sensor: &'a SimulatedRangefinder,
    scan: LinearScan,
}

impl<'a> SimulatedScan<'a> {
    /// Pairs a sensor with a scan.
    pub fn new(sensor: &'a SimulatedRangefinder, scan: LinearScan) -> Self {
        Self { sensor, scan }
    }

    fn sample(&self, pose: SensorPose) -> ScanSample {
        let position = self.scan.axis.coordinate(pose.position);
        let reading = self.sensor.reading(&pose);
        if reading.hit {
            ScanSample::hit(position, pose.position + pose.direction * reading.distance_mm)
        } else {
            ScanSample::miss(position)
        }
    }
}

impl PointSampler for SimulatedScan<'_> {
    fn samples(&self) -> impl Iterator<Item = ScanSample> + '_ {
        self.scan.poses().map(move |pose| self.sample(pose))
    }
}
