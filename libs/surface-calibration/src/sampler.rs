//! # Point Sampler
//!
//! The only capability the calibration pipeline needs from the outside
//! world: a finite sequence of scan samples that can be walked again from
//! the start.

use serde::{Deserialize, Serialize};
use surface_geometry::{Point3D, ScanObservation};

/// One step of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSample {
    /// Sensor position along the scan axis.
    pub position: f64,
    /// World point where the sensor saw the surface, `None` on a miss.
    pub point: Option<Point3D>,
}

impl ScanSample {
    /// A sample where the surface was seen at `point`.
    pub fn hit(position: f64, point: Point3D) -> Self {
        Self {
            position,
            point: Some(point),
        }
    }

    /// A sample where nothing was seen.
    pub fn miss(position: f64) -> Self {
        Self {
            position,
            point: None,
        }
    }

    /// Returns true when the surface was seen.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.point.is_some()
    }

    /// The hit/miss observation used for edge extraction.
    #[inline]
    pub fn observation(&self) -> ScanObservation {
        ScanObservation::new(self.position, self.is_hit())
    }
}

/// Source of scan samples.
///
/// Every call to [`PointSampler::samples`] restarts the scan from its
/// first sample. Samples must be ordered monotonically along the scan axis.
pub trait PointSampler {
    /// Iterates over the scan samples in scan order.
    fn samples(&self) -> impl Iterator<Item = ScanSample> + '_;
}

impl PointSampler for [ScanSample] {
    fn samples(&self) -> impl Iterator<Item = ScanSample> + '_ {
        self.iter().copied()
    }
}

impl PointSampler for Vec<ScanSample> {
    fn samples(&self) -> impl Iterator<Item = ScanSample> + '_ {
        self.iter().copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================
