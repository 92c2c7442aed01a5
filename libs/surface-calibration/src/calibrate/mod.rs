//! # Calibration Pipeline
//!
//! Turns a horizontal (X) scan and a vertical (Z) scan across a surface into
//! its plane, extent, and pose.
//!
//! ## Steps
//!
//! 1. Extract the X edges and Z edges from the hit/miss pattern
//! 2. Fit the plane to every hit that falls between the edges
//! 3. Keep the outermost X hits as the width reference points
//! 4. [`SurfacePose::from_result`] derives center, size, and orientation
//!
//! ## Conventions
//!
//! The first edge crossed by the X scan is the left edge and the first edge
//! crossed by the Z scan is the bottom edge. Scan right-to-left or
//! top-to-bottom and left/right or bottom/top swap accordingly; width and
//! height are reported as absolute distances either way.

use config::constants::{CalibrationConfig, POOR_CONDITIONING_RATIO, SURFACE_BOX_THICKNESS_MM};
use glam::DQuat;
use serde::{Deserialize, Serialize};
use surface_geometry::{
    build_frame, find_edges, fit_plane_detailed, EdgePair, GeometryError, OrientationFrame, Plane,
    Point3D, SurfaceDefinition,
};

use crate::error::CalibrationError;
use crate::sampler::{PointSampler, ScanSample};

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Edge positions of the surface along the two scan axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceExtent {
    /// First X edge crossed.
    pub left_x: f64,
    /// Last X edge crossed.
    pub right_x: f64,
    /// First Z edge crossed.
    pub bottom_z: f64,
    /// Last Z edge crossed.
    pub top_z: f64,
}

impl SurfaceExtent {
    /// Maps edge pairs from the X and Z scans onto an extent.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::DegenerateExtent`] when either pair has zero span.
    pub fn from_edges(x_edges: EdgePair, z_edges: EdgePair) -> Result<Self, CalibrationError> {
        if x_edges.span() <= 0.0 {
            return Err(CalibrationError::degenerate_extent(format!(
                "left and right edges coincide at x = {}",
                x_edges.first
            )));
        }
        if z_edges.span() <= 0.0 {
            return Err(CalibrationError::degenerate_extent(format!(
                "bottom and top edges coincide at z = {}",
                z_edges.first
            )));
        }
        Ok(Self {
            left_x: x_edges.first,
            right_x: x_edges.last,
            bottom_z: z_edges.first,
            top_z: z_edges.last,
        })
    }

    /// Horizontal size.
    pub fn width(&self) -> f64 {
        (self.right_x - self.left_x).abs()
    }

    /// Vertical size.
    pub fn height(&self) -> f64 {
        (self.top_z - self.bottom_z).abs()
    }

    /// X coordinate halfway between the edges.
    pub fn center_x(&self) -> f64 {
        (self.left_x + self.right_x) / 2.0
    }

    /// Z coordinate halfway between the edges.
    pub fn center_z(&self) -> f64 {
        (self.bottom_z + self.top_z) / 2.0
    }
}

/// Everything measured during a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    /// Fitted surface plane, unit normal.
    pub plane: Plane,
    /// Surface edges.
    pub extent: SurfaceExtent,
    /// First X-scan hit on the surface.
    pub x_point1: Point3D,
    /// Last X-scan hit on the surface.
    pub x_point2: Point3D,
    /// First Z-scan hit on the surface.
    pub z_point1: Point3D,
    /// Smallest to middle eigenvalue ratio of the plane fit.
    pub conditioning: f64,
    /// RMS distance of the fitted samples from the plane.
    pub rms_residual: f64,
}

/// Position, size and orientation of a calibrated surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePose {
    /// Surface center in world coordinates.
    pub center: Point3D,
    /// Rotation from world axes to the surface frame.
    pub orientation: DQuat,
    /// Surface axes; `local_y` is the normal.
    pub frame: OrientationFrame,
    /// Size along `local_x`.
    pub width: f64,
    /// Size along `local_z`.
    pub height: f64,
    /// Size along `local_y`.
    pub thickness: f64,
}

impl SurfacePose {
    /// Derives the pose of the surface from a calibration result.
    ///
    /// The center takes X and Z from the extent and Y from the plane.
    ///
    /// # Errors
    ///
    /// Fails with a geometry error if the plane is parallel to the Y axis
    /// or the reference points do not span the surface width.
    pub fn from_result(result: &CalibrationResult) -> Result<Self, CalibrationError> {
        let extent = &result.extent;
        let center_x = extent.center_x();
        let center_z = extent.center_z();
        let center_y = result.plane.solve_y(center_x, center_z)?;

        let (frame, orientation) = build_frame(&result.plane, result.x_point1, result.x_point2)?;

        let pose = Self {
            center: Point3D::new(center_x, center_y, center_z),
            orientation,
            frame,
            width: extent.width(),
            height: extent.height(),
            thickness: SURFACE_BOX_THICKNESS_MM,
        };
        log::info!(
            "calibrated surface: center ({:.2}, {:.2}, {:.2}) mm, {:.2} x {:.2} mm, \
             orientation (x {:.5}, y {:.5}, z {:.5}, w {:.5})",
            pose.center.x,
            pose.center.y,
            pose.center.z,
            pose.width,
            pose.height,
            orientation.x,
            orientation.y,
            orientation.z,
            orientation.w
        );
        Ok(pose)
    }

    /// The calibrated surface as a ray-casting target.
    pub fn to_surface_definition(&self) -> SurfaceDefinition {
        SurfaceDefinition {
            center: self.center,
            normal: self.frame.local_y,
            up: self.frame.local_z,
            width: self.width,
            height: self.height,
        }
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Calibrates a surface from a horizontal and a vertical scan.
///
/// # Errors
///
/// - [`GeometryError::NoSurfaceDetected`] if either scan never hits
/// - [`GeometryError::DegenerateGeometry`] if scan positions are not
///   strictly monotonic
/// - [`GeometryError::DegenerateGeometry`] if the hits do not span a plane
/// - [`CalibrationError::DegenerateExtent`] if an edge pair has zero span
pub fn calibrate<X, Z>(
    x_scan: &X,
    z_scan: &Z,
    config: &CalibrationConfig,
) -> Result<CalibrationResult, CalibrationError>
where
    X: PointSampler + ?Sized,
    Z: PointSampler + ?Sized,
{
    let x_samples: Vec<ScanSample> = x_scan.samples().collect();
    let z_samples: Vec<ScanSample> = z_scan.samples().collect();

    let x_edges = edges_of(&x_samples, config.edge_debounce, "X")?;
    let z_edges = edges_of(&z_samples, config.edge_debounce, "Z")?;
    let extent = SurfaceExtent::from_edges(x_edges, z_edges)?;

    let x_hits = hits_within(&x_samples, &x_edges);
    let z_hits = hits_within(&z_samples, &z_edges);
    let (Some(&x_point1), Some(&x_point2), Some(&z_point1)) =
        (x_hits.first(), x_hits.last(), z_hits.first())
    else {
        return Err(GeometryError::no_surface("no hits between the detected edges").into());
    };

    let mut points = x_hits;
    points.extend(z_hits);
    let fit = fit_plane_detailed(&points)?;
    if fit.conditioning > POOR_CONDITIONING_RATIO {
        log::warn!(
            "plane fit is poorly conditioned ({:.3}); scan a wider area",
            fit.conditioning
        );
    }
    log::debug!(
        "fitted plane {:.5}x + {:.5}y + {:.5}z = {:.3} from {} points (rms {:.3} mm)",
        fit.plane.a,
        fit.plane.b,
        fit.plane.c,
        fit.plane.d,
        points.len(),
        fit.rms_residual
    );

    Ok(CalibrationResult {
        plane: fit.plane,
        extent,
        x_point1,
        x_point2,
        z_point1,
        conditioning: fit.conditioning,
        rms_residual: fit.rms_residual,
    })
}

fn edges_of(
    samples: &[ScanSample],
    debounce: usize,
    axis: &str,
) -> Result<EdgePair, CalibrationError> {
    let observations: Vec<_> = samples.iter().map(ScanSample::observation).collect();
    find_edges(&observations, debounce).map_err(|err| match err {
        GeometryError::NoSurfaceDetected { message } => {
            GeometryError::no_surface(format!("{axis} scan: {message}")).into()
        }
        other => other.into(),
    })
}

/// Hit points whose scan position lies between the edges.
fn hits_within(samples: &[ScanSample], edges: &EdgePair) -> Vec<Point3D> {
    let low = edges.first.min(edges.last);
    let high = edges.first.max(edges.last);
    samples
        .iter()
        .filter(|s| (low..=high).contains(&s.position))
        .filter_map(|s| s.point)
        .collect()
}
