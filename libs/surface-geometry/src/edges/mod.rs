//! # Edge Extraction
//!
//! Finds where a surface begins and ends along a scan axis from a sequence
//! of hit/miss observations.
//!
//! Observations must be ordered monotonically along the axis (increasing or
//! decreasing); anything else is rejected. Runs of hits separated by fewer
//! than `debounce` misses are merged; the run with the most hits is taken as the surface, which drops
//! isolated spurious hits. Each boundary is placed halfway between the
//! extreme hit and its neighbouring miss, the least biased estimate under
//! uniform sampling. A run touching the end of the scan reports the extreme
//! hit itself.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// One sensor reading during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanObservation {
    /// Sensor position along the scan axis.
    pub position: f64,
    /// Whether the sensor saw the surface.
    pub hit: bool,
}

impl ScanObservation {
    /// Creates an observation.
    pub fn new(position: f64, hit: bool) -> Self {
        Self { position, hit }
    }
}

/// Boundary positions in scan order.
///
/// `first` is the edge crossed first during the scan; mapping it to a
/// physical left/right or bottom/top is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePair {
    /// Edge crossed first.
    pub first: f64,
    /// Edge crossed last.
    pub last: f64,
}

impl EdgePair {
    /// Distance between the two edges.
    pub fn span(&self) -> f64 {
        (self.last - self.first).abs()
    }

    /// Position halfway between the edges.
    pub fn midpoint(&self) -> f64 {
        (self.first + self.last) / 2.0
    }
}

#[derive(Debug, Clone, Copy)]
struct HitRun {
    start: usize,
    end: usize,
    hits: usize,
}

/// Extracts the two surface boundaries from a scan.
///
/// # Errors
///
/// - [`GeometryError::NoSurfaceDetected`] when no observation is a hit
/// - [`GeometryError::DegenerateGeometry`] when positions are not finite and
///   strictly monotonic
///
/// # Example
///
/// ```rust
/// use surface_geometry::{find_edges, ScanObservation};
///
/// let scan: Vec<_> = [false, false, true, true, true, false, false]
///     .iter()
///     .enumerate()
///     .map(|(i, &hit)| ScanObservation::new(i as f64, hit))
///     .collect();
/// let edges = find_edges(&scan, 0).unwrap();
/// assert_eq!((edges.first, edges.last), (1.5, 4.5));
/// ```
pub fn find_edges(observations: &[ScanObservation], debounce: usize) -> GeometryResult<EdgePair> {
    check_monotonic(observations)?;

    let mut runs: Vec<HitRun> = Vec::new();
    let mut misses_since_hit = 0usize;

    for (index, observation) in observations.iter().enumerate() {
        if !observation.hit {
            misses_since_hit += 1;
            continue;
        }
        match runs.last_mut() {
            Some(run) if misses_since_hit < debounce => {
                run.end = index;
                run.hits += 1;
            }
            _ => runs.push(HitRun {
                start: index,
                end: index,
                hits: 1,
            }),
        }
        misses_since_hit = 0;
    }

    // Ties go to the run scanned first.
    let surface = runs
        .into_iter()
        .reduce(|best, run| if run.hits > best.hits { run } else { best })
        .ok_or_else(|| {
            GeometryError::no_surface(format!(
                "none of {} observations hit the surface",
                observations.len()
            ))
        })?;

    let start = observations[surface.start].position;
    let end = observations[surface.end].position;

    let first = match surface.start.checked_sub(1) {
        Some(before) => (observations[before].position + start) / 2.0,
        None => start,
    };
    let last = match observations.get(surface.end + 1) {
        Some(after) => (end + after.position) / 2.0,
        None => end,
    };

    Ok(EdgePair { first, last })
}

fn check_monotonic(observations: &[ScanObservation]) -> GeometryResult<()> {
    if let Some(bad) = observations.iter().find(|o| !o.position.is_finite()) {
        return Err(GeometryError::degenerate_geometry(format!(
            "non-finite scan position {}",
            bad.position
        )));
    }
    let increasing = observations
        .windows(2)
        .all(|w| w[0].position < w[1].position);
    let decreasing = observations
        .windows(2)
        .all(|w| w[0].position > w[1].position);
    if !increasing && !decreasing {
        return Err(GeometryError::degenerate_geometry(
            "scan positions must be strictly increasing or strictly decreasing",
        ));
    }
    Ok(())
}
