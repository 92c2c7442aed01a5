//! # Surface Geometry
//!
//! Pure geometry engine for calibrating a flat rectangular surface from a
//! sparse, noisy set of rangefinder samples.
//!
//! ## Architecture
//!
//! ```text
//! scan points ──► fit (Plane) ──┐
//! hit/miss     ──► edges        ├──► frame (OrientationFrame + DQuat)
//! reference points ─────────────┘
//!
//! intersect: ray + SurfaceDefinition ──► RayHit   (inverse model)
//! ```
//!
//! Every operation is a synchronous function of its inputs. Nothing here
//! touches hardware or keeps state between calls.
//!
//! ## Example
//!
//! ```rust
//! use surface_geometry::{fit_plane, Vector3};
//!
//! let points = [
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Vector3::new(1.0, 1.0, 0.0),
//! ];
//! let plane = fit_plane(&points).unwrap();
//! assert!((plane.c.abs() - 1.0).abs() < 1e-9);
//! ```

pub mod edges;
pub mod error;
pub mod fit;
pub mod frame;
pub mod intersect;
pub mod plane;
pub mod vector;

// Re-export public API
pub use edges::{find_edges, EdgePair, ScanObservation};
pub use error::{GeometryError, GeometryResult};
pub use fit::{fit_plane, fit_plane_detailed, PlaneFit};
pub use frame::{build_frame, quaternion_from_matrix, OrientationFrame};
pub use intersect::{intersect, RayHit, SurfaceBasis, SurfaceDefinition};
pub use plane::Plane;
pub use vector::{Point3D, Vector3};
