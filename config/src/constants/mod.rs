//! Centralized configuration values shared across the calibration crates.
//!
//! Each public item documents its purpose and provides a minimal usage
//! example so downstream crates can stay declarative and avoid scattering
//! literals.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-11)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum length a direction vector must have before it is normalized.
///
/// Shorter vectors are treated as zero (coincident points, parallel axes).
///
/// # Examples
/// ```
/// use config::constants::DIRECTION_EPSILON;
/// assert!(DIRECTION_EPSILON < 1.0e-6);
/// ```
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Threshold on `|direction · normal|` below which a ray counts as parallel
/// to a surface.
///
/// # Examples
/// ```
/// use config::constants::PARALLEL_RAY_EPSILON;
/// let denom: f64 = 0.0005;
/// assert!(denom.abs() < PARALLEL_RAY_EPSILON);
/// ```
pub const PARALLEL_RAY_EPSILON: f64 = 1e-3;

/// Relative eigenvalue threshold used to detect rank-deficient point clouds.
///
/// A covariance whose second-largest eigenvalue is below
/// `RANK_THRESHOLD * largest` describes points on a single line.
pub const RANK_THRESHOLD: f64 = 1e-8;

/// Tolerance for orthonormality checks on orientation frames.
///
/// # Examples
/// ```
/// use config::constants::ORTHOGONALITY_TOLERANCE;
/// assert!(ORTHOGONALITY_TOLERANCE <= 1.0e-6);
/// ```
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

// =============================================================================
// FITTING CONSTANTS
// =============================================================================

/// Minimum number of samples required for a plane fit.
pub const MIN_PLANE_SAMPLES: usize = 3;

/// Default edge debounce. Hit runs separated by fewer than this many
/// consecutive misses are merged, so single-sample dropouts are bridged.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_EDGE_DEBOUNCE;
/// let user: Option<usize> = None;
/// assert_eq!(user.unwrap_or(DEFAULT_EDGE_DEBOUNCE), 2);
/// ```
pub const DEFAULT_EDGE_DEBOUNCE: usize = 2;

/// Ratio of smallest to middle eigenvalue above which a plane fit is
/// reported as poorly conditioned.
///
/// A flat scan has a ratio near zero; a ratio near one means the samples
/// form a blob with no preferred normal.
pub const POOR_CONDITIONING_RATIO: f64 = 0.1;

// =============================================================================
// SENSOR CONSTANTS
// =============================================================================

/// Maximum range of the ultrasonic rangefinder, reported on a miss.
pub const SENSOR_MAX_RANGE_MM: f64 = 400.0;

/// Amplitude of the deterministic noise added to simulated hits.
pub const SENSOR_NOISE_AMPLITUDE_MM: f64 = 2.0;

/// Conversion factor from millimetres to metres.
///
/// # Examples
/// ```
/// use config::constants::MM_PER_METER;
/// assert_eq!(250.0 / MM_PER_METER, 0.25);
/// ```
pub const MM_PER_METER: f64 = 1000.0;

/// Thickness of the box used to describe a calibrated surface.
pub const SURFACE_BOX_THICKNESS_MM: f64 = 1.0;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// =============================================================================
// CALIBRATION CONFIG
// =============================================================================

/// Immutable snapshot of the tunable calibration settings.
///
/// # Examples
/// ```
/// use config::constants::CalibrationConfig;
/// let config = CalibrationConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Numeric tolerance used for degeneracy checks.
    pub tolerance: f64,
    /// Hit runs separated by fewer than this many misses are merged when
    /// extracting edges.
    pub edge_debounce: usize,
    /// Reading substituted by the simulated sensor on a miss.
    pub max_range_mm: f64,
    /// Amplitude of the simulated measurement noise.
    pub noise_amplitude_mm: f64,
}

impl CalibrationConfig {
    /// Builds a configuration, validating every field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::CalibrationConfig;
    /// let cfg = CalibrationConfig::new(1.0e-9, 2, 400.0, 0.0).expect("valid config");
    /// assert_eq!(cfg.edge_debounce, 2);
    /// ```
    pub fn new(
        tolerance: f64,
        edge_debounce: usize,
        max_range_mm: f64,
        noise_amplitude_mm: f64,
    ) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !max_range_mm.is_finite() || max_range_mm <= 0.0 {
            return Err(ConfigError::InvalidRange(max_range_mm));
        }
        if !noise_amplitude_mm.is_finite() || noise_amplitude_mm < 0.0 {
            return Err(ConfigError::InvalidNoise(noise_amplitude_mm));
        }
        Ok(Self {
            tolerance,
            edge_debounce,
            max_range_mm,
            noise_amplitude_mm,
        })
    }

    /// Same configuration with the simulated noise switched off.
    pub fn noiseless(self) -> Self {
        Self {
            noise_amplitude_mm: 0.0,
            ..self
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: DIRECTION_EPSILON,
            edge_debounce: DEFAULT_EDGE_DEBOUNCE,
            max_range_mm: SENSOR_MAX_RANGE_MM,
            noise_amplitude_mm: SENSOR_NOISE_AMPLITUDE_MM,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is not a positive finite number.
    InvalidTolerance(f64),
    /// Raised when the sensor range is not a positive finite number.
    InvalidRange(f64),
    /// Raised when the noise amplitude is negative or not finite.
    InvalidNoise(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidRange(value) => {
                write!(f, "max_range_mm must be positive: {value}")
            }
            ConfigError::InvalidNoise(value) => {
                write!(f, "noise_amplitude_mm must be non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
