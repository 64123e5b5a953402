//! Default physical and simulation parameters.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Physical parameters

/// Strength of the electric field (along y).
pub const ELECTRIC_FIELD: fcn = 1.0;
/// Strength of the magnetic field (perpendicular to the y–z plane).
pub const MAGNETIC_FIELD: fcn = 0.5;
/// Charge of the particle.
pub const CHARGE: fcn = 3.0;
/// Mass of the particle.
pub const MASS: fcn = 20.0;

// Filter geometry

/// Longitudinal extent of the filter region.
pub const FILTER_LENGTH: fcn = 5.0;
/// Transverse aperture radius of the filter.
pub const APERTURE_RADIUS: fcn = 0.03;

// Simulation parameters

/// Number of steps used for a single timeline.
pub const DEFAULT_RESOLUTION: usize = 500;
/// Largest resolution used when sampling discretization errors.
pub const DEFAULT_MAX_ERROR_RESOLUTION: usize = 1000;
/// Number of resolutions sampled when measuring discretization errors.
pub const DEFAULT_ERROR_SAMPLE_COUNT: usize = 100;
/// Number of particles sent through the filter in a sweep.
pub const DEFAULT_SWEEP_PARTICLES: usize = 10;
/// Upper bound of the random transverse entry velocity in a sweep.
pub const SWEEP_VELOCITY_SPREAD: fcn = 15.0;
