//! Orbit shape from a Cartesian state: angular momentum, eccentricity vector and
//! scalar eccentricity for two-body motion.
//!
//! Every function here works in whatever unit system the caller chooses, provided
//! position, velocity and the gravitational parameter agree with each other.

pub mod circular;
pub mod eccentricity;
pub mod shape;
pub mod state;

pub use circular::{circular_state, circular_velocity, vis_viva};
pub use eccentricity::{
    Diagnostics, EccentricityError, EccentricityObserver, EccentricityResult, LogObserver,
    NoopObserver, OrbitalElementCalculator, compute_eccentricity, compute_eccentricity_observed,
    specific_angular_momentum, velocity_components,
};
pub use shape::{DEFAULT_SHAPE_TOLERANCE, OrbitShape};
pub use state::StateVector;
