//! Orbit shape from Cartesian state vectors.
//!
//! The facade re-exports the workspace crates so front-ends (the CLI, tests,
//! downstream tools) depend on a single library.

pub use shape_config as config;
pub use shape_core as core;
pub use shape_export as export;
pub use shape_orbits as orbits;

pub use shape_orbits::{
    EccentricityError, EccentricityResult, OrbitShape, OrbitalElementCalculator, StateVector,
    compute_eccentricity,
};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
