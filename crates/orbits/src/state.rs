use serde::{Deserialize, Serialize};
use shape_core::vector::{self, Vector3};

/// Instantaneous Cartesian state of a body relative to its central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl StateVector {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    /// Rescale both position and velocity by the same length factor
    /// (1000 turns a km, km/s state into m, m/s).
    pub fn scaled(&self, length_factor: f64) -> Self {
        Self {
            position: vector::scale(&self.position, length_factor),
            velocity: vector::scale(&self.velocity, length_factor),
        }
    }
}
