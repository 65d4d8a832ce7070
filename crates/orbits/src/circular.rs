//! Circular-orbit and vis-viva speed helpers.

use shape_core::vector::{self, Vector3};

use crate::eccentricity::{EccentricityError, validate};
use crate::state::StateVector;

const K_HAT: Vector3 = [0.0, 0.0, 1.0];
const I_HAT: Vector3 = [1.0, 0.0, 0.0];

/// Velocity for a circular, prograde orbit through `position`.
///
/// The direction is `k̂ × r` normalised, so equatorial positions give equatorial
/// orbits. Positions along the z axis fall back to `î × r`.
pub fn circular_velocity(position: Vector3, mu: f64) -> Result<Vector3, EccentricityError> {
    let rn = validate(&position, &[0.0; 3], mu)?;
    let speed = (mu / rn).sqrt();

    let mut direction = vector::cross(&K_HAT, &position);
    if vector::norm(&direction) <= rn * 1e-12 {
        direction = vector::cross(&I_HAT, &position);
    }
    let dn = vector::norm(&direction);
    Ok(vector::scale(&direction, speed / dn))
}

/// Full state for a circular orbit through `position`.
pub fn circular_state(position: Vector3, mu: f64) -> Result<StateVector, EccentricityError> {
    Ok(StateVector::new(position, circular_velocity(position, mu)?))
}

/// Orbital speed at `radius` for a conic with the given semi-major axis
/// (negative for hyperbolas).
pub fn vis_viva(radius: f64, semi_major_axis: f64, mu: f64) -> Result<f64, EccentricityError> {
    for (field, value) in [
        ("radius", radius),
        ("semi_major_axis", semi_major_axis),
        ("mu", mu),
    ] {
        if !value.is_finite() {
            return Err(EccentricityError::NonFiniteInput { field });
        }
    }
    if mu <= 0.0 {
        return Err(EccentricityError::NonPositiveMu { mu });
    }
    if radius <= 0.0 {
        return Err(EccentricityError::NonPositiveRadius { radius });
    }

    let radicand = mu * (2.0 / radius - 1.0 / semi_major_axis);
    if !radicand.is_finite() || radicand < 0.0 {
        return Err(EccentricityError::UnreachableRadius {
            radius,
            semi_major_axis,
        });
    }
    Ok(radicand.sqrt())
}
