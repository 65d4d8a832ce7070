//! Eccentricity vector of a two-body orbit from position, velocity and `mu`.
//!
//! The computation itself is pure. Intermediate values can be inspected through an
//! [`EccentricityObserver`], which only ever receives a read-only copy of them.

use serde::Serialize;
use shape_core::vector::{self, Vector3};
use thiserror::Error;

use crate::shape::{DEFAULT_SHAPE_TOLERANCE, OrbitShape};
use crate::state::StateVector;

/// Log target used by [`LogObserver`].
pub const LOG_TARGET: &str = "shape_orbits::eccentricity";

/// Inputs for which the eccentricity is undefined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EccentricityError {
    #[error("position magnitude must be non-zero")]
    ZeroPosition,
    #[error("gravitational parameter must be positive (got {mu})")]
    NonPositiveMu { mu: f64 },
    #[error("{field} contains a non-finite value")]
    NonFiniteInput { field: &'static str },
    /// Only produced by [`vis_viva`](crate::vis_viva).
    #[error("radius must be positive (got {radius})")]
    NonPositiveRadius { radius: f64 },
    /// Only produced by [`vis_viva`](crate::vis_viva): the radius lies beyond apoapsis.
    #[error("radius {radius} is not reachable on a conic with semi-major axis {semi_major_axis}")]
    UnreachableRadius { radius: f64, semi_major_axis: f64 },
}

/// Eccentricity vector (pointing at periapsis) and its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EccentricityResult {
    pub eccentricity_vector: Vector3,
    pub eccentricity: f64,
}

impl EccentricityResult {
    /// Conic classification using [`DEFAULT_SHAPE_TOLERANCE`].
    pub fn shape(&self) -> OrbitShape {
        OrbitShape::classify(self.eccentricity, DEFAULT_SHAPE_TOLERANCE)
    }
}

/// Every intermediate of one eccentricity computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    /// |r|
    pub rn: f64,
    /// |v|
    pub vn: f64,
    /// Radial velocity, r̂ · v.
    pub v_r: f64,
    /// Transverse velocity; the radicand is clamped at zero.
    pub v_p: f64,
    /// Specific angular momentum r × v.
    pub h: Vector3,
    pub hn: f64,
    pub vxh: Vector3,
    pub vxh_mu: Vector3,
    pub radial_unit: Vector3,
    pub e_vec: Vector3,
    pub e: f64,
}

/// Receives the intermediates of a computation. Cannot influence its result.
pub trait EccentricityObserver {
    fn observe(&self, diagnostics: &Diagnostics);
}

impl<F> EccentricityObserver for F
where
    F: Fn(&Diagnostics),
{
    fn observe(&self, diagnostics: &Diagnostics) {
        self(diagnostics)
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EccentricityObserver for NoopObserver {
    #[inline]
    fn observe(&self, _diagnostics: &Diagnostics) {}
}

/// Emits diagnostics through the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EccentricityObserver for LogObserver {
    fn observe(&self, d: &Diagnostics) {
        if !log::log_enabled!(target: LOG_TARGET, log::Level::Trace) {
            return;
        }
        log::trace!(target: LOG_TARGET, "rn = {}", d.rn);
        log::trace!(target: LOG_TARGET, "vn = {}", d.vn);
        log::trace!(target: LOG_TARGET, "v_r = {}", d.v_r);
        log::trace!(target: LOG_TARGET, "v_p = {}", d.v_p);
        log::trace!(target: LOG_TARGET, "h = {:?}", d.h);
        log::trace!(target: LOG_TARGET, "hn = {}", d.hn);
        log::trace!(target: LOG_TARGET, "vxh = {:?}", d.vxh);
        log::trace!(target: LOG_TARGET, "vxh_mu = {:?}", d.vxh_mu);
        log::trace!(target: LOG_TARGET, "norm_r = {:?}", d.radial_unit);
        log::trace!(target: LOG_TARGET, "e_vec = {:?}, e = {}", d.e_vec, d.e);
    }
}

/// Stateless calculator bundling an observer for the intermediates.
///
/// The default calculator discards diagnostics; use [`with_observer`] to route them
/// elsewhere, e.g. to [`LogObserver`].
///
/// [`with_observer`]: OrbitalElementCalculator::with_observer
#[derive(Debug, Clone, Default)]
pub struct OrbitalElementCalculator<O = NoopObserver> {
    observer: O,
}

impl OrbitalElementCalculator<NoopObserver> {
    pub fn new() -> Self {
        Self {
            observer: NoopObserver,
        }
    }
}

impl<O: EccentricityObserver> OrbitalElementCalculator<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Eccentricity of `state` about a central body with gravitational parameter `mu`.
    pub fn compute(
        &self,
        state: &StateVector,
        mu: f64,
    ) -> Result<EccentricityResult, EccentricityError> {
        compute_eccentricity_observed(state.position, state.velocity, mu, &self.observer)
    }
}

/// Specific angular momentum `h = r × v`.
#[inline]
pub fn specific_angular_momentum(position: Vector3, velocity: Vector3) -> Vector3 {
    vector::cross(&position, &velocity)
}

/// Split the velocity into radial and transverse speeds `(v_r, v_p)`.
///
/// `v_p` is never NaN: round-off that pushes `|v|² - v_r²` below zero is clamped.
pub fn velocity_components(
    position: Vector3,
    velocity: Vector3,
) -> Result<(f64, f64), EccentricityError> {
    check_finite("position", &position)?;
    check_finite("velocity", &velocity)?;
    let rn = position_norm(&position)?;
    let radial_unit = vector::div(&position, rn);
    Ok(radial_and_transverse(&radial_unit, &velocity))
}

/// Eccentricity vector and eccentricity for the state `(position, velocity)`.
///
/// Any finite state is accepted. The one finite-input failure left is a cross product
/// `r × v` or `v × h` overflowing `f64` (`|r|·|v|²` beyond `f64::MAX`); it is reported
/// as `NonFiniteInput` on `position × velocity`.
pub fn compute_eccentricity(
    position: Vector3,
    velocity: Vector3,
    mu: f64,
) -> Result<EccentricityResult, EccentricityError> {
    compute_eccentricity_observed(position, velocity, mu, &NoopObserver)
}

/// Same as [`compute_eccentricity`], handing the intermediates to `observer` first.
pub fn compute_eccentricity_observed<O>(
    position: Vector3,
    velocity: Vector3,
    mu: f64,
    observer: &O,
) -> Result<EccentricityResult, EccentricityError>
where
    O: EccentricityObserver + ?Sized,
{
    let rn = validate(&position, &velocity, mu)?;
    let diagnostics = evaluate(&position, &velocity, mu, rn);

    if !diagnostics.e.is_finite() || !vector::is_finite(&diagnostics.e_vec) {
        return Err(EccentricityError::NonFiniteInput {
            field: "position × velocity",
        });
    }

    observer.observe(&diagnostics);
    Ok(EccentricityResult {
        eccentricity_vector: diagnostics.e_vec,
        eccentricity: diagnostics.e,
    })
}

/// Reject every input the formula is undefined for and return `|r|`.
pub(crate) fn validate(
    position: &Vector3,
    velocity: &Vector3,
    mu: f64,
) -> Result<f64, EccentricityError> {
    check_finite("position", position)?;
    check_finite("velocity", velocity)?;
    if !mu.is_finite() {
        return Err(EccentricityError::NonFiniteInput { field: "mu" });
    }
    if mu <= 0.0 {
        return Err(EccentricityError::NonPositiveMu { mu });
    }
    position_norm(position)
}

fn check_finite(field: &'static str, v: &Vector3) -> Result<(), EccentricityError> {
    if vector::is_finite(v) {
        Ok(())
    } else {
        Err(EccentricityError::NonFiniteInput { field })
    }
}

fn position_norm(position: &Vector3) -> Result<f64, EccentricityError> {
    let rn = vector::norm(position);
    if rn == 0.0 {
        return Err(EccentricityError::ZeroPosition);
    }
    if !rn.is_finite() {
        return Err(EccentricityError::NonFiniteInput { field: "position" });
    }
    Ok(rn)
}

fn radial_and_transverse(radial_unit: &Vector3, velocity: &Vector3) -> (f64, f64) {
    let vn = vector::norm(velocity);
    let v_r = vector::dot(radial_unit, velocity);
    // (vn - |v_r|)(vn + |v_r|) factored so large speeds do not overflow.
    let v_p = (vn - v_r.abs()).max(0.0).sqrt() * (vn + v_r.abs()).sqrt();
    (v_r, v_p)
}

fn evaluate(position: &Vector3, velocity: &Vector3, mu: f64, rn: f64) -> Diagnostics {
    let vn = vector::norm(velocity);
    let radial_unit = vector::div(position, rn);
    let (v_r, v_p) = radial_and_transverse(&radial_unit, velocity);

    let h = vector::cross(position, velocity);
    let hn = vector::norm(&h);
    let vxh = vector::cross(velocity, &h);
    let vxh_mu = vector::div(&vxh, mu);
    let e_vec = vector::sub(&vxh_mu, &radial_unit);
    let e = vector::norm(&e_vec);

    Diagnostics {
        rn,
        vn,
        v_r,
        v_p,
        h,
        hn,
        vxh,
        vxh_mu,
        radial_unit,
        e_vec,
        e,
    }
}
