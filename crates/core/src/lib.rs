//! Core units, constants, and shared primitives for the orbit shape workspace.

/// Physical constants. Each value names its unit system in the identifier.
pub mod constants {
    /// Earth gravitational parameter (km³/s²).
    pub const EARTH_MU_KM3_S2: f64 = 3.986004418e5;
    /// Earth gravitational parameter (m³/s²).
    pub const EARTH_MU_M3_S2: f64 = 3.986004418e14;
    /// Metres per kilometre.
    pub const METRES_PER_KM: f64 = 1_000.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::METRES_PER_KM;

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * METRES_PER_KM
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / METRES_PER_KM
    }

    /// Convert a gravitational parameter from km³/s² to m³/s².
    #[inline]
    pub fn km3s2_to_m3s2(mu: f64) -> f64 {
        mu * METRES_PER_KM.powi(3)
    }

    /// Convert a gravitational parameter from m³/s² to km³/s².
    #[inline]
    pub fn m3s2_to_km3s2(mu: f64) -> f64 {
        mu / METRES_PER_KM.powi(3)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector; the unit is whatever the caller supplies.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    ///
    /// Built from `hypot`, so it stays finite whenever the true norm is representable
    /// (components around 1e160 would overflow a plain `sqrt(v · v)`).
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        v[0].hypot(v[1]).hypot(v[2])
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Right-handed cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Divide every component by a scalar.
    #[inline]
    pub fn div(v: &Vector3, s: f64) -> Vector3 {
        [v[0] / s, v[1] / s, v[2] / s]
    }

    /// True when every component is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::vector::*;
    use super::{constants, units};

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross(&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
        assert_eq!(cross(&[2.0, 3.0, 4.0], &[2.0, 3.0, 4.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn cross_of_reference_state() {
        let h = cross(&[1_000.0, 5_000.0, 7_000.0], &[3.0, 4.0, 5.0]);
        assert_eq!(h, [-3_000.0, 16_000.0, -11_000.0]);
    }

    #[test]
    fn finiteness_check_catches_nan_and_inf() {
        assert!(is_finite(&[1.0, -2.0, 0.0]));
        assert!(!is_finite(&[f64::NAN, 0.0, 0.0]));
        assert!(!is_finite(&[0.0, f64::INFINITY, 0.0]));
        assert!(!is_finite(&[0.0, 0.0, f64::NEG_INFINITY]));
    }

    #[test]
    fn mu_conversion_matches_earth_constants() {
        let converted = units::km3s2_to_m3s2(constants::EARTH_MU_KM3_S2);
        assert!((converted - constants::EARTH_MU_M3_S2).abs() / constants::EARTH_MU_M3_S2 < 1e-15);
        let back = units::m3s2_to_km3s2(constants::EARTH_MU_M3_S2);
        assert!((back - constants::EARTH_MU_KM3_S2).abs() / constants::EARTH_MU_KM3_S2 < 1e-15);
        assert_eq!(units::m_to_km(units::km_to_m(7.5)), 7.5);
    }

    #[test]
    fn norm_survives_components_whose_square_overflows() {
        assert_eq!(norm(&[3.0, 4.0, 0.0]), 5.0);
        assert_eq!(norm(&[1e160, 0.0, 0.0]), 1e160);
        let n = norm(&[3e200, 0.0, 4e200]);
        assert!((n - 5e200).abs() / 5e200 < 1e-15);
        assert!(!norm(&[f64::MAX, f64::MAX, 0.0]).is_finite());
    }
}
