//! Conic classification from the scalar eccentricity.

use std::fmt;

use serde::Serialize;

/// Tolerance used when no other is given: eccentricities this close to 0 or 1 are
/// treated as exactly circular or parabolic.
pub const DEFAULT_SHAPE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitShape {
    Circular,
    Elliptical,
    Parabolic,
    Hyperbolic,
}

impl OrbitShape {
    pub fn classify(eccentricity: f64, tolerance: f64) -> Self {
        if eccentricity <= tolerance {
            OrbitShape::Circular
        } else if (eccentricity - 1.0).abs() <= tolerance {
            OrbitShape::Parabolic
        } else if eccentricity < 1.0 {
            OrbitShape::Elliptical
        } else {
            OrbitShape::Hyperbolic
        }
    }

    /// True for the closed conics.
    pub fn is_bound(self) -> bool {
        matches!(self, OrbitShape::Circular | OrbitShape::Elliptical)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitShape::Circular => "circular",
            OrbitShape::Elliptical => "elliptical",
            OrbitShape::Parabolic => "parabolic",
            OrbitShape::Hyperbolic => "hyperbolic",
        }
    }
}

impl fmt::Display for OrbitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
