//! # Galactic coordinates
//!
//! IAU 1958 galactic system referred to the mean equator and equinox of J2000.0.
//! The transform is a fixed rotation built once from the J2000 position of the north
//! galactic pole and the galactic longitude of the north celestial pole:
//!
//! ```text
//! M = R_z(l_NCP − 180°) · R_y(δ_NGP − 90°) · R_z(−α_NGP)
//! ```
//!
//! `M` maps an equatorial unit vector onto a galactic one; its transpose is the inverse.

use std::sync::LazyLock;

use nalgebra::Matrix3;
use serde::Serialize;

use crate::{
    batch::map_pairs,
    constants::{Degree, RADEG},
    ref_system::{axis_rotation, rotate_equatorial, Axis},
    skymath_errors::Result,
};

/// Right ascension of the north galactic pole (J2000), degrees
pub const NGP_RA: Degree = 192.859_48;
/// Declination of the north galactic pole (J2000), degrees
pub const NGP_DEC: Degree = 27.128_25;
/// Galactic longitude of the north celestial pole, degrees
pub const NCP_GALACTIC_LONGITUDE: Degree = 122.931_92;

static EQUATORIAL_TO_GALACTIC: LazyLock<Matrix3<f64>> = LazyLock::new(|| {
    axis_rotation(Axis::Z, (NCP_GALACTIC_LONGITUDE - 180.0) * RADEG)
        * axis_rotation(Axis::Y, (NGP_DEC - 90.0) * RADEG)
        * axis_rotation(Axis::Z, -NGP_RA * RADEG)
});

static GALACTIC_TO_EQUATORIAL: LazyLock<Matrix3<f64>> =
    LazyLock::new(|| EQUATORIAL_TO_GALACTIC.transpose());

/// Convert J2000 equatorial coordinates to galactic coordinates.
///
/// Return
/// ----------
/// * `(l, b)` in degrees, `l` ∈ [0, 360), `b` ∈ [-90, 90].
pub fn equatorial_to_galactic(ra: Degree, dec: Degree) -> (Degree, Degree) {
    rotate_equatorial(&EQUATORIAL_TO_GALACTIC, ra, dec)
}

/// Convert galactic coordinates to J2000 equatorial coordinates.
pub fn galactic_to_equatorial(l: Degree, b: Degree) -> (Degree, Degree) {
    rotate_equatorial(&GALACTIC_TO_EQUATORIAL, l, b)
}

/// Batch form of [`equatorial_to_galactic`].
pub fn equatorial_to_galactic_batch(ra: &[f64], dec: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let rot = *EQUATORIAL_TO_GALACTIC;
    map_pairs(("ra", ra), ("dec", dec), |r, d| rotate_equatorial(&rot, r, d))
}

/// Batch form of [`galactic_to_equatorial`].
pub fn galactic_to_equatorial_batch(l: &[f64], b: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let rot = *GALACTIC_TO_EQUATORIAL;
    map_pairs(("l", l), ("b", b), |l, b| rotate_equatorial(&rot, l, b))
}

/// A named reference direction in galactic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GalacticLandmark {
    pub name: &'static str,
    pub l: Degree,
    pub b: Degree,
}

const fn landmark(name: &'static str, l: Degree, b: Degree) -> GalacticLandmark {
    GalacticLandmark { name, l, b }
}

static LANDMARKS: [GalacticLandmark; 8] = [
    landmark("Galactic Center", 0.0, 0.0),
    landmark("Galactic Anticenter", 180.0, 0.0),
    landmark("North Galactic Pole", 0.0, 90.0),
    landmark("South Galactic Pole", 0.0, -90.0),
    landmark("Large Magellanic Cloud", 280.465, -32.888),
    landmark("Small Magellanic Cloud", 302.808, -44.328),
    landmark("Andromeda Galaxy (M31)", 121.174, -21.573),
    landmark("Cygnus X-1", 71.335, 3.067),
];

/// Galactic coordinates of a few well-known directions.
///
/// The longitude of the two poles is arbitrary and given as 0.
pub fn galactic_landmarks() -> &'static [GalacticLandmark] {
    &LANDMARKS
}
