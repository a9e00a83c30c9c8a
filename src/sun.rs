//! Low-precision solar ephemeris (Meeus, *Astronomical Algorithms*, ch. 25).
//!
//! The geometric longitude comes from the mean longitude and the equation of the
//! center; the apparent longitude adds nutation and aberration through the usual
//! two-term correction. The accuracy is about 0.01° until 2100.

use hifitime::Epoch;

use crate::{
    constants::{normalize_degrees, Degree, RADEG},
    nutation::mean_obliquity,
    ref_system::unit_vector_to_radec,
    time::{julian_centuries, julian_date_tt},
};
use nalgebra::Vector3;

/// Orbital quantities of the Sun at one instant, all angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SolarElements {
    /// Geometric longitude ☉ referred to the mean equinox of date
    pub true_longitude: Degree,
    /// Apparent longitude λ (nutation and aberration applied)
    pub apparent_longitude: Degree,
    /// Eccentricity of the Earth's orbit
    pub eccentricity: f64,
    /// Sun–Earth distance in AU
    pub distance: f64,
    /// Longitude of the Moon's ascending node, used for the short nutation correction
    pub node: Degree,
}

pub(crate) fn solar_elements(jd: f64) -> SolarElements {
    let t = julian_centuries(jd);
    let t2 = t * t;

    let mean_longitude = 280.46646 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let mean_anomaly = 357.52911 + 35_999.050_29 * t - 0.000_153_7 * t2;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;

    let m = mean_anomaly * RADEG;
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_longitude = normalize_degrees(mean_longitude + center);
    let true_anomaly = (mean_anomaly + center) * RADEG;
    let distance = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    let node = 125.04 - 1_934.136 * t;
    let apparent_longitude =
        normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * (node * RADEG).sin());

    SolarElements {
        true_longitude,
        apparent_longitude,
        eccentricity,
        distance,
        node,
    }
}

/// Geometric longitude of the Sun (mean equinox of date) for a dynamical-time Julian Date.
pub fn sun_true_longitude(jd: f64) -> Degree {
    solar_elements(jd).true_longitude
}

/// Apparent ecliptic coordinates of the Sun.
///
/// Arguments
/// ---------
/// * `epoch`: UTC instant; converted to TT internally.
///
/// Returns
/// --------
/// * `(λ, β)` in degrees. The latitude of the Sun never exceeds 1.2″ and is returned as
///   exactly 0.
pub fn sun_position(epoch: &Epoch) -> (Degree, Degree) {
    (solar_elements(julian_date_tt(epoch)).apparent_longitude, 0.0)
}

/// Apparent right ascension and declination of the Sun, in degrees.
///
/// The apparent longitude is rotated with the mean obliquity corrected by
/// `0.00256° · cos Ω`, which stands in for the nutation in obliquity.
pub fn sun_ra_dec(epoch: &Epoch) -> (Degree, Degree) {
    let jd = julian_date_tt(epoch);
    let sun = solar_elements(jd);

    let eps = (mean_obliquity(jd) + 0.002_56 * (sun.node * RADEG).cos()) * RADEG;
    let (sin_lam, cos_lam) = (sun.apparent_longitude * RADEG).sin_cos();

    unit_vector_to_radec(&Vector3::new(
        cos_lam,
        eps.cos() * sin_lam,
        eps.sin() * sin_lam,
    ))
}

/// Distance between the centres of the Earth and the Sun, in AU.
pub fn sun_distance(epoch: &Epoch) -> f64 {
    solar_elements(julian_date_tt(epoch)).distance
}
