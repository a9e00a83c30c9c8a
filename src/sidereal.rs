//! Greenwich and local sidereal time.
//!
//! All functions take a UT Julian Date and return hours in [0, 24). The mean sidereal
//! time follows the IAU 1982 expression; the apparent one adds the equation of the
//! equinoxes from [`crate::nutation`].

use crate::{
    batch::map_values,
    constants::{normalize_degrees, normalize_hours, Degree, Hour, DEG_PER_HOUR, JD2000},
    nutation::equation_of_equinoxes,
    time::julian_centuries,
};

/// Compute the Greenwich Mean Sidereal Time (GMST) in hours.
///
/// The IAU 1982 expression, written for an arbitrary instant (not only 0h UT):
///
/// ```text
/// θ₀ = 280.46061837° + 360.98564736629°·d + 0.000387933°·T² − T³/38710000
/// ```
///
/// with `d` the days and `T` the centuries elapsed since J2000.0.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date (UT).
///
/// Returns
/// --------
/// * GMST in hours, in [0, 24).
pub fn gmst(jd: f64) -> Hour {
    const C0: f64 = 280.460_618_37;
    const C1: f64 = 360.985_647_366_29;
    const C2: f64 = 0.000_387_933;
    const C3: f64 = -1.0 / 38_710_000.0;

    let d = jd - JD2000;
    let t = julian_centuries(jd);

    let theta = C0 + C1 * d + (C3 * t + C2) * t * t;

    normalize_hours(normalize_degrees(theta) / DEG_PER_HOUR)
}

/// Local mean sidereal time for an observer at `longitude` (degrees, east positive).
pub fn local_mean_sidereal_time(jd: f64, longitude: Degree) -> Hour {
    normalize_hours(gmst(jd) + longitude / DEG_PER_HOUR)
}

/// Greenwich apparent sidereal time: GMST corrected by the equation of the equinoxes.
pub fn greenwich_apparent_sidereal_time(jd: f64) -> Hour {
    // arcseconds → hours
    normalize_hours(gmst(jd) + equation_of_equinoxes(jd) / (DEG_PER_HOUR * 3600.0))
}

/// Local apparent sidereal time for an observer at `longitude` (degrees, east positive).
///
/// This is the sidereal time used to form hour angles in
/// [`crate::transforms::ra_dec_to_alt_az`].
pub fn apparent_sidereal_time(jd: f64, longitude: Degree) -> Hour {
    normalize_hours(greenwich_apparent_sidereal_time(jd) + longitude / DEG_PER_HOUR)
}

/// Batch form of [`gmst`].
pub fn gmst_batch(jd: &[f64]) -> Vec<f64> {
    map_values(jd, gmst)
}

/// Batch form of [`local_mean_sidereal_time`] over a single longitude.
pub fn local_mean_sidereal_time_batch(jd: &[f64], longitude: Degree) -> Vec<f64> {
    map_values(jd, |t| local_mean_sidereal_time(t, longitude))
}

/// Batch form of [`apparent_sidereal_time`] over a single longitude.
pub fn apparent_sidereal_time_batch(jd: &[f64], longitude: Degree) -> Vec<f64> {
    map_values(jd, |t| apparent_sidereal_time(t, longitude))
}
