//! # Equatorial ↔ horizontal transforms
//!
//! Converts between the apparent equatorial frame of date `(ra, dec)` and the local
//! horizontal frame `(alt, az)` of an observer. Azimuth is counted from North through
//! East; the hour angle is formed from the **local apparent** sidereal time.
//!
//! Both directions go through a pair of spherical-triangle formulas in `atan2` form, which
//! keeps them well defined everywhere except at the zenith/nadir, where the azimuth is
//! undefined and is returned as 0.
//!
//! The batch forms evaluate the sidereal time once and then map the per-star formula over
//! the input slices, so they return exactly the scalar results element by element.

use hifitime::Epoch;

use crate::{
    batch::map_pairs,
    constants::{normalize_degrees, wrap_signed_degrees, Degree, DEG_PER_HOUR, RADEG},
    location::Location,
    sidereal::apparent_sidereal_time,
    skymath_errors::Result,
    time::julian_date,
};

/// Below this value of `cos(alt)` the direction is treated as the zenith or nadir.
const ZENITH_EPSILON: f64 = 1e-12;

/// Local apparent sidereal time of the observer, in degrees.
fn local_sidereal_angle(epoch: &Epoch, location: &Location) -> Degree {
    apparent_sidereal_time(julian_date(epoch), location.longitude) * DEG_PER_HOUR
}

/// Hour angle of a right ascension for an observer, in degrees within (-180, 180].
///
/// Positive values are west of the meridian (the object has transited).
pub fn hour_angle(ra: Degree, epoch: &Epoch, location: &Location) -> Degree {
    wrap_signed_degrees(local_sidereal_angle(epoch, location) - ra)
}

/// Horizontal coordinates from hour angle, declination and latitude.
///
/// ```text
/// sin h = sin δ sin φ + cos δ cos φ cos H
/// A     = atan2(−cos δ sin H, sin δ cos φ − cos δ sin φ cos H)
/// ```
fn equatorial_to_horizontal(ha: Degree, dec: Degree, latitude: Degree) -> (Degree, Degree) {
    let (sin_ha, cos_ha) = (ha * RADEG).sin_cos();
    let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();

    let z = sin_dec * sin_lat + cos_dec * cos_lat * cos_ha;
    let north = sin_dec * cos_lat - cos_dec * sin_lat * cos_ha;
    let east = -cos_dec * sin_ha;

    let horizontal = north.hypot(east);
    let alt = z.atan2(horizontal) / RADEG;
    let az = if horizontal < ZENITH_EPSILON {
        0.0
    } else {
        normalize_degrees(east.atan2(north) / RADEG)
    };
    (alt, az)
}

/// Hour angle and declination from horizontal coordinates and latitude.
fn horizontal_to_equatorial(alt: Degree, az: Degree, latitude: Degree) -> (Degree, Degree) {
    let (sin_alt, cos_alt) = (alt * RADEG).sin_cos();
    let (sin_az, cos_az) = (az * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();

    let z = sin_alt * sin_lat + cos_alt * cos_lat * cos_az;
    let x = sin_alt * cos_lat - cos_alt * sin_lat * cos_az;
    let y = -cos_alt * sin_az;

    let dec = z.atan2(x.hypot(y)) / RADEG;
    let ha = y.atan2(x) / RADEG;
    (ha, dec)
}

/// Convert apparent equatorial coordinates to horizontal coordinates.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: apparent right ascension and declination of date, in degrees.
/// * `epoch`: UTC instant of the observation.
/// * `location`: observer.
///
/// Return
/// ----------
/// * `(alt, az)` in degrees; `alt` ∈ [-90, 90], `az` ∈ [0, 360) from North through East.
///   The azimuth is 0 when the object is at the zenith or nadir.
///
/// Refraction is not applied; see [`crate::refraction`].
pub fn ra_dec_to_alt_az(
    ra: Degree,
    dec: Degree,
    epoch: &Epoch,
    location: &Location,
) -> (Degree, Degree) {
    let lst = local_sidereal_angle(epoch, location);
    equatorial_to_horizontal(lst - ra, dec, location.latitude)
}

/// Convert horizontal coordinates back to apparent equatorial coordinates.
///
/// This is the algebraic inverse of [`ra_dec_to_alt_az`]. At the zenith the hour angle
/// is 0, so the right ascension returned is the local apparent sidereal time itself.
pub fn alt_az_to_ra_dec(
    alt: Degree,
    az: Degree,
    epoch: &Epoch,
    location: &Location,
) -> (Degree, Degree) {
    let lst = local_sidereal_angle(epoch, location);
    let (ha, dec) = horizontal_to_equatorial(alt, az, location.latitude);
    (normalize_degrees(lst - ha), dec)
}

/// Batch form of [`ra_dec_to_alt_az`] for many stars seen at one instant and place.
pub fn ra_dec_to_alt_az_batch(
    ra: &[f64],
    dec: &[f64],
    epoch: &Epoch,
    location: &Location,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let lst = local_sidereal_angle(epoch, location);
    let latitude = location.latitude;
    map_pairs(("ra", ra), ("dec", dec), |r, d| {
        equatorial_to_horizontal(lst - r, d, latitude)
    })
}

/// Batch form of [`alt_az_to_ra_dec`].
pub fn alt_az_to_ra_dec_batch(
    alt: &[f64],
    az: &[f64],
    epoch: &Epoch,
    location: &Location,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let lst = local_sidereal_angle(epoch, location);
    let latitude = location.latitude;
    map_pairs(("alt", alt), ("az", az), |h, a| {
        let (ha, dec) = horizontal_to_equatorial(h, a, latitude);
        (normalize_degrees(lst - ha), dec)
    })
}
