use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    batch::map_pairs,
    constants::{ArcSec, Degree, RADEG, RADSEC},
    nutation::mean_obliquity,
    ref_system::{radec_to_unit_vector, unit_vector_to_radec},
    skymath_errors::Result,
    sun::solar_elements,
    time::{julian_centuries, julian_date},
};

/// Constant of annual aberration κ, in arcseconds
pub const ABERRATION_CONSTANT: ArcSec = 20.495_52;

/// Velocity of the Earth in units of the speed of light, in equatorial coordinates of date.
///
/// The Earth's orbital velocity is taken from the solar model: its direction is 90° behind
/// the geometric longitude of the Sun, and the eccentricity terms (e, ϖ) account for the
/// elliptic orbit. The magnitude is close to κ ≈ 9.94e-5.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date.
///
/// Returns
/// --------
/// * The vector `v/c` expressed on the mean equator and equinox of date.
pub fn earth_velocity(jd: f64) -> Vector3<f64> {
    let t = julian_centuries(jd);
    let sun = solar_elements(jd);

    // longitude of the perihelion of the Earth's orbit
    let perihelion = (102.937_35 + 1.719_46 * t + 0.000_46 * t * t) * RADEG;
    let longitude = sun.true_longitude * RADEG;
    let e = sun.eccentricity;
    let eps = mean_obliquity(jd) * RADEG;

    let kappa = ABERRATION_CONSTANT * RADSEC;
    let vx = kappa * (longitude.sin() - e * perihelion.sin());
    let vy = -kappa * (longitude.cos() - e * perihelion.cos());

    Vector3::new(vx, vy * eps.cos(), vy * eps.sin())
}

/// Apply annual aberration to a position.
///
/// The apparent direction is the normalised sum of the geometric direction and the
/// observer velocity `v/c` (first order in v/c, which is below 1 mas of error).
///
/// Arguments
/// ---------
/// * `ra`, `dec`: geometric position in degrees (equinox of date).
/// * `epoch`: UTC instant.
///
/// Returns
/// --------
/// * The aberrated `(ra, dec)` in degrees.
pub fn apply_aberration(ra: Degree, dec: Degree, epoch: &Epoch) -> (Degree, Degree) {
    aberrate(&earth_velocity(julian_date(epoch)), ra, dec)
}

/// Remove annual aberration, the exact inverse of [`apply_aberration`].
///
/// Given the apparent unit vector `p'` and velocity `u`, the geometric direction `p`
/// satisfies `s·p' = p + u` with `|p| = 1`, hence
///
/// ```text
/// s = (p'·u) + √((p'·u)² + 1 − |u|²)
/// p = s·p' − u
/// ```
pub fn remove_aberration(ra: Degree, dec: Degree, epoch: &Epoch) -> (Degree, Degree) {
    unaberrate(&earth_velocity(julian_date(epoch)), ra, dec)
}

/// Angular displacement produced by annual aberration at the epoch, in arcseconds.
///
/// Always between 0 and about 20.8″; zero only toward the apex of the Earth's motion.
pub fn aberration_magnitude(ra: Degree, dec: Degree, epoch: &Epoch) -> ArcSec {
    let p = radec_to_unit_vector(ra, dec);
    let (ra_ab, dec_ab) = apply_aberration(ra, dec, epoch);
    let q = radec_to_unit_vector(ra_ab, dec_ab);
    p.cross(&q).norm().atan2(p.dot(&q)) / RADSEC
}

/// Batch form of [`apply_aberration`]; the Earth velocity is evaluated once.
pub fn apply_aberration_batch(
    ra: &[f64],
    dec: &[f64],
    epoch: &Epoch,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let velocity = earth_velocity(julian_date(epoch));
    map_pairs(("ra", ra), ("dec", dec), |r, d| aberrate(&velocity, r, d))
}

/// Batch form of [`remove_aberration`].
pub fn remove_aberration_batch(
    ra: &[f64],
    dec: &[f64],
    epoch: &Epoch,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let velocity = earth_velocity(julian_date(epoch));
    map_pairs(("ra", ra), ("dec", dec), |r, d| unaberrate(&velocity, r, d))
}

fn aberrate(velocity: &Vector3<f64>, ra: Degree, dec: Degree) -> (Degree, Degree) {
    unit_vector_to_radec(&(radec_to_unit_vector(ra, dec) + velocity))
}

fn unaberrate(velocity: &Vector3<f64>, ra: Degree, dec: Degree) -> (Degree, Degree) {
    let apparent = radec_to_unit_vector(ra, dec);
    let pu = apparent.dot(velocity);
    let scale = pu + (pu * pu + 1.0 - velocity.norm_squared()).sqrt();
    unit_vector_to_radec(&(apparent * scale - velocity))
}

#[cfg(test)]
mod aberration_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Meeus example 23.a: 2028 November 13.19 TD
    fn example_epoch() -> Epoch {
        Epoch::from_gregorian_utc(2028, 11, 13, 4, 33, 36, 0)
    }

    #[test]
    fn test_aberration_meeus_example() {
        let (ra, dec) = (41.5472, 49.3485);
        let (ra_ab, dec_ab) = apply_aberration(ra, dec, &example_epoch());
        assert_abs_diff_eq!((ra_ab - ra) * 3600.0, 30.045, epsilon = 0.05);
        assert_abs_diff_eq!((dec_ab - dec) * 3600.0, 6.697, epsilon = 0.05);
    }

    #[test]
    fn test_earth_velocity_magnitude() {
        for day in 0..36 {
            let jd = 2_460_000.5 + f64::from(day) * 10.0;
            let speed = earth_velocity(jd).norm() / RADSEC;
            assert!((20.1..20.9).contains(&speed), "{speed}");
        }
    }

    #[test]
    fn test_remove_is_exact_inverse() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 8, 1, 0, 0, 0);
        for (ra, dec) in [(0.0, 0.0), (101.3, -16.7), (279.2, 38.8), (37.9, 89.26)] {
            let (ra_ab, dec_ab) = apply_aberration(ra, dec, &epoch);
            let (ra_back, dec_back) = remove_aberration(ra_ab, dec_ab, &epoch);
            assert_abs_diff_eq!(dec_back, dec, epsilon = 1e-10);
            let dra = crate::constants::wrap_signed_degrees(ra_back - ra);
            assert_abs_diff_eq!(dra * (dec * RADEG).cos(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_aberration_magnitude_bounds() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 8, 1, 0, 0, 0);
        for i in 0..24 {
            let ra = f64::from(i) * 15.0;
            for dec in [-60.0, 0.0, 45.0] {
                let mag = aberration_magnitude(ra, dec, &epoch);
                assert!((0.0..21.0).contains(&mag), "{mag}");
            }
        }
        // toward the ecliptic pole the displacement is the full κ
        let (pole_ra, pole_dec) = (270.0, 66.56);
        let mag = aberration_magnitude(pole_ra, pole_dec, &epoch);
        assert_abs_diff_eq!(mag, ABERRATION_CONSTANT, epsilon = 0.5);
    }

    #[test]
    fn test_aberration_batch() {
        let epoch = example_epoch();
        let ra = [10.0, 200.0];
        let dec = [5.0, -45.0];
        let (ra_ab, dec_ab) = apply_aberration_batch(&ra, &dec, &epoch).unwrap();
        let (ra_back, dec_back) = remove_aberration_batch(&ra_ab, &dec_ab, &epoch).unwrap();
        for i in 0..2 {
            assert_eq!((ra_ab[i], dec_ab[i]), apply_aberration(ra[i], dec[i], &epoch));
            assert_eq!((ra_back[i], dec_back[i]), remove_aberration(ra_ab[i], dec_ab[i], &epoch));
        }
    }
}
