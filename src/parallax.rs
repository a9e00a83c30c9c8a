//! Diurnal and annual parallax.
//!
//! * **Diurnal** parallax is the shift between the geocentric and the topocentric
//!   direction of a nearby body; up to about 1° for the Moon, negligible for stars.
//!   Computed with the rigorous formulas of Meeus, ch. 40.
//! * **Annual** parallax is the shift between the barycentric (catalog) and the
//!   geocentric direction of a star, at most the star's parallax.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{normalize_degrees, Degree, RADEG, RADSEC, SOLAR_PARALLAX},
    location::Location,
    nutation::mean_obliquity,
    ref_system::{radec_to_unit_vector, unit_vector_to_radec},
    sidereal::apparent_sidereal_time,
    sun::solar_elements,
    time::{julian_date, julian_date_tt},
};

/// Distance of the observer from the centre of the Earth, in equatorial radii.
pub fn geocentric_distance(location: &Location) -> f64 {
    let (rho_cos_phi, rho_sin_phi) = location.geocentric_parallax_factors();
    rho_cos_phi.hypot(rho_sin_phi)
}

/// Topocentric position of a body at a finite distance.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: geocentric apparent position, in degrees.
/// * `distance_au`: geocentric distance of the body in AU (≈ 0.00257 for the Moon).
/// * `epoch`: UTC instant.
/// * `location`: observer.
///
/// Return
/// ----------
/// * The topocentric `(ra, dec)` in degrees. A non-positive distance leaves the position
///   unchanged.
///
/// ```text
/// sin π = sin 8.794″ / Δ
/// Δα = atan2(−ρcosφ′ sin π sin H, cos δ − ρcosφ′ sin π cos H)
/// δ′ = atan2((sin δ − ρsinφ′ sin π) cos Δα, cos δ − ρcosφ′ sin π cos H)
/// ```
pub fn diurnal_parallax(
    ra: Degree,
    dec: Degree,
    distance_au: f64,
    epoch: &Epoch,
    location: &Location,
) -> (Degree, Degree) {
    if distance_au <= 0.0 {
        return (ra, dec);
    }
    let (rho_cos_phi, rho_sin_phi) = location.geocentric_parallax_factors();
    let sin_pi = (SOLAR_PARALLAX * RADSEC).sin() / distance_au;

    let lst = apparent_sidereal_time(julian_date(epoch), location.longitude) * 15.0;
    let (sin_h, cos_h) = ((lst - ra) * RADEG).sin_cos();
    let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();

    let denominator = cos_dec - rho_cos_phi * sin_pi * cos_h;
    let delta_ra = (-rho_cos_phi * sin_pi * sin_h).atan2(denominator);
    let dec_topo = ((sin_dec - rho_sin_phi * sin_pi) * delta_ra.cos()).atan2(denominator);

    (normalize_degrees(ra + delta_ra / RADEG), dec_topo / RADEG)
}

/// Geocentric direction of a star from its barycentric catalog direction.
///
/// The star at distance `1/ϖ` AU is seen from the Earth, offset from the Sun by the solar
/// geocentric vector `S`:
///
/// ```text
/// p′ ∝ p + ϖ · S
/// ```
///
/// A non-positive parallax leaves the position unchanged.
pub fn annual_parallax(ra: Degree, dec: Degree, parallax_mas: f64, epoch: &Epoch) -> (Degree, Degree) {
    if parallax_mas <= 0.0 {
        return (ra, dec);
    }
    let parallax = parallax_mas / 1000.0 * RADSEC;
    let star = radec_to_unit_vector(ra, dec);
    unit_vector_to_radec(&(star + geocentric_sun(epoch) * parallax))
}

/// Geometric geocentric position of the Sun in AU, mean equator of date.
fn geocentric_sun(epoch: &Epoch) -> Vector3<f64> {
    let jd = julian_date_tt(epoch);
    let sun = solar_elements(jd);
    let (sin_lam, cos_lam) = (sun.true_longitude * RADEG).sin_cos();
    let (sin_eps, cos_eps) = (mean_obliquity(jd) * RADEG).sin_cos();
    Vector3::new(cos_lam, cos_eps * sin_lam, sin_eps * sin_lam) * sun.distance
}
