use hifitime::Epoch;
use nalgebra::Matrix3;

use crate::{
    batch::map_pairs,
    constants::{Degree, RADEG},
    ref_system::{axis_rotation, rotate_equatorial, Axis},
    skymath_errors::Result,
    time::{julian_centuries, julian_date},
};

/// Compute the IAU 1976 precession angles (ζ, z, θ) from J2000.0 to a given date.
///
/// The angles are cubic polynomials in Julian centuries `T` since J2000.0:
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// θ(T) = (0.5567530 − 0.0001185·T − 0.0000116·T²) · T  [deg]
/// ```
///
/// Arguments
/// ---------
/// * `jd`: Julian Date of the target equinox.
///
/// Returns
/// --------
/// * `(ζ, z, θ)` in degrees.
pub fn precession_angles(jd: f64) -> (Degree, Degree, Degree) {
    let zed = 0.6406161;
    let zd = 0.6406161;
    let thd = 0.5567530;

    let zedd = 0.0000839;
    let zdd = 0.0003041;
    let thdd = -0.0001185;

    let zeddd = 0.0000050;
    let zddd = 0.0000051;
    let thddd = -0.0000116;

    let t = julian_centuries(jd);

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    (zeta, z, theta)
}

/// Construct the precession rotation matrix from the mean equator and equinox of J2000.0
/// to the mean equator and equinox of `jd`.
///
/// The matrix is the product of three elementary rotations:
///
/// ```text
/// P = Rz(z) · Ry(−θ) · Rz(ζ)
/// ```
///
/// where `R` denotes an active rotation ([`axis_rotation`]). Its transpose precesses back to J2000.
pub fn precession_matrix(jd: f64) -> Matrix3<f64> {
    let (zeta, z, theta) = precession_angles(jd);

    let r1 = axis_rotation(Axis::Z, zeta * RADEG);
    let r2 = axis_rotation(Axis::Y, -theta * RADEG);
    let r3 = axis_rotation(Axis::Z, z * RADEG);

    r3 * r2 * r1
}

/// Precess a J2000.0 mean position to the mean equinox of the epoch.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: J2000 mean position in degrees.
/// * `epoch`: target instant (UTC).
///
/// Returns
/// --------
/// * The mean-of-date `(ra, dec)` in degrees, `ra` in [0, 360).
pub fn precess_j2000_to_date(ra: Degree, dec: Degree, epoch: &Epoch) -> (Degree, Degree) {
    rotate_equatorial(&precession_matrix(julian_date(epoch)), ra, dec)
}

/// Inverse of [`precess_j2000_to_date`].
pub fn precess_to_j2000(ra: Degree, dec: Degree, epoch: &Epoch) -> (Degree, Degree) {
    rotate_equatorial(&precession_matrix(julian_date(epoch)).transpose(), ra, dec)
}

/// Batch form of [`precess_j2000_to_date`]; the matrix is built once for the epoch.
pub fn precess_j2000_to_date_batch(
    ra: &[f64],
    dec: &[f64],
    epoch: &Epoch,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let rot = precession_matrix(julian_date(epoch));
    map_pairs(("ra", ra), ("dec", dec), |r, d| rotate_equatorial(&rot, r, d))
}

/// Batch form of [`precess_to_j2000`].
pub fn precess_to_j2000_batch(
    ra: &[f64],
    dec: &[f64],
    epoch: &Epoch,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let rot = precession_matrix(julian_date(epoch)).transpose();
    map_pairs(("ra", ra), ("dec", dec), |r, d| rotate_equatorial(&rot, r, d))
}
