use hifitime::Epoch;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    batch::{ensure_same_length, map_indexed, unzip_pairs},
    constants::{
        normalize_degrees, Degree, MasPerYear, DAYS_PER_YEAR, KM_S_PER_AU_YR, MAS_TO_DEG, RADEG,
    },
    ref_system::{radec_to_unit_vector, unit_vector_to_radec},
    skymath_errors::Result,
    time::j2000_days,
};

/// Proper motion of a catalog object, in milliarcseconds per year.
///
/// The right ascension component is stored in the `μα* = μα·cos δ` convention used by
/// Hipparcos and Gaia; [`ProperMotion::from_pm_ra`] and [`ProperMotion::pm_ra`] convert
/// from and to the raw rate of change of right ascension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProperMotion {
    pub pm_ra_cosdec: MasPerYear,
    pub pm_dec: MasPerYear,
}

impl ProperMotion {
    pub fn new(pm_ra_cosdec: MasPerYear, pm_dec: MasPerYear) -> Self {
        ProperMotion {
            pm_ra_cosdec,
            pm_dec,
        }
    }

    /// Build from a rate of right ascension that is not scaled by cos δ.
    pub fn from_pm_ra(pm_ra: MasPerYear, pm_dec: MasPerYear, dec: Degree) -> Self {
        ProperMotion::new(pm_ra_to_pm_ra_cosdec(pm_ra, dec), pm_dec)
    }

    /// Rate of right ascension (not scaled by cos δ) at declination `dec`.
    pub fn pm_ra(&self, dec: Degree) -> MasPerYear {
        pm_ra_cosdec_to_pm_ra(self.pm_ra_cosdec, dec)
    }

    /// Total proper motion μ, in mas/yr.
    pub fn total(&self) -> MasPerYear {
        total_proper_motion(self.pm_ra_cosdec, self.pm_dec)
    }

    /// Position angle of the motion, in degrees from North through East.
    pub fn position_angle(&self) -> Degree {
        proper_motion_position_angle(self.pm_ra_cosdec, self.pm_dec)
    }
}

/// Below this value of `cos δ` a position is treated as lying on a celestial pole.
const POLE_COS: f64 = 1e-12;

/// Julian years elapsed between J2000.0 and the epoch.
fn years_since_j2000(epoch: &Epoch) -> f64 {
    j2000_days(epoch) / DAYS_PER_YEAR
}

/// Propagate a J2000.0 catalog position linearly to the epoch.
///
/// The declination moves by `μδ·t` and the right ascension by `μα*·t / cos δ`. The
/// linear model is adequate for a few decades away from the celestial poles; use
/// [`apply_proper_motion_rigorous`] near the poles or for fast nearby stars.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: position at J2000.0, in degrees.
/// * `pm_ra_cosdec`: μα·cos δ in mas/yr.
/// * `pm_dec`: μδ in mas/yr.
/// * `epoch`: target UTC instant.
///
/// Returns
/// --------
/// * `(ra, dec)` at the epoch, in degrees, `ra` in [0, 360).
pub fn apply_proper_motion(
    ra: Degree,
    dec: Degree,
    pm_ra_cosdec: MasPerYear,
    pm_dec: MasPerYear,
    epoch: &Epoch,
) -> (Degree, Degree) {
    let t = years_since_j2000(epoch);
    let ra_new = ra + pm_ra_cosdec_to_pm_ra(pm_ra_cosdec, dec) * MAS_TO_DEG * t;
    let dec_new = dec + pm_dec * MAS_TO_DEG * t;
    (normalize_degrees(ra_new), dec_new)
}

/// Inverse of [`apply_proper_motion`]: bring a position at the epoch back to J2000.0.
pub fn remove_proper_motion(
    ra: Degree,
    dec: Degree,
    pm_ra_cosdec: MasPerYear,
    pm_dec: MasPerYear,
    epoch: &Epoch,
) -> (Degree, Degree) {
    let t = years_since_j2000(epoch);
    let dec_old = dec - pm_dec * MAS_TO_DEG * t;
    let ra_old = ra - pm_ra_cosdec_to_pm_ra(pm_ra_cosdec, dec_old) * MAS_TO_DEG * t;
    (normalize_degrees(ra_old), dec_old)
}

/// Propagate a catalog position with its full space motion.
///
/// The star is moved along a straight line in space:
///
/// ```text
/// r(t) = p₀·(1 + μr·t) + (μα*·e_α + μδ·e_δ)·t
/// ```
///
/// where `p₀` is the J2000 direction, `e_α`, `e_δ` the local east and north unit vectors
/// and `μr = v_r·ϖ / 4.74047` the radial motion expressed as an angular rate. The result
/// stays valid across the poles, and the foreshortening of the proper motion of nearby
/// stars is accounted for.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: position at J2000.0, in degrees.
/// * `pm_ra_cosdec`, `pm_dec`: proper motion in mas/yr.
/// * `parallax`: annual parallax in mas. A value ≤ 0 means "unknown"; the radial term is
///   then dropped and the returned parallax is the input one.
/// * `radial_velocity`: km/s, positive when receding.
/// * `epoch`: target UTC instant.
///
/// Returns
/// --------
/// * `(ra, dec, parallax)` at the epoch (degrees, degrees, mas).
pub fn apply_proper_motion_rigorous(
    ra: Degree,
    dec: Degree,
    pm_ra_cosdec: MasPerYear,
    pm_dec: MasPerYear,
    parallax: f64,
    radial_velocity: f64,
    epoch: &Epoch,
) -> (Degree, Degree, f64) {
    let t = years_since_j2000(epoch);
    let mas_to_rad = MAS_TO_DEG * RADEG;

    let (sin_ra, cos_ra) = (ra * RADEG).sin_cos();
    let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
    let p0 = radec_to_unit_vector(ra, dec);
    let east = Vector3::new(-sin_ra, cos_ra, 0.0);
    let north = Vector3::new(-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec);

    let mu_r = if parallax > 0.0 {
        radial_velocity * parallax * mas_to_rad / KM_S_PER_AU_YR
    } else {
        0.0
    };

    let motion = (east * pm_ra_cosdec + north * pm_dec) * mas_to_rad;
    let r = p0 * (1.0 + mu_r * t) + motion * t;

    let (ra_new, dec_new) = unit_vector_to_radec(&r);
    let parallax_new = if parallax > 0.0 {
        parallax / r.norm()
    } else {
        parallax
    };

    (ra_new, dec_new, parallax_new)
}

/// Convert a raw RA rate μα into μα·cos δ.
pub fn pm_ra_to_pm_ra_cosdec(pm_ra: MasPerYear, dec: Degree) -> MasPerYear {
    pm_ra * (dec * RADEG).cos()
}

/// Convert μα·cos δ into the raw RA rate μα.
///
/// At a celestial pole the right ascension has no rate of change and `0` is returned,
/// so [`apply_proper_motion`] leaves the right ascension of a polar position unchanged.
pub fn pm_ra_cosdec_to_pm_ra(pm_ra_cosdec: MasPerYear, dec: Degree) -> MasPerYear {
    let cos_dec = (dec * RADEG).cos();
    if cos_dec.abs() < POLE_COS {
        return 0.0;
    }
    pm_ra_cosdec / cos_dec
}

/// Total proper motion `√(μα*² + μδ²)` in mas/yr.
pub fn total_proper_motion(pm_ra_cosdec: MasPerYear, pm_dec: MasPerYear) -> MasPerYear {
    pm_ra_cosdec.hypot(pm_dec)
}

/// Position angle of the proper motion, in [0, 360), 0° = North and 90° = East.
pub fn proper_motion_position_angle(pm_ra_cosdec: MasPerYear, pm_dec: MasPerYear) -> Degree {
    normalize_degrees(pm_ra_cosdec.atan2(pm_dec) / RADEG)
}

/// Batch form of [`apply_proper_motion`]: one proper motion per position.
pub fn apply_proper_motion_batch(
    ra: &[f64],
    dec: &[f64],
    pm_ra_cosdec: &[f64],
    pm_dec: &[f64],
    epoch: &Epoch,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let len = ensure_same_length(&[
        ("ra", ra),
        ("dec", dec),
        ("pm_ra_cosdec", pm_ra_cosdec),
        ("pm_dec", pm_dec),
    ])?;
    let pairs = map_indexed(len, |i| {
        apply_proper_motion(ra[i], dec[i], pm_ra_cosdec[i], pm_dec[i], epoch)
    });
    Ok(unzip_pairs(pairs))
}
