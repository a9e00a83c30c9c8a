use hifitime::Epoch;
use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    aberration::{apply_aberration, remove_aberration},
    constants::{normalize_degrees, Degree, JulianDate, JD2000, RADEG},
    nutation::nutation_matrix,
    precession::precession_matrix,
    proper_motion::{apply_proper_motion, remove_proper_motion, ProperMotion},
    time::julian_date,
};

/// Equatorial reference frames handled by the correction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EquatorialFrame {
    /// Mean equator and equinox of J2000.0 (catalog frame)
    MeanJ2000,
    /// Mean equator and equinox of the given Julian Date (precession only)
    MeanOfDate(JulianDate),
    /// True equator and equinox of the given Julian Date (precession and nutation)
    TrueOfDate(JulianDate),
}

impl EquatorialFrame {
    /// Julian Date the frame is attached to.
    pub fn date(&self) -> JulianDate {
        match *self {
            EquatorialFrame::MeanJ2000 => JD2000,
            EquatorialFrame::MeanOfDate(jd) | EquatorialFrame::TrueOfDate(jd) => jd,
        }
    }

    /// Rotation taking a J2000 mean vector into this frame.
    fn from_j2000(&self) -> Matrix3<f64> {
        match *self {
            EquatorialFrame::MeanJ2000 => Matrix3::identity(),
            EquatorialFrame::MeanOfDate(jd) => precession_matrix(jd),
            EquatorialFrame::TrueOfDate(jd) => nutation_matrix(jd) * precession_matrix(jd),
        }
    }
}

/// Compute the rotation matrix between two equatorial reference frames.
///
/// Every frame is connected to the mean J2000 frame by precession (and nutation for the
/// true frames), so the rotation is assembled through that canonical frame:
///
/// ```text
/// R(from → to) = R(J2000 → to) · R(J2000 → from)ᵀ
/// ```
///
/// Arguments
/// ---------
/// * `from`: frame of the input vector.
/// * `to`: frame of the output vector.
///
/// Returns
/// --------
/// * The orthonormal matrix `R` such that `x_to = R · x_from`.
///
/// # See also
/// * [`crate::precession::precession_matrix`] – IAU 1976 precession
/// * [`crate::nutation::nutation_matrix`] – IAU 1980 nutation
pub fn frame_rotation(from: &EquatorialFrame, to: &EquatorialFrame) -> Matrix3<f64> {
    if from == to {
        return Matrix3::identity();
    }
    to.from_j2000() * from.from_j2000().transpose()
}

/// Re-express an equatorial position given in `from` into `to`.
pub fn transform_frame(
    ra: Degree,
    dec: Degree,
    from: &EquatorialFrame,
    to: &EquatorialFrame,
) -> (Degree, Degree) {
    rotate_equatorial(&frame_rotation(from, to), ra, dec)
}

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> nalgebra::Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix is an **active rotation** of a vector by `angle` (radians) in the direct
/// sense around `axis`, so that `x' = R · x`.
/// A change of basis by the same angle is `axis_rotation(axis, -angle)`.
pub fn axis_rotation(axis: Axis, angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&axis.unit(), angle).into()
}

/// Unit direction vector of a spherical position given in degrees.
pub fn radec_to_unit_vector(ra: Degree, dec: Degree) -> Vector3<f64> {
    let (sin_ra, cos_ra) = (ra * RADEG).sin_cos();
    let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Spherical angles (degrees) of a direction vector of any length.
///
/// The longitude is reduced to [0, 360); the latitude is taken with `atan2`, which stays
/// accurate close to the poles. A vector along the Z axis gets a longitude of 0.
pub fn unit_vector_to_radec(v: &Vector3<f64>) -> (Degree, Degree) {
    let rho = v.x.hypot(v.y);
    let ra = if rho == 0.0 {
        0.0
    } else {
        normalize_degrees(v.y.atan2(v.x) / RADEG)
    };
    let dec = v.z.atan2(rho) / RADEG;
    (ra, dec)
}

/// Apply a rotation matrix to a position given by its spherical angles.
pub fn rotate_equatorial(rot: &Matrix3<f64>, ra: Degree, dec: Degree) -> (Degree, Degree) {
    unit_vector_to_radec(&(rot * radec_to_unit_vector(ra, dec)))
}

/// Transform a mean J2000 catalog position into the apparent position of date.
///
/// The corrections are applied in the order
///
/// 1. proper motion from J2000.0 to the epoch (when `proper_motion` is given),
/// 2. precession to the mean equinox of date,
/// 3. nutation to the true equinox of date,
/// 4. annual aberration.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: J2000 mean position in degrees.
/// * `epoch`: UTC instant of the observation.
/// * `proper_motion`: optional catalog proper motion.
///
/// Returns
/// --------
/// * The apparent `(ra, dec)` in degrees.
///
/// # See also
/// * [`apparent_to_mean`] – inverse pipeline
pub fn mean_to_apparent(
    ra: Degree,
    dec: Degree,
    epoch: &Epoch,
    proper_motion: Option<&ProperMotion>,
) -> (Degree, Degree) {
    let jd = julian_date(epoch);

    let (ra, dec) = match proper_motion {
        Some(pm) => apply_proper_motion(ra, dec, pm.pm_ra_cosdec, pm.pm_dec, epoch),
        None => (ra, dec),
    };
    let (ra, dec) = transform_frame(
        ra,
        dec,
        &EquatorialFrame::MeanJ2000,
        &EquatorialFrame::TrueOfDate(jd),
    );
    apply_aberration(ra, dec, epoch)
}

/// Inverse of [`mean_to_apparent`]: recover the mean J2000 catalog position.
///
/// Each step is removed in reverse order with its exact inverse, so the round trip is
/// the identity to floating point accuracy.
pub fn apparent_to_mean(
    ra: Degree,
    dec: Degree,
    epoch: &Epoch,
    proper_motion: Option<&ProperMotion>,
) -> (Degree, Degree) {
    let jd = julian_date(epoch);

    let (ra, dec) = remove_aberration(ra, dec, epoch);
    let (ra, dec) = transform_frame(
        ra,
        dec,
        &EquatorialFrame::TrueOfDate(jd),
        &EquatorialFrame::MeanJ2000,
    );
    match proper_motion {
        Some(pm) => remove_proper_motion(ra, dec, pm.pm_ra_cosdec, pm.pm_dec, epoch),
        None => (ra, dec),
    }
}
