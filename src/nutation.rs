use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{normalize_degrees, ArcSec, Degree, RADEG, RADSEC},
    ref_system::{axis_rotation, rotate_equatorial, Axis},
    time::julian_centuries,
};

/// Nutation angles at a given instant.
///
/// Both components are expressed in **arcseconds**.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutation {
    /// Nutation in longitude Δψ
    pub longitude: ArcSec,
    /// Nutation in obliquity Δε
    pub obliquity: ArcSec,
}

/// One periodic term of the IAU 1980 nutation series.
///
/// The argument is `d·D + m·M + mp·M' + f·F + om·Ω`; the longitude term is a sine and the
/// obliquity term a cosine of that argument. Amplitudes are in units of 0.0001″, with a
/// linear rate per Julian century.
struct NutationTerm {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    om: i8,
    psi: f64,
    psi_t: f64,
    eps: f64,
    eps_t: f64,
}

const fn term(
    args: [i8; 5],
    psi: f64,
    psi_t: f64,
    eps: f64,
    eps_t: f64,
) -> NutationTerm {
    NutationTerm {
        d: args[0],
        m: args[1],
        mp: args[2],
        f: args[3],
        om: args[4],
        psi,
        psi_t,
        eps,
        eps_t,
    }
}

/// Leading terms of the IAU 1980 (Wahr) series, sorted by decreasing amplitude.
///
/// The omitted terms are all below 0.005″ each and the truncation stays well under
/// 0.1″ in both angles, which is the precision budget of the crate.
const NUTATION_TERMS: [NutationTerm; 18] = [
    term([0, 0, 0, 0, 1], -171_996.0, -174.2, 92_025.0, 8.9),
    term([-2, 0, 0, 2, 2], -13_187.0, -1.6, 5_736.0, -3.1),
    term([0, 0, 0, 2, 2], -2_274.0, -0.2, 977.0, -0.5),
    term([0, 0, 0, 0, 2], 2_062.0, 0.2, -895.0, 0.5),
    term([0, 1, 0, 0, 0], 1_426.0, -3.4, 54.0, -0.1),
    term([0, 0, 1, 0, 0], 712.0, 0.1, -7.0, 0.0),
    term([-2, 1, 0, 2, 2], -517.0, 1.2, 224.0, -0.6),
    term([0, 0, 0, 2, 1], -386.0, -0.4, 200.0, 0.0),
    term([0, 0, 1, 2, 2], -301.0, 0.0, 129.0, -0.1),
    term([-2, -1, 0, 2, 2], 217.0, -0.5, -95.0, 0.3),
    term([-2, 0, 1, 0, 0], -158.0, 0.0, 0.0, 0.0),
    term([-2, 0, 0, 2, 1], 129.0, 0.1, -70.0, 0.0),
    term([0, 0, -1, 2, 2], 123.0, 0.0, -53.0, 0.0),
    term([2, 0, 0, 0, 0], 63.0, 0.0, 0.0, 0.0),
    term([0, 0, 1, 0, 1], 63.0, 0.1, -33.0, 0.0),
    term([2, 0, -1, 2, 2], -59.0, 0.0, 26.0, 0.0),
    term([0, 0, -1, 0, 1], -58.0, -0.1, 32.0, 0.0),
    term([0, 0, 1, 2, 1], -51.0, 0.0, 27.0, 0.0),
];

/// Fundamental lunar and solar arguments (D, M, M', F, Ω) in radians.
fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;

    // mean elongation of the Moon from the Sun
    let d = 297.85036 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0;
    // mean anomaly of the Sun
    let m = 357.52772 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0;
    // mean anomaly of the Moon
    let mp = 134.96298 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0;
    // Moon's argument of latitude
    let f = 93.27191 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0;
    // longitude of the Moon's ascending node
    let om = 125.04452 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0;

    [d, m, mp, f, om].map(|deg| normalize_degrees(deg) * RADEG)
}

/// Compute the nutation angles (Δψ, Δε) using the dominant terms of the IAU 1980 model.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date.
///
/// Returns
/// --------
/// * A [`Nutation`] with the nutation in longitude and in obliquity, in arcseconds.
///   Their magnitudes stay below about 20″ and 10″ respectively.
pub fn nutation(jd: f64) -> Nutation {
    let t = julian_centuries(jd);
    let [d, m, mp, f, om] = fundamental_arguments(t);

    let (dpsi, deps) = NUTATION_TERMS
        .iter()
        .fold((0.0, 0.0), |(dpsi, deps), term| {
            let arg = f64::from(term.d) * d
                + f64::from(term.m) * m
                + f64::from(term.mp) * mp
                + f64::from(term.f) * f
                + f64::from(term.om) * om;
            (
                dpsi + (term.psi + term.psi_t * t) * arg.sin(),
                deps + (term.eps + term.eps_t * t) * arg.cos(),
            )
        });

    // series amplitudes are in 0.0001 arcseconds
    Nutation {
        longitude: dpsi * 1e-4,
        obliquity: deps * 1e-4,
    }
}

/// Nutation in longitude Δψ, in arcseconds.
pub fn nutation_in_longitude(jd: f64) -> ArcSec {
    nutation(jd).longitude
}

/// Nutation in obliquity Δε, in arcseconds.
pub fn nutation_in_obliquity(jd: f64) -> ArcSec {
    nutation(jd).obliquity
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1980 model).
///
/// The obliquity ε₀ is a cubic polynomial in Julian centuries since J2000, evaluated with
/// Horner's method:
///
/// ```text
/// ε₀ = 23°26′21.448″ − 46.8150″·T − 0.00059″·T² + 0.001813″·T³
/// ```
///
/// Arguments
/// ---------
/// * `jd`: Julian Date.
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in degrees (23.4392911° at J2000.0).
pub fn mean_obliquity(jd: f64) -> Degree {
    let ob0 = (23.0 * 3600.0 + 26.0 * 60.0) + 21.448;
    let ob1 = -46.8150;
    let ob2 = -0.00059;
    let ob3 = 0.001813;

    let t = julian_centuries(jd);

    (((ob3 * t + ob2) * t + ob1) * t + ob0) / 3600.0
}

/// True obliquity of the ecliptic ε = ε₀ + Δε, in degrees.
pub fn true_obliquity(jd: f64) -> Degree {
    mean_obliquity(jd) + nutation_in_obliquity(jd) / 3600.0
}

/// Equation of the equinoxes Δψ·cos ε, in arcseconds.
///
/// Difference between apparent and mean sidereal time, expressed as an angle.
/// Divide by 15 to obtain seconds of time.
pub fn equation_of_equinoxes(jd: f64) -> ArcSec {
    let nut = nutation(jd);
    let eps = mean_obliquity(jd) + nut.obliquity / 3600.0;
    nut.longitude * (eps * RADEG).cos()
}

/// Construct the nutation rotation matrix.
///
/// The matrix rotates a vector from the mean equator and equinox of date to the true
/// equator and equinox of date:
///
/// 1. around X by the mean obliquity ε₀ (equator → ecliptic),
/// 2. around Z by the nutation in longitude Δψ,
/// 3. around X back by the true obliquity ε₀ + Δε.
///
/// # See also
/// * [`axis_rotation`] – elementary rotations
/// * [`crate::ref_system::frame_rotation`] – chains this with precession
pub fn nutation_matrix(jd: f64) -> Matrix3<f64> {
    let nut = nutation(jd);
    let epsm = mean_obliquity(jd) * RADEG;
    let epst = epsm + nut.obliquity * RADSEC;
    let dpsi = nut.longitude * RADSEC;

    axis_rotation(Axis::X, epst)
        * axis_rotation(Axis::Z, dpsi)
        * axis_rotation(Axis::X, -epsm)
}

/// Move a mean-of-date position to the true equator and equinox of date.
pub fn apply_nutation(ra: Degree, dec: Degree, jd: f64) -> (Degree, Degree) {
    rotate_equatorial(&nutation_matrix(jd), ra, dec)
}

/// Inverse of [`apply_nutation`].
pub fn remove_nutation(ra: Degree, dec: Degree, jd: f64) -> (Degree, Degree) {
    rotate_equatorial(&nutation_matrix(jd).transpose(), ra, dec)
}
