//! Simplified lunar ephemeris and phase (Meeus, *Astronomical Algorithms*, ch. 47–49).
//!
//! Positions come from the leading periodic terms of the ELP-2000/82 series as tabulated
//! by Meeus (tables 47.A and 47.B). Keeping the terms above 0.0008° leaves an error of
//! about 0.003° in longitude and latitude and about 10 km in distance.

use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{normalize_degrees, Degree, Kilometer, AU, RADEG},
    nutation::{mean_obliquity, nutation},
    ref_system::{axis_rotation, radec_to_unit_vector, unit_vector_to_radec, Axis},
    sun::solar_elements,
    time::{julian_centuries, julian_date_tt},
};

/// One periodic term: multiples of D, M, M', F and the sine (or cosine) coefficient(s).
/// Longitude and latitude coefficients are in 1e-6 degree, distance in metres.
type LonDistTerm = (i8, i8, i8, i8, f64, f64);
type LatTerm = (i8, i8, i8, i8, f64);

#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [LonDistTerm; 40] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
];

#[rustfmt::skip]
const LATITUDE_TERMS: [LatTerm; 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

/// Geocentric position of the Moon referred to the mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LunarCoordinates {
    longitude: Degree,
    latitude: Degree,
    distance: Kilometer,
}

fn lunar_coordinates(jd: f64) -> LunarCoordinates {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // mean longitude, elongation, solar and lunar anomalies, argument of latitude
    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    // decreasing eccentricity of the Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let [lp, d, m, mp, f, a1, a2, a3] =
        [lp, d, m, mp, f, a1, a2, a3].map(|deg| normalize_degrees(deg) * RADEG);

    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        (arg, e.powi(i32::from(cm.abs())))
    };

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(cd, cm, cmp, cf, coef_l, coef_r) in LONGITUDE_DISTANCE_TERMS.iter() {
        let (arg, ecc) = argument(cd, cm, cmp, cf);
        sum_l += coef_l * ecc * arg.sin();
        sum_r += coef_r * ecc * arg.cos();
    }

    let mut sum_b: f64 = LATITUDE_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coef_b)| {
            let (arg, ecc) = argument(cd, cm, cmp, cf);
            coef_b * ecc * arg.sin()
        })
        .sum();

    // Venus, Jupiter and flattening of the Earth
    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    LunarCoordinates {
        longitude: normalize_degrees(lp / RADEG + sum_l * 1e-6),
        latitude: sum_b * 1e-6,
        distance: 385_000.56 + sum_r / 1000.0,
    }
}

/// Apparent geocentric ecliptic coordinates of the Moon.
///
/// Arguments
/// ---------
/// * `epoch`: UTC instant; converted to TT internally.
///
/// Returns
/// --------
/// * `(λ, β)` in degrees: longitude in [0, 360) including nutation, latitude within ±5.3°.
pub fn moon_position(epoch: &Epoch) -> (Degree, Degree) {
    let jd = julian_date_tt(epoch);
    let moon = lunar_coordinates(jd);
    let dpsi = nutation(jd).longitude / 3600.0;
    (normalize_degrees(moon.longitude + dpsi), moon.latitude)
}

/// Apparent geocentric right ascension and declination of the Moon, in degrees.
///
/// The apparent ecliptic position is rotated to the equator with the true obliquity.
pub fn moon_equatorial(epoch: &Epoch) -> (Degree, Degree) {
    let jd = julian_date_tt(epoch);
    let (lambda, beta) = moon_position(epoch);
    let eps = mean_obliquity(jd) + nutation(jd).obliquity / 3600.0;

    let ecliptic: Vector3<f64> = radec_to_unit_vector(lambda, beta);
    unit_vector_to_radec(&(axis_rotation(Axis::X, eps * RADEG) * ecliptic))
}

/// Distance between the centres of the Earth and the Moon, in kilometres.
pub fn moon_distance(epoch: &Epoch) -> Kilometer {
    lunar_coordinates(julian_date_tt(epoch)).distance
}

/// Elongation of the Moon from the Sun in ecliptic longitude, in [0, 360).
///
/// 0° is New Moon, 90° First Quarter, 180° Full Moon and 270° Last Quarter.
pub fn moon_phase_angle(epoch: &Epoch) -> Degree {
    let jd = julian_date_tt(epoch);
    let (lambda, _) = moon_position(epoch);
    normalize_degrees(lambda - solar_elements(jd).apparent_longitude)
}

/// Illuminated fraction of the lunar disk, in [0, 1].
///
/// Uses the geocentric elongation ψ and the phase angle `i` of the Moon as seen from the
/// Sun (Meeus 48.2–48.3), so the Sun and Moon distances are taken into account:
///
/// ```text
/// cos ψ = cos β · cos(λ − λ☉)
/// tan i = R sin ψ / (Δ − R cos ψ)
/// k     = (1 + cos i) / 2
/// ```
pub fn moon_illumination(epoch: &Epoch) -> f64 {
    let jd = julian_date_tt(epoch);
    let (lambda, beta) = moon_position(epoch);
    let delta = lunar_coordinates(jd).distance;
    let sun = solar_elements(jd);
    let sun_distance = sun.distance * AU;

    let cos_psi = (beta * RADEG).cos() * ((lambda - sun.apparent_longitude) * RADEG).cos();
    let psi = cos_psi.clamp(-1.0, 1.0).acos();
    let i = (sun_distance * psi.sin()).atan2(delta - sun_distance * psi.cos());

    ((1.0 + i.cos()) / 2.0).clamp(0.0, 1.0)
}

/// Named lunar phase, in order of increasing elongation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Phase bucket for an elongation in degrees.
    ///
    /// Each named phase covers 45° centred on its nominal elongation, so New Moon spans
    /// [337.5, 360) ∪ [0, 22.5).
    pub fn from_phase_angle(angle: Degree) -> Self {
        match normalize_degrees(angle) {
            a if a < 22.5 => MoonPhase::NewMoon,
            a if a < 67.5 => MoonPhase::WaxingCrescent,
            a if a < 112.5 => MoonPhase::FirstQuarter,
            a if a < 157.5 => MoonPhase::WaxingGibbous,
            a if a < 202.5 => MoonPhase::FullMoon,
            a if a < 247.5 => MoonPhase::WaningGibbous,
            a if a < 292.5 => MoonPhase::LastQuarter,
            a if a < 337.5 => MoonPhase::WaningCrescent,
            _ => MoonPhase::NewMoon,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named phase of the Moon at the epoch.
pub fn moon_phase_name(epoch: &Epoch) -> MoonPhase {
    MoonPhase::from_phase_angle(moon_phase_angle(epoch))
}

#[cfg(test)]
mod moon_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    // Meeus example 47.a: 1992 April 12, 0h TD
    fn example_epoch() -> Epoch {
        Epoch::from_gregorian(1992, 4, 12, 0, 0, 0, 0, TimeScale::TT)
    }

    #[test]
    fn test_lunar_coordinates_meeus() {
        let moon = lunar_coordinates(2_448_724.5);
        assert_abs_diff_eq!(moon.longitude, 133.162_655, epsilon = 5e-3);
        assert_abs_diff_eq!(moon.latitude, -3.229_126, epsilon = 5e-3);
        assert_abs_diff_eq!(moon.distance, 368_409.7, epsilon = 20.0);
    }

    #[test]
    fn test_moon_apparent_position_meeus() {
        let epoch = example_epoch();
        let (lambda, beta) = moon_position(&epoch);
        assert_abs_diff_eq!(lambda, 133.167_265, epsilon = 5e-3);
        assert_abs_diff_eq!(beta, -3.229_126, epsilon = 5e-3);

        let (ra, dec) = moon_equatorial(&epoch);
        assert_abs_diff_eq!(ra, 134.688_470, epsilon = 5e-3);
        assert_abs_diff_eq!(dec, 13.768_368, epsilon = 5e-3);

        assert_abs_diff_eq!(moon_distance(&epoch), 368_409.7, epsilon = 20.0);
    }

    #[test]
    fn test_moon_illumination_meeus() {
        // Meeus example 48.a gives k = 0.6786 for the same instant
        let k = moon_illumination(&example_epoch());
        assert_abs_diff_eq!(k, 0.6786, epsilon = 2e-3);
        assert_eq!(moon_phase_name(&example_epoch()), MoonPhase::WaxingGibbous);
    }

    #[test]
    fn test_moon_phases_2024() {
        // new moon 2024-04-08 18:21 UTC (total solar eclipse), full moon 2024-04-23 23:49 UTC
        let new_moon = Epoch::from_gregorian_utc_hms(2024, 4, 8, 18, 21, 0);
        let elongation = moon_phase_angle(&new_moon);
        assert!(elongation < 0.5 || elongation > 359.5, "{elongation}");
        assert!(moon_illumination(&new_moon) < 0.01);
        assert_eq!(moon_phase_name(&new_moon), MoonPhase::NewMoon);

        let full_moon = Epoch::from_gregorian_utc_hms(2024, 4, 23, 23, 49, 0);
        assert_abs_diff_eq!(moon_phase_angle(&full_moon), 180.0, epsilon = 0.5);
        assert!(moon_illumination(&full_moon) > 0.99);
        assert_eq!(moon_phase_name(&full_moon).to_string(), "Full Moon");
    }

    #[test]
    fn test_moon_distance_bounds() {
        for day in 0..60 {
            let epoch = Epoch::from_gregorian_utc_hms(2025, 1, 1, 0, 0, 0)
                + f64::from(day) * hifitime::Unit::Day;
            let dist = moon_distance(&epoch);
            assert!((356_000.0..407_000.0).contains(&dist), "{dist}");
            let (_, beta) = moon_position(&epoch);
            assert!(beta.abs() < 5.4);
        }
    }

    #[test]
    fn test_phase_buckets() {
        assert_eq!(MoonPhase::from_phase_angle(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_phase_angle(45.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_phase_angle(90.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_phase_angle(135.0), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_phase_angle(180.0), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::from_phase_angle(225.0), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_phase_angle(270.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_phase_angle(315.0), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_phase_angle(350.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_phase_angle(-10.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::LastQuarter.to_string(), "Last Quarter");
    }
}
