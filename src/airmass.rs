//! # Airmass and extinction
//!
//! Four empirical airmass formulas of increasing fidelity near the horizon. All take the
//! **true** altitude in degrees and share the same contract:
//!
//! * [`SkyMathError::OutOfRange`] for an altitude outside [-90, 90],
//! * exactly `1.0` at the zenith (formulas that do not hit 1 on their own are divided by
//!   their zenith value, and the small overshoot a formula may have in the last few
//!   arcminutes below the zenith is clipped to 1),
//! * non-decreasing as the altitude decreases toward the horizon,
//! * [`f64::INFINITY`] outside the formula's domain (at or below the horizon for the
//!   plane-parallel secant, below the horizon for the others).
//!
//! Extinction in magnitudes is linear in airmass: `Δm = k · X`.

use crate::{
    batch::{map_indexed, map_values},
    constants::{Degree, RADEG},
    skymath_errors::{Result, SkyMathError},
};

fn check_altitude(altitude: Degree) -> Result<()> {
    SkyMathError::check_range("altitude", altitude, -90.0, 90.0)
}

/// Divide by the zenith value and clip to 1.
fn normalized(altitude: Degree, formula: impl Fn(Degree) -> f64) -> f64 {
    (formula(altitude) / formula(90.0)).max(1.0)
}

/// Plane-parallel atmosphere: `X = sec z`.
///
/// Good to 1 % down to about 30° altitude; diverges at the horizon.
pub fn airmass_plane_parallel(altitude: Degree) -> Result<f64> {
    check_altitude(altitude)?;
    if altitude <= 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(1.0 / (altitude * RADEG).sin())
}

/// Young (1994), rational function of the true zenith angle.
///
/// ```text
///      1.002432 cos²z + 0.148386 cos z + 0.0096467
/// X = ----------------------------------------------------------
///      cos³z + 0.149864 cos²z + 0.0102963 cos z + 0.000303978
/// ```
///
/// Stays finite at the horizon (≈ 31.7).
pub fn airmass_young(altitude: Degree) -> Result<f64> {
    check_altitude(altitude)?;
    if altitude < 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(normalized(altitude, |h| {
        let c = (h * RADEG).sin();
        let c2 = c * c;
        (1.002_432 * c2 + 0.148_386 * c + 0.009_646_7)
            / (c2 * c + 0.149_864 * c2 + 0.010_296_3 * c + 0.000_303_978)
    }))
}

/// Shifted Pickering argument `h + 244 / (165 + 47 h^1.1)`, increasing in `h`.
fn pickering_argument(h: Degree) -> Degree {
    h + 244.0 / (165.0 + 47.0 * h.powf(1.1))
}

/// Pickering (2002): `X = 1 / sin(h + 244 / (165 + 47 h^1.1))`.
///
/// The shifted argument overshoots 90° by about 2′ at the zenith, where the raw formula
/// turns back down. The argument is rescaled to end exactly at 90°, which keeps the
/// airmass strictly increasing from the zenith to the horizon; the change is below
/// 0.05 % everywhere.
pub fn airmass_pickering(altitude: Degree) -> Result<f64> {
    check_altitude(altitude)?;
    if altitude < 0.0 {
        return Ok(f64::INFINITY);
    }
    let shifted = pickering_argument(altitude) * 90.0 / pickering_argument(90.0);
    Ok(1.0 / (shifted * RADEG).sin())
}

/// Kasten & Young (1989): `X = 1 / (sin h + 0.50572 (h + 6.07995°)^−1.6364)`.
pub fn airmass_kasten_young(altitude: Degree) -> Result<f64> {
    check_altitude(altitude)?;
    if altitude < 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(normalized(altitude, |h| {
        1.0 / ((h * RADEG).sin() + 0.505_72 * (h + 6.079_95).powf(-1.636_4))
    }))
}

/// Batch form of [`airmass_pickering`]; fails on the first altitude out of range.
pub fn airmass_pickering_batch(altitudes: &[f64]) -> Result<Vec<f64>> {
    map_indexed(altitudes.len(), |i| airmass_pickering(altitudes[i]))
        .into_iter()
        .collect()
}

/// Extinction in magnitudes for an airmass and an extinction coefficient (mag/airmass).
pub fn extinction_magnitudes(airmass: f64, coefficient: f64) -> f64 {
    coefficient * airmass
}

/// Batch form of [`extinction_magnitudes`] with one coefficient for every airmass.
pub fn extinction_magnitudes_batch(airmass: &[f64], coefficient: f64) -> Vec<f64> {
    map_values(airmass, |x| extinction_magnitudes(x, coefficient))
}

/// Extinction coefficient from the same star observed at two airmasses.
///
/// `k = (m₂ − m₁) / (X₂ − X₁)`. The result is `NaN` when both airmasses are equal, since
/// the coefficient is then undetermined.
pub fn extinction_coefficient_estimate(
    magnitude_1: f64,
    airmass_1: f64,
    magnitude_2: f64,
    airmass_2: f64,
) -> f64 {
    if airmass_1 == airmass_2 {
        return f64::NAN;
    }
    (magnitude_2 - magnitude_1) / (airmass_2 - airmass_1)
}

/// Typical extinction coefficient of a good site at the given wavelength, mag/airmass.
///
/// Sum of a Rayleigh term (λ⁻⁴), an aerosol term (λ⁻¹·³) and the Chappuis ozone band
/// between 500 and 700 nm, all scaled at 550 nm.
///
/// Return
/// ----------
/// * The coefficient, or [`SkyMathError::OutOfRange`] for a wavelength that is not
///   strictly positive.
pub fn extinction_coefficient_from_wavelength(wavelength_nm: f64) -> Result<f64> {
    SkyMathError::check_range("wavelength_nm", wavelength_nm, f64::MIN_POSITIVE, f64::MAX)?;
    let ratio = 550.0 / wavelength_nm;
    let rayleigh = 0.145 * ratio.powi(4);
    let aerosol = 0.10 * ratio.powf(1.3);
    let ozone = if wavelength_nm > 500.0 && wavelength_nm < 700.0 {
        0.016
    } else {
        0.0
    };
    Ok(rayleigh + aerosol + ozone)
}
