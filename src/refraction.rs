//! # Atmospheric refraction
//!
//! Empirical refraction formulas, all returning the refraction angle `R` in degrees, with
//! `apparent altitude = true altitude + R`.
//!
//! | formula        | argument          | reference                                |
//! |----------------|-------------------|------------------------------------------|
//! | Bennett        | apparent altitude | Meeus, *Astronomical Algorithms*, (16.3) |
//! | Saemundsson    | true altitude     | Meeus (16.4), with P/T scaling           |
//! | radio          | apparent altitude | refractivity `N` of moist air × cot      |
//!
//! Each formula is valid down to a small negative altitude. Below that limit the value
//! fades linearly to zero over [`FADE_WIDTH`] degrees instead of dropping to zero at once,
//! so that the apparent ↔ true altitude mapping stays continuous and monotone and
//! [`apparent_to_true_altitude`] / [`true_to_apparent_altitude`] remain inverses for every
//! input. At the zenith all formulas give 0.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, RADEG};

/// Width of the band below a formula's validity limit over which refraction fades to 0.
pub const FADE_WIDTH: Degree = 1.5;

const BENNETT_LIMIT: Degree = -0.5;
const SAEMUNDSSON_LIMIT: Degree = -1.0;
const RADIO_LIMIT: Degree = -0.5;

/// Convergence threshold of the altitude inversion, degrees.
const INVERSION_TOLERANCE: Degree = 1e-12;
const MAX_INVERSION_STEPS: usize = 100;

/// Meteorological conditions at the observer.
///
/// The default is the standard atmosphere the empirical formulas are normalised to:
/// 1010 hPa, 10 °C, 50 % relative humidity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericConditions {
    pub pressure_hpa: f64,
    pub temperature_c: f64,
    /// Relative humidity in percent (0–100)
    pub relative_humidity: f64,
}

impl Default for AtmosphericConditions {
    fn default() -> Self {
        AtmosphericConditions {
            pressure_hpa: 1010.0,
            temperature_c: 10.0,
            relative_humidity: 50.0,
        }
    }
}

impl AtmosphericConditions {
    /// Radio refractivity `N = (n − 1)·10⁶` of moist air (Smith–Weintraub).
    ///
    /// The water vapour pressure is derived from the relative humidity with the Magnus
    /// formula for the saturation pressure.
    pub fn refractivity(&self) -> f64 {
        let t = self.temperature_c;
        let kelvin = 273.15 + t;
        let saturation = 6.105 * (17.27 * t / (237.7 + t)).exp();
        let vapour = self.relative_humidity / 100.0 * saturation;

        77.6 * self.pressure_hpa / kelvin + 3.73e5 * vapour / (kelvin * kelvin)
    }
}

/// Choice of refraction formula, with the conditions it is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RefractionModel {
    /// Bennett's formula for the standard atmosphere
    #[default]
    Bennett,
    /// Saemundsson's formula scaled to the given pressure and temperature
    Saemundsson(AtmosphericConditions),
    /// Radio refraction for the given conditions, humidity included
    Radio(AtmosphericConditions),
}

impl RefractionModel {
    /// Refraction in degrees, at an apparent or true altitude depending on the formula.
    fn refraction(&self, altitude: Degree) -> Degree {
        match self {
            RefractionModel::Bennett => refraction_bennett(altitude),
            RefractionModel::Saemundsson(c) => {
                refraction_saemundsson(altitude, c.temperature_c, c.pressure_hpa)
            }
            RefractionModel::Radio(c) => refraction_radio_with(altitude, c),
        }
    }

    /// `true` when the formula takes the true altitude as its argument.
    fn takes_true_altitude(&self) -> bool {
        matches!(self, RefractionModel::Saemundsson(_))
    }
}

/// Evaluate `formula` above `limit`, fade it to zero over [`FADE_WIDTH`] below.
fn faded(altitude: Degree, limit: Degree, formula: impl Fn(Degree) -> Degree) -> Degree {
    let value = if altitude >= limit {
        formula(altitude)
    } else if altitude > limit - FADE_WIDTH {
        formula(limit) * (altitude - (limit - FADE_WIDTH)) / FADE_WIDTH
    } else {
        0.0
    };
    // the cotangent turns slightly negative past the zenith
    value.max(0.0)
}

/// Bennett's refraction for an **apparent** altitude, standard atmosphere.
///
/// ```text
/// R[′] = cot(h₀ + 7.31 / (h₀ + 4.4))
/// ```
///
/// Accurate to about 0.07′ over the whole sky above the horizon.
pub fn refraction_bennett(altitude: Degree) -> Degree {
    faded(altitude, BENNETT_LIMIT, |h| {
        1.0 / ((h + 7.31 / (h + 4.4)) * RADEG).tan() / 60.0
    })
}

/// Saemundsson's refraction for a **true** altitude, scaled to pressure and temperature.
///
/// ```text
/// R[′] = 1.02 · cot(h + 10.3 / (h + 5.11)) · (P / 1010) · (283 / (273 + T))
/// ```
pub fn refraction_saemundsson(altitude: Degree, temperature_c: f64, pressure_hpa: f64) -> Degree {
    let scale = (pressure_hpa / 1010.0) * (283.0 / (273.0 + temperature_c));
    faded(altitude, SAEMUNDSSON_LIMIT, |h| {
        1.02 / ((h + 10.3 / (h + 5.11)) * RADEG).tan() / 60.0 * scale
    })
}

/// Radio refraction for an apparent altitude under [`AtmosphericConditions::default`].
pub fn refraction_radio(altitude: Degree) -> Degree {
    refraction_radio_with(altitude, &AtmosphericConditions::default())
}

/// Radio refraction for an apparent altitude under the given conditions.
///
/// The refraction is `N·10⁻⁶ · cot(h)` radians. Toward the horizon the cotangent is taken
/// at Bennett's shifted argument `h + 7.31/(h + 4.4)`, which keeps the value finite.
/// Radio refraction exceeds optical refraction because of the water vapour term.
pub fn refraction_radio_with(altitude: Degree, conditions: &AtmosphericConditions) -> Degree {
    let n = conditions.refractivity() * 1e-6;
    faded(altitude, RADIO_LIMIT, |h| {
        n / ((h + 7.31 / (h + 4.4)) * RADEG).tan() / RADEG
    })
}

/// Remove refraction from an observed altitude.
///
/// Formulas written for the apparent altitude are applied directly; for Saemundsson's the
/// equation `h + R(h) = h₀` is solved by fixed-point iteration.
pub fn apparent_to_true_altitude(altitude: Degree, model: &RefractionModel) -> Degree {
    if model.takes_true_altitude() {
        solve_fixed_point(altitude, |h| altitude - model.refraction(h))
    } else {
        altitude - model.refraction(altitude)
    }
}

/// Add refraction to a geometric altitude; the inverse of [`apparent_to_true_altitude`].
pub fn true_to_apparent_altitude(altitude: Degree, model: &RefractionModel) -> Degree {
    if model.takes_true_altitude() {
        altitude + model.refraction(altitude)
    } else {
        solve_fixed_point(altitude, |h0| altitude + model.refraction(h0))
    }
}

/// Iterate `x ← step(x)` from `start` until the update is below the tolerance.
///
/// The refraction slope stays well below 1 in magnitude, so the map is a contraction.
fn solve_fixed_point(start: Degree, step: impl Fn(Degree) -> Degree) -> Degree {
    let mut x = start;
    for _ in 0..MAX_INVERSION_STEPS {
        let next = step(x);
        if (next - x).abs() < INVERSION_TOLERANCE {
            return next;
        }
        x = next;
    }
    x
}

#[cfg(test)]
mod refraction_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bennett() {
        assert!(refraction_bennett(90.0) < 1e-3);
        let horizon = refraction_bennett(0.0);
        assert!(horizon > 0.5 && horizon < 0.7, "{horizon}");
        // Meeus example 16.a: h₀ = 0°30′ gives R ≈ 28.8′ (Bennett)
        assert_abs_diff_eq!(refraction_bennett(0.5) * 60.0, 28.75, epsilon = 0.1);
        assert_abs_diff_eq!(refraction_bennett(45.0) * 60.0, 0.995, epsilon = 0.01);
        assert_eq!(refraction_bennett(-10.0), 0.0);
    }

    #[test]
    fn test_saemundsson_scaling() {
        let standard = refraction_saemundsson(10.0, 10.0, 1010.0);
        assert_abs_diff_eq!(standard * 60.0, 5.41, epsilon = 0.01);

        assert!(refraction_saemundsson(10.0, 10.0, 1040.0) > standard);
        assert!(refraction_saemundsson(10.0, -10.0, 1010.0) > standard);
        assert!(refraction_saemundsson(90.0, 10.0, 1010.0) < 1e-3);
        let horizon = refraction_saemundsson(0.0, 10.0, 1010.0);
        assert!(horizon > 0.45 && horizon < 0.6, "{horizon}");
    }

    #[test]
    fn test_radio_exceeds_optical() {
        let conditions = AtmosphericConditions::default();
        assert_abs_diff_eq!(conditions.refractivity(), 305.3, epsilon = 0.1);
        for h in [0.0, 5.0, 10.0, 30.0] {
            assert!(refraction_radio(h) > refraction_bennett(h), "{h}");
        }
        let dry = AtmosphericConditions {
            relative_humidity: 0.0,
            ..conditions
        };
        assert!(refraction_radio_with(10.0, &dry) < refraction_radio(10.0));
        assert!(refraction_radio(90.0) < 1e-3);
    }

    #[test]
    fn test_fade_is_continuous() {
        let just_above = refraction_bennett(BENNETT_LIMIT);
        let just_below = refraction_bennett(BENNETT_LIMIT - 1e-9);
        assert_abs_diff_eq!(just_above, just_below, epsilon = 1e-6);
        assert_eq!(refraction_bennett(BENNETT_LIMIT - FADE_WIDTH), 0.0);
    }

    #[test]
    fn test_altitude_inversion() {
        let models = [
            RefractionModel::Bennett,
            RefractionModel::Saemundsson(AtmosphericConditions::default()),
            RefractionModel::Radio(AtmosphericConditions {
                pressure_hpa: 1030.0,
                temperature_c: -5.0,
                relative_humidity: 80.0,
            }),
        ];
        for model in &models {
            for i in -40..=180 {
                let h = f64::from(i) * 0.5;
                let apparent = true_to_apparent_altitude(h, model);
                assert!(apparent >= h, "{model:?} {h}");
                let back = apparent_to_true_altitude(apparent, model);
                assert_abs_diff_eq!(back, h, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_model_defaults() {
        assert_eq!(RefractionModel::default(), RefractionModel::Bennett);
        let c = AtmosphericConditions::default();
        assert_eq!((c.pressure_hpa, c.temperature_c, c.relative_humidity), (1010.0, 10.0, 50.0));
    }
}
