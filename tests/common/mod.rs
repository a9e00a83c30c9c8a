#![allow(dead_code)]

use hifitime::Epoch;
use rand::{rngs::StdRng, Rng, SeedableRng};
use skymath::ref_system::radec_to_unit_vector;

pub const SEED: u64 = 0x5eed_2024;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Uniformly distributed directions on the sphere, `(ra, dec)` in degrees.
pub fn random_sky_positions(rng: &mut StdRng, count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|_| {
            let ra = rng.random_range(0.0..360.0);
            let dec = f64::asin(rng.random_range(-1.0..1.0)).to_degrees();
            (ra, dec)
        })
        .collect()
}

/// Random UTC instants between 1990 and 2050, to the second.
pub fn random_epochs(rng: &mut StdRng, count: usize) -> Vec<Epoch> {
    (0..count)
        .map(|_| {
            Epoch::from_gregorian_utc_hms(
                rng.random_range(1990..2050),
                rng.random_range(1..=12),
                rng.random_range(1..=28),
                rng.random_range(0..24),
                rng.random_range(0..60),
                rng.random_range(0..60),
            )
        })
        .collect()
}

/// Angular distance between two directions, in degrees.
pub fn separation(a: (f64, f64), b: (f64, f64)) -> f64 {
    let u = radec_to_unit_vector(a.0, a.1);
    let v = radec_to_unit_vector(b.0, b.1);
    u.cross(&v).norm().atan2(u.dot(&v)).to_degrees()
}

/// Assert that two spherical positions designate the same direction.
///
/// Comparing directions instead of angles avoids false failures from the right
/// ascension wrapping at 0/360 or becoming meaningless at the poles.
pub fn assert_same_direction(actual: (f64, f64), expected: (f64, f64), epsilon_deg: f64) {
    let distance = separation(actual, expected);
    assert!(
        distance < epsilon_deg,
        "{actual:?} is {distance}° away from {expected:?}"
    );
}

/// Assert element-wise equality of batch output against a scalar function.
pub fn assert_matches_scalar(batch: (&[f64], &[f64]), scalar: impl Fn(usize) -> (f64, f64)) {
    assert_eq!(batch.0.len(), batch.1.len());
    for i in 0..batch.0.len() {
        let (a, b) = scalar(i);
        assert_eq!((batch.0[i], batch.1[i]), (a, b), "element {i}");
    }
}
