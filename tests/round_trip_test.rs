mod common;

use approx::assert_abs_diff_eq;
use common::{assert_same_direction, random_epochs, random_sky_positions, seeded_rng};
use rand::Rng;
use skymath::{
    alt_az_to_ra_dec, apparent_to_mean, apparent_to_true_altitude, equatorial_to_galactic,
    galactic_to_equatorial, julian_date, mean_to_apparent, precess_j2000_to_date,
    precess_to_j2000, ra_dec_to_alt_az, time::epoch_from_julian_date, true_to_apparent_altitude,
    AtmosphericConditions, Location, ProperMotion, RefractionModel, TangentPlane,
};

#[test]
fn test_alt_az_round_trip() {
    let mut rng = seeded_rng();
    let positions = random_sky_positions(&mut rng, 300);
    let epochs = random_epochs(&mut rng, 300);

    for ((ra, dec), epoch) in positions.into_iter().zip(epochs) {
        let location = Location::new(
            rng.random_range(-89.0..89.0),
            rng.random_range(-180.0..180.0),
            rng.random_range(0.0..3000.0),
        );
        let (alt, az) = ra_dec_to_alt_az(ra, dec, &epoch, &location);
        assert!((-90.0..=90.0).contains(&alt));
        assert!((0.0..360.0).contains(&az));
        if alt > 89.9 {
            continue;
        }
        let back = alt_az_to_ra_dec(alt, az, &epoch, &location);
        assert_same_direction(back, (ra, dec), 1e-4);
    }
}

#[test]
fn test_galactic_round_trip() {
    let mut rng = seeded_rng();
    for (ra, dec) in random_sky_positions(&mut rng, 500) {
        let (l, b) = equatorial_to_galactic(ra, dec);
        assert!((0.0..360.0).contains(&l));
        assert!((-90.0..=90.0).contains(&b));
        assert_same_direction(galactic_to_equatorial(l, b), (ra, dec), 1e-4);
    }
}

#[test]
fn test_precession_round_trip() {
    let mut rng = seeded_rng();
    let positions = random_sky_positions(&mut rng, 200);
    let epochs = random_epochs(&mut rng, 200);
    for ((ra, dec), epoch) in positions.into_iter().zip(epochs) {
        let (ra_date, dec_date) = precess_j2000_to_date(ra, dec, &epoch);
        let back = precess_to_j2000(ra_date, dec_date, &epoch);
        assert_same_direction(back, (ra, dec), 1e-6);
    }
}

#[test]
fn test_mean_apparent_round_trip() {
    let mut rng = seeded_rng();
    let positions = random_sky_positions(&mut rng, 200);
    let epochs = random_epochs(&mut rng, 200);
    for ((ra, dec), epoch) in positions.into_iter().zip(epochs) {
        let (ra_app, dec_app) = mean_to_apparent(ra, dec, &epoch, None);
        let back = apparent_to_mean(ra_app, dec_app, &epoch, None);
        assert_same_direction(back, (ra, dec), 1e-8);

        if dec.abs() < 80.0 {
            let pm = ProperMotion::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
            let (ra_app, dec_app) = mean_to_apparent(ra, dec, &epoch, Some(&pm));
            let back = apparent_to_mean(ra_app, dec_app, &epoch, Some(&pm));
            assert_same_direction(back, (ra, dec), 1e-8);
        }
    }
}

#[test]
fn test_refraction_round_trip() {
    let mut rng = seeded_rng();
    let models = [
        RefractionModel::Bennett,
        RefractionModel::Saemundsson(AtmosphericConditions::default()),
        RefractionModel::Radio(AtmosphericConditions::default()),
    ];
    for _ in 0..300 {
        let altitude = rng.random_range(-5.0..90.0);
        for model in &models {
            let apparent = true_to_apparent_altitude(altitude, model);
            assert_abs_diff_eq!(apparent_to_true_altitude(apparent, model), altitude, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_projection_round_trip() {
    let mut rng = seeded_rng();
    for (ra0, dec0) in random_sky_positions(&mut rng, 50) {
        let plane = TangentPlane::new(ra0, dec0, rng.random_range(0.1..5.0))
            .with_reference_pixel(2048.0, 2048.0)
            .with_rotation(rng.random_range(0.0..360.0));
        for _ in 0..10 {
            let ra = ra0 + rng.random_range(-1.0..1.0);
            let dec = (dec0 + rng.random_range(-1.0..1.0)).clamp(-90.0, 90.0);
            let (x, y) = plane.ra_dec_to_pixel(ra, dec).expect("near the tangent point");
            assert_same_direction(plane.pixel_to_ra_dec(x, y), (ra, dec), 1e-9);
        }
    }
}

#[test]
fn test_julian_date_round_trip() {
    let mut rng = seeded_rng();
    for epoch in random_epochs(&mut rng, 200) {
        let jd = julian_date(&epoch);
        assert_abs_diff_eq!(julian_date(&epoch_from_julian_date(jd)), jd, epsilon = 1e-7);
    }
}
