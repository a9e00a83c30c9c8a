mod common;

use common::{assert_matches_scalar, random_epochs, random_sky_positions, seeded_rng};
use rand::Rng;
use skymath::{
    airmass_pickering, airmass_pickering_batch, alt_az_to_ra_dec, alt_az_to_ra_dec_batch,
    apparent_sidereal_time, apparent_sidereal_time_batch, apply_aberration,
    apply_aberration_batch, apply_proper_motion, apply_proper_motion_batch,
    equatorial_to_galactic, equatorial_to_galactic_batch, extinction_magnitudes,
    extinction_magnitudes_batch, galactic_to_equatorial, galactic_to_equatorial_batch, gmst,
    gmst_batch, j2000_days, j2000_days_batch, julian_date, julian_date_batch,
    precess_j2000_to_date, precess_j2000_to_date_batch, precess_to_j2000,
    precess_to_j2000_batch, ra_dec_to_alt_az, ra_dec_to_alt_az_batch, remove_aberration,
    remove_aberration_batch, Location, SkyMathError,
};

const COUNT: usize = 257;

fn sky_columns() -> (Vec<f64>, Vec<f64>) {
    let mut rng = seeded_rng();
    random_sky_positions(&mut rng, COUNT).into_iter().unzip()
}

#[test]
fn test_horizontal_batches() {
    let (ra, dec) = sky_columns();
    let mut rng = seeded_rng();
    let epoch = random_epochs(&mut rng, 1)[0];
    let site = Location::new(-24.627, -70.404, 2635.0);

    let (alt, az) = ra_dec_to_alt_az_batch(&ra, &dec, &epoch, &site).unwrap();
    assert_matches_scalar((&alt, &az), |i| ra_dec_to_alt_az(ra[i], dec[i], &epoch, &site));

    let (ra_back, dec_back) = alt_az_to_ra_dec_batch(&alt, &az, &epoch, &site).unwrap();
    assert_matches_scalar((&ra_back, &dec_back), |i| {
        alt_az_to_ra_dec(alt[i], az[i], &epoch, &site)
    });
}

#[test]
fn test_galactic_batches() {
    let (ra, dec) = sky_columns();
    let (l, b) = equatorial_to_galactic_batch(&ra, &dec).unwrap();
    assert_matches_scalar((&l, &b), |i| equatorial_to_galactic(ra[i], dec[i]));

    let (ra_back, dec_back) = galactic_to_equatorial_batch(&l, &b).unwrap();
    assert_matches_scalar((&ra_back, &dec_back), |i| galactic_to_equatorial(l[i], b[i]));
}

#[test]
fn test_precession_and_aberration_batches() {
    let (ra, dec) = sky_columns();
    let mut rng = seeded_rng();
    let epoch = random_epochs(&mut rng, 1)[0];

    let (r, d) = precess_j2000_to_date_batch(&ra, &dec, &epoch).unwrap();
    assert_matches_scalar((&r, &d), |i| precess_j2000_to_date(ra[i], dec[i], &epoch));
    let (r, d) = precess_to_j2000_batch(&ra, &dec, &epoch).unwrap();
    assert_matches_scalar((&r, &d), |i| precess_to_j2000(ra[i], dec[i], &epoch));

    let (r, d) = apply_aberration_batch(&ra, &dec, &epoch).unwrap();
    assert_matches_scalar((&r, &d), |i| apply_aberration(ra[i], dec[i], &epoch));
    let (r, d) = remove_aberration_batch(&ra, &dec, &epoch).unwrap();
    assert_matches_scalar((&r, &d), |i| remove_aberration(ra[i], dec[i], &epoch));
}

#[test]
fn test_proper_motion_batch() {
    let (ra, dec) = sky_columns();
    let mut rng = seeded_rng();
    let epoch = random_epochs(&mut rng, 1)[0];
    let pm_ra: Vec<f64> = (0..COUNT).map(|_| rng.random_range(-1000.0..1000.0)).collect();
    let pm_dec: Vec<f64> = (0..COUNT).map(|_| rng.random_range(-1000.0..1000.0)).collect();

    let (r, d) = apply_proper_motion_batch(&ra, &dec, &pm_ra, &pm_dec, &epoch).unwrap();
    assert_matches_scalar((&r, &d), |i| {
        apply_proper_motion(ra[i], dec[i], pm_ra[i], pm_dec[i], &epoch)
    });
}

#[test]
fn test_scalar_column_batches() {
    let mut rng = seeded_rng();
    let epochs = random_epochs(&mut rng, COUNT);

    let jd = julian_date_batch(&epochs);
    assert_eq!(jd, epochs.iter().map(julian_date).collect::<Vec<_>>());
    assert_eq!(
        j2000_days_batch(&epochs),
        epochs.iter().map(j2000_days).collect::<Vec<_>>()
    );
    assert_eq!(gmst_batch(&jd), jd.iter().map(|&t| gmst(t)).collect::<Vec<_>>());
    assert_eq!(
        apparent_sidereal_time_batch(&jd, 149.07),
        jd.iter()
            .map(|&t| apparent_sidereal_time(t, 149.07))
            .collect::<Vec<_>>()
    );

    let altitudes: Vec<f64> = (0..COUNT).map(|_| rng.random_range(-5.0..90.0)).collect();
    let airmass = airmass_pickering_batch(&altitudes).unwrap();
    for (&x, &altitude) in airmass.iter().zip(&altitudes) {
        assert_eq!(x, airmass_pickering(altitude).unwrap());
    }

    let finite: Vec<f64> = airmass.into_iter().filter(|x| x.is_finite()).collect();
    let coefficient = rng.random_range(0.05..0.6);
    let extinction = extinction_magnitudes_batch(&finite, coefficient);
    assert_eq!(extinction.len(), finite.len());
    for (&x, &m) in finite.iter().zip(&extinction) {
        assert_eq!(m, extinction_magnitudes(x, coefficient));
    }
}

#[test]
fn test_empty_batches() {
    let epoch = random_epochs(&mut seeded_rng(), 1)[0];
    let site = Location::default();
    let (alt, az) = ra_dec_to_alt_az_batch(&[], &[], &epoch, &site).unwrap();
    assert!(alt.is_empty() && az.is_empty());
    assert!(julian_date_batch(&[]).is_empty());
    assert!(extinction_magnitudes_batch(&[], 0.15).is_empty());
    assert!(airmass_pickering_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_length_mismatch_is_a_shape_error() {
    let epoch = random_epochs(&mut seeded_rng(), 1)[0];
    let site = Location::default();
    let three = [1.0, 2.0, 3.0];
    let two = [1.0, 2.0];

    let err = ra_dec_to_alt_az_batch(&three, &two, &epoch, &site).unwrap_err();
    assert_eq!(
        err,
        SkyMathError::Shape {
            argument: "dec",
            expected: 3,
            found: 2
        }
    );

    assert!(matches!(
        equatorial_to_galactic_batch(&two, &three),
        Err(SkyMathError::Shape { .. })
    ));
    assert!(matches!(
        apply_proper_motion_batch(&three, &three, &three, &two, &epoch),
        Err(SkyMathError::Shape {
            argument: "pm_dec",
            ..
        })
    ));
}

#[test]
fn test_out_of_range_altitude_fails_the_batch() {
    let err = airmass_pickering_batch(&[30.0, 120.0, 45.0]).unwrap_err();
    assert!(matches!(
        err,
        SkyMathError::OutOfRange {
            parameter: "altitude",
            ..
        }
    ));
}
