//! # Rise, transit and set times
//!
//! Times at which a fixed `(ra, dec)` crosses the meridian and a given altitude, for one
//! UTC day. The standard altitudes account for refraction at the horizon (−34′) and, for
//! the Sun, its semi-diameter (−16′).
//!
//! Targets that never reach the altitude, or never drop below it, have no rise or set:
//! the functions return `None` rather than an error.

use hifitime::{Epoch, Unit};

use crate::{
    constants::{wrap_signed_degrees, Degree, DEG_PER_HOUR, RADEG, SIDEREAL_RATE},
    location::Location,
    sidereal::apparent_sidereal_time,
    sun::sun_ra_dec,
    time::julian_date,
};

/// Geometric altitude of a star at rise or set, refraction included, degrees
pub const STANDARD_ALTITUDE: Degree = -0.5667;
/// Geometric altitude of the Sun's centre at sunrise or sunset, degrees
pub const SUN_ALTITUDE: Degree = -0.8333;

/// Rise, upper transit and set of a target around one UTC day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseTransitSet {
    pub rise: Epoch,
    pub transit: Epoch,
    pub set: Epoch,
}

impl RiseTransitSet {
    /// Time spent above the rise/set altitude, in hours.
    pub fn hours_above(&self) -> f64 {
        (self.set - self.rise).to_seconds() / 3600.0
    }
}

/// Noon UTC of the calendar day of the epoch.
fn utc_noon(epoch: &Epoch) -> Epoch {
    let (year, month, day, ..) = epoch.to_gregorian_utc();
    Epoch::from_gregorian_utc_hms(year, month, day, 12, 0, 0)
}

/// Semi-diurnal arc: hour angle at which the target reaches `altitude`, in degrees.
///
/// `None` when `cos H₀` falls outside [-1, 1], i.e. the target is circumpolar or never
/// rises.
fn semi_diurnal_arc(dec: Degree, latitude: Degree, altitude: Degree) -> Option<Degree> {
    let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();
    let cos_h0 = ((altitude * RADEG).sin() - sin_lat * sin_dec) / (cos_lat * cos_dec);

    if !(-1.0..=1.0).contains(&cos_h0) {
        return None;
    }
    Some(cos_h0.acos() / RADEG)
}

/// Shift an epoch by a sidereal hour angle, converted to solar time.
fn after_hour_angle(epoch: Epoch, angle: Degree) -> Epoch {
    epoch + (angle / DEG_PER_HOUR / SIDEREAL_RATE) * Unit::Hour
}

/// Upper transit of `ra` nearest to `reference` (within ±12 sidereal hours).
fn transit_near(ra: Degree, reference: Epoch, location: &Location) -> Epoch {
    let lst = apparent_sidereal_time(julian_date(&reference), location.longitude) * DEG_PER_HOUR;
    after_hour_angle(reference, wrap_signed_degrees(ra - lst))
}

/// Rise, transit and set of a fixed target on the UTC day of `date`.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: apparent position of date, in degrees.
/// * `date`: any instant of the UTC day; the transit returned is the one closest to noon UTC.
/// * `location`: observer.
/// * `altitude`: rise/set altitude, [`STANDARD_ALTITUDE`] when `None`.
///
/// Return
/// ----------
/// * `None` for a circumpolar target or one that never rises at this latitude.
pub fn rise_transit_set(
    ra: Degree,
    dec: Degree,
    date: &Epoch,
    location: &Location,
    altitude: Option<Degree>,
) -> Option<RiseTransitSet> {
    let altitude = altitude.unwrap_or(STANDARD_ALTITUDE);
    let arc = semi_diurnal_arc(dec, location.latitude, altitude)?;
    let transit = transit_near(ra, utc_noon(date), location);

    Some(RiseTransitSet {
        rise: after_hour_angle(transit, -arc),
        transit,
        set: after_hour_angle(transit, arc),
    })
}

/// First rise of the target strictly after `start`.
pub fn next_rise(
    ra: Degree,
    dec: Degree,
    start: &Epoch,
    location: &Location,
    altitude: Option<Degree>,
) -> Option<Epoch> {
    (0..3)
        .filter_map(|day| {
            let date = *start + f64::from(day) * Unit::Day;
            rise_transit_set(ra, dec, &date, location, altitude)
        })
        .map(|events| events.rise)
        .find(|rise| rise > start)
}

/// First set of the target strictly after `start`.
pub fn next_set(
    ra: Degree,
    dec: Degree,
    start: &Epoch,
    location: &Location,
    altitude: Option<Degree>,
) -> Option<Epoch> {
    (0..3)
        .filter_map(|day| {
            let date = *start + f64::from(day) * Unit::Day;
            rise_transit_set(ra, dec, &date, location, altitude)
        })
        .map(|events| events.set)
        .find(|set| set > start)
}

/// Sunrise and sunset on the UTC day of `date`.
///
/// The Sun moves about 1° a day, so each event is computed from the solar position at
/// noon first and then recomputed once from the solar position at the first estimate.
/// `None` during polar day or polar night.
pub fn sun_rise_set(date: &Epoch, location: &Location) -> Option<(Epoch, Epoch)> {
    let noon = utc_noon(date);
    let estimate = {
        let (ra, dec) = sun_ra_dec(&noon);
        rise_transit_set(ra, dec, &noon, location, Some(SUN_ALTITUDE))?
    };

    let refine = |event: Epoch, rising: bool| {
        let (ra, dec) = sun_ra_dec(&event);
        let arc = semi_diurnal_arc(dec, location.latitude, SUN_ALTITUDE)?;
        let transit = transit_near(ra, event, location);
        Some(after_hour_angle(transit, if rising { -arc } else { arc }))
    };

    Some((refine(estimate.rise, true)?, refine(estimate.set, false)?))
}

#[cfg(test)]
mod rise_set_test {
    use super::*;
    use crate::transforms::{hour_angle, ra_dec_to_alt_az};
    use approx::assert_abs_diff_eq;

    fn new_york() -> Location {
        Location::new(40.7128, -74.0060, 10.0)
    }

    #[test]
    fn test_circumpolar_and_never_rising() {
        let loc = Location::new(45.0, 0.0, 0.0);
        let date = Epoch::from_gregorian_utc_hms(2024, 8, 4, 12, 0, 0);
        // Polaris
        assert!(rise_transit_set(37.95, 89.26, &date, &loc, None).is_none());
        assert!(rise_transit_set(83.0, -70.0, &date, &loc, None).is_none());
        assert!(next_rise(83.0, -70.0, &date, &loc, None).is_none());
    }

    #[test]
    fn test_vega_events() {
        let loc = new_york();
        let (ra, dec) = (279.234_7, 38.783_7);
        let date = Epoch::from_gregorian_utc_hms(2024, 8, 4, 12, 0, 0);
        let events = rise_transit_set(ra, dec, &date, &loc, None).unwrap();

        assert!(events.rise < events.transit && events.transit < events.set);
        assert!((events.transit - utc_noon(&date)).to_seconds().abs() <= 12.0 * 3600.0);
        assert_abs_diff_eq!(hour_angle(ra, &events.transit, &loc), 0.0, epsilon = 1e-3);

        for event in [events.rise, events.set] {
            let (alt, _) = ra_dec_to_alt_az(ra, dec, &event, &loc);
            assert_abs_diff_eq!(alt, STANDARD_ALTITUDE, epsilon = 1e-3);
        }
        assert!(events.hours_above() > 15.0 && events.hours_above() < 20.0);
    }

    #[test]
    fn test_next_rise_and_set() {
        let loc = new_york();
        let (ra, dec) = (279.234_7, 38.783_7);
        let start = Epoch::from_gregorian_utc_hms(2024, 8, 4, 12, 0, 0);

        let rise = next_rise(ra, dec, &start, &loc, None).unwrap();
        let set = next_set(ra, dec, &start, &loc, None).unwrap();
        assert!(rise > start && set > start);
        assert!((rise - start).to_seconds() < 86_400.0);
        assert!((set - start).to_seconds() < 86_400.0);
    }

    #[test]
    fn test_sun_rise_set_new_york_solstice() {
        let loc = new_york();
        let date = Epoch::from_gregorian_utc_hms(2024, 6, 21, 12, 0, 0);
        let (sunrise, sunset) = sun_rise_set(&date, &loc).unwrap();

        // 05:25 EDT and 20:31 EDT
        let expected_rise = Epoch::from_gregorian_utc_hms(2024, 6, 21, 9, 25, 0);
        let expected_set = Epoch::from_gregorian_utc_hms(2024, 6, 22, 0, 31, 0);
        assert!((sunrise - expected_rise).to_seconds().abs() < 180.0);
        assert!((sunset - expected_set).to_seconds().abs() < 180.0);

        for event in [sunrise, sunset] {
            let (ra, dec) = sun_ra_dec(&event);
            let (alt, _) = ra_dec_to_alt_az(ra, dec, &event, &loc);
            assert_abs_diff_eq!(alt, SUN_ALTITUDE, epsilon = 0.02);
        }
    }

    #[test]
    fn test_polar_day() {
        let tromso = Location::new(69.65, 18.96, 0.0);
        let date = Epoch::from_gregorian_utc_hms(2024, 6, 21, 12, 0, 0);
        assert!(sun_rise_set(&date, &tromso).is_none());
    }
}
