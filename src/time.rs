use hifitime::Epoch;

use crate::constants::{DAYS_PER_CENTURY, JD2000, SECONDS_PER_DAY};

/// Offset between Terrestrial Time and International Atomic Time, in seconds
const TT_MINUS_TAI: f64 = 32.184;

/// Transformation from a UTC calendar instant to Julian Date (JD)
///
/// The Gregorian calendar fields of the instant (year, month, day, hour, minute, second
/// and nanoseconds, read in UTC) are converted with the classical Meeus algorithm
/// (Astronomical Algorithms, ch. 7). The calendar is proleptic Gregorian for every date,
/// so the ten days dropped in October 1582 never appear in the day count.
///
/// Argument
/// --------
/// * `epoch`: the instant, interpreted in the UTC time scale
///
/// Return
/// ------
/// * the Julian Date as a day count, `2451545.0` at 2000-01-01T12:00:00 UTC
pub fn julian_date(epoch: &Epoch) -> f64 {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();

    let (mut y, mut m) = (year, i32::from(month));
    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let a = (f64::from(y) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let seconds_of_day = f64::from(hour) * 3600.0
        + f64::from(minute) * 60.0
        + f64::from(second)
        + f64::from(nanos) * 1e-9;
    let day_fraction = seconds_of_day / SECONDS_PER_DAY;

    (365.25 * (f64::from(y) + 4716.0)).floor() + (30.6001 * f64::from(m + 1)).floor()
        + f64::from(day)
        + day_fraction
        + b
        - 1524.5
}

/// Number of days elapsed since J2000.0 (`JD - 2451545.0`).
pub fn j2000_days(epoch: &Epoch) -> f64 {
    julian_date(epoch) - JD2000
}

/// Julian centuries since J2000.0 for a Julian Date.
///
/// This is the time argument `T` of every polynomial series of the crate
/// (precession, nutation, sidereal time, solar and lunar arguments).
#[inline]
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - JD2000) / DAYS_PER_CENTURY
}

/// Batch form of [`julian_date`].
pub fn julian_date_batch(epochs: &[Epoch]) -> Vec<f64> {
    crate::batch::map_indexed(epochs.len(), |i| julian_date(&epochs[i]))
}

/// Batch form of [`j2000_days`].
pub fn j2000_days_batch(epochs: &[Epoch]) -> Vec<f64> {
    crate::batch::map_indexed(epochs.len(), |i| j2000_days(&epochs[i]))
}

/// Build a UTC epoch from a Julian Date.
pub fn epoch_from_julian_date(jd: f64) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Number of leap seconds accumulated at the epoch (TAI − UTC), in seconds.
///
/// The leap-second table is the one bundled with hifitime; dates before 1972 use
/// hifitime's historical offsets.
pub fn tai_minus_utc_seconds(epoch: &Epoch) -> f64 {
    epoch.to_tai_seconds() - epoch.to_utc_seconds()
}

/// Offset TT − UTC at the epoch, in seconds (32.184 s + leap seconds).
pub fn tt_minus_utc_seconds(epoch: &Epoch) -> f64 {
    tai_minus_utc_seconds(epoch) + TT_MINUS_TAI
}

/// Julian Date of the epoch in the Terrestrial Time scale.
///
/// The ephemeris series ([`crate::sun`], [`crate::moon`]) are expressed in dynamical
/// time; feeding them TT instead of UTC removes the roughly one-minute offset that would
/// otherwise shift the Moon by about half an arcminute.
pub fn julian_date_tt(epoch: &Epoch) -> f64 {
    julian_date(epoch) + tt_minus_utc_seconds(epoch) / SECONDS_PER_DAY
}
