//! # Constants and type definitions for skymath
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Time-scale anchors (J2000.0 epoch, Julian century length)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians, hours ↔ degrees)
//! - Earth figure (GRS1980/WGS84) and the astronomical unit
//! - Type aliases documenting the unit carried by each `f64`
//!
//! Every other module pulls its numeric anchors from here so that a given quantity is
//! defined exactly once.

// -------------------------------------------------------------------------------------------------
// Time anchors
// -------------------------------------------------------------------------------------------------

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const JD2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Ratio of the mean sidereal day rate to the solar day rate
pub const SIDEREAL_RATE: f64 = 1.002_737_909_35;

// -------------------------------------------------------------------------------------------------
// Angle conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// Milliarcseconds → degrees
pub const MAS_TO_DEG: f64 = 1.0 / 3_600_000.0;

/// Degrees of right ascension per hour of time
pub const DEG_PER_HOUR: f64 = 15.0;

// -------------------------------------------------------------------------------------------------
// Earth and solar system
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Equatorial horizontal parallax of the Sun at 1 AU, in arcseconds
pub const SOLAR_PARALLAX: f64 = 8.794;

/// Transverse velocity in km/s of a 1 mas/yr proper motion at a 1 mas parallax
pub const KM_S_PER_AU_YR: f64 = 4.740_470_446;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Sidereal or solar time in hours
pub type Hour = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Angular rate in milliarcseconds per year
pub type MasPerYear = f64;
/// Julian Date (days)
pub type JulianDate = f64;

/// Reduce an angle in degrees to the interval [0, 360).
#[inline]
pub fn normalize_degrees(angle: Degree) -> Degree {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Reduce a time in hours to the interval [0, 24).
#[inline]
pub fn normalize_hours(hours: Hour) -> Hour {
    let reduced = hours.rem_euclid(24.0);
    if reduced >= 24.0 {
        0.0
    } else {
        reduced
    }
}

/// Reduce an angle in degrees to the interval (-180, 180].
#[inline]
pub fn wrap_signed_degrees(angle: Degree) -> Degree {
    let reduced = normalize_degrees(angle);
    if reduced > 180.0 {
        reduced - 360.0
    } else {
        reduced
    }
}
