//! # Observer location
//!
//! A [`Location`] is the geodetic position of an observer on the GRS80/WGS84 ellipsoid:
//! latitude and longitude in degrees (North and East positive) and altitude in metres.
//! It is a plain `Copy` value; every function taking one borrows it for the duration of
//! the call only.
//!
//! Locations can be built from numbers ([`Location::new`]) or from human-written text
//! ([`Location::parse`], [`parse_location`]) through the notation matchers of
//! [`parser`].
//!
//! ## Example
//!
//! ```rust
//! use skymath::location::Location;
//!
//! let nyc = Location::parse("40°42'46\"N", "74°0'21.6\"W", Some(10.0)).unwrap();
//! assert!((nyc.latitude - 40.7128).abs() < 1e-3);
//! assert!((nyc.longitude + 74.0060).abs() < 1e-3);
//! assert_eq!(nyc.latitude_dms(), "40°42'46.000\"N");
//! ```

pub mod parser;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Hour, Meter, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, RADEG},
    sidereal::{apparent_sidereal_time, local_mean_sidereal_time},
    skymath_errors::Result,
    time::julian_date,
};

use self::parser::{parse_latitude, parse_longitude, CoordinateAxis};

/// Geodetic position of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Geodetic latitude in degrees, in [-90, 90]
    pub latitude: Degree,
    /// Longitude in degrees east of Greenwich, in [-180, 180]
    pub longitude: Degree,
    /// Height above the ellipsoid in metres
    #[serde(default)]
    pub altitude: Meter,
}

impl Location {
    pub fn new(latitude: Degree, longitude: Degree, altitude: Meter) -> Self {
        Location {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Build a location from free-form latitude and longitude text.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: latitude text, e.g. `"40.7128"`, `"40°42'46\"N"`, `"40 42 46"`.
    /// * `longitude`: longitude text, e.g. `"-74.0060"`, `"74:00:21.6 W"`, `"4h56m0s W"`.
    /// * `altitude`: metres above the ellipsoid, 0 when `None`.
    ///
    /// Return
    /// ----------
    /// * The location, or [`crate::SkyMathError::Parse`] naming the text that failed.
    pub fn parse(latitude: &str, longitude: &str, altitude: Option<Meter>) -> Result<Self> {
        Ok(Location {
            latitude: parse_latitude(latitude)?,
            longitude: parse_longitude(longitude)?,
            altitude: altitude.unwrap_or(0.0),
        })
    }

    /// Latitude as `DD°MM'SS.sss"H`.
    pub fn latitude_dms(&self) -> String {
        format_dms(self.latitude, CoordinateAxis::Latitude)
    }

    /// Longitude as `DDD°MM'SS.sss"H`.
    pub fn longitude_dms(&self) -> String {
        format_dms(self.longitude, CoordinateAxis::Longitude)
    }

    /// Local mean sidereal time at this location, in hours.
    pub fn local_mean_sidereal_time(&self, epoch: &Epoch) -> Hour {
        local_mean_sidereal_time(julian_date(epoch), self.longitude)
    }

    /// Local apparent sidereal time at this location, in hours.
    pub fn local_apparent_sidereal_time(&self, epoch: &Epoch) -> Hour {
        apparent_sidereal_time(julian_date(epoch), self.longitude)
    }

    /// Geocentric position factors `(ρ·cos φ′, ρ·sin φ′)` of the observer.
    ///
    /// `φ′` is the geocentric latitude and `ρ` the distance to the Earth's centre in units
    /// of the equatorial radius. These are the quantities needed for diurnal parallax.
    ///
    /// The computation uses the reference ellipsoid defined by:
    /// * `EARTH_MAJOR_AXIS`: Equatorial radius (m),
    /// * `EARTH_MINOR_AXIS`: Polar radius (m).
    ///
    /// ```text
    /// u = atan( (sin φ * (b/a)) / cos φ )
    /// ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
    /// ρ_cosφ = cos u + (h/a) * cos φ
    /// ```
    pub fn geocentric_parallax_factors(&self) -> (f64, f64) {
        let lat = self.latitude * RADEG;
        let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

        // parametric latitude
        let u = (lat.sin() * axis_ratio).atan2(lat.cos());

        let rho_sin_phi = axis_ratio * u.sin() + (self.altitude / EARTH_MAJOR_AXIS) * lat.sin();
        let rho_cos_phi = u.cos() + (self.altitude / EARTH_MAJOR_AXIS) * lat.cos();

        (rho_cos_phi, rho_sin_phi)
    }
}

/// Parse a location from free-form latitude and longitude text.
///
/// Same as [`Location::parse`].
pub fn parse_location(latitude: &str, longitude: &str, altitude: Option<Meter>) -> Result<Location> {
    Location::parse(latitude, longitude, altitude)
}

/// Format an angle as degrees, minutes and seconds with a hemisphere letter.
///
/// The value is rounded to the millisecond of arc first, so 59.9996″ carries over into
/// the next minute instead of printing as `60.000`. The output is accepted back by
/// [`parser::parse_angle`].
pub fn format_dms(value: Degree, axis: CoordinateAxis) -> String {
    let hemisphere = match (axis, value < 0.0) {
        (CoordinateAxis::Latitude, false) => 'N',
        (CoordinateAxis::Latitude, true) => 'S',
        (CoordinateAxis::Longitude, false) => 'E',
        (CoordinateAxis::Longitude, true) => 'W',
    };
    let width = match axis {
        CoordinateAxis::Latitude => 2,
        CoordinateAxis::Longitude => 3,
    };

    let total_ms = (value.abs() * 3_600_000.0).round() as u64;
    let ms = total_ms % 1000;
    let seconds = (total_ms / 1000) % 60;
    let minutes = (total_ms / 60_000) % 60;
    let degrees = total_ms / 3_600_000;

    format!("{degrees:0width$}°{minutes:02}'{seconds:02}.{ms:03}\"{hemisphere}")
}
