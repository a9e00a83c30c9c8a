//! # skymath
//!
//! Deterministic, low-precision positional astronomy: time scales, observer locations,
//! equatorial / horizontal / galactic frames, precession, nutation, aberration, proper
//! motion, sidereal time, refraction, airmass and extinction, and Sun/Moon ephemerides.
//!
//! Every operation is a pure function of its arguments. Angles are in degrees, sidereal
//! times in hours, nutation in arcseconds, proper motions in mas/yr, instants are
//! [`hifitime::Epoch`] values read in UTC.
//!
//! The topic modules are the canonical grouping; the most used functions and types are
//! also re-exported at the crate root.
//!
//! ```rust
//! use hifitime::Epoch;
//! use skymath::{parse_location, ra_dec_to_alt_az, airmass_pickering};
//!
//! let site = parse_location("40°42'46\"N", "74°0'21.6\"W", None).unwrap();
//! let epoch = Epoch::from_gregorian_utc_hms(2024, 8, 4, 6, 0, 0);
//! let (alt, az) = ra_dec_to_alt_az(279.2347, 38.7837, &epoch, &site);
//! assert!((0.0..360.0).contains(&az));
//! let _airmass = airmass_pickering(alt).unwrap();
//! ```
//!
//! With the `parallel` feature the batch functions evaluate their element-wise maps on
//! rayon's thread pool; results are identical to the sequential build.

pub mod aberration;
pub mod airmass;
pub mod batch;
pub mod constants;
pub mod galactic;
pub mod location;
pub mod moon;
pub mod nutation;
pub mod parallax;
pub mod precession;
pub mod projection;
pub mod proper_motion;
pub mod ref_system;
pub mod refraction;
pub mod rise_set;
pub mod sidereal;
pub mod skymath_errors;
pub mod sun;
pub mod time;
pub mod transforms;

pub use crate::{
    aberration::{
        aberration_magnitude, apply_aberration, apply_aberration_batch, remove_aberration,
        remove_aberration_batch, ABERRATION_CONSTANT,
    },
    airmass::{
        airmass_kasten_young, airmass_pickering, airmass_pickering_batch, airmass_plane_parallel,
        airmass_young, extinction_coefficient_estimate, extinction_coefficient_from_wavelength,
        extinction_magnitudes, extinction_magnitudes_batch,
    },
    galactic::{
        equatorial_to_galactic, equatorial_to_galactic_batch, galactic_landmarks,
        galactic_to_equatorial, galactic_to_equatorial_batch, GalacticLandmark,
    },
    location::{format_dms, parse_location, parser::CoordinateAxis, Location},
    moon::{
        moon_distance, moon_equatorial, moon_illumination, moon_phase_angle, moon_phase_name,
        moon_position, MoonPhase,
    },
    nutation::{
        equation_of_equinoxes, mean_obliquity, nutation, nutation_in_longitude,
        nutation_in_obliquity, true_obliquity, Nutation,
    },
    parallax::{annual_parallax, diurnal_parallax, geocentric_distance},
    precession::{
        precess_j2000_to_date, precess_j2000_to_date_batch, precess_to_j2000,
        precess_to_j2000_batch, precession_angles,
    },
    projection::TangentPlane,
    proper_motion::{
        apply_proper_motion, apply_proper_motion_batch, apply_proper_motion_rigorous,
        pm_ra_cosdec_to_pm_ra, pm_ra_to_pm_ra_cosdec, proper_motion_position_angle,
        total_proper_motion, ProperMotion,
    },
    ref_system::{apparent_to_mean, mean_to_apparent, EquatorialFrame},
    refraction::{
        apparent_to_true_altitude, refraction_bennett, refraction_radio, refraction_radio_with,
        refraction_saemundsson, true_to_apparent_altitude, AtmosphericConditions,
        RefractionModel,
    },
    rise_set::{next_rise, next_set, rise_transit_set, sun_rise_set, RiseTransitSet},
    sidereal::{
        apparent_sidereal_time, apparent_sidereal_time_batch, gmst, gmst_batch,
        greenwich_apparent_sidereal_time, local_mean_sidereal_time,
        local_mean_sidereal_time_batch,
    },
    skymath_errors::{Result, SkyMathError},
    sun::{sun_distance, sun_position, sun_ra_dec, sun_true_longitude},
    time::{j2000_days, j2000_days_batch, julian_date, julian_date_batch, julian_date_tt},
    transforms::{
        alt_az_to_ra_dec, alt_az_to_ra_dec_batch, hour_angle, ra_dec_to_alt_az,
        ra_dec_to_alt_az_batch,
    },
};
