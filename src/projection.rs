//! Gnomonic (tangent-plane) projection between sky and detector pixels.
//!
//! The sky is projected onto the plane tangent at the field centre `(ra0, dec0)`, giving
//! the standard coordinates `(ξ, η)`: ξ toward increasing right ascension (East), η
//! toward North. Pixel axes follow the usual sky-image orientation, x growing toward the
//! West and y toward the North, optionally rotated by a position angle.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::constants::{normalize_degrees, Degree, RADEG};

/// Points farther than this from the field centre (cos of the separation below the
/// threshold) have no finite projection.
const HORIZON_COS: f64 = 1e-10;

/// A tangent-plane projection with a pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentPlane {
    /// Right ascension of the tangent point, degrees
    pub ra0: Degree,
    /// Declination of the tangent point, degrees
    pub dec0: Degree,
    /// Plate scale in arcseconds per pixel, positive
    pub scale: f64,
    /// Position angle of the pixel y axis, degrees from North through East
    pub rotation: Degree,
    /// Pixel coordinates of the tangent point
    pub reference_pixel: (f64, f64),
}

impl TangentPlane {
    /// Projection centred on `(ra0, dec0)` with `scale` arcsec/pixel, unrotated, with the
    /// tangent point at pixel (0, 0).
    pub fn new(ra0: Degree, dec0: Degree, scale: f64) -> Self {
        TangentPlane {
            ra0,
            dec0,
            scale,
            rotation: 0.0,
            reference_pixel: (0.0, 0.0),
        }
    }

    pub fn with_reference_pixel(self, x: f64, y: f64) -> Self {
        TangentPlane {
            reference_pixel: (x, y),
            ..self
        }
    }

    pub fn with_rotation(self, rotation: Degree) -> Self {
        TangentPlane { rotation, ..self }
    }

    /// Standard coordinates `(ξ, η)` in radians, `None` on the far hemisphere.
    pub fn standard_coordinates(&self, ra: Degree, dec: Degree) -> Option<(f64, f64)> {
        let (sin_dra, cos_dra) = ((ra - self.ra0) * RADEG).sin_cos();
        let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
        let (sin_dec0, cos_dec0) = (self.dec0 * RADEG).sin_cos();

        let cos_separation = sin_dec * sin_dec0 + cos_dec * cos_dec0 * cos_dra;
        if cos_separation < HORIZON_COS {
            return None;
        }
        let xi = cos_dec * sin_dra / cos_separation;
        let eta = (sin_dec * cos_dec0 - cos_dec * sin_dec0 * cos_dra) / cos_separation;
        Some((xi, eta))
    }

    /// Sky position of standard coordinates `(ξ, η)` in radians.
    pub fn from_standard_coordinates(&self, xi: f64, eta: f64) -> (Degree, Degree) {
        let (sin_dec0, cos_dec0) = (self.dec0 * RADEG).sin_cos();
        let denominator = cos_dec0 - eta * sin_dec0;

        let ra = self.ra0 + xi.atan2(denominator) / RADEG;
        let dec = (sin_dec0 + eta * cos_dec0).atan2(xi.hypot(denominator)) / RADEG;
        (normalize_degrees(ra), dec)
    }

    /// Rotation taking `(ξ, η)` to the pixel axes.
    fn to_pixel_axes(&self) -> Rotation2<f64> {
        Rotation2::new(-self.rotation * RADEG)
    }

    /// Pixel coordinates of a sky position, `None` when it lies 90° or more from the centre.
    pub fn ra_dec_to_pixel(&self, ra: Degree, dec: Degree) -> Option<(f64, f64)> {
        let (xi, eta) = self.standard_coordinates(ra, dec)?;
        let rotated = self.to_pixel_axes() * Vector2::new(xi, eta);
        let pixels_per_radian = 1.0 / (self.scale / 3600.0 * RADEG);

        let (x0, y0) = self.reference_pixel;
        Some((
            x0 - rotated.x * pixels_per_radian,
            y0 + rotated.y * pixels_per_radian,
        ))
    }

    /// Sky position of a pixel; every pixel maps to a point of the near hemisphere.
    pub fn pixel_to_ra_dec(&self, x: f64, y: f64) -> (Degree, Degree) {
        let radians_per_pixel = self.scale / 3600.0 * RADEG;
        let (x0, y0) = self.reference_pixel;
        let rotated = Vector2::new(-(x - x0) * radians_per_pixel, (y - y0) * radians_per_pixel);
        let standard = self.to_pixel_axes().inverse() * rotated;
        self.from_standard_coordinates(standard.x, standard.y)
    }
}
