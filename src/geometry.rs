//! Viewing-angle geometry.
//!
//! The screen width and the viewing distance form an isosceles triangle with
//! the viewing angle at the eye, so `width = 2 * distance * tan(angle / 2)`.
//! Distances and sizes are shown as whole units; the recovered angle used for
//! the resolution estimate is never rounded.

use crate::aspect::AspectRatio;
use crate::error::GeometryError;
use crate::resolution::{Resolution, PIXELS_PER_DEGREE};

/// Check that `degrees` lies strictly inside (0, 180).
pub fn validate_angle(degrees: f64) -> Result<f64, GeometryError> {
    if degrees.is_finite() && degrees > 0.0 && degrees < 180.0 {
        Ok(degrees)
    } else {
        Err(GeometryError::InvalidAngle(degrees))
    }
}

/// Check that a screen size or distance is a finite, positive length.
pub fn validate_magnitude(field: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidMagnitude { field, value })
    }
}

fn half_angle_tan(degrees: f64) -> f64 {
    (degrees.to_radians() / 2.0).tan()
}

/// Distance at which a screen of diagonal `screen_size` fills `angle` degrees.
/// A distance that rounds to zero is reported as `InvalidMagnitude`.
pub fn viewing_distance(
    angle: f64,
    screen_size: f64,
    ratio: AspectRatio,
) -> Result<f64, GeometryError> {
    let angle = validate_angle(angle)?;
    let screen_size = validate_magnitude("screen size", screen_size)?;

    let width = ratio.diagonal_to_width(screen_size);
    validate_magnitude("viewing distance", (width / (2.0 * half_angle_tan(angle))).round())
}

/// Diagonal of the screen that fills `angle` degrees from `distance` away.
pub fn screen_size(angle: f64, distance: f64, ratio: AspectRatio) -> Result<f64, GeometryError> {
    let angle = validate_angle(angle)?;
    let distance = validate_magnitude("viewing distance", distance)?;

    let width = 2.0 * distance * half_angle_tan(angle);
    validate_magnitude("screen size", ratio.width_to_diagonal(width).round())
}

/// Horizontal angle in degrees the screen actually subtends at `distance`.
pub fn subtended_angle(
    screen_size: f64,
    distance: f64,
    ratio: AspectRatio,
) -> Result<f64, GeometryError> {
    let screen_size = validate_magnitude("screen size", screen_size)?;
    let distance = validate_magnitude("viewing distance", distance)?;

    let half_width = ratio.diagonal_to_width(screen_size) / 2.0;
    Ok(2.0 * (half_width / distance).atan().to_degrees())
}

/// Horizontal pixel count the eye can resolve across the screen.
pub fn resolvable_pixels(
    screen_size: f64,
    distance: f64,
    ratio: AspectRatio,
) -> Result<f64, GeometryError> {
    Ok(subtended_angle(screen_size, distance, ratio)? * PIXELS_PER_DEGREE)
}

/// Lowest resolution at which individual pixels stop being visible.
pub fn optimal_resolution(
    screen_size: f64,
    distance: f64,
    ratio: AspectRatio,
) -> Result<Resolution, GeometryError> {
    resolvable_pixels(screen_size, distance, ratio).map(Resolution::for_pixel_count)
}
