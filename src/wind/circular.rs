//! Circular statistics for wind directions
//!
//! Directions wrap at 0/360 degrees, so they are averaged as unit vectors
//! instead of plain numbers.

use crate::{KiteCheckError, Result};

/// Resultant length per sample below which the mean direction is undefined
const RESULTANT_EPSILON: f64 = 1e-9;

/// Map any angle into [0, 360)
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Mean direction of a set of angles in degrees, in [0, 360).
///
/// Fails when the series is empty, contains non-finite values, or when the
/// directions cancel out so that no dominant direction exists.
pub fn circular_mean(angles: &[f64]) -> Result<f64> {
    if angles.is_empty() {
        return Err(KiteCheckError::invalid_input(
            "cannot compute the mean direction of an empty series",
        ));
    }
    if angles.iter().any(|angle| !angle.is_finite()) {
        return Err(KiteCheckError::invalid_input(
            "direction series contains non-finite values",
        ));
    }

    let (sin_sum, cos_sum) = angles.iter().fold((0.0_f64, 0.0_f64), |(sin, cos), angle| {
        let radians = angle.to_radians();
        (sin + radians.sin(), cos + radians.cos())
    });

    if sin_sum.hypot(cos_sum) <= RESULTANT_EPSILON * angles.len() as f64 {
        return Err(KiteCheckError::invalid_input(
            "directions cancel out, there is no dominant wind direction",
        ));
    }

    Ok(normalize_degrees(sin_sum.atan2(cos_sum).to_degrees()))
}

/// Signed shortest rotation from `mean` to `sample`, in (-180, 180]
#[must_use]
pub fn angular_deviation(sample: f64, mean: f64) -> f64 {
    let delta = (sample - mean + 180.0).rem_euclid(360.0) - 180.0;
    if delta <= -180.0 { delta + 360.0 } else { delta }
}

/// Check if an angle is within an arc, handling 360-degree wraparound.
/// Both limits are inclusive. An arc with `start <= stop` is compared on raw
/// values, so `[0, 360]` covers the full circle; `start > stop` runs through
/// north.
#[must_use]
pub fn is_angle_in_arc(angle: f64, start: f64, stop: f64) -> bool {
    if start <= stop {
        return angle >= start && angle <= stop;
    }

    // Arc wraps through north
    let angle = normalize_degrees(angle);
    angle >= normalize_degrees(start) || angle <= normalize_degrees(stop)
}
