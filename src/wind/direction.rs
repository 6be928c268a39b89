//! Wind direction evaluation over a measurement window

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calibration::Calibration;
use super::circular::{angular_deviation, circular_mean};
use crate::Result;

/// Direction statistics of a window and whether it suits kitesurfing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionVerdict {
    /// False as soon as one sample blew from the onshore arc
    pub is_favorable: bool,
    /// Circular mean of the window in degrees, [0, 360)
    pub mean_angle: f64,
    /// Sample that turned furthest counter-clockwise from the mean
    pub min_deviation_sample: f64,
    /// Sample that turned furthest clockwise from the mean
    pub max_deviation_sample: f64,
    /// Angle between the two extreme samples, in degrees
    pub spread: f64,
}

/// Evaluate a window of direction samples against the onshore arc.
pub fn evaluate_direction(samples: &[f64], calibration: &Calibration) -> Result<DirectionVerdict> {
    let mean_angle = circular_mean(samples)?;

    // (deviation, sample) pairs, anchored at the mean itself
    let mut most_negative = (0.0, mean_angle);
    let mut most_positive = (0.0, mean_angle);
    for &sample in samples {
        let delta = angular_deviation(sample, mean_angle);
        if delta < most_negative.0 {
            most_negative = (delta, sample);
        }
        if delta > most_positive.0 {
            most_positive = (delta, sample);
        }
    }

    let onshore_sample = samples.iter().find(|&&sample| calibration.is_onshore(sample));
    if let Some(sample) = onshore_sample {
        debug!(
            "Sample {:.1}° lies in onshore arc [{}, {}]",
            sample,
            calibration.ne_limit(),
            calibration.sw_limit()
        );
    }

    Ok(DirectionVerdict {
        is_favorable: onshore_sample.is_none(),
        mean_angle,
        min_deviation_sample: most_negative.1,
        max_deviation_sample: most_positive.1,
        spread: most_positive.0 - most_negative.0,
    })
}
