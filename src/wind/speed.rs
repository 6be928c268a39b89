//! Wind speed evaluation over a measurement window

use serde::{Deserialize, Serialize};
use std::fmt;

use super::calibration::Calibration;
use crate::{KiteCheckError, Result};

/// Unit the speed statistics are reported in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    /// The unit the samples were measured in (m/s for the Meetnet anemometers)
    #[default]
    Raw,
    /// Knots
    Knots,
}

impl SpeedUnit {
    fn factor(self, calibration: &Calibration) -> f64 {
        match self {
            SpeedUnit::Raw => 1.0,
            SpeedUnit::Knots => calibration.knots_per_unit(),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedUnit::Raw => write!(f, "m/s"),
            SpeedUnit::Knots => write!(f, "knots"),
        }
    }
}

/// Speed statistics of a window and whether it suits kitesurfing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedVerdict {
    /// Average speed in knots lies within the calibrated limits
    pub is_favorable: bool,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// max - min
    pub spread: f64,
    /// Unit of `average`, `max`, `min` and `spread`
    pub unit: SpeedUnit,
}

/// Evaluate a window of speed samples. The favorability check always runs in
/// knots; the statistics are reported in `unit`.
pub fn evaluate_speed(
    samples: &[f64],
    calibration: &Calibration,
    unit: SpeedUnit,
) -> Result<SpeedVerdict> {
    if samples.is_empty() {
        return Err(KiteCheckError::invalid_input(
            "cannot compute wind speed statistics of an empty series",
        ));
    }
    if samples.iter().any(|sample| !sample.is_finite()) {
        return Err(KiteCheckError::invalid_input(
            "speed series contains non-finite values",
        ));
    }

    let average = samples.iter().sum::<f64>() / samples.len() as f64;
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);

    let is_favorable = calibration.is_speed_in_range(average * calibration.knots_per_unit());

    let factor = unit.factor(calibration);
    Ok(SpeedVerdict {
        is_favorable,
        average: average * factor,
        max: max * factor,
        min: min * factor,
        spread: (max - min) * factor,
        unit,
    })
}
