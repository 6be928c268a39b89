//! Condition evaluator combining direction and speed verdicts

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::calibration::Calibration;
use super::direction::{DirectionVerdict, evaluate_direction};
use super::sector::sector_label;
use super::speed::{SpeedUnit, SpeedVerdict, evaluate_speed};
use crate::Result;

/// Go/no-go: both direction and speed have to be favorable
#[must_use]
pub fn compose_verdict(direction: &DirectionVerdict, speed: &SpeedVerdict) -> bool {
    direction.is_favorable && speed.is_favorable
}

/// Complete evaluation of one measurement window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub direction: DirectionVerdict,
    pub speed: SpeedVerdict,
    /// Compass sector of the mean direction
    pub sector: String,
    pub is_favorable: bool,
}

/// Stateless evaluator bound to one validated calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionEvaluator {
    calibration: Calibration,
}

impl ConditionEvaluator {
    /// Create an evaluator, rejecting malformed calibrations
    pub fn new(calibration: Calibration) -> Result<Self> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    #[must_use]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn evaluate_direction(&self, samples: &[f64]) -> Result<DirectionVerdict> {
        evaluate_direction(samples, &self.calibration)
    }

    pub fn evaluate_speed(&self, samples: &[f64], unit: SpeedUnit) -> Result<SpeedVerdict> {
        evaluate_speed(samples, &self.calibration, unit)
    }

    /// Evaluate a window of direction and speed samples
    pub fn evaluate(
        &self,
        direction_samples: &[f64],
        speed_samples: &[f64],
        unit: SpeedUnit,
    ) -> Result<ConditionReport> {
        debug!(
            "Evaluating {} direction and {} speed samples",
            direction_samples.len(),
            speed_samples.len()
        );

        let direction = self.evaluate_direction(direction_samples)?;
        let speed = self.evaluate_speed(speed_samples, unit)?;
        let is_favorable = compose_verdict(&direction, &speed);

        info!(
            mean_direction = direction.mean_angle,
            direction_ok = direction.is_favorable,
            average_speed = speed.average,
            speed_ok = speed.is_favorable,
            "Wind conditions evaluated"
        );

        Ok(ConditionReport {
            sector: sector_label(direction.mean_angle).to_string(),
            direction,
            speed,
            is_favorable,
        })
    }
}

fn verdict_word(favorable: bool) -> &'static str {
    if favorable { "OK" } else { "NOK" }
}

impl fmt::Display for ConditionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wind direction: {} ({:.0}°, between {:.0}° and {:.0}°, spread {:.0}°) {}",
            self.sector,
            self.direction.mean_angle,
            self.direction.min_deviation_sample,
            self.direction.max_deviation_sample,
            self.direction.spread,
            verdict_word(self.direction.is_favorable)
        )?;
        writeln!(
            f,
            "Wind speed: {:.1} {} (min {:.1}, max {:.1}, spread {:.1}) {}",
            self.speed.average,
            self.speed.unit,
            self.speed.min,
            self.speed.max,
            self.speed.spread,
            verdict_word(self.speed.is_favorable)
        )?;
        write!(
            f,
            "Conditions are {} for kitesurfing!!!",
            verdict_word(self.is_favorable)
        )
    }
}
