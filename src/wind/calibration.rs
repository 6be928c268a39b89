//! Calibration thresholds for the kitesurf condition check

use serde::{Deserialize, Serialize};

use super::circular::is_angle_in_arc;
use crate::{KiteCheckError, Result};

/// Conversion factor from metres per second to knots
pub const MPS_TO_KNOTS: f64 = 1.943844;

/// Thresholds a wind window is judged against.
///
/// The onshore arc `[ne_limit, sw_limit]` is the range of directions that blow
/// from the sea onto the beach. Speed limits are in knots; `knots_per_unit`
/// converts the unit the samples were measured in to knots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    ne_limit: f64,
    sw_limit: f64,
    min_knots: f64,
    max_knots: f64,
    knots_per_unit: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            ne_limit: 50.0,
            sw_limit: 230.0,
            min_knots: 7.0,
            max_knots: 28.0,
            knots_per_unit: MPS_TO_KNOTS,
        }
    }
}

impl Calibration {
    /// Create a validated calibration
    pub fn new(
        ne_limit: f64,
        sw_limit: f64,
        min_knots: f64,
        max_knots: f64,
        knots_per_unit: f64,
    ) -> Result<Self> {
        let calibration = Self {
            ne_limit,
            sw_limit,
            min_knots,
            max_knots,
            knots_per_unit,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    #[must_use]
    pub fn ne_limit(&self) -> f64 {
        self.ne_limit
    }

    #[must_use]
    pub fn sw_limit(&self) -> f64 {
        self.sw_limit
    }

    #[must_use]
    pub fn min_knots(&self) -> f64 {
        self.min_knots
    }

    #[must_use]
    pub fn max_knots(&self) -> f64 {
        self.max_knots
    }

    #[must_use]
    pub fn knots_per_unit(&self) -> f64 {
        self.knots_per_unit
    }

    /// Check that all thresholds are usable
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("ne_limit", self.ne_limit),
            ("sw_limit", self.sw_limit),
            ("min_knots", self.min_knots),
            ("max_knots", self.max_knots),
            ("knots_per_unit", self.knots_per_unit),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(KiteCheckError::config(format!(
                "Calibration value '{name}' must be a finite number"
            )));
        }

        for (name, limit) in [("ne_limit", self.ne_limit), ("sw_limit", self.sw_limit)] {
            if !(0.0..=360.0).contains(&limit) {
                return Err(KiteCheckError::config(format!(
                    "Calibration value '{name}' must be between 0 and 360 degrees, got {limit}"
                )));
            }
        }

        if self.min_knots < 0.0 {
            return Err(KiteCheckError::config(
                "Minimum wind speed cannot be negative",
            ));
        }

        if self.min_knots > self.max_knots {
            return Err(KiteCheckError::config(format!(
                "Minimum wind speed ({} kn) exceeds maximum wind speed ({} kn)",
                self.min_knots, self.max_knots
            )));
        }

        if self.knots_per_unit <= 0.0 {
            return Err(KiteCheckError::config(
                "Speed conversion factor must be positive",
            ));
        }

        Ok(())
    }

    /// Whether a direction falls inside the onshore arc (limits inclusive)
    #[must_use]
    pub fn is_onshore(&self, angle: f64) -> bool {
        is_angle_in_arc(angle, self.ne_limit, self.sw_limit)
    }

    /// Whether an average speed in knots lies within the limits (inclusive)
    #[must_use]
    pub fn is_speed_in_range(&self, knots: f64) -> bool {
        knots >= self.min_knots && knots <= self.max_knots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_calibration_is_valid() {
        let calibration = Calibration::default();
        assert!(calibration.validate().is_ok());
        assert_eq!(calibration.ne_limit(), 50.0);
        assert_eq!(calibration.sw_limit(), 230.0);
        assert_eq!(calibration.knots_per_unit(), MPS_TO_KNOTS);
    }

    #[rstest]
    #[case(50.0, 230.0, 30.0, 10.0, 1.0, "exceeds maximum")]
    #[case(50.0, 400.0, 7.0, 28.0, 1.0, "between 0 and 360")]
    #[case(-5.0, 230.0, 7.0, 28.0, 1.0, "between 0 and 360")]
    #[case(50.0, 230.0, -1.0, 28.0, 1.0, "cannot be negative")]
    #[case(50.0, 230.0, 7.0, 28.0, 0.0, "must be positive")]
    #[case(f64::NAN, 230.0, 7.0, 28.0, 1.0, "finite")]
    fn test_invalid_calibration(
        #[case] ne: f64,
        #[case] sw: f64,
        #[case] min: f64,
        #[case] max: f64,
        #[case] factor: f64,
        #[case] expected: &str,
    ) {
        let err = Calibration::new(ne, sw, min, max, factor).unwrap_err();
        assert!(matches!(err, KiteCheckError::Config { .. }));
        assert!(err.to_string().contains(expected), "got: {err}");
    }

    #[test]
    fn test_equal_speed_limits_are_accepted() {
        assert!(Calibration::new(50.0, 230.0, 12.0, 12.0, 1.0).is_ok());
    }

    #[rstest]
    #[case(50.0, true)]
    #[case(230.0, true)]
    #[case(140.0, true)]
    #[case(49.9, false)]
    #[case(230.1, false)]
    #[case(0.0, false)]
    fn test_onshore_arc_is_inclusive(#[case] angle: f64, #[case] onshore: bool) {
        assert_eq!(Calibration::default().is_onshore(angle), onshore);
    }

    #[rstest]
    #[case(0.0)]
    #[case(90.0)]
    #[case(180.0)]
    #[case(270.0)]
    #[case(359.0)]
    fn test_full_circle_calibration_vetoes_every_direction(#[case] angle: f64) {
        let calibration = Calibration::new(0.0, 360.0, 7.0, 28.0, 1.0).unwrap();
        assert!(calibration.is_onshore(angle));
    }

    #[test]
    fn test_speed_limits_are_inclusive() {
        let calibration = Calibration::default();
        assert!(calibration.is_speed_in_range(7.0));
        assert!(calibration.is_speed_in_range(28.0));
        assert!(!calibration.is_speed_in_range(6.99));
        assert!(!calibration.is_speed_in_range(28.01));
    }
}
