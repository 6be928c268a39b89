//! Wind module
//!
//! Evaluates a window of wind measurements against kitesurfing criteria:
//! - Circular statistics for wind directions
//! - Onshore veto for directions blowing onto the beach
//! - Speed statistics and limits in knots
//! - Compass sector labels

pub mod calibration;
pub mod circular;
pub mod direction;
pub mod evaluator;
pub mod sector;
pub mod speed;

pub use calibration::{Calibration, MPS_TO_KNOTS};
pub use circular::{angular_deviation, circular_mean, normalize_degrees};
pub use direction::{DirectionVerdict, evaluate_direction};
pub use evaluator::{ConditionEvaluator, ConditionReport, compose_verdict};
pub use sector::sector_label;
pub use speed::{SpeedUnit, SpeedVerdict, evaluate_speed};
