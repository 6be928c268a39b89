//! `KiteCheck` - kitesurf condition checker
//!
//! This library evaluates wind measurements from the Meetnet Vlaamse Banken
//! network against kitesurfing criteria and announces good conditions
//! through a webhook.

pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod meetnet;
pub mod notify;
pub mod wind;

// Re-export core types for public API
pub use check::{CheckOutcome, CheckSettings, run_check};
pub use config::KiteCheckConfig;
pub use error::KiteCheckError;
pub use meetnet::{MeetnetClient, SampleSource};
pub use notify::{Notification, Notifier, WebhookNotifier};
pub use wind::{
    Calibration, ConditionEvaluator, ConditionReport, DirectionVerdict, SpeedUnit, SpeedVerdict,
    circular_mean, compose_verdict, evaluate_direction, evaluate_speed, sector_label,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, KiteCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
