//! One kitesurf check cycle: fetch, evaluate, notify

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::config::MeetnetConfig;
use crate::meetnet::SampleSource;
use crate::notify::{Notification, Notifier};
use crate::wind::{ConditionEvaluator, ConditionReport, SpeedUnit};
use crate::{KiteCheckError, Result};

/// Which series to fetch and over how long a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    pub direction_series: String,
    pub speed_series: String,
    pub window_hours: u32,
}

impl From<&MeetnetConfig> for CheckSettings {
    fn from(config: &MeetnetConfig) -> Self {
        Self {
            direction_series: config.direction_series.clone(),
            speed_series: config.speed_series.clone(),
            window_hours: config.window_hours,
        }
    }
}

/// Result of one check cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Conditions are good and the rider was notified
    Notified { report: ConditionReport },
    /// Conditions are good but no notifier was given (dry run)
    Favorable { report: ConditionReport },
    NotFavorable { report: ConditionReport },
    /// No verdict: data could not be fetched or did not allow an evaluation
    Skipped { reason: String },
}

impl CheckOutcome {
    #[must_use]
    pub fn is_favorable(&self) -> bool {
        matches!(
            self,
            CheckOutcome::Notified { .. } | CheckOutcome::Favorable { .. }
        )
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Notified { report } => write!(f, "{report}\nNotification sent."),
            CheckOutcome::Favorable { report } | CheckOutcome::NotFavorable { report } => {
                write!(f, "{report}")
            }
            CheckOutcome::Skipped { reason } => write!(f, "Check skipped: {reason}"),
        }
    }
}

/// Run one check. Both series are fetched over one shared window; a failed
/// or empty fetch skips the evaluation. Only a favorable verdict reaches the
/// notifier, and it is called at most once.
pub async fn run_check<S, N>(
    source: &S,
    notifier: Option<&N>,
    settings: &CheckSettings,
    evaluator: &ConditionEvaluator,
) -> Result<CheckOutcome>
where
    S: SampleSource,
    N: Notifier,
{
    let series = [
        settings.direction_series.as_str(),
        settings.speed_series.as_str(),
    ];
    let window = match source.fetch_window(&series, settings.window_hours).await {
        Ok(window) => window,
        Err(e) => return Ok(skipped(&series, e)),
    };
    let [direction_samples, speed_samples] = <[Vec<f64>; 2]>::try_from(window).map_err(|window| {
        KiteCheckError::invalid_input(format!(
            "expected 2 series in the window, got {}",
            window.len()
        ))
    })?;

    let report = match evaluator.evaluate(&direction_samples, &speed_samples, SpeedUnit::Knots) {
        Ok(report) => report,
        Err(KiteCheckError::InvalidInput { message }) => {
            warn!("Conditions cannot be evaluated: {}", message);
            return Ok(CheckOutcome::Skipped { reason: message });
        }
        Err(e) => return Err(e),
    };

    if !report.is_favorable {
        info!("Conditions are not favorable for kitesurfing");
        return Ok(CheckOutcome::NotFavorable { report });
    }

    info!("Conditions are favorable for kitesurfing");
    let Some(notifier) = notifier else {
        return Ok(CheckOutcome::Favorable { report });
    };

    let notification = Notification {
        direction: report.sector.clone(),
        speed_knots: report.speed.average,
    };
    notifier.notify(&notification).await?;

    Ok(CheckOutcome::Notified { report })
}

fn skipped(series: &[&str], error: KiteCheckError) -> CheckOutcome {
    let series = series.join(", ");
    warn!("Fetching series {} failed: {}", series, error);
    CheckOutcome::Skipped {
        reason: format!("series {series}: {error}"),
    }
}
