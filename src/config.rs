//! Configuration management for `KiteCheck`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::KiteCheckError;
use crate::wind::Calibration;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `KiteCheck`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KiteCheckConfig {
    /// Measurement network API configuration
    pub meetnet: MeetnetConfig,
    /// Thresholds the wind window is judged against
    pub calibration: Calibration,
    /// Webhook configuration
    pub notification: NotificationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Meetnet Vlaamse Banken API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetnetConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Login name
    pub username: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Data ID of the wind direction series
    pub direction_series: String,
    /// Data ID of the wind speed series
    pub speed_series: String,
    /// Length of the evaluated window in hours
    pub window_hours: u32,
}

/// Webhook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Base URL of the webhook service
    pub base_url: String,
    /// Event name that triggers the applet
    pub event: String,
    /// Webhook key; notifications are disabled without it
    pub key: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_meetnet_base_url() -> String {
    "https://api.meetnetvlaamsebanken.be".to_string()
}

fn default_meetnet_timeout() -> u32 {
    30
}

fn default_meetnet_max_retries() -> u32 {
    3
}

fn default_direction_series() -> String {
    "NP7WRS".to_string()
}

fn default_speed_series() -> String {
    "NP7WVC".to_string()
}

fn default_window_hours() -> u32 {
    2
}

fn default_webhook_base_url() -> String {
    "https://maker.ifttt.com".to_string()
}

fn default_webhook_event() -> String {
    "KiteSurfCheck".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MeetnetConfig {
    fn default() -> Self {
        Self {
            base_url: default_meetnet_base_url(),
            username: None,
            password: None,
            timeout_seconds: default_meetnet_timeout(),
            max_retries: default_meetnet_max_retries(),
            direction_series: default_direction_series(),
            speed_series: default_speed_series(),
            window_hours: default_window_hours(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            base_url: default_webhook_base_url(),
            event: default_webhook_event(),
            key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl KiteCheckConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. KITECHECK_MEETNET__PASSWORD
        builder = builder.add_source(
            Environment::with_prefix("KITECHECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: KiteCheckConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Configuration file used when no path is given
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("kitecheck.toml")
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.meetnet.base_url.is_empty() {
            self.meetnet.base_url = default_meetnet_base_url();
        }
        if self.meetnet.timeout_seconds == 0 {
            self.meetnet.timeout_seconds = default_meetnet_timeout();
        }
        if self.meetnet.direction_series.is_empty() {
            self.meetnet.direction_series = default_direction_series();
        }
        if self.meetnet.speed_series.is_empty() {
            self.meetnet.speed_series = default_speed_series();
        }
        if self.meetnet.window_hours == 0 {
            self.meetnet.window_hours = default_window_hours();
        }
        if self.notification.base_url.is_empty() {
            self.notification.base_url = default_webhook_base_url();
        }
        if self.notification.event.is_empty() {
            self.notification.event = default_webhook_event();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Check that login credentials are present, needed for fetching data
    pub fn validate_credentials(&self) -> Result<()> {
        match (&self.meetnet.username, &self.meetnet.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(())
            }
            _ => Err(KiteCheckError::config(
                "Meetnet username and password are required. Set meetnet.username and meetnet.password \
                 or KITECHECK_MEETNET__USERNAME and KITECHECK_MEETNET__PASSWORD.",
            )
            .into()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.meetnet.timeout_seconds > 300 {
            return Err(KiteCheckError::config(
                "Meetnet API timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.meetnet.max_retries > 10 {
            return Err(KiteCheckError::config(
                "Meetnet API max retries cannot exceed 10"
            ).into());
        }

        if self.meetnet.window_hours > 168 {
            return Err(KiteCheckError::config(
                "Measurement window cannot exceed 168 hours (1 week)"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(KiteCheckError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(KiteCheckError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        for (name, url) in [
            ("Meetnet API", &self.meetnet.base_url),
            ("Webhook", &self.notification.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(KiteCheckError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(key) = &self.notification.key {
            if key.is_empty() {
                return Err(KiteCheckError::config(
                    "Webhook key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }
        }

        Ok(())
    }
}
