//! Error types and handling for `KiteCheck`

use thiserror::Error;

/// Main error type for the `KiteCheck` application
#[derive(Error, Debug)]
pub enum KiteCheckError {
    /// Empty sample series or a statistic that is undefined for the input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration and calibration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Measurement network communication errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Login or token errors against the measurement network
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Webhook delivery errors
    #[error("Notification error: {message}")]
    Notification { message: String },
}

impl KiteCheckError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            KiteCheckError::InvalidInput { message } => {
                format!("Cannot evaluate conditions: {message}")
            }
            KiteCheckError::Config { .. } => {
                "Configuration error. Please check your config file and calibration values."
                    .to_string()
            }
            KiteCheckError::Network { .. } => {
                "Unable to reach the measurement network. Please check your internet connection."
                    .to_string()
            }
            KiteCheckError::Auth { .. } => {
                "Login at the measurement network failed. Please check username and password."
                    .to_string()
            }
            KiteCheckError::Notification { .. } => {
                "Sending the notification failed. Please check the webhook key.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for KiteCheckError {
    fn from(err: reqwest::Error) -> Self {
        KiteCheckError::network(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for KiteCheckError {
    fn from(err: reqwest_middleware::Error) -> Self {
        KiteCheckError::network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let input_err = KiteCheckError::invalid_input("empty series");
        assert!(matches!(input_err, KiteCheckError::InvalidInput { .. }));

        let config_err = KiteCheckError::config("min > max");
        assert!(matches!(config_err, KiteCheckError::Config { .. }));

        let auth_err = KiteCheckError::auth("bad password");
        assert!(matches!(auth_err, KiteCheckError::Auth { .. }));
    }

    #[test]
    fn test_display_includes_message() {
        let err = KiteCheckError::invalid_input("direction series is empty");
        assert_eq!(err.to_string(), "Invalid input: direction series is empty");
    }

    #[test]
    fn test_user_messages() {
        let config_err = KiteCheckError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let network_err = KiteCheckError::network("test");
        assert!(network_err.user_message().contains("Unable to reach"));

        let input_err = KiteCheckError::invalid_input("no dominant direction");
        assert!(input_err.user_message().contains("no dominant direction"));
    }

    #[test]
    fn test_remote_failure_user_messages() {
        let auth_err = KiteCheckError::auth("token request returned 400 Bad Request");
        assert!(auth_err.user_message().contains("username and password"));

        let notification_err = KiteCheckError::notification("webhook returned 401");
        assert!(notification_err.user_message().contains("webhook key"));
    }
}
