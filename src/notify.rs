//! Webhook notifications

use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::Serialize;
use tracing::info;

use crate::config::NotificationConfig;
use crate::http::build_client;
use crate::{KiteCheckError, Result};

/// What is announced when conditions are good
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Compass sector of the mean wind direction
    pub direction: String,
    /// Average wind speed in knots
    pub speed_knots: f64,
}

impl Notification {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Let's go kitesurfing!! \nWind direction: {} \nWind speed: {:.0} knots",
            self.direction, self.speed_knots
        )
    }
}

/// Delivers notifications to the rider
pub trait Notifier {
    async fn notify(&self, notification: &Notification) -> Result<()>;
}

/// IFTTT style maker webhook
pub struct WebhookNotifier {
    http: ClientWithMiddleware,
    trigger_url: String,
}

impl WebhookNotifier {
    /// Create a notifier; the webhook key is required
    pub fn new(config: &NotificationConfig, timeout_seconds: u32) -> Result<Self> {
        let key = config
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| KiteCheckError::config("Webhook key is not configured"))?;

        Ok(Self {
            // Sent at most once
            http: build_client(timeout_seconds, 0)?,
            trigger_url: trigger_url(&config.base_url, &config.event, key),
        })
    }

    fn trigger_request(&self, notification: &Notification) -> RequestBuilder {
        self.http
            .post(&self.trigger_url)
            .form(&[("value1", notification.message())])
    }
}

fn trigger_url(base_url: &str, event: &str, key: &str) -> String {
    format!(
        "{}/trigger/{}/with/key/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(event),
        urlencoding::encode(key)
    )
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let response = self.trigger_request(notification).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KiteCheckError::notification(format!(
                "webhook returned {status}"
            )));
        }

        info!(
            direction = %notification.direction,
            speed_knots = notification.speed_knots,
            "Sent kitesurf notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_rounds_to_whole_knots() {
        let notification = Notification {
            direction: "WSW".to_string(),
            speed_knots: 11.663,
        };
        assert_eq!(
            notification.message(),
            "Let's go kitesurfing!! \nWind direction: WSW \nWind speed: 12 knots"
        );
    }

    #[test]
    fn test_trigger_url() {
        assert_eq!(
            trigger_url("https://maker.ifttt.com/", "KiteSurfCheck", "abc123"),
            "https://maker.ifttt.com/trigger/KiteSurfCheck/with/key/abc123"
        );
    }

    #[test]
    fn test_notifier_requires_key() {
        let config = NotificationConfig::default();
        let err = WebhookNotifier::new(&config, 30).err().unwrap();
        assert!(matches!(err, KiteCheckError::Config { .. }));
    }

    #[test]
    fn test_notifier_with_key() {
        let config = NotificationConfig {
            key: Some("abc123".to_string()),
            ..NotificationConfig::default()
        };
        assert!(WebhookNotifier::new(&config, 30).is_ok());
    }

    #[test]
    fn test_trigger_request_posts_message_as_value1() {
        let config = NotificationConfig {
            key: Some("abc123".to_string()),
            ..NotificationConfig::default()
        };
        let notifier = WebhookNotifier::new(&config, 30).unwrap();
        let notification = Notification {
            direction: "WSW".to_string(),
            speed_knots: 11.663,
        };

        let request = notifier.trigger_request(&notification).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://maker.ifttt.com/trigger/KiteSurfCheck/with/key/abc123"
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|body| body.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "value1=Let%27s+go+kitesurfing%21%21+%0AWind+direction%3A+WSW+%0AWind+speed%3A+12+knots"
        );
    }
}
