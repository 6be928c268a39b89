use chrono::{DateTime, Duration, Utc};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use tracing::{debug, info, instrument};

use super::SampleSource;
use super::models::{CurrentValue, DataResponse, PingResponse, TokenResponse};
use crate::config::MeetnetConfig;
use crate::http::build_client;
use crate::{KiteCheckError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Authenticated session at the Meetnet Vlaamse Banken API
pub struct MeetnetClient {
    http: ClientWithMiddleware,
    base_url: String,
    username: String,
    access_token: String,
}

impl std::fmt::Debug for MeetnetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeetnetClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn token_request(
    http: &ClientWithMiddleware,
    base_url: &str,
    username: &str,
    password: &str,
) -> RequestBuilder {
    http.post(format!("{base_url}/Token")).form(&[
        ("grant_type", "password"),
        ("username", username),
        ("password", password),
    ])
}

impl MeetnetClient {
    /// Log in with the configured credentials
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub async fn login(config: &MeetnetConfig) -> Result<Self> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Err(KiteCheckError::config(
                "Meetnet username and password are required",
            ));
        };

        let http = build_client(config.timeout_seconds, config.max_retries)?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let response = token_request(&http, &base_url, username, password)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KiteCheckError::auth(format!(
                "token request returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| KiteCheckError::auth(format!("unreadable token response: {e}")))?;
        info!(
            expires_in = token.expires_in,
            issued = token.issued.as_deref().unwrap_or("unknown"),
            expires = token.expires.as_deref().unwrap_or("unknown"),
            "Logged in at Meetnet Vlaamse Banken"
        );

        Ok(Self {
            http,
            base_url,
            username: username.clone(),
            access_token: token.access_token,
        })
    }

    /// Check that the API is up and accepts our token
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<bool> {
        let response = self
            .http
            .get(format!("{}/V2/ping", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("Ping returned {}", response.status());
            return Ok(false);
        }

        let ping: PingResponse = response.json().await?;
        Ok(ping.is_logged_in_as(&self.username))
    }

    /// Latest value of every data ID the account can see
    #[instrument(skip(self))]
    pub async fn get_current_data(&self) -> Result<Vec<CurrentValue>> {
        let response = self
            .http
            .get(format!("{}/V2/currentData", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(KiteCheckError::auth("access token was rejected"));
        }
        if !status.is_success() {
            return Err(KiteCheckError::network(format!(
                "current data request returned {status}"
            )));
        }

        let current: Vec<CurrentValue> = response.json().await?;
        debug!("Received {} current values", current.len());
        Ok(current)
    }

    fn data_request(&self, from: DateTime<Utc>, till: DateTime<Utc>, ids: &[&str]) -> RequestBuilder {
        let mut form = vec![
            ("StartTime", from.format(TIMESTAMP_FORMAT).to_string()),
            ("EndTime", till.format(TIMESTAMP_FORMAT).to_string()),
        ];
        form.extend(ids.iter().map(|id| ("IDs", (*id).to_string())));

        self.http
            .post(format!("{}/V2/getData", self.base_url))
            .bearer_auth(&self.access_token)
            .form(&form)
    }

    /// Fetch measurements of the given data IDs between two instants
    #[instrument(skip(self))]
    pub async fn get_data(
        &self,
        from: DateTime<Utc>,
        till: DateTime<Utc>,
        ids: &[&str],
    ) -> Result<DataResponse> {
        let response = self.data_request(from, till, ids).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(KiteCheckError::auth("access token was rejected"));
        }
        if !status.is_success() {
            return Err(KiteCheckError::network(format!(
                "data request returned {status}"
            )));
        }

        let data: DataResponse = response.json().await?;
        debug!("Received {} series", data.values.len());
        Ok(data)
    }

    /// Fetch the last `hours` hours of measurements
    pub async fn get_data_last_hours(&self, hours: u32, ids: &[&str]) -> Result<DataResponse> {
        let till = Utc::now();
        let from = till - Duration::hours(i64::from(hours));
        self.get_data(from, till, ids).await
    }
}

impl SampleSource for MeetnetClient {
    async fn fetch_samples(&self, series_id: &str, duration_hours: u32) -> Result<Vec<f64>> {
        self.get_data_last_hours(duration_hours, &[series_id])
            .await?
            .samples(series_id)
    }

    async fn fetch_window(&self, series_ids: &[&str], duration_hours: u32) -> Result<Vec<Vec<f64>>> {
        let data = self.get_data_last_hours(duration_hours, series_ids).await?;
        series_ids
            .iter()
            .map(|series_id| data.samples(series_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

    fn test_client() -> MeetnetClient {
        MeetnetClient {
            http: build_client(30, 0).unwrap(),
            base_url: "https://api.example.test".to_string(),
            username: "rider@example.com".to_string(),
            access_token: "token123".to_string(),
        }
    }

    fn body(request: &reqwest::Request) -> &str {
        let bytes = request.body().and_then(|body| body.as_bytes()).unwrap();
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_token_request_is_password_grant_form() {
        let http = build_client(30, 0).unwrap();
        let request = token_request(&http, "https://api.example.test", "rider@example.com", "a b&c")
            .build()
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://api.example.test/Token");
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            body(&request),
            "grant_type=password&username=rider%40example.com&password=a+b%26c"
        );
    }

    #[test]
    fn test_data_request_sends_one_window_for_all_ids() {
        let client = test_client();
        let from = Utc.with_ymd_and_hms(2021, 4, 5, 5, 47, 51).unwrap();
        let till = Utc.with_ymd_and_hms(2021, 4, 5, 7, 47, 51).unwrap();

        let request = client
            .data_request(from, till, &["NP7WRS", "NP7WVC"])
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://api.example.test/V2/getData");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer token123");
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            body(&request),
            "StartTime=2021-04-05T05%3A47%3A51Z&EndTime=2021-04-05T07%3A47%3A51Z&IDs=NP7WRS&IDs=NP7WVC"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", test_client());
        assert!(debug.contains("rider@example.com"));
        assert!(!debug.contains("token123"));
    }
}
