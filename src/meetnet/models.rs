//! Meetnet Vlaamse Banken API response structures

use serde::Deserialize;
use tracing::debug;

use crate::{KiteCheckError, Result};

/// Response of the password grant token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime of the token in seconds
    #[serde(default)]
    pub expires_in: u64,
    #[serde(rename = ".issued")]
    pub issued: Option<String>,
    #[serde(rename = ".expires")]
    pub expires: Option<String>,
}

/// Response of the ping endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PingResponse {
    pub customer: Option<Customer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub login: String,
}

impl PingResponse {
    /// The API answers pings for the logged in customer only
    #[must_use]
    pub fn is_logged_in_as(&self, username: &str) -> bool {
        self.customer
            .as_ref()
            .is_some_and(|customer| customer.login == username)
    }
}

/// Response of the data endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataResponse {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub values: Vec<SeriesData>,
}

/// Measurements of one data ID
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeriesData {
    #[serde(rename = "ID")]
    pub id: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    #[serde(default)]
    pub values: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataPoint {
    pub timestamp: String,
    pub value: Option<f64>,
}

/// Latest measurement of one data ID, as returned by the current data endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentValue {
    #[serde(rename = "ID", alias = "DataId")]
    pub id: String,
    pub timestamp: String,
    pub value: Option<f64>,
}

impl CurrentValue {
    /// Pick the entries of the requested series, in the requested order
    #[must_use]
    pub fn select<'a>(current: &'a [CurrentValue], series_ids: &[&str]) -> Vec<&'a CurrentValue> {
        series_ids
            .iter()
            .filter_map(|series_id| current.iter().find(|value| value.id == *series_id))
            .collect()
    }
}

impl DataResponse {
    /// Values of one series in measurement order. A series that is missing or
    /// has no values is invalid input for the evaluation.
    pub fn samples(&self, series_id: &str) -> Result<Vec<f64>> {
        let series = self
            .values
            .iter()
            .find(|series| series.id == series_id)
            .ok_or_else(|| {
                KiteCheckError::invalid_input(format!("series {series_id} missing from response"))
            })?;

        let samples: Vec<f64> = series.values.iter().filter_map(|point| point.value).collect();
        let skipped = series.values.len() - samples.len();
        if skipped > 0 {
            debug!("Skipped {} empty values in series {}", skipped, series_id);
        }

        if samples.is_empty() {
            return Err(KiteCheckError::invalid_input(format!(
                "series {series_id} returned no samples"
            )));
        }

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_RESPONSE: &str = r#"{
        "StartTime": "2021-04-05T05:47:51+00:00",
        "EndTime": "2021-04-05T07:47:51+00:00",
        "Intervals": [],
        "Values": [
            {
                "ID": "NP7WRS",
                "StartTime": "2021-04-05T05:47:51+00:00",
                "EndTime": "2021-04-05T07:47:51+00:00",
                "MinValue": 281.0,
                "MaxValue": 302.0,
                "Values": [
                    {"Timestamp": "2021-04-05T06:00:00+00:00", "Value": 281.0},
                    {"Timestamp": "2021-04-05T06:10:00+00:00", "Value": null},
                    {"Timestamp": "2021-04-05T06:20:00+00:00", "Value": 302.0}
                ]
            },
            {
                "ID": "NP7WVC",
                "MinValue": null,
                "MaxValue": null,
                "Values": []
            }
        ]
    }"#;

    #[test]
    fn test_token_response() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "abc", "token_type": "bearer", "expires_in": 3599,
                ".issued": "Mon, 05 Apr 2021 07:47:51 GMT", ".expires": "Mon, 05 Apr 2021 08:47:51 GMT"}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3599);
        assert_eq!(token.issued.as_deref(), Some("Mon, 05 Apr 2021 07:47:51 GMT"));
        assert_eq!(token.expires.as_deref(), Some("Mon, 05 Apr 2021 08:47:51 GMT"));
    }

    #[test]
    fn test_token_response_without_dates() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc", "expires_in": 3599}"#).unwrap();
        assert!(token.issued.is_none());
        assert!(token.expires.is_none());
    }

    #[test]
    fn test_current_data_response() {
        let current: Vec<CurrentValue> = serde_json::from_str(
            r#"[
                {"ID": "NP7WVC", "Timestamp": "2021-04-05T07:40:00+00:00", "Value": 6.2},
                {"ID": "A2BHLF", "Timestamp": "2021-04-05T07:40:00+00:00", "Value": null},
                {"DataId": "NP7WRS", "Timestamp": "2021-04-05T07:40:00+00:00", "Value": 284.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(current.len(), 3);
        assert_eq!(current[1].value, None);

        let selected = CurrentValue::select(&current, &["NP7WRS", "NP7WVC", "UNKNOWN"]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "NP7WRS");
        assert_eq!(selected[0].value, Some(284.0));
        assert_eq!(selected[1].id, "NP7WVC");
    }

    #[test]
    fn test_ping_response() {
        let ping: PingResponse = serde_json::from_str(
            r#"{"Customer": {"Login": "rider@example.com", "FirstName": "Kite"}}"#,
        )
        .unwrap();
        assert!(ping.is_logged_in_as("rider@example.com"));
        assert!(!ping.is_logged_in_as("someone@example.com"));

        let anonymous: PingResponse = serde_json::from_str(r#"{"Customer": null}"#).unwrap();
        assert!(!anonymous.is_logged_in_as("rider@example.com"));
    }

    #[test]
    fn test_samples_skip_missing_values() {
        let data: DataResponse = serde_json::from_str(DATA_RESPONSE).unwrap();
        assert_eq!(data.samples("NP7WRS").unwrap(), vec![281.0, 302.0]);
    }

    #[test]
    fn test_empty_series_is_invalid_input() {
        let data: DataResponse = serde_json::from_str(DATA_RESPONSE).unwrap();
        let err = data.samples("NP7WVC").unwrap_err();
        assert!(matches!(err, KiteCheckError::InvalidInput { .. }));
    }

    #[test]
    fn test_unknown_series_is_invalid_input() {
        let data: DataResponse = serde_json::from_str(DATA_RESPONSE).unwrap();
        let err = data.samples("A2BHLF").unwrap_err();
        assert!(err.to_string().contains("missing from response"));
    }
}
