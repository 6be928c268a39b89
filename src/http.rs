//! Shared HTTP client construction

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::Result;

/// Client with a request timeout that retries transient failures
pub fn build_client(timeout_seconds: u32, max_retries: u32) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_seconds)))
        .build()?;
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_without_retries() {
        let client = build_client(5, 0).unwrap();
        let request = client.get("https://api.example.test/V2/ping").build().unwrap();
        assert_eq!(request.url().path(), "/V2/ping");
        assert!(request.timeout().is_none());
    }
}
