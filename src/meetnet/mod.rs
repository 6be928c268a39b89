//! Meetnet Vlaamse Banken measurement network
//!
//! Supplies raw sample series to the condition check.

pub mod client;
pub mod models;

pub use client::MeetnetClient;
pub use models::{CurrentValue, DataResponse, PingResponse, TokenResponse};

use crate::Result;

/// Anything that can deliver a series of measurements
pub trait SampleSource {
    /// Samples of `series_id` over the last `duration_hours` hours, oldest first
    async fn fetch_samples(&self, series_id: &str, duration_hours: u32) -> Result<Vec<f64>>;

    /// Samples of several series over one shared window, in the order of
    /// `series_ids`. Sources that can fetch a window in a single request
    /// should override this.
    async fn fetch_window(&self, series_ids: &[&str], duration_hours: u32) -> Result<Vec<Vec<f64>>> {
        let mut window = Vec::with_capacity(series_ids.len());
        for series_id in series_ids {
            window.push(self.fetch_samples(series_id, duration_hours).await?);
        }
        Ok(window)
    }
}
