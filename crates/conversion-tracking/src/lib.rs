//! Clients for the post-payment notification services.
//!
//! Three external services learn about a confirmed donation: the analytics
//! collector, the CRM conversion endpoint, and the marketing-automation
//! tracker. None of them is ever allowed to affect the payment outcome;
//! [`dispatch::SideEffects`] runs them best-effort after the success has
//! been committed.

pub mod analytics;
pub mod conversion;
pub mod dispatch;
pub mod marketing;

pub use {
    analytics::{AnalyticsEvent, AnalyticsTracking, HttpAnalyticsTracking},
    conversion::{ContactSync, ConversionEvent, ConversionTracking, HttpConversionTracking},
    dispatch::SideEffects,
    marketing::{HttpMarketingTracking, MarketingEvent, MarketingTracking},
};

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("tracker returned {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Sends `payload` as JSON and checks for an acknowledging status. Response
/// bodies are ignored; the trackers only acknowledge.
pub(crate) async fn acknowledge<T: serde::Serialize + Sync>(
    client: &reqwest::Client,
    url: String,
    payload: &T,
) -> Result<(), TrackError> {
    let response = client.post(url).json(payload).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TrackError::Status(status));
    }
    Ok(())
}
