use {crate::TrackError, http_client::ClientFactory, reqwest::Client, serde::Serialize, url::Url};

/// Donation event for the marketing-automation tracker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketingEvent {
    pub event_id: &'static str,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
}

impl MarketingEvent {
    pub const DONATION_COMPLETED: &'static str = "donation_completed";
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait MarketingTracking: Send + Sync {
    async fn donation_event(&self, event: &MarketingEvent) -> Result<(), TrackError>;
}

pub struct HttpMarketingTracking {
    client: Client,
    base: Url,
}

impl HttpMarketingTracking {
    pub fn new(factory: &ClientFactory, base: Url) -> Self {
        assert!(!base.cannot_be_a_base());
        Self {
            client: factory.create(),
            base,
        }
    }
}

#[async_trait::async_trait]
impl MarketingTracking for HttpMarketingTracking {
    async fn donation_event(&self, event: &MarketingEvent) -> Result<(), TrackError> {
        crate::acknowledge(&self.client, format!("{}events", self.base), event).await
    }
}
