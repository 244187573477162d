use {
    crate::TrackError,
    http_client::ClientFactory,
    reqwest::Client,
    rust_decimal::Decimal,
    serde::Serialize,
    url::Url,
};

/// Payment-success event for the analytics collector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub donation_kind: String,
    pub payment_method: String,
    pub transaction_id: String,
}

impl AnalyticsEvent {
    pub const PAYMENT_SUCCESS: &'static str = "payment_success";
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait AnalyticsTracking: Send + Sync {
    async fn payment_succeeded(&self, event: &AnalyticsEvent) -> Result<(), TrackError>;
}

pub struct HttpAnalyticsTracking {
    client: Client,
    base: Url,
}

impl HttpAnalyticsTracking {
    pub fn new(factory: &ClientFactory, base: Url) -> Self {
        assert!(!base.cannot_be_a_base());
        Self {
            client: factory.create(),
            base,
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsTracking for HttpAnalyticsTracking {
    async fn payment_succeeded(&self, event: &AnalyticsEvent) -> Result<(), TrackError> {
        crate::acknowledge(&self.client, format!("{}collect", self.base), event).await
    }
}
