use {
    crate::TrackError,
    http_client::ClientFactory,
    reqwest::Client,
    rust_decimal::Decimal,
    serde::Serialize,
    url::Url,
};

/// Donation conversion reported to the CRM.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversionEvent {
    pub event_type: &'static str,
    pub transaction_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
}

impl ConversionEvent {
    pub const DONATION: &'static str = "donation";
}

/// Contact payload for the best-effort CRM sync that keeps the donor's
/// contact data fresh after a payment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactSync {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document: String,
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ConversionTracking: Send + Sync {
    async fn donation_conversion(&self, event: &ConversionEvent) -> Result<(), TrackError>;

    async fn sync_contact(&self, contact: &ContactSync) -> Result<(), TrackError>;
}

pub struct HttpConversionTracking {
    client: Client,
    base: Url,
}

impl HttpConversionTracking {
    pub fn new(factory: &ClientFactory, base: Url) -> Self {
        assert!(!base.cannot_be_a_base());
        Self {
            client: factory.create(),
            base,
        }
    }
}

#[async_trait::async_trait]
impl ConversionTracking for HttpConversionTracking {
    async fn donation_conversion(&self, event: &ConversionEvent) -> Result<(), TrackError> {
        crate::acknowledge(&self.client, format!("{}conversions", self.base), event).await
    }

    async fn sync_contact(&self, contact: &ContactSync) -> Result<(), TrackError> {
        crate::acknowledge(&self.client, format!("{}contacts/sync", self.base), contact).await
    }
}
