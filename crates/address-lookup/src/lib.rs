//! Client for the external postal-code lookup service.
//!
//! The service resolves a postal code to street-level address data. Codes it
//! does not know yield `Ok(None)` so callers can distinguish "unknown code"
//! (donor keeps typing) from "service unreachable" (show an error).

use {
    reqwest::{Client, ClientBuilder, StatusCode},
    serde::Deserialize,
    std::time::Duration,
    url::Url,
};

/// Address fields resolved for a postal code.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct LookedUpAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("malformed postal code {0:?}")]
    MalformedCode(String),
    #[error("postal code service returned {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Resolves postal codes to address data.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Ok(None)` means the service does not know the code.
    async fn lookup(&self, postal_code: &str) -> Result<Option<LookedUpAddress>, LookupError>;
}

pub struct HttpAddressLookup {
    client: Client,
    base: Url,
}

/// The service responds with either the address fields or a "not found"
/// marker, both as 200 OK.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawResponse {
    Found(LookedUpAddress),
    Miss {
        #[allow(dead_code)]
        error: bool,
    },
}

impl HttpAddressLookup {
    /// The lookup runs while the donor fills the address form, so it gets a
    /// short client-side timeout instead of hanging the wizard.
    const TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(client: ClientBuilder, base: Url) -> Self {
        assert!(!base.cannot_be_a_base());
        Self {
            client: client.timeout(Self::TIMEOUT).build().unwrap(),
            base,
        }
    }
}

#[async_trait::async_trait]
impl AddressLookup for HttpAddressLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<LookedUpAddress>, LookupError> {
        let code = field_validation::postal_code::unmask(postal_code);
        if !field_validation::postal_code::is_valid(&code) {
            return Err(LookupError::MalformedCode(postal_code.to_string()));
        }
        let url = format!("{}addresses/{code}", self.base);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        match status {
            StatusCode::OK => match response.json::<RawResponse>().await? {
                RawResponse::Found(address) => Ok(Some(address)),
                RawResponse::Miss { .. } => {
                    tracing::debug!(%code, "postal code not known to lookup service");
                    Ok(None)
                }
            },
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(LookupError::Status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_address_response() {
        let raw = r#"{
            "street": "Rua Augusta",
            "neighborhood": "Consolação",
            "city": "São Paulo",
            "state": "SP"
        }"#;
        let address: LookedUpAddress = serde_json::from_str(raw).unwrap();
        assert_eq!(
            address,
            LookedUpAddress {
                street: "Rua Augusta".to_string(),
                neighborhood: "Consolação".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            }
        );
    }

    #[test]
    fn distinguishes_miss_marker_from_address() {
        let miss: RawResponse = serde_json::from_str(r#"{"error": true}"#).unwrap();
        assert!(matches!(miss, RawResponse::Miss { .. }));
        let found: RawResponse = serde_json::from_str(
            r#"{"street": "a", "neighborhood": "b", "city": "c", "state": "d"}"#,
        )
        .unwrap();
        assert!(matches!(found, RawResponse::Found(_)));
    }

    #[tokio::test]
    async fn rejects_malformed_code_without_sending() {
        // The base URL is unroutable; reaching the network would error with
        // `Http`, not `MalformedCode`.
        let lookup = HttpAddressLookup::new(
            Default::default(),
            "http://localhost:1".parse().unwrap(),
        );
        let result = lookup.lookup("123").await;
        assert!(matches!(result, Err(LookupError::MalformedCode(_))));
    }

    #[tokio::test]
    async fn accepts_masked_input() {
        let lookup = HttpAddressLookup::new(
            Default::default(),
            "http://localhost:1".parse().unwrap(),
        );
        // Well-formed masked code passes local validation and fails only at
        // the transport.
        let result = lookup.lookup("01310-100").await;
        assert!(matches!(result, Err(LookupError::Http(_))));
    }
}
