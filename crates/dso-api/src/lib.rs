//! Client for the donor-management backend ("DSO").
//!
//! The backend owns donor accounts and runs the payments. This crate covers
//! the surface the donation flows touch: authentication, profile fetch and
//! update, donor search, and the three payment operations (create donor and
//! pay, charge an existing donor's card, register a recurring bank debit).

pub mod dto;
pub mod session;

pub use session::Session;

use {
    crate::dto::{
        AccessToken,
        AuthResponse,
        ChargeCard,
        CreateDonorAndPay,
        Credentials,
        DonorProfile,
        DonorQuery,
        DonorSummary,
        ProfileUpdate,
        RegisterDebit,
        TransactionResult,
    },
    http_client::ClientFactory,
    reqwest::{Client, RequestBuilder, StatusCode},
    serde::de::DeserializeOwned,
    url::Url,
};

/// Donor-facing fallback when the backend fails without a usable message.
pub const FALLBACK_ERROR: &str = "Não foi possível concluir a operação. Tente novamente.";

#[derive(Debug, thiserror::Error)]
pub enum DsoError {
    /// The backend rejected the call; `message` is what it sent back, or the
    /// generic fallback when the body carried none.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed backend response")]
    Decode(#[source] serde_json::Error),
}

/// Abstract donor backend. Provides a mockable implementation.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait DonorApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, DsoError>;

    /// Fetches the authenticated donor's profile.
    async fn profile(&self, token: &AccessToken) -> Result<DonorProfile, DsoError>;

    /// Applies a partial update to the authenticated donor's profile.
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<(), DsoError>;

    /// Looks a donor up by document or email. `Ok(None)` means no match.
    async fn search(&self, query: &DonorQuery) -> Result<Option<DonorSummary>, DsoError>;

    /// Creates a donor account and runs the first payment in one call.
    async fn create_donor_and_pay(
        &self,
        request: &CreateDonorAndPay,
    ) -> Result<TransactionResult, DsoError>;

    /// Charges an existing donor's card.
    async fn charge_card(
        &self,
        token: &AccessToken,
        request: &ChargeCard,
    ) -> Result<TransactionResult, DsoError>;

    /// Registers a recurring bank debit for an existing donor.
    async fn register_debit(
        &self,
        token: &AccessToken,
        request: &RegisterDebit,
    ) -> Result<TransactionResult, DsoError>;
}

/// Donor backend client implementation.
pub struct HttpDonorApi {
    client: Client,
    // Payment calls run without an overall request timeout; how long a
    // charge takes is the processor's call, and aborting one client-side
    // leaves the donor unsure whether they paid.
    payment_client: Client,
    base: Url,
}

impl HttpDonorApi {
    pub fn new(factory: &ClientFactory, base: Url) -> Self {
        assert!(!base.cannot_be_a_base());
        Self {
            client: factory.create(),
            payment_client: factory.create_without_timeout(),
            base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DsoError> {
        let body = self.check(request).await?;
        serde_json::from_str(&body).map_err(DsoError::Decode)
    }

    /// Sends the request and returns the raw body, mapping non-2xx
    /// responses to [`DsoError::Api`] with the backend's message.
    async fn check(&self, request: RequestBuilder) -> Result<String, DsoError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!(%status, %body, "donor backend rejected request");
            return Err(DsoError::Api {
                status,
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

/// The backend reports failures as `{"message": ...}`; anything else maps to
/// the generic fallback the donor can act on.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(body) if !body.message.trim().is_empty() => body.message,
        _ => FALLBACK_ERROR.to_string(),
    }
}

#[async_trait::async_trait]
impl DonorApi for HttpDonorApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, DsoError> {
        let response: AuthResponse = self
            .send(self.client.post(self.url("auth")).json(credentials))
            .await?;
        Ok(response.access_token)
    }

    async fn profile(&self, token: &AccessToken) -> Result<DonorProfile, DsoError> {
        self.send(
            self.client
                .get(self.url("donors/me"))
                .bearer_auth(token.as_str()),
        )
        .await
    }

    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<(), DsoError> {
        self.check(
            self.client
                .put(self.url("donors/me"))
                .bearer_auth(token.as_str())
                .json(update),
        )
        .await?;
        Ok(())
    }

    async fn search(&self, query: &DonorQuery) -> Result<Option<DonorSummary>, DsoError> {
        let mut url =
            Url::parse(&self.url("donors")).expect("unexpectedly invalid URL segment");
        if let Some(document) = &query.document {
            url.query_pairs_mut().append_pair("document", document);
        }
        if let Some(email) = &query.email {
            url.query_pairs_mut().append_pair("email", email);
        }
        let matches: Vec<DonorSummary> = self.send(self.client.get(url)).await?;
        Ok(matches.into_iter().next())
    }

    async fn create_donor_and_pay(
        &self,
        request: &CreateDonorAndPay,
    ) -> Result<TransactionResult, DsoError> {
        tracing::debug!(value = %request.value, donate_type = %request.donate_type, "submitting donation");
        self.send(self.payment_client.post(self.url("donations")).json(request))
            .await
    }

    async fn charge_card(
        &self,
        token: &AccessToken,
        request: &ChargeCard,
    ) -> Result<TransactionResult, DsoError> {
        tracing::debug!(value = %request.value, "charging existing donor");
        self.send(
            self.payment_client
                .post(self.url("donors/me/charges"))
                .bearer_auth(token.as_str())
                .json(request),
        )
        .await
    }

    async fn register_debit(
        &self,
        token: &AccessToken,
        request: &RegisterDebit,
    ) -> Result<TransactionResult, DsoError> {
        tracing::debug!(value = %request.value, "registering recurring debit");
        self.send(
            self.payment_client
                .post(self.url("donors/me/debits"))
                .bearer_auth(token.as_str())
                .json(request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_the_backend_text() {
        assert_eq!(
            error_message(r#"{"message": "Cartão recusado"}"#),
            "Cartão recusado"
        );
        assert_eq!(error_message(r#"{"message": "  "}"#), FALLBACK_ERROR);
        assert_eq!(error_message("<html>gateway error</html>"), FALLBACK_ERROR);
        assert_eq!(error_message(""), FALLBACK_ERROR);
    }

    #[test]
    fn urls_extend_the_base() {
        let api = HttpDonorApi::new(
            &ClientFactory::default(),
            "https://dso.example.org".parse().unwrap(),
        );
        assert_eq!(api.url("donors/me"), "https://dso.example.org/donors/me");
    }

    #[tokio::test]
    async fn transport_failure_maps_to_http_error() {
        let api = HttpDonorApi::new(
            &ClientFactory::default(),
            "http://localhost:1".parse().unwrap(),
        );
        let err = api
            .search(&DonorQuery::by_email("maria@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DsoError::Http(_)));
    }
}
