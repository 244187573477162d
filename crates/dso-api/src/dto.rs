//! Wire shapes of the donor-management backend.
//!
//! Monetary values go out as JSON numbers (the backend's contract), while
//! everything the donor typed stays a string. The payment requests flatten
//! the instrument fields into the top-level object the way the backend
//! expects them.

use {
    chrono::NaiveDate,
    model::{Address, CardData, DebitData, PaymentInstrument, PersonalData},
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// Bearer token returned by [`authenticate`](crate::DonorApi::authenticate)
/// and required by every donor-scoped call.
#[derive(Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Whole requests get debug-logged; the token must not.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Clone, Serialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AuthResponse {
    pub access_token: AccessToken,
}

/// The donor profile as the backend stores it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct DonorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: Address,
}

impl From<DonorProfile> for PersonalData {
    fn from(profile: DonorProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            document: profile.document,
            phone: profile.phone,
            birth_date: profile.birth_date,
            gender: profile.gender,
            address: profile.address,
        }
    }
}

/// Partial profile update; only the populated fields are sent.
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Search parameters for looking a donor up by document or email.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DonorQuery {
    pub document: Option<String>,
    pub email: Option<String>,
}

impl DonorQuery {
    pub fn by_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct DonorSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub document: String,
}

/// Creates the donor and runs the first payment in one call. Used for
/// donors without an account; carries the full personal data and address
/// next to the donation and instrument fields.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
pub struct CreateDonorAndPay {
    pub name: String,
    pub email: String,
    pub document: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gender: String,
    pub address: Address,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub donate_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    #[serde(flatten)]
    pub instrument: PaymentInstrument,
}

/// Charges an existing donor's card. Donor identity comes from the bearer
/// token, so only the donation and card fields travel.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
pub struct ChargeCard {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub donate_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    #[serde(flatten)]
    pub card: CardData,
}

/// Registers a recurring bank debit for an existing donor.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
pub struct RegisterDebit {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub donate_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    #[serde(flatten)]
    pub debit: DebitData,
}

/// Outcome of any of the three payment calls.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct TransactionResult {
    pub transaction_id: String,
    pub status: String,
    /// Set when the call created the donor account along with the payment.
    #[serde(default)]
    pub donor_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
