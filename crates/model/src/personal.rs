use {
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// A donor's personal data as collected by the wizard's data step.
///
/// Everything is a plain string except the birth date; `document` holds the
/// unmasked national ID digits.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PersonalData {
    pub name: String,
    pub email: String,
    pub document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: String,
    #[serde(default)]
    pub address: Address,
}

/// Postal address fields, aligned with what the address-lookup service
/// returns plus the donor-entered number and complement.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl PersonalData {
    /// Donor-facing labels of the identity fields that are still empty.
    /// Every payment request needs all three, whatever the donation kind.
    pub fn missing_identity_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("e-mail");
        }
        if self.name.trim().is_empty() {
            missing.push("nome");
        }
        if self.document.trim().is_empty() {
            missing.push("CPF");
        }
        missing
    }
}
