use {
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    strum::{AsRefStr, EnumString},
};

/// What the donor is setting up: a one-off gift, a recurring gift, or a
/// child sponsorship.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DonationKind {
    Sponsorship,
    #[default]
    Donate,
    Recurrent,
}

impl DonationKind {
    /// The `donate_type` value the donor backend expects.
    ///
    /// The backend only distinguishes sponsorship-shaped from one-off-shaped
    /// donations, so recurring gifts are submitted as `sponsorship`. The
    /// donor-selected kind is preserved separately (see
    /// [`DonationKind::history_label`]).
    pub fn donate_type(&self) -> &'static str {
        match self {
            Self::Sponsorship | Self::Recurrent => "sponsorship",
            Self::Donate => "donate",
        }
    }

    /// Label recorded in the donor's local donation history.
    pub fn history_label(&self) -> &'static str {
        match self {
            Self::Sponsorship => "sponsorship",
            Self::Donate => "single",
            Self::Recurrent => "recurrent",
        }
    }

    /// Donor-facing description shown in the donation history.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sponsorship => "Apadrinhamento",
            Self::Donate => "Doação única",
            Self::Recurrent => "Doação recorrente",
        }
    }
}

/// The donation parameters accumulated by the wizard's value step.
///
/// Backend-shaped projections of these fields (`donate_type`, the
/// `child_id` list) are derived when a payment request is built, not stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DonationFields {
    pub kind: DonationKind,
    pub value: Decimal,
    /// Sponsored child, required when `kind` is [`DonationKind::Sponsorship`].
    pub child_id: Option<String>,
    pub campaign: Option<String>,
    pub collaborator: Option<String>,
}
