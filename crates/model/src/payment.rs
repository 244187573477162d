use {
    serde::{Deserialize, Serialize},
    strum::{AsRefStr, EnumString},
};

/// The payment instrument selected in the wizard's payment step.
///
/// Modelled as a tagged union so that flow code branching on the instrument
/// is checked for exhaustiveness; exactly the fields of the selected variant
/// exist, there is no "other half left blank".
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "payment_method", rename_all = "snake_case")]
pub enum PaymentInstrument {
    CreditCard(CardData),
    #[serde(rename = "debit")]
    BankDebit(DebitData),
}

impl PaymentInstrument {
    pub fn method(&self) -> PaymentMethod {
        match self {
            Self::CreditCard(_) => PaymentMethod::CreditCard,
            Self::BankDebit(_) => PaymentMethod::Debit,
        }
    }
}

/// Discriminant of [`PaymentInstrument`], used where only the selection
/// matters and not the instrument's fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Debit,
}

impl PaymentMethod {
    /// Donor-facing label used in the local donation history.
    pub fn history_label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Cartão de crédito",
            Self::Debit => "Débito em conta",
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CardData {
    pub holder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DebitData {
    pub bank_code: String,
    pub branch_number: String,
    pub branch_digit: String,
    pub account_number: String,
    pub account_digit: String,
    pub account_type: String,
    pub debit_day: DebitDay,
}

/// Day of month a recurring bank debit runs on. The backend only accepts
/// this fixed set, so other days are unrepresentable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum DebitDay {
    #[default]
    #[serde(rename = "5")]
    Day5,
    #[serde(rename = "10")]
    Day10,
    #[serde(rename = "15")]
    Day15,
    #[serde(rename = "20")]
    Day20,
    #[serde(rename = "25")]
    Day25,
}

impl DebitDay {
    pub fn day_of_month(&self) -> u8 {
        match self {
            Self::Day5 => 5,
            Self::Day10 => 10,
            Self::Day15 => 15,
            Self::Day20 => 20,
            Self::Day25 => 25,
        }
    }
}
