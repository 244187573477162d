use {
    model::{DonationKind, PersonalData},
    rust_decimal::Decimal,
    serde::Deserialize,
};

/// One donor-personal field the data step can require.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Email,
    Document,
    Phone,
    BirthDate,
    Gender,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    PostalCode,
    Country,
}

impl PersonalField {
    pub fn is_present(&self, personal: &PersonalData) -> bool {
        let filled = |value: &str| !value.trim().is_empty();
        match self {
            Self::Name => filled(&personal.name),
            Self::Email => filled(&personal.email),
            Self::Document => filled(&personal.document),
            Self::Phone => filled(&personal.phone),
            Self::BirthDate => personal.birth_date.is_some(),
            Self::Gender => filled(&personal.gender),
            Self::Street => filled(&personal.address.street),
            Self::Number => filled(&personal.address.number),
            Self::Complement => filled(&personal.address.complement),
            Self::Neighborhood => filled(&personal.address.neighborhood),
            Self::City => filled(&personal.address.city),
            Self::State => filled(&personal.address.state),
            Self::PostalCode => filled(&personal.address.postal_code),
            Self::Country => filled(&personal.address.country),
        }
    }

    /// Donor-facing field name used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Email => "e-mail",
            Self::Document => "CPF",
            Self::Phone => "telefone",
            Self::BirthDate => "data de nascimento",
            Self::Gender => "gênero",
            Self::Street => "rua",
            Self::Number => "número",
            Self::Complement => "complemento",
            Self::Neighborhood => "bairro",
            Self::City => "cidade",
            Self::State => "estado",
            Self::PostalCode => "CEP",
            Self::Country => "país",
        }
    }
}

/// Wizard parameters for one donation kind.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KindRules {
    pub min_value: Decimal,
    /// Suggested amounts offered as one-tap choices in the value step.
    pub preset_values: Vec<Decimal>,
    pub required_personal_fields: Vec<PersonalField>,
}

/// The flow configuration table: minimum and suggested values plus required
/// personal fields per donation kind, in one place.
///
/// Every wizard entry point reads this table, so the minimums cannot drift
/// between flows. Deployments may override it from TOML.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlowRules {
    pub sponsorship: KindRules,
    pub donate: KindRules,
    pub recurrent: KindRules,
}

impl FlowRules {
    pub fn for_kind(&self, kind: DonationKind) -> &KindRules {
        match kind {
            DonationKind::Sponsorship => &self.sponsorship,
            DonationKind::Donate => &self.donate,
            DonationKind::Recurrent => &self.recurrent,
        }
    }
}

const REQUIRED_PERSONAL_FIELDS: &[PersonalField] = &[
    PersonalField::Name,
    PersonalField::Email,
    PersonalField::Document,
    PersonalField::Phone,
    PersonalField::BirthDate,
    PersonalField::PostalCode,
    PersonalField::Street,
    PersonalField::Number,
    PersonalField::Neighborhood,
    PersonalField::City,
    PersonalField::State,
];

impl Default for FlowRules {
    fn default() -> Self {
        Self {
            sponsorship: KindRules {
                min_value: Decimal::from(74),
                preset_values: presets([74]),
                required_personal_fields: REQUIRED_PERSONAL_FIELDS.to_vec(),
            },
            donate: KindRules {
                // One-off donations have been gated at 1, at 20 and not at
                // all by different entry points over time; 20 is the
                // strictest value that shipped.
                // TODO: confirm the intended one-off minimum with product.
                min_value: Decimal::from(20),
                preset_values: presets([20, 50, 100, 200]),
                required_personal_fields: REQUIRED_PERSONAL_FIELDS.to_vec(),
            },
            recurrent: KindRules {
                min_value: Decimal::from(20),
                preset_values: presets([20, 40, 74]),
                required_personal_fields: REQUIRED_PERSONAL_FIELDS.to_vec(),
            },
        }
    }
}

fn presets<const N: usize>(values: [u32; N]) -> Vec<Decimal> {
    values.into_iter().map(Decimal::from).collect()
}
