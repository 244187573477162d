use {
    crate::Step,
    chrono::NaiveDate,
    model::{DonationFields, PaymentInstrument, PersonalData},
    serde::{Deserialize, Serialize},
};

/// Everything the wizard accumulates, persisted after every change and
/// rehydrated on load.
///
/// Backend-shaped projections (`donate_type`, the `child_id` list, value and
/// method mirrors) are derived when the payment request is built; nothing in
/// here exists twice.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DonationState {
    #[serde(default)]
    pub personal: PersonalData,
    /// `None` until the donor picks an instrument in the payment step.
    #[serde(default)]
    pub payment: Option<PaymentInstrument>,
    #[serde(default)]
    pub donation: DonationFields,
    #[serde(default)]
    pub step: Step,
    #[serde(default)]
    pub logged_in: bool,
}

/// Partial personal-data update as the data-step form emits it; populated
/// fields overwrite, everything else stays.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PersonalUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl PersonalUpdate {
    pub(crate) fn apply(self, personal: &mut PersonalData) {
        let Self {
            name,
            email,
            document,
            phone,
            birth_date,
            gender,
            street,
            number,
            complement,
            neighborhood,
            city,
            state,
            postal_code,
            country,
        } = self;
        let address = &mut personal.address;
        for (field, value) in [
            (&mut personal.name, name),
            (&mut personal.email, email),
            (&mut personal.document, document),
            (&mut personal.phone, phone),
            (&mut personal.gender, gender),
            (&mut address.street, street),
            (&mut address.number, number),
            (&mut address.complement, complement),
            (&mut address.neighborhood, neighborhood),
            (&mut address.city, city),
            (&mut address.state, state),
            (&mut address.postal_code, postal_code),
            (&mut address.country, country),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(birth_date) = birth_date {
            personal.birth_date = Some(birth_date);
        }
    }
}
