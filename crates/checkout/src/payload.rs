//! Builders for the donor backend's payment requests.
//!
//! Backend-shaped projections of the wizard state (`donate_type`, the
//! `child_id` list) are computed here, at the point the request is built.
//! Nothing in the persisted state mirrors them, so they cannot drift.

use {
    dso_api::dto::{ChargeCard, CreateDonorAndPay, RegisterDebit},
    model::{CardData, DebitData, DonationFields, PaymentInstrument, PersonalData},
};

pub(crate) fn create_donor_and_pay(
    personal: &PersonalData,
    donation: &DonationFields,
    instrument: PaymentInstrument,
) -> CreateDonorAndPay {
    CreateDonorAndPay {
        name: personal.name.clone(),
        email: personal.email.clone(),
        document: personal.document.clone(),
        phone: personal.phone.clone(),
        birth_date: personal.birth_date,
        gender: personal.gender.clone(),
        address: personal.address.clone(),
        value: donation.value,
        donate_type: donation.kind.donate_type().to_string(),
        child_id: child_id(donation),
        campaign: donation.campaign.clone(),
        collaborator: donation.collaborator.clone(),
        instrument,
    }
}

pub(crate) fn charge_card(donation: &DonationFields, card: CardData) -> ChargeCard {
    ChargeCard {
        value: donation.value,
        donate_type: donation.kind.donate_type().to_string(),
        child_id: child_id(donation),
        campaign: donation.campaign.clone(),
        collaborator: donation.collaborator.clone(),
        card,
    }
}

pub(crate) fn register_debit(donation: &DonationFields, debit: DebitData) -> RegisterDebit {
    RegisterDebit {
        value: donation.value,
        donate_type: donation.kind.donate_type().to_string(),
        child_id: child_id(donation),
        campaign: donation.campaign.clone(),
        collaborator: donation.collaborator.clone(),
        debit,
    }
}

// The backend takes sponsored children as a list even though the wizard only
// ever selects one.
fn child_id(donation: &DonationFields) -> Option<Vec<String>> {
    donation.child_id.clone().map(|id| vec![id])
}

#[cfg(test)]
mod tests {
    use {super::*, model::DonationKind, rust_decimal::Decimal};

    fn donation(kind: DonationKind) -> DonationFields {
        DonationFields {
            kind,
            value: Decimal::from(74),
            child_id: Some("child-7".to_string()),
            campaign: Some("winter".to_string()),
            collaborator: None,
        }
    }

    #[test]
    fn recurrent_donations_travel_as_sponsorship() {
        let request = charge_card(&donation(DonationKind::Recurrent), CardData::default());
        assert_eq!(request.donate_type, "sponsorship");
        let request = register_debit(&donation(DonationKind::Recurrent), DebitData::default());
        assert_eq!(request.donate_type, "sponsorship");
        let request = create_donor_and_pay(
            &PersonalData::default(),
            &donation(DonationKind::Recurrent),
            PaymentInstrument::CreditCard(CardData::default()),
        );
        assert_eq!(request.donate_type, "sponsorship");
    }

    #[test]
    fn one_off_donations_keep_their_own_type() {
        let request = charge_card(&donation(DonationKind::Donate), CardData::default());
        assert_eq!(request.donate_type, "donate");
    }

    #[test]
    fn the_selected_child_becomes_a_single_element_list() {
        let request = charge_card(&donation(DonationKind::Sponsorship), CardData::default());
        assert_eq!(request.child_id, Some(vec!["child-7".to_string()]));
        assert_eq!(request.campaign.as_deref(), Some("winter"));

        let request = charge_card(
            &DonationFields {
                child_id: None,
                ..donation(DonationKind::Donate)
            },
            CardData::default(),
        );
        assert_eq!(request.child_id, None);
    }
}
