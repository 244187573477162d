use {
    crate::{DonationState, FlowRules, Step},
    model::{DonationKind, PaymentInstrument},
    rust_decimal::Decimal,
};

/// Why a step cannot be advanced past. The `Display` text is shown to the
/// donor as-is.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StepInvalid {
    #[error("O valor mínimo para esta doação é R$ {minimum}")]
    BelowMinimum { minimum: Decimal },
    #[error("Escolha uma criança para apadrinhar")]
    MissingChild,
    #[error("Dados pessoais incompletos. Campos faltando: {}", .missing.join(", "))]
    MissingPersonalFields { missing: Vec<&'static str> },
    #[error("Escolha uma forma de pagamento")]
    MissingInstrument,
    #[error("Dados de pagamento incompletos. Campos faltando: {}", .missing.join(", "))]
    MissingPaymentFields { missing: Vec<&'static str> },
}

/// Checks whether `step` is complete enough to advance past, against the
/// configured rules. Pure; does not mutate anything.
pub fn step_requirements(
    state: &DonationState,
    rules: &FlowRules,
    step: Step,
) -> Result<(), StepInvalid> {
    match step {
        Step::Value => {
            let kind_rules = rules.for_kind(state.donation.kind);
            if state.donation.value < kind_rules.min_value {
                return Err(StepInvalid::BelowMinimum {
                    minimum: kind_rules.min_value,
                });
            }
            if state.donation.kind == DonationKind::Sponsorship
                && state
                    .donation
                    .child_id
                    .as_deref()
                    .is_none_or(|id| id.trim().is_empty())
            {
                return Err(StepInvalid::MissingChild);
            }
            Ok(())
        }
        Step::Data => {
            // Authenticated donors have their data on file; the step is
            // skipped entirely by the flow, so it never blocks.
            if state.logged_in {
                return Ok(());
            }
            let missing: Vec<_> = rules
                .for_kind(state.donation.kind)
                .required_personal_fields
                .iter()
                .filter(|field| !field.is_present(&state.personal))
                .map(|field| field.label())
                .collect();
            if missing.is_empty() {
                Ok(())
            } else {
                Err(StepInvalid::MissingPersonalFields { missing })
            }
        }
        Step::Payment => match &state.payment {
            None => Err(StepInvalid::MissingInstrument),
            Some(instrument) => instrument_requirements(instrument),
        },
        Step::Success => Ok(()),
    }
}

/// The per-variant required field set. Exhaustive over the instrument union,
/// so adding a variant forces a decision here.
fn instrument_requirements(instrument: &PaymentInstrument) -> Result<(), StepInvalid> {
    let mut missing = Vec::new();
    let mut require = |value: &str, label: &'static str| {
        if value.trim().is_empty() {
            missing.push(label);
        }
    };
    match instrument {
        PaymentInstrument::CreditCard(card) => {
            require(&card.holder_name, "titular");
            require(&card.card_number, "número do cartão");
            require(&card.expiry_month, "mês de validade");
            require(&card.expiry_year, "ano de validade");
            require(&card.cvv, "código de segurança");
        }
        PaymentInstrument::BankDebit(debit) => {
            require(&debit.bank_code, "banco");
            require(&debit.branch_number, "agência");
            require(&debit.account_number, "conta");
            require(&debit.account_digit, "dígito da conta");
            require(&debit.account_type, "tipo de conta");
            // branch_digit is optional: not every bank issues one, and
            // debit_day always carries a valid day.
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StepInvalid::MissingPaymentFields { missing })
    }
}
