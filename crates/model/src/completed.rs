use {
    crate::{DonationKind, DonationRecord, PaymentMethod, RecordStatus},
    chrono::{DateTime, Utc},
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// A successfully processed donation, assembled the moment the backend
/// confirms the payment.
///
/// `kind` is the kind the donor selected, never a value echoed back by the
/// backend, so downstream records cannot drift from what was requested.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletedDonation {
    pub transaction_id: String,
    pub kind: DonationKind,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub timestamp: DateTime<Utc>,
    /// Attribution carried through to the conversion trackers.
    pub campaign: Option<String>,
    pub collaborator: Option<String>,
}

impl From<&CompletedDonation> for DonationRecord {
    fn from(completed: &CompletedDonation) -> Self {
        Self {
            id: completed.transaction_id.clone(),
            timestamp: completed.timestamp,
            amount: completed.amount,
            kind: completed.kind.history_label().to_string(),
            status: RecordStatus::Completed,
            description: completed.kind.description().to_string(),
            payment_method: completed.method.history_label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone};

    #[test]
    fn record_keeps_the_requested_kind() {
        let completed = CompletedDonation {
            transaction_id: "tx-77".to_string(),
            kind: DonationKind::Donate,
            amount: Decimal::from(50u32),
            method: PaymentMethod::CreditCard,
            timestamp: Utc.with_ymd_and_hms(2024, 7, 11, 15, 4, 5).unwrap(),
            campaign: None,
            collaborator: None,
        };
        let record = DonationRecord::from(&completed);
        assert_eq!(record.id, "tx-77");
        assert_eq!(record.kind, "single");
        assert_eq!(record.status, RecordStatus::Completed);
        assert_eq!(record.description, "Doação única");
        assert_eq!(record.payment_method, "Cartão de crédito");
    }
}
