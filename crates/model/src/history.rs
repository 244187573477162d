use {
    chrono::{DateTime, Utc},
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// One entry of the donor's locally kept donation history.
///
/// Appended after a successful payment and otherwise immutable; the list is
/// cleared on logout or on explicit donor request.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DonationRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    /// Kind label as requested by the donor (`sponsorship`, `single`,
    /// `recurrent`), never the backend's echo.
    pub kind: String,
    pub status: RecordStatus,
    pub description: String,
    pub payment_method: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone};

    #[test]
    fn record_round_trips_through_serde() {
        let record = DonationRecord {
            id: "tx-1845".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 7, 11, 15, 4, 5).unwrap(),
            amount: Decimal::from(50u32),
            kind: "single".to_string(),
            status: RecordStatus::Completed,
            description: "Doação única".to_string(),
            payment_method: "Cartão de crédito".to_string(),
        };
        let encoded = serde_json::to_string(&record).unwrap();
        assert!(encoded.contains("\"status\":\"completed\""));
        let decoded: DonationRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
