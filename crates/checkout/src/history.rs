use {
    local_store::{EntryStoring, StoreError},
    model::DonationRecord,
    std::sync::Arc,
};

/// The donation history kept on the donor's own device, one list per donor.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait HistoryStoring: Send + Sync {
    /// Appends one record to the donor's history.
    fn append(&self, donor_id: &str, record: DonationRecord) -> Result<(), StoreError>;

    /// The donor's records, oldest first.
    fn list(&self, donor_id: &str) -> Result<Vec<DonationRecord>, StoreError>;

    /// Drops the donor's history entirely. Runs on logout and on explicit
    /// donor request.
    fn clear(&self, donor_id: &str) -> Result<(), StoreError>;
}

/// [`HistoryStoring`] over a persisted entry per donor.
pub struct EntryHistory {
    store: Arc<dyn EntryStoring>,
}

impl EntryHistory {
    pub fn new(store: Arc<dyn EntryStoring>) -> Self {
        Self { store }
    }
}

impl HistoryStoring for EntryHistory {
    fn append(&self, donor_id: &str, record: DonationRecord) -> Result<(), StoreError> {
        let key = local_store::history_key(donor_id);
        let mut records: Vec<DonationRecord> =
            local_store::read_json(self.store.as_ref(), &key)?.unwrap_or_default();
        records.push(record);
        local_store::write_json(self.store.as_ref(), &key, &records)
    }

    fn list(&self, donor_id: &str) -> Result<Vec<DonationRecord>, StoreError> {
        let key = local_store::history_key(donor_id);
        Ok(local_store::read_json(self.store.as_ref(), &key)?.unwrap_or_default())
    }

    fn clear(&self, donor_id: &str) -> Result<(), StoreError> {
        self.store.remove(&local_store::history_key(donor_id))
    }
}
