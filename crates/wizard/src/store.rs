use {
    crate::{DonationState, PersonalUpdate, Step},
    local_store::{DONATION_STATE_KEY, EntryStoring, StoreError},
    model::{DonationKind, PaymentInstrument},
    rust_decimal::Decimal,
    std::sync::Arc,
};

/// One wizard-state mutation, applied and persisted as a unit.
#[derive(Clone, Debug)]
pub enum StateUpdate {
    /// Shallow-merges into the personal data.
    Personal(PersonalUpdate),
    /// Replaces the selected instrument wholesale.
    Payment(PaymentInstrument),
    Kind(DonationKind),
    Value(Decimal),
    ChildId(String),
    Campaign {
        campaign: Option<String>,
        collaborator: Option<String>,
    },
    /// Unconditional; gating is the controller's job.
    Step(Step),
    LoggedIn(bool),
}

/// Owner of the wizard state and its persisted entry.
///
/// All mutation funnels through [`StateStore::apply`]: the update is merged
/// into a copy, the copy is persisted, and only then committed in memory.
/// The persisted entry therefore never trails what callers observe, and a
/// failed write leaves the in-memory state untouched.
pub struct StateStore {
    state: DonationState,
    store: Arc<dyn EntryStoring>,
}

impl StateStore {
    /// Rehydrates from the persisted entry. Missing entries start from
    /// defaults; corrupt ones are dropped and logged rather than wedging
    /// the wizard forever.
    pub fn load_or_default(store: Arc<dyn EntryStoring>) -> Self {
        let state = match local_store::read_json(store.as_ref(), DONATION_STATE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => DonationState::default(),
            Err(err) => {
                tracing::warn!(?err, "dropping unreadable wizard state entry");
                DonationState::default()
            }
        };
        Self { state, store }
    }

    pub fn state(&self) -> &DonationState {
        &self.state
    }

    /// Applies one update, persisting before committing.
    pub fn apply(&mut self, update: StateUpdate) -> Result<(), StoreError> {
        let mut next = self.state.clone();
        match update {
            StateUpdate::Personal(update) => update.apply(&mut next.personal),
            StateUpdate::Payment(instrument) => next.payment = Some(instrument),
            StateUpdate::Kind(kind) => next.donation.kind = kind,
            StateUpdate::Value(value) => next.donation.value = value,
            StateUpdate::ChildId(id) => next.donation.child_id = Some(id),
            StateUpdate::Campaign {
                campaign,
                collaborator,
            } => {
                next.donation.campaign = campaign;
                next.donation.collaborator = collaborator;
            }
            StateUpdate::Step(step) => next.step = step,
            StateUpdate::LoggedIn(logged_in) => next.logged_in = logged_in,
        }
        local_store::write_json(self.store.as_ref(), DONATION_STATE_KEY, &next)?;
        self.state = next;
        Ok(())
    }

    /// Restores defaults and drops the persisted entry. Safe to call any
    /// number of times in a row.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.remove(DONATION_STATE_KEY)?;
        self.state = DonationState::default();
        Ok(())
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .finish()
    }
}
