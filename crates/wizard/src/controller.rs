use {
    crate::{
        DonationState, FlowRules, StateStore, StateUpdate, Step, StepInvalid, step,
        validation,
    },
    local_store::StoreError,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum AdvanceError {
    #[error(transparent)]
    Invalid(#[from] StepInvalid),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives the wizard cursor over the [`StateStore`].
///
/// The controller owns navigation: moving forward requires the current
/// step's data to pass its validation rules, moving backward never does.
/// Submitting the finished donation is not its job; the checkout
/// orchestrator takes the store from here.
#[derive(Debug)]
pub struct Controller {
    store: StateStore,
    rules: FlowRules,
}

impl Controller {
    pub fn new(store: StateStore, rules: FlowRules) -> Self {
        Self { store, rules }
    }

    /// Folds a rehydrated cursor into the active flow and reports where the
    /// wizard resumes. A donor who left off on the personal data step and
    /// has logged in since resumes on the payment step.
    pub fn resume(&mut self) -> Result<Step, StoreError> {
        let state = self.store.state();
        let normalized = step::normalize(state.step, state.logged_in);
        if normalized != state.step {
            self.store.apply(StateUpdate::Step(normalized))?;
        }
        Ok(normalized)
    }

    /// Moves to the next step if the current one's requirements are met.
    /// At the end of the flow this is a no-op.
    pub fn advance(&mut self) -> Result<Step, AdvanceError> {
        let state = self.store.state();
        let (step, logged_in) = (state.step, state.logged_in);
        validation::step_requirements(state, &self.rules, step)?;
        let Some(next) = step::next(step, logged_in) else {
            return Ok(step);
        };
        self.store.apply(StateUpdate::Step(next))?;
        Ok(next)
    }

    /// Moves to the previous step. Never validates; a donor may always walk
    /// back to fix earlier input. At the start of the flow this is a no-op.
    pub fn back(&mut self) -> Result<Step, StoreError> {
        let state = self.store.state();
        let Some(previous) = step::previous(state.step, state.logged_in) else {
            return Ok(state.step);
        };
        self.store.apply(StateUpdate::Step(previous))?;
        Ok(previous)
    }

    /// Records a login state change and renormalizes the cursor, since the
    /// step sequence itself depends on it.
    pub fn set_logged_in(&mut self, logged_in: bool) -> Result<Step, StoreError> {
        self.store.apply(StateUpdate::LoggedIn(logged_in))?;
        self.resume()
    }

    /// 1-based position of the current step and the flow length.
    pub fn progress(&self) -> (usize, usize) {
        let state = self.store.state();
        step::progress(state.step, state.logged_in)
    }

    pub fn state(&self) -> &DonationState {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn rules(&self) -> &FlowRules {
        &self.rules
    }
}
