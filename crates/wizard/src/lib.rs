//! The donation wizard: a four-step flow (value, personal data, payment,
//! success) whose entire state lives in one [`DonationState`] document.
//!
//! All mutation goes through the [`StateStore`] reducer, which persists each
//! change before committing it, so a page reload resumes exactly where the
//! donor left off. The [`Controller`] moves the cursor; validation gates
//! forward movement only. What happens when the donor confirms the payment
//! is the checkout orchestrator's business, not this crate's.

pub mod controller;
pub mod rules;
pub mod state;
pub mod step;
pub mod store;
pub mod validation;

pub use {
    controller::{AdvanceError, Controller},
    rules::{FlowRules, KindRules, PersonalField},
    state::{DonationState, PersonalUpdate},
    step::Step,
    store::{StateStore, StateUpdate},
    validation::{StepInvalid, step_requirements},
};
