//! Domain models shared between the wizard, the payment orchestrator and the
//! external-service clients.

pub mod completed;
pub mod donation;
pub mod history;
pub mod payment;
pub mod personal;

pub use {
    completed::CompletedDonation,
    donation::{DonationFields, DonationKind},
    history::{DonationRecord, RecordStatus},
    payment::{CardData, DebitData, DebitDay, PaymentInstrument, PaymentMethod},
    personal::{Address, PersonalData},
};
