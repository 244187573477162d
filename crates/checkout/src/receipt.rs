use {
    model::CompletedDonation,
    sha2::{Digest, Sha256},
};

/// Integrity hash over a completed donation.
///
/// The confirmation route carries it so the success view can check that what
/// it renders is the donation that was actually paid, not a stale or
/// hand-edited one.
pub fn receipt(completed: &CompletedDonation) -> String {
    let canonical = serde_json::to_string(completed).unwrap();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// The confirmation route for a given receipt.
pub fn success_route(receipt: &str) -> String {
    format!("/donation/success?receipt={receipt}")
}
