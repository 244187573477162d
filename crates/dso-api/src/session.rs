//! The persisted donor login session.

use {
    crate::dto::AccessToken,
    local_store::{EntryStoring, SESSION_TOKEN_KEY, StoreError},
    std::sync::Arc,
};

/// Stores the bearer token next to the wizard state. Reads fold storage
/// failures into "not logged in" so a broken entry never wedges the wizard.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn EntryStoring>,
}

impl Session {
    pub fn new(store: Arc<dyn EntryStoring>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<AccessToken> {
        match self.store.read(SESSION_TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()).map(AccessToken),
            Err(err) => {
                tracing::warn!(?err, "failed to read session token");
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn store_token(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.store.write(SESSION_TOKEN_KEY, token.as_str())
    }

    /// Logs the donor out. Donor-scoped history entries are cleared by the
    /// caller, which knows the donor id.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_TOKEN_KEY)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
