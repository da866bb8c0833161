use crate::auth::types::UserProfile;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What the session store knows about the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub role: String,
    pub user: UserProfile,
}

/// Process-wide session state shared by cloning the handle.
///
/// Holds only non-secret metadata; tokens live in client storage.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    state: Arc<RwLock<Option<AuthState>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Writers replace the value whole, so a poisoned lock still holds a
    // consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Option<AuthState>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthState>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the session authenticated.
    pub fn login(&self, role: String, user: UserProfile) {
        *self.write() = Some(AuthState { role, user });
    }

    pub fn logout(&self) {
        *self.write() = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<AuthState> {
        self.read().clone()
    }
}
