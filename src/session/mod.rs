//! Session persistence behind the [`SessionPort`] seam. The controller only
//! talks to the port; [`StorageSession`] implements it over a
//! [`ClientStorage`] backend plus the in-memory [`SessionStore`].
//!
//! Persisting a session is one logical step: either all four storage keys are
//! written and the store is signalled, or nothing is left behind and the user
//! stays signed out.

pub mod storage;
pub mod store;

pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{AuthState, SessionStore};

use crate::{
    auth::types::{LoginPayload, UserProfile},
    role::Role,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";
pub const USER_KEY: &str = "user";

const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USER_KEY];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable identity and tokens of an authenticated user.
#[derive(Debug)]
pub struct SessionRecord {
    pub user: UserProfile,
    /// Uppercase role; unknown roles are kept verbatim.
    pub role: String,
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

impl SessionRecord {
    /// Builds the record from a login response, normalizing the role to uppercase.
    #[must_use]
    pub fn from_login(payload: LoginPayload) -> Self {
        Self {
            role: payload.role.to_uppercase(),
            user: payload.user,
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
        }
    }
}

/// Session persistence as seen by the form controller and the redirect.
pub trait SessionPort {
    /// Stores the record and marks the session authenticated.
    ///
    /// # Errors
    /// Returns an error if any part of the record cannot be stored; the
    /// session is left unauthenticated in that case.
    fn persist(&self, record: &SessionRecord) -> Result<(), SessionError>;

    /// Raw role string from persisted storage.
    fn stored_role(&self) -> Option<String>;

    /// Persisted role, when it names a known [`Role`].
    fn current_role(&self) -> Option<Role> {
        self.stored_role().and_then(|role| role.parse().ok())
    }

    fn is_authenticated(&self) -> bool;

    /// Removes the persisted session and signs the store out.
    ///
    /// # Errors
    /// Returns an error if storage cannot be updated.
    fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Debug)]
pub struct StorageSession<C> {
    storage: C,
    store: SessionStore,
}

impl<C: ClientStorage> StorageSession<C> {
    pub fn new(storage: C, store: SessionStore) -> Self {
        Self { storage, store }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn storage(&self) -> &C {
        &self.storage
    }

    /// Hydrates the store from storage, as on a page reload.
    ///
    /// Returns `true` when a complete session was found. Partial or unreadable
    /// sessions leave the store signed out.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read.
    pub fn restore(&self) -> Result<bool, SessionError> {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if self.storage.get(key)?.is_none() {
                debug!(key, "no persisted session");
                return Ok(false);
            }
        }

        let (Some(role), Some(user)) = (self.storage.get(ROLE_KEY)?, self.stored_user()?) else {
            debug!("persisted session is incomplete");
            return Ok(false);
        };

        self.store.login(role, user);
        info!("session restored from storage");
        Ok(true)
    }

    /// Profile saved under the `user` key; an undecodable value counts as absent.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read.
    pub fn stored_user(&self) -> Result<Option<UserProfile>, SessionError> {
        let Some(raw) = self.storage.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!("ignoring undecodable user profile: {err}");
                Ok(None)
            }
        }
    }

    fn discard_keys(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, "failed to remove session key: {err}");
            }
        }
    }
}

impl<C: ClientStorage> SessionPort for StorageSession<C> {
    fn persist(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let user = serde_json::to_string(&record.user)?;
        let entries = [
            (ACCESS_TOKEN_KEY, record.access_token.expose_secret()),
            (REFRESH_TOKEN_KEY, record.refresh_token.expose_secret()),
            (ROLE_KEY, record.role.as_str()),
            (USER_KEY, user.as_str()),
        ];

        for (key, value) in entries {
            if let Err(err) = self.storage.set(key, value) {
                warn!(key, "session persistence failed: {err}");
                self.discard_keys();
                self.store.logout();
                return Err(err.into());
            }
        }

        self.store.login(record.role.clone(), record.user.clone());
        debug!(role = %record.role, "session persisted");
        Ok(())
    }

    fn stored_role(&self) -> Option<String> {
        match self.storage.get(ROLE_KEY) {
            Ok(role) => role,
            Err(err) => {
                warn!("failed to read persisted role: {err}");
                None
            }
        }
    }

    fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.store.logout();
        for key in SESSION_KEYS {
            self.storage.remove(key)?;
        }
        Ok(())
    }
}
