//! Session authenticator: turns a credential pair into a session and back.
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

use super::credentials::CredentialStore;
use super::session::{SessionManager, SessionToken};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{MemoryStorage, Storage};

/// Framework-agnostic login, session lookup and logout.
///
/// Every method is synchronous; `DefaultAuth` wraps it for async callers.
pub struct Authenticator<S = MemoryStorage> {
    store: Arc<CredentialStore<S>>,
    sessions: SessionManager,
}

impl<S: Storage> Authenticator<S> {
    pub fn new(store: Arc<CredentialStore<S>>, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }

    pub fn store(&self) -> &Arc<CredentialStore<S>> {
        &self.store
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Verify a credential pair and issue a session on success.
    ///
    /// An unknown username and a wrong password both yield
    /// `InvalidCredentials`, and the log line does not tell them apart either.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<SessionToken, AppError> {
        if !self.store.verify(username, password) {
            counter!(keys::AUTH_LOGIN_FAILURE).increment(1);
            warn!(username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.sessions.issue(username)?;
        counter!(keys::AUTH_LOGIN_SUCCESS).increment(1);
        info!(username, "login succeeded");
        Ok(token)
    }

    /// Username bound to a live token
    pub fn current_user(&self, token: &str) -> Option<String> {
        self.sessions.current_user(token)
    }

    /// Like `current_user` but as an error for protected actions
    pub fn require_user(&self, token: Option<&str>) -> Result<String, AppError> {
        token
            .and_then(|t| self.current_user(t))
            .ok_or(AppError::SessionAbsent)
    }

    /// Invalidate a token; never fails
    pub fn invalidate(&self, token: &str) {
        if let Some(username) = self.sessions.current_user(token) {
            info!(username = %username, "logged out");
        }
        self.sessions.invalidate(token);
        counter!(keys::AUTH_LOGOUT).increment(1);
    }
}
