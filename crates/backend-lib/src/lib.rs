// ============================
// socialconnect-backend/src/lib.rs
// ============================
//! Core functionality for the `SocialConnect` login service: credential
//! storage, session management and the HTTP pages on top of them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{
    AuthService, Authenticator, Clock, CredentialStore, DefaultAuth, PasswordHasher,
    SessionManager, SystemClock,
};
use crate::config::Settings;
use crate::error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Session manager, shared with `auth`
    pub sessions: SessionManager,
    /// Validated settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state with an empty in-memory store
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Like `new`, but session expiry follows `clock`
    pub fn with_clock(settings: Settings, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        settings.validate()?;

        let hasher = PasswordHasher::new(settings.hash_log_n)?;
        let store = Arc::new(CredentialStore::in_memory(hasher));
        let sessions = SessionManager::with_clock(clock, settings.session_ttl());
        let authenticator = Arc::new(Authenticator::new(store, sessions.clone()));

        Ok(Self {
            auth: Arc::new(DefaultAuth::new(authenticator)),
            sessions,
            settings: Arc::new(settings),
        })
    }
}
