// ============================
// socialconnect-backend/src/auth/session.rs
// ============================
//! Session token handling and management.
use metrics::{counter, gauge};
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::token_generator::generate_secure_token;
use crate::error::AppError;
use crate::metrics as keys;

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Opaque bearer token handed to the client
pub type SessionToken = String;

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

impl Session {
    /// A session is live strictly before its expiry instant
    pub fn is_live_at(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

/// Session manager for handling authentication tokens.
///
/// Expiry is evaluated lazily on every lookup. An invalidated token is simply
/// removed, so it is indistinguishable from one that never existed.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), SESSION_TTL)
    }

    /// Create a session manager with an explicit clock and lifetime
    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new session bound to `username`.
    ///
    /// Fails if the expiry instant is not representable.
    pub fn issue(&self, username: &str) -> Result<SessionToken, AppError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add(self.ttl)
            .ok_or_else(|| AppError::Internal("session expiry out of range".to_string()))?;
        let token = generate_secure_token();
        let session = Session {
            username: username.to_string(),
            created_at: now,
            expires_at,
        };

        let mut sessions = self.sessions.write();
        sessions.insert(token.clone(), session);

        counter!(keys::SESSION_ISSUED).increment(1);
        gauge!(keys::SESSION_ACTIVE).set(sessions.len() as f64);

        Ok(token)
    }

    /// Get a live session by token
    pub fn get(&self, token: &str) -> Option<Session> {
        let now = self.clock.now();
        {
            let sessions = self.sessions.read();
            match sessions.get(token) {
                Some(session) if session.is_live_at(now) => return Some(session.clone()),
                Some(_) => {},
                None => return None,
            }
        }

        // Expired: drop it now rather than waiting for a sweep
        let mut sessions = self.sessions.write();
        if sessions.get(token).is_some_and(|s| !s.is_live_at(now)) {
            sessions.remove(token);
            counter!(keys::SESSION_EXPIRED).increment(1);
            gauge!(keys::SESSION_ACTIVE).set(sessions.len() as f64);
            debug!("session expired on access");
        }
        None
    }

    /// Username bound to a live token
    pub fn current_user(&self, token: &str) -> Option<String> {
        self.get(token).map(|s| s.username)
    }

    /// Invalidate a token. Unknown or already invalid tokens are a no-op.
    pub fn invalidate(&self, token: &str) {
        let mut sessions = self.sessions.write();
        if sessions.remove(token).is_some() {
            gauge!(keys::SESSION_ACTIVE).set(sessions.len() as f64);
        }
    }

    /// Remove every expired session, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let before_count = sessions.len();

        sessions.retain(|_, session| session.is_live_at(now));

        let after_count = sessions.len();
        let removed = before_count - after_count;

        if removed > 0 {
            counter!(keys::SESSION_EXPIRED).increment(removed as u64);
            gauge!(keys::SESSION_ACTIVE).set(after_count as f64);
        }
        removed
    }

    /// Number of stored sessions, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn a task that purges expired sessions periodically.
    /// Must be called from within a tokio runtime.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = manager.purge_expired();
                if removed > 0 {
                    debug!(removed, "purged expired sessions");
                }
            }
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
