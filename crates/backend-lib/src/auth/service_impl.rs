use async_trait::async_trait;
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::auth::{AuthService, Authenticator, SessionToken};
use crate::error::AppError;
use crate::storage::Storage;

/// `AuthService` that moves scrypt work onto the blocking pool
pub struct DefaultAuth<S> {
    inner: Arc<Authenticator<S>>,
}

impl<S> DefaultAuth<S> {
    pub fn new(inner: Arc<Authenticator<S>>) -> Self {
        Self { inner }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator<S>> {
        &self.inner
    }
}

#[async_trait]
impl<S: Storage + 'static> AuthService for DefaultAuth<S> {
    async fn register(&self, username: String, password: String, email: String) -> Result<(), AppError> {
        let inner = Arc::clone(&self.inner);
        let password = Zeroizing::new(password);
        tokio::task::spawn_blocking(move || inner.store().register(&username, &password, &email))
            .await
            .map_err(|e| AppError::Internal(format!("registration task failed: {e}")))?
    }

    async fn authenticate(&self, username: String, password: String) -> Result<SessionToken, AppError> {
        let inner = Arc::clone(&self.inner);
        let password = Zeroizing::new(password);
        tokio::task::spawn_blocking(move || inner.authenticate(&username, &password))
            .await
            .map_err(|e| AppError::Internal(format!("login task failed: {e}")))?
    }

    fn current_user(&self, token: &str) -> Option<String> {
        self.inner.current_user(token)
    }

    fn logout(&self, token: &str) {
        self.inner.invalidate(token);
    }
}
