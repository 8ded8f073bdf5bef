use async_trait::async_trait;

use super::SessionToken;
use crate::error::AppError;

/// Async face of the authentication core, as used by request handlers
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, username: String, password: String, email: String) -> Result<(), AppError>;
    async fn authenticate(&self, username: String, password: String) -> Result<SessionToken, AppError>;
    fn current_user(&self, token: &str) -> Option<String>;
    fn logout(&self, token: &str);
}
