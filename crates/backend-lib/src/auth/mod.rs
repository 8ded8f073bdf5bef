// ============================
// socialconnect-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod authenticator;
pub mod clock;
pub mod credentials;
pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

pub use authenticator::Authenticator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::CredentialStore;
pub use password::{verify_password, PasswordHasher, DEFAULT_LOG_N, MIN_LOG_N};
pub use session::{Session, SessionManager, SessionToken, SESSION_TTL};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
