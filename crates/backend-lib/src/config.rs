// ============================
// socialconnect-backend/src/config.rs
// ============================
//! Configuration management.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::auth::password::{DEFAULT_LOG_N, MAX_LOG_N, MIN_LOG_N};
use crate::error::AppError;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "socialconnect.toml";

/// Prefix of environment overrides, e.g. `SOCIALCONNECT_BIND_ADDR`
pub const ENV_PREFIX: &str = "SOCIALCONNECT_";

/// Longest accepted session lifetime, ten years
pub const MAX_SESSION_TTL_SECS: u64 = 60 * 60 * 24 * 365 * 10;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Absolute session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Mark cookies `Secure`, only sensible behind TLS
    pub cookie_secure: bool,
    /// scrypt cost as `log2(N)`
    pub hash_log_n: u8,
    /// How often expired sessions are purged, 0 disables the sweeper
    pub sweep_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            log_level: "info".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            cookie_name: "session".to_string(),
            cookie_secure: false,
            hash_log_n: DEFAULT_LOG_N,
            sweep_interval_secs: 60 * 60,
        }
    }
}

impl Settings {
    /// Load from `socialconnect.toml` (if present) and the environment
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from an explicit file, environment variables take precedence
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        Self::figment(path).extract::<Settings>()?.validated()
    }

    /// Layered provider: defaults, then file, then environment
    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check the settings for values the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "unknown log level `{}`",
                self.log_level
            )));
        }
        if self.session_ttl_secs == 0 {
            return Err(AppError::Config("session_ttl_secs must be positive".into()));
        }
        if self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(AppError::Config(format!(
                "session_ttl_secs must be at most {MAX_SESSION_TTL_SECS}"
            )));
        }
        if self.cookie_name.is_empty()
            || !self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::Config(format!(
                "invalid cookie name `{}`",
                self.cookie_name
            )));
        }
        if !(MIN_LOG_N..=MAX_LOG_N).contains(&self.hash_log_n) {
            return Err(AppError::Config(format!(
                "hash_log_n must be between {MIN_LOG_N} and {MAX_LOG_N}"
            )));
        }
        Ok(())
    }

    fn validated(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Sweeper period, `None` when disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}
