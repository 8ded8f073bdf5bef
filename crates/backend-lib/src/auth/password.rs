// ============================
// socialconnect-backend/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::error::AppError;

/// Default scrypt cost (`log2(N)`)
pub const DEFAULT_LOG_N: u8 = 15;

/// Lowest accepted cost, only sensible for tests
pub const MIN_LOG_N: u8 = 4;

/// Highest accepted cost
pub const MAX_LOG_N: u8 = 20;

/// Salt size in bytes
const SALT_BYTES: usize = 16;

/// Salted scrypt hasher producing PHC strings.
///
/// Every call draws a fresh random salt, so hashing the same plaintext twice
/// gives two different strings that both verify.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the given cost
    pub fn new(log_n: u8) -> Result<Self, AppError> {
        if !(MIN_LOG_N..=MAX_LOG_N).contains(&log_n) {
            return Err(AppError::Config(format!(
                "scrypt cost must be between {MIN_LOG_N} and {MAX_LOG_N}, got {log_n}"
            )));
        }
        let params = Params::new(log_n, Params::RECOMMENDED_R, Params::RECOMMENDED_P, Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { params })
    }

    /// Cost this hasher was built with
    pub fn log_n(&self) -> u8 {
        self.params.log_n()
    }

    /// Hash a password with a fresh salt
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt_bytes: [u8; SALT_BYTES] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AppError::Internal(format!("salt encoding failed: {e}")))?;
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::new(DEFAULT_LOG_N, Params::RECOMMENDED_R, Params::RECOMMENDED_P, Params::RECOMMENDED_LEN)
                .unwrap_or_default(),
        }
    }
}

/// Verify a password against a hash.
///
/// The cost is read back from the PHC string, so hashes made under an older
/// configuration keep verifying. A hash that does not parse never matches.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
