//! Credential store: owns the username -> record mapping and the hashing policy.
use metrics::counter;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::password::{verify_password, PasswordHasher};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{CredentialRecord, MemoryStorage, Storage};
use crate::validation;

const DUMMY_PLAINTEXT: &str = "socialconnect-unknown-user";

/// Registration and lookup of accounts on top of a storage backend
pub struct CredentialStore<S = MemoryStorage> {
    storage: S,
    hasher: PasswordHasher,
    /// Verified when the username is unknown, so a miss costs as much as a
    /// wrong password. Built lazily with the same cost as real hashes.
    dummy_hash: OnceCell<Option<String>>,
}

impl CredentialStore<MemoryStorage> {
    /// Empty in-memory store
    pub fn in_memory(hasher: PasswordHasher) -> Self {
        Self::new(MemoryStorage::new(), hasher)
    }
}

impl<S: Storage> CredentialStore<S> {
    pub fn new(storage: S, hasher: PasswordHasher) -> Self {
        Self {
            storage,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a new account.
    ///
    /// Fails with `AlreadyExists` if the username is taken, leaving the
    /// existing record untouched. The hash is computed before the store is
    /// touched, so no lock is held while scrypt runs.
    pub fn register(&self, username: &str, password: &str, email: &str) -> Result<(), AppError> {
        validation::validate_username(username)?;
        validation::validate_password(password)?;

        // Skip the expensive hash for the obvious case, insert_new decides races
        if self.storage.contains(username) {
            debug!(username, "registration rejected, username taken");
            return Err(AppError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(password)?;
        self.storage.insert_new(CredentialRecord {
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
        })?;

        counter!(keys::AUTH_REGISTER).increment(1);
        info!(username, "account registered");
        Ok(())
    }

    /// Read-only lookup
    pub fn lookup(&self, username: &str) -> Option<CredentialRecord> {
        self.storage.get(username)
    }

    /// Check a plaintext password for `username`.
    ///
    /// Unknown users still pay for one verification.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        match self.lookup(username) {
            Some(record) => verify_password(&record.password_hash, password),
            None => {
                let dummy = self
                    .dummy_hash
                    .get_or_init(|| self.hasher.hash(DUMMY_PLAINTEXT).ok());
                if let Some(dummy) = dummy.as_deref() {
                    let _ = verify_password(dummy, password);
                }
                false
            },
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
