// ============================
// socialconnect-backend/src/storage.rs
// ============================
//! Storage abstraction with an in-memory implementation.
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

use crate::error::AppError;

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    /// PHC string, never the plaintext
    pub password_hash: String,
    /// Stored verbatim, not validated
    pub email: String,
}

/// Trait for credential storage backends
pub trait Storage: Send + Sync {
    /// Insert a record unless its username is already taken.
    ///
    /// The vacancy check and the insertion must be atomic with respect to
    /// concurrent inserts of the same username.
    fn insert_new(&self, record: CredentialRecord) -> Result<(), AppError>;

    /// Fetch a record by username
    fn get(&self, username: &str) -> Option<CredentialRecord>;

    /// Cheap existence probe
    fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory implementation of the Storage trait.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    users: Arc<DashMap<String, CredentialRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a record. Accounts cannot be deleted through the service, this
    /// exists so tests can re-register a name.
    #[cfg(test)]
    pub(crate) fn forget(&self, username: &str) -> Option<CredentialRecord> {
        self.users.remove(username).map(|(_, record)| record)
    }
}

impl Storage for MemoryStorage {
    fn insert_new(&self, record: CredentialRecord) -> Result<(), AppError> {
        match self.users.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(AppError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            },
        }
    }

    fn get(&self, username: &str) -> Option<CredentialRecord> {
        self.users.get(username).map(|r| r.value().clone())
    }

    fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}
