//! In-memory collaborators.
//!
//! Useful for tests, demos and hosts that keep credentials in process. All
//! types are thread-safe and cheap to share behind a reference or [`Arc`].
//!
//! [`Arc`]: std::sync::Arc

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use crate::config::{ConfigScope, ScopeConfig};
use crate::error::CollaboratorError;
use crate::store::{CredentialStore, FailureTracker, StoredCredential};

/// Default number of failed attempts before [`MemoryFailureTracker`] locks an
/// account.
pub const DEFAULT_LOCKOUT_THRESHOLD: u32 = 10;

/// Credentials keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `hash` for `credential_id`, replacing any previous hash.
    pub fn insert(&self, credential_id: impl Into<String>, hash: impl Into<String>) {
        self.credentials
            .write()
            .insert(credential_id.into(), StoredCredential::new(hash));
    }

    /// Removes the credential of `credential_id`.
    pub fn remove(&self, credential_id: &str) -> Option<StoredCredential> {
        self.credentials.write().remove(credential_id)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn stored_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<StoredCredential>, CollaboratorError> {
        Ok(self.credentials.read().get(credential_id).cloned())
    }
}

/// Counts failures per identifier and locks at a threshold.
#[derive(Debug)]
pub struct MemoryFailureTracker {
    threshold: u32,
    failures: Mutex<HashMap<String, u32>>,
}

impl Default for MemoryFailureTracker {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_LOCKOUT_THRESHOLD)
    }
}

impl MemoryFailureTracker {
    /// Tracker locking after [`DEFAULT_LOCKOUT_THRESHOLD`] failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker locking once `threshold` failures were recorded.
    #[must_use]
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Failures recorded so far for `credential_id`.
    pub fn failures(&self, credential_id: &str) -> u32 {
        self.failures
            .lock()
            .get(credential_id)
            .copied()
            .unwrap_or_default()
    }

    /// Clears the failure count of `credential_id`.
    pub fn reset(&self, credential_id: &str) {
        self.failures.lock().remove(credential_id);
    }
}

impl FailureTracker for MemoryFailureTracker {
    fn record_failure(&self, credential_id: &str) -> Result<(), CollaboratorError> {
        let mut failures = self.failures.lock();
        let count = failures.entry(credential_id.to_owned()).or_default();
        *count = count.saturating_add(1);
        Ok(())
    }

    fn is_locked(&self, credential_id: &str) -> Result<bool, CollaboratorError> {
        Ok(self.failures(credential_id) >= self.threshold)
    }
}

/// Path-based configuration values per scope.
#[derive(Debug, Default)]
pub struct MemoryScopeConfig {
    values: RwLock<HashMap<(ConfigScope, String), String>>,
}

impl MemoryScopeConfig {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `path` to `value` in `scope`.
    pub fn set(&self, scope: ConfigScope, path: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert((scope, path.into()), value.into());
    }

    /// Removes `path` from `scope`.
    pub fn unset(&self, scope: ConfigScope, path: &str) {
        self.values.write().remove(&(scope, path.to_owned()));
    }
}

impl ScopeConfig for MemoryScopeConfig {
    fn get_value(
        &self,
        path: &str,
        scope: &ConfigScope,
    ) -> Result<Option<String>, CollaboratorError> {
        Ok(self
            .values
            .read()
            .get(&(scope.clone(), path.to_owned()))
            .cloned())
    }
}

#[cfg(test)]
mod test {
    use super::{MemoryCredentialStore, MemoryFailureTracker, MemoryScopeConfig};
    use crate::config::{ConfigScope, ScopeConfig};
    use crate::store::{CredentialStore, FailureTracker};

    #[test]
    fn credential_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.stored_credential("42").unwrap().is_none());

        store.insert("42", "946ccf1cf1cfccb6bce540c3b83432f7");
        let credential = store.stored_credential("42").unwrap().unwrap();
        assert_eq!(credential.hash(), "946ccf1cf1cfccb6bce540c3b83432f7");

        store.remove("42");
        assert!(store.stored_credential("42").unwrap().is_none());
    }

    #[test]
    fn tracker_locks_at_threshold() {
        let tracker = MemoryFailureTracker::with_threshold(2);

        tracker.record_failure("42").unwrap();
        assert!(!tracker.is_locked("42").unwrap());

        tracker.record_failure("42").unwrap();
        assert!(tracker.is_locked("42").unwrap());
        assert!(!tracker.is_locked("7").unwrap());

        tracker.reset("42");
        assert_eq!(tracker.failures("42"), 0);
        assert!(!tracker.is_locked("42").unwrap());
    }

    #[test]
    fn scope_config_is_scoped() {
        let config = MemoryScopeConfig::new();
        config.set(ConfigScope::Store("eu".to_owned()), "a/b/c", "1");

        assert_eq!(
            config
                .get_value("a/b/c", &ConfigScope::Store("eu".to_owned()))
                .unwrap()
                .as_deref(),
            Some("1")
        );
        assert!(config.get_value("a/b/c", &ConfigScope::Default).unwrap().is_none());

        config.unset(ConfigScope::Store("eu".to_owned()), "a/b/c");
        assert!(config
            .get_value("a/b/c", &ConfigScope::Store("eu".to_owned()))
            .unwrap()
            .is_none());
    }
}
