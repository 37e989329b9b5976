//! Host-side collaborators: the credential store and the failure tracker.
//!
//! Both are owned by the host. The verifier only reads credentials and
//! reports failed attempts; it never writes hashes or lockout state itself.

use std::sync::Arc;

use crate::error::CollaboratorError;
use crate::hash::{is_legacy_format, LegacyHasher};

/// Stored password hash of one account.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    hash: String,
}

impl StoredCredential {
    /// Wraps a stored hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// The stored hash string.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Whether the stored hash was produced by `hasher`, judged by its length.
    pub fn is_legacy_format<H: LegacyHasher + ?Sized>(&self, hasher: &H) -> bool {
        is_legacy_format(&self.hash, hasher)
    }
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("hash_len", &self.hash.len())
            .finish_non_exhaustive()
    }
}

/// Read access to stored credentials.
pub trait CredentialStore: Send + Sync {
    /// Looks up the credential of `credential_id`.
    ///
    /// Returns `Ok(None)` when the identifier does not resolve.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    fn stored_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<StoredCredential>, CollaboratorError>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn stored_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<StoredCredential>, CollaboratorError> {
        (**self).stored_credential(credential_id)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn stored_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<StoredCredential>, CollaboratorError> {
        (**self).stored_credential(credential_id)
    }
}

/// Failed-attempt bookkeeping and lockout decisions.
pub trait FailureTracker: Send + Sync {
    /// Records one failed attempt for `credential_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the attempt cannot be recorded.
    fn record_failure(&self, credential_id: &str) -> Result<(), CollaboratorError>;

    /// Whether `credential_id` is currently locked.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock state cannot be read.
    fn is_locked(&self, credential_id: &str) -> Result<bool, CollaboratorError>;
}

impl<T: FailureTracker + ?Sized> FailureTracker for &T {
    fn record_failure(&self, credential_id: &str) -> Result<(), CollaboratorError> {
        (**self).record_failure(credential_id)
    }

    fn is_locked(&self, credential_id: &str) -> Result<bool, CollaboratorError> {
        (**self).is_locked(credential_id)
    }
}

impl<T: FailureTracker + ?Sized> FailureTracker for Arc<T> {
    fn record_failure(&self, credential_id: &str) -> Result<(), CollaboratorError> {
        (**self).record_failure(credential_id)
    }

    fn is_locked(&self, credential_id: &str) -> Result<bool, CollaboratorError> {
        (**self).is_locked(credential_id)
    }
}

#[cfg(test)]
mod test {
    use super::StoredCredential;
    use crate::hash::Md5Hex;

    #[test]
    fn detects_legacy_credentials() {
        let legacy = StoredCredential::new("946ccf1cf1cfccb6bce540c3b83432f7");
        assert!(legacy.is_legacy_format(&Md5Hex));

        let modern =
            StoredCredential::new("$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie");
        assert!(!modern.is_legacy_format(&Md5Hex));
    }

    #[test]
    fn debug_hides_hash() {
        let credential = StoredCredential::new("946ccf1cf1cfccb6bce540c3b83432f7");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("946ccf"));
        assert!(rendered.contains("hash_len: 32"));
    }
}
