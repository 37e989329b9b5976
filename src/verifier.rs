//! The legacy credential verifier.
//!
//! [`LegacyCredentialVerifier`] wraps the host's primary authentication call.
//! It only takes over when legacy authentication is enabled and the stored
//! hash has the legacy format. In that case it always reaches a definitive
//! decision and the primary path is never run.

use tracing::{debug, info, warn};

use crate::compare::{Comparator, ConstantTime};
use crate::config::{ConfigProvider, ConfigScope, LegacyAuthConfig};
use crate::error::{AuthError, Result};
use crate::hash::{salted_hash, LegacyHasher, Md5Hex};
use crate::store::{CredentialStore, FailureTracker};

/// Why a legacy credential was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Wrong password, and the account is locked as a result.
    AccountLocked,
    /// Wrong password.
    InvalidCredentials,
}

impl From<Rejection> for AuthError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::AccountLocked => AuthError::AccountLocked,
            Rejection::InvalidCredentials => AuthError::InvalidCredentials,
        }
    }
}

/// Result of the legacy decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The password matched the legacy hash.
    ///
    /// The stored hash is left untouched; rehashing it with the primary
    /// scheme is up to the host.
    Accepted,
    /// The password did not match the legacy hash.
    Rejected(Rejection),
    /// No decision was made; the primary path must run.
    Deferred,
}

impl VerificationOutcome {
    /// Returns `true` for [`VerificationOutcome::Accepted`].
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Verifies passwords against legacy salted hashes, deferring everything
/// else to the host's primary verifier.
///
/// The verifier holds no mutable state. Configuration, the stored credential
/// and the lock status are read fresh on every call, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct LegacyCredentialVerifier<C, S, T, H = Md5Hex, Q = ConstantTime> {
    config: C,
    store: S,
    tracker: T,
    hasher: H,
    comparator: Q,
    scope: ConfigScope,
}

impl<C, S, T> LegacyCredentialVerifier<C, S, T>
where
    C: ConfigProvider,
    S: CredentialStore,
    T: FailureTracker,
{
    /// Creates a verifier using salted MD5 and constant-time comparison,
    /// reading configuration for [`ConfigScope::Default`].
    pub fn new(config: C, store: S, tracker: T) -> Self {
        Self {
            config,
            store,
            tracker,
            hasher: Md5Hex,
            comparator: ConstantTime,
            scope: ConfigScope::Default,
        }
    }
}

impl<C, S, T, H, Q> LegacyCredentialVerifier<C, S, T, H, Q>
where
    C: ConfigProvider,
    S: CredentialStore,
    T: FailureTracker,
    H: LegacyHasher,
    Q: Comparator,
{
    /// Reads configuration for `scope` instead.
    #[must_use]
    pub fn with_scope(mut self, scope: ConfigScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replaces the legacy hash function.
    pub fn with_hasher<H2: LegacyHasher>(
        self,
        hasher: H2,
    ) -> LegacyCredentialVerifier<C, S, T, H2, Q> {
        LegacyCredentialVerifier {
            config: self.config,
            store: self.store,
            tracker: self.tracker,
            hasher,
            comparator: self.comparator,
            scope: self.scope,
        }
    }

    /// Replaces the hash comparison primitive.
    pub fn with_comparator<Q2: Comparator>(
        self,
        comparator: Q2,
    ) -> LegacyCredentialVerifier<C, S, T, H, Q2> {
        LegacyCredentialVerifier {
            config: self.config,
            store: self.store,
            tracker: self.tracker,
            hasher: self.hasher,
            comparator,
            scope: self.scope,
        }
    }

    /// Scope configuration is read for.
    pub fn scope(&self) -> &ConfigScope {
        &self.scope
    }

    /// Authenticates `password` for `credential_id`, running `fallback` when
    /// the legacy path does not apply.
    ///
    /// `fallback` is the host's primary verifier. It runs exactly once when
    /// legacy authentication is disabled, the credential is unknown, or the
    /// stored hash is not in the legacy format. Its result is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AccountLocked`] / [`AuthError::InvalidCredentials`] when
    ///   a legacy hash did not match.
    /// - [`AuthError::CredentialStore`] / [`AuthError::FailureTracker`] when a
    ///   collaborator failed.
    /// - Whatever `fallback` returns.
    pub fn verify<F, E>(
        &self,
        credential_id: &str,
        password: &str,
        fallback: F,
    ) -> std::result::Result<bool, E>
    where
        F: FnOnce() -> std::result::Result<bool, E>,
        E: From<AuthError>,
    {
        match self.decide(credential_id, password)? {
            VerificationOutcome::Accepted => Ok(true),
            VerificationOutcome::Rejected(rejection) => Err(AuthError::from(rejection).into()),
            VerificationOutcome::Deferred => fallback(),
        }
    }

    /// Runs the legacy decision without a fallback.
    ///
    /// # Errors
    ///
    /// Returns an error only when the credential store or failure tracker
    /// fails. A wrong password is [`VerificationOutcome::Rejected`].
    #[tracing::instrument(name = "legacy_auth.decide", skip_all, fields(credential_id = %credential_id))]
    pub fn decide(&self, credential_id: &str, password: &str) -> Result<VerificationOutcome> {
        let config = match self.config.legacy_auth_config(&self.scope) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    error = %err,
                    scope = ?self.scope,
                    "legacy auth config unreadable, treating as disabled"
                );
                LegacyAuthConfig::disabled()
            }
        };

        if !config.enabled {
            debug!("legacy auth disabled, deferring");
            return Ok(VerificationOutcome::Deferred);
        }

        let Some(credential) = self
            .store
            .stored_credential(credential_id)
            .map_err(AuthError::CredentialStore)?
        else {
            debug!("credential not found, deferring");
            return Ok(VerificationOutcome::Deferred);
        };

        if !credential.is_legacy_format(&self.hasher) {
            debug!(
                hash_len = credential.hash().len(),
                "hash not in legacy format, deferring"
            );
            return Ok(VerificationOutcome::Deferred);
        }

        let computed = salted_hash(&self.hasher, &config.salt, password);
        if self.comparator.matches(&computed, credential.hash()) {
            info!(upgrade_recommended = true, "legacy credential accepted");
            return Ok(VerificationOutcome::Accepted);
        }

        self.tracker
            .record_failure(credential_id)
            .map_err(AuthError::FailureTracker)?;
        let locked = self
            .tracker
            .is_locked(credential_id)
            .map_err(AuthError::FailureTracker)?;

        warn!(locked, "legacy credential rejected");

        Ok(VerificationOutcome::Rejected(if locked {
            Rejection::AccountLocked
        } else {
            Rejection::InvalidCredentials
        }))
    }
}
