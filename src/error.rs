//! Error types.
//!
//! [`AuthError`] is what the legacy path reports to the host. Errors raised by
//! the host's own fallback never pass through here; they are returned to the
//! caller unchanged.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by an external collaborator (configuration source,
/// credential store or failure tracker).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl CollaboratorError {
    /// Creates an error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human readable description, without the source chain.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced while verifying a legacy credential.
///
/// # Non-exhaustive
///
/// New variants may be added without a semver-breaking change, so matches
/// need a wildcard arm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The legacy hash did not match and the account is now locked.
    ///
    /// Hosts must treat this as a hard stop.
    #[error("The account is locked.")]
    AccountLocked,

    /// The legacy hash did not match.
    #[error("Invalid login or password.")]
    InvalidCredentials,

    /// The credential store could not be read.
    #[error("Credential store error: {0}")]
    CredentialStore(#[source] CollaboratorError),

    /// The failure tracker could not record or report the attempt.
    #[error("Failure tracker error: {0}")]
    FailureTracker(#[source] CollaboratorError),
}

impl AuthError {
    /// Returns `true` for a definitive rejection of the supplied password, as
    /// opposed to a collaborator fault.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::AccountLocked | Self::InvalidCredentials)
    }
}

/// Result type alias for legacy authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
