#![doc = include_str!("../README.md")]
#![forbid(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]

extern crate alloc;

pub mod compare;
pub mod config;
pub mod error;
pub mod hash;
pub mod memory;
pub mod store;
pub mod verifier;

pub use compare::{constant_time_eq, Comparator, ConstantTime};
pub use config::{
    ConfigPaths, ConfigProvider, ConfigScope, LegacyAuthConfig, PathConfigProvider, ScopeConfig,
    StaticConfigProvider,
};
pub use error::{AuthError, CollaboratorError, Result};
pub use hash::{LegacyHasher, Md5Hex, LEGACY_HASH_LENGTH};
pub use store::{CredentialStore, FailureTracker, StoredCredential};
pub use verifier::{LegacyCredentialVerifier, Rejection, VerificationOutcome};
