//! Legacy authentication settings.
//!
//! The host owns configuration storage. The verifier reads a
//! [`LegacyAuthConfig`] for its [`ConfigScope`] through a [`ConfigProvider`]
//! on every call and never caches it.
//!
//! Two providers are included:
//!
//! - [`PathConfigProvider`] reads the flag and salt from a path-based source
//!   ([`ScopeConfig`]) using the paths in [`ConfigPaths`].
//! - [`StaticConfigProvider`] returns one fixed value, typically deserialized
//!   by the host from its own configuration file.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CollaboratorError;

/// Default path of the feature flag.
pub const DEFAULT_ENABLE_PATH: &str = "legacyauth/general/enable_md5_auth";

/// Default path of the legacy salt.
pub const DEFAULT_SALT_PATH: &str = "legacyauth/general/md5_salt";

/// Legacy authentication settings for one scope.
///
/// The salt is wiped from memory on drop and redacted from `Debug` output.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct LegacyAuthConfig {
    /// Whether legacy verification runs at all.
    #[serde(default)]
    pub enabled: bool,
    /// Salt prepended to the password before hashing.
    #[serde(default)]
    pub salt: String,
}

impl LegacyAuthConfig {
    /// Enabled configuration with the given salt.
    pub fn enabled(salt: impl Into<String>) -> Self {
        Self {
            enabled: true,
            salt: salt.into(),
        }
    }

    /// Disabled configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for LegacyAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyAuthConfig")
            .field("enabled", &self.enabled)
            .field("salt", &"<redacted>")
            .finish()
    }
}

/// Configuration scope the settings are read for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "code")]
pub enum ConfigScope {
    /// Deployment-wide settings.
    #[default]
    Default,
    /// Settings of one website.
    Website(String),
    /// Settings of one store view.
    Store(String),
}

/// Configuration paths the settings are stored under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPaths {
    /// Path of the feature flag.
    pub enable: String,
    /// Path of the salt.
    pub salt: String,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            enable: DEFAULT_ENABLE_PATH.to_owned(),
            salt: DEFAULT_SALT_PATH.to_owned(),
        }
    }
}

/// Source of [`LegacyAuthConfig`].
pub trait ConfigProvider: Send + Sync {
    /// Reads the settings for `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings cannot be read. The verifier treats
    /// this as legacy authentication being disabled.
    fn legacy_auth_config(&self, scope: &ConfigScope)
        -> Result<LegacyAuthConfig, CollaboratorError>;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for &T {
    fn legacy_auth_config(
        &self,
        scope: &ConfigScope,
    ) -> Result<LegacyAuthConfig, CollaboratorError> {
        (**self).legacy_auth_config(scope)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    fn legacy_auth_config(
        &self,
        scope: &ConfigScope,
    ) -> Result<LegacyAuthConfig, CollaboratorError> {
        (**self).legacy_auth_config(scope)
    }
}

/// Raw path-based configuration source of the host.
pub trait ScopeConfig: Send + Sync {
    /// Returns the value stored at `path` for `scope`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be read.
    fn get_value(
        &self,
        path: &str,
        scope: &ConfigScope,
    ) -> Result<Option<String>, CollaboratorError>;
}

impl<T: ScopeConfig + ?Sized> ScopeConfig for &T {
    fn get_value(
        &self,
        path: &str,
        scope: &ConfigScope,
    ) -> Result<Option<String>, CollaboratorError> {
        (**self).get_value(path, scope)
    }
}

impl<T: ScopeConfig + ?Sized> ScopeConfig for Arc<T> {
    fn get_value(
        &self,
        path: &str,
        scope: &ConfigScope,
    ) -> Result<Option<String>, CollaboratorError> {
        (**self).get_value(path, scope)
    }
}

/// Interprets a stored flag value.
///
/// Empty, `0`, `false`, `no` and `off` are false (trimmed, case-insensitive).
/// Everything else is true.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("off"))
}

/// [`ConfigProvider`] reading from a [`ScopeConfig`] source.
///
/// A missing flag means disabled. A missing salt means an empty salt. The salt
/// is only read when the flag is set.
#[derive(Debug, Clone)]
pub struct PathConfigProvider<S> {
    source: S,
    paths: ConfigPaths,
}

impl<S: ScopeConfig> PathConfigProvider<S> {
    /// Reads from `source` at the default paths.
    pub fn new(source: S) -> Self {
        Self::with_paths(source, ConfigPaths::default())
    }

    /// Reads from `source` at custom paths.
    pub fn with_paths(source: S, paths: ConfigPaths) -> Self {
        Self { source, paths }
    }

    /// Paths this provider reads.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }
}

impl<S: ScopeConfig> ConfigProvider for PathConfigProvider<S> {
    fn legacy_auth_config(
        &self,
        scope: &ConfigScope,
    ) -> Result<LegacyAuthConfig, CollaboratorError> {
        let enabled = self
            .source
            .get_value(&self.paths.enable, scope)?
            .is_some_and(|value| parse_flag(&value));

        if !enabled {
            return Ok(LegacyAuthConfig::disabled());
        }

        let salt = self
            .source
            .get_value(&self.paths.salt, scope)?
            .unwrap_or_default();

        Ok(LegacyAuthConfig::enabled(salt))
    }
}

/// [`ConfigProvider`] returning the same settings for every scope.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: LegacyAuthConfig,
}

impl StaticConfigProvider {
    /// Serves `config` for every scope.
    #[must_use]
    pub fn new(config: LegacyAuthConfig) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn legacy_auth_config(
        &self,
        _scope: &ConfigScope,
    ) -> Result<LegacyAuthConfig, CollaboratorError> {
        Ok(self.config.clone())
    }
}
