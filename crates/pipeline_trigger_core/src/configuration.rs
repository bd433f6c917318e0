//! Deployment configuration and the sources it is read from.
//!
//! A trigger needs four values: the repository (`workspace/repo_slug`), the
//! branch to build, and the Basic-Auth username and app password. Each value
//! is looked up in an override source (the process environment) first and in
//! the stored settings second, independently per key.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

/// Default prefix of the environment variables that override stored settings.
pub const DEFAULT_ENV_PREFIX: &str = "BITBUCKET_";

/// Placeholder shown instead of secret values.
pub const MASKED_VALUE: &str = "********";

/// Identifies one of the four deployment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Project,
    Branch,
    Username,
    Password,
}

impl ConfigKey {
    /// All keys, in the order they are reported.
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Project,
        ConfigKey::Branch,
        ConfigKey::Username,
        ConfigKey::Password,
    ];

    /// Name of the key in the settings store.
    pub fn setting_name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Branch => "branch",
            Self::Username => "username",
            Self::Password => "password",
        }
    }

    /// Environment variable name for this key with the given prefix.
    pub fn env_var(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.setting_name().to_ascii_uppercase())
    }

    /// Whether values of this key must never be displayed or logged.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting_name())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.setting_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownConfigKey(s.to_string()))
    }
}

/// The settings needed for one trigger attempt.
///
/// The credential is kept in a [`SecretString`]; the derived `Debug` output
/// redacts it.
#[derive(Debug)]
pub struct DeploymentConfig {
    /// Repository full name, `workspace/repo_slug`.
    pub project: String,
    /// Branch whose pipeline is started.
    pub branch: String,
    /// Basic-Auth username.
    pub username: String,
    credential: SecretString,
}

impl DeploymentConfig {
    pub fn new(
        project: impl Into<String>,
        branch: impl Into<String>,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            branch: branch.into(),
            username: username.into(),
            credential: SecretString::from(credential.into()),
        }
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    /// Keys whose value is empty or whitespace only.
    pub fn missing_fields(&self) -> Vec<ConfigKey> {
        use secrecy::ExposeSecret;

        ConfigKey::ALL
            .into_iter()
            .filter(|key| {
                let value = match key {
                    ConfigKey::Project => self.project.as_str(),
                    ConfigKey::Branch => self.branch.as_str(),
                    ConfigKey::Username => self.username.as_str(),
                    ConfigKey::Password => self.credential.expose_secret(),
                };
                value.trim().is_empty()
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A place configuration values can be read from.
pub trait ConfigSource: Send + Sync {
    /// Short name used when reporting where a value came from.
    fn name(&self) -> &'static str;

    /// Returns the raw value for `key`, if this source has one.
    fn value(&self, key: ConfigKey) -> Option<String>;
}

/// Reads settings from `BITBUCKET_*` environment variables.
#[derive(Debug, Clone)]
pub struct EnvironmentConfigSource {
    prefix: String,
}

impl EnvironmentConfigSource {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Uses `prefix` instead of `BITBUCKET_`, e.g. `STAGING_` reads `STAGING_PROJECT`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix prepended to the upper-cased setting name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for EnvironmentConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvironmentConfigSource {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn value(&self, key: ConfigKey) -> Option<String> {
        std::env::var(key.env_var(&self.prefix)).ok()
    }
}

/// Deployment settings as kept in the persisted settings store.
///
/// Every field is optional; unset fields fall through to "missing".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for StoredSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSettings")
            .field("project", &self.project)
            .field("branch", &self.branch)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| MASKED_VALUE))
            .finish()
    }
}

impl ConfigSource for StoredSettings {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Project => self.project.clone(),
            ConfigKey::Branch => self.branch.clone(),
            ConfigKey::Username => self.username.clone(),
            ConfigKey::Password => self.password.clone(),
        }
    }
}

/// Produces the configuration for a trigger attempt.
pub trait ConfigProvider {
    fn load(&self) -> DeploymentConfig;
}

/// A value after precedence has been applied, with the source that supplied it.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub key: ConfigKey,
    pub value: Option<String>,
    /// Name of the source that supplied the value; `None` when unset.
    pub source: Option<&'static str>,
}

impl ResolvedValue {
    /// The value as it may be shown to an operator; secrets are masked.
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(_) if self.key.is_secret() => MASKED_VALUE.to_string(),
            Some(value) => value.clone(),
            None => String::new(),
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedValue")
            .field("key", &self.key)
            .field("value", &self.display_value())
            .field("source", &self.source)
            .finish()
    }
}

/// Applies per-key precedence between two sources.
///
/// For each key the override value wins when it is present and not blank;
/// otherwise the fallback value is used. Values are passed through as supplied.
#[derive(Debug, Clone)]
pub struct LayeredConfigProvider<O, F> {
    override_source: O,
    fallback: F,
}

impl<O: ConfigSource, F: ConfigSource> LayeredConfigProvider<O, F> {
    pub fn new(override_source: O, fallback: F) -> Self {
        Self {
            override_source,
            fallback,
        }
    }

    /// Resolves a single key.
    pub fn resolve_key(&self, key: ConfigKey) -> ResolvedValue {
        let sources: [&dyn ConfigSource; 2] = [&self.override_source, &self.fallback];
        for source in sources {
            if let Some(value) = non_blank(source.value(key)) {
                return ResolvedValue {
                    key,
                    value: Some(value),
                    source: Some(source.name()),
                };
            }
        }

        ResolvedValue {
            key,
            value: None,
            source: None,
        }
    }

    /// Resolves every key, in [`ConfigKey::ALL`] order.
    pub fn resolve(&self) -> Vec<ResolvedValue> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| self.resolve_key(key))
            .collect()
    }
}

impl<O: ConfigSource, F: ConfigSource> ConfigProvider for LayeredConfigProvider<O, F> {
    fn load(&self) -> DeploymentConfig {
        let value = |key| self.resolve_key(key).value.unwrap_or_default();
        DeploymentConfig::new(
            value(ConfigKey::Project),
            value(ConfigKey::Branch),
            value(ConfigKey::Username),
            value(ConfigKey::Password),
        )
    }
}

// Blankness is judged on the trimmed value; the value itself is kept as supplied.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
