//! Settings file management for the pipeline trigger CLI.
//!
//! The settings file is the persisted settings store: it holds the Bitbucket
//! deployment settings and the HTTP options. Environment variables override
//! the `[bitbucket]` values per key when a deployment is triggered.
//!
//! The file is stored in TOML format and is loaded from a specified path or
//! from `./pipeline-trigger.toml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use bitbucket_client::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};
use pipeline_trigger_core::StoredSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pipeline-trigger.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Contents of the settings file.
///
/// # Example TOML Configuration
///
/// ```toml
/// [bitbucket]
/// project = "acme/website"
/// branch = "main"
/// username = "deploy-bot"
/// password = "app-password"
///
/// [http]
/// timeout_seconds = 10
/// api_base_url = "https://api.bitbucket.org/2.0"
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stored deployment settings
    #[serde(default)]
    pub bitbucket: StoredSettings,

    /// Options for the request to Bitbucket
    #[serde(default)]
    pub http: HttpConfig,
}

impl AppConfig {
    /// Loads the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// is not valid TOML for this structure.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the settings file at `path`, or returns empty settings if there is none.
    ///
    /// Setups that only use environment variables do not need a settings file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Saves the settings to a TOML file at `path`.
    ///
    /// Parent directories are created when missing; an existing file is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// A settings template with every deployment key present but empty.
    pub fn template() -> Self {
        Self {
            bitbucket: StoredSettings {
                project: Some(String::new()),
                branch: Some(String::new()),
                username: Some(String::new()),
                password: Some(String::new()),
            },
            http: HttpConfig::default(),
        }
    }
}

/// Options for the HTTP request to Bitbucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "HttpConfig::default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Base URL of the Bitbucket REST API
    #[serde(default = "HttpConfig::default_api_base_url")]
    pub api_base_url: String,
}

impl HttpConfig {
    fn default_timeout_seconds() -> u64 {
        DEFAULT_TIMEOUT.as_secs()
    }

    fn default_api_base_url() -> String {
        DEFAULT_API_BASE_URL.to_string()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Self::default_timeout_seconds(),
            api_base_url: Self::default_api_base_url(),
        }
    }
}

/// Resolves the path to the settings file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./pipeline-trigger.toml` in the current directory
/// - Falls back to `.` if the working directory cannot be determined
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
