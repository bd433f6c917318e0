//! Deploy command module.
//!
//! Resolves the deployment settings (environment first, then the settings
//! file), builds the Bitbucket client and starts one pipeline run.

use std::time::Duration;

use bitbucket_client::BitbucketClient;
use clap::Args;
use pipeline_trigger_core::{
    configuration::DEFAULT_ENV_PREFIX, DeploymentOutcome, DeploymentTrigger,
    EnvironmentConfigSource, LayeredConfigProvider,
};
use tracing::{debug, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "deploy_cmd_tests.rs"]
mod tests;

/// Arguments for the deploy command
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Path to the settings file
    #[arg(short, long)]
    pub settings: Option<String>,

    /// Request timeout in seconds; overrides the settings file
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Base URL of the Bitbucket REST API; overrides the settings file
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Prefix of the environment variables that override stored settings
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,
}

impl Default for DeployArgs {
    fn default() -> Self {
        Self {
            settings: None,
            timeout: None,
            api_base_url: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

/// Execute the deploy command.
///
/// # Returns
///
/// The outcome of the trigger attempt. Rejections by Bitbucket and transport
/// failures are outcomes, not errors.
///
/// # Errors
///
/// * `Error::Config` - The settings file exists but cannot be read or parsed.
/// * `Error::InvalidArguments` - The timeout is zero.
/// * `Error::Client` - The API base URL is invalid.
#[instrument(skip(args), fields(settings = ?args.settings))]
pub async fn execute(args: &DeployArgs) -> Result<DeploymentOutcome, Error> {
    let config_path = get_config_path(args.settings.as_deref());
    let app_config = AppConfig::load_or_default(&config_path)?;

    let timeout_seconds = args.timeout.unwrap_or(app_config.http.timeout_seconds);
    if timeout_seconds == 0 {
        return Err(Error::InvalidArguments(
            "the timeout must be greater than zero seconds".to_string(),
        ));
    }

    let base_url = args
        .api_base_url
        .as_deref()
        .unwrap_or(&app_config.http.api_base_url);
    let client = BitbucketClient::with_base_url(base_url, Duration::from_secs(timeout_seconds))?;
    debug!(
        api_base_url = %client.base_url(),
        timeout_seconds, "Created Bitbucket client"
    );

    let provider = LayeredConfigProvider::new(
        EnvironmentConfigSource::with_prefix(args.env_prefix.as_str()),
        app_config.bitbucket,
    );

    let trigger = DeploymentTrigger::new(client);
    Ok(trigger.trigger_with(&provider).await)
}
