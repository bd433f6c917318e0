//! Starting a deployment pipeline and reporting the outcome.
//!
//! One trigger attempt makes at most one request to Bitbucket. It is never
//! retried. Every outcome other than [`DeploymentOutcome::Started`] writes one
//! diagnostic log line; the app password never appears in any log output.

use bitbucket_client::{Credentials, PipelineApi, PipelineRequest};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, instrument, warn};

use crate::configuration::{ConfigProvider, DeploymentConfig};
use crate::outcome::DeploymentOutcome;

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

/// Starts the pipeline described by `config` and classifies the result.
///
/// # Arguments
///
/// * `api` - Transport used to reach Bitbucket.
/// * `config` - Settings for this attempt. All four values must be present.
///
/// # Returns
///
/// The outcome of the attempt. When a setting is missing the outcome is
/// [`DeploymentOutcome::MissingConfig`] and no request is sent.
#[instrument(skip(api, config), fields(project = %config.project, branch = %config.branch))]
pub async fn trigger_deploy(api: &dyn PipelineApi, config: &DeploymentConfig) -> DeploymentOutcome {
    let missing = config.missing_fields();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|k| k.setting_name()).collect();
        warn!(
            missing = %names.join(","),
            "Failed to start deployment: invalid configuration"
        );
        return DeploymentOutcome::MissingConfig { missing };
    }

    let request = PipelineRequest::for_branch(config.branch.as_str());
    let credentials = Credentials::new(
        config.username.as_str(),
        SecretString::from(config.credential().expose_secret().to_string()),
    );

    let response = match api
        .trigger_pipeline(&config.project, &request, &credentials)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to start deployment: no response from the deployment pipeline");
            return DeploymentOutcome::TransportError {
                detail: e.to_string(),
            };
        }
    };

    let outcome = DeploymentOutcome::from_status(response.status, &config.project);
    if outcome.is_started() {
        let pipeline = response.pipeline();
        info!(
            build_number = ?pipeline.as_ref().and_then(|p| p.build_number),
            pipeline_uuid = ?pipeline.as_ref().map(|p| p.uuid.as_str()),
            "Deployment pipeline started"
        );
    } else {
        error!(
            status = response.status,
            bitbucket_message = ?response.error_message(),
            "Failed to start deployment: response code {}",
            response.status
        );
    }

    outcome
}

/// Owns a transport and triggers deployments through it.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_client::BitbucketClient;
/// use pipeline_trigger_core::{DeploymentConfig, DeploymentTrigger};
///
/// # async fn example() -> Result<(), bitbucket_client::Error> {
/// let trigger = DeploymentTrigger::new(BitbucketClient::new()?);
/// let config = DeploymentConfig::new("acme/website", "main", "deploy-bot", "app-password");
///
/// let outcome = trigger.trigger(&config).await;
/// println!("{}", outcome);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeploymentTrigger<A> {
    api: A,
}

impl<A: PipelineApi> DeploymentTrigger<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Triggers a deployment with an explicit configuration.
    pub async fn trigger(&self, config: &DeploymentConfig) -> DeploymentOutcome {
        trigger_deploy(&self.api, config).await
    }

    /// Loads the configuration from `provider`, then triggers a deployment.
    pub async fn trigger_with(&self, provider: &dyn ConfigProvider) -> DeploymentOutcome {
        let config = provider.load();
        self.trigger(&config).await
    }
}
