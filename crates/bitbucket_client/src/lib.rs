//! Crate for starting Bitbucket Cloud pipelines over the REST API.
//!
//! This crate provides a small client that sends one authenticated
//! `POST /repositories/{workspace}/{repo_slug}/pipelines/` request and hands
//! the raw HTTP result back to the caller. The [`PipelineApi`] trait is the
//! seam callers depend on so the transport can be replaced in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, instrument};
use url::Url;

pub mod credentials;
pub use credentials::Credentials;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Pipeline, PipelineRequest, PipelineResponse, PipelineTarget, RefType, TargetType};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URL of the Bitbucket Cloud REST API, version 2.0.
pub const DEFAULT_API_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations for starting pipelines on Bitbucket.
///
/// Implementations return `Ok` for every HTTP response, whatever its status,
/// and `Err` only when no response was obtained.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Starts a pipeline for `project` (`workspace/repo_slug`).
    ///
    /// # Arguments
    ///
    /// * `project` - Repository full name, e.g. `acme/website`.
    /// * `request` - Target of the pipeline.
    /// * `credentials` - Basic-Auth credentials for the request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the request could not be sent or no
    /// response arrived before the timeout.
    async fn trigger_pipeline(
        &self,
        project: &str,
        request: &PipelineRequest,
        credentials: &Credentials,
    ) -> Result<PipelineResponse, Error>;
}

/// A client for the Bitbucket Cloud pipelines API.
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    client: reqwest::Client,
    base_url: Url,
}

impl BitbucketClient {
    /// Creates a client for the public Bitbucket Cloud API with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the underlying HTTP client cannot be built,
    /// for instance when no TLS backend is available.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Creates a client for a specific API base URL and request timeout.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use std::time::Duration;
    /// # use bitbucket_client::BitbucketClient;
    /// # fn example() -> Result<(), bitbucket_client::Error> {
    /// let client = BitbucketClient::with_base_url(
    ///     "https://api.bitbucket.org/2.0",
    ///     Duration::from_secs(30),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if `base_url` is not an absolute http(s) URL
    /// and `Error::Transport` if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pipeline-trigger/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The API base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL of the pipelines collection of `project`.
    ///
    /// The project is inserted verbatim so that the `workspace/repo_slug`
    /// separator stays a path separator.
    pub fn pipelines_url(&self, project: &str) -> String {
        format!(
            "{}/repositories/{}/pipelines/",
            self.base_url.as_str().trim_end_matches('/'),
            project
        )
    }
}

#[async_trait]
impl PipelineApi for BitbucketClient {
    #[instrument(skip(self, request, credentials), fields(project = %project, branch = %request.branch()))]
    async fn trigger_pipeline(
        &self,
        project: &str,
        request: &PipelineRequest,
        credentials: &Credentials,
    ) -> Result<PipelineResponse, Error> {
        let url = self.pipelines_url(project);
        let body = serde_json::to_vec(request)?;

        debug!(url = %url, username = credentials.username(), "Sending pipeline trigger request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, credentials.authorization_header()?)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // A body that cannot be read still leaves us with a status to classify.
        let body = response.text().await.unwrap_or_default();

        debug!(status = status, "Received pipeline trigger response");
        Ok(PipelineResponse::new(status, body))
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let url = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidBaseUrl(format!(
            "{base_url}: unsupported scheme '{other}'"
        ))),
    }
}
