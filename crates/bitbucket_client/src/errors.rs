//! Error types for Bitbucket client operations.
//!
//! This module defines the error types that can occur when talking to the Bitbucket
//! Cloud REST API through the bitbucket_client crate. A non-success HTTP status is
//! NOT an error at this level: callers receive it as a [`crate::PipelineResponse`] and
//! decide what it means. Errors here cover the cases where no response was obtained.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during Bitbucket client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use bitbucket_client::Error;
///
/// match client.trigger_pipeline("acme/site", &request, &credentials).await {
///     Ok(response) => println!("Bitbucket answered with HTTP {}", response.status),
///     Err(Error::Transport(e)) => eprintln!("No response from Bitbucket: {}", e),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or no response was received.
    ///
    /// Covers DNS failures, refused connections, TLS errors and timeouts.
    #[error("Failed to reach the Bitbucket API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured API base URL cannot be used to build a request URL.
    #[error("Invalid Bitbucket API base URL: {0}")]
    InvalidBaseUrl(String),

    /// A header value could not be encoded.
    ///
    /// The message never contains the header value itself.
    #[error("Invalid header value for: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialised.
    #[error("Failed to serialize the pipeline request: {0}")]
    Serialization(#[from] serde_json::Error),
}
