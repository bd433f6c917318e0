use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the pipeline trigger CLI.
///
/// A deployment that Bitbucket rejects is not an error here; it is reported
/// as a [`pipeline_trigger_core::DeploymentOutcome`]. These errors stop a
/// command before an outcome exists.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading, parsing or writing the settings file.
    ///
    /// Also returned by `config validate` when required settings are missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Bitbucket client could not be created.
    ///
    /// Typically an invalid API base URL in the settings file.
    #[error("Bitbucket client error: {0}")]
    Client(#[from] bitbucket_client::Error),
}
