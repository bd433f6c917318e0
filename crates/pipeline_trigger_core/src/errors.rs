use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by the pipeline trigger core.
///
/// Outcomes of a trigger attempt are not errors; they are reported through
/// [`crate::DeploymentOutcome`]. This type covers invalid input handed to the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration key name was not recognised.
    #[error("Unknown configuration key: {0}")]
    UnknownConfigKey(String),

    /// A publish hook name was not recognised.
    #[error("Unknown publish event: {0}")]
    UnknownPublishEvent(String),
}
