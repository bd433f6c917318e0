//! Outcomes of a deployment trigger attempt.

use std::fmt;

use crate::configuration::ConfigKey;

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

const FAILURE_PREFIX: &str = "Failed to start deployment";

/// What happened when a deployment was requested.
///
/// Every variant maps to exactly one operator-facing status line, see
/// [`DeploymentOutcome::message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    /// Bitbucket accepted the request (HTTP 201) and queued a pipeline.
    Started { project: String },

    /// Bitbucket rejected the request as malformed (HTTP 400).
    InvalidRequest,

    /// The account or repository does not exist or is not visible (HTTP 404).
    NotFound,

    /// Bitbucket answered with any other status code.
    UnexpectedResponse { status: u16 },

    /// No HTTP response was obtained.
    TransportError { detail: String },

    /// Required settings were not all supplied; nothing was sent.
    MissingConfig { missing: Vec<ConfigKey> },
}

impl DeploymentOutcome {
    /// Classifies an HTTP status returned by the pipelines endpoint.
    pub fn from_status(status: u16, project: &str) -> Self {
        match status {
            201 => Self::Started {
                project: project.to_string(),
            },
            400 => Self::InvalidRequest,
            404 => Self::NotFound,
            status => Self::UnexpectedResponse { status },
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// HTTP status behind this outcome, for outcomes that had a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Started { .. } => Some(201),
            Self::InvalidRequest => Some(400),
            Self::NotFound => Some(404),
            Self::UnexpectedResponse { status } => Some(*status),
            Self::TransportError { .. } | Self::MissingConfig { .. } => None,
        }
    }

    /// Status line shown to the operator who requested the deployment.
    pub fn message(&self) -> String {
        let reason = match self {
            Self::Started { project } => return format!("Starting deploy to {project}"),
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "the account or repository was not found",
            Self::UnexpectedResponse { .. } => "unexpected response from the deployment pipeline",
            Self::TransportError { .. } => "unknown error with the deployment pipeline",
            Self::MissingConfig { .. } => "invalid configuration",
        };
        format!("{FAILURE_PREFIX}: {reason}")
    }
}

impl fmt::Display for DeploymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
