//! Bitbucket pipeline request and response types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Kind of git reference a pipeline is started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefType {
    /// A named branch
    Branch,
}

/// Bitbucket's discriminator for the target object of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Target identified by a git reference
    PipelineRefTarget,
}

/// The reference a pipeline runs against.
///
/// Field order matters: it is the order the fields appear in the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTarget {
    pub ref_type: RefType,

    #[serde(rename = "type")]
    pub target_type: TargetType,

    pub ref_name: String,
}

/// Body of `POST /repositories/{workspace}/{repo_slug}/pipelines/`.
///
/// See [Bitbucket pipelines API](https://developer.atlassian.com/cloud/bitbucket/rest/api-group-pipelines/).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub target: PipelineTarget,
}

impl PipelineRequest {
    /// Creates a request that runs the pipeline configured for `branch`.
    pub fn for_branch(branch: impl Into<String>) -> Self {
        Self {
            target: PipelineTarget {
                ref_type: RefType::Branch,
                target_type: TargetType::PipelineRefTarget,
                ref_name: branch.into(),
            },
        }
    }

    /// The branch the pipeline will run for.
    pub fn branch(&self) -> &str {
        &self.target.ref_name
    }
}

/// A pipeline as returned by Bitbucket after it was created.
///
/// Only the fields used for diagnostics are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pipeline {
    pub uuid: String,

    #[serde(default)]
    pub build_number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Raw HTTP result of a pipeline trigger request.
///
/// Any status code, including 4xx and 5xx, is represented here. Interpreting
/// the status is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResponse {
    pub status: u16,
    pub body: String,
}

impl PipelineResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the created pipeline from the body, if the body describes one.
    pub fn pipeline(&self) -> Option<Pipeline> {
        serde_json::from_str(&self.body).ok()
    }

    /// Extracts the message of a Bitbucket error body (`{"error": {"message": ...}}`).
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(&self.body)
            .ok()
            .map(|envelope| envelope.error.message)
    }
}
