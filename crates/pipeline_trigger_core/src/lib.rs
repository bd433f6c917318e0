//! Core of the pipeline trigger: starts a Bitbucket deployment pipeline on
//! request and reports what happened.
//!
//! The flow is:
//!
//! 1. A [`ConfigProvider`] produces a [`DeploymentConfig`]. The standard
//!    provider, [`LayeredConfigProvider`], takes each value from the environment
//!    when set and from the stored settings otherwise.
//! 2. [`trigger_deploy`] validates the configuration and sends at most one
//!    request through a [`bitbucket_client::PipelineApi`].
//! 3. The resulting [`DeploymentOutcome`] carries the status line for the
//!    operator. Failures are also logged through `tracing`.

pub mod configuration;
pub use configuration::{
    ConfigKey, ConfigProvider, ConfigSource, DeploymentConfig, EnvironmentConfigSource,
    LayeredConfigProvider, ResolvedValue, StoredSettings,
};

pub mod errors;
pub use errors::Error;

pub mod hooks;
pub use hooks::{PublishEvent, PublishHookRegistry, PublishedContent};

pub mod outcome;
pub use outcome::DeploymentOutcome;

pub mod trigger;
pub use trigger::{trigger_deploy, DeploymentTrigger};
