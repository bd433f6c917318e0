//! Command modules for the pipeline trigger CLI.
//!
//! - `config_cmd`: Settings file creation, inspection and validation
//! - `deploy_cmd`: Starts the Bitbucket deployment pipeline
//! - `hooks_cmd`: Lists and dispatches the content publish hooks

pub mod config_cmd;
pub mod deploy_cmd;
pub mod hooks_cmd;
