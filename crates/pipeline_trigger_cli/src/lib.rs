//! Pipeline trigger CLI library.
//!
//! Holds the command implementations and the settings file handling used by
//! the `pipeline-trigger` binary.

pub mod commands;
pub mod config;
pub mod errors;
