use std::path::PathBuf;

use clap::Subcommand;
use pipeline_trigger_core::{
    configuration::DEFAULT_ENV_PREFIX, EnvironmentConfigSource, LayeredConfigProvider,
    ResolvedValue,
};
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create a settings file template
    Init {
        /// Path to save the settings file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the effective settings and where each value comes from
    Show {
        /// Path to the settings file
        #[arg(short, long)]
        path: Option<String>,

        /// Prefix of the environment variables that override stored settings
        #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
        env_prefix: String,
    },

    /// Check that the settings file parses and every setting has a value
    Validate {
        /// Path to the settings file
        #[arg(short, long)]
        path: Option<String>,

        /// Prefix of the environment variables that override stored settings
        #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
        env_prefix: String,
    },
}

/// Execute the config command
#[instrument]
pub fn execute(cmd: &ConfigCommands) -> Result<(), Error> {
    match cmd {
        ConfigCommands::Init { path } => {
            let config_path = init_config(path.as_deref())?;
            println!("Configuration initialized at {:?}", config_path);
        }
        ConfigCommands::Show { path, env_prefix } => {
            print!("{}", show_config(path.as_deref(), env_prefix)?);
        }
        ConfigCommands::Validate { path, env_prefix } => {
            println!("{}", validate_config(path.as_deref(), env_prefix)?);
        }
    }
    Ok(())
}

/// Writes an empty settings template. An existing file is never overwritten.
#[instrument]
fn init_config(path: Option<&str>) -> Result<PathBuf, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::template().save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    Ok(config_path)
}

/// Renders the effective settings. The password is masked.
#[instrument]
fn show_config(path: Option<&str>, env_prefix: &str) -> Result<String, Error> {
    let config_path = get_config_path(path);
    let app_config = AppConfig::load_or_default(&config_path)?;

    let environment = EnvironmentConfigSource::with_prefix(env_prefix);
    let mut output = format!(
        "Settings file: {}\nEnvironment prefix: {}\n",
        config_path.display(),
        environment.prefix()
    );

    let provider = LayeredConfigProvider::new(environment, app_config.bitbucket);
    for resolved in provider.resolve() {
        output.push_str(&render_resolved(&resolved));
        output.push('\n');
    }
    output.push_str(&format!(
        "timeout_seconds = {}\napi_base_url = {}\n",
        app_config.http.timeout_seconds, app_config.http.api_base_url
    ));
    Ok(output)
}

/// Checks that the settings file parses and that every setting resolves to a value.
#[instrument]
fn validate_config(path: Option<&str>, env_prefix: &str) -> Result<String, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Validating configuration", path = ?config_path);

    let app_config = AppConfig::load_or_default(&config_path)?;
    let provider = LayeredConfigProvider::new(
        EnvironmentConfigSource::with_prefix(env_prefix),
        app_config.bitbucket,
    );

    let missing: Vec<&str> = provider
        .resolve()
        .iter()
        .filter(|resolved| resolved.value.is_none())
        .map(|resolved| resolved.key.setting_name())
        .collect();

    if !missing.is_empty() {
        error!(
            message = "Configuration is incomplete",
            path = ?config_path,
            missing = %missing.join(",")
        );
        return Err(Error::Config(format!(
            "Missing settings: {}",
            missing.join(", ")
        )));
    }

    info!(message = "Configuration is valid", path = ?config_path);
    Ok("Configuration is valid".to_string())
}

fn render_resolved(resolved: &ResolvedValue) -> String {
    match resolved.source {
        Some(source) => format!(
            "{} = {} ({})",
            resolved.key,
            resolved.display_value(),
            source
        ),
        None => format!("{} = <unset>", resolved.key),
    }
}
