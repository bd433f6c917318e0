use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipeline_trigger_cli::commands::{
    config_cmd::{self, ConfigCommands},
    deploy_cmd::{self, DeployArgs},
    hooks_cmd::{self, HooksCommands},
};

/// Environment variable holding the log filter directives
const LOG_FILTER_ENV: &str = "PIPELINE_TRIGGER_LOG";

/// Pipeline trigger CLI: start a Bitbucket deployment pipeline
#[derive(Parser)]
#[command(name = "pipeline-trigger")]
#[command(about = "Start a Bitbucket Pipelines deployment for a branch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the deployment pipeline
    Deploy(DeployArgs),

    #[command(subcommand)]
    Config(ConfigCommands),

    #[command(subcommand)]
    Hooks(HooksCommands),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the status line on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Deploy(args) => match deploy_cmd::execute(args).await {
            Ok(outcome) => {
                println!("{}", outcome.message());
                std::process::exit(if outcome.is_started() { 0 } else { 1 });
            }
            Err(e) => {
                error!("Error: {e}");
                println!("Error: {e}");
                std::process::exit(2);
            }
        },
        Commands::Config(cmd) => {
            if let Err(e) = config_cmd::execute(cmd) {
                error!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Hooks(cmd) => {
            if let Err(e) = hooks_cmd::execute(cmd) {
                error!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!(
                "pipeline-trigger version {}",
                option_env!("PIPELINE_TRIGGER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
}
