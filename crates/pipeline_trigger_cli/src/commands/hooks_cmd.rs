use clap::Subcommand;
use pipeline_trigger_core::{PublishEvent, PublishHookRegistry, PublishedContent};
use tracing::{info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "hooks_cmd_tests.rs"]
mod tests;

/// Subcommands for the hooks command
#[derive(Subcommand, Debug)]
pub enum HooksCommands {
    /// List the publish hooks and their handler counts
    List,

    /// Dispatch a publish event as the content system would
    Dispatch {
        /// Hook name: publish_page, publish_news_ideas or publish_work
        event: String,

        /// Identifier of the published content item
        #[arg(long, default_value_t = 0)]
        id: u64,

        /// Title of the published content item
        #[arg(long, default_value = "")]
        title: String,
    },
}

/// Execute the hooks command
#[instrument]
pub fn execute(cmd: &HooksCommands) -> Result<(), Error> {
    let registry = PublishHookRegistry::with_default_hooks();
    let output = match cmd {
        HooksCommands::List => list_hooks(&registry),
        HooksCommands::Dispatch { event, id, title } => dispatch_hook(
            &registry,
            event,
            PublishedContent {
                id: *id,
                title: title.clone(),
            },
        )?,
    };
    println!("{}", output);
    Ok(())
}

fn list_hooks(registry: &PublishHookRegistry) -> String {
    PublishEvent::ALL
        .into_iter()
        .map(|event| format!("{} ({} handler(s))", event, registry.handler_count(event)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn dispatch_hook(
    registry: &PublishHookRegistry,
    event: &str,
    content: PublishedContent,
) -> Result<String, Error> {
    let event: PublishEvent = event
        .parse()
        .map_err(|e: pipeline_trigger_core::Error| Error::InvalidArguments(e.to_string()))?;

    let ran = registry.dispatch(event, &content);
    info!(event = event.as_str(), handlers = ran, "Publish hook dispatched");
    Ok(format!(
        "Dispatched {} to {} handler(s); no deployment was started",
        event, ran
    ))
}
