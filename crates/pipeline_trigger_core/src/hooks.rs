//! Content publish hooks.
//!
//! The host content system announces publish events for pages, news ideas and
//! work items. Handlers are registered per event. The default registry installs
//! one handler per event that does nothing: publishing content does not start a
//! deployment, only the explicit deploy action does.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;

/// Publish events a handler can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishEvent {
    /// A page was published
    Page,
    /// A news idea was published
    NewsIdeas,
    /// A work item was published
    Work,
}

impl PublishEvent {
    pub const ALL: [PublishEvent; 3] = [Self::Page, Self::NewsIdeas, Self::Work];

    /// Name of the hook as announced by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "publish_page",
            Self::NewsIdeas => "publish_news_ideas",
            Self::Work => "publish_work",
        }
    }
}

impl fmt::Display for PublishEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::UnknownPublishEvent(s.to_string()))
    }
}

/// The content item a publish event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedContent {
    pub id: u64,
    pub title: String,
}

/// Callback run when a publish event is dispatched.
pub type PublishHandler = Box<dyn Fn(PublishEvent, &PublishedContent) + Send + Sync>;

/// Handlers registered per publish event.
#[derive(Default)]
pub struct PublishHookRegistry {
    handlers: HashMap<PublishEvent, Vec<PublishHandler>>,
}

impl PublishHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a no-op handler for every publish event.
    pub fn with_default_hooks() -> Self {
        let mut registry = Self::new();
        for event in PublishEvent::ALL {
            registry.register(event, ignore_publish);
        }
        registry
    }

    pub fn register<H>(&mut self, event: PublishEvent, handler: H)
    where
        H: Fn(PublishEvent, &PublishedContent) + Send + Sync + 'static,
    {
        self.handlers
            .entry(event)
            .or_default()
            .push(Box::new(handler));
    }

    /// Runs every handler registered for `event`.
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&self, event: PublishEvent, content: &PublishedContent) -> usize {
        let handlers = match self.handlers.get(&event) {
            Some(h) => h,
            None => return 0,
        };

        debug!(
            event = event.as_str(),
            content_id = content.id,
            handler_count = handlers.len(),
            "Dispatching publish hook"
        );
        for handler in handlers {
            handler(event, content);
        }
        handlers.len()
    }

    pub fn handler_count(&self, event: PublishEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }

    /// Events with at least one handler, in [`PublishEvent::ALL`] order.
    pub fn events(&self) -> Vec<PublishEvent> {
        PublishEvent::ALL
            .into_iter()
            .filter(|event| self.handler_count(*event) > 0)
            .collect()
    }
}

impl fmt::Debug for PublishHookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&str, usize)> = PublishEvent::ALL
            .into_iter()
            .map(|event| (event.as_str(), self.handler_count(event)))
            .collect();
        f.debug_struct("PublishHookRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

fn ignore_publish(_event: PublishEvent, _content: &PublishedContent) {}
