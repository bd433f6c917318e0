//! Tests for publish hook registration and dispatch.

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn sample_content() -> PublishedContent {
    PublishedContent {
        id: 42,
        title: "About us".to_string(),
    }
}

#[test]
fn test_publish_event_names() {
    assert_eq!(PublishEvent::Page.as_str(), "publish_page");
    assert_eq!(PublishEvent::NewsIdeas.as_str(), "publish_news_ideas");
    assert_eq!(PublishEvent::Work.as_str(), "publish_work");
    assert_eq!(PublishEvent::Work.to_string(), "publish_work");
}

#[test]
fn test_publish_event_from_str() {
    assert_eq!("publish_page".parse::<PublishEvent>(), Ok(PublishEvent::Page));
    assert_eq!(
        "publish_news_ideas".parse::<PublishEvent>(),
        Ok(PublishEvent::NewsIdeas)
    );
    assert_eq!(
        "publish_post".parse::<PublishEvent>(),
        Err(Error::UnknownPublishEvent("publish_post".to_string()))
    );
}

#[test]
fn test_default_hooks_cover_every_event() {
    let registry = PublishHookRegistry::with_default_hooks();

    assert_eq!(registry.events(), PublishEvent::ALL.to_vec());
    for event in PublishEvent::ALL {
        assert_eq!(registry.handler_count(event), 1);
    }
}

#[test]
fn test_default_hooks_dispatch_runs_no_op_handler() {
    let registry = PublishHookRegistry::with_default_hooks();

    let ran = registry.dispatch(PublishEvent::Page, &sample_content());

    assert_eq!(ran, 1);
}

#[test]
fn test_empty_registry_dispatch_runs_nothing() {
    let registry = PublishHookRegistry::new();

    assert_eq!(registry.dispatch(PublishEvent::Work, &sample_content()), 0);
    assert!(registry.events().is_empty());
}

#[test]
fn test_registered_handlers_receive_event_and_content() {
    let mut registry = PublishHookRegistry::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_by_handler = Arc::clone(&seen);
    registry.register(PublishEvent::Work, move |event, content| {
        assert_eq!(event, PublishEvent::Work);
        assert_eq!(content.id, 42);
        seen_by_handler.fetch_add(1, Ordering::SeqCst);
    });

    registry.dispatch(PublishEvent::Work, &sample_content());
    registry.dispatch(PublishEvent::Page, &sample_content());

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(registry.events(), vec![PublishEvent::Work]);
}

#[test]
fn test_debug_lists_handler_counts() {
    let registry = PublishHookRegistry::with_default_hooks();

    let debug_output = format!("{:?}", registry);

    assert!(debug_output.contains("publish_page"));
    assert!(debug_output.contains("publish_work"));
}
