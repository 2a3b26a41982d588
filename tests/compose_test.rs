//! Message composition tests
//!
//! Covers the template lookup, name substitution, and tone prefix behavior
//! end to end through a config loaded from disk.

use codevoice::assistant::Assistant;
use codevoice::config::Config;
use std::fs;
use tempfile::tempdir;

fn assistant_with(config_json: &str) -> Assistant {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");
    fs::write(&path, config_json).expect("write config");
    let config = Config::load(Some(&path)).expect("load");
    Assistant::new(config)
}

#[test]
fn test_context_template_substitutes_name() {
    let assistant = assistant_with(r#"{ "assistant_name": "Nova" }"#);

    let msg = assistant.compose(None, Some("task_completed"), None);
    assert_eq!(msg, "Nova has finished the task");
}

#[test]
fn test_tone_prefix_prepended_exactly() {
    let assistant = assistant_with(r#"{ "assistant_name": "Nova" }"#);

    let msg = assistant.compose(None, Some("blocked"), Some("urgent"));
    assert!(msg.starts_with("Come look at this! "));
    assert!(msg.contains("Nova"));
}

#[test]
fn test_unknown_tone_composes_unprefixed() {
    let assistant = assistant_with(r#"{}"#);

    let with_tone = assistant.compose(Some("deploy finished"), None, Some("jubilant"));
    let without = assistant.compose(Some("deploy finished"), None, None);
    assert_eq!(with_tone, without);
    assert_eq!(with_tone, "deploy finished");
}

#[test]
fn test_custom_template_from_config() {
    let assistant = assistant_with(
        r#"{
            "assistant_name": "Nova",
            "contextual_messages": { "coffee": "{name} suggests a coffee break" }
        }"#,
    );

    let msg = assistant.compose(None, Some("coffee"), None);
    assert_eq!(msg, "Nova suggests a coffee break");

    // Default templates survive alongside the custom one
    let blocked = assistant.compose(None, Some("blocked"), None);
    assert!(blocked.contains("Nova"));
}

#[test]
fn test_literal_message_wins_over_context() {
    let assistant = assistant_with(r#"{}"#);

    let msg = assistant.compose(Some("use me"), Some("blocked"), None);
    assert_eq!(msg, "use me");
}
