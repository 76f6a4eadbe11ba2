//! Unit tests for the tag button view and record form builders.
//!
//! Builders are checked through their serialized JSON, which is exactly
//! what Discord receives.

use std::collections::BTreeSet;

use serde_json::Value;
use serenity::all::ButtonStyle;

use sheet_relay_bot::config::ChannelSets;
use sheet_relay_bot::discord::components::{
    record_form, style_for, tag_button_rows, TagViewCatalog, BODY_INPUT_ID,
};
use sheet_relay_bot::models::tag::ChannelSet;
use sheet_relay_bot::registry::TagRegistry;

/// Every JSON object carrying a `custom_id`, in document order.
fn objects_with_custom_id(value: &Value) -> Vec<&serde_json::Map<String, Value>> {
    let mut found = Vec::new();
    collect(value, &mut found);
    found
}

fn collect<'a>(value: &'a Value, found: &mut Vec<&'a serde_json::Map<String, Value>>) {
    match value {
        Value::Object(map) => {
            if map.contains_key("custom_id") {
                found.push(map);
            }
            for child in map.values() {
                collect(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, found);
            }
        }
        _ => {}
    }
}

fn registry() -> TagRegistry {
    TagRegistry::from_channel_sets(&ChannelSets {
        hrs: BTreeSet::from([111]),
        qbox: BTreeSet::from([333]),
        health: BTreeSet::from([222]),
    })
}

#[test]
fn styles_rotate_through_four_values() {
    assert_eq!(style_for(0), ButtonStyle::Primary);
    assert_eq!(style_for(1), ButtonStyle::Success);
    assert_eq!(style_for(2), ButtonStyle::Danger);
    assert_eq!(style_for(3), ButtonStyle::Secondary);
    assert_eq!(style_for(4), ButtonStyle::Primary);
}

#[test]
fn one_button_per_tag_with_deterministic_ids() {
    let rows = tag_button_rows(111, ChannelSet::Hrs.tags());
    assert_eq!(rows.len(), 1);

    let json = serde_json::to_value(&rows).expect("serialize rows");
    let buttons = objects_with_custom_id(&json);

    let ids: Vec<&str> = buttons
        .iter()
        .filter_map(|button| button["custom_id"].as_str())
        .collect();
    assert_eq!(ids, ["tag:111:0", "tag:111:1", "tag:111:2", "tag:111:3"]);

    let labels: Vec<&str> = buttons
        .iter()
        .filter_map(|button| button["label"].as_str())
        .collect();
    assert_eq!(labels, ["報告", "連絡", "相談", "共有"]);

    let styles: Vec<u64> = buttons
        .iter()
        .filter_map(|button| button["style"].as_u64())
        .collect();
    assert_eq!(styles, [1, 3, 4, 2]);
}

#[test]
fn record_form_is_bound_to_tag_position() {
    let resolved = registry().resolve_button("tag:222:0").expect("resolves");
    let json = serde_json::to_value(record_form(&resolved)).expect("serialize form");

    assert_eq!(json["custom_id"], "record:222:0");
    assert_eq!(json["title"], "記録内容を入力");

    let inputs = objects_with_custom_id(&json);
    let body = inputs
        .iter()
        .find(|input| input["custom_id"] == BODY_INPUT_ID)
        .expect("body input present");
    assert_eq!(body["max_length"], 1000);
    assert_ne!(body["required"], true, "body is optional");
    assert_eq!(body["style"], 2, "paragraph input");
}

#[test]
fn catalog_has_a_view_per_registered_channel() {
    let registry = registry();
    let catalog = TagViewCatalog::build(&registry);

    assert_eq!(catalog.len(), 3);
    assert!(catalog.view_for(999).is_none());

    let view = catalog.view_for(333).expect("qbox view");
    let json = serde_json::to_value(view).expect("serialize view");
    assert_eq!(objects_with_custom_id(&json).len(), 3);
}

#[test]
fn empty_registry_builds_empty_catalog() {
    let catalog = TagViewCatalog::build(&TagRegistry::default());
    assert!(catalog.is_empty());
}
