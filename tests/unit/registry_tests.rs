//! Unit tests for the tag registry and interaction routing.

use std::collections::BTreeSet;

use sheet_relay_bot::config::ChannelSets;
use sheet_relay_bot::models::record::SheetKey;
use sheet_relay_bot::models::route::RouteToken;
use sheet_relay_bot::models::tag::ChannelSet;
use sheet_relay_bot::registry::TagRegistry;

fn channel_sets(hrs: &[u64], qbox: &[u64], health: &[u64]) -> ChannelSets {
    ChannelSets {
        hrs: hrs.iter().copied().collect::<BTreeSet<_>>(),
        qbox: qbox.iter().copied().collect(),
        health: health.iter().copied().collect(),
    }
}

fn sample_registry() -> TagRegistry {
    TagRegistry::from_channel_sets(&channel_sets(&[111, 112], &[333], &[222]))
}

#[test]
fn sequence_length_matches_assigned_set() {
    let registry = sample_registry();

    assert_eq!(registry.tags_for(111).map(<[_]>::len), Some(4));
    assert_eq!(registry.tags_for(112).map(<[_]>::len), Some(4));
    assert_eq!(registry.tags_for(333).map(<[_]>::len), Some(3));
    assert_eq!(registry.tags_for(222).map(<[_]>::len), Some(2));
    assert_eq!(registry.len(), 4);
}

#[test]
fn unconfigured_channel_has_no_entry() {
    let registry = sample_registry();
    assert_eq!(registry.tags_for(999), None);
    assert_eq!(registry.resolve(999, 0), None);
}

#[test]
fn empty_configuration_yields_empty_registry() {
    let registry = TagRegistry::from_channel_sets(&ChannelSets::default());
    assert!(registry.is_empty());
    assert!(registry.channel_ids().is_empty());
}

#[test]
fn fixed_tag_tables() {
    let labels = |set: ChannelSet| set.tags().iter().map(|tag| tag.label).collect::<Vec<_>>();

    assert_eq!(labels(ChannelSet::Hrs), ["報告", "連絡", "相談", "共有"]);
    assert_eq!(labels(ChannelSet::Qbox), ["質問", "相談", "提案"]);
    assert_eq!(labels(ChannelSet::Health), ["健康相談", "お薬相談"]);

    for set in ChannelSet::ALL {
        for tag in set.tags() {
            assert_eq!(tag.prefix, format!("#{} ", tag.label));
        }
    }
}

#[test]
fn every_in_range_button_resolves_to_its_tag() {
    let registry = sample_registry();

    for channel_id in registry.channel_ids() {
        let tags = registry.tags_for(channel_id).expect("registered");
        for (index, expected) in tags.iter().enumerate() {
            let id = RouteToken::Tag {
                channel: channel_id,
                index,
            }
            .to_string();
            let resolved = registry.resolve_button(&id).expect("resolves");
            assert_eq!(resolved.channel_id, channel_id);
            assert_eq!(resolved.index, index);
            assert_eq!(resolved.tag, expected);
        }
    }
}

#[test]
fn malformed_button_ids_do_not_resolve() {
    let registry = sample_registry();

    for id in [
        "tag:111",
        "tag:111:0:1",
        "tag:abc:0",
        "tag:111:first",
        "tag:111:4",
        "tag:333:3",
        "tag:222:2",
        "tag:999:0",
        "tag:111:-1",
        "record:111:0",
        "approve_accept",
        "",
    ] {
        assert_eq!(registry.resolve_button(id), None, "id {id:?} must not resolve");
    }
}

#[test]
fn form_ids_resolve_only_as_forms() {
    let registry = sample_registry();

    let resolved = registry.resolve_form("record:222:1").expect("resolves");
    assert_eq!(resolved.tag.label, "お薬相談");
    assert_eq!(resolved.sheet, SheetKey::Health);

    assert_eq!(registry.resolve_form("tag:222:1"), None);
    assert_eq!(registry.resolve_form("record:222:2"), None);
}

#[test]
fn button_opens_matching_form() {
    let registry = sample_registry();
    let resolved = registry.resolve_button("tag:333:2").expect("resolves");

    assert_eq!(resolved.form_token().to_string(), "record:333:2");
    assert_eq!(
        registry.resolve_form(&resolved.form_token().to_string()),
        Some(resolved)
    );
}

#[test]
fn sheet_key_is_health_only_for_health_channels() {
    let registry = sample_registry();

    assert_eq!(registry.sheet_for(222), SheetKey::Health);
    assert_eq!(registry.sheet_for(111), SheetKey::Default);
    assert_eq!(registry.sheet_for(333), SheetKey::Default);
    assert_eq!(registry.sheet_for(999), SheetKey::Default);
}

#[test]
fn channel_in_several_sets_keeps_last_assignment() {
    let registry = TagRegistry::from_channel_sets(&channel_sets(&[500, 501], &[500], &[501]));

    assert_eq!(registry.channel_set(500), Some(ChannelSet::Qbox));
    assert_eq!(registry.tags_for(500).map(<[_]>::len), Some(3));
    assert_eq!(registry.channel_set(501), Some(ChannelSet::Health));
    assert_eq!(registry.tags_for(501).map(<[_]>::len), Some(2));
    assert_eq!(registry.sheet_for(501), SheetKey::Health);
}

#[test]
fn channel_ids_are_sorted() {
    let registry = sample_registry();
    assert_eq!(registry.channel_ids(), vec![111, 112, 222, 333]);
}
