//! Unit tests for passive collection of `CHANNEL_HRS` messages.

use std::collections::BTreeSet;

use sheet_relay_bot::collector::{InboundMessage, PassiveCollector};
use sheet_relay_bot::models::record::SheetKey;

fn collector() -> PassiveCollector {
    PassiveCollector::new(BTreeSet::from([111]))
}

fn message(channel_id: u64, parent_id: Option<u64>) -> InboundMessage {
    InboundMessage {
        channel_id,
        channel_name: Some("daily-report".into()),
        parent_id,
        author_is_bot: false,
        author_name: "Aki".into(),
        content: "today: fixed the build".into(),
    }
}

#[test]
fn collects_messages_in_target_channel() {
    let draft = collector().draft_for(&message(111, None)).expect("collected");

    assert_eq!(draft.content, "today: fixed the build");
    assert_eq!(draft.channel, "daily-report");
    assert_eq!(draft.user, "Aki");
    assert_eq!(draft.sheet, SheetKey::Default);
}

#[test]
fn collects_messages_in_threads_of_target_channel() {
    assert!(collector().draft_for(&message(4242, Some(111))).is_some());
}

#[test]
fn ignores_other_channels() {
    assert!(collector().draft_for(&message(222, None)).is_none());
    assert!(collector().draft_for(&message(4242, Some(222))).is_none());
}

#[test]
fn ignores_bot_authors() {
    let mut msg = message(111, None);
    msg.author_is_bot = true;
    assert!(collector().draft_for(&msg).is_none());
}

#[test]
fn unnamed_channel_falls_back_to_id() {
    let mut msg = message(111, None);
    msg.channel_name = None;
    let draft = collector().draft_for(&msg).expect("collected");
    assert_eq!(draft.channel, "111");
}

#[test]
fn empty_target_set_collects_nothing() {
    let collector = PassiveCollector::default();
    assert!(!collector.is_target(111, Some(111)));
    assert!(collector.draft_for(&message(111, None)).is_none());
}

#[test]
fn health_channel_messages_still_go_to_default_sheet() {
    let collector = PassiveCollector::new(BTreeSet::from([222]));
    let draft = collector.draft_for(&message(222, None)).expect("collected");
    assert_eq!(draft.sheet, SheetKey::Default);
}
