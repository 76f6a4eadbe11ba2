//! Passive collection of plain messages posted in `CHANNEL_HRS` channels.
//!
//! Independent of the tag buttons: every message written by a human in a
//! collected channel, or in a thread under one, is forwarded verbatim to
//! the webhook. The author never sees an acknowledgement.

use std::collections::BTreeSet;

use crate::models::record::{RecordDraft, SheetKey};

/// The parts of a gateway message the collector looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel (or thread) the message was posted in.
    pub channel_id: u64,
    /// Channel display name, when it could be resolved.
    pub channel_name: Option<String>,
    /// Parent channel when `channel_id` is a thread.
    pub parent_id: Option<u64>,
    /// Whether the author is a bot account.
    pub author_is_bot: bool,
    /// Author display name.
    pub author_name: String,
    /// Raw message text.
    pub content: String,
}

/// Decides which messages are forwarded.
#[derive(Debug, Clone, Default)]
pub struct PassiveCollector {
    targets: BTreeSet<u64>,
}

impl PassiveCollector {
    /// Collect from the given channels (and their threads).
    #[must_use]
    pub fn new(targets: BTreeSet<u64>) -> Self {
        Self { targets }
    }

    /// Whether the channel, or the thread's parent, is a collection target.
    #[must_use]
    pub fn is_target(&self, channel_id: u64, parent_id: Option<u64>) -> bool {
        self.targets.contains(&channel_id)
            || parent_id.is_some_and(|parent| self.targets.contains(&parent))
    }

    /// Build the record for a message, or `None` if it is not collected.
    ///
    /// Bot-authored messages are never collected.
    #[must_use]
    pub fn draft_for(&self, message: &InboundMessage) -> Option<RecordDraft> {
        if message.author_is_bot || !self.is_target(message.channel_id, message.parent_id) {
            return None;
        }

        let channel = message
            .channel_name
            .clone()
            .unwrap_or_else(|| message.channel_id.to_string());

        Some(RecordDraft::direct(
            message.content.clone(),
            SheetKey::Default,
            channel,
            message.author_name.clone(),
        ))
    }
}
