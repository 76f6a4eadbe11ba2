//! Channel → tag sequence registry and interaction routing.
//!
//! Built once from [`ChannelSets`] before the gateway connects and never
//! mutated afterwards. Every lookup fails closed: unknown channels and
//! out-of-range indices resolve to `None`.

use std::collections::{BTreeSet, HashMap};

use crate::config::ChannelSets;
use crate::models::record::SheetKey;
use crate::models::route::RouteToken;
use crate::models::tag::{ChannelSet, TagDefinition};

/// A tag resolved from an interaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTag {
    /// Channel whose button set the id refers to.
    pub channel_id: u64,
    /// Position within that channel's sequence.
    pub index: usize,
    /// The tag at that position.
    pub tag: &'static TagDefinition,
    /// Destination sheet for records made through this tag.
    pub sheet: SheetKey,
}

impl ResolvedTag {
    /// Id of the record form this tag opens.
    #[must_use]
    pub fn form_token(&self) -> RouteToken {
        RouteToken::Record {
            channel: self.channel_id,
            index: self.index,
        }
    }
}

/// Immutable mapping from channel id to its tag sequence.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    entries: HashMap<u64, ChannelSet>,
    health: BTreeSet<u64>,
}

impl TagRegistry {
    /// Build the registry from the configured channel sets.
    ///
    /// Sets are applied in `HRS → QBOX → HEALTH` order and a channel listed
    /// in more than one keeps the last assignment.
    #[must_use]
    pub fn from_channel_sets(channels: &ChannelSets) -> Self {
        let mut entries = HashMap::new();
        for set in ChannelSet::ALL {
            for &channel_id in channels.members(set) {
                entries.insert(channel_id, set);
            }
        }

        Self {
            entries,
            health: channels.health.clone(),
        }
    }

    /// Number of serviceable channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no channel is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The set a channel's tags were taken from.
    #[must_use]
    pub fn channel_set(&self, channel_id: u64) -> Option<ChannelSet> {
        self.entries.get(&channel_id).copied()
    }

    /// The ordered tag sequence for a channel.
    #[must_use]
    pub fn tags_for(&self, channel_id: u64) -> Option<&'static [TagDefinition]> {
        self.channel_set(channel_id).map(ChannelSet::tags)
    }

    /// Channel ids with an entry, in ascending order.
    #[must_use]
    pub fn channel_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Routing key for a channel: `Health` iff it is in `CHANNEL_HEALTH`.
    #[must_use]
    pub fn sheet_for(&self, channel_id: u64) -> SheetKey {
        if self.health.contains(&channel_id) {
            SheetKey::Health
        } else {
            SheetKey::Default
        }
    }

    /// Resolve a `(channel, index)` pair to its tag.
    #[must_use]
    pub fn resolve(&self, channel_id: u64, index: usize) -> Option<ResolvedTag> {
        let tag = self.tags_for(channel_id)?.get(index)?;
        Some(ResolvedTag {
            channel_id,
            index,
            tag,
            sheet: self.sheet_for(channel_id),
        })
    }

    /// Resolve a button id (`tag:<channel>:<index>`).
    ///
    /// Form ids and foreign ids resolve to `None` so that other features'
    /// components pass through untouched.
    #[must_use]
    pub fn resolve_button(&self, custom_id: &str) -> Option<ResolvedTag> {
        match RouteToken::parse(custom_id) {
            RouteToken::Tag { channel, index } => self.resolve(channel, index),
            RouteToken::Record { .. } | RouteToken::Unknown => None,
        }
    }

    /// Resolve a form id (`record:<channel>:<index>`).
    #[must_use]
    pub fn resolve_form(&self, custom_id: &str) -> Option<ResolvedTag> {
        match RouteToken::parse(custom_id) {
            RouteToken::Record { channel, index } => self.resolve(channel, index),
            RouteToken::Tag { .. } | RouteToken::Unknown => None,
        }
    }
}
