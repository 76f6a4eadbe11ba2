//! Opaque interaction identifiers baked into buttons and modal forms.
//!
//! Button ids have the shape `tag:<channel-id>:<index>` and modal ids
//! `record:<channel-id>:<index>`. Both are stored inside messages already
//! posted to Discord, so the format must stay stable across restarts.

use std::fmt::{Display, Formatter};

const TAG_PREFIX: &str = "tag";
const RECORD_PREFIX: &str = "record";

/// A parsed interaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteToken {
    /// A tag button press on `channel` for tag position `index`.
    Tag {
        /// Channel the button set belongs to.
        channel: u64,
        /// Position within the channel's tag sequence.
        index: usize,
    },
    /// A record form submission bound to the same `(channel, index)` pair.
    Record {
        /// Channel the originating button set belongs to.
        channel: u64,
        /// Position within the channel's tag sequence.
        index: usize,
    },
    /// Anything else: another feature's id, or a malformed one of ours.
    Unknown,
}

impl RouteToken {
    /// Parse a custom id. Never fails: unrecognised input is `Unknown`.
    #[must_use]
    pub fn parse(custom_id: &str) -> Self {
        let mut parts = custom_id.split(':');
        let (Some(kind), Some(channel), Some(index), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Self::Unknown;
        };

        let (Ok(channel), Ok(index)) = (
            channel.trim().parse::<u64>(),
            index.trim().parse::<usize>(),
        ) else {
            return Self::Unknown;
        };

        match kind {
            TAG_PREFIX => Self::Tag { channel, index },
            RECORD_PREFIX => Self::Record { channel, index },
            _ => Self::Unknown,
        }
    }
}

impl Display for RouteToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag { channel, index } => write!(f, "{TAG_PREFIX}:{channel}:{index}"),
            Self::Record { channel, index } => write!(f, "{RECORD_PREFIX}:{channel}:{index}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
