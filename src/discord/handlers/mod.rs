//! Gateway interaction handler sub-modules.
//!
//! Also exposes shared helpers for resolving channel and user display
//! names, used by every handler that builds a record.

pub mod log;
pub mod message;
pub mod pin;
pub mod record_form;
pub mod tag_button;

use std::borrow::Borrow;

use serenity::all::{
    Channel, ChannelId, ChannelType, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Member, User,
};
use tracing::debug;

/// Display details of the channel an event happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Channel name, or the numeric id when it cannot be resolved.
    pub name: String,
    /// Whether `name` came from Discord rather than the id fallback.
    pub resolved: bool,
    /// Parent channel, set only for threads.
    pub parent_id: Option<u64>,
}

/// Look up a channel's name and, for threads, its parent.
///
/// Falls back to the numeric id on any lookup failure.
pub async fn channel_info(ctx: &Context, channel_id: ChannelId) -> ChannelInfo {
    match channel_id.to_channel(ctx).await {
        Ok(Channel::Guild(channel)) => ChannelInfo {
            parent_id: thread_parent(channel.kind, channel.parent_id),
            name: channel.name,
            resolved: true,
        },
        Ok(_) => fallback_channel_info(channel_id),
        Err(err) => {
            debug!(%err, channel_id = channel_id.get(), "channel lookup failed");
            fallback_channel_info(channel_id)
        }
    }
}

fn fallback_channel_info(channel_id: ChannelId) -> ChannelInfo {
    ChannelInfo {
        name: channel_id.get().to_string(),
        resolved: false,
        parent_id: None,
    }
}

/// Parent of a thread channel.
///
/// Regular channels also carry a `parent_id` (their category), which is
/// never treated as a parent here.
#[must_use]
pub fn thread_parent(kind: ChannelType, parent_id: Option<ChannelId>) -> Option<u64> {
    match kind {
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread => {
            parent_id.map(ChannelId::get)
        }
        _ => None,
    }
}

/// Guild nickname, then global display name, then username.
#[must_use]
pub fn preferred_name(nick: Option<&str>, global_name: Option<&str>, username: &str) -> String {
    nick.or(global_name).unwrap_or(username).to_owned()
}

/// Display name of an interaction user.
///
/// Generic over the member holder since interaction kinds differ in
/// whether they box it.
#[must_use]
pub fn display_name<M: Borrow<Member>>(member: Option<&M>, user: &User) -> String {
    preferred_name(
        member.and_then(|member| member.borrow().nick.as_deref()),
        user.global_name.as_deref(),
        &user.name,
    )
}

/// A deferred, ephemeral "thinking" response.
#[must_use]
pub fn ephemeral_defer() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true))
}

/// An immediate ephemeral text reply.
#[must_use]
pub fn ephemeral_reply(text: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(text)
            .ephemeral(true),
    )
}

/// An ephemeral follow-up to a deferred response.
#[must_use]
pub fn ephemeral_followup(text: impl Into<String>) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(text)
        .ephemeral(true)
}
