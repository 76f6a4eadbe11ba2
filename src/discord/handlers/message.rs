//! Plain message handler feeding the passive collector.

use serenity::all::{Context, Message};
use tracing::{debug, info, warn};

use crate::collector::InboundMessage;
use crate::discord::handlers::{channel_info, preferred_name};
use crate::state::AppState;
use crate::webhook::{Acknowledgement, PASSIVE_TIMEOUT};

/// Log every inbound message and forward collected ones to the webhook.
///
/// Channel details are looked up only for messages that could be
/// collected. Failures are logged only; nothing is posted back to the
/// channel.
pub async fn handle_message(ctx: &Context, msg: &Message, state: &AppState) {
    info!(
        guild_id = ?msg.guild_id.map(|id| id.get()),
        channel_id = msg.channel_id.get(),
        author_bot = msg.author.bot,
        len = msg.content.chars().count(),
        "message received"
    );

    if msg.author.bot || !state.submitter.is_configured() {
        return;
    }

    let channel = channel_info(ctx, msg.channel_id).await;
    debug!(
        channel_name = ?channel.resolved.then_some(channel.name.as_str()),
        parent_id = ?channel.parent_id,
        "message channel resolved"
    );

    if !state
        .collector
        .is_target(msg.channel_id.get(), channel.parent_id)
    {
        debug!(channel_id = msg.channel_id.get(), "message not in a collected channel");
        return;
    }

    let author_name = preferred_name(
        msg.member.as_ref().and_then(|member| member.nick.as_deref()),
        msg.author.global_name.as_deref(),
        &msg.author.name,
    );

    let inbound = InboundMessage {
        channel_id: msg.channel_id.get(),
        channel_name: channel.resolved.then_some(channel.name),
        parent_id: channel.parent_id,
        author_is_bot: msg.author.bot,
        author_name,
        content: msg.content.clone(),
    };

    let Some(draft) = state.collector.draft_for(&inbound) else {
        return;
    };

    match state.submitter.submit(draft, PASSIVE_TIMEOUT).await {
        Acknowledgement::Delivered(delivery) => {
            info!(status = delivery.status, "collected message forwarded");
        }
        Acknowledgement::Failed(err) => {
            warn!(%err, "collected message not forwarded");
        }
        Acknowledgement::NotConfigured => {}
    }
}
