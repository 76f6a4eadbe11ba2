//! `/log content:<text>` command: record text without the tag form.

use serenity::all::{CommandInteraction, Context};
use tracing::{info, warn};

use crate::discord::handlers::{channel_info, display_name, ephemeral_defer, ephemeral_followup};
use crate::models::record::RecordDraft;
use crate::state::AppState;
use crate::webhook::{AckStyle, Acknowledgement, INTERACTIVE_TIMEOUT};
use crate::{AppError, Result};

/// Name of the command's text option.
pub const CONTENT_OPTION: &str = "content";

/// Record the command's content verbatim.
///
/// # Errors
///
/// Returns `AppError::Discord` if the deferral or the follow-up fails.
pub async fn handle_log(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<()> {
    command
        .create_response(&ctx.http, ephemeral_defer())
        .await
        .map_err(|err| AppError::Discord(format!("failed to defer log: {err}")))?;

    let content = command
        .data
        .options
        .iter()
        .find(|option| option.name == CONTENT_OPTION)
        .and_then(|option| option.value.as_str())
        .unwrap_or_default()
        .to_owned();

    let ack = if state.submitter.is_configured() {
        let channel_id = command.channel_id.get();
        let channel = channel_info(ctx, command.channel_id).await;
        let user = display_name(command.member.as_ref(), &command.user);
        let sheet = state.registry.sheet_for(channel_id);
        let draft = RecordDraft::direct(content, sheet, channel.name, user);
        state.submitter.submit(draft, INTERACTIVE_TIMEOUT).await
    } else {
        Acknowledgement::NotConfigured
    };

    match &ack {
        Acknowledgement::Delivered(delivery) => {
            info!(status = delivery.status, body = %delivery.body_preview, "log recorded");
        }
        Acknowledgement::Failed(err) => warn!(%err, "log not recorded"),
        Acknowledgement::NotConfigured => warn!("log requested without a webhook URL"),
    }

    command
        .create_followup(&ctx.http, ephemeral_followup(ack.render(AckStyle::Command)))
        .await
        .map_err(|err| AppError::Discord(format!("failed to send log follow-up: {err}")))?;

    Ok(())
}
