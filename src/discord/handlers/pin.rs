//! `/pin` command: post the channel's tag buttons publicly.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use tracing::{info, warn};

use crate::discord::handlers::ephemeral_reply;
use crate::state::AppState;
use crate::{AppError, Result};

const PIN_PROMPT: &str = "タグを選んでください：";

const MISSING_TAG_SET: &str =
    "このチャンネル用のタグセットが未定義です（Variablesの CHANNEL_* を確認してください）。";

/// Post the persistent button view, or explain that the channel has none.
///
/// # Errors
///
/// Returns `AppError::Discord` if the response cannot be sent.
pub async fn handle_pin(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<()> {
    let channel_id = command.channel_id.get();

    let response = match state.views.view_for(channel_id) {
        Some(rows) => {
            info!(channel_id, "pinning tag buttons");
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(PIN_PROMPT)
                    .components(rows.to_vec()),
            )
        }
        None => {
            warn!(channel_id, "pin requested in a channel without a tag set");
            ephemeral_reply(MISSING_TAG_SET)
        }
    };

    command
        .create_response(&ctx.http, response)
        .await
        .map_err(|err| AppError::Discord(format!("failed to answer pin: {err}")))
}
