//! Record form submission handler.
//!
//! Defers the interaction first so the webhook call can outlive the
//! platform's response window, then reports the webhook status (or error)
//! as an ephemeral follow-up.

use serenity::all::{ActionRowComponent, Context, ModalInteraction};
use tracing::{debug, info, warn};

use crate::discord::components::BODY_INPUT_ID;
use crate::discord::handlers::{channel_info, display_name, ephemeral_defer, ephemeral_followup};
use crate::models::record::RecordDraft;
use crate::state::AppState;
use crate::webhook::{AckStyle, Acknowledgement, INTERACTIVE_TIMEOUT};
use crate::{AppError, Result};

/// Text typed into the body field, if any.
fn submitted_body(modal: &ModalInteraction) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == BODY_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
}

/// Record a submitted tag form.
///
/// Form ids that do not resolve to a tag get no response.
///
/// # Errors
///
/// Returns `AppError::Discord` if the follow-up message cannot be sent.
pub async fn handle_record_form(
    ctx: &Context,
    modal: &ModalInteraction,
    state: &AppState,
) -> Result<()> {
    let custom_id = modal.data.custom_id.as_str();
    let Some(resolved) = state.registry.resolve_form(custom_id) else {
        debug!(custom_id, "form id not routable; ignoring");
        return Ok(());
    };

    if let Err(err) = modal.create_response(&ctx.http, ephemeral_defer()).await {
        warn!(%err, custom_id, "failed to defer form submission");
    }

    let ack = if state.submitter.is_configured() {
        let channel = channel_info(ctx, modal.channel_id).await;
        let user = display_name(modal.member.as_ref(), &modal.user);
        let body = submitted_body(modal);
        let draft = RecordDraft::tagged(
            resolved.tag,
            body.as_deref(),
            resolved.sheet,
            channel.name,
            user,
        );
        state.submitter.submit(draft, INTERACTIVE_TIMEOUT).await
    } else {
        Acknowledgement::NotConfigured
    };

    info!(custom_id, ack = ?ack, "record form processed");

    modal
        .create_followup(&ctx.http, ephemeral_followup(ack.render(AckStyle::Form)))
        .await
        .map_err(|err| AppError::Discord(format!("failed to send form follow-up: {err}")))?;

    Ok(())
}
