//! Tag button handler.
//!
//! A press on a `tag:<channel>:<index>` button opens the record form for
//! that tag. Ids that do not resolve are left alone without a response so
//! other components keep working.

use serenity::all::{ComponentInteraction, Context, CreateInteractionResponse};
use tracing::{debug, info};

use crate::discord::components;
use crate::state::AppState;
use crate::{AppError, Result};

/// Open the record form for a pressed tag button.
///
/// Ids that are not resolvable tag buttons get no response.
///
/// # Errors
///
/// Returns `AppError::Discord` if the form cannot be opened.
pub async fn handle_tag_button(
    ctx: &Context,
    component: &ComponentInteraction,
    state: &AppState,
) -> Result<()> {
    let custom_id = component.data.custom_id.as_str();
    let Some(resolved) = state.registry.resolve_button(custom_id) else {
        debug!(custom_id, "component id not routable; ignoring");
        return Ok(());
    };

    info!(
        custom_id,
        label = resolved.tag.label,
        sheet = resolved.sheet.as_str(),
        user_id = component.user.id.get(),
        "opening record form"
    );

    let form = components::record_form(&resolved);
    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(form))
        .await
        .map_err(|err| AppError::Discord(format!("failed to open record form: {err}")))?;

    Ok(())
}
