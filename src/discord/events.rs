//! Gateway event dispatch.
//!
//! Receives `ready`, `message` and `interaction_create` events and routes
//! them to the handler modules. Handler errors are logged here and never
//! propagate into the gateway loop.

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Message, Ready};
use serenity::async_trait;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::discord::{commands, handlers};
use crate::state::AppState;

/// Serenity event handler bound to the shared [`AppState`].
pub struct BotEventHandler {
    state: Arc<AppState>,
}

impl BotEventHandler {
    /// Wrap the shared state.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    async fn on_ready(&self, ctx: &Context, ready: &Ready) {
        let guilds: Vec<u64> = ready.guilds.iter().map(|guild| guild.id.get()).collect();
        info!(
            user = %ready.user.name,
            user_id = ready.user.id.get(),
            guilds = ?guilds,
            "gateway ready"
        );

        let channels = &self.state.config.channels;
        info!(
            hrs = ?channels.hrs,
            qbox = ?channels.qbox,
            health = ?channels.health,
            views = self.state.views.len(),
            "persistent tag views registered"
        );

        if let Err(err) = commands::sync_commands(&ctx.http, self.state.config.guild_id).await {
            error!(%err, "startup command sync failed");
        }

        match self
            .state
            .health
            .ensure_started(self.state.shutdown.clone())
            .await
        {
            Ok(Some(addr)) => info!(%addr, "health server started from ready"),
            Ok(None) => debug!("health server already running"),
            Err(err) => error!(%err, "health server failed to start"),
        }
    }
}

#[async_trait]
impl EventHandler for BotEventHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let shard = ready.shard.as_ref().map(|shard| shard.id.0);
        self.on_ready(&ctx, &ready)
            .instrument(info_span!("ready", shard))
            .await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let span = info_span!("message", message_id = msg.id.get());
        handlers::message::handle_message(&ctx, &msg, &self.state)
            .instrument(span)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let state = &self.state;
        match interaction {
            Interaction::Component(component) => {
                let span = info_span!(
                    "tag_button",
                    custom_id = %component.data.custom_id,
                    user_id = component.user.id.get()
                );
                if let Err(err) = handlers::tag_button::handle_tag_button(&ctx, &component, state)
                    .instrument(span)
                    .await
                {
                    warn!(%err, custom_id = %component.data.custom_id, "tag button failed");
                }
            }
            Interaction::Modal(modal) => {
                let span = info_span!(
                    "record_form",
                    custom_id = %modal.data.custom_id,
                    user_id = modal.user.id.get()
                );
                if let Err(err) = handlers::record_form::handle_record_form(&ctx, &modal, state)
                    .instrument(span)
                    .await
                {
                    warn!(%err, custom_id = %modal.data.custom_id, "record form failed");
                }
            }
            Interaction::Command(command) => {
                let span = info_span!(
                    "command",
                    command = %command.data.name,
                    user_id = command.user.id.get()
                );
                if let Err(err) = commands::handle_command(&ctx, &command, state)
                    .instrument(span)
                    .await
                {
                    warn!(%err, command = %command.data.name, "command failed");
                }
            }
            other => debug!(kind = ?other.kind(), "unhandled interaction type"),
        }
    }
}
