//! Application command definitions, sync and routing.

use serenity::all::{
    Command, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    GuildId, Http,
};
use tracing::{info, warn};

use crate::discord::handlers::{self, ephemeral_defer, ephemeral_followup, ephemeral_reply};
use crate::state::AppState;
use crate::{AppError, Result};

/// The full command surface registered with Discord.
#[must_use]
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("pin").description("このチャンネルにタグボタンを常設します（公開）"),
        CreateCommand::new("log")
            .description("内容をスプレッドシートに記録します")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    handlers::log::CONTENT_OPTION,
                    "記録する内容",
                )
                .required(true),
            ),
        CreateCommand::new("ping").description("応答テスト"),
        CreateCommand::new("sync").description("コマンド同期"),
    ]
}

/// Where a sync registered the commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Guild the commands were scoped to, `None` for global.
    pub guild_id: Option<u64>,
    /// Names of the registered commands as reported by Discord.
    pub names: Vec<String>,
}

impl SyncReport {
    /// Reply text for the `/sync` command.
    #[must_use]
    pub fn render(&self) -> String {
        match self.guild_id {
            Some(_) => format!("synced: {:?}", self.names),
            None => format!("global synced: {:?}", self.names),
        }
    }
}

/// Reply text for the `/sync` command, from the sync outcome.
#[must_use]
pub fn sync_reply(outcome: &serenity::Result<SyncReport>) -> String {
    match outcome {
        Ok(report) => report.render(),
        Err(err) => format!("sync error: {err}"),
    }
}

/// Replace the registered commands, guild-scoped when `guild_id` is set.
///
/// # Errors
///
/// Returns the Discord error if the registration is rejected.
pub async fn sync_commands(http: &Http, guild_id: Option<u64>) -> serenity::Result<SyncReport> {
    let registered = match guild_id {
        Some(id) => GuildId::new(id).set_commands(http, definitions()).await,
        None => Command::set_global_commands(http, definitions()).await,
    }?;

    let report = SyncReport {
        guild_id,
        names: registered.into_iter().map(|command| command.name).collect(),
    };
    info!(guild_id = ?report.guild_id, names = ?report.names, "commands synced");
    Ok(report)
}

/// Route an application command to its handler.
///
/// # Errors
///
/// Returns `AppError::Discord` if the response cannot be sent.
pub async fn handle_command(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<()> {
    let name = command.data.name.as_str();
    info!(
        command = name,
        user_id = command.user.id.get(),
        channel_id = command.channel_id.get(),
        "received command"
    );

    match name {
        "pin" => handlers::pin::handle_pin(ctx, command, state).await,
        "log" => handlers::log::handle_log(ctx, command, state).await,
        "ping" => Ok(command
            .create_response(&ctx.http, ephemeral_reply("pong"))
            .await?),
        "sync" => handle_sync(ctx, command, state).await,
        _ => {
            warn!(command = name, "unknown command");
            Ok(())
        }
    }
}

async fn handle_sync(ctx: &Context, command: &CommandInteraction, state: &AppState) -> Result<()> {
    command
        .create_response(&ctx.http, ephemeral_defer())
        .await
        .map_err(|err| AppError::Discord(format!("failed to defer sync: {err}")))?;

    let outcome = sync_commands(&ctx.http, state.config.guild_id).await;
    if let Err(err) = &outcome {
        warn!(%err, "sync command failed");
    }
    let reply = sync_reply(&outcome);

    command
        .create_followup(&ctx.http, ephemeral_followup(reply))
        .await
        .map_err(|err| AppError::Discord(format!("failed to send sync follow-up: {err}")))?;
    Ok(())
}
