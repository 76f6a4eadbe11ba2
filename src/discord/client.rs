//! Gateway client construction and run loop.

use std::future::Future;
use std::sync::Arc;

use serenity::all::GatewayIntents;
use serenity::Client;
use tracing::info;

use crate::discord::events::BotEventHandler;
use crate::state::AppState;
use crate::{AppError, Result};

/// Intents needed by the bot: the defaults plus message content for the
/// passive collector.
#[must_use]
pub fn intents() -> GatewayIntents {
    GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT
}

/// Build a gateway client wired to the shared state.
///
/// # Errors
///
/// Returns `AppError::Discord` if the client cannot be constructed.
pub async fn build_client(state: Arc<AppState>) -> Result<Client> {
    let token = state.config.discord_token.clone();
    Client::builder(token, intents())
        .event_handler(BotEventHandler::new(state))
        .await
        .map_err(|err| AppError::Discord(format!("failed to build client: {err}")))
}

/// Run the gateway until it stops or `shutdown` resolves.
///
/// # Errors
///
/// Returns `AppError::Discord` if the gateway connection fails.
pub async fn run_until(mut client: Client, shutdown: impl Future<Output = ()>) -> Result<()> {
    let shard_manager = Arc::clone(&client.shard_manager);

    tokio::select! {
        result = client.start() => {
            result.map_err(|err| AppError::Discord(format!("gateway stopped: {err}")))?;
        }
        () = shutdown => {
            info!("shutting down gateway shards");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}
