//! Bot configuration resolved from environment variables.
//!
//! Every value comes from the process environment (optionally seeded from a
//! `.env` file during local development). Malformed channel lists degrade to
//! empty sets; only a missing gateway token is fatal.

use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::models::tag::ChannelSet;
use crate::{AppError, Result};

/// Default health listener port when `PORT` is unset.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Set by the hosting platform; its presence disables `.env` loading.
const HOSTED_MARKER: &str = "RAILWAY_ENVIRONMENT";

/// Spreadsheet webhook settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebhookConfig {
    /// Webhook endpoint (`GAS_URL`). `None` disables every POST.
    pub url: Option<String>,
    /// Shared secret embedded in each payload (`GAS_SHARED_TOKEN`).
    pub shared_token: String,
}

/// The three channel membership sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSets {
    /// `CHANNEL_HRS` members.
    pub hrs: BTreeSet<u64>,
    /// `CHANNEL_QBOX` members.
    pub qbox: BTreeSet<u64>,
    /// `CHANNEL_HEALTH` members.
    pub health: BTreeSet<u64>,
}

impl ChannelSets {
    /// Members of one set.
    #[must_use]
    pub fn members(&self, set: ChannelSet) -> &BTreeSet<u64> {
        match set {
            ChannelSet::Hrs => &self.hrs,
            ChannelSet::Qbox => &self.qbox,
            ChannelSet::Health => &self.health,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Gateway bot token (`DISCORD_TOKEN`).
    pub discord_token: String,
    /// Guild scope for command sync (`GUILD_ID`); `None` syncs globally.
    pub guild_id: Option<u64>,
    /// Webhook endpoint and secret.
    pub webhook: WebhookConfig,
    /// Channel membership sets.
    pub channels: ChannelSets,
    /// Health listener port (`PORT`).
    pub http_port: u16,
}

impl BotConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DISCORD_TOKEN` is absent or blank, or
    /// if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BotConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = non_blank("DISCORD_TOKEN")
            .map(|token| token.trim().to_owned())
            .ok_or_else(|| AppError::Config("DISCORD_TOKEN 未設定".into()))?;

        let guild_id = non_blank("GUILD_ID").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                warn!(value = %raw, "GUILD_ID is not a valid guild id; syncing globally");
                None
            }
        });

        let http_port = match non_blank("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|err| AppError::Config(format!("invalid PORT {raw:?}: {err}")))?,
            None => DEFAULT_HTTP_PORT,
        };

        let webhook = WebhookConfig {
            url: non_blank("GAS_URL").map(|url| url.trim().to_owned()),
            shared_token: lookup("GAS_SHARED_TOKEN").unwrap_or_default(),
        };

        let channels = ChannelSets {
            hrs: parse_ids(lookup(ChannelSet::Hrs.env_key()).as_deref()),
            qbox: parse_ids(lookup(ChannelSet::Qbox.env_key()).as_deref()),
            health: parse_ids(lookup(ChannelSet::Health.env_key()).as_deref()),
        };

        info!(
            hrs = ?channels.hrs,
            qbox = ?channels.qbox,
            health = ?channels.health,
            guild_id = ?guild_id,
            webhook_configured = webhook.url.is_some(),
            "configuration resolved"
        );

        Ok(Self {
            discord_token,
            guild_id,
            webhook,
            channels,
            http_port,
        })
    }
}

/// Parse a comma-separated list of numeric channel ids.
///
/// Empty and non-numeric entries are skipped; `None` yields an empty set.
#[must_use]
pub fn parse_ids(raw: Option<&str>) -> BTreeSet<u64> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse::<u64>().ok())
            .collect()
    })
    .unwrap_or_default()
}

/// Load a `.env` file into the process environment for local runs.
///
/// Skipped entirely on the hosting platform. With no explicit path the
/// usual `.env` lookup from the working directory applies. A missing file
/// is not an error.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read, or
/// `AppError::Config` if it cannot be parsed.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if env::var_os(HOSTED_MARKER).is_some() {
        info!("hosted environment detected; skipping .env");
        return Ok(None);
    }

    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            info!(path = %path.display(), ".env loaded");
            Ok(Some(path))
        }
        Err(err) if err.not_found() => Ok(None),
        Err(dotenvy::Error::Io(err)) => Err(err.into()),
        Err(err) => Err(AppError::Config(format!("failed to load .env: {err}"))),
    }
}
