//! Shared application state handed to every gateway handler.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::collector::PassiveCollector;
use crate::config::BotConfig;
use crate::discord::components::TagViewCatalog;
use crate::health::HealthListener;
use crate::registry::TagRegistry;
use crate::webhook::RecordSubmitter;
use crate::Result;

/// Immutable after construction, apart from the health listener's
/// one-shot start guard.
#[derive(Debug)]
pub struct AppState {
    /// Resolved configuration.
    pub config: Arc<BotConfig>,
    /// Channel → tag sequence mapping.
    pub registry: TagRegistry,
    /// Persistent button rows per registered channel.
    pub views: TagViewCatalog,
    /// Webhook client.
    pub submitter: RecordSubmitter,
    /// `CHANNEL_HRS` message collector.
    pub collector: PassiveCollector,
    /// Liveness endpoint.
    pub health: HealthListener,
    /// Cancelled on process shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Derive every component from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Webhook` if the HTTP client cannot be built.
    pub fn new(config: Arc<BotConfig>, shutdown: CancellationToken) -> Result<Self> {
        let registry = TagRegistry::from_channel_sets(&config.channels);
        let views = TagViewCatalog::build(&registry);
        let submitter = RecordSubmitter::new(&config.webhook)?;
        let collector = PassiveCollector::new(config.channels.hrs.clone());
        let health = HealthListener::new(config.http_port);

        Ok(Self {
            config,
            registry,
            views,
            submitter,
            collector,
            health,
            shutdown,
        })
    }
}
