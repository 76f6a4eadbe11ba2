//! Liveness endpoint for the hosting platform.
//!
//! Answers `GET /` with `200 ok` and nothing else. The listener is started
//! at most once per process no matter how many times the gateway reports
//! `ready`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{AppError, Result};

/// Handler for `GET /`.
async fn health() -> &'static str {
    "ok"
}

/// The health router: a single `/` route.
#[must_use]
pub fn router() -> Router {
    Router::new().route("/", get(health))
}

/// One-shot health listener.
#[derive(Debug)]
pub struct HealthListener {
    bind: SocketAddr,
    started: AtomicBool,
}

impl HealthListener {
    /// Listener for `0.0.0.0:<port>`.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self::with_addr(SocketAddr::from(([0, 0, 0, 0], port)))
    }

    /// Listener for an explicit address.
    #[must_use]
    pub fn with_addr(bind: SocketAddr) -> Self {
        Self {
            bind,
            started: AtomicBool::new(false),
        }
    }

    /// Whether [`HealthListener::ensure_started`] has already run.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Bind and serve in the background, once.
    ///
    /// Returns the bound address on the first call and `None` on every
    /// later call. The guard is taken before binding, so a failed bind is
    /// not retried.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` if the port cannot be bound.
    pub async fn ensure_started(&self, ct: CancellationToken) -> Result<Option<SocketAddr>> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(None);
        }

        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| AppError::Http(format!("failed to bind {}: {err}", self.bind)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| AppError::Http(format!("failed to read bound address: {err}")))?;

        info!(addr = %local_addr, "health server listening");

        tokio::spawn(async move {
            let result = axum::serve(listener, router())
                .with_graceful_shutdown(async move { ct.cancelled().await })
                .await;
            if let Err(err) = result {
                error!(%err, "health server terminated");
            }
            info!("health server shut down");
        });

        Ok(Some(local_addr))
    }
}
