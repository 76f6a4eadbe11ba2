//! Spreadsheet webhook client.
//!
//! Every record path (tag form, `/log`, passive collection) ends here: the
//! draft gets the shared secret attached, is POSTed once as JSON, and the
//! outcome is folded into an [`Acknowledgement`]. Nothing is retried.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::WebhookConfig;
use crate::models::record::{RecordDraft, RecordPayload};
use crate::{AppError, Result};

/// Timeout for POSTs made while a user waits on an interaction.
pub const INTERACTIVE_TIMEOUT: Duration = Duration::from_secs(12);

/// Timeout for background POSTs from the passive collector.
pub const PASSIVE_TIMEOUT: Duration = Duration::from_secs(8);

const BODY_PREVIEW_CHARS: usize = 120;

const NOT_CONFIGURED_TEXT: &str = "GAS_URL 未設定";

/// A completed POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// HTTP status returned by the webhook.
    pub status: u16,
    /// First characters of the response body, for logs only.
    pub body_preview: String,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    /// No webhook URL configured; no request was made.
    NotConfigured,
    /// The webhook answered (any status).
    Delivered(Delivery),
    /// The request failed in transport; carries the error text.
    Failed(String),
}

/// Which reply wording an acknowledgement is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStyle {
    /// Replies to a tag form submission.
    Form,
    /// Replies to the `/log` command.
    Command,
}

impl Acknowledgement {
    /// Ephemeral reply text shown to the invoking user.
    #[must_use]
    pub fn render(&self, style: AckStyle) -> String {
        match (self, style) {
            (Self::NotConfigured, _) => NOT_CONFIGURED_TEXT.to_owned(),
            (Self::Delivered(delivery), AckStyle::Form) => {
                format!("記録しました（{}）", delivery.status)
            }
            (Self::Delivered(delivery), AckStyle::Command) => {
                format!("status={}", delivery.status)
            }
            (Self::Failed(err), _) => format!("送信エラー: {err}"),
        }
    }
}

/// Posts records to the configured webhook.
#[derive(Debug, Clone)]
pub struct RecordSubmitter {
    client: reqwest::Client,
    url: Option<String>,
    shared_token: String,
}

impl RecordSubmitter {
    /// Build the submitter and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Webhook` if the HTTP client cannot be constructed.
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| AppError::Webhook(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            url: config.url.clone(),
            shared_token: config.shared_token.clone(),
        })
    }

    /// Whether a webhook URL is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Attach the shared secret to a draft.
    #[must_use]
    pub fn payload(&self, draft: RecordDraft) -> RecordPayload {
        draft.into_payload(&self.shared_token)
    }

    /// Submit a draft once, bounded by `timeout`.
    ///
    /// Never returns an error: a missing URL and transport failures are
    /// reported through the returned [`Acknowledgement`].
    pub async fn submit(&self, draft: RecordDraft, timeout: Duration) -> Acknowledgement {
        let Some(url) = self.url.as_deref() else {
            return Acknowledgement::NotConfigured;
        };

        let payload = self.payload(draft);
        match self.post(url, &payload, timeout).await {
            Ok(delivery) => {
                info!(
                    status = delivery.status,
                    sheet = payload.sheet.as_str(),
                    channel = %payload.channel,
                    "webhook POST completed"
                );
                Acknowledgement::Delivered(delivery)
            }
            Err(err) => {
                warn!(%err, sheet = payload.sheet.as_str(), "webhook POST failed");
                Acknowledgement::Failed(err.to_string())
            }
        }
    }

    async fn post(
        &self,
        url: &str,
        payload: &RecordPayload,
        timeout: Duration,
    ) -> std::result::Result<Delivery, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body_preview = match response.text().await {
            Ok(body) => body.chars().take(BODY_PREVIEW_CHARS).collect(),
            Err(err) => {
                warn!(%err, status, "failed to read webhook response body");
                String::new()
            }
        };

        Ok(Delivery {
            status,
            body_preview,
        })
    }
}
