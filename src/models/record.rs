//! Records sent to the spreadsheet webhook.

use serde::Serialize;

use crate::models::tag::TagDefinition;

/// Destination sheet selector carried in every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKey {
    /// The general log sheet.
    Default,
    /// The health log sheet, used only for `CHANNEL_HEALTH` channels.
    Health,
}

impl SheetKey {
    /// Wire value of the key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Health => "health",
        }
    }
}

/// A record before the shared secret is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Channel display name (or numeric id when the name is unknown).
    pub channel: String,
    /// Display name of the acting user or message author.
    pub user: String,
    /// Recorded text.
    pub content: String,
    /// Destination sheet.
    pub sheet: SheetKey,
}

impl RecordDraft {
    /// Build a record from a tag form submission.
    ///
    /// The content is the tag prefix followed by the body, with surrounding
    /// whitespace trimmed. An empty body records the prefix alone.
    #[must_use]
    pub fn tagged(
        tag: &TagDefinition,
        body: Option<&str>,
        sheet: SheetKey,
        channel: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        let content = format!("{}{}", tag.prefix, body.unwrap_or_default());
        Self {
            channel: channel.into(),
            user: user.into(),
            content: content.trim().to_owned(),
            sheet,
        }
    }

    /// Build a record whose content is sent verbatim.
    #[must_use]
    pub fn direct(
        content: impl Into<String>,
        sheet: SheetKey,
        channel: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            user: user.into(),
            content: content.into(),
            sheet,
        }
    }

    /// Attach the webhook shared token, producing the wire payload.
    #[must_use]
    pub fn into_payload(self, token: &str) -> RecordPayload {
        RecordPayload {
            token: token.to_owned(),
            channel: self.channel,
            user: self.user,
            content: self.content,
            sheet: self.sheet,
        }
    }
}

/// JSON body posted to the webhook:
/// `{token, channel, user, content, sheet}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    /// Shared secret checked by the webhook (`GAS_SHARED_TOKEN`).
    pub token: String,
    /// Channel display name.
    pub channel: String,
    /// User display name.
    pub user: String,
    /// Recorded text.
    pub content: String,
    /// Destination sheet.
    pub sheet: SheetKey,
}
