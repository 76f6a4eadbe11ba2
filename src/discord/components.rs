//! Discord component builders.
//!
//! Provides the persistent tag button rows posted by `/pin` and the record
//! form opened by each button.

use std::collections::HashMap;

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateInputText, CreateModal, InputTextStyle,
};

use crate::models::route::RouteToken;
use crate::models::tag::TagDefinition;
use crate::registry::{ResolvedTag, TagRegistry};

/// Custom id of the body input inside the record form.
pub const BODY_INPUT_ID: &str = "body";

/// Maximum length of the form body.
pub const BODY_MAX_LENGTH: u16 = 1000;

const FORM_TITLE: &str = "記録内容を入力";
const BODY_LABEL: &str = "本文（任意）";
const BODY_PLACEHOLDER: &str = "例）#健康相談 ○○の症状が…";

const BUTTONS_PER_ROW: usize = 5;

const STYLE_ROTATION: [ButtonStyle; 4] = [
    ButtonStyle::Primary,
    ButtonStyle::Success,
    ButtonStyle::Danger,
    ButtonStyle::Secondary,
];

/// Button style for the tag at `index`.
#[must_use]
pub fn style_for(index: usize) -> ButtonStyle {
    STYLE_ROTATION[index % STYLE_ROTATION.len()]
}

/// One button per tag, ids `tag:<channel>:<index>`, split into rows.
#[must_use]
pub fn tag_button_rows(channel_id: u64, tags: &[TagDefinition]) -> Vec<CreateActionRow> {
    let buttons: Vec<CreateButton> = tags
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            let custom_id = RouteToken::Tag {
                channel: channel_id,
                index,
            };
            CreateButton::new(custom_id.to_string())
                .label(tag.label)
                .style(style_for(index))
        })
        .collect();

    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| CreateActionRow::Buttons(row.to_vec()))
        .collect()
}

/// The record form opened by a tag button.
///
/// The form id carries the tag position, so the submission can be
/// re-resolved without in-memory state.
#[must_use]
pub fn record_form(tag: &ResolvedTag) -> CreateModal {
    let body = CreateInputText::new(InputTextStyle::Paragraph, BODY_LABEL, BODY_INPUT_ID)
        .placeholder(BODY_PLACEHOLDER)
        .required(false)
        .max_length(BODY_MAX_LENGTH);

    CreateModal::new(tag.form_token().to_string(), FORM_TITLE)
        .components(vec![CreateActionRow::InputText(body)])
}

/// Button rows for every registered channel, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TagViewCatalog {
    views: HashMap<u64, Vec<CreateActionRow>>,
}

impl TagViewCatalog {
    /// Build one view per channel in the registry.
    #[must_use]
    pub fn build(registry: &TagRegistry) -> Self {
        let views = registry
            .channel_ids()
            .into_iter()
            .filter_map(|channel_id| {
                registry
                    .tags_for(channel_id)
                    .map(|tags| (channel_id, tag_button_rows(channel_id, tags)))
            })
            .collect();
        Self { views }
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no view is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Button rows for a channel, if it has a view.
    #[must_use]
    pub fn view_for(&self, channel_id: u64) -> Option<&[CreateActionRow]> {
        self.views.get(&channel_id).map(Vec::as_slice)
    }
}
