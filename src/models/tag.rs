//! Tag definitions and the fixed tag tables for each channel set.

/// An immutable `(label, prefix)` pair shown as one button.
///
/// The label is the button text; the prefix is prepended to the recorded
/// content when the button's form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDefinition {
    /// Button label.
    pub label: &'static str,
    /// Text prepended to the submitted body.
    pub prefix: &'static str,
}

impl TagDefinition {
    const fn new(label: &'static str, prefix: &'static str) -> Self {
        Self { label, prefix }
    }
}

const HRS_TAGS: [TagDefinition; 4] = [
    TagDefinition::new("報告", "#報告 "),
    TagDefinition::new("連絡", "#連絡 "),
    TagDefinition::new("相談", "#相談 "),
    TagDefinition::new("共有", "#共有 "),
];

const QBOX_TAGS: [TagDefinition; 3] = [
    TagDefinition::new("質問", "#質問 "),
    TagDefinition::new("相談", "#相談 "),
    TagDefinition::new("提案", "#提案 "),
];

const HEALTH_TAGS: [TagDefinition; 2] = [
    TagDefinition::new("健康相談", "#健康相談 "),
    TagDefinition::new("お薬相談", "#お薬相談 "),
];

/// The three disjoint channel membership sets.
///
/// Declaration order is the registry evaluation order: a channel listed
/// in several sets keeps the tags of the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSet {
    /// `CHANNEL_HRS`: report/contact/consult/share, plus passive collection.
    Hrs,
    /// `CHANNEL_QBOX`: question/consult/proposal.
    Qbox,
    /// `CHANNEL_HEALTH`: health and medication consultations.
    Health,
}

impl ChannelSet {
    /// All sets in registry evaluation order.
    pub const ALL: [Self; 3] = [Self::Hrs, Self::Qbox, Self::Health];

    /// The fixed ordered tag sequence assigned to channels of this set.
    #[must_use]
    pub fn tags(self) -> &'static [TagDefinition] {
        match self {
            Self::Hrs => &HRS_TAGS,
            Self::Qbox => &QBOX_TAGS,
            Self::Health => &HEALTH_TAGS,
        }
    }

    /// Environment variable holding the comma-separated channel ids.
    #[must_use]
    pub fn env_key(self) -> &'static str {
        match self {
            Self::Hrs => "CHANNEL_HRS",
            Self::Qbox => "CHANNEL_QBOX",
            Self::Health => "CHANNEL_HEALTH",
        }
    }
}
