use serde::{Deserialize, Serialize};

/// The kind of rich text span as reported by Notion.
///
/// Only the `plain_text` of a span reaches the rendered HTML; the kind is
/// kept so log lines can say what was flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextKind {
    #[default]
    Text,
    Mention,
    Equation,
}

/// One run of styled text inside a block or a title property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextItem {
    pub kind: RichTextKind,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// A plain text span with no link.
    pub fn plain_text(text: &str) -> Self {
        Self {
            kind: RichTextKind::Text,
            plain_text: text.to_string(),
            href: None,
        }
    }
}
