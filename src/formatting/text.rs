// src/formatting/text.rs
//! Block text extraction: the primary display string of one block.

use crate::model::Block;
use crate::types::RichTextItem;

/// Returns the plain text of the first span, or `""` for an empty sequence.
///
/// Later spans are ignored.
pub fn first_plain_text(spans: &[RichTextItem]) -> &str {
    spans
        .first()
        .map(|item| item.plain_text.as_str())
        .unwrap_or("")
}

/// Extracts a block's display text. Never fails: blocks without text
/// content yield the empty string.
pub fn extract_text(block: &Block) -> &str {
    block
        .text_content()
        .map(|content| first_plain_text(&content.rich_text))
        .unwrap_or("")
}
