// src/formatting/html.rs
//! Block-to-HTML mapping.
//!
//! Each supported block becomes exactly one element; everything else maps to
//! the empty string. Text is always HTML-escaped before interpolation.

use super::text::extract_text;
use crate::model::Block;
use std::borrow::Cow;

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// The element tag a block renders as, or `None` when it is not rendered.
pub fn element_tag(block: &Block) -> Option<&'static str> {
    match block {
        Block::Paragraph(_) => Some("p"),
        Block::Heading1(_) => Some("h1"),
        Block::Heading2(_) => Some("h2"),
        Block::Heading3(_) => Some("h3"),
        // Emitted bare: consecutive items are not wrapped in a <ul>.
        Block::BulletedListItem(_) => Some("li"),
        Block::Unsupported(_) => None,
    }
}

/// Maps a block and its already extracted text to an HTML fragment.
pub fn map_block(block: &Block, text: &str) -> String {
    match element_tag(block) {
        Some(tag) => format!("<{tag}>{}</{tag}>", escape_html(text)),
        None => String::new(),
    }
}

/// Extracts and maps in one step.
pub fn block_fragment(block: &Block) -> String {
    map_block(block, extract_text(block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::RichTextItem;

    fn content(text: &str) -> TextBlockContent {
        TextBlockContent::new(vec![RichTextItem::plain_text(text)])
    }

    #[test]
    fn test_mapping_table() {
        let cases = vec![
            (
                Block::Paragraph(ParagraphBlock {
                    common: BlockCommon::default(),
                    content: content("x"),
                }),
                "<p>x</p>",
            ),
            (
                Block::Heading1(Heading1Block {
                    common: BlockCommon::default(),
                    content: content("x"),
                }),
                "<h1>x</h1>",
            ),
            (
                Block::Heading2(Heading2Block {
                    common: BlockCommon::default(),
                    content: content("x"),
                }),
                "<h2>x</h2>",
            ),
            (
                Block::Heading3(Heading3Block {
                    common: BlockCommon::default(),
                    content: content("x"),
                }),
                "<h3>x</h3>",
            ),
            (
                Block::BulletedListItem(BulletedListItemBlock {
                    common: BlockCommon::default(),
                    content: content("x"),
                }),
                "<li>x</li>",
            ),
            (
                Block::Unsupported(UnsupportedBlock {
                    common: BlockCommon::default(),
                    block_type: "to_do".to_string(),
                }),
                "",
            ),
        ];

        for (block, expected) in cases {
            assert_eq!(block_fragment(&block), expected, "{}", block.block_type());
        }
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_empty_text_still_emits_element() {
        let block = Block::Paragraph(ParagraphBlock::default());
        assert_eq!(block_fragment(&block), "<p></p>");
    }
}
