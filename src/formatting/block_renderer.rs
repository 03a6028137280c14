// src/formatting/block_renderer.rs
//! Page rendering: title plus one fragment per top-level block.

use super::html::{block_fragment, escape_html};
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::{Block, Page};
use crate::types::RenderedHtml;

/// Renders each block to its fragment, keeping block order. Unsupported
/// blocks contribute empty strings rather than being skipped.
pub fn render_blocks(blocks: &[Block]) -> Vec<String> {
    let fragments: Vec<String> = blocks.iter().map(block_fragment).collect();

    let dropped = blocks
        .iter()
        .filter(|block| matches!(block, Block::Unsupported(_)))
        .count();
    if dropped > 0 {
        log::debug!(
            "Rendered {} blocks ({} unsupported blocks dropped)",
            blocks.len(),
            dropped
        );
    }
    let nested = blocks.iter().filter(|block| block.has_children()).count();
    if nested > 0 {
        log::debug!("{} blocks have nested children that are not rendered", nested);
    }

    fragments
}

/// Wraps a title and ordered fragments into the page container.
///
/// `title` is raw text and is escaped here; fragments are already HTML.
pub fn assemble_page<S: AsRef<str>>(title: &str, fragments: &[S]) -> RenderedHtml {
    let mut output = String::with_capacity(64 + fragments.len() * CHARS_PER_BLOCK_ESTIMATE);
    output.push_str(r#"<div class="notion-page"><h1>"#);
    output.push_str(&escape_html(title));
    output.push_str("</h1>");
    for fragment in fragments {
        output.push_str(fragment.as_ref());
    }
    output.push_str("</div>");
    RenderedHtml::new(output)
}

/// Renders a whole page. Pure: the same page always yields the same bytes.
pub fn render_page(page: &Page) -> RenderedHtml {
    let fragments = render_blocks(&page.blocks);
    assemble_page(page.title().display_text(), &fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_empty_page() {
        let html = assemble_page::<String>("T", &[]);
        assert_eq!(html.as_str(), r#"<div class="notion-page"><h1>T</h1></div>"#);
    }

    #[test]
    fn test_assemble_keeps_empty_fragments_in_place() {
        let html = assemble_page("T", &["<p>A</p>", "", "<p>B</p>"]);
        assert_eq!(
            html.as_str(),
            r#"<div class="notion-page"><h1>T</h1><p>A</p><p>B</p></div>"#
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let html = assemble_page::<&str>("Q&A <draft>", &[]);
        assert_eq!(
            html.as_str(),
            r#"<div class="notion-page"><h1>Q&amp;A &lt;draft&gt;</h1></div>"#
        );
    }
}
