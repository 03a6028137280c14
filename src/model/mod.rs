mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::constants::UNTITLED_PAGE_TITLE;
use crate::types::{PageId, RichTextItem};
use serde::{Deserialize, Serialize};

/// A Notion page with its direct child blocks, in page order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: PageTitle,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(id: PageId, title: PageTitle) -> Self {
        Self {
            id,
            title,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Get the page title
    pub fn title(&self) -> &PageTitle {
        &self.title
    }
}

/// The spans of a page's title property.
///
/// An empty span list means the title could not be resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageTitle(Vec<RichTextItem>);

impl PageTitle {
    pub fn new(items: Vec<RichTextItem>) -> Self {
        Self(items)
    }

    /// A title with no spans, rendered as "Untitled".
    pub fn unresolved() -> Self {
        Self(Vec::new())
    }

    pub fn items(&self) -> &[RichTextItem] {
        &self.0
    }

    /// First span's plain text, or "Untitled" when missing or empty.
    pub fn display_text(&self) -> &str {
        match self.0.first() {
            Some(item) if !item.plain_text.is_empty() => &item.plain_text,
            _ => UNTITLED_PAGE_TITLE,
        }
    }
}

impl std::fmt::Display for PageTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
