use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// One top-level unit of page content.
///
/// Adding a variant here forces every exhaustive match in the text extractor
/// and the HTML mapper to decide how the new type renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Check if Notion reported nested children under this block
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get block type name as Notion spells it
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Text content of the block, if its type carries any
    pub fn text_content(&self) -> Option<&TextBlockContent> {
        match self {
            Block::Paragraph(b) => Some(&b.content),
            Block::Heading1(b) => Some(&b.content),
            Block::Heading2(b) => Some(&b.content),
            Block::Heading3(b) => Some(&b.content),
            Block::BulletedListItem(b) => Some(&b.content),
            Block::Unsupported(_) => None,
        }
    }

    pub fn text_content_mut(&mut self) -> Option<&mut TextBlockContent> {
        match self {
            Block::Paragraph(b) => Some(&mut b.content),
            Block::Heading1(b) => Some(&mut b.content),
            Block::Heading2(b) => Some(&mut b.content),
            Block::Heading3(b) => Some(&mut b.content),
            Block::BulletedListItem(b) => Some(&mut b.content),
            Block::Unsupported(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RichTextItem;

    #[test]
    fn test_block_type_names() {
        let paragraph = Block::Paragraph(ParagraphBlock::default());
        assert_eq!(paragraph.block_type(), "paragraph");

        let unsupported = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "callout".to_string(),
        });
        assert_eq!(unsupported.block_type(), "callout");
        assert!(unsupported.text_content().is_none());
    }

    #[test]
    fn test_text_content_exposes_spans() {
        let heading = Block::Heading2(Heading2Block {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("Section")]),
        });
        let content = heading.text_content().expect("headings carry text");
        assert_eq!(content.rich_text[0].plain_text, "Section");
        assert!(!heading.has_children());
    }
}
