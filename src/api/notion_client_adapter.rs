// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.
//!
//! Conversion never fails on content: a property or block that notion-client
//! cannot decode is logged and replaced by its fallback (an unresolved title,
//! an `Unsupported` block). Only a page without a usable ID is an error.

use super::responses::{NotionBlock, NotionRichText, PageEnvelope, PageProperty};
use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, Page, PageTitle};
use crate::types::{BlockId, PageId, RichTextItem, RichTextKind};
use serde_json::Value;
use std::collections::HashMap;

/// Convert a retrieved page envelope into a domain Page (without blocks)
pub fn convert_page(envelope: PageEnvelope) -> Result<Page, AppError> {
    let id = PageId::parse(&envelope.id)?;
    let title = extract_page_title(envelope.properties);
    Ok(Page::new(id, title))
}

/// Resolve the page title from its properties map.
///
/// The property keyed `title` wins; otherwise the first title-typed property
/// in key order. Anything missing or undecodable yields an unresolved title.
pub fn extract_page_title(properties: Option<HashMap<String, Value>>) -> PageTitle {
    let Some(mut properties) = properties else {
        log::debug!("Page has no properties map; using fallback title");
        return PageTitle::unresolved();
    };

    let candidate = properties.remove("title").or_else(|| {
        let mut names: Vec<&String> = properties
            .iter()
            .filter(|(_, value)| value.get("type").and_then(Value::as_str) == Some("title"))
            .map(|(name, _)| name)
            .collect();
        names.sort();
        let name = names.first().map(|name| (*name).clone())?;
        properties.remove(&name)
    });

    let Some(value) = candidate else {
        log::debug!("Page has no title property; using fallback title");
        return PageTitle::unresolved();
    };

    let raw_texts = raw_plain_texts(value.get("title"));
    match serde_json::from_value::<PageProperty>(value) {
        Ok(PageProperty::Title { title, .. }) => {
            let mut items = convert_rich_text_array(title);
            restore_plain_text(&mut items, &raw_texts);
            PageTitle::new(items)
        }
        Ok(_) => {
            log::warn!("Property 'title' is not title-typed; using fallback title");
            PageTitle::unresolved()
        }
        Err(e) => {
            log::warn!("Failed to decode title property: {}. Using fallback title.", e);
            PageTitle::unresolved()
        }
    }
}

/// Convert one raw entry of a block children `results` array.
pub fn convert_block_value(value: Value) -> Block {
    let block_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let common = raw_block_common(&value);
    let raw_texts = raw_plain_texts(
        value
            .get(block_type.as_str())
            .and_then(|payload| payload.get("rich_text")),
    );

    match serde_json::from_value::<NotionBlock>(value) {
        Ok(notion_block) => {
            let mut block = convert_block(notion_block, &block_type);
            if let Some(content) = block.text_content_mut() {
                restore_plain_text(&mut content.rich_text, &raw_texts);
            }
            block
        }
        Err(e) => {
            log::warn!(
                "Failed to decode '{}' block {}: {}. Treating it as unsupported.",
                block_type,
                common.id,
                e
            );
            Block::Unsupported(UnsupportedBlock { common, block_type })
        }
    }
}

/// Convert a decoded notion-client block; `block_type` is the raw type tag.
pub fn convert_block(notion_block: NotionBlock, block_type: &str) -> Block {
    use notion_client::objects::block::BlockType;

    let common = convert_block_common(notion_block.id.as_deref(), notion_block.has_children);

    match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Block::Paragraph(ParagraphBlock {
            common,
            content: convert_text_block_content(paragraph.rich_text),
        }),

        BlockType::Heading1 { heading_1 } => Block::Heading1(Heading1Block {
            common,
            content: convert_text_block_content(heading_1.rich_text),
        }),

        BlockType::Heading2 { heading_2 } => Block::Heading2(Heading2Block {
            common,
            content: convert_text_block_content(heading_2.rich_text),
        }),

        BlockType::Heading3 { heading_3 } => Block::Heading3(Heading3Block {
            common,
            content: convert_text_block_content(heading_3.rich_text),
        }),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: convert_text_block_content(bulleted_list_item.rich_text),
            })
        }

        _ => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: block_type.to_string(),
        }),
    }
}

/// `plain_text` of each span in a raw rich text array, in order.
fn raw_plain_texts(spans: Option<&Value>) -> Vec<Option<String>> {
    spans
        .and_then(Value::as_array)
        .map(|spans| {
            spans
                .iter()
                .map(|span| {
                    span.get("plain_text")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Notion sends `plain_text` on every span, including mention kinds
/// notion-client has no variant for. The raw value wins where present.
fn restore_plain_text(items: &mut [RichTextItem], raw_texts: &[Option<String>]) {
    for (item, raw) in items.iter_mut().zip(raw_texts) {
        if let Some(text) = raw {
            item.plain_text.clone_from(text);
        }
    }
}

fn raw_block_common(value: &Value) -> BlockCommon {
    convert_block_common(
        value.get("id").and_then(Value::as_str),
        value.get("has_children").and_then(Value::as_bool),
    )
}

/// Convert block common fields; a missing or malformed ID gets a fresh one.
fn convert_block_common(id: Option<&str>, has_children: Option<bool>) -> BlockCommon {
    let id = match id.map(BlockId::parse) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            log::warn!("Invalid block ID: {}. Using fallback UUID.", e);
            BlockId::new_v4()
        }
        None => {
            log::warn!("Block missing ID field. Using fallback UUID.");
            BlockId::new_v4()
        }
    };

    BlockCommon::new(id).with_children_flag(has_children.unwrap_or(false))
}

fn convert_text_block_content(rich_text: Vec<NotionRichText>) -> TextBlockContent {
    TextBlockContent::new(convert_rich_text_array(rich_text))
}

/// Convert array of rich text items
fn convert_rich_text_array(rich_texts: Vec<NotionRichText>) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

/// Convert single rich text item
fn convert_rich_text(rich_text: NotionRichText) -> RichTextItem {
    match rich_text {
        NotionRichText::Text {
            text,
            plain_text,
            href,
            ..
        } => RichTextItem {
            kind: RichTextKind::Text,
            plain_text: plain_text.unwrap_or(text.content),
            href,
        },

        NotionRichText::Mention {
            plain_text, href, ..
        } => RichTextItem {
            kind: RichTextKind::Mention,
            plain_text,
            href,
        },

        NotionRichText::Equation {
            plain_text, href, ..
        } => RichTextItem {
            kind: RichTextKind::Equation,
            plain_text,
            href,
        },

        #[allow(unreachable_patterns)]
        _ => {
            log::debug!("Unsupported rich text variant; using empty text");
            RichTextItem::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_span(text: &str) -> Value {
        json!({
            "type": "text",
            "text": {"content": text, "link": null},
            "plain_text": text,
            "href": null,
            "annotations": {"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"}
        })
    }

    fn block_json(block_type: &str, payload: Value) -> Value {
        let mut block = json!({
            "object": "block",
            "id": "216cd412-8533-8087-a989-cf37889137c3",
            "parent": {"type": "page_id", "page_id": "414cd412-8533-8087-a989-cf37889137c5"},
            "created_time": "2025-06-20T00:00:00.000Z",
            "last_edited_time": "2025-06-20T00:00:00.000Z",
            "created_by": {"object": "user", "id": "user-id"},
            "last_edited_by": {"object": "user", "id": "user-id"},
            "has_children": false,
            "archived": false,
            "type": block_type
        });
        block[block_type] = payload;
        block
    }

    #[test]
    fn test_heading_block_conversion() {
        let value = block_json(
            "heading_2",
            json!({"rich_text": [text_span("Overview")], "color": "default", "is_toggleable": false}),
        );

        match convert_block_value(value) {
            Block::Heading2(block) => {
                assert_eq!(block.content.rich_text[0].plain_text, "Overview");
                assert_eq!(block.common.id.as_str(), "216cd41285338087a989cf37889137c3");
            }
            other => panic!("Expected heading_2, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_block_type_becomes_unsupported() {
        let value = block_json("meeting_notes_v9", json!({"anything": true}));

        match convert_block_value(value) {
            Block::Unsupported(block) => assert_eq!(block.block_type, "meeting_notes_v9"),
            other => panic!("Expected unsupported block, got {:?}", other),
        }
    }

    #[test]
    fn test_title_from_title_key() {
        let properties: HashMap<String, Value> = serde_json::from_value(json!({
            "title": {"id": "title", "type": "title", "title": [text_span("Roadmap")]}
        }))
        .unwrap();

        assert_eq!(extract_page_title(Some(properties)).display_text(), "Roadmap");
    }

    #[test]
    fn test_title_from_title_typed_property() {
        let properties: HashMap<String, Value> = serde_json::from_value(json!({
            "Name": {"id": "title", "type": "title", "title": [text_span("Row page")]}
        }))
        .unwrap();

        assert_eq!(extract_page_title(Some(properties)).display_text(), "Row page");
    }

    #[test]
    fn test_title_fallbacks() {
        assert_eq!(extract_page_title(None).display_text(), "Untitled");
        assert_eq!(
            extract_page_title(Some(HashMap::new())).display_text(),
            "Untitled"
        );

        let empty_title: HashMap<String, Value> = serde_json::from_value(json!({
            "title": {"id": "title", "type": "title", "title": []}
        }))
        .unwrap();
        assert_eq!(extract_page_title(Some(empty_title)).display_text(), "Untitled");
    }

    fn annotations() -> Value {
        json!({"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"})
    }

    fn paragraph_text(value: Value) -> String {
        match convert_block_value(value) {
            Block::Paragraph(block) => block.content.rich_text[0].plain_text.clone(),
            other => panic!("Expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_emoji_mention_keeps_plain_text() {
        let span = json!({
            "type": "mention",
            "mention": {
                "type": "custom_emoji",
                "custom_emoji": {"id": "45ce454c-d427-4f53-9489-e5d0f3d1db6b", "name": "a", "url": "https://example.com/a.png"}
            },
            "annotations": annotations(),
            "plain_text": ":a:",
            "href": null
        });
        let value = block_json(
            "paragraph",
            json!({"rich_text": [span, text_span(" done")], "color": "default"}),
        );

        assert_eq!(paragraph_text(value), ":a:");
    }

    #[test]
    fn test_link_mention_without_title_keeps_plain_text() {
        let span = json!({
            "type": "mention",
            "mention": {
                "type": "link_mention",
                "link_mention": {"href": "https://x.y"}
            },
            "annotations": annotations(),
            "plain_text": "x.y",
            "href": "https://x.y"
        });
        let value = block_json("paragraph", json!({"rich_text": [span], "color": "default"}));

        assert_eq!(paragraph_text(value), "x.y");
    }

    #[test]
    fn test_title_keeps_raw_plain_text() {
        let mention = json!({
            "type": "mention",
            "mention": {"type": "link_mention", "link_mention": {"href": "https://x.y"}},
            "annotations": annotations(),
            "plain_text": "x.y",
            "href": "https://x.y"
        });
        let properties: HashMap<String, Value> = serde_json::from_value(json!({
            "title": {"id": "title", "type": "title", "title": [mention]}
        }))
        .unwrap();

        assert_eq!(extract_page_title(Some(properties)).display_text(), "x.y");
    }

    #[test]
    fn test_page_conversion_requires_valid_id() {
        let envelope = PageEnvelope {
            id: "not-an-id".to_string(),
            properties: None,
        };
        assert!(matches!(convert_page(envelope), Err(AppError::Validation(_))));
    }
}
