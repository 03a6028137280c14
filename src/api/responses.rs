// src/api/responses.rs
//! Wire shapes of the two Notion responses this service reads.
//!
//! The outer envelopes are loose: individual properties and
//! blocks are decoded one at a time with notion-client's types so that one
//! odd entry degrades to a fallback instead of failing the whole page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub use notion_client::objects::{
    block::Block as NotionBlock, error::Error as NotionError, page::PageProperty,
    rich_text::RichText as NotionRichText,
};

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Block children response; each result is decoded individually.
pub type RetrieveBlockChildrenResponse = PaginatedResponse<Value>;

/// A retrieved page, keeping only what rendering needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub id: String,
    #[serde(default)]
    pub properties: Option<HashMap<String, Value>>,
}
