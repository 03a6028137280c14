// src/api/mod.rs
//! Notion API interaction: the ability to retrieve a page and its blocks.
//!
//! Business logic depends on the `NotionRepository` trait, never on HTTP
//! details, so the request pipeline can run against in-process fakes.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
pub mod responses;
mod simple_pagination;
mod types;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::PageId;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Retrieves the page object; its `blocks` are empty.
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;

    /// Retrieves the direct children of a page, in page order.
    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError>;

    /// Retrieves the page, then its children, one call after the other.
    async fn retrieve_page_with_blocks(&self, id: &PageId) -> Result<Page, AppError> {
        let page = self.retrieve_page(id).await?;
        let blocks = self.retrieve_children(id).await?;
        log::info!(
            "Retrieved page {} '{}' with {} blocks",
            page.id,
            page.title(),
            blocks.len()
        );
        Ok(page.with_blocks(blocks))
    }
}

/// Stand-in used when no Notion credential is configured: every call fails
/// with `ConfigError`, so the service still starts and reports the problem
/// per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredNotion;

#[async_trait::async_trait]
impl NotionRepository for UnconfiguredNotion {
    async fn retrieve_page(&self, _id: &PageId) -> Result<Page, AppError> {
        Err(missing_credential())
    }

    async fn retrieve_children(&self, _parent: &PageId) -> Result<Vec<Block>, AppError> {
        Err(missing_credential())
    }
}

fn missing_credential() -> AppError {
    AppError::ConfigError("NOTION_API_KEY environment variable not set".to_string())
}

pub use client::{ApiResponse, NotionHttpClient};
pub use parser::{parse_blocks_pagination, parse_page_response};
