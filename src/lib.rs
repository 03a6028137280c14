// src/lib.rs
//! notion2html library: renders a user's linked Notion page as HTML behind
//! an authenticated JSON endpoint.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `NotionApiError`
//! - **Configuration**: `CommandLineInput`, `ServiceConfig`
//! - **Domain model**: `Page`, `PageTitle`, `Block` and its variants
//! - **Domain types**: `PageId`, `BlockId`, `UserEmail`, `ApiKey`, `RenderedHtml`
//! - **Collaborators**: `NotionRepository`, `PageLookup`, `CredentialValidator`
//! - **Rendering**: `extract_text`, `map_block`, `render_page`
//! - **HTTP**: `RequestPipeline`, `AppState`, `router`

pub mod api;
pub mod auth;
mod config;
mod constants;
mod error;
pub mod formatting;
pub mod lookup;
pub mod model;
mod pipeline;
mod server;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ErrorKind, NotionApiError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ServiceConfig, SupabaseSettings};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, BulletedListItemBlock, Heading1Block, Heading2Block, Heading3Block, Page,
    PageTitle, ParagraphBlock, TextBlockContent, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, PageId, RenderedHtml, RichTextItem, RichTextKind, UserEmail, ValidatedUrl,
};

// --- Collaborators ---
pub use crate::api::{NotionHttpClient, NotionRepository, UnconfiguredNotion};
pub use crate::auth::{
    bearer_token, AccountService, CallerIdentity, CredentialValidator, InMemoryStore,
    KeyValueStore, SupabaseAuthClient,
};
pub use crate::lookup::{
    resolve_page_id, LookupRecord, LookupTable, PageLookup, PostgrestLookupTable,
};

// --- Rendering ---
pub use crate::formatting::{escape_html, extract_text, map_block, render_blocks, render_page};

// --- HTTP ---
pub use crate::pipeline::{PageRequest, RequestPipeline, Stage};
pub use crate::server::{router, AppState};
