// src/constants.rs
//! Domain constants that define the operational boundaries of the service.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Notion API version pinned on every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Default base URL for the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many child blocks the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Upper bound on pagination round-trips for one page's children.
pub const NOTION_MAX_CHILD_PAGES: u32 = 50;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Title rendered when a page's title property cannot be resolved.
pub const UNTITLED_PAGE_TITLE: &str = "Untitled";

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 64;

// ---------------------------------------------------------------------------
// HTTP surface
// ---------------------------------------------------------------------------

/// Value of `Access-Control-Allow-Origin` on every response.
pub const CORS_ALLOW_ORIGIN: &str = "*";

/// Value of `Access-Control-Allow-Headers` on every response.
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Table holding user → page associations in the PostgREST backend.
pub const LOOKUP_TABLE_NAME: &str = "user_notion_pages";

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Minimum accepted password length at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
