// src/api/client.rs
//! Thin HTTP client wrapper for the Notion API.
//!
//! Handles authentication headers and request plumbing; parsing lives in
//! `parser`, domain conversion in `notion_client_adapter`.

use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION, NOTION_MAX_CHILD_PAGES};
use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{ApiKey, PageId, ValidatedUrl};
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client against the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, ValidatedUrl::parse(NOTION_API_BASE_URL)?)
    }

    /// Creates a client against another base URL (a proxy or a test stub).
    pub fn with_base_url(api_key: &ApiKey, base_url: ValidatedUrl) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::ConfigError(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint with query parameters.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = self.base_url.endpoint(endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;

        log::debug!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_page_response(result)
    }

    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_dashed());
        let pagination_result = super::simple_pagination::fetch_all_pages_simple(
            |page_size, cursor| {
                let client = self.clone();
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = client.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    super::parser::parse_blocks_pagination(result)
                }
            },
            Some(NOTION_MAX_CHILD_PAGES),
        )
        .await?;

        log::debug!(
            "Fetched {} blocks for {} in {} requests",
            pagination_result.items.len(),
            parent,
            pagination_result.pages_fetched
        );
        if pagination_result.truncated {
            log::warn!(
                "Page {} has more than {} pages of blocks; rendering the first {}",
                parent,
                NOTION_MAX_CHILD_PAGES,
                pagination_result.items.len()
            );
        }
        Ok(pagination_result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
