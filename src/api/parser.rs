// src/api/parser.rs
//! Turns raw Notion HTTP responses into domain values.
//!
//! Non-success statuses are decoded into `NotionApiError` when the body is a
//! Notion error object, and into an HTTP-status error otherwise.

use super::client::ApiResponse;
use super::notion_client_adapter::{convert_block_value, convert_page};
use super::responses::{NotionError, PageEnvelope, PaginatedResponse, RetrieveBlockChildrenResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionApiError, NotionErrorCode};
use crate::model::{Block, Page};

/// Parse any Notion API response, routing on HTTP status
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error_body(body: &str, status: reqwest::StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return NotionApiError {
            status: notion_error.status as u16,
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into();
    }

    NotionApiError {
        status: status.as_u16(),
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        request_id: None,
    }
    .into()
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse a retrieved page. Blocks are left empty for the children call.
pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let envelope: PageEnvelope = parse_api_response(result)?;
    convert_page(envelope)
}

/// Parse one page of block children
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;

    Ok(PaginatedResponse {
        object: response.object,
        results: response
            .results
            .into_iter()
            .map(convert_block_value)
            .collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}
