// src/pipeline.rs
//! The request pipeline: authenticate, resolve, fetch, render.
//!
//! Stages run strictly in order and the first failure ends the request.
//! Nothing here knows about HTTP; the server layer only supplies the raw
//! `Authorization` header and body bytes.

use crate::api::NotionRepository;
use crate::auth::{bearer_token, CallerIdentity, CredentialValidator};
use crate::error::AppError;
use crate::formatting::render_page;
use crate::lookup::{resolve_page_id, PageLookup};
use crate::types::{PageId, RenderedHtml};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Where a request currently is. Used to say where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticating,
    ParsingBody,
    Resolving,
    Fetching,
    Rendering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticating => "authenticating",
            Self::ParsingBody => "parsing body",
            Self::Resolving => "resolving page",
            Self::Fetching => "fetching page",
            Self::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// What the caller asked for. An empty body asks for "my page".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page_id: Option<PageId>,
}

impl PageRequest {
    /// An empty body is allowed. Anything else must be a JSON object with a
    /// non-empty string `pageId`.
    pub fn parse(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| AppError::BadRequest("expected a JSON object".to_string()))?;

        let raw = match object.get("pageId") {
            None => return Err(AppError::BadRequest("missing pageId".to_string())),
            Some(Value::String(raw)) if !raw.trim().is_empty() => raw,
            Some(_) => {
                return Err(AppError::BadRequest(
                    "pageId must be a non-empty string".to_string(),
                ))
            }
        };

        let page_id = PageId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(Self {
            page_id: Some(page_id),
        })
    }
}

/// Owns the collaborators one request needs. Shared across requests.
#[derive(Clone)]
pub struct RequestPipeline {
    credentials: Arc<dyn CredentialValidator>,
    lookup: Arc<dyn PageLookup>,
    notion: Arc<dyn NotionRepository>,
}

impl RequestPipeline {
    pub fn new(
        credentials: Arc<dyn CredentialValidator>,
        lookup: Arc<dyn PageLookup>,
        notion: Arc<dyn NotionRepository>,
    ) -> Self {
        Self {
            credentials,
            lookup,
            notion,
        }
    }

    /// Runs one request to completion and logs where it failed, if it did.
    pub async fn handle(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<RenderedHtml, AppError> {
        let mut stage = Stage::Authenticating;
        let result = self.run(authorization, body, &mut stage).await;
        if let Err(e) = &result {
            log::warn!("Request failed while {} [{}]: {:?}", stage, e.kind(), e);
        }
        result
    }

    async fn run(
        &self,
        authorization: Option<&str>,
        body: &[u8],
        stage: &mut Stage,
    ) -> Result<RenderedHtml, AppError> {
        let caller = self.authenticate(authorization).await?;

        *stage = Stage::ParsingBody;
        let request = PageRequest::parse(body)?;

        *stage = Stage::Resolving;
        let page_id =
            resolve_page_id(self.lookup.as_ref(), &caller.email, request.page_id.as_ref()).await?;
        log::info!("Resolved page {} for {}", page_id, caller.email);

        *stage = Stage::Fetching;
        let page = self
            .notion
            .retrieve_page_with_blocks(&page_id)
            .await
            .map_err(AppError::fetch_failed)?;

        *stage = Stage::Rendering;
        let html = render_page(&page);
        log::debug!("Rendered {} bytes for page {}", html.len(), page_id);
        Ok(html)
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Result<CallerIdentity, AppError> {
        let token = bearer_token(authorization)?;
        self.credentials.validate(token).await
    }
}
