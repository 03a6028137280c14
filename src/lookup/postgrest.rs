// src/lookup/postgrest.rs
//! Lookup against a PostgREST endpoint (the `user_notion_pages` table).

use super::{LookupRecord, PageLookup};
use crate::api::client::extract_response_text;
use crate::constants::LOOKUP_TABLE_NAME;
use crate::error::AppError;
use crate::types::{UserEmail, ValidatedUrl};
use reqwest::Client;

/// Queries `GET /rest/v1/user_notion_pages?select=email,pageID&email=ilike.<email>`.
#[derive(Clone)]
pub struct PostgrestLookupTable {
    client: Client,
    base_url: ValidatedUrl,
    api_key: String,
}

impl PostgrestLookupTable {
    pub fn new(base_url: ValidatedUrl, api_key: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait::async_trait]
impl PageLookup for PostgrestLookupTable {
    async fn find_records(&self, user: &UserEmail) -> Result<Vec<LookupRecord>, AppError> {
        let url = self
            .base_url
            .endpoint(&format!("rest/v1/{}", LOOKUP_TABLE_NAME));
        log::debug!("GET {} for {}", url, user);

        // ilike is case-insensitive; `_` and `%` in emails may over-match,
        // which resolve_page_id filters out again.
        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "email,pageID".to_string()),
                ("email", format!("ilike.{}", user.as_str())),
            ])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let result = extract_response_text(response).await?;
        if !result.status.is_success() {
            return Err(AppError::RemoteService {
                service: "lookup store",
                status: result.status.as_u16(),
                message: result.data,
            });
        }

        Ok(serde_json::from_str(&result.data)?)
    }
}
