// src/auth/supabase.rs
//! Token validation against a Supabase-style auth service.

use super::{CallerIdentity, CredentialValidator};
use crate::api::client::extract_response_text;
use crate::error::AppError;
use crate::types::{UserEmail, ValidatedUrl};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

/// Calls `GET {base}/auth/v1/user` with the caller's token.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    client: Client,
    base_url: ValidatedUrl,
    api_key: String,
}

impl SupabaseAuthClient {
    pub fn new(base_url: ValidatedUrl, api_key: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait::async_trait]
impl CredentialValidator for SupabaseAuthClient {
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let url = self.base_url.endpoint("auth/v1/user");
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::unauthorized(format!("auth service unreachable: {}", e)))?;

        let result = extract_response_text(response).await?;
        if !result.status.is_success() {
            return Err(AppError::unauthorized(format!(
                "auth service returned HTTP {}",
                result.status.as_u16()
            )));
        }

        let user: AuthUser = serde_json::from_str(&result.data)
            .map_err(|e| AppError::unauthorized(format!("unreadable auth user: {}", e)))?;
        let email = user
            .email
            .as_deref()
            .ok_or_else(|| AppError::unauthorized(format!("user {} has no email", user.id)))
            .and_then(|raw| {
                UserEmail::parse(raw).map_err(|e| AppError::unauthorized(e.to_string()))
            })?;

        Ok(CallerIdentity { id: user.id, email })
    }
}
