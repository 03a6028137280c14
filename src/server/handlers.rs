// src/server/handlers.rs
//! Route handlers. Bodies are taken as raw bytes so malformed input becomes
//! our own `{ "error" }` envelope instead of an extractor rejection.

use super::envelope::{error_envelope, html_envelope, json_envelope, preflight, text};
use super::AppState;
use crate::auth::bearer_token;
use crate::error::AppError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    fn parse(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Every method except OPTIONS runs the pipeline.
pub async fn get_notion_page(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }
    match state.pipeline.handle(authorization(&headers), &body).await {
        Ok(html) => html_envelope(html),
        Err(e) => error_envelope(&e),
    }
}

pub async fn signup(State(state): State<AppState>, body: Bytes) -> Response {
    let result = Credentials::parse(&body)
        .and_then(|creds| state.accounts.signup(&creds.email, &creds.password));
    match result {
        Ok(account) => json_envelope(StatusCode::OK, json!({ "user": account.identity() })),
        Err(e) => account_error(e),
    }
}

pub async fn login(State(state): State<AppState>, body: Bytes) -> Response {
    let result = Credentials::parse(&body)
        .and_then(|creds| state.accounts.login(&creds.email, &creds.password));
    match result {
        Ok((account, session)) => json_envelope(
            StatusCode::OK,
            json!({ "user": account.identity(), "token": session.token }),
        ),
        Err(e) => account_error(e),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let result = bearer_token(authorization(&headers)).and_then(|token| state.accounts.logout(token));
    match result {
        Ok(()) => json_envelope(StatusCode::OK, json!({ "ok": true })),
        Err(e) => account_error(e),
    }
}

pub async fn healthz() -> Response {
    text(StatusCode::OK, "ok")
}

/// Preflight for any path; everything else unknown is a 404 envelope.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }
    json_envelope(StatusCode::NOT_FOUND, json!({ "error": "Not found" }))
}

/// Unsupported method on a known route.
pub async fn method_not_allowed(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }
    json_envelope(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": format!("Method {} not allowed", method) }),
    )
}

fn account_error(e: AppError) -> Response {
    log::warn!("Account request failed [{}]: {:?}", e.kind(), e);
    error_envelope(&e)
}
