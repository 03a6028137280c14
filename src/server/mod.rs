// src/server/mod.rs
//! HTTP surface.

mod envelope;
mod handlers;

use crate::auth::AccountService;
use crate::pipeline::RequestPipeline;
use axum::routing::{any, get, post};
use axum::Router;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RequestPipeline>,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(pipeline: RequestPipeline, accounts: AccountService) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            accounts,
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get-notion-page", any(handlers::get_notion_page))
        .route("/functions/v1/get-notion-page", any(handlers::get_notion_page))
        .route(
            "/auth/signup",
            post(handlers::signup).fallback(handlers::method_not_allowed),
        )
        .route(
            "/auth/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/auth/logout",
            post(handlers::logout).fallback(handlers::method_not_allowed),
        )
        .route(
            "/healthz",
            get(handlers::healthz).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::fallback)
        .with_state(state)
}
