// src/auth/mod.rs
//! Caller authentication.
//!
//! The request pipeline only sees `CredentialValidator`. Two implementations
//! ship: the local `AccountService` (sessions in a key-value store) and
//! `SupabaseAuthClient` (remote `/auth/v1/user`).

mod accounts;
mod store;
mod supabase;

pub use accounts::{Account, AccountService, Session};
pub use store::{InMemoryStore, KeyValueStore};
pub use supabase::SupabaseAuthClient;

use crate::error::AppError;
use crate::types::UserEmail;
use serde::Serialize;

/// Who is calling, as established by a credential validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub id: String,
    pub email: UserEmail,
}

/// Turns a bearer token into a caller identity.
#[async_trait::async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Fails with `AppError::Unauthorized` when the token is not accepted.
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AppError>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::unauthorized("missing Authorization header"))?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::unauthorized("malformed Authorization header"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::unauthorized(format!(
            "unsupported authorization scheme '{}'",
            scheme
        )));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("empty bearer token"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc123")).unwrap(), "abc123");
        assert_eq!(bearer_token(Some("bearer   abc123 ")).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_token_rejections() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer   "), Some("Basic dXNlcg==")] {
            let err = bearer_token(header).unwrap_err();
            assert!(
                matches!(err, AppError::Unauthorized { .. }),
                "{:?} should be unauthorized",
                header
            );
        }
    }
}
