// src/error.rs
//! Application error types with structured error handling.
//!
//! Every failure a request can hit is a variant here. The HTTP layer turns
//! all of them into the same `{ "error": message }` envelope, so the
//! `Display` text is what callers see and `kind()` is what the logs see.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// An error reported by the Notion API itself.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Notion API error ({status}): {code} - {message}")]
pub struct NotionApiError {
    pub status: u16,
    pub code: NotionErrorCode,
    pub message: String,
    pub request_id: Option<String>,
}

/// Coarse classification used for logging at the handler boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    BadRequest,
    FetchFailed,
    ConfigError,
    Account,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::FetchFailed => "fetch_failed",
            Self::ConfigError => "config_error",
            Self::Account => "account",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The caller could not be authenticated; `reason` is logged, never returned.
    #[error("Unauthorized")]
    Unauthorized { reason: String },

    #[error("No Notion page found for {user}")]
    NotFound { user: String },

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Failed to fetch Notion page: {0}")]
    FetchFailed(String),

    #[error("Missing configuration: {0}")]
    ConfigError(String),

    #[error("An account is already registered for {0}")]
    AccountExists(String),

    #[error("No account found for {0}")]
    AccountNotFound(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error(transparent)]
    NotionApi(#[from] NotionApiError),

    #[error("{service} returned HTTP {status}: {message}")]
    RemoteService {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Wraps any failure from the content provider as `FetchFailed`.
    pub fn fetch_failed(cause: AppError) -> Self {
        match cause {
            already @ Self::FetchFailed(_) => already,
            config @ Self::ConfigError(_) => config,
            other => Self::FetchFailed(other.to_string()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BadRequest(_) | Self::Validation(_) => ErrorKind::BadRequest,
            Self::FetchFailed(_) => ErrorKind::FetchFailed,
            Self::ConfigError(_) => ErrorKind::ConfigError,
            Self::AccountExists(_) | Self::AccountNotFound(_) | Self::IncorrectPassword => {
                ErrorKind::Account
            }
            Self::NetworkFailure(_)
            | Self::NotionApi(_)
            | Self::RemoteService { .. }
            | Self::MalformedResponse(_)
            | Self::Io(_)
            | Self::JsonParseError { .. } => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_hides_reason() {
        let err = AppError::unauthorized("token expired");
        assert_eq!(err.to_string(), "Unauthorized");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_fetch_failed_wraps_message() {
        let api = NotionApiError {
            status: 404,
            code: NotionErrorCode::from_api_response("object_not_found"),
            message: "Could not find page".to_string(),
            request_id: None,
        };
        let err = AppError::fetch_failed(api.into());
        assert_eq!(
            err.to_string(),
            "Failed to fetch Notion page: Notion API error (404): object_not_found - Could not find page"
        );
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
    }

    #[test]
    fn test_fetch_failed_keeps_config_errors() {
        let err = AppError::fetch_failed(AppError::ConfigError("NOTION_API_KEY".to_string()));
        assert_eq!(err.kind(), ErrorKind::ConfigError);
    }

    #[test]
    fn test_error_code_vocabulary() {
        assert_eq!(
            NotionErrorCode::from_api_response("rate_limited"),
            NotionErrorCode::RateLimited
        );
        assert!(NotionErrorCode::from_http_status(404).is_not_found());
        assert_eq!(NotionErrorCode::HttpStatus(502).to_string(), "http_502");
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code").to_string(),
            "brand_new_code"
        );
    }
}
