// src/server/envelope.rs
//! Response envelopes. Every response from this service goes through here so
//! the CORS headers are identical on success, failure and preflight.

use crate::constants::{CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN};
use crate::error::AppError;
use crate::types::RenderedHtml;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

const CORS_HEADERS: [(HeaderName, &str); 2] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS),
];

/// `200 { "html": ... }`
pub fn html_envelope(html: RenderedHtml) -> Response {
    json_envelope(StatusCode::OK, json!({ "html": html.into_string() }))
}

/// `400 { "error": message }`. All pipeline failures share this status.
pub fn error_envelope(err: &AppError) -> Response {
    json_envelope(StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
}

/// A JSON body with the CORS headers and a JSON content type.
pub fn json_envelope(status: StatusCode, body: Value) -> Response {
    (
        status,
        CORS_HEADERS,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

/// Preflight answer: 200, empty body, CORS headers.
pub fn preflight() -> Response {
    (StatusCode::OK, CORS_HEADERS).into_response()
}

/// Plain text with the CORS headers.
pub fn text(status: StatusCode, body: &'static str) -> Response {
    (status, CORS_HEADERS, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_envelopes_share_cors_headers() {
        let ok = html_envelope(RenderedHtml::new("<p>x</p>".to_string()));
        let err = error_envelope(&AppError::unauthorized("no token"));
        let pre = preflight();

        for response in [&ok, &err, &pre] {
            assert_eq!(header(response, "access-control-allow-origin"), Some("*"));
            assert_eq!(
                header(response, "access-control-allow-headers"),
                Some("authorization, x-client-info, apikey, content-type")
            );
        }
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(pre.status(), StatusCode::OK);
        assert_eq!(header(&err, "content-type"), Some("application/json"));
    }
}
