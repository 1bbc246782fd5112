//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] covers the three conditions the routing core recognizes
//! (malformed envelope, unknown target, transport disconnect) plus the
//! startup and server failures of the surrounding service. None of the core
//! conditions is fatal; they are handled where they occur.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ClientId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "unknown target: bob"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Relay error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Routing    | 404 Not Found / 410 Gone  |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Inbound envelope is not a JSON object or lacks `target_id`/`message`.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Target identifier is not present in the registry.
    #[error("unknown target: {0}")]
    UnknownTarget(ClientId),

    /// The connection's transport has gone away.
    #[error("transport disconnected")]
    TransportDisconnect,

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MalformedEnvelope(_) => 1001,
            Self::UnknownTarget(_) => 2001,
            Self::TransportDisconnect => 2002,
            Self::Internal(_) => 3000,
            Self::Config(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedEnvelope(_) => StatusCode::BAD_REQUEST,
            Self::UnknownTarget(_) => StatusCode::NOT_FOUND,
            Self::TransportDisconnect => StatusCode::GONE,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedEnvelope(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_ranges() {
        assert_eq!(RelayError::MalformedEnvelope(String::new()).error_code(), 1001);
        assert_eq!(RelayError::UnknownTarget(ClientId::new("x")).error_code(), 2001);
        assert_eq!(RelayError::TransportDisconnect.error_code(), 2002);
        assert_eq!(RelayError::Config(String::new()).error_code(), 3001);
    }

    #[test]
    fn unknown_target_maps_to_not_found() {
        let err = RelayError::UnknownTarget(ClientId::new("ghost"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "unknown target: ghost");
    }

    #[test]
    fn into_response_sets_status() {
        let response = RelayError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_errors_become_malformed_envelopes() {
        let Err(json_err) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected a parse error");
        };
        let err = RelayError::from(json_err);
        assert!(matches!(err, RelayError::MalformedEnvelope(_)));
    }
}
