//! System endpoints: welcome message and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Welcome response.
#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    /// Greeting text.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Number of identifiers currently online.
    pub connections: usize,
}

/// `GET /` — Welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Welcome message",
    responses(
        (status = 200, description = "Service greeting", body = WelcomeResponse),
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(WelcomeResponse {
        message: "Welcome to WebSocket Chat API".to_string(),
    })
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp, and the number of connected clients.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            connections: state.registry.len().await,
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{ClientId, ConnectionHandle};
    use crate::service::DeliveryMode;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("request build failed");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("request failed");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not JSON");
        };
        (status, value)
    }

    #[tokio::test]
    async fn root_returns_welcome() {
        let app = routes().with_state(AppState::new(DeliveryMode::Text));
        let (status, body) = get_json(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"message": "Welcome to WebSocket Chat API"})
        );
    }

    #[tokio::test]
    async fn health_counts_connections() {
        let state = AppState::new(DeliveryMode::Text);
        let (handle, _rx) = ConnectionHandle::channel();
        state.registry.register(ClientId::new("alice"), handle).await;

        let app = routes().with_state(state);
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("status"), Some(&serde_json::json!("healthy")));
        assert_eq!(body.get("connections"), Some(&serde_json::json!(1)));
    }
}
