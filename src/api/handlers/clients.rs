//! Presence handlers: which identifiers are online.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::ClientId;
use crate::error::{ErrorResponse, RelayError};

/// Online identifiers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientListResponse {
    /// Identifiers currently registered, sorted.
    #[schema(value_type = Vec<String>)]
    pub clients: Vec<ClientId>,
    /// Number of identifiers.
    pub count: usize,
}

/// Presence of a single identifier.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientPresenceResponse {
    /// The identifier that was looked up.
    #[schema(value_type = String)]
    pub client_id: ClientId,
    /// Always `true`; offline identifiers answer 404.
    pub online: bool,
}

/// `GET /clients` — List online identifiers.
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "Clients",
    summary = "List online clients",
    responses(
        (status = 200, description = "Online identifiers", body = ClientListResponse),
    )
)]
pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    let clients = state.registry.identifiers().await;
    Json(ClientListResponse {
        count: clients.len(),
        clients,
    })
}

/// `GET /clients/{client_id}` — Check whether an identifier is online.
///
/// # Errors
///
/// Returns [`RelayError::UnknownTarget`] if the identifier is not registered.
#[utoipa::path(
    get,
    path = "/api/v1/clients/{client_id}",
    tag = "Clients",
    summary = "Client presence",
    params(("client_id" = String, Path, description = "Caller-chosen identifier")),
    responses(
        (status = 200, description = "Client is online", body = ClientPresenceResponse),
        (status = 404, description = "Client is not connected", body = ErrorResponse),
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, RelayError> {
    let client_id = ClientId::from(client_id);
    if !state.registry.contains(&client_id).await {
        return Err(RelayError::UnknownTarget(client_id));
    }
    Ok(Json(ClientPresenceResponse {
        client_id,
        online: true,
    }))
}

/// Presence routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients/{client_id}", get(get_client))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::ConnectionHandle;
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

    async fn state_with(names: &[&str]) -> AppState {
        let state = AppState::new(DeliveryMode::Text);
        for name in names {
            let (handle, _rx) = ConnectionHandle::channel();
            state.registry.register(ClientId::new(*name), handle).await;
        }
        state
    }

    #[tokio::test]
    async fn lists_online_clients() {
        let app = routes().with_state(state_with(&["bob", "alice"]).await);
        let (status, body) = get_json(app, "/clients").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"clients": ["alice", "bob"], "count": 2})
        );
    }

    #[tokio::test]
    async fn online_client_is_found() {
        let app = routes().with_state(state_with(&["alice"]).await);
        let (status, body) = get_json(app, "/clients/alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"client_id": "alice", "online": true})
        );
    }

    #[tokio::test]
    async fn offline_client_returns_not_found_error_body() {
        let app = routes().with_state(state_with(&[]).await);
        let (status, body) = get_json(app, "/clients/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"error": {"code": 2001, "message": "unknown target: ghost"}})
        );
    }
}
