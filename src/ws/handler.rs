//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::ClientId;

/// `GET /ws/{client_id}` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let client_id = ClientId::from(client_id);
    ws.on_upgrade(move |socket| run_connection(socket, client_id, state.router))
}
