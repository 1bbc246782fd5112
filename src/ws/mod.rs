//! WebSocket layer: upgrade handling and the per-connection loops.
//!
//! The endpoint at `/ws/{client_id}` registers the connection under the
//! caller-chosen identifier for as long as the socket stays open.

pub mod connection;
pub mod handler;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

/// WebSocket routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws/{client_id}", get(handler::ws_handler))
}
