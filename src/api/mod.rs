//! HTTP layer: presence and system endpoints, OpenAPI document, and app composition.

pub mod handlers;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::ws;

/// OpenAPI document for the HTTP endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "relay-gateway",
        description = "WebSocket relay routing messages between connected client identifiers"
    ),
    paths(
        handlers::system::root_handler,
        handlers::system::health_handler,
        handlers::clients::list_clients,
        handlers::clients::get_client
    ),
    tags(
        (name = "System", description = "Service metadata and health"),
        (name = "Clients", description = "Presence of connected identifiers")
    )
)]
pub struct ApiDoc;

/// Builds the REST router: resources under `/api/v1`, system endpoints at
/// the root.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the complete application: REST, WebSocket, and middleware.
pub fn build_app(state: AppState, cors_allow_any: bool) -> Router {
    let router = Router::new()
        .merge(build_router())
        .merge(ws::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    let router = router.layer(TraceLayer::new_for_http());
    let router = if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router.with_state(state)
}
