//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ConnectionRegistry;
use crate::service::{DeliveryMode, MessageRouter};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Routing table of online clients.
    pub registry: Arc<ConnectionRegistry>,
    /// Router applied to every inbound frame.
    pub router: MessageRouter,
}

impl AppState {
    /// Builds state around a fresh registry.
    #[must_use]
    pub fn new(mode: DeliveryMode) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let router = MessageRouter::new(Arc::clone(&registry), mode);
        Self { registry, router }
    }
}
