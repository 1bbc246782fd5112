//! Identifier → connection routing table.
//!
//! [`ConnectionRegistry`] maps each online [`ClientId`] to the
//! [`ConnectionHandle`] of its most recent connection. A single
//! [`tokio::sync::RwLock`] guards the map; sends only take the read lock
//! and enqueue into the target's channel, so no lock is held across a
//! socket write.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::envelope::ChatEnvelope;
use super::{ClientId, ConnectionHandle, ConnectionId};
use crate::error::RelayError;

/// Routing table of every client currently online.
///
/// # Semantics
///
/// - Registration is last-write-wins. A replaced handle is orphaned, not
///   closed.
/// - Unregistering an absent identifier is a no-op.
/// - Sending to an absent or closed identifier silently drops the frame.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ClientId, ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `id`, replacing any previous handle.
    ///
    /// Returns the replaced handle, if there was one.
    pub async fn register(
        &self,
        id: ClientId,
        handle: ConnectionHandle,
    ) -> Option<ConnectionHandle> {
        let mut map = self.connections.write().await;
        let previous = map.insert(id.clone(), handle);
        if let Some(old) = &previous {
            tracing::warn!(
                client_id = %id,
                replaced = %old.connection_id(),
                "identifier re-registered; previous connection orphaned"
            );
        }
        previous
    }

    /// Removes `id` from the registry. Idempotent.
    pub async fn unregister(&self, id: &ClientId) {
        self.connections.write().await.remove(id);
    }

    /// Removes `id` only while it still points at `connection_id`.
    ///
    /// Returns `true` if an entry was removed. A connection that was
    /// replaced by a newer registration leaves the newer entry in place.
    pub async fn unregister_connection(
        &self,
        id: &ClientId,
        connection_id: ConnectionId,
    ) -> bool {
        let mut map = self.connections.write().await;
        match map.get(id) {
            Some(handle) if handle.connection_id() == connection_id => {
                map.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Returns a clone of the handle registered under `id`.
    pub async fn get(&self, id: &ClientId) -> Option<ConnectionHandle> {
        self.connections.read().await.get(id).cloned()
    }

    /// Sends a plain-text frame to `id`, best effort.
    ///
    /// Returns `true` if the frame was queued.
    pub async fn send_text(&self, id: &ClientId, text: &str) -> bool {
        let result = self.with_handle(id, |handle| handle.send_text(text)).await;
        Self::best_effort(id, result)
    }

    /// Sends a structured chat frame to `id`, best effort.
    ///
    /// Returns `true` if the frame was queued.
    pub async fn send_structured(&self, id: &ClientId, envelope: ChatEnvelope) -> bool {
        let result = self
            .with_handle(id, |handle| handle.send_structured(envelope))
            .await;
        Self::best_effort(id, result)
    }

    /// Runs `send` against the open handle registered under `id`.
    ///
    /// Fails with [`RelayError::UnknownTarget`] if `id` is not registered
    /// and [`RelayError::TransportDisconnect`] if its connection has closed.
    async fn with_handle<F>(&self, id: &ClientId, send: F) -> Result<(), RelayError>
    where
        F: FnOnce(&ConnectionHandle) -> Result<(), RelayError>,
    {
        let map = self.connections.read().await;
        match map.get(id) {
            Some(handle) if handle.is_closed() => Err(RelayError::TransportDisconnect),
            Some(handle) => send(handle),
            None => Err(RelayError::UnknownTarget(id.clone())),
        }
    }

    fn best_effort(id: &ClientId, result: Result<(), RelayError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(client_id = %id, error = %err, "dropped outbound frame");
                false
            }
        }
    }

    /// Returns `true` if `id` is registered.
    pub async fn contains(&self, id: &ClientId) -> bool {
        self.connections.read().await.contains_key(id)
    }

    /// Returns the registered identifiers, sorted.
    pub async fn identifiers(&self) -> Vec<ClientId> {
        let mut ids: Vec<ClientId> = self.connections.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of registered identifiers.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns `true` if no identifier is registered.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
