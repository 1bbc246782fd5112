//! Cloneable handle to one connection's outbound queue.
//!
//! The transport owns the socket; the registry only ever holds a
//! [`ConnectionHandle`], which enqueues frames for the connection's writer
//! task. Enqueueing never waits on the network.

use tokio::sync::mpsc;

use super::envelope::{ChatEnvelope, Outbound};
use super::ConnectionId;
use crate::error::RelayError;

/// Sending half of a connection, as stored in the registry.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    connection_id: ConnectionId,
    sender: mpsc::UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    /// Creates a handle together with the receiver its writer task drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = Self {
            connection_id: ConnectionId::new(),
            sender,
        };
        (handle, receiver)
    }

    /// Returns the identifier of the underlying connection.
    #[must_use]
    pub const fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Queues a plain-text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::TransportDisconnect`] if the writer has gone.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), RelayError> {
        self.send(Outbound::Text(text.into()))
    }

    /// Queues a structured chat frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::TransportDisconnect`] if the writer has gone.
    pub fn send_structured(&self, envelope: ChatEnvelope) -> Result<(), RelayError> {
        self.send(Outbound::Structured(envelope))
    }

    fn send(&self, outbound: Outbound) -> Result<(), RelayError> {
        self.sender
            .send(outbound)
            .map_err(|_| RelayError::TransportDisconnect)
    }

    /// Returns `true` once the connection's writer has dropped its receiver.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
