//! Domain layer: identifiers, wire envelopes, and the connection registry.
//!
//! This module contains the routing state of the relay: the caller-chosen
//! client identifiers, the per-connection outbound handle, and the
//! registry mapping one to the other.

pub mod client_id;
pub mod connection_handle;
pub mod connection_registry;
pub mod envelope;

pub use client_id::{ClientId, ConnectionId};
pub use connection_handle::ConnectionHandle;
pub use connection_registry::ConnectionRegistry;
pub use envelope::{ChatEnvelope, InboundEnvelope, Outbound, ValidEnvelope};
