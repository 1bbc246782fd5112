//! Message router: turns inbound frames into registry deliveries.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::envelope::INVALID_DATA_FORMAT;
use crate::domain::{ChatEnvelope, ClientId, ConnectionRegistry, InboundEnvelope};
use crate::error::RelayError;

/// How routed messages are rendered for the recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// `"Message from {sender}: {message}"` to the target plus a
    /// `"Sent to {target}: {message}"` confirmation to the sender.
    #[default]
    Text,
    /// `{"sender", "message", "type": "chat"}` to the target only.
    Structured,
}

impl FromStr for DeliveryMode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "structured" => Ok(Self::Structured),
            other => Err(RelayError::Config(format!(
                "unknown delivery mode {other:?}; expected \"text\" or \"structured\""
            ))),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Structured => f.write_str("structured"),
        }
    }
}

/// Result of routing one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The message was queued for the target.
    Delivered,
    /// The target is not online; the message was dropped without notice.
    TargetOffline,
    /// The frame was rejected and the sender was told so.
    Malformed,
}

/// Routes inbound envelopes between registered clients.
///
/// Stateless apart from the shared registry; one instance is cloned into
/// every connection task.
#[derive(Debug, Clone)]
pub struct MessageRouter {
    registry: Arc<ConnectionRegistry>,
    mode: DeliveryMode,
}

impl MessageRouter {
    /// Creates a router delivering through `registry`.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>, mode: DeliveryMode) -> Self {
        Self { registry, mode }
    }

    /// Returns the shared registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Returns the configured delivery mode.
    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Routes one raw text frame received from `sender`.
    pub async fn route(&self, sender: &ClientId, raw: &str) -> RouteOutcome {
        let envelope = match InboundEnvelope::parse(raw).and_then(InboundEnvelope::validate) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(client_id = %sender, error = %err, "rejected inbound frame");
                return self.reject(sender).await;
            }
        };

        let target = envelope.target;
        let message = envelope.message;
        let delivered = match self.mode {
            DeliveryMode::Text => {
                let delivered = self
                    .registry
                    .send_text(&target, &format!("Message from {sender}: {message}"))
                    .await;
                self.registry
                    .send_text(sender, &format!("Sent to {target}: {message}"))
                    .await;
                delivered
            }
            DeliveryMode::Structured => {
                self.registry
                    .send_structured(&target, ChatEnvelope::chat(sender.clone(), message))
                    .await
            }
        };

        if delivered {
            tracing::debug!(from = %sender, to = %target, "message routed");
            RouteOutcome::Delivered
        } else {
            RouteOutcome::TargetOffline
        }
    }

    /// Sends the `"Invalid data format"` notice to `sender` only.
    pub async fn reject(&self, sender: &ClientId) -> RouteOutcome {
        self.registry.send_text(sender, INVALID_DATA_FORMAT).await;
        RouteOutcome::Malformed
    }
}
