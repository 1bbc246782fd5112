//! Wire envelopes exchanged over a relay connection.
//!
//! Clients send [`InboundEnvelope`]s naming a target and a message. The
//! server answers with plain-text notices or, in structured mode, with a
//! [`ChatEnvelope`] JSON object.

use serde::{Deserialize, Serialize};

use super::ClientId;
use crate::error::RelayError;

/// Notice sent back to the originating client when an envelope is rejected.
pub const INVALID_DATA_FORMAT: &str = "Invalid data format";

/// A single inbound routing request: `{"target_id": .., "message": ..}`.
///
/// Both fields may be absent on the wire; [`InboundEnvelope::validate`]
/// decides whether the envelope is routable. Extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundEnvelope {
    /// Identifier of the recipient.
    #[serde(default)]
    pub target_id: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
}

impl InboundEnvelope {
    /// Decodes an envelope from a JSON text frame.
    ///
    /// Only JSON objects are accepted; arrays and scalars are rejected even
    /// though serde could map an array onto the struct positionally.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedEnvelope`] if `raw` is not valid JSON,
    /// is not an object, or holds non-string values for the known fields.
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(RelayError::MalformedEnvelope(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Checks that both fields are present and non-empty and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedEnvelope`] naming the first missing
    /// field.
    pub fn validate(self) -> Result<ValidEnvelope, RelayError> {
        let target = self
            .target_id
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RelayError::MalformedEnvelope("missing target_id".to_string()))?;
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .ok_or_else(|| RelayError::MalformedEnvelope("missing message".to_string()))?;
        Ok(ValidEnvelope {
            target: ClientId::from(target),
            message,
        })
    }
}

/// An inbound envelope that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEnvelope {
    /// Recipient identifier.
    pub target: ClientId,
    /// Message body.
    pub message: String,
}

/// Discriminator carried in the `type` field of structured deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeKind {
    /// A chat message relayed from another client.
    Chat,
}

/// Structured delivery: `{"sender": .., "message": .., "type": "chat"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    /// Identifier of the originating client.
    pub sender: ClientId,
    /// Message body.
    pub message: String,
    /// Always [`EnvelopeKind::Chat`].
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
}

impl ChatEnvelope {
    /// Builds a chat envelope from `sender`.
    #[must_use]
    pub fn chat(sender: ClientId, message: impl Into<String>) -> Self {
        Self {
            sender,
            message: message.into(),
            kind: EnvelopeKind::Chat,
        }
    }
}

/// One queued outbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Sent verbatim as a text frame.
    Text(String),
    /// Serialized to JSON and sent as a text frame.
    Structured(ChatEnvelope),
}

impl Outbound {
    /// Renders the frame body.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Internal`] if a structured payload fails to
    /// serialize.
    pub fn into_frame(self) -> Result<String, RelayError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Structured(envelope) => serde_json::to_string(&envelope)
                .map_err(|e| RelayError::Internal(format!("encode chat envelope: {e}"))),
        }
    }
}
