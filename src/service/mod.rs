//! Service layer: routing of inbound envelopes to their targets.

pub mod message_router;

pub use message_router::{DeliveryMode, MessageRouter, RouteOutcome};
