//! # relay-gateway
//!
//! WebSocket relay that routes point-to-point messages between clients
//! identified by caller-chosen names.
//!
//! A client connects to `/ws/{client_id}` and sends
//! `{"target_id": .., "message": ..}` frames. The relay looks the target up
//! in the [`domain::ConnectionRegistry`] and delivers the message if the
//! target is online. Nothing is stored or retried.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)       ── one read loop + one writer per socket
//!     ├── System Handlers (api/)
//!     │
//!     ├── MessageRouter (service/)
//!     │
//!     └── ConnectionRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
