//! WebSocket connection lifecycle.
//!
//! Each accepted socket is split into a writer task, which drains the
//! connection's outbound queue, and a read loop, which feeds inbound
//! frames to the [`MessageRouter`] in arrival order. The read loop owns
//! registration: it registers on entry and unregisters on disconnect.
//!
//! The read loop keeps its own clone of the [`ConnectionHandle`], so the
//! socket outlives its registry entry. A client whose identifier was taken
//! over by a newer connection stays open and can keep sending.

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ClientId, ConnectionHandle, Outbound};
use crate::service::MessageRouter;

/// Runs a registered client connection until the socket closes.
pub async fn run_connection(socket: WebSocket, client_id: ClientId, router: MessageRouter) {
    let (ws_tx, mut ws_rx) = socket.split();
    let (handle, outbound_rx) = ConnectionHandle::channel();
    let connection_id = handle.connection_id();
    let registry = router.registry();

    // Held until the read loop ends; the outbound queue must not close
    // when a newer registration replaces this entry.
    let own_handle = handle.clone();
    registry.register(client_id.clone(), handle).await;
    tracing::info!(client_id = %client_id, connection_id = %connection_id, "client connected");

    let mut writer = tokio::spawn(write_loop(ws_tx, outbound_rx));

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        router.route(&client_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => {
                            router.route(&client_id, text).await;
                        }
                        Err(_) => {
                            router.reject(&client_id).await;
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!(client_id = %client_id, error = %err, "ws read error");
                        break;
                    }
                }
            }
            // Writer exits only when a socket write fails
            _ = &mut writer => break,
        }
    }

    let removed = registry.unregister_connection(&client_id, connection_id).await;
    drop(own_handle);
    writer.abort();
    tracing::info!(
        client_id = %client_id,
        connection_id = %connection_id,
        unregistered = removed,
        "client disconnected"
    );
}

/// Forwards queued frames to the socket until the queue closes or a write
/// fails.
async fn write_loop(
    mut ws_tx: SplitSink<WebSocket, Message>,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
) {
    while let Some(outbound) = outbound_rx.recv().await {
        let frame = match outbound.into_frame() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unencodable frame");
                continue;
            }
        };
        if ws_tx.send(Message::text(frame)).await.is_err() {
            break;
        }
    }
    let _ = ws_tx.close().await;
}
