/**
 * Connection Gateway
 *
 * This module implements `GET /ws`, the real-time channel. The token is
 * verified by the `GatewayUser` extractor before the upgrade, so an
 * unauthenticated attempt gets `401` and never becomes a WebSocket.
 *
 * # Connection Lifecycle
 *
 * 1. Upgrade and admit the connection (roster broadcast to everyone)
 * 2. Send `init` with the current document
 * 3. Pump inbound frames to the session and broadcast events to the socket
 * 4. On close, error or send failure, de-register (roster broadcast again)
 *
 * A slow socket only delays its own task. If its receiver lags behind the
 * broadcast buffer, the task resends the current document and roster.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::backend::auth::users::Identity;
use crate::backend::collab::session::{ConnectionSession, OpenedSession};
use crate::backend::middleware::GatewayUser;
use crate::backend::server::state::AppState;
use crate::shared::ServerMessage;

/// Slack on top of the document limit for the JSON envelope
const FRAME_OVERHEAD: usize = 64 * 1024;

/// Handle a real-time connection attempt (GET /ws)
pub async fn handle_collab_socket(
    GatewayUser(identity): GatewayUser,
    State(app_state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    tracing::info!("[Gateway] Upgrading connection for {}", identity.username);
    let max_frame = app_state.max_document_bytes.saturating_add(FRAME_OVERHEAD);

    ws.max_message_size(max_frame)
        .on_upgrade(move |socket| run_connection(socket, app_state, identity))
}

async fn run_connection(socket: WebSocket, app_state: AppState, identity: Identity) {
    let OpenedSession {
        session,
        init,
        mut events,
    } = ConnectionSession::open(
        app_state.engine.clone(),
        identity,
        app_state.max_document_bytes,
    )
    .await;

    let (mut sink, mut stream) = socket.split();

    if send_message(&mut sink, &init).await.is_ok() {
        loop {
            tokio::select! {
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Text(text))) => session.handle_text(text.as_str()).await,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("[Gateway] Connection {} errored: {}", session.connection_id(), e);
                        break;
                    }
                },
                event = events.recv() => match event {
                    Ok(event) => {
                        if let Some(message) = session.outbound(&event) {
                            if send_message(&mut sink, &message).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "[Gateway] Connection {} lagged by {} events, resyncing",
                            session.connection_id(),
                            skipped
                        );
                        let mut failed = false;
                        for message in session.resync().await {
                            if send_message(&mut sink, &message).await.is_err() {
                                failed = true;
                                break;
                            }
                        }
                        if failed {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    }

    tracing::info!("[Gateway] Closing connection {} ({})", session.connection_id(), session.username());
    session.close().await;
}

async fn send_message<S>(sink: &mut S, message: &ServerMessage) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    match message.to_json() {
        Ok(json) => sink.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!("[Gateway] Failed to serialize frame: {}", e);
            Ok(())
        }
    }
}
