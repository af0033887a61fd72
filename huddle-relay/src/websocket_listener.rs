use crate::connection_handler::ConnectionHandler;
use crate::error::RelayError;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use huddle_core::{ClientMessage, RelayEvent};
use tokio::sync::mpsc::{channel, Receiver};
use tracing::{debug, error, info, warn};

pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    connection_handler: ConnectionHandler,
    channel_capacity: usize,
    max_message_bytes: usize,
) -> impl IntoResponse {
    ws.max_message_size(max_message_bytes)
        .on_upgrade(move |socket| listen(socket, connection_handler, channel_capacity))
}

async fn listen(socket: WebSocket, connection_handler: ConnectionHandler, channel_capacity: usize) {
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = channel(channel_capacity);

    let participant_id = match connection_handler.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to register connection");
            return;
        }
    };

    let sender_task = handle_outgoing_events(rx, ws_sender);
    let receiver_task = handle_incoming_messages(ws_receiver, &connection_handler);

    tokio::select! {
        _ = sender_task => {
            info!(%participant_id, "Sender task completed");
        }
        _ = receiver_task => {
            info!(%participant_id, "Receiver task completed");
        }
    }

    if let Err(e) = connection_handler.disconnect().await {
        error!(%participant_id, error = %e, "Failed to disconnect");
    }
}

/// Drain the outbound queue of one participant into its socket
pub async fn handle_outgoing_events(
    mut rx: Receiver<RelayEvent>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) {
    while let Some(event) = rx.recv().await {
        let text = match serde_json::to_string(&event) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, kind = event.kind(), "Failed to encode event");
                continue;
            }
        };
        if let Err(e) = ws_sender.send(Message::Text(text)).await {
            debug!(error = %e, "Failed to send event, closing writer");
            break;
        }
    }
}

pub async fn handle_incoming_messages(
    mut receiver: SplitStream<WebSocket>,
    connection_handler: &ConnectionHandler,
) {
    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Close(_)) => {
                info!(participant_id = ?connection_handler.participant_id(), "Client closed connection");
                break;
            }
            Ok(message) => handle_message(message, connection_handler).await,
            Err(e) => {
                warn!(error = %e, "Failed to receive message");
                break;
            }
        }
    }
}

pub async fn handle_message(message: Message, connection_handler: &ConnectionHandler) {
    match message {
        Message::Text(text) => match parse_client_message(&text) {
            Ok(message) => {
                if let Err(e) = connection_handler.handle_message(message).await {
                    warn!(kind = %e.kind(), error = %e, "Message not relayed");
                }
            }
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Dropping malformed message");
            }
        },
        Message::Ping(_) | Message::Pong(_) => {}
        other => {
            warn!(
                participant_id = ?connection_handler.participant_id(),
                "Unsupported message type: {:?}",
                other
            );
        }
    }
}

pub fn parse_client_message(text: &str) -> Result<ClientMessage, RelayError> {
    Ok(serde_json::from_str(text)?)
}
