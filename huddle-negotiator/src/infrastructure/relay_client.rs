use crate::application::NegotiatorConfig;
use crate::infrastructure::error::{NegotiatorError, Result};
use crate::infrastructure::signal_sink::SignalSink;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use huddle_core::{ClientMessage, RelayEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Websocket connection to a huddle relay.
///
/// Outgoing messages are queued to a writer task; relay events are parsed by
/// a reader task and handed out through the receiver returned by
/// [`RelayClient::connect`].
pub struct RelayClient {
    outgoing: mpsc::Sender<ClientMessage>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl RelayClient {
    /// Connect to the relay named by `config.relay_url`
    pub async fn connect_with_config(
        config: &NegotiatorConfig,
        capacity: usize,
    ) -> Result<(Self, mpsc::Receiver<RelayEvent>)> {
        Self::connect(&config.relay_url, capacity).await
    }

    pub async fn connect(
        url: &str,
        capacity: usize,
    ) -> Result<(Self, mpsc::Receiver<RelayEvent>)> {
        let (ws_stream, _) = connect_async(url).await?;
        info!(%url, "Connected to relay");
        let (mut write, mut read) = ws_stream.split();

        let (event_tx, event_rx) = mpsc::channel(capacity);
        let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<ClientMessage>(capacity);

        let writer = tokio::spawn(async move {
            while let Some(message) = outgoing_rx.recv().await {
                let text = match serde_json::to_string(&message) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "Failed to encode message");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(text)).await {
                    warn!(error = %e, "Relay write failed");
                    break;
                }
            }
            let _ = write.close().await;
        });

        let reader = tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let text = match message {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "Relay read failed");
                        break;
                    }
                };
                match serde_json::from_str::<RelayEvent>(&text) {
                    Ok(event) => {
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Dropping malformed relay event"),
                }
            }
            debug!("Relay reader finished");
        });

        Ok((
            RelayClient {
                outgoing: outgoing_tx,
                writer,
                reader,
            },
            event_rx,
        ))
    }

    /// Flush queued messages, send a close frame and stop reading
    pub async fn close(self) {
        let RelayClient {
            outgoing,
            writer,
            reader,
        } = self;
        drop(outgoing);
        let _ = writer.await;
        reader.abort();
    }
}

#[async_trait]
impl SignalSink for RelayClient {
    async fn send(&mut self, message: ClientMessage) -> Result<()> {
        debug!(kind = message.kind(), "Sending to relay");
        self.outgoing
            .send(message)
            .await
            .map_err(|_| NegotiatorError::ChannelClosed)
    }
}
