use crate::infrastructure::error::{NegotiatorError, Result};
use async_trait::async_trait;
use huddle_core::ClientMessage;
use tokio::sync::mpsc;

/// Outbound half of the relay channel
#[async_trait]
pub trait SignalSink: Send {
    async fn send(&mut self, message: ClientMessage) -> Result<()>;
}

#[async_trait]
impl SignalSink for mpsc::Sender<ClientMessage> {
    async fn send(&mut self, message: ClientMessage) -> Result<()> {
        mpsc::Sender::send(self, message)
            .await
            .map_err(|_| NegotiatorError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::RoomName;

    #[tokio::test]
    async fn test_channel_sink_forwards() {
        let (mut tx, mut rx) = mpsc::channel(1);
        let message = ClientMessage::join(RoomName::new("r1").unwrap());

        SignalSink::send(&mut tx, message.clone()).await.unwrap();

        assert_eq!(rx.recv().await, Some(message));
    }

    #[tokio::test]
    async fn test_channel_sink_reports_closed() {
        let (mut tx, rx) = mpsc::channel::<ClientMessage>(1);
        drop(rx);

        let result = SignalSink::send(&mut tx, ClientMessage::LeaveRoom).await;

        assert!(matches!(result, Err(NegotiatorError::ChannelClosed)));
    }
}
