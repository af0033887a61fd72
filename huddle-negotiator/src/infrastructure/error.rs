/// Errors raised while negotiating a call
#[derive(Debug, thiserror::Error)]
pub enum NegotiatorError {
    #[error("Media engine error: {0}")]
    Media(String),

    #[error("Signaling error: {0}")]
    Signal(String),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Channel closed")]
    ChannelClosed,

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

pub type Result<T> = std::result::Result<T, NegotiatorError>;
