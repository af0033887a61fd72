pub mod error;
mod media;
mod relay_client;
mod signal_sink;

pub use media::MediaEngine;
pub use relay_client::RelayClient;
pub use signal_sink::SignalSink;
