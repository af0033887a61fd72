mod config;
mod events;
mod negotiator;
mod session;

pub use config::{NegotiatorConfig, DEFAULT_RELAY_URL};
pub use events::{ConnectionState, MediaEvent, NegotiatorEvent, RemoteTrack, TrackKind};
pub use negotiator::Negotiator;
pub use session::run_session;
