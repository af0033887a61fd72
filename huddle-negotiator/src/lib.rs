//! Endpoint side of a huddle call.
//!
//! A [`Negotiator`] joins a room through a relay and walks the local peer
//! connection through offer, answer and candidate exchange. The peer
//! connection itself is supplied as a [`MediaEngine`].

pub mod domain;

pub mod application;

pub mod infrastructure;

pub use application::{
    run_session, ConnectionState, MediaEvent, Negotiator, NegotiatorConfig, NegotiatorEvent,
    RemoteTrack, TrackKind, DEFAULT_RELAY_URL,
};
pub use domain::{CandidateBuffer, IceServer, NegotiationState, Role};
pub use infrastructure::error::{NegotiatorError, Result};
pub use infrastructure::{MediaEngine, RelayClient, SignalSink};
