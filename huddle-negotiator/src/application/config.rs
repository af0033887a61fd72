use crate::domain::{IceServer, Role};
use huddle_core::RoomName;

pub const DEFAULT_RELAY_URL: &str = "ws://127.0.0.1:9000/signaling";

/// Configuration for one endpoint of a call
#[derive(Debug, Clone)]
pub struct NegotiatorConfig {
    /// Room to join; every outgoing signal is tagged with it
    pub room: RoomName,

    pub role: Role,

    /// Websocket URL of the relay's signaling endpoint
    pub relay_url: String,

    /// Passed through to the media engine
    pub ice_servers: Vec<IceServer>,
}

impl NegotiatorConfig {
    pub fn new(room: RoomName, role: Role) -> Self {
        Self {
            room,
            role,
            relay_url: DEFAULT_RELAY_URL.to_string(),
            ice_servers: IceServer::default_stun_servers(),
        }
    }

    pub fn with_relay_url(mut self, url: impl Into<String>) -> Self {
        self.relay_url = url.into();
        self
    }

    pub fn with_ice_servers(mut self, servers: Vec<IceServer>) -> Self {
        self.ice_servers = servers;
        self
    }

    pub fn add_ice_server(mut self, server: IceServer) -> Self {
        self.ice_servers.push(server);
        self
    }
}
