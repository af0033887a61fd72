use crate::error::{RelayError, Result};
use std::net::SocketAddr;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:9000";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Address the HTTP/websocket listener binds to
    pub listen: SocketAddr,

    /// Outbound queue length per connection
    pub channel_capacity: usize,

    /// Largest accepted websocket message
    pub max_message_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 9000)),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl RelayConfig {
    pub fn new(listen: SocketAddr) -> Self {
        Self {
            listen,
            ..Default::default()
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_max_message_bytes(mut self, bytes: usize) -> Self {
        self.max_message_bytes = bytes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(RelayError::InvalidConfig(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        if self.max_message_bytes < 1024 {
            return Err(RelayError::InvalidConfig(
                "max message size must be at least 1024 bytes".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.listen, DEFAULT_LISTEN.parse().unwrap());
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RelayConfig::new("127.0.0.1:0".parse().unwrap())
            .with_channel_capacity(8)
            .with_max_message_bytes(4096);
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.max_message_bytes, 4096);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = RelayConfig::default().with_channel_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(RelayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tiny_message_limit_rejected() {
        let config = RelayConfig::default().with_max_message_bytes(10);
        assert!(config.validate().is_err());
    }
}
