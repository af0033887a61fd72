use clap::{Parser, Subcommand};
use huddle_core::RoomName;
use huddle_negotiator::DEFAULT_RELAY_URL;
use huddle_relay::config::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_LISTEN, DEFAULT_MAX_MESSAGE_BYTES};
use huddle_relay::RelayConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "huddle")]
#[command(version, about = "huddle - room-scoped WebRTC signaling relay")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Debug level logging for the huddle crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the signaling relay
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "HUDDLE_LISTEN", default_value = DEFAULT_LISTEN)]
        listen: SocketAddr,

        /// Outbound queue length per connection
        #[arg(long, env = "HUDDLE_CHANNEL_CAPACITY", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
        channel_capacity: usize,

        /// Largest accepted websocket message in bytes
        #[arg(long, env = "HUDDLE_MAX_MESSAGE_BYTES", default_value_t = DEFAULT_MAX_MESSAGE_BYTES)]
        max_message_bytes: usize,
    },

    /// Join a room and print the relay events it receives
    Probe {
        /// Relay signaling URL
        #[arg(short, long, default_value = DEFAULT_RELAY_URL)]
        server: String,

        /// Room to join
        #[arg(short, long)]
        room: RoomName,
    },

    /// Print or write the JSON schema of the wire protocol
    Schema {
        /// Directory to write one file per message direction into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Relay configuration for `serve`; `None` for other commands
    pub fn relay_config(&self) -> Option<RelayConfig> {
        match self {
            Commands::Serve {
                listen,
                channel_capacity,
                max_message_bytes,
            } => Some(
                RelayConfig::new(*listen)
                    .with_channel_capacity(*channel_capacity)
                    .with_max_message_bytes(*max_message_bytes),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "huddle",
            "serve",
            "--listen",
            "127.0.0.1:7000",
            "--channel-capacity",
            "8",
            "--json-logs",
        ])
        .unwrap();

        assert!(cli.json_logs);
        let config = cli.command.relay_config().unwrap();
        assert_eq!(config.listen, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_parse_probe_requires_room() {
        assert!(Cli::try_parse_from(["huddle", "probe"]).is_err());

        let cli = Cli::try_parse_from(["huddle", "probe", "--room", "therapy-room"]).unwrap();
        match cli.command {
            Commands::Probe { room, server } => {
                assert_eq!(room.as_str(), "therapy-room");
                assert_eq!(server, DEFAULT_RELAY_URL);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_room_is_rejected() {
        assert!(Cli::try_parse_from(["huddle", "probe", "--room", ""]).is_err());
    }

    #[test]
    fn test_schema_has_no_relay_config() {
        let cli = Cli::try_parse_from(["huddle", "schema"]).unwrap();
        assert!(cli.command.relay_config().is_none());
    }
}
