//! Room-scoped signaling relay.
//!
//! Participants connect over a websocket at `/signaling`, join a named
//! room and exchange opaque offer, answer and candidate payloads with the
//! other members. The relay never inspects the payloads.

pub mod config;
mod connection;
mod connection_handler;
mod connection_repository;
pub mod error;
mod memory_storage;
mod room_repository;
pub mod route;
mod server;
pub mod websocket_listener;

pub use config::RelayConfig;
pub use connection::Connection;
pub use connection_handler::{ConnectionHandler, Delivery};
pub use connection_repository::ConnectionRepository;
pub use error::{ErrorKind, RelayError, Result};
pub use memory_storage::MemoryStorage;
pub use room_repository::RoomRepository;
pub use route::create_signaling_route;
pub use server::RelayServer;
