pub mod message;
pub mod payload;
pub mod session_description;

pub use message::{ClientMessage, RelayEvent};
pub use payload::Payload;
pub use session_description::{IceCandidate, SdpType, SessionDescription};
