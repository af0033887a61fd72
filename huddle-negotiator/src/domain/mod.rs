mod candidate_buffer;
mod ice_server;
mod role;
mod state;

pub use candidate_buffer::CandidateBuffer;
pub use ice_server::IceServer;
pub use role::Role;
pub use state::NegotiationState;
