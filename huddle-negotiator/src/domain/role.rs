use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of a call creates the offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Offers as soon as a peer is present
    Initiator,
    /// Waits for an offer and answers it
    #[default]
    Responder,
}

impl Role {
    pub fn offers_on_peer(&self) -> bool {
        matches!(self, Role::Initiator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => write!(f, "initiator"),
            Role::Responder => write!(f, "responder"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "initiator" | "caller" => Ok(Role::Initiator),
            "responder" | "callee" => Ok(Role::Responder),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
