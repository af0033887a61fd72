use huddle_core::{IceCandidate, ParticipantId};

/// Remote candidates that arrived before a remote description was set
#[derive(Debug, Default)]
pub struct CandidateBuffer {
    pending: Vec<(ParticipantId, IceCandidate)>,
}

impl CandidateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: ParticipantId, candidate: IceCandidate) {
        self.pending.push((from, candidate));
    }

    /// Take the candidates sent by `peer` in arrival order; all others are dropped
    pub fn drain_from(&mut self, peer: ParticipantId) -> Vec<IceCandidate> {
        self.pending
            .drain(..)
            .filter(|(from, _)| *from == peer)
            .map(|(_, candidate)| candidate)
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
