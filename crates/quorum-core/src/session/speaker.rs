use crate::transport::TransportKind;
use serde::{Deserialize, Serialize};

/// One participant on a session's roster.
///
/// The roster is fixed at creation; insertion order defines the turn
/// rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub transport: TransportKind,
}

impl Speaker {
    pub fn new(name: impl Into<String>, transport: TransportKind) -> Self {
        Self {
            name: name.into(),
            transport,
        }
    }
}

/// Reachability descriptor produced by speaker discovery.
///
/// Ephemeral - recomputed per query, never persisted as session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerCandidate {
    pub name: String,
    pub transport: TransportKind,
    pub available: bool,
}

impl SpeakerCandidate {
    pub fn new(name: impl Into<String>, transport: TransportKind, available: bool) -> Self {
        Self {
            name: name.into(),
            transport,
            available,
        }
    }
}
