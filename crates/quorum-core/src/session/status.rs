use serde::{Deserialize, Serialize};

/// Lifecycle state of a deliberation session.
///
/// Transitions are driven by the turn scheduler:
/// `Active -> AwaitingTurn` when a turn is issued, `AwaitingTurn -> Active`
/// on submission, `-> Synthesizing` on round-limit exhaustion or an explicit
/// finish request, and `Synthesizing -> Closed` once the report is produced.
/// `Closed` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Active,
    AwaitingTurn,
    Synthesizing,
    Closed,
}

impl SessionStatus {
    /// A closed session accepts no further turns.
    pub fn accepts_turns(&self) -> bool {
        matches!(self, Self::Active | Self::AwaitingTurn)
    }
}
