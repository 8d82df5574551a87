use crate::transport::TransportKind;
use serde::{Deserialize, Serialize};

/// The turn currently due but not yet answered.
///
/// Its `turn_id` is assigned when the turn becomes due, so a caller can
/// reference a turn it has not yet answered. At most one exists per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTurn {
    pub turn_id: String,
    pub speaker: String,
    pub round_index: u32,
    pub sequence_index: u32,
    /// Timestamp when the turn was issued (ISO 8601 format)
    pub issued_at: String,
}

/// One speaker's contribution, bound to its position in the session's
/// total order. Append-only: never reordered or mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub turn_id: String,
    pub speaker: String,
    pub round_index: u32,
    pub sequence_index: u32,
    pub content: TurnContent,
    /// Transport mechanism used - recorded for audit, not reinterpreted.
    pub transport: TransportKind,
    /// Timestamp when the turn was submitted (ISO 8601 format)
    pub submitted_at: String,
    /// Set when synthesis was forced while this turn was still pending.
    /// Abandoned turns stay in the log as a flagged gap but carry no content.
    #[serde(default)]
    pub abandoned: bool,
}

/// Structured response payload of a turn.
///
/// Stored verbatim; only the synthesis engine interprets the point markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TurnContent {
    #[serde(default)]
    pub opinion: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub points: Vec<PointMarker>,
}

impl TurnContent {
    /// Content with just an opinion and no markers.
    pub fn opinion(text: impl Into<String>) -> Self {
        Self {
            opinion: text.into(),
            ..Default::default()
        }
    }
}

/// A discussion point with the speaker's declared stance on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub point: String,
    pub stance: Stance,
}

/// Declared agreement/disagreement marker on a point.
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
pub enum Stance {
    /// The speaker could accept this point as part of a consensus.
    Agree,
    Disagree,
    /// Still needs discussion.
    Unresolved,
    /// Settled from this speaker's perspective.
    Resolved,
}
