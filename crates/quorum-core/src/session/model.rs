//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! deliberation in the engine's domain layer.

use super::speaker::Speaker;
use super::status::SessionStatus;
use super::turn::{PendingTurn, Turn};
use crate::error::{QuorumError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One deliberation: a structured multi-party debate with a fixed roster.
///
/// A session contains:
/// - The debate topic (immutable after creation)
/// - The ordered speaker roster (fixed at creation, defines rotation)
/// - An optional round limit bounding the debate
/// - The append-only turn log (the total order of submitted turns)
/// - The pending turn, if one is currently due
/// - Timestamps for creation and last update
///
/// This is the "pure" domain model that the scheduler and synthesis engine
/// operate on, independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Free-text debate topic
    pub topic: String,
    /// Ordered roster; insertion order is the turn rotation
    pub speakers: Vec<Speaker>,
    /// Bounds the total number of rounds; `None` = unbounded until an
    /// explicit synthesis request
    pub round_limit: Option<u32>,
    pub status: SessionStatus,
    /// Append-only ordered turn log
    #[serde(default)]
    pub turn_log: Vec<Turn>,
    /// The turn currently due, if any (at most one per session)
    #[serde(default)]
    pub current_turn: Option<PendingTurn>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates a new session, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the roster is empty, contains duplicate
    /// names, or the round limit is zero.
    pub fn new(
        topic: impl Into<String>,
        speakers: Vec<Speaker>,
        round_limit: Option<u32>,
    ) -> Result<Self> {
        if speakers.is_empty() {
            return Err(QuorumError::invalid_config(
                "a session needs at least one speaker",
            ));
        }

        let mut seen = HashSet::new();
        for speaker in &speakers {
            if !seen.insert(speaker.name.as_str()) {
                return Err(QuorumError::invalid_config(format!(
                    "duplicate speaker '{}'",
                    speaker.name
                )));
            }
        }

        if round_limit == Some(0) {
            return Err(QuorumError::invalid_config(
                "round limit must be a positive integer",
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.into(),
            speakers,
            round_limit,
            status: SessionStatus::Active,
            turn_log: Vec::new(),
            current_turn: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Looks up a roster speaker by name.
    pub fn speaker_named(&self, name: &str) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.name == name)
    }

    /// Turns that were actually submitted (abandoned gaps excluded).
    pub fn submitted_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turn_log.iter().filter(|t| !t.abandoned)
    }

    /// Number of submitted turns.
    pub fn turn_count(&self) -> usize {
        self.submitted_turns().count()
    }

    /// Number of completed full passes through the roster.
    pub fn rounds_completed(&self) -> u32 {
        (self.turn_count() / self.speakers.len()) as u32
    }

    pub fn is_closed(&self) -> bool {
        self.status == SessionStatus::Closed
    }

    /// Condensed view for directory listings.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            topic: self.topic.clone(),
            status: self.status,
            speakers: self.speakers.len(),
            turn_count: self.turn_count(),
            rounds_completed: self.rounds_completed(),
            round_limit: self.round_limit,
            created_at: self.created_at.clone(),
        }
    }
}

/// Directory-listing view of a session: identity, status, round progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub topic: String,
    pub status: SessionStatus,
    pub speakers: usize,
    pub turn_count: usize,
    pub rounds_completed: u32,
    pub round_limit: Option<u32>,
    pub created_at: String,
}
