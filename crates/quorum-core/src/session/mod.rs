//! Session domain module.
//!
//! This module contains the deliberation session model, its turn records,
//! the speaker roster types, and the repository interface for persistence.
//!
//! # Module Structure
//!
//! - `model`: Core session entity (`Session`, `SessionSummary`)
//! - `status`: Session lifecycle states (`SessionStatus`)
//! - `turn`: Turn records and structured content (`Turn`, `TurnContent`)
//! - `speaker`: Roster and reachability types (`Speaker`, `SpeakerCandidate`)
//! - `repository`: Repository trait for session persistence

mod model;
mod repository;
mod speaker;
mod status;
mod turn;

// Re-export public API
pub use model::{Session, SessionSummary};
pub use repository::SessionRepository;
pub use speaker::{Speaker, SpeakerCandidate};
pub use status::SessionStatus;
pub use turn::{PendingTurn, PointMarker, Stance, Turn, TurnContent};
