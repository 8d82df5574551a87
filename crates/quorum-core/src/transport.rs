//! Transport routing for deliberation turns.
//!
//! A transport is the mechanism by which a turn's prompt reaches a speaker
//! and its response comes back: a synchronous CLI agent call, a clipboard
//! relay into a browser-hosted model, or a human typing an answer. The
//! router only classifies and renders - actual delivery (clipboard copy,
//! browser automation) is the caller's job.

use crate::error::{QuorumError, Result};
use crate::session::{PendingTurn, Session};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How a turn prompt reaches a speaker.
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
pub enum TransportKind {
    /// CLI participant reachable synchronously; the caller obtains a
    /// response immediately and submits it.
    Direct,
    /// Browser-hosted model with no programmatic API; the prompt is staged
    /// for the user to paste and the response is submitted later.
    Clipboard,
    /// A human operator answering by hand.
    Manual,
}

/// How the speaker currently due must be engaged.
///
/// Re-routing the same pending turn returns the same descriptor: the
/// descriptor is a pure function of the session's pending turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportDescriptor {
    pub kind: TransportKind,
    pub turn_id: String,
    pub speaker: String,
    pub round_index: u32,
    /// The literal prompt text to deliver through the transport.
    pub prompt: String,
}

/// An opaque string sink where clipboard-mode prompts are staged.
///
/// Write-only from the engine's perspective; a host copies the staged text
/// into the external surface (browser tab, terminal, ...).
#[async_trait]
pub trait StagingSurface: Send + Sync {
    async fn stage(&self, session_id: &str, turn_id: &str, prompt: &str) -> Result<()>;
}

/// Maps the speaker currently due to a delivery mechanism.
///
/// Fails with `InvalidState` if the session has no pending turn (already
/// synthesizing or closed).
pub fn route(session: &Session) -> Result<TransportDescriptor> {
    let pending = session.current_turn.as_ref().ok_or_else(|| {
        QuorumError::invalid_state(format!(
            "session '{}' has no pending turn (status: {})",
            session.id, session.status
        ))
    })?;

    let speaker = session.speaker_named(&pending.speaker).ok_or_else(|| {
        QuorumError::internal(format!(
            "pending turn speaker '{}' is not on the roster",
            pending.speaker
        ))
    })?;

    Ok(TransportDescriptor {
        kind: speaker.transport,
        turn_id: pending.turn_id.clone(),
        speaker: speaker.name.clone(),
        round_index: pending.round_index,
        prompt: render_turn_prompt(session, pending),
    })
}

/// Renders the prompt text for a pending turn.
///
/// The prompt carries the topic, the speaker's position in the rotation,
/// the full transcript so far, and the response format the engine expects
/// back. Deterministic for an unchanged turn log.
pub fn render_turn_prompt(session: &Session, pending: &PendingTurn) -> String {
    let mut prompt = format!(
        "# Deliberation: {}\n\nYou are \"{}\", speaker {} of {} in round {}.\n",
        session.topic,
        pending.speaker,
        (pending.sequence_index as usize % session.speakers.len()) + 1,
        session.speakers.len(),
        pending.round_index + 1,
    );

    let submitted: Vec<_> = session.submitted_turns().collect();
    if submitted.is_empty() {
        prompt.push_str("\nNo one has spoken yet. Open the deliberation with your position.\n");
    } else {
        prompt.push_str("\n## Transcript\n");
        for turn in submitted {
            prompt.push_str(&format!(
                "\n[round {}] {}: {}\n",
                turn.round_index + 1,
                turn.speaker,
                turn.content.opinion
            ));
            for marker in &turn.content.points {
                prompt.push_str(&format!("  - {}: {}\n", marker.stance, marker.point));
            }
            for risk in &turn.content.risks {
                prompt.push_str(&format!("  - risk: {}\n", risk));
            }
            for question in &turn.content.questions {
                prompt.push_str(&format!("  - question: {}\n", question));
            }
        }
    }

    prompt.push_str(
        "\n## Response format\n\
         Reply with a single JSON object:\n\
         {\n\
           \"opinion\": \"your contribution for this turn\",\n\
           \"risks\": [\"...\"],\n\
           \"questions\": [\"...\"],\n\
           \"points\": [{\"point\": \"...\", \"stance\": \"agree|disagree|unresolved|resolved\"}]\n\
         }\n\
         Mark a point \"agree\" if you could accept it as part of a consensus,\n\
         \"unresolved\" if it still needs discussion, \"resolved\" once settled.\n",
    );

    prompt
}
