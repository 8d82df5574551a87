//! Turn scheduler: the per-session turn-taking state machine.
//!
//! The scheduler decides whose turn is next, enforces the round structure,
//! and owns every status transition. All functions mutate the in-memory
//! [`Session`] only; persisting the result is the orchestrator's job.
//!
//! Turn order is strictly roster order: the speaker due at global sequence
//! index `k` is always `speakers[k % n]`. No speaker is ever skipped.

use crate::error::{QuorumError, Result};
use crate::session::{PendingTurn, Session, SessionStatus, Turn, TurnContent};
use crate::transport::TransportKind;

/// Issues the next pending turn, or auto-transitions to `Synthesizing`
/// once the round budget is exhausted.
///
/// # Errors
///
/// Returns `InvalidState` if the session no longer accepts turns or a turn
/// is already pending.
pub fn issue_next_turn(session: &mut Session) -> Result<()> {
    if !session.status.accepts_turns() {
        return Err(QuorumError::invalid_state(format!(
            "session '{}' is {} and cannot issue turns",
            session.id, session.status
        )));
    }
    if session.current_turn.is_some() {
        return Err(QuorumError::invalid_state(format!(
            "session '{}' already has a pending turn",
            session.id
        )));
    }

    let sequence_index = session.turn_log.len() as u32;
    let roster_len = session.speakers.len() as u32;

    if let Some(limit) = session.round_limit {
        if sequence_index >= limit * roster_len {
            tracing::debug!(
                session_id = %session.id,
                rounds = limit,
                "round budget exhausted, entering synthesis"
            );
            session.status = SessionStatus::Synthesizing;
            session.updated_at = chrono::Utc::now().to_rfc3339();
            return Ok(());
        }
    }

    let speaker = &session.speakers[(sequence_index % roster_len) as usize];
    session.current_turn = Some(PendingTurn {
        turn_id: uuid::Uuid::new_v4().to_string(),
        speaker: speaker.name.clone(),
        round_index: sequence_index / roster_len,
        sequence_index,
        issued_at: chrono::Utc::now().to_rfc3339(),
    });
    session.status = SessionStatus::AwaitingTurn;
    session.updated_at = chrono::Utc::now().to_rfc3339();
    Ok(())
}

/// Appends a submitted turn and advances the rotation.
///
/// This is the only way the pending turn is cleared. After the append the
/// scheduler immediately issues the next turn (or enters `Synthesizing`
/// when the round budget is spent).
///
/// # Errors
///
/// - `InvalidState` if the session is closed or no turn is pending
/// - `OutOfOrder` if `turn_id` does not match the pending turn (stale or
///   duplicate submission)
pub fn submit_turn(
    session: &mut Session,
    turn_id: &str,
    content: TurnContent,
    transport: TransportKind,
) -> Result<()> {
    if session.is_closed() {
        return Err(QuorumError::invalid_state(format!(
            "session '{}' is closed and accepts no further turns",
            session.id
        )));
    }

    let Some(pending) = session.current_turn.take() else {
        return Err(QuorumError::invalid_state(format!(
            "session '{}' has no pending turn (status: {})",
            session.id, session.status
        )));
    };

    if pending.turn_id != turn_id {
        let expected = pending.turn_id.clone();
        session.current_turn = Some(pending);
        return Err(QuorumError::out_of_order(expected, turn_id));
    }

    session.turn_log.push(Turn {
        turn_id: pending.turn_id,
        speaker: pending.speaker,
        round_index: pending.round_index,
        sequence_index: pending.sequence_index,
        content,
        transport,
        submitted_at: chrono::Utc::now().to_rfc3339(),
        abandoned: false,
    });
    session.status = SessionStatus::Active;

    issue_next_turn(session)
}

/// Marks the pending turn abandoned, keeping it in the log as a flagged
/// gap so synthesis can note the incomplete round. No-op without one.
pub fn abandon_pending(session: &mut Session) {
    if let Some(pending) = session.current_turn.take() {
        tracing::debug!(
            session_id = %session.id,
            turn_id = %pending.turn_id,
            speaker = %pending.speaker,
            "abandoning pending turn"
        );
        let transport = session
            .speaker_named(&pending.speaker)
            .map(|s| s.transport)
            .unwrap_or(TransportKind::Manual);
        session.turn_log.push(Turn {
            turn_id: pending.turn_id,
            speaker: pending.speaker,
            round_index: pending.round_index,
            sequence_index: pending.sequence_index,
            content: TurnContent::default(),
            transport,
            submitted_at: chrono::Utc::now().to_rfc3339(),
            abandoned: true,
        });
    }
}

/// Enters `Synthesizing` on an explicit finish request, abandoning any
/// pending turn.
///
/// # Errors
///
/// Returns `InvalidState` if the session is already closed.
pub fn begin_synthesis(session: &mut Session) -> Result<()> {
    if session.is_closed() {
        return Err(QuorumError::invalid_state(format!(
            "session '{}' is already closed",
            session.id
        )));
    }
    abandon_pending(session);
    session.status = SessionStatus::Synthesizing;
    session.updated_at = chrono::Utc::now().to_rfc3339();
    Ok(())
}

/// Terminal transition: the synthesis report has been produced.
pub fn close(session: &mut Session) {
    session.status = SessionStatus::Closed;
    session.updated_at = chrono::Utc::now().to_rfc3339();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Speaker;

    fn roster(names: &[&str]) -> Vec<Speaker> {
        names
            .iter()
            .map(|n| Speaker::new(*n, TransportKind::Direct))
            .collect()
    }

    fn started(names: &[&str], round_limit: Option<u32>) -> Session {
        let mut session = Session::new("topic", roster(names), round_limit).unwrap();
        issue_next_turn(&mut session).unwrap();
        session
    }

    /// Submits whatever turn is currently pending.
    fn submit_pending(session: &mut Session) -> String {
        let turn_id = session.current_turn.as_ref().unwrap().turn_id.clone();
        submit_turn(
            session,
            &turn_id,
            TurnContent::opinion("fine"),
            TransportKind::Direct,
        )
        .unwrap();
        turn_id
    }

    #[test]
    fn rotation_cycles_through_roster_in_order() {
        let mut session = started(&["a", "b", "c"], None);

        for k in 0..7u32 {
            let pending = session.current_turn.as_ref().unwrap();
            assert_eq!(pending.sequence_index, k);
            assert_eq!(pending.round_index, k / 3);
            assert_eq!(
                pending.speaker,
                session.speakers[(k % 3) as usize].name,
                "speaker due at sequence {} must be speakers[{} mod 3]",
                k,
                k
            );
            submit_pending(&mut session);
        }
    }

    #[test]
    fn turn_ids_are_unique_within_session() {
        let mut session = started(&["a", "b"], None);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..6 {
            assert!(seen.insert(submit_pending(&mut session)));
        }
    }

    #[test]
    fn round_limit_transitions_exactly_after_final_turn() {
        let mut session = started(&["a", "b", "c"], Some(2));

        for k in 0..6 {
            assert_eq!(
                session.status,
                SessionStatus::AwaitingTurn,
                "turn {} must still be pending",
                k
            );
            submit_pending(&mut session);
        }

        // Exactly after the 6th turn: no seventh pending turn, ever.
        assert_eq!(session.status, SessionStatus::Synthesizing);
        assert!(session.current_turn.is_none());
        assert_eq!(session.turn_log.len(), 6);
    }

    #[test]
    fn duplicate_submission_is_rejected() {
        let mut session = started(&["a", "b"], None);
        let first_id = submit_pending(&mut session);

        let err = submit_turn(
            &mut session,
            &first_id,
            TurnContent::opinion("again"),
            TransportKind::Direct,
        )
        .unwrap_err();

        assert!(err.is_out_of_order());
        assert_eq!(session.turn_log.len(), 1, "no silent duplicate entry");
    }

    #[test]
    fn submission_to_closed_session_is_rejected() {
        let mut session = started(&["a"], None);
        let turn_id = session.current_turn.as_ref().unwrap().turn_id.clone();
        begin_synthesis(&mut session).unwrap();
        close(&mut session);

        let err = submit_turn(
            &mut session,
            &turn_id,
            TurnContent::opinion("too late"),
            TransportKind::Direct,
        )
        .unwrap_err();

        assert!(err.is_invalid_state());
    }

    #[test]
    fn begin_synthesis_flags_pending_turn_as_abandoned_gap() {
        let mut session = started(&["a", "b"], None);
        submit_pending(&mut session);
        let pending_id = session.current_turn.as_ref().unwrap().turn_id.clone();

        begin_synthesis(&mut session).unwrap();

        assert_eq!(session.status, SessionStatus::Synthesizing);
        assert!(session.current_turn.is_none());
        let gap = session.turn_log.last().unwrap();
        assert_eq!(gap.turn_id, pending_id);
        assert!(gap.abandoned);
        assert_eq!(gap.content, TurnContent::default());
        // The flagged gap does not count as a submitted turn.
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn begin_synthesis_on_closed_session_is_rejected() {
        let mut session = started(&["a"], None);
        begin_synthesis(&mut session).unwrap();
        close(&mut session);

        assert!(begin_synthesis(&mut session).unwrap_err().is_invalid_state());
    }
}
