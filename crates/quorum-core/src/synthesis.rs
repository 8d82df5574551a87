//! Synthesis engine: derives a consensus report from a session's turn log.
//!
//! The report is derived, never authoritative: it is a pure function of the
//! turn log and can be regenerated at any time. Synthesis never mutates the
//! log; closing the session on a final synthesis is the orchestrator's
//! transition, not this module's.

use crate::error::{QuorumError, Result};
use crate::session::{Session, Stance, Turn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured consensus artifact computed from a turn log.
///
/// Carries no wall-clock field: an unchanged log synthesizes to a
/// byte-identical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub session_id: String,
    pub topic: String,
    /// Submitted turns only; abandoned gaps are excluded.
    pub turn_count: usize,
    pub rounds_completed: u32,
    /// True when a pending turn was abandoned or the roster pass is partial.
    pub incomplete_round: bool,
    /// Points marked agreeable by at least two distinct speakers,
    /// in order of first appearance in the log.
    pub consensus: Vec<String>,
    /// Points whose final stance from at least one speaker is unresolved.
    pub unresolved: Vec<String>,
    /// Per-speaker summaries in roster order.
    pub speakers: Vec<SpeakerSummary>,
}

/// What one speaker contributed across the deliberation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSummary {
    pub name: String,
    pub turns_taken: usize,
    pub agreements: usize,
    pub disagreements: usize,
    /// Opinion from the speaker's most recent submitted turn.
    pub closing_opinion: Option<String>,
}

/// Archival sink invoked once per completed synthesis.
///
/// Receives the final report plus the full session (turn log included).
/// A failing sink must not roll back the session's `Closed` transition.
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    async fn archive(&self, session: &Session, report: &SynthesisReport) -> Result<()>;
}

/// Computes a consensus report from the session's turn log.
///
/// Points are matched case-insensitively on trimmed text. For each point,
/// a speaker's last-submitted stance wins; a point is consensus when at
/// least two distinct speakers' final stance is agree, and unresolved when
/// any speaker's final stance is unresolved.
///
/// # Errors
///
/// Returns `EmptyLog` if no turn has been submitted.
pub fn synthesize(session: &Session) -> Result<SynthesisReport> {
    let submitted: Vec<&Turn> = session.submitted_turns().collect();
    if submitted.is_empty() {
        return Err(QuorumError::EmptyLog);
    }

    // First-seen display text per normalized point, in log order.
    let mut point_order: Vec<String> = Vec::new();
    let mut display: HashMap<String, String> = HashMap::new();
    // Final (last-submitted) stance per point per speaker.
    let mut final_stances: HashMap<String, HashMap<&str, Stance>> = HashMap::new();

    for turn in &submitted {
        for marker in &turn.content.points {
            let text = marker.point.trim();
            let key = text.to_lowercase();
            if !display.contains_key(&key) {
                display.insert(key.clone(), text.to_string());
                point_order.push(key.clone());
            }
            final_stances
                .entry(key)
                .or_default()
                .insert(turn.speaker.as_str(), marker.stance);
        }
    }

    let mut consensus = Vec::new();
    let mut unresolved = Vec::new();
    for key in &point_order {
        let stances = &final_stances[key];
        let agreeing = stances.values().filter(|s| **s == Stance::Agree).count();
        if agreeing >= 2 {
            consensus.push(display[key].clone());
        }
        if stances.values().any(|s| *s == Stance::Unresolved) {
            unresolved.push(display[key].clone());
        }
    }

    let speakers = session
        .speakers
        .iter()
        .map(|speaker| {
            let turns: Vec<&&Turn> = submitted
                .iter()
                .filter(|t| t.speaker == speaker.name)
                .collect();
            let markers = turns.iter().flat_map(|t| &t.content.points);
            SpeakerSummary {
                name: speaker.name.clone(),
                turns_taken: turns.len(),
                agreements: markers
                    .clone()
                    .filter(|m| m.stance == Stance::Agree)
                    .count(),
                disagreements: markers.filter(|m| m.stance == Stance::Disagree).count(),
                closing_opinion: turns.last().map(|t| t.content.opinion.clone()),
            }
        })
        .collect();

    let abandoned = session.turn_log.iter().any(|t| t.abandoned);
    Ok(SynthesisReport {
        session_id: session.id.clone(),
        topic: session.topic.clone(),
        turn_count: submitted.len(),
        rounds_completed: session.rounds_completed(),
        incomplete_round: abandoned || submitted.len() % session.speakers.len() != 0,
        consensus,
        unresolved,
        speakers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler;
    use crate::session::{PointMarker, Speaker, TurnContent};
    use crate::transport::TransportKind;

    fn marker(point: &str, stance: Stance) -> PointMarker {
        PointMarker {
            point: point.to_string(),
            stance,
        }
    }

    fn session_with_roster(names: &[&str]) -> Session {
        let speakers = names
            .iter()
            .map(|n| Speaker::new(*n, TransportKind::Direct))
            .collect();
        let mut session = Session::new("topic", speakers, None).unwrap();
        scheduler::issue_next_turn(&mut session).unwrap();
        session
    }

    fn submit(session: &mut Session, content: TurnContent) {
        let turn_id = session.current_turn.as_ref().unwrap().turn_id.clone();
        scheduler::submit_turn(session, &turn_id, content, TransportKind::Direct).unwrap();
    }

    #[test]
    fn empty_log_is_rejected() {
        let session = session_with_roster(&["a", "b"]);
        assert!(matches!(
            synthesize(&session).unwrap_err(),
            QuorumError::EmptyLog
        ));
    }

    #[test]
    fn consensus_needs_two_distinct_speakers() {
        let mut session = session_with_roster(&["a", "b", "c"]);
        submit(
            &mut session,
            TurnContent {
                opinion: "use feature flags".to_string(),
                points: vec![
                    marker("ship behind a flag", Stance::Agree),
                    marker("rewrite the parser", Stance::Agree),
                ],
                ..Default::default()
            },
        );
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("Ship behind a flag", Stance::Agree)],
                ..Default::default()
            },
        );
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("rewrite the parser", Stance::Disagree)],
                ..Default::default()
            },
        );

        let report = synthesize(&session).unwrap();

        // Matching is case-insensitive; only the twice-agreed point lands.
        assert_eq!(report.consensus, vec!["ship behind a flag".to_string()]);
    }

    #[test]
    fn repeated_agreement_by_one_speaker_is_not_consensus() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("my pet idea", Stance::Agree)],
                ..Default::default()
            },
        );
        submit(&mut session, TurnContent::opinion("no comment"));
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("my pet idea", Stance::Agree)],
                ..Default::default()
            },
        );

        let report = synthesize(&session).unwrap();
        assert!(report.consensus.is_empty());
    }

    #[test]
    fn unresolved_point_clears_when_speaker_later_resolves_it() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("error budget", Stance::Unresolved)],
                ..Default::default()
            },
        );
        submit(&mut session, TurnContent::opinion("thinking"));
        // Speaker "a" takes a second turn and resolves their own point.
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("error budget", Stance::Resolved)],
                ..Default::default()
            },
        );

        let report = synthesize(&session).unwrap();
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn unresolved_point_stays_while_any_final_stance_is_unresolved() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("error budget", Stance::Resolved)],
                ..Default::default()
            },
        );
        submit(
            &mut session,
            TurnContent {
                points: vec![marker("error budget", Stance::Unresolved)],
                ..Default::default()
            },
        );

        let report = synthesize(&session).unwrap();
        assert_eq!(report.unresolved, vec!["error budget".to_string()]);
    }

    #[test]
    fn report_is_deterministic_for_unchanged_log() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(
            &mut session,
            TurnContent {
                opinion: "first".to_string(),
                points: vec![
                    marker("p1", Stance::Agree),
                    marker("p2", Stance::Unresolved),
                ],
                ..Default::default()
            },
        );
        submit(
            &mut session,
            TurnContent {
                opinion: "second".to_string(),
                points: vec![marker("p1", Stance::Agree)],
                ..Default::default()
            },
        );

        let first = serde_json::to_string(&synthesize(&session).unwrap()).unwrap();
        let second = serde_json::to_string(&synthesize(&session).unwrap()).unwrap();

        assert_eq!(first, second, "unchanged log must give byte-identical reports");
    }

    #[test]
    fn abandoned_gap_marks_round_incomplete_and_is_not_counted() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(&mut session, TurnContent::opinion("only me"));
        scheduler::begin_synthesis(&mut session).unwrap();

        let report = synthesize(&session).unwrap();

        assert_eq!(report.turn_count, 1);
        assert!(report.incomplete_round);
        assert_eq!(report.speakers[1].turns_taken, 0);
    }

    #[test]
    fn speaker_summaries_follow_roster_order() {
        let mut session = session_with_roster(&["a", "b"]);
        submit(
            &mut session,
            TurnContent {
                opinion: "opening".to_string(),
                points: vec![marker("p", Stance::Disagree)],
                ..Default::default()
            },
        );
        submit(&mut session, TurnContent::opinion("reply"));
        submit(&mut session, TurnContent::opinion("closing"));

        let report = synthesize(&session).unwrap();

        assert_eq!(report.speakers[0].name, "a");
        assert_eq!(report.speakers[0].turns_taken, 2);
        assert_eq!(report.speakers[0].disagreements, 1);
        assert_eq!(
            report.speakers[0].closing_opinion.as_deref(),
            Some("closing")
        );
        assert_eq!(report.speakers[1].name, "b");
        assert_eq!(report.speakers[1].turns_taken, 1);
    }
}
