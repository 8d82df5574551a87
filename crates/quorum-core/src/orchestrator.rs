//! The deliberation orchestrator: session store, locking, and the
//! command surface callers drive.
//!
//! Sessions are independent units of work: operations on different session
//! ids never block each other. Within one session, submissions, finalizing
//! synthesis, and reset are serialized through a per-id critical section so
//! two concurrent submissions can never both satisfy the same pending turn.
//! Reads and snapshot synthesis take no per-id lock.
//!
//! The orchestrator is an explicit store object with injected persistence,
//! not a module-level singleton: independent instances (e.g., in tests)
//! coexist without interference.

use crate::error::{QuorumError, Result};
use crate::scheduler;
use crate::session::{
    Session, SessionRepository, SessionSummary, Speaker, Turn, TurnContent,
};
use crate::synthesis::{self, ArchiveSink, SynthesisReport};
use crate::transport::{self, StagingSurface, TransportDescriptor, TransportKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct Orchestrator {
    repository: Arc<dyn SessionRepository>,
    archive: Arc<dyn ArchiveSink>,
    staging: Arc<dyn StagingSurface>,
    /// Per-session write locks. The outer mutex is a shallow guard for
    /// insertion/removal only; the inner async mutex is the per-id
    /// critical section.
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl Orchestrator {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        archive: Arc<dyn ArchiveSink>,
        staging: Arc<dyn StagingSurface>,
    ) -> Self {
        Self {
            repository,
            archive,
            staging,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn session_lock(&self, session_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn drop_session_lock(&self, session_id: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.remove(session_id);
    }

    async fn load(&self, session_id: &str) -> Result<Session> {
        self.repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| QuorumError::not_found("session", session_id))
    }

    /// Creates a deliberation session and issues the first turn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty or duplicate roster or a zero
    /// round limit; nothing is persisted in that case.
    pub async fn start(
        &self,
        topic: &str,
        speakers: Vec<Speaker>,
        round_limit: Option<u32>,
    ) -> Result<Session> {
        let mut session = Session::new(topic, speakers, round_limit)?;
        scheduler::issue_next_turn(&mut session)?;
        self.repository.save(&session).await?;
        tracing::info!(
            session_id = %session.id,
            speakers = session.speakers.len(),
            round_limit = ?session.round_limit,
            "deliberation session created"
        );
        Ok(session)
    }

    /// Fetches the full session state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub async fn get(&self, session_id: &str) -> Result<Session> {
        self.load(session_id).await
    }

    /// Lists session summaries, newest first. Closed sessions are omitted
    /// unless `include_closed` is set.
    pub async fn list(&self, include_closed: bool) -> Result<Vec<SessionSummary>> {
        let mut sessions = self.repository.list_all().await?;
        sessions.retain(|s| include_closed || !s.is_closed());
        // Sort by created_at descending (most recent first)
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions.iter().map(Session::summary).collect())
    }

    /// Maps the speaker currently due to a transport descriptor.
    ///
    /// Idempotent: re-routing the same pending turn returns the same
    /// descriptor until the turn is resolved.
    pub async fn route_next_turn(&self, session_id: &str) -> Result<TransportDescriptor> {
        let session = self.load(session_id).await?;
        transport::route(&session)
    }

    /// Renders the prompt for the pending turn and writes it to the
    /// staging surface (the clipboard/manual relay path).
    ///
    /// Returns immediately; polling for the eventual submission is the
    /// caller's responsibility.
    pub async fn prepare_turn(&self, session_id: &str, turn_id: &str) -> Result<String> {
        let session = self.load(session_id).await?;
        let descriptor = transport::route(&session)?;
        if descriptor.turn_id != turn_id {
            return Err(QuorumError::out_of_order(descriptor.turn_id, turn_id));
        }
        self.staging
            .stage(session_id, turn_id, &descriptor.prompt)
            .await?;
        Ok(descriptor.prompt)
    }

    /// Submits the pending turn's response and advances the rotation.
    ///
    /// Serialized per session id; the updated session is durably persisted
    /// before this returns.
    pub async fn submit_turn(
        &self,
        session_id: &str,
        turn_id: &str,
        content: TurnContent,
        transport: TransportKind,
    ) -> Result<Session> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        scheduler::submit_turn(&mut session, turn_id, content, transport)?;
        self.repository.save(&session).await?;
        tracing::info!(
            session_id = %session_id,
            turn_id = %turn_id,
            transport = %transport,
            turns = session.turn_log.len(),
            "turn submitted"
        );
        Ok(session)
    }

    /// Returns the ordered turn log.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Turn>> {
        Ok(self.load(session_id).await?.turn_log)
    }

    /// Computes the consensus report.
    ///
    /// In snapshot mode (`finalize == false`) this is a pure read: the
    /// session is left untouched and the call may run concurrently with
    /// writes to other sessions. With `finalize` the session transitions
    /// through `Synthesizing` to `Closed`, any pending turn is abandoned,
    /// and the report is handed to the archive sink (whose failure is
    /// logged, never rolled back into the session).
    pub async fn synthesize(&self, session_id: &str, finalize: bool) -> Result<SynthesisReport> {
        if !finalize {
            let session = self.load(session_id).await?;
            return synthesis::synthesize(&session);
        }

        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        if session.is_closed() {
            return Err(QuorumError::invalid_state(format!(
                "session '{}' is already closed",
                session_id
            )));
        }

        scheduler::begin_synthesis(&mut session)?;
        // EmptyLog surfaces here before anything is persisted, leaving the
        // stored session unchanged.
        let report = synthesis::synthesize(&session)?;
        scheduler::close(&mut session);
        self.repository.save(&session).await?;
        tracing::info!(session_id = %session_id, turns = report.turn_count, "session closed");

        if let Err(err) = self.archive.archive(&session, &report).await {
            tracing::warn!(session_id = %session_id, error = %err, "archival failed");
        }

        Ok(report)
    }

    /// Discards one session, or every session when `session_id` is `None`.
    /// Destructive and non-recoverable.
    pub async fn reset(&self, session_id: Option<&str>) -> Result<()> {
        match session_id {
            Some(id) => {
                let lock = self.session_lock(id);
                let _guard = lock.lock().await;

                // Aborts any pending turn with the session; a racing
                // submission either completed before this lock or fails
                // NotFound afterwards.
                self.load(id).await?;
                self.repository.delete(id).await?;
                drop(_guard);
                self.drop_session_lock(id);
                tracing::info!(session_id = %id, "session reset");
            }
            None => {
                self.repository.delete_all().await?;
                let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
                locks.clear();
                tracing::info!("all sessions reset");
            }
        }
        Ok(())
    }
}
