//! Archival sink for completed deliberations.
//!
//! Each finished synthesis lands as one JSON record under `archive/`,
//! holding the final report plus the full session (turn log included) so
//! the archive is self-contained even after the session itself is reset.

use async_trait::async_trait;
use quorum_core::error::Result;
use quorum_core::session::Session;
use quorum_core::synthesis::{ArchiveSink, SynthesisReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One archived deliberation: the report and the session that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedDeliberation {
    pub report: SynthesisReport,
    pub session: Session,
}

pub struct DirArchiveSink {
    archive_dir: PathBuf,
}

impl DirArchiveSink {
    /// Creates an archive rooted at the given directory, creating it if
    /// needed.
    pub async fn new(archive_dir: impl AsRef<Path>) -> Result<Self> {
        let archive_dir = archive_dir.as_ref().to_path_buf();
        fs::create_dir_all(&archive_dir).await?;
        Ok(Self { archive_dir })
    }

    /// Creates an archive at the default location
    /// (`~/.config/quorum/archive`).
    pub async fn default_location() -> Result<Self> {
        let dir = crate::paths::QuorumPaths::archive_dir()
            .map_err(|e| quorum_core::QuorumError::io(e.to_string()))?;
        Self::new(dir).await
    }

    fn record_path(&self, session_id: &str) -> PathBuf {
        self.archive_dir.join(format!("{}.json", session_id))
    }

    /// Loads every archived deliberation, most recently closed first.
    pub async fn list_records(&self) -> Result<Vec<ArchivedDeliberation>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.archive_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path).await?;
            match serde_json::from_str(&json) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable archive record");
                }
            }
        }
        records.sort_by(|a: &ArchivedDeliberation, b: &ArchivedDeliberation| {
            b.session.updated_at.cmp(&a.session.updated_at)
        });
        Ok(records)
    }
}

#[async_trait]
impl ArchiveSink for DirArchiveSink {
    async fn archive(&self, session: &Session, report: &SynthesisReport) -> Result<()> {
        let record = ArchivedDeliberation {
            report: report.clone(),
            session: session.clone(),
        };
        let path = self.record_path(&session.id);
        let json = serde_json::to_string_pretty(&record)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!(session_id = %session.id, "deliberation archived");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_core::scheduler;
    use quorum_core::session::{Speaker, TurnContent};
    use quorum_core::synthesis;
    use quorum_core::transport::TransportKind;
    use tempfile::TempDir;

    fn finished_session(topic: &str) -> (Session, SynthesisReport) {
        let mut session = Session::new(
            topic,
            vec![Speaker::new("a", TransportKind::Direct)],
            Some(1),
        )
        .unwrap();
        scheduler::issue_next_turn(&mut session).unwrap();
        let turn_id = session.current_turn.as_ref().unwrap().turn_id.clone();
        scheduler::submit_turn(
            &mut session,
            &turn_id,
            TurnContent::opinion("done"),
            TransportKind::Direct,
        )
        .unwrap();
        let report = synthesis::synthesize(&session).unwrap();
        scheduler::close(&mut session);
        (session, report)
    }

    #[tokio::test]
    async fn archive_and_list_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirArchiveSink::new(temp_dir.path()).await.unwrap();

        let (session, report) = finished_session("first");
        sink.archive(&session, &report).await.unwrap();
        let (session2, report2) = finished_session("second");
        sink.archive(&session2, &report2).await.unwrap();

        let records = sink.list_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.report == report));
        // Full turn log travels with the record.
        assert!(records.iter().all(|r| !r.session.turn_log.is_empty()));
    }

    #[tokio::test]
    async fn empty_archive_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirArchiveSink::new(temp_dir.path()).await.unwrap();
        assert!(sink.list_records().await.unwrap().is_empty());
    }
}
