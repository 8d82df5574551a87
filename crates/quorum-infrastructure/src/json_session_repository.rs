//! Filesystem-backed session repository.
//!
//! One pretty-printed JSON file per session under `sessions/`, named
//! `<session_id>.json`. The record is self-describing and fully
//! reconstructable from disk alone after a restart; writes go through a
//! temp file and an atomic rename, so a crash mid-save leaves either the
//! previous record or the new one, never a torn file.

use async_trait::async_trait;
use quorum_core::error::{QuorumError, Result};
use quorum_core::session::{Session, SessionRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct JsonSessionRepository {
    sessions_dir: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository rooted at the given sessions directory,
    /// creating it if needed.
    pub async fn new(sessions_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = sessions_dir.as_ref().to_path_buf();
        fs::create_dir_all(&sessions_dir).await?;
        Ok(Self { sessions_dir })
    }

    /// Creates a repository at the default location
    /// (`~/.config/quorum/sessions`).
    pub async fn default_location() -> Result<Self> {
        let dir = crate::paths::QuorumPaths::sessions_dir()
            .map_err(|e| QuorumError::io(e.to_string()))?;
        Self::new(dir).await
    }

    fn session_file_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", session_id))
    }

    async fn load_from_path(&self, path: &Path) -> Result<Session> {
        let json = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let path = self.session_file_path(session_id);
        match fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let path = self.session_file_path(&session.id);
        let json = serde_json::to_string_pretty(session)?;

        // Write-then-rename keeps the previous record intact if this
        // process dies mid-write.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.session_file_path(session_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_all(&self) -> Result<()> {
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match self.load_from_path(&path).await {
                Ok(session) => sessions.push(session),
                Err(err) => {
                    // A single unreadable record must not hide the rest.
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable session record");
                }
            }
        }

        // Sort by updated_at descending (most recent first)
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}
