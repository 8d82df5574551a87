//! Staging surface for clipboard/manual prompts.
//!
//! The engine treats the staging surface as an opaque, write-only string
//! sink. This implementation writes the latest staged prompt to a single
//! well-known file; a host (or the user) copies it from there into the
//! browser tab or terminal.

use async_trait::async_trait;
use quorum_core::error::Result;
use quorum_core::transport::StagingSurface;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const STAGED_PROMPT_FILE: &str = "next_prompt.txt";

pub struct FileStagingSurface {
    staging_dir: PathBuf,
}

impl FileStagingSurface {
    pub async fn new(staging_dir: impl AsRef<Path>) -> Result<Self> {
        let staging_dir = staging_dir.as_ref().to_path_buf();
        fs::create_dir_all(&staging_dir).await?;
        Ok(Self { staging_dir })
    }

    /// Creates a staging surface at the default location
    /// (`~/.config/quorum/staging`).
    pub async fn default_location() -> Result<Self> {
        let dir = crate::paths::QuorumPaths::staging_dir()
            .map_err(|e| quorum_core::QuorumError::io(e.to_string()))?;
        Self::new(dir).await
    }

    /// Path of the staged prompt file.
    pub fn staged_prompt_path(&self) -> PathBuf {
        self.staging_dir.join(STAGED_PROMPT_FILE)
    }
}

#[async_trait]
impl StagingSurface for FileStagingSurface {
    async fn stage(&self, session_id: &str, turn_id: &str, prompt: &str) -> Result<()> {
        fs::write(self.staged_prompt_path(), prompt).await?;
        tracing::debug!(session_id = %session_id, turn_id = %turn_id, "prompt staged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn staged_prompt_is_written_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let surface = FileStagingSurface::new(temp_dir.path()).await.unwrap();

        surface.stage("s-1", "t-1", "paste me").await.unwrap();

        let staged = std::fs::read_to_string(surface.staged_prompt_path()).unwrap();
        assert_eq!(staged, "paste me");
    }

    #[tokio::test]
    async fn later_stage_replaces_earlier_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let surface = FileStagingSurface::new(temp_dir.path()).await.unwrap();

        surface.stage("s-1", "t-1", "old").await.unwrap();
        surface.stage("s-1", "t-2", "new").await.unwrap();

        let staged = std::fs::read_to_string(surface.staged_prompt_path()).unwrap();
        assert_eq!(staged, "new");
    }
}
