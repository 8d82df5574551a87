//! Unified path management for quorum's on-disk state.
//!
//! All session records, archives, staged prompts, and configuration live
//! under the per-user config directory so a restarted process finds the
//! same state.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find user config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for quorum.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/quorum/
/// ├── config.toml          # Static speaker roster and defaults
/// ├── sessions/            # One JSON record per session
/// ├── archive/             # One JSON record per completed synthesis
/// └── staging/
///     └── next_prompt.txt  # Latest staged clipboard/manual prompt
/// ```
pub struct QuorumPaths;

impl QuorumPaths {
    /// Returns the quorum configuration directory (e.g., `~/.config/quorum`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("quorum"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding one record per session.
    pub fn sessions_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("sessions"))
    }

    /// Returns the directory holding archived deliberations.
    pub fn archive_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("archive"))
    }

    /// Returns the directory for staged prompts.
    pub fn staging_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("staging"))
    }
}
