//! Configuration loading.

use quorum_core::config::ConfigRoot;
use quorum_core::error::Result;
use std::path::Path;
use tokio::fs;

/// Loads the configuration from the default location
/// (`~/.config/quorum/config.toml`). A missing file yields defaults.
pub async fn load_config() -> Result<ConfigRoot> {
    match crate::paths::QuorumPaths::config_file() {
        Ok(path) => load_config_from(&path).await,
        Err(err) => {
            tracing::warn!(error = %err, "config path unavailable, using defaults");
            Ok(ConfigRoot::default())
        }
    }
}

/// Loads the configuration from an explicit path. A missing file yields
/// defaults; a malformed one is an error.
pub async fn load_config_from(path: &Path) -> Result<ConfigRoot> {
    match fs::read_to_string(path).await {
        Ok(raw) => ConfigRoot::from_toml_str(&raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRoot::default()),
        Err(err) => Err(err.into()),
    }
}
