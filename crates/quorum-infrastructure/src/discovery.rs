//! Speaker discovery providers.
//!
//! Three concrete sources feed the registry: CLI agent binaries found on
//! PATH (reachable synchronously, so `direct`), the configured static
//! roster (browser-hosted models have no programmatic discovery, so they
//! are declared in `config.toml` as `clipboard` speakers), and the human
//! operator, who is always reachable by hand.
//!
//! All providers are best-effort: whatever cannot be found is omitted,
//! never reported as an error.

use async_trait::async_trait;
use quorum_core::config::ConfigRoot;
use quorum_core::registry::SpeakerDiscovery;
use quorum_core::session::SpeakerCandidate;
use quorum_core::transport::TransportKind;
use std::path::PathBuf;

/// A CLI agent identity and the binary that serves it.
#[derive(Debug, Clone)]
pub struct CliAgent {
    pub name: &'static str,
    pub binary: &'static str,
}

/// Known CLI agents probed by default.
const DEFAULT_CLI_AGENTS: &[CliAgent] = &[
    CliAgent {
        name: "claude",
        binary: "claude",
    },
    CliAgent {
        name: "gemini",
        binary: "gemini",
    },
    CliAgent {
        name: "codex",
        binary: "codex",
    },
];

/// Discovers CLI agents by probing for their binaries on PATH.
pub struct CliSpeakerDiscovery {
    agents: Vec<CliAgent>,
    search_dirs: Vec<PathBuf>,
}

impl CliSpeakerDiscovery {
    /// Probes the default agent set against the process PATH.
    pub fn new() -> Self {
        let search_dirs = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self {
            agents: DEFAULT_CLI_AGENTS.to_vec(),
            search_dirs,
        }
    }

    /// Probes a custom agent set against explicit directories.
    pub fn with_search_dirs(agents: Vec<CliAgent>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            agents,
            search_dirs,
        }
    }

    fn binary_available(&self, binary: &str) -> bool {
        self.search_dirs
            .iter()
            .any(|dir| dir.join(binary).is_file())
    }
}

impl Default for CliSpeakerDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeakerDiscovery for CliSpeakerDiscovery {
    async fn list_candidates(&self) -> Vec<SpeakerCandidate> {
        self.agents
            .iter()
            .filter(|agent| self.binary_available(agent.binary))
            .map(|agent| SpeakerCandidate::new(agent.name, TransportKind::Direct, true))
            .collect()
    }
}

/// Candidates declared in the configuration file.
pub struct ConfiguredSpeakerDiscovery {
    config: ConfigRoot,
}

impl ConfiguredSpeakerDiscovery {
    pub fn new(config: ConfigRoot) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SpeakerDiscovery for ConfiguredSpeakerDiscovery {
    async fn list_candidates(&self) -> Vec<SpeakerCandidate> {
        self.config
            .speakers
            .iter()
            .map(|s| SpeakerCandidate::new(s.name.clone(), s.transport, s.available))
            .collect()
    }
}

/// The human operator, always reachable by hand.
pub struct OperatorDiscovery;

#[async_trait]
impl SpeakerDiscovery for OperatorDiscovery {
    async fn list_candidates(&self) -> Vec<SpeakerCandidate> {
        vec![SpeakerCandidate::new(
            "operator",
            TransportKind::Manual,
            true,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_binaries_are_omitted_not_errors() {
        let empty_dir = TempDir::new().unwrap();
        let discovery = CliSpeakerDiscovery::with_search_dirs(
            DEFAULT_CLI_AGENTS.to_vec(),
            vec![empty_dir.path().to_path_buf()],
        );

        assert!(discovery.list_candidates().await.is_empty());
    }

    #[tokio::test]
    async fn present_binaries_become_direct_candidates() {
        let bin_dir = TempDir::new().unwrap();
        std::fs::write(bin_dir.path().join("claude"), "").unwrap();
        let discovery = CliSpeakerDiscovery::with_search_dirs(
            DEFAULT_CLI_AGENTS.to_vec(),
            vec![bin_dir.path().to_path_buf()],
        );

        let candidates = discovery.list_candidates().await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "claude");
        assert_eq!(candidates[0].transport, TransportKind::Direct);
        assert!(candidates[0].available);
    }

    #[tokio::test]
    async fn configured_roster_maps_to_candidates() {
        let config = ConfigRoot::from_toml_str(
            r#"
            [[speaker]]
            name = "chatgpt-tab"
            transport = "clipboard"

            [[speaker]]
            name = "offline-tab"
            transport = "clipboard"
            available = false
            "#,
        )
        .unwrap();

        let candidates = ConfiguredSpeakerDiscovery::new(config).list_candidates().await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].transport, TransportKind::Clipboard);
        assert!(!candidates[1].available);
    }

    #[tokio::test]
    async fn operator_is_always_reachable() {
        let candidates = OperatorDiscovery.list_candidates().await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].transport, TransportKind::Manual);
    }
}
