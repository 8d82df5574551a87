pub mod admin;
pub mod session;
pub mod synthesis;
pub mod turn;

use anyhow::Result;
use quorum_core::config::ConfigRoot;
use quorum_core::{Orchestrator, SpeakerRegistry};
use quorum_infrastructure::{
    CliSpeakerDiscovery, ConfiguredSpeakerDiscovery, DirArchiveSink, FileStagingSurface,
    JsonSessionRepository, OperatorDiscovery,
};
use std::sync::Arc;

/// Shared handles every subcommand runs against.
pub struct Context {
    pub orchestrator: Orchestrator,
    pub registry: SpeakerRegistry,
    pub archive: DirArchiveSink,
    pub config: ConfigRoot,
}

impl Context {
    /// Wires the orchestrator against the default on-disk layout
    /// (`~/.config/quorum`).
    pub async fn default_location() -> Result<Self> {
        let config = quorum_infrastructure::load_config().await?;

        let orchestrator = Orchestrator::new(
            Arc::new(JsonSessionRepository::default_location().await?),
            Arc::new(DirArchiveSink::default_location().await?),
            Arc::new(FileStagingSurface::default_location().await?),
        );

        let registry = SpeakerRegistry::new()
            .with_provider(Arc::new(CliSpeakerDiscovery::new()))
            .with_provider(Arc::new(ConfiguredSpeakerDiscovery::new(config.clone())))
            .with_provider(Arc::new(OperatorDiscovery));

        Ok(Self {
            orchestrator,
            registry,
            archive: DirArchiveSink::default_location().await?,
            config,
        })
    }
}

/// All command output is pretty JSON on stdout; logs go to stderr.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
