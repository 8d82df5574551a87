pub mod archive;
pub mod config_service;
pub mod discovery;
pub mod json_session_repository;
pub mod paths;
pub mod staging;

pub use archive::{ArchivedDeliberation, DirArchiveSink};
pub use config_service::load_config;
pub use discovery::{CliSpeakerDiscovery, ConfiguredSpeakerDiscovery, OperatorDiscovery};
pub use json_session_repository::JsonSessionRepository;
pub use paths::QuorumPaths;
pub use staging::FileStagingSurface;
