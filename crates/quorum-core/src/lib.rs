pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod synthesis;
pub mod transport;

// Re-export the common entry points
pub use error::{QuorumError, Result};
pub use orchestrator::Orchestrator;
pub use registry::{SpeakerDiscovery, SpeakerRegistry};
pub use session::{Session, SessionStatus, Speaker, SpeakerCandidate};
pub use synthesis::{ArchiveSink, SynthesisReport};
pub use transport::{StagingSurface, TransportDescriptor, TransportKind};
