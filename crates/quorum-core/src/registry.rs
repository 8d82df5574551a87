//! Speaker registry: which participant identities are currently reachable.
//!
//! Discovery of concrete participants (CLI binaries on PATH, browser tabs,
//! a human operator) is platform territory, so it sits behind the
//! [`SpeakerDiscovery`] capability trait and is injected. The registry is a
//! read-only view; it holds no session-mutating authority.

use crate::session::SpeakerCandidate;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// A source of candidate speakers.
///
/// Best-effort by contract: implementations never fail, they omit whatever
/// they cannot reach.
#[async_trait]
pub trait SpeakerDiscovery: Send + Sync {
    async fn list_candidates(&self) -> Vec<SpeakerCandidate>;
}

/// Union view over any number of discovery providers.
#[derive(Default)]
pub struct SpeakerRegistry {
    providers: Vec<Arc<dyn SpeakerDiscovery>>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn SpeakerDiscovery>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Enumerates reachable candidates across all providers.
    ///
    /// Candidates are de-duplicated by name, first provider wins. Never
    /// fails: an unreachable source contributes nothing.
    pub async fn candidates(&self) -> Vec<SpeakerCandidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for provider in &self.providers {
            for candidate in provider.list_candidates().await {
                if seen.insert(candidate.name.clone()) {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportKind;

    struct FixedDiscovery {
        candidates: Vec<SpeakerCandidate>,
    }

    #[async_trait]
    impl SpeakerDiscovery for FixedDiscovery {
        async fn list_candidates(&self) -> Vec<SpeakerCandidate> {
            self.candidates.clone()
        }
    }

    #[tokio::test]
    async fn empty_registry_yields_no_candidates() {
        assert!(SpeakerRegistry::new().candidates().await.is_empty());
    }

    #[tokio::test]
    async fn candidates_are_unioned_first_provider_wins() {
        let registry = SpeakerRegistry::new()
            .with_provider(Arc::new(FixedDiscovery {
                candidates: vec![
                    SpeakerCandidate::new("claude", TransportKind::Direct, true),
                    SpeakerCandidate::new("operator", TransportKind::Manual, true),
                ],
            }))
            .with_provider(Arc::new(FixedDiscovery {
                candidates: vec![
                    // Same name, different transport: the first wins.
                    SpeakerCandidate::new("claude", TransportKind::Clipboard, false),
                    SpeakerCandidate::new("gemini-web", TransportKind::Clipboard, true),
                ],
            }));

        let candidates = registry.candidates().await;

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].name, "claude");
        assert_eq!(candidates[0].transport, TransportKind::Direct);
        assert_eq!(candidates[2].name, "gemini-web");
    }
}
