//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the engine's core logic from the specific storage mechanism
/// (e.g., JSON files, database, remote API).
///
/// # Implementation Notes
///
/// Implementations must make `save` all-or-nothing: a crash mid-write must
/// leave either the previous record or the new one, never a partial file.
/// The stored record must be fully reconstructable from disk alone.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Durably saves a session to storage.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage (no error if it didn't exist).
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Deletes every stored session. Destructive and non-recoverable.
    async fn delete_all(&self) -> Result<()>;

    /// Lists all stored sessions.
    async fn list_all(&self) -> Result<Vec<Session>>;
}
