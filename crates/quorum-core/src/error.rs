//! Error types for the Quorum deliberation engine.

use thiserror::Error;

/// A shared error type for the entire Quorum engine.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. All variants are local and
/// recoverable by the caller; none indicate a corrupted store.
#[derive(Error, Debug, Clone)]
pub enum QuorumError {
    /// Bad session creation parameters (empty roster, duplicate speakers,
    /// zero round limit). Nothing is persisted when this is returned.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Operation illegal for the session's current status
    #[error("Operation not allowed: {0}")]
    InvalidState(String),

    /// Submission referenced a turn id that is not the pending one
    #[error("Turn submission out of order: expected '{expected}', got '{got}'")]
    OutOfOrder { expected: String, got: String },

    /// Synthesis requested on a session with no submitted turns
    #[error("Synthesis requires at least one submitted turn")]
    EmptyLog,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuorumError {
    /// Creates an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an OutOfOrder error
    pub fn out_of_order(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::OutOfOrder {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidConfig error
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Check if this is an OutOfOrder error
    pub fn is_out_of_order(&self) -> bool {
        matches!(self, Self::OutOfOrder { .. })
    }

    /// Check if this error rejects a submission that lost a race for the
    /// pending turn (either variant can surface depending on interleaving).
    pub fn is_rejected_submission(&self) -> bool {
        matches!(self, Self::OutOfOrder { .. } | Self::InvalidState(_))
    }
}

impl From<std::io::Error> for QuorumError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for QuorumError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for QuorumError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, QuorumError>`.
pub type Result<T> = std::result::Result<T, QuorumError>;
