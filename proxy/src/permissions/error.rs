//! Permission error types.

use thiserror::Error;

/// Errors produced while decoding or parsing permissions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Wire input was not exactly [`PermissionSet::WIRE_LEN`](super::PermissionSet::WIRE_LEN) bytes.
    #[error("Invalid permission length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Resource name or slot is not part of the vocabulary.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Access level name is not part of the vocabulary.
    #[error("Unknown access level: {0}")]
    UnknownAccess(String),

    /// Grant list entry is not of the form `resource=access`.
    #[error("Malformed grant: {0:?}")]
    MalformedGrant(String),
}

/// Result alias for permission operations.
pub type Result<T> = std::result::Result<T, PermissionError>;
