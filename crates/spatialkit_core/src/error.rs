//! Asset error types
//!
//! Errors for registry operations and file-based asset constructors.
//! Misuse of live handles (double release, mutating a released asset) is a
//! caller contract violation and panics instead of returning one of these.

use thiserror::Error;

/// Error type for asset operations
#[derive(Debug, Error)]
pub enum AssetError {
    /// A `create` used an id that is already registered for this asset kind
    #[error("asset id '{0}' is already in use")]
    DuplicateId(String),
    /// IO error (file not found, permission denied, etc.)
    #[error("asset io error: {0}")]
    Io(#[from] std::io::Error),
    /// An external loader failed to decode the file contents
    #[error("asset decode error: {0}")]
    Decode(String),
    /// A referenced asset does not exist
    #[error("asset not found: {0}")]
    NotFound(String),
}
