//! Error types for storage-slot operations.

use thiserror::Error;

/// Errors returned by memory stores.
///
/// Read-side corruption never surfaces here: a missing or unparseable slot
/// is normalized to an empty collection by `load_all`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while writing the slot.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
