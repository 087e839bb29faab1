//! Persistence for Keepsake: the whole memory collection lives in one
//! JSON-array storage slot on disk.

pub mod error;
pub mod slot;

/// Store error type.
pub use error::StoreError;
/// Store interface and the default file-backed implementation.
pub use slot::{FileSlotStore, MemoryStore, default_slot_path};
