//! The submission pipeline: image load, record construction, append.
//!
//! Validation happens before this pipeline runs; a failed validation never
//! reaches it. An image read or store write failure aborts the whole
//! submission so no partial record is ever appended.

use chrono::Local;
use keepsake_core::codec::build_record;
use keepsake_core::{ImageError, MemoryForm, MemoryRecord, load_image};
use keepsake_store::{MemoryStore, StoreError};
use log::info;
use thiserror::Error;

/// Errors surfaced to the user when a submission cannot complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The attached image could not be read or encoded.
    #[error("could not read the attached image: {0}")]
    Image(#[from] ImageError),
    /// The record could not be written to the storage slot.
    #[error("could not save to the storage slot: {0}")]
    Store(#[from] StoreError),
}

/// Run the submission flow for an already-validated form: load the optional
/// image, build the record at the current instant, and append it.
pub async fn submit_memory(
    store: &dyn MemoryStore,
    form: &MemoryForm,
) -> Result<MemoryRecord, SubmitError> {
    let image = load_image(form.image_path()).await?;
    let record = build_record(form, image, Local::now());
    store.append(record.clone()).await?;
    info!("memory submitted (id={}, title={})", record.id, record.title);
    Ok(record)
}
