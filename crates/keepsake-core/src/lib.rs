//! Core data pipeline for Keepsake: form input, validation, record
//! construction, and image payload encoding.

pub mod codec;
pub mod error;
pub mod form;
pub mod image;
pub mod record;
pub mod validate;

/// Image payload error type.
pub use error::ImageError;
/// Submitted form fields.
pub use form::MemoryForm;
/// Image payload helpers.
pub use image::{decode_data_url, load_image};
/// Persisted memory record and the closed year set.
pub use record::{ANONYMOUS_NAME, MemoryRecord, VALID_YEARS};
/// Validation entry point and result.
pub use validate::{Validation, validate};
