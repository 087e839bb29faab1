//! Record construction from validated form input.

use crate::form::MemoryForm;
use crate::record::{ANONYMOUS_NAME, MemoryRecord};
use chrono::{DateTime, Local};
use log::debug;

/// Build a memory record from validated form values, the already-encoded
/// image payload, and the creation instant.
///
/// Deterministic given its inputs: `id` and `timestamp` are both captured
/// from the same instant and may legitimately be equal. No validation is
/// performed here; the validator is assumed to have run.
pub fn build_record(
    form: &MemoryForm,
    image: Option<String>,
    now: DateTime<Local>,
) -> MemoryRecord {
    let millis = now.timestamp_millis().max(0) as u64;
    let name = if form.name().is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        form.name().to_string()
    };
    let emoji = if form.emoji().is_empty() {
        None
    } else {
        Some(form.emoji().to_string())
    };
    debug!(
        "built memory record (id={}, has_image={}, has_emoji={})",
        millis,
        image.is_some(),
        emoji.is_some()
    );
    MemoryRecord {
        id: millis,
        name,
        year: form.year.clone(),
        department: form.department.clone(),
        title: form.title().to_string(),
        description: form.description().to_string(),
        category: form.category.clone(),
        emoji,
        image,
        date_created: now.format("%-m/%-d/%Y").to_string(),
        timestamp: millis,
    }
}
