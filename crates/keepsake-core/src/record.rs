//! Memory record model persisted in the storage slot.

use serde::{Deserialize, Serialize};

/// Name substituted when a memory is submitted without one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Closed set of accepted year values. Validation rejects anything else,
/// even if a tampered form somehow supplies it.
pub const VALID_YEARS: [&str; 5] = ["Freshman", "Sophomore", "Junior", "Senior", "Graduate"];

/// Persisted memory record. Field names serialize in camelCase so the slot
/// format matches what the original application stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    /// Record identifier: creation instant in milliseconds since the epoch.
    pub id: u64,
    /// Author name, `ANONYMOUS_NAME` when the submission left it blank.
    pub name: String,
    /// Academic year, one of `VALID_YEARS`.
    pub year: String,
    /// Academic department.
    pub department: String,
    /// Memory headline.
    pub title: String,
    /// Full memory description.
    pub description: String,
    /// Category tag (Joke, Win, Pain, ...).
    pub category: String,
    /// Optional emoji badge shown next to the title.
    #[serde(default)]
    pub emoji: Option<String>,
    /// Base64 data URL of the uploaded image, stored as JSON `null` when
    /// no image was attached.
    pub image: Option<String>,
    /// Display-only creation date string, e.g. "5/1/2024".
    #[serde(rename = "dateCreated")]
    pub date_created: String,
    /// Creation instant in milliseconds, used only for sort ordering.
    pub timestamp: u64,
}

impl MemoryRecord {
    /// Whether the record carries an emoji badge worth displaying.
    pub fn has_emoji(&self) -> bool {
        self.emoji.as_deref().is_some_and(|emoji| !emoji.is_empty())
    }
}
