//! Submitted form fields, gathered in one place so the validator and codec
//! never touch the rendering surface.

use std::path::{Path, PathBuf};

/// Raw values read off the submission form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryForm {
    /// Author name, optional.
    pub name: String,
    /// Academic year selection.
    pub year: String,
    /// Department selection.
    pub department: String,
    /// Memory headline.
    pub title: String,
    /// Memory description.
    pub description: String,
    /// Category selection.
    pub category: String,
    /// Optional emoji badge.
    pub emoji: String,
    /// Optional path to an image file to attach.
    pub image_path: Option<PathBuf>,
}

impl MemoryForm {
    /// Trimmed author name.
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        self.title.trim()
    }

    /// Trimmed description.
    pub fn description(&self) -> &str {
        self.description.trim()
    }

    /// Trimmed emoji badge.
    pub fn emoji(&self) -> &str {
        self.emoji.trim()
    }

    /// Attached image path, if any was supplied.
    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }
}
