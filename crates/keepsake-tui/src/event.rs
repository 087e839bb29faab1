//! TUI event types for input and submission outcomes.

use crossterm::event::KeyEvent;
use keepsake_core::MemoryRecord;

/// Application event emitted by input handlers or the submission task.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Outcome of an in-flight submission.
    Submission(SubmissionOutcome),
}

/// Result of the asynchronous submit flow (image load + append).
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The record was built and appended to the store.
    Saved(MemoryRecord),
    /// Image load or store write failed; nothing was appended.
    Failed(String),
}
