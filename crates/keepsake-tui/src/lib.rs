//! Terminal UI for the Keepsake memory wall.

pub mod app;
pub mod event;
pub mod submit;
pub mod ui;
