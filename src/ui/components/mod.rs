//! Reusable UI components

mod dialog;

pub use dialog::{render_discard_dialog, render_draft_dialog, render_error_dialog, render_exit_dialog};
