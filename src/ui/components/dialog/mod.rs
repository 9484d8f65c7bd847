//! Dialog components for TUI

mod base;
mod confirm_dialog;
mod draft_dialog;
mod error_dialog;

pub use confirm_dialog::render_discard_dialog;
pub use draft_dialog::{render_draft_dialog, render_exit_dialog};
pub use error_dialog::render_error_dialog;
