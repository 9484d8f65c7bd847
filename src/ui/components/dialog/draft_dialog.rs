//! Draft prompt and exit confirmation dialogs

use super::base::{key_hints, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Ask whether a stored draft should be restored
pub fn render_draft_dialog(frame: &mut Frame, section: &str) {
    let message = format!(
        "A saved {} draft was found. Restore it into the form or discard it?",
        section.to_lowercase()
    );
    render_dialog(
        frame,
        DialogConfig {
            title: "Draft Found",
            accent: Color::Yellow,
            message: &message,
            hint: Some(key_hints(&[("r", "restore"), ("d", "discard")])),
            max_width: 56,
        },
    );
}

/// Ask what to do with unsaved changes before the form closes
pub fn render_exit_dialog(frame: &mut Frame, section: &str) {
    let message = format!(
        "You have unsaved changes in {}. Save them as a draft before closing?",
        section.to_lowercase()
    );
    render_dialog(
        frame,
        DialogConfig {
            title: "Unsaved Changes",
            accent: Color::Yellow,
            message: &message,
            hint: Some(key_hints(&[
                ("s", "save & close"),
                ("d", "discard & close"),
                ("Esc", "keep editing"),
            ])),
            max_width: 60,
        },
    );
}
