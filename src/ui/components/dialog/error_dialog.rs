//! Error dialog component

use super::base::{key_hints, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            accent: Color::Red,
            message: error_message,
            hint: Some(key_hints(&[("Enter", "dismiss"), ("Esc", "dismiss")])),
            max_width: 60,
        },
    );
}
