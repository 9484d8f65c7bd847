//! Discard-changes confirmation for forms that keep no draft

use super::base::{centered, key_hints};
use crate::state::PendingDiscard;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the discard-changes dialog
pub fn render_discard_dialog(frame: &mut Frame, pending: &PendingDiscard) {
    let dialog_area = centered(frame.area(), 50, 11);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            "Discard Changes",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} is not kept as a draft. Close and lose your input?",
            pending.section.label()
        )),
        Line::from(""),
    ];

    // Keep editing, Discard
    for (is_discard, label, color) in [
        (false, "Keep editing", Color::White),
        (true, "Discard", Color::Red),
    ] {
        let is_selected = pending.selected_option == is_discard;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(key_hints(&[("↑↓", "select"), ("Enter", "confirm"), ("Esc", "cancel")]));

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
