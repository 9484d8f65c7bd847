//! Section form rendering

use super::field_renderer::{draw_field, draw_help_text};
use crate::app::App;
use crate::draft::DraftRepository;
use crate::platform::{DRAFT_SHORTCUT, SAVE_SHORTCUT};
use crate::state::SectionForm;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the open section form
pub fn draw_section_form<R: DraftRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|field| {
            if field.is_multiline() {
                Constraint::Min(5)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    constraints.push(Constraint::Length(1)); // Info line
    constraints.push(Constraint::Length(2)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(format!(" Edit {} ", form.section.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    for (index, field) in form.fields.iter().enumerate() {
        draw_field(frame, chunks[index], field, index == form.active_field_index);
    }

    let count = form.fields.len();
    frame.render_widget(Paragraph::new(info_line(form)), chunks[count]);

    if form.section.draft_key().is_some() {
        draw_help_text(
            frame,
            chunks[count + 1],
            &[
                ("Tab", "next field"),
                (DRAFT_SHORTCUT, "save draft"),
                (SAVE_SHORTCUT, "save & close"),
                ("Esc", "close"),
            ],
        );
    } else {
        draw_help_text(
            frame,
            chunks[count + 1],
            &[("Tab", "next field"), ("Esc", "close")],
        );
    }
}

/// Skills restored from a draft and the time of the last save
fn info_line(form: &SectionForm) -> Line<'_> {
    let mut spans = vec![];
    if form.section.draft_key().is_none() {
        spans.push(Span::styled(
            "Drafts are not kept for this section",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !form.current_skills.is_empty() {
        spans.push(Span::styled("Skills: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            form.current_skills.join(", "),
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(saved) = form.last_saved {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("Draft saved at {}", saved.format("%H:%M")),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}
