//! Layout components (content area, status bar)

use crate::app::App;
use crate::draft::DraftRepository;
use crate::platform::{DRAFT_SHORTCUT, SAVE_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar and return the content area
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar<R: DraftRepository>(frame: &mut Frame, app: &App<R>) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Number of stored drafts
    let drafts = app.state.drafted_sections.len();
    let marker = if drafts > 0 {
        Span::styled(format!(" ● {drafts} "), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Gray))
    };
    spans.push(marker);

    spans.push(Span::styled(
        view_hints(app),
        Style::default().fg(Color::DarkGray),
    ));

    if let Some(toast) = app.drafts.notifier().latest() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(toast.display(), Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get view-specific keyboard hints
fn view_hints<R: DraftRepository>(app: &App<R>) -> String {
    match app.state.current_view {
        View::Sections => "j/k:navigate  Enter:open  x:delete draft  q:quit".to_string(),
        View::SectionForm => {
            let keeps_drafts = app
                .form
                .as_ref()
                .is_some_and(|form| form.section.draft_key().is_some());
            if keeps_drafts {
                format!("Tab:next  {DRAFT_SHORTCUT}:save draft  {SAVE_SHORTCUT}:save & close  Esc:close")
            } else {
                "Tab:next  Esc:close".to_string()
            }
        }
    }
}
