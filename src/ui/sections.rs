//! Sections list rendering

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::draft::DraftRepository;
use crate::state::Section;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Draw the list of profile sections
pub fn draw<R: DraftRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let mut spans = vec![Span::styled(
                format!("{:<16}", section.label()),
                Style::default().fg(Color::White),
            )];
            if app.state.has_draft(*section) {
                spans.push(Span::styled(
                    "● draft saved",
                    Style::default().fg(Color::Yellow),
                ));
            } else if section.draft_key().is_none() {
                spans.push(Span::styled("no drafts", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Profile Sections ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, area, list, app.state.selected_index);
}
