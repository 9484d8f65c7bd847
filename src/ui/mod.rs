//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod sections;
mod widgets;

use crate::app::App;
use crate::draft::{DraftPhase, DraftRepository};
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw<R: DraftRepository>(frame: &mut Frame, app: &App<R>) {
    let main_area = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Sections => sections::draw(frame, main_area, app),
        View::SectionForm => forms::draw_section_form(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Dialogs are drawn over everything else, the error dialog on top
    if let Some(form) = app.form.as_ref() {
        let label = form.section.label();
        match app.drafts.phase() {
            DraftPhase::DraftPrompt => components::render_draft_dialog(frame, label),
            DraftPhase::ExitConfirm => components::render_exit_dialog(frame, label),
            DraftPhase::Idle => {}
        }
    }

    if let Some(pending) = &app.state.pending_discard {
        components::render_discard_dialog(frame, pending);
    }

    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
