//! Application state and core logic

use crate::config::DraftsConfig;
use crate::draft::{
    has_other_values, has_profiles, DraftError, DraftManager, DraftPhase, DraftRepository,
    DraftStore, ExitDecision, FileRepository, FormHost, Notifier, Toasts,
};
use crate::state::{AppState, Form, PendingDiscard, Section, SectionForm, View};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App<R: DraftRepository = FileRepository> {
    /// Current application state
    pub state: AppState,
    /// Draft manager bound to the open form's section
    pub drafts: DraftManager<R, Toasts>,
    /// The open section form, if any
    pub form: Option<SectionForm>,
    /// Whether the app should quit
    quit: bool,
}

impl App<FileRepository> {
    /// Create an App storing drafts on disk
    pub fn new(config: &DraftsConfig) -> Result<Self> {
        let repo = FileRepository::new(config.data_dir()?);
        tracing::info!(path = %repo.root().display(), "Using draft directory");
        Ok(Self::with_repository(repo, config))
    }
}

impl<R: DraftRepository> App<R> {
    /// Create an App on top of any draft repository
    pub fn with_repository(repo: R, config: &DraftsConfig) -> Self {
        let store = DraftStore::new(repo, config.storage_key());
        let drafts = DraftManager::new(store, Toasts::new(config.notification_secs()));
        let mut app = Self {
            state: AppState::default(),
            drafts,
            form: None,
            quit: false,
        };
        app.refresh_drafts();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Log and surface a failed draft operation
    fn report<T>(&mut self, context: &str, result: std::result::Result<T, DraftError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("{context}: {e}");
                self.push_error(format!("{context}: {e}"));
                None
            }
        }
    }

    /// Reload the list of sections that have a stored draft
    pub fn refresh_drafts(&mut self) {
        let result = self.drafts.store().sections();
        if let Some(sections) = self.report("Failed to read drafts", result) {
            self.state.drafted_sections = sections;
        }
    }

    /// Per-frame housekeeping: expire notifications and look for a stored
    /// draft once the open form is shown
    pub fn tick(&mut self) {
        self.drafts.notifier_mut().expire(Local::now());

        if let Some(form) = self.form.as_ref() {
            let result = self.drafts.check_for_draft(form);
            self.report("Failed to read drafts", result);
        }
    }

    /// Open the form of a section
    pub fn open_section(&mut self, section: Section) {
        tracing::debug!(section = section.label(), "Opening section form");
        self.drafts.mount(section.draft_key());
        self.form = Some(SectionForm::new(section));
        self.state.current_view = View::SectionForm;
    }

    /// Drop the form once its host dialog has been closed
    fn close_finished_form(&mut self) {
        if self.form.as_ref().is_some_and(|form| !form.is_open()) {
            self.form = None;
            self.state.pending_discard = None;
            self.state.current_view = View::Sections;
            self.refresh_drafts();
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.form.is_some() {
            match self.drafts.phase() {
                DraftPhase::DraftPrompt => {
                    self.handle_draft_prompt_key(key);
                    self.close_finished_form();
                    return Ok(());
                }
                DraftPhase::ExitConfirm => {
                    self.handle_exit_confirm_key(key);
                    self.close_finished_form();
                    return Ok(());
                }
                DraftPhase::Idle => {}
            }
        }

        if self.state.pending_discard.is_some() {
            self.handle_pending_discard_key(key);
            self.close_finished_form();
            return Ok(());
        }

        match self.state.current_view {
            View::Sections => self.handle_sections_key(key),
            View::SectionForm => self.handle_form_key(key),
        }
        self.close_finished_form();

        Ok(())
    }

    /// Handle keys in Sections view
    fn handle_sections_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(Section::ALL.len());
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => self.open_section(self.state.selected_section()),
            KeyCode::Char('x') => self.delete_selected_draft(),
            KeyCode::Char('r') => self.refresh_drafts(),
            _ => {}
        }
    }

    /// Remove the stored draft of the selected section without opening it
    fn delete_selected_draft(&mut self) {
        let Some(key) = self.state.selected_section().draft_key() else {
            return;
        };
        let result = self.drafts.store().remove_section(key);
        if let Some(true) = self.report("Failed to delete draft", result) {
            self.drafts.notifier_mut().notify_success(
                &format!("Your {key} draft has been discarded."),
                "Draft Discarded",
            );
        }
        self.refresh_drafts();
    }

    /// Handle keys in the section form
    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.request_close();
            return;
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };

        match key.code {
            // Save & close
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let result = self.drafts.handle_save_and_close(form);
                self.report("Failed to save draft", result);
                self.refresh_drafts();
            }
            // Save draft and keep editing
            KeyCode::Char('d') if key.modifiers.contains(crate::platform::DRAFT_MODIFIER) => {
                let values = form.get_values();
                let result = self.drafts.save_draft(&values);
                if matches!(result, Ok(true)) {
                    form.last_saved = Some(Local::now());
                }
                self.report("Failed to save draft", result);
                self.refresh_drafts();
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Enter => {
                if form.is_active_field_multiline() {
                    form.get_active_field_mut().push_char('\n');
                } else {
                    form.next_field();
                }
            }
            KeyCode::Backspace => form.get_active_field_mut().pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.get_active_field_mut().push_char(c);
            }
            _ => {}
        }
    }

    /// The user wants to leave the form
    fn request_close(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        if form.section.draft_key().is_some() {
            if self.drafts.handle_dialog_close(form) == ExitDecision::Ignored {
                tracing::warn!(section = form.section.label(), "Close ignored, form already closed");
            }
            return;
        }

        // No draft is kept for this form; warn before throwing input away
        let values = form.get_values();
        if has_other_values(&values) || has_profiles(&form.profiles()) {
            self.state.pending_discard = Some(PendingDiscard::new(form.section));
        } else {
            form.set_open(false);
        }
    }

    /// Handle keys while the stored-draft prompt is shown
    fn handle_draft_prompt_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => {
                let result = self.drafts.load_draft(form);
                self.report("Failed to restore draft", result);
            }
            KeyCode::Char('d') => {
                let result = self.drafts.discard_draft(form);
                self.report("Failed to discard draft", result);
                self.refresh_drafts();
            }
            _ => {}
        }
    }

    /// Handle keys while the exit confirmation is shown
    fn handle_exit_confirm_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('s') => {
                let result = self.drafts.handle_save_and_close(form);
                self.report("Failed to save draft", result);
            }
            KeyCode::Char('d') => {
                let result = self.drafts.handle_discard_and_close(form);
                self.report("Failed to discard draft", result);
            }
            KeyCode::Esc => self.drafts.cancel_exit(),
            _ => {}
        }
    }

    /// Handle keys in the discard-changes dialog of draft-less forms
    fn handle_pending_discard_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_discard.as_mut() else {
            return;
        };
        let discard = match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') | KeyCode::Char('k') => {
                pending.toggle();
                return;
            }
            KeyCode::Enter => pending.selected_option,
            KeyCode::Char('y') => true,
            KeyCode::Char('n') | KeyCode::Esc => false,
            _ => return,
        };

        self.state.pending_discard = None;
        if discard {
            if let Some(form) = self.form.as_mut() {
                form.set_open(false);
            }
        }
    }
}
