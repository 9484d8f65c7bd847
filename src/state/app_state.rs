//! Application state definitions

use super::forms::Section;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Sections,
    SectionForm,
}

/// Confirmation for leaving a form that keeps no draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiscard {
    pub section: Section,
    /// true = Discard, false = Keep editing
    pub selected_option: bool,
}

impl PendingDiscard {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            selected_option: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Selection
    pub selected_index: usize,

    /// Sections with a stored draft, refreshed after every draft change
    pub drafted_sections: Vec<String>,

    // Dialogs
    pub pending_discard: Option<PendingDiscard>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_section(&self) -> Section {
        Section::ALL[self.selected_index.min(Section::ALL.len() - 1)]
    }

    pub fn has_draft(&self, section: Section) -> bool {
        section
            .draft_key()
            .is_some_and(|key| self.drafted_sections.iter().any(|s| s == key))
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
