//! Section forms and their navigation

use super::field::FormField;
use crate::draft::{FormHost, FormSnapshot, VERIFICATION_STATUS};
use chrono::{DateTime, Local};
use serde_json::Value;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Profile sections a freelancer can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Projects,
    Education,
    Experience,
    Personal,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Projects,
        Section::Education,
        Section::Experience,
        Section::Personal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Personal => "Personal Info",
        }
    }

    /// Key of this section in the draft record; `None` when drafts are not kept
    pub fn draft_key(&self) -> Option<&'static str> {
        match self {
            Self::Projects => Some("projects"),
            Self::Education => Some("education"),
            Self::Experience => Some("experience"),
            Self::Personal => None,
        }
    }

    fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Projects => vec![
                FormField::text("projectName", "Project Name"),
                FormField::multiline("description", "Description"),
                FormField::text("githubLink", "GitHub Link"),
                FormField::text("role", "Role"),
                FormField::tags("techUsed", "Tech Used (comma separated)"),
            ],
            Self::Education => vec![
                FormField::text("degree", "Degree"),
                FormField::text("universityName", "University"),
                FormField::text("fieldOfStudy", "Field of Study"),
                FormField::text("startDate", "Start Date"),
                FormField::text("endDate", "End Date"),
                FormField::text("grade", "Grade"),
            ],
            Self::Experience => vec![
                FormField::text("company", "Company"),
                FormField::text("jobTitle", "Job Title"),
                FormField::multiline("workDescription", "Work Description"),
                FormField::text("workFrom", "From"),
                FormField::text("workTo", "To"),
                FormField::text("referencePersonName", "Reference"),
            ],
            Self::Personal => vec![
                FormField::text("firstName", "First Name"),
                FormField::text("lastName", "Last Name"),
                FormField::multiline("description", "About"),
                FormField::entries("urls", "Links (comma separated)", "value"),
                FormField::entries("profiles", "Profiles (comma separated domains)", "domain"),
            ],
        }
    }

    /// Values every new form of this section carries but the user never edits
    fn constants(&self) -> FormSnapshot {
        let mut constants = FormSnapshot::new();
        if matches!(self, Self::Projects) {
            constants.insert(VERIFICATION_STATUS, "PENDING");
        }
        constants
    }
}

/// An open section form
#[derive(Debug, Clone)]
pub struct SectionForm {
    pub section: Section,
    pub fields: Vec<FormField>,
    pub constants: FormSnapshot,
    pub active_field_index: usize,
    pub open: bool,
    /// Skill tags restored from a projects draft
    pub current_skills: Vec<String>,
    pub last_saved: Option<DateTime<Local>>,
}

impl SectionForm {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            fields: section.fields(),
            constants: section.constants(),
            active_field_index: 0,
            open: true,
            current_skills: Vec::new(),
            last_saved: None,
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(FormField::is_multiline)
    }

    /// The `profiles` list as stored values
    pub fn profiles(&self) -> Vec<Value> {
        match self.get_values().get("profiles") {
            Some(Value::Array(profiles)) => profiles.clone(),
            _ => Vec::new(),
        }
    }
}

impl Form for SectionForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active_field_index]
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

impl FormHost for SectionForm {
    fn get_values(&self) -> FormSnapshot {
        let mut values = self.constants.clone();
        for field in &self.fields {
            values.insert(field.name.clone(), field.to_value());
        }
        values
    }

    fn reset(&mut self, values: &FormSnapshot) {
        for field in &mut self.fields {
            field.set_from_value(values.get(&field.name));
        }
    }

    fn reset_to_defaults(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_skills.clear();
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn set_current_skills(&mut self, skills: Vec<String>) {
        self.current_skills = skills;
    }

    fn on_save(&mut self, _values: &FormSnapshot) {
        self.last_saved = Some(Local::now());
    }

    fn on_discard(&mut self) {
        self.last_saved = None;
    }
}
