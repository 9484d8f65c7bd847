//! Save/restore/discard protocol for one form section at a time
//!
//! The manager sits between a form (the [`FormHost`]) and the shared draft
//! record. It decides when to offer a stored draft, what to restore, and
//! whether closing the form would throw away work.
//!
//! ```text
//! Idle --(form opened, draft stored)--> DraftPrompt --(load | discard)--> Idle
//! Idle --(close with changes)---------> ExitConfirm --(save | discard)--> Idle
//! ```

use super::error::Result;
use super::notify::Notifier;
use super::sanitize::{SanitizerRegistry, VERIFICATION_STATUS};
use super::snapshot::FormSnapshot;
use super::store::{DraftRepository, DraftStore};

/// The form a draft manager is bound to.
///
/// Besides the form values this covers the open/closed flag of the dialog
/// that owns the form, which the host controls.
#[cfg_attr(test, mockall::automock)]
pub trait FormHost {
    /// Current live values of the form
    fn get_values(&self) -> FormSnapshot;

    /// Replace the form values
    fn reset(&mut self, values: &FormSnapshot);

    /// Return the form to its empty default values
    fn reset_to_defaults(&mut self);

    fn is_open(&self) -> bool;

    fn set_open(&mut self, open: bool);

    /// Receives skill tags restored from a draft
    fn set_current_skills(&mut self, _skills: Vec<String>) {}

    /// Called after save-and-close
    fn on_save(&mut self, _values: &FormSnapshot) {}

    /// Called after a draft was discarded
    fn on_discard(&mut self) {}
}

/// Which dialog, if any, the manager currently wants shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftPhase {
    #[default]
    Idle,
    /// A stored draft was found; restore or discard it
    DraftPrompt,
    /// Closing would lose changes; save or discard them
    ExitConfirm,
}

/// Outcome of a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Form not open or no section bound; nothing happened
    Ignored,
    /// Nothing would be lost; the form was closed
    Closed,
    /// The exit confirmation dialog was opened
    ConfirmRequired,
}

/// Draft manager for a single form section
pub struct DraftManager<R: DraftRepository, N: Notifier> {
    store: DraftStore<R>,
    notifier: N,
    sanitizers: SanitizerRegistry,
    section: Option<String>,
    /// Latch: the stored draft has been looked up for this mount
    draft_checked: bool,
    /// Last values known to be saved or restored
    baseline: FormSnapshot,
    show_draft_dialog: bool,
    confirm_exit_dialog: bool,
}

impl<R: DraftRepository, N: Notifier> DraftManager<R, N> {
    pub fn new(store: DraftStore<R>, notifier: N) -> Self {
        Self {
            store,
            notifier,
            sanitizers: SanitizerRegistry::with_defaults(),
            section: None,
            draft_checked: false,
            baseline: FormSnapshot::new(),
            show_draft_dialog: false,
            confirm_exit_dialog: false,
        }
    }

    #[cfg(test)]
    pub fn with_sanitizers(mut self, sanitizers: SanitizerRegistry) -> Self {
        self.sanitizers = sanitizers;
        self
    }

    /// Bind to a section and start a fresh lifecycle.
    ///
    /// With `None` every operation is a no-op until the next mount.
    pub fn mount(&mut self, section: Option<&str>) {
        tracing::debug!(?section, "Mounting draft manager");
        self.section = section.map(str::to_string);
        self.draft_checked = false;
        self.baseline = FormSnapshot::new();
        self.show_draft_dialog = false;
        self.confirm_exit_dialog = false;
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn store(&self) -> &DraftStore<R> {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    #[cfg(test)]
    pub fn baseline(&self) -> &FormSnapshot {
        &self.baseline
    }

    pub fn phase(&self) -> DraftPhase {
        if self.confirm_exit_dialog {
            DraftPhase::ExitConfirm
        } else if self.show_draft_dialog {
            DraftPhase::DraftPrompt
        } else {
            DraftPhase::Idle
        }
    }

    /// Look for a stored draft the first time the host is seen open.
    ///
    /// Runs at most once per mount; later calls return `Ok(false)`. Returns
    /// whether the draft prompt was raised.
    pub fn check_for_draft<H: FormHost + ?Sized>(&mut self, host: &H) -> Result<bool> {
        if self.draft_checked || !host.is_open() {
            return Ok(false);
        }
        let Some(section) = self.section.as_deref() else {
            return Ok(false);
        };

        self.draft_checked = true;
        if self.store.has_section(section)? {
            tracing::debug!(section, "Stored draft found");
            self.show_draft_dialog = true;
        }
        Ok(self.show_draft_dialog)
    }

    /// Restore the stored draft into the form.
    ///
    /// Returns whether any values were restored. The draft prompt is closed
    /// whatever the outcome.
    pub fn load_draft<H: FormHost + ?Sized>(&mut self, host: &mut H) -> Result<bool> {
        let result = self.restore(host);
        self.show_draft_dialog = false;
        result
    }

    fn restore<H: FormHost + ?Sized>(&mut self, host: &mut H) -> Result<bool> {
        let Some(section) = self.section.clone() else {
            return Ok(false);
        };
        let Some(stored) = self.store.section(&section)? else {
            return Ok(false);
        };

        let sanitized = self
            .sanitizers
            .sanitize(&section, stored.without_undefined());
        if let Some(skills) = sanitized.skills {
            host.set_current_skills(skills);
        }

        if !sanitized.values.has_content() {
            tracing::debug!(section = %section, "Stored draft has no content, nothing restored");
            return Ok(false);
        }

        host.reset(&sanitized.values);
        self.baseline = sanitized.values;
        self.notifier.notify_success(
            &format!("Your {section} draft has been restored."),
            "Draft Loaded",
        );
        Ok(true)
    }

    /// Persist `values` under the bound section.
    ///
    /// Entirely empty values are not written. Returns whether a write happened.
    pub fn save_draft(&mut self, values: &FormSnapshot) -> Result<bool> {
        let Some(section) = self.section.clone() else {
            return Ok(false);
        };
        if !self.persist(&section, values)? {
            return Ok(false);
        }
        self.notifier.notify_success(
            &format!("Your {section} draft has been saved."),
            "Draft Saved",
        );
        Ok(true)
    }

    fn persist(&mut self, section: &str, values: &FormSnapshot) -> Result<bool> {
        if !values.is_persistable() {
            tracing::debug!(section, "Skipping save of empty draft");
            return Ok(false);
        }
        self.store
            .put_section(section, &values.without_undefined())?;
        self.baseline = values.clone();
        Ok(true)
    }

    /// Drop the stored draft and empty the form
    pub fn discard_draft<H: FormHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(section) = self.section.clone() else {
            return Ok(());
        };
        self.store.remove_section(&section)?;

        host.reset_to_defaults();
        self.baseline = FormSnapshot::new();
        self.notifier.notify_success(
            &format!("Your {section} draft has been discarded."),
            "Draft Discarded",
        );
        self.show_draft_dialog = false;
        host.on_discard();
        Ok(())
    }

    /// Save the live values as a draft, then close the form
    pub fn handle_save_and_close<H: FormHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(section) = self.section.clone() else {
            return Ok(());
        };
        let values = host.get_values();
        self.persist(&section, &values)?;

        self.notifier.notify_success(
            &format!("Your {section} draft has been saved."),
            "Draft Saved",
        );
        self.baseline = values.clone();
        self.confirm_exit_dialog = false;
        host.set_open(false);
        host.on_save(&values);
        Ok(())
    }

    /// Drop the stored draft and close the form, leaving its values alone
    pub fn handle_discard_and_close<H: FormHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(section) = self.section.clone() else {
            return Ok(());
        };
        self.store.remove_section(&section)?;

        self.notifier.notify_success(
            &format!("Your {section} draft has been discarded."),
            "Draft Discarded",
        );
        self.confirm_exit_dialog = false;
        host.set_open(false);
        host.on_discard();
        Ok(())
    }

    /// Keep editing: close the exit confirmation without touching anything
    pub fn cancel_exit(&mut self) {
        self.confirm_exit_dialog = false;
    }

    /// Handle a request to close the form.
    ///
    /// Two independent triggers ask for confirmation: a baseline field whose
    /// live value differs, and a filled live field the baseline never had.
    /// Even then the form closes directly when nothing but whitespace is left.
    pub fn handle_dialog_close<H: FormHost + ?Sized>(&mut self, host: &mut H) -> ExitDecision {
        if !host.is_open() || self.section.is_none() {
            return ExitDecision::Ignored;
        }

        let live = host.get_values();
        let current = live.trimmed();
        let baseline = self.baseline.trimmed();

        let has_changes = baseline.changed_in(&current);
        let has_new_values = current.has_new_values(&baseline, &[VERIFICATION_STATUS]);

        if (has_changes || has_new_values) && live.has_text() {
            tracing::debug!(has_changes, has_new_values, "Unsaved changes, confirming exit");
            self.confirm_exit_dialog = true;
            return ExitDecision::ConfirmRequired;
        }

        host.set_open(false);
        ExitDecision::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::notify::{MockNotifier, Toasts};
    use crate::draft::store::{MemoryRepository, DEFAULT_STORAGE_KEY};
    use serde_json::{json, Value};

    fn snapshot(value: Value) -> FormSnapshot {
        serde_json::from_value(value).unwrap()
    }

    /// Minimal host recording what the manager did to it
    #[derive(Default)]
    struct TestForm {
        values: FormSnapshot,
        open: bool,
        skills: Option<Vec<String>>,
        saved: Vec<FormSnapshot>,
        discarded: usize,
    }

    impl TestForm {
        fn open_with(values: Value) -> Self {
            Self {
                values: snapshot(values),
                open: true,
                ..Default::default()
            }
        }
    }

    impl FormHost for TestForm {
        fn get_values(&self) -> FormSnapshot {
            self.values.clone()
        }
        fn reset(&mut self, values: &FormSnapshot) {
            self.values = values.clone();
        }
        fn reset_to_defaults(&mut self) {
            self.values = FormSnapshot::new();
        }
        fn is_open(&self) -> bool {
            self.open
        }
        fn set_open(&mut self, open: bool) {
            self.open = open;
        }
        fn set_current_skills(&mut self, skills: Vec<String>) {
            self.skills = Some(skills);
        }
        fn on_save(&mut self, values: &FormSnapshot) {
            self.saved.push(values.clone());
        }
        fn on_discard(&mut self) {
            self.discarded += 1;
        }
    }

    fn manager() -> DraftManager<MemoryRepository, Toasts> {
        DraftManager::new(
            DraftStore::new(MemoryRepository::new(), DEFAULT_STORAGE_KEY),
            Toasts::default(),
        )
    }

    fn mounted(section: &str) -> DraftManager<MemoryRepository, Toasts> {
        let mut manager = manager();
        manager.mount(Some(section));
        manager
    }

    fn raw_record(manager: &DraftManager<MemoryRepository, Toasts>) -> Option<String> {
        manager
            .store()
            .repository()
            .get(DEFAULT_STORAGE_KEY)
            .unwrap()
    }

    mod detection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_prompt_when_draft_stored() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            manager.mount(Some("education"));

            let form = TestForm::open_with(json!({}));
            assert!(manager.check_for_draft(&form).unwrap());
            assert_eq!(manager.phase(), DraftPhase::DraftPrompt);
        }

        #[test]
        fn test_no_prompt_without_draft() {
            let mut manager = mounted("education");
            let form = TestForm::open_with(json!({}));
            assert!(!manager.check_for_draft(&form).unwrap());
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }

        #[test]
        fn test_waits_until_host_is_open() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            manager.mount(Some("education"));

            let mut form = TestForm::default();
            assert!(!manager.check_for_draft(&form).unwrap());

            form.open = true;
            assert!(manager.check_for_draft(&form).unwrap());
        }

        #[test]
        fn test_prompt_triggers_once_per_mount() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            manager.mount(Some("education"));
            let mut form = TestForm::open_with(json!({}));

            assert!(manager.check_for_draft(&form).unwrap());
            manager.load_draft(&mut form).unwrap();

            // Re-renders while still open must not raise the prompt again
            for _ in 0..3 {
                assert!(!manager.check_for_draft(&form).unwrap());
            }
            assert_eq!(manager.phase(), DraftPhase::Idle);

            // A new mount starts a new lifecycle
            manager.mount(Some("education"));
            assert!(manager.check_for_draft(&form).unwrap());
        }

        #[test]
        fn test_no_section_is_noop() {
            let mut manager = manager();
            manager.mount(None);
            let form = TestForm::open_with(json!({}));
            assert!(!manager.check_for_draft(&form).unwrap());
        }
    }

    mod saving {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_save_then_load_round_trip() {
            let mut manager = mounted("education");
            let values = snapshot(json!({"degree": "BSc", "grade": "A", "endDate": null}));
            assert!(manager.save_draft(&values).unwrap());

            manager.mount(Some("education"));
            let mut form = TestForm::open_with(json!({}));
            assert!(manager.load_draft(&mut form).unwrap());

            assert_eq!(form.values, snapshot(json!({"degree": "BSc", "grade": "A"})));
            assert_eq!(manager.baseline(), &form.values);
        }

        #[test]
        fn test_empty_save_is_suppressed() {
            let mut manager = mounted("education");
            assert!(!manager.save_draft(&FormSnapshot::new()).unwrap());
            assert!(!manager
                .save_draft(&snapshot(json!({"a": "", "b": null})))
                .unwrap());
            assert_eq!(raw_record(&manager), None);
            assert!(manager.notifier().latest().is_none());
        }

        #[test]
        fn test_empty_save_leaves_existing_entry() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            let before = raw_record(&manager);

            manager.save_draft(&snapshot(json!({"degree": ""}))).unwrap();

            assert_eq!(raw_record(&manager), before);
        }

        #[test]
        fn test_save_notifies_with_section_name() {
            let mut notifier = MockNotifier::new();
            notifier
                .expect_notify_success()
                .withf(|message, title| {
                    message.contains("projects") && title.contains("Draft Saved")
                })
                .times(1)
                .return_const(());

            let mut manager = DraftManager::new(
                DraftStore::new(MemoryRepository::new(), DEFAULT_STORAGE_KEY),
                notifier,
            );
            manager.mount(Some("projects"));
            manager
                .save_draft(&snapshot(json!({"projectName": "Dehix"})))
                .unwrap();
        }

        #[test]
        fn test_save_updates_baseline() {
            let mut manager = mounted("education");
            let values = snapshot(json!({"degree": "BSc"}));
            manager.save_draft(&values).unwrap();
            assert_eq!(manager.baseline(), &values);
        }

        #[test]
        fn test_save_without_section_is_noop() {
            let mut manager = manager();
            manager.mount(None);
            assert!(!manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap());
            assert_eq!(raw_record(&manager), None);
            assert!(manager.notifier().latest().is_none());
        }

        #[test]
        fn test_save_failure_is_reported_not_masked() {
            let mut manager = mounted("education");
            manager.store().repository().set_simulate_write_error(true);

            let result = manager.save_draft(&snapshot(json!({"degree": "BSc"})));

            assert!(result.is_err());
            assert!(manager.baseline().is_empty());
            assert!(manager.notifier().latest().is_none());
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_projects_scenario() {
            let mut manager = mounted("projects");
            manager
                .save_draft(&snapshot(json!({
                    "techUsed": ["React", "Go"],
                    "verificationStatus": "PENDING",
                    "description": "x"
                })))
                .unwrap();

            manager.mount(Some("projects"));
            let mut form = TestForm::open_with(json!({}));
            manager.check_for_draft(&form).unwrap();
            assert!(manager.load_draft(&mut form).unwrap());

            assert_eq!(
                form.values,
                snapshot(json!({"techUsed": ["React", "Go"], "description": "x"}))
            );
            assert_eq!(
                form.skills,
                Some(vec!["React".to_string(), "Go".to_string()])
            );
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }

        #[test]
        fn test_verification_status_kept_for_other_sections() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"verificationStatus": "PENDING", "degree": "BSc"})))
                .unwrap();

            let mut form = TestForm::open_with(json!({}));
            manager.load_draft(&mut form).unwrap();

            assert_eq!(
                form.values.get("verificationStatus"),
                Some(&json!("PENDING"))
            );
        }

        #[test]
        fn test_custom_sanitizers() {
            use crate::draft::sanitize::FieldSanitizer;

            let mut registry = SanitizerRegistry::new();
            registry.register("experience", FieldSanitizer::new().strip("referencePersonName"));
            let mut manager = manager().with_sanitizers(registry);
            manager.mount(Some("experience"));
            manager
                .save_draft(&snapshot(json!({"company": "Dehix", "referencePersonName": "Ada"})))
                .unwrap();

            let mut form = TestForm::open_with(json!({}));
            assert!(manager.load_draft(&mut form).unwrap());

            assert_eq!(form.values, snapshot(json!({"company": "Dehix"})));
        }

        #[test]
        fn test_draft_without_content_is_not_restored() {
            let mut manager = mounted("education");
            // Persistable (a number) but carries no text or list content
            manager.save_draft(&snapshot(json!({"grade": 4}))).unwrap();
            manager.mount(Some("education"));

            let mut form = TestForm::open_with(json!({"degree": "typed"}));
            manager.check_for_draft(&form).unwrap();
            assert!(!manager.load_draft(&mut form).unwrap());

            assert_eq!(form.values, snapshot(json!({"degree": "typed"})));
            assert!(manager.baseline().is_empty());
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }

        #[test]
        fn test_load_of_corrupt_record_closes_prompt() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            manager.mount(Some("education"));
            let mut form = TestForm::open_with(json!({}));
            manager.check_for_draft(&form).unwrap();

            // Corrupt record reads as empty, so nothing is restored
            manager
                .store()
                .repository()
                .set(DEFAULT_STORAGE_KEY, "{oops")
                .unwrap();

            assert!(!manager.load_draft(&mut form).unwrap());
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }
    }

    mod discarding {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_discard_last_section_removes_record() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            let mut form = TestForm::open_with(json!({"degree": "BSc"}));

            manager.discard_draft(&mut form).unwrap();

            assert_eq!(raw_record(&manager), None);
            assert!(form.values.is_empty());
            assert_eq!(form.discarded, 1);
            assert_eq!(manager.phase(), DraftPhase::Idle);
            assert_eq!(
                manager.notifier().latest().map(|t| t.title.as_str()),
                Some("Draft Discarded")
            );
        }

        #[test]
        fn test_discard_keeps_other_sections() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            manager.mount(Some("projects"));
            manager
                .save_draft(&snapshot(json!({"projectName": "Dehix"})))
                .unwrap();

            manager.mount(Some("education"));
            let mut form = TestForm::open_with(json!({}));
            manager.discard_draft(&mut form).unwrap();

            assert!(manager.store().record_exists().unwrap());
            assert_eq!(manager.store().sections().unwrap(), vec!["projects"]);
            assert_eq!(
                manager.store().section("projects").unwrap(),
                Some(snapshot(json!({"projectName": "Dehix"})))
            );
        }

        #[test]
        fn test_discard_without_section_is_noop() {
            let mut manager = manager();
            manager.mount(None);
            let mut form = TestForm::open_with(json!({"degree": "BSc"}));
            manager.discard_draft(&mut form).unwrap();
            assert_eq!(form.values, snapshot(json!({"degree": "BSc"})));
            assert_eq!(form.discarded, 0);
        }
    }

    mod closing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_close_without_changes_closes_directly() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "", "grade": ""}));

            assert_eq!(manager.handle_dialog_close(&mut form), ExitDecision::Closed);
            assert!(!form.open);
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }

        #[test]
        fn test_close_matching_baseline_closes_directly() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "BSc"}));
            manager.save_draft(&form.get_values()).unwrap();

            // Whitespace around the same value is not a change
            form.values.insert("degree", " BSc ");
            assert_eq!(manager.handle_dialog_close(&mut form), ExitDecision::Closed);
        }

        #[test]
        fn test_close_with_changed_value_confirms() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"name": "a"})))
                .unwrap();
            let mut form = TestForm::open_with(json!({"name": "b"}));

            assert_eq!(
                manager.handle_dialog_close(&mut form),
                ExitDecision::ConfirmRequired
            );
            assert!(form.open);
            assert_eq!(manager.phase(), DraftPhase::ExitConfirm);
        }

        #[test]
        fn test_close_with_new_data_confirms() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "MSc"}));
            assert_eq!(
                manager.handle_dialog_close(&mut form),
                ExitDecision::ConfirmRequired
            );
        }

        #[test]
        fn test_verification_status_alone_is_not_new_data() {
            let mut manager = mounted("projects");
            let mut form = TestForm::open_with(json!({
                "projectName": "",
                "techUsed": [],
                "verificationStatus": "PENDING"
            }));
            assert_eq!(manager.handle_dialog_close(&mut form), ExitDecision::Closed);
        }

        // A baseline field cleared in the live form counts as a change, but
        // when nothing else is filled the form still closes without asking.
        #[test]
        fn test_cleared_baseline_field_with_empty_form_closes() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            let mut form = TestForm::open_with(json!({"degree": "   "}));
            assert_eq!(manager.handle_dialog_close(&mut form), ExitDecision::Closed);
        }

        #[test]
        fn test_cleared_baseline_field_with_other_content_confirms() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc", "grade": "A"})))
                .unwrap();
            let mut form = TestForm::open_with(json!({"degree": "", "grade": "A"}));
            assert_eq!(
                manager.handle_dialog_close(&mut form),
                ExitDecision::ConfirmRequired
            );
        }

        #[test]
        fn test_close_ignored_when_not_open() {
            let mut manager = mounted("education");
            let mut host = MockFormHost::new();
            host.expect_is_open().return_const(false);
            assert_eq!(manager.handle_dialog_close(&mut host), ExitDecision::Ignored);
        }

        #[test]
        fn test_close_ignored_without_section() {
            let mut manager = manager();
            let mut form = TestForm::open_with(json!({"degree": "BSc"}));
            assert_eq!(manager.handle_dialog_close(&mut form), ExitDecision::Ignored);
            assert!(form.open);
        }
    }

    mod exit_actions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_save_and_close() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "MSc"}));
            manager.handle_dialog_close(&mut form);

            manager.handle_save_and_close(&mut form).unwrap();

            assert!(!form.open);
            assert_eq!(form.saved, vec![snapshot(json!({"degree": "MSc"}))]);
            assert_eq!(manager.phase(), DraftPhase::Idle);
            assert_eq!(
                manager.store().section("education").unwrap(),
                Some(snapshot(json!({"degree": "MSc"})))
            );
            assert_eq!(manager.baseline(), &snapshot(json!({"degree": "MSc"})));
        }

        #[test]
        fn test_save_and_close_failure_keeps_form_open() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "MSc"}));
            manager.handle_dialog_close(&mut form);
            manager.store().repository().set_simulate_write_error(true);

            assert!(manager.handle_save_and_close(&mut form).is_err());
            assert!(form.open);
            assert!(form.saved.is_empty());
            assert_eq!(manager.phase(), DraftPhase::ExitConfirm);
        }

        #[test]
        fn test_discard_and_close_keeps_live_values() {
            let mut manager = mounted("education");
            manager
                .save_draft(&snapshot(json!({"degree": "BSc"})))
                .unwrap();
            let mut form = TestForm::open_with(json!({"degree": "MSc"}));
            manager.handle_dialog_close(&mut form);

            manager.handle_discard_and_close(&mut form).unwrap();

            assert!(!form.open);
            assert_eq!(form.values, snapshot(json!({"degree": "MSc"})));
            assert_eq!(form.discarded, 1);
            assert_eq!(raw_record(&manager), None);
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }

        #[test]
        fn test_cancel_exit_keeps_form_open() {
            let mut manager = mounted("education");
            let mut form = TestForm::open_with(json!({"degree": "MSc"}));
            manager.handle_dialog_close(&mut form);

            manager.cancel_exit();

            assert!(form.open);
            assert_eq!(manager.phase(), DraftPhase::Idle);
        }
    }
}
