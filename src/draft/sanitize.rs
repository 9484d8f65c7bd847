//! Per-section cleanup applied to a draft before it is restored

use super::snapshot::FormSnapshot;
use serde_json::Value;
use std::collections::HashMap;

/// Verification state is owned by reviewers and never comes back from a draft
pub const VERIFICATION_STATUS: &str = "verificationStatus";

/// Result of sanitizing a stored draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sanitized {
    pub values: FormSnapshot,
    /// Skill tags to mirror into the host's "current skills" list
    pub skills: Option<Vec<String>>,
}

/// Cleanup rule registered for one form section
pub trait Sanitizer {
    fn sanitize(&self, values: FormSnapshot) -> Sanitized;
}

/// Drops a fixed set of fields and optionally lifts a tag list out as skills
#[derive(Debug, Clone, Default)]
pub struct FieldSanitizer {
    stripped: Vec<String>,
    skills_field: Option<String>,
}

impl FieldSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strip(mut self, field: &str) -> Self {
        self.stripped.push(field.to_string());
        self
    }

    pub fn skills_from(mut self, field: &str) -> Self {
        self.skills_field = Some(field.to_string());
        self
    }
}

impl Sanitizer for FieldSanitizer {
    fn sanitize(&self, mut values: FormSnapshot) -> Sanitized {
        for field in &self.stripped {
            values.remove(field);
        }

        let skills = self
            .skills_field
            .as_deref()
            .and_then(|field| values.get(field))
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });

        Sanitized { values, skills }
    }
}

/// Sanitizers keyed by form section; sections without one restore as stored
#[derive(Default)]
pub struct SanitizerRegistry {
    sanitizers: HashMap<String, Box<dyn Sanitizer>>,
}

impl SanitizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the rules the profile sections need
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            "projects",
            FieldSanitizer::new()
                .strip(VERIFICATION_STATUS)
                .skills_from("techUsed"),
        );
        registry
    }

    pub fn register(&mut self, section: &str, sanitizer: impl Sanitizer + 'static) {
        self.sanitizers
            .insert(section.to_string(), Box::new(sanitizer));
    }

    pub fn sanitize(&self, section: &str, values: FormSnapshot) -> Sanitized {
        match self.sanitizers.get(section) {
            Some(sanitizer) => sanitizer.sanitize(values),
            None => Sanitized {
                values,
                skills: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(value: Value) -> FormSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_projects_drop_verification_status() {
        let registry = SanitizerRegistry::with_defaults();
        let result = registry.sanitize(
            "projects",
            snapshot(json!({"verificationStatus": "PENDING", "description": "x"})),
        );
        assert_eq!(result.values, snapshot(json!({"description": "x"})));
        assert_eq!(result.skills, None);
    }

    #[test]
    fn test_projects_lift_tech_used_as_skills() {
        let registry = SanitizerRegistry::with_defaults();
        let result = registry.sanitize("projects", snapshot(json!({"techUsed": ["React", "Go"]})));
        assert_eq!(
            result.skills,
            Some(vec!["React".to_string(), "Go".to_string()])
        );
        // The tags stay in the form values too
        assert_eq!(result.values, snapshot(json!({"techUsed": ["React", "Go"]})));
    }

    #[test]
    fn test_unregistered_section_is_untouched() {
        let registry = SanitizerRegistry::with_defaults();
        let values = snapshot(json!({"verificationStatus": "ADDED", "degree": "BSc"}));
        let result = registry.sanitize("education", values.clone());
        assert_eq!(result.values, values);
    }

    #[test]
    fn test_custom_section_rule() {
        let mut registry = SanitizerRegistry::new();
        registry.register("experience", FieldSanitizer::new().strip("oracleNote"));
        let result = registry.sanitize(
            "experience",
            snapshot(json!({"oracleNote": "ok", "company": "Acme"})),
        );
        assert_eq!(result.values, snapshot(json!({"company": "Acme"})));
    }
}
