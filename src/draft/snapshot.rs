//! Form value snapshots and the comparisons used to detect unsaved work

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The field values of a form at one point in time.
///
/// Values are JSON so that any section's shape can be stored in the shared
/// draft record. A `null` value stands for a field that was never set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot(Map<String, Value>);

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Copy of the snapshot without unset (`null`) fields
    pub fn without_undefined(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Copy of the snapshot with surrounding whitespace removed from string fields
    pub fn trimmed(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => Value::String(s.trim().to_string()),
                        other => other.clone(),
                    };
                    (k.clone(), value)
                })
                .collect(),
        )
    }

    /// True if at least one field is neither unset nor an empty string.
    ///
    /// Snapshots failing this check are never written to the draft record.
    pub fn is_persistable(&self) -> bool {
        self.0
            .values()
            .any(|v| !v.is_null() && v.as_str() != Some(""))
    }

    /// True if any field holds a non-empty string or a non-empty array
    pub fn has_content(&self) -> bool {
        self.0.values().any(|v| match v {
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        })
    }

    /// True if any field holds something other than whitespace
    pub fn has_text(&self) -> bool {
        self.0.values().any(is_filled)
    }

    /// True if a field present in `self` (the baseline) differs in `current`.
    ///
    /// Both sides are expected to be trimmed already. A field missing from
    /// `current` compares as unset.
    pub fn changed_in(&self, current: &FormSnapshot) -> bool {
        self.0.iter().any(|(key, baseline)| {
            let live = current.get(key).unwrap_or(&Value::Null);
            !values_equal(live, baseline)
        })
    }

    /// True if `self` holds a filled field that `baseline` has never seen.
    ///
    /// Keys listed in `ignored` never count as new data.
    pub fn has_new_values(&self, baseline: &FormSnapshot, ignored: &[&str]) -> bool {
        self.0.iter().any(|(key, value)| {
            !ignored.contains(&key.as_str()) && is_filled(value) && !baseline.contains_key(key)
        })
    }
}

/// Arrays compare by their serialized form, everything else directly
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_), Value::Array(_)) => {
            serde_json::to_string(a).ok() == serde_json::to_string(b).ok()
        }
        _ => a == b,
    }
}

/// Whether a single value carries user-entered data
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Whether a multi-profile form has content outside its `profiles` list.
///
/// `urls` entries only count when at least one link has a non-blank `value`.
pub fn has_other_values(values: &FormSnapshot) -> bool {
    values.iter().any(|(key, value)| match key.as_str() {
        "profiles" => false,
        "urls" => value.as_array().is_some_and(|urls| {
            urls.iter().any(|url| {
                url.get("value")
                    .and_then(Value::as_str)
                    .is_some_and(|v| !v.trim().is_empty())
            })
        }),
        _ => is_filled(value),
    })
}

/// Whether any profile in the list has a filled field
pub fn has_profiles(profiles: &[Value]) -> bool {
    profiles.iter().any(|profile| match profile {
        Value::Object(fields) => fields.values().any(is_filled),
        other => is_filled(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> FormSnapshot {
        serde_json::from_value(value).unwrap()
    }

    mod cleaning {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_without_undefined_drops_null_fields() {
            let values = snapshot(json!({"a": "x", "b": null, "c": []}));
            assert_eq!(
                values.without_undefined(),
                snapshot(json!({"a": "x", "c": []}))
            );
        }

        #[test]
        fn test_trimmed_only_touches_strings() {
            let values = snapshot(json!({"a": "  x ", "b": [" y "], "c": 3}));
            assert_eq!(
                values.trimmed(),
                snapshot(json!({"a": "x", "b": [" y "], "c": 3}))
            );
        }
    }

    mod emptiness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_snapshot_is_not_persistable() {
            assert!(!FormSnapshot::new().is_persistable());
        }

        #[test]
        fn test_blank_and_unset_fields_are_not_persistable() {
            assert!(!snapshot(json!({"a": "", "b": null})).is_persistable());
        }

        #[test]
        fn test_whitespace_string_is_persistable() {
            assert!(snapshot(json!({"a": " "})).is_persistable());
        }

        #[test]
        fn test_has_content_requires_string_or_array() {
            assert!(!snapshot(json!({"a": "", "b": [], "c": 4})).has_content());
            assert!(snapshot(json!({"b": ["React"]})).has_content());
            assert!(snapshot(json!({"a": "x"})).has_content());
        }

        #[test]
        fn test_has_text_ignores_whitespace() {
            assert!(!snapshot(json!({"a": "   ", "b": []})).has_text());
            assert!(snapshot(json!({"a": " x "})).has_text());
        }
    }

    mod comparison {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_changed_in_detects_modified_scalar() {
            let baseline = snapshot(json!({"name": "a"}));
            let current = snapshot(json!({"name": "b"}));
            assert!(baseline.changed_in(&current));
        }

        #[test]
        fn test_changed_in_compares_arrays_structurally() {
            let baseline = snapshot(json!({"techUsed": ["React", "Go"]}));
            assert!(!baseline.changed_in(&snapshot(json!({"techUsed": ["React", "Go"]}))));
            assert!(baseline.changed_in(&snapshot(json!({"techUsed": ["Go", "React"]}))));
        }

        #[test]
        fn test_changed_in_treats_missing_field_as_change() {
            let baseline = snapshot(json!({"name": "a"}));
            assert!(baseline.changed_in(&FormSnapshot::new()));
        }

        #[test]
        fn test_changed_in_ignores_fields_outside_baseline() {
            let baseline = snapshot(json!({"name": "a"}));
            let current = snapshot(json!({"name": "a", "extra": "new"}));
            assert!(!baseline.changed_in(&current));
        }

        #[test]
        fn test_has_new_values_skips_ignored_keys() {
            let current = snapshot(json!({"verificationStatus": "PENDING"}));
            assert!(!current.has_new_values(&FormSnapshot::new(), &["verificationStatus"]));
        }

        #[test]
        fn test_has_new_values_requires_filled_value() {
            let baseline = FormSnapshot::new();
            assert!(!snapshot(json!({"a": "", "b": []})).has_new_values(&baseline, &[]));
            assert!(snapshot(json!({"a": "x"})).has_new_values(&baseline, &[]));
        }

        #[test]
        fn test_has_new_values_ignores_keys_in_baseline() {
            let baseline = snapshot(json!({"a": "x"}));
            assert!(!snapshot(json!({"a": "y"})).has_new_values(&baseline, &[]));
        }
    }

    mod profile_predicates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_has_other_values_ignores_profiles() {
            let values = snapshot(json!({"profiles": [{"domain": "Web"}], "bio": ""}));
            assert!(!has_other_values(&values));
        }

        #[test]
        fn test_has_other_values_requires_non_blank_url() {
            let blank = snapshot(json!({"urls": [{"value": "  "}]}));
            assert!(!has_other_values(&blank));

            let filled = snapshot(json!({"urls": [{"value": ""}, {"value": "https://x.dev"}]}));
            assert!(has_other_values(&filled));
        }

        #[test]
        fn test_has_other_values_counts_plain_fields() {
            assert!(has_other_values(&snapshot(json!({"firstName": "Ada"}))));
        }

        #[test]
        fn test_has_profiles() {
            assert!(!has_profiles(&[]));
            assert!(!has_profiles(&[json!({"domain": "", "skills": []})]));
            assert!(has_profiles(&[json!({"domain": ""}), json!({"domain": "Design"})]));
        }
    }
}
