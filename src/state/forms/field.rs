//! Form field value objects

use serde_json::{Map, Value};

/// How a field's text maps onto its stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text (Enter inserts a newline)
    Multiline,
    /// Comma-separated entries stored as an array.
    ///
    /// With `item_key` each entry becomes `{ item_key: entry }`,
    /// otherwise a plain string.
    List { item_key: Option<&'static str> },
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub text: String,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Create a new multi-line text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    /// Create a list field of plain strings
    pub fn tags(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::List { item_key: None })
    }

    /// Create a list field whose entries are objects keyed by `item_key`
    pub fn entries(name: &str, label: &str, item_key: &'static str) -> Self {
        Self::new(
            name,
            label,
            FieldKind::List {
                item_key: Some(item_key),
            },
        )
    }

    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            text: String::new(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.text.pop();
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Entries of a list field, blanks skipped
    fn list_items(&self) -> impl Iterator<Item = &str> {
        self.text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
    }

    /// The value stored in a form snapshot
    pub fn to_value(&self) -> Value {
        match self.kind {
            FieldKind::Text | FieldKind::Multiline => Value::String(self.text.clone()),
            FieldKind::List { item_key: None } => Value::Array(
                self.list_items()
                    .map(|item| Value::String(item.to_string()))
                    .collect(),
            ),
            FieldKind::List {
                item_key: Some(key),
            } => Value::Array(
                self.list_items()
                    .map(|item| {
                        let mut entry = Map::new();
                        entry.insert(key.to_string(), Value::String(item.to_string()));
                        Value::Object(entry)
                    })
                    .collect(),
            ),
        }
    }

    /// Load the field from a snapshot value; anything unexpected clears it
    pub fn set_from_value(&mut self, value: Option<&Value>) {
        self.text = match (self.kind, value) {
            (_, Some(Value::String(s))) => s.clone(),
            (FieldKind::List { item_key }, Some(Value::Array(items))) => items
                .iter()
                .filter_map(|item| match (item_key, item) {
                    (_, Value::String(s)) => Some(s.clone()),
                    (Some(key), Value::Object(entry)) => {
                        entry.get(key).and_then(Value::as_str).map(str::to_string)
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(", "),
            (_, Some(Value::Number(n))) => n.to_string(),
            _ => String::new(),
        };
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> &str {
        &self.text
    }
}
