//! Persistence for the shared draft record
//!
//! All drafts live in a single record addressed by a fixed storage key. The
//! record is a JSON object mapping form sections to their saved values:
//!
//! ```json
//! { "projects": { "projectName": "Dehix", "techUsed": ["Rust"] } }
//! ```
//!
//! `DraftRepository` is the raw key-value seam; `DraftStore` owns the
//! section map on top of it.

use super::error::{DraftError, Result};
use super::snapshot::FormSnapshot;
use serde_json::{Map, Value};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default storage key of the draft record
pub const DEFAULT_STORAGE_KEY: &str = "formDraft";

/// Raw key-value storage holding serialized records
pub trait DraftRepository {
    /// Read a record. Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a record, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a record. Removing a missing record is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Repository keeping one `<key>.json` file per record in a directory
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file. Keys must be plain file names.
    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let is_plain = !key.is_empty()
            && key != ".."
            && !key.contains(['/', '\\'])
            && Path::new(key).components().count() == 1;
        if !is_plain {
            return Err(DraftError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    fn io_error(path: &Path, source: std::io::Error) -> DraftError {
        DraftError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl DraftRepository for FileRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(&self.root, e))?;

        let tmp_path = self.root.join(format!(".{key}-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(|e| Self::io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| Self::io_error(&path, e))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

/// In-memory repository for tests.
///
/// Uses `RefCell` since the application is single-threaded.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

#[cfg(test)]
impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set` and `delete` fail, as a full or disabled storage would
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DraftError::Storage("Simulated write error".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
impl DraftRepository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

/// The section map stored under one key
pub struct DraftStore<R: DraftRepository> {
    repo: R,
    key: String,
}

impl<R: DraftRepository> DraftStore<R> {
    pub fn new(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    #[cfg(test)]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Whether the record exists at all (an empty map is never stored)
    #[cfg(test)]
    pub fn record_exists(&self) -> Result<bool> {
        Ok(self.repo.get(&self.key)?.is_some())
    }

    /// Read the whole section map. A missing or malformed record reads as empty.
    pub fn read(&self) -> Result<Map<String, Value>> {
        let Some(raw) = self.repo.get(&self.key)? else {
            return Ok(Map::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(sections)) => Ok(sections),
            Ok(other) => {
                tracing::warn!(
                    key = %self.key,
                    "Draft record is not an object ({}), ignoring it",
                    json_kind(&other)
                );
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Draft record is malformed, ignoring it: {e}");
                Ok(Map::new())
            }
        }
    }

    /// Write the section map back, removing the record when it is empty
    fn write(&self, sections: &Map<String, Value>) -> Result<()> {
        if sections.is_empty() {
            tracing::debug!(key = %self.key, "Draft record empty, removing it");
            return self.repo.delete(&self.key);
        }
        let content = serde_json::to_string(sections)?;
        self.repo.set(&self.key, &content)
    }

    /// Saved values of one section
    pub fn section(&self, section: &str) -> Result<Option<FormSnapshot>> {
        Ok(match self.read()?.remove(section) {
            Some(Value::Object(values)) => Some(FormSnapshot::from_map(values)),
            Some(_) | None => None,
        })
    }

    pub fn has_section(&self, section: &str) -> Result<bool> {
        Ok(self.section(section)?.is_some())
    }

    /// Names of all sections with a stored draft
    pub fn sections(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Store `values` under `section`, keeping other sections intact
    pub fn put_section(&self, section: &str, values: &FormSnapshot) -> Result<()> {
        let mut sections = self.read()?;
        sections.insert(
            section.to_string(),
            Value::Object(values.clone().into_map()),
        );
        self.write(&sections)?;
        tracing::info!(key = %self.key, section, "Draft saved");
        Ok(())
    }

    /// Remove one section. Returns whether an entry existed.
    pub fn remove_section(&self, section: &str) -> Result<bool> {
        let mut sections = self.read()?;
        let existed = sections.remove(section).is_some();
        self.write(&sections)?;
        if existed {
            tracing::info!(key = %self.key, section, "Draft removed");
        }
        Ok(existed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
