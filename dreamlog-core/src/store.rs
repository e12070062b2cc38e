//! Journal storage
//!
//! The analysis engine never touches storage; it is handed a materialised
//! `&[DreamRecord]` snapshot. This module is the collaborator that produces
//! and persists those snapshots.
//!
//! [`JsonFileStore`] keeps the whole journal as one pretty-printed JSON
//! array. Writes go to a sibling temp file first and are then renamed over
//! the journal, so readers never see a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::sentiment::SentimentClassifier;
use crate::error::{Error, Result};
use crate::types::{DreamRecord, NewDream};

/// Whole-collection persistence for dream records.
pub trait DreamStore {
    /// Every stored record, in stored order.
    fn load_all(&self) -> Result<Vec<DreamRecord>>;

    /// Replace the stored collection.
    fn save_all(&self, records: &[DreamRecord]) -> Result<()>;
}

/// JSON-array journal on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dreams.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DreamStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<DreamRecord>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No journal yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<DreamRecord> = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded journal"
        );
        Ok(records)
    }

    fn save_all(&self, records: &[DreamRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Saved journal"
        );
        Ok(())
    }
}

/// Validate, create and append a new dream, then persist the journal.
pub fn add_dream(
    store: &dyn DreamStore,
    new: NewDream,
    classifier: &SentimentClassifier,
) -> Result<DreamRecord> {
    let record = DreamRecord::create(new, classifier)?;
    let mut records = store.load_all()?;
    records.push(record.clone());
    store.save_all(&records)?;

    tracing::info!(
        id = record.id(),
        emotion = record.emotion(),
        sentiment = %record.sentiment_label(),
        "Recorded dream"
    );
    Ok(record)
}

/// Remove a dream by id (whole-record removal) and persist the journal.
pub fn delete_dream(store: &dyn DreamStore, id: &str) -> Result<DreamRecord> {
    let mut records = store.load_all()?;
    let position = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| Error::DreamNotFound(id.to_string()))?;
    let removed = records.remove(position);
    store.save_all(&records)?;

    tracing::info!(id, "Deleted dream");
    Ok(removed)
}

/// Find a dream by exact id or, failing that, a unique id prefix.
pub fn find_dream<'a>(records: &'a [DreamRecord], id: &str) -> Result<&'a DreamRecord> {
    if let Some(record) = records.iter().find(|r| r.id() == id) {
        return Ok(record);
    }
    let mut matches = records.iter().filter(|r| !id.is_empty() && r.id().starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record),
        (Some(_), Some(_)) => Err(Error::Validation(format!(
            "dream id prefix '{}' is ambiguous",
            id
        ))),
        _ => Err(Error::DreamNotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("nested").join("dreams.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let classifier = SentimentClassifier::default();

        let a = add_dream(&store, NewDream::new("One", "a lovely day", "Happy"), &classifier)
            .unwrap();
        let b = add_dream(&store, NewDream::new("Two", "a dark cave", "Scared"), &classifier)
            .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![a, b]);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_invalid_dream_not_saved() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let result = add_dream(
            &store,
            NewDream::new("", "desc", "Happy"),
            &SentimentClassifier::default(),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let classifier = SentimentClassifier::default();
        let a = add_dream(&store, NewDream::new("One", "x", "Happy"), &classifier).unwrap();
        let b = add_dream(&store, NewDream::new("Two", "y", "Sad"), &classifier).unwrap();

        let removed = delete_dream(&store, a.id()).unwrap();
        assert_eq!(removed.id(), a.id());
        assert_eq!(store.load_all().unwrap(), vec![b]);

        assert!(matches!(
            delete_dream(&store, a.id()),
            Err(Error::DreamNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_journal_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load_all(), Err(Error::Json(_))));
    }

    #[test]
    fn test_find_dream_by_prefix() {
        let classifier = SentimentClassifier::default();
        let records = vec![
            DreamRecord::create(NewDream::new("One", "x", "Happy"), &classifier).unwrap(),
            DreamRecord::create(NewDream::new("Two", "y", "Sad"), &classifier).unwrap(),
        ];
        let id = records[1].id().to_string();
        assert_eq!(find_dream(&records, &id).unwrap().title(), "Two");
        assert_eq!(find_dream(&records, &id[..8]).unwrap().title(), "Two");
        assert!(matches!(
            find_dream(&records, "zzzz"),
            Err(Error::DreamNotFound(_))
        ));
        assert!(find_dream(&records, "").is_err());
    }
}
