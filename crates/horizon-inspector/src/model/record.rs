//! Concrete record kinds and the storage they come from.
//!
//! A record kind implements [`Inspectable`] to expose its fields by name.
//! The place records live implements [`RecordStore`]: it enumerates the
//! persistent records of one kind, re-reads a record on demand and accepts
//! committed edits. [`MemoryStore`] is a ready-made in-memory store.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use horizon_inspector_core::logging::targets;
use parking_lot::RwLock;

use super::value::FieldValue;
use crate::error::{InspectorError, Result};

/// A record kind whose fields can be shown in a grid.
///
/// # Example
///
/// ```
/// use horizon_inspector::{FieldValue, Inspectable};
///
/// #[derive(Clone)]
/// struct Crate {
///     name: String,
///     mass: f64,
/// }
///
/// impl Inspectable for Crate {
///     const KIND: &'static str = "Crate";
///
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn field_names(&self) -> Vec<String> {
///         vec!["mass".to_string()]
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "mass" => Some(self.mass.into()),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
///         match (name, value) {
///             ("mass", FieldValue::Float(mass)) => {
///                 self.mass = mass;
///                 true
///             }
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Inspectable: Clone + Send + Sync + 'static {
    /// Name of the record kind, as listed by the host.
    const KIND: &'static str;

    /// The record's own name, used as its row's display name.
    fn name(&self) -> &str;

    /// Every visible, inspectable field in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Look up a field by name. `None` means the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Apply an edited value. Returns `false` if the value was rejected.
    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;

    /// Icon key drawn next to the identity label.
    fn icon(&self) -> Option<&str> {
        None
    }
}

/// A record together with the key that identifies it in its store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord<T> {
    pub key: String,
    pub record: T,
}

impl<T: Inspectable> StoredRecord<T> {
    pub fn new(key: impl Into<String>, record: T) -> Self {
        Self {
            key: key.into(),
            record,
        }
    }

    /// The identity column label: the key's file stem, or the record name
    /// when the key has none.
    pub fn label(&self) -> String {
        Path::new(&self.key)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.record.name().to_string())
    }
}

/// Enumeration and persistence for one record kind.
pub trait RecordStore: Send + Sync + 'static {
    type Record: Inspectable;

    /// Every persistent record of this kind, in a stable order.
    fn find_all(&self) -> Vec<StoredRecord<Self::Record>>;

    /// The current persisted state of one record.
    fn load(&self, key: &str) -> Option<Self::Record>;

    /// Write an edited record back.
    fn commit(&self, key: &str, record: &Self::Record) -> Result<()>;
}

/// An in-memory [`RecordStore`].
///
/// Records keep their insertion order. The store can be made read-only to
/// exercise commit failures.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<Vec<StoredRecord<T>>>,
    commits: AtomicUsize,
    read_only: AtomicBool,
}

impl<T: Inspectable> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Inspectable> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            commits: AtomicUsize::new(0),
            read_only: AtomicBool::new(false),
        }
    }

    /// Build a store from `(key, record)` pairs.
    pub fn with_records<K: Into<String>>(records: impl IntoIterator<Item = (K, T)>) -> Self {
        let store = Self::new();
        for (key, record) in records {
            store.insert(key, record);
        }
        store
    }

    /// Add a record, or replace the one stored under `key`.
    pub fn insert(&self, key: impl Into<String>, record: T) {
        let key = key.into();
        let mut records = self.records.write();
        match records.iter_mut().find(|stored| stored.key == key) {
            Some(stored) => stored.record = record,
            None => records.push(StoredRecord { key, record }),
        }
    }

    /// Remove a record. Returns it if it was present.
    pub fn remove(&self, key: &str) -> Option<T> {
        let mut records = self.records.write();
        let position = records.iter().position(|stored| stored.key == key)?;
        Some(records.remove(position).record)
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.load(key)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of successful commits.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl<T: Inspectable> RecordStore for MemoryStore<T> {
    type Record = T;

    fn find_all(&self) -> Vec<StoredRecord<T>> {
        self.records.read().clone()
    }

    fn load(&self, key: &str) -> Option<T> {
        self.records
            .read()
            .iter()
            .find(|stored| stored.key == key)
            .map(|stored| stored.record.clone())
    }

    fn commit(&self, key: &str, record: &T) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(InspectorError::commit(key, "store is read-only"));
        }
        let mut records = self.records.write();
        let stored = records
            .iter_mut()
            .find(|stored| stored.key == key)
            .ok_or_else(|| InspectorError::commit(key, "no record with this key"))?;
        stored.record = record.clone();
        self.commits.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: targets::SOURCE, key, kind = T::KIND, "committed record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        name: String,
        pinned: bool,
    }

    impl Note {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                pinned: false,
            }
        }
    }

    impl Inspectable for Note {
        const KIND: &'static str = "Note";

        fn name(&self) -> &str {
            &self.name
        }

        fn field_names(&self) -> Vec<String> {
            vec!["pinned".to_string()]
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "pinned").then_some(FieldValue::Bool(self.pinned))
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("pinned", FieldValue::Bool(pinned)) => {
                    self.pinned = pinned;
                    true
                }
                _ => false,
            }
        }
    }

    #[test]
    fn test_label_from_key() {
        let stored = StoredRecord::new("notes/groceries.note", Note::new("Shopping"));
        assert_eq!(stored.label(), "groceries");

        let stored = StoredRecord::new("", Note::new("Shopping"));
        assert_eq!(stored.label(), "Shopping");
    }

    #[test]
    fn test_insert_replaces_by_key() {
        let store = MemoryStore::with_records([("a", Note::new("A")), ("b", Note::new("B"))]);
        store.insert("a", Note::new("A2"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").map(|n| n.name), Some("A2".to_string()));
        assert_eq!(store.find_all()[0].key, "a");
    }

    #[test]
    fn test_commit() {
        let store = MemoryStore::with_records([("a", Note::new("A"))]);
        let mut note = store.load("a").unwrap();
        assert!(note.set_field("pinned", FieldValue::Bool(true)));
        store.commit("a", &note).unwrap();

        assert!(store.get("a").unwrap().pinned);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_commit_failures() {
        let store = MemoryStore::with_records([("a", Note::new("A"))]);
        let note = Note::new("A");
        assert!(matches!(
            store.commit("missing", &note),
            Err(InspectorError::Commit { .. })
        ));

        store.set_read_only(true);
        assert!(store.commit("a", &note).is_err());
        assert_eq!(store.commit_count(), 0);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::with_records([("a", Note::new("A"))]);
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }
}
