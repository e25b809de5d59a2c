//! Registry of inspectable record kinds.
//!
//! Each [`SourceEntry`] names a record kind and knows how to build a fresh
//! [`RecordSource`] for it. Entries are only ever appended, so an index
//! handed out by [`SourceRegistry::register`] stays valid for the life of
//! the registry.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_inspector::{SourceEntry, SourceRegistry};
//! # use horizon_inspector::{FieldValue, Inspectable, MemoryStore};
//! # #[derive(Clone)]
//! # struct Tree { name: String }
//! # impl Inspectable for Tree {
//! #     const KIND: &'static str = "Tree";
//! #     fn name(&self) -> &str { &self.name }
//! #     fn field_names(&self) -> Vec<String> { Vec::new() }
//! #     fn field(&self, _: &str) -> Option<FieldValue> { None }
//! #     fn set_field(&mut self, _: &str, _: FieldValue) -> bool { false }
//! # }
//!
//! let registry = SourceRegistry::new();
//! let store = Arc::new(MemoryStore::<Tree>::new());
//! registry.register(SourceEntry::for_store(store, Vec::<String>::new()));
//! assert_eq!(registry.names(), vec!["Tree".to_string()]);
//! ```

use std::sync::{Arc, OnceLock};

use horizon_inspector_core::logging::targets;
use parking_lot::RwLock;

use crate::model::{Inspectable, RecordSource, RecordStore, RecordTable};

type SourceFactory = dyn Fn() -> Box<dyn RecordSource> + Send + Sync;

/// A named record source factory.
pub struct SourceEntry {
    name: String,
    factory: Arc<SourceFactory>,
}

impl std::fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SourceEntry {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn RecordSource> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    /// An entry building a [`RecordTable`] over `store`. An empty column
    /// list discovers the columns from the first record.
    pub fn for_store<S, C>(store: Arc<S>, columns: impl IntoIterator<Item = C>) -> Self
    where
        S: RecordStore,
        C: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let name = <S::Record as Inspectable>::KIND;
        Self::new(name, move || -> Box<dyn RecordSource> {
            Box::new(RecordTable::with_columns(store.clone(), columns.clone()))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a new, uncached source.
    pub fn create(&self) -> Box<dyn RecordSource> {
        (self.factory)()
    }
}

/// Append-only list of source entries.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    entries: RwLock<Vec<Arc<SourceEntry>>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns its index.
    ///
    /// Names are not required to be unique; each registration is its own
    /// entry.
    pub fn register(&self, entry: SourceEntry) -> usize {
        let mut entries = self.entries.write();
        tracing::debug!(target: targets::REGISTRY, name = entry.name(), index = entries.len(), "record source registered");
        entries.push(Arc::new(entry));
        entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Arc<SourceEntry>> {
        self.entries.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    /// A snapshot of the current entries.
    pub fn entries(&self) -> Vec<Arc<SourceEntry>> {
        self.entries.read().clone()
    }
}

static GLOBAL_REGISTRY: OnceLock<SourceRegistry> = OnceLock::new();

/// The process-wide registry, created on first use.
pub fn global_registry() -> &'static SourceRegistry {
    GLOBAL_REGISTRY.get_or_init(SourceRegistry::new)
}

/// Register an entry with the [`global_registry`].
pub fn register_source(entry: SourceEntry) -> usize {
    global_registry().register(entry)
}

static_assertions::assert_impl_all!(SourceRegistry: Send, Sync);
static_assertions::assert_impl_all!(SourceEntry: Send, Sync);
