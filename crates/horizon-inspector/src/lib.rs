//! Horizon Inspector - A searchable, sortable, editable table over any record kind.
//!
//! A record kind implements [`Inspectable`] and is stored behind a
//! [`RecordStore`]. A [`RecordTable`] erases the concrete type into a
//! [`RecordSource`], which a [`GridController`] turns into rows, sorts by
//! column and draws through host-supplied [`CellDelegate`]s.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_inspector::prelude::*;
//!
//! #[derive(Clone)]
//! struct Fruit {
//!     name: String,
//!     mass: f64,
//! }
//!
//! impl Inspectable for Fruit {
//!     const KIND: &'static str = "Fruit";
//!
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     fn field_names(&self) -> Vec<String> {
//!         vec!["mass".into()]
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldValue> {
//!         (name == "mass").then_some(FieldValue::Float(self.mass))
//!     }
//!
//!     fn set_field(&mut self, _name: &str, _value: FieldValue) -> bool {
//!         false
//!     }
//! }
//!
//! let store = Arc::new(MemoryStore::with_records([
//!     ("apple.fruit", Fruit { name: "Apple".into(), mass: 2.0 }),
//!     ("banana.fruit", Fruit { name: "Banana".into(), mass: 1.0 }),
//! ]));
//! let mut grid = GridController::new(
//!     Box::new(RecordTable::new(store)),
//!     InspectorConfig::default(),
//! );
//! grid.activate()?;
//! grid.toggle_sort(1)?;
//! assert_eq!(grid.row_names(), vec!["Banana", "Apple"]);
//! # Ok::<(), InspectorError>(())
//! ```

pub mod config;
pub mod error;
pub mod inspector;
pub mod model;
pub mod prelude;
pub mod registry;
pub mod view;

pub use horizon_inspector_core::{ConnectionGuard, ConnectionId, PerfSpan, Point, Rect, Signal, Size};

pub use config::{ColumnDefaults, GridConfig, InspectorConfig};
pub use error::{InspectorError, Result};
pub use inspector::{InspectorFrame, PLACEHOLDER_TEXT, TableInspector};
pub use model::{
    CellDelegate, CellOption, CellState, ColumnHeader, DefaultCellDelegate, DelegateSet,
    EnumValue, FieldValue, HeaderState, Inspectable, ListElement, ListModel, MemoryStore,
    ObjectRef, RecordSelection, RecordSource, RecordStore, RecordTable, SortEngine, SortKey,
    SortOrder, SortSelection, SortType, StoredRecord,
};
pub use registry::{SourceEntry, SourceRegistry, global_registry, register_source};
pub use view::{DrawReport, GridController, GridState};
