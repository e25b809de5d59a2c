//! Model layer: records, sources, list models, sorting and delegates.
//!
//! # Core Components
//!
//! - [`Inspectable`]: A concrete record kind with named fields
//! - [`RecordStore`]: Enumeration and persistence for one kind
//! - [`RecordSource`]: The type-erased interface a grid talks to
//! - [`RecordTable`]: The generic `RecordSource` over a store
//! - [`ListModel`]: The immutable row set of one activation
//! - [`SortEngine`]: Stable multi-key sorting by column sort type
//! - [`CellDelegate`]: The boundary to the host's cell widgets
//!
//! # Data flow
//!
//! ```text
//! RecordStore ──cache()──> RecordTable ──generate_rows()──> ListModel
//!                              │                                │
//!                      typed cell reads               build_rows(search)
//!                              │                                │
//!                              └──────────> SortEngine <────────┘
//! ```

mod delegate;
mod element;
mod header;
mod list_model;
mod natural;
mod record;
mod rows;
mod sort;
mod source;
mod table;
mod value;

pub use delegate::{
    CellDelegate, CellOption, CellState, DefaultCellDelegate, DelegateSet,
    INVALID_PROPERTY_MESSAGE,
};
pub use element::{ListElement, ROOT_DEPTH, ROOT_ID};
pub use header::{ColumnHeader, HeaderState, nicify_name};
pub use list_model::ListModel;
pub use natural::natural_cmp;
pub use record::{Inspectable, MemoryStore, RecordStore, StoredRecord};
pub use rows::{build_rows, search_rows};
pub use sort::{Comparator, ComparatorTable, SortEngine, SortKey, SortOrder, SortSelection};
pub use source::{RecordSelection, RecordSource};
pub use table::RecordTable;
pub use value::{EnumValue, FieldValue, ObjectRef, SortType};
