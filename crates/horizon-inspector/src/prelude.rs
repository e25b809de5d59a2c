//! Prelude module for Horizon Inspector.
//!
//! ```ignore
//! use horizon_inspector::prelude::*;
//! ```
//!
//! This provides access to:
//! - Record definitions (`Inspectable`, `FieldValue`, `RecordStore`)
//! - The type-erased source and its generic table (`RecordSource`, `RecordTable`)
//! - Grid and inspector controllers
//! - Cell delegates and geometry

// ============================================================================
// Records
// ============================================================================

pub use crate::model::{
    EnumValue, FieldValue, Inspectable, MemoryStore, ObjectRef, RecordStore, SortType,
    StoredRecord,
};

// ============================================================================
// Sources and Sorting
// ============================================================================

pub use crate::model::{RecordSelection, RecordSource, RecordTable, SortKey, SortOrder, SortSelection};

// ============================================================================
// Controllers
// ============================================================================

pub use crate::inspector::{InspectorFrame, TableInspector};
pub use crate::registry::{SourceEntry, SourceRegistry, register_source};
pub use crate::view::{DrawReport, GridController, GridState};

// ============================================================================
// Drawing
// ============================================================================

pub use crate::model::{CellDelegate, CellOption, CellState, DelegateSet};
pub use horizon_inspector_core::{Point, Rect, Signal};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::InspectorConfig;
pub use crate::error::InspectorError;
