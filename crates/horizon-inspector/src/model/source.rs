//! The type-erased record source interface.
//!
//! A [`RecordSource`] is everything the grid knows about one record kind.
//! The grid never sees concrete records: it holds row ids and asks the
//! source for column metadata, typed cell values and edit brackets by
//! `(record index, column)`.
//!
//! Column 0 is always the identity column (the record's label and icon).
//! Columns `1..column_count()` are the declared or discovered fields.

use horizon_inspector_core::{Rect, Signal};

use super::delegate::{CellState, DelegateSet};
use super::element::ListElement;
use super::header::HeaderState;
use super::value::{FieldValue, SortType};
use crate::config::ColumnDefaults;
use crate::error::Result;

/// Emitted when the user activates (double-clicks) a record's row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSelection {
    /// Record kind name.
    pub kind: String,
    pub record: usize,
    /// Storage key of the record.
    pub key: String,
    pub name: String,
}

/// Capability set over the cached records of one kind.
///
/// All reads are index based and fail fast: wrong types and absent fields
/// are `InvalidAccess`, bad indices are `InvalidArgument`. Implementations
/// bump [`generation`](Self::generation) on every [`cache`](Self::cache) so
/// rows built before a refresh can be recognized by
/// [`resolve`](Self::resolve).
pub trait RecordSource: Send + Sync {
    /// Name of the record kind.
    fn name(&self) -> &str;

    /// Enumerate the records and derive the column set.
    ///
    /// Returns the number of records. Zero records is not an error.
    fn cache(&mut self) -> Result<usize>;

    /// Counter incremented by every `cache()`.
    fn generation(&self) -> u64;

    fn record_count(&self) -> usize;

    /// Number of columns including the identity column.
    fn column_count(&self) -> usize;

    /// The field name behind a column. The identity column has none.
    fn column_name(&self, column: usize) -> Option<&str>;

    /// Sort type of a column, sampled from the first record.
    ///
    /// The identity column reports `String`, unknown columns `Invalid`.
    fn sort_type(&self, column: usize) -> SortType;

    /// Map a row id from a list model of `generation` to a record index.
    fn resolve(&self, row_id: usize, generation: u64) -> Result<usize>;

    /// Label and icon drawn in the identity column.
    fn identity(&self, record: usize) -> Result<(String, Option<String>)>;

    /// The value of one field. Column 0 yields the identity label.
    fn cell_value(&self, record: usize, column: usize) -> Result<FieldValue>;

    fn cell_text(&self, record: usize, column: usize) -> Result<String>;
    fn cell_float(&self, record: usize, column: usize) -> Result<f64>;
    fn cell_bool(&self, record: usize, column: usize) -> Result<bool>;
    fn cell_int(&self, record: usize, column: usize) -> Result<i64>;
    fn cell_enum_label(&self, record: usize, column: usize) -> Result<String>;
    /// Name of the referenced record, `None` if the reference is unassigned.
    fn cell_object_ref_name(&self, record: usize, column: usize) -> Result<Option<String>>;

    /// Open an edit bracket: refresh the record from its store and start a
    /// working copy.
    fn begin_edit(&mut self, record: usize) -> Result<()>;

    /// Draw one cell through `delegates`, applying any change to the
    /// working copy. Returns whether the delegate reported a change.
    fn draw_cell(
        &mut self,
        rect: Rect,
        record: usize,
        column: usize,
        state: CellState,
        delegates: &DelegateSet,
    ) -> Result<bool>;

    /// Close the bracket. Returns `true` if the record changed, in which
    /// case the change has been committed.
    fn end_edit(&mut self, record: usize) -> Result<bool>;

    /// Header metadata for the cached column set.
    fn build_column_headers(&self, defaults: &ColumnDefaults) -> HeaderState;

    /// The synthetic root followed by one row per cached record.
    fn generate_rows(&self) -> Vec<ListElement>;

    /// Hand a record to the host as the current selection.
    fn select_record(&self, record: usize);

    /// Emitted by [`select_record`](Self::select_record).
    fn record_selected(&self) -> &Signal<RecordSelection>;
}
