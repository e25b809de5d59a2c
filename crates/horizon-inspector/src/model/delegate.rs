//! Cell delegates: the boundary to the host's cell widgets.
//!
//! The engine never paints anything itself. For every cell of a draw pass
//! it hands a [`CellOption`] and the cell's current [`FieldValue`] to the
//! [`CellDelegate`] registered for the cell's [`SortType`]. A delegate that
//! lets the user change the value writes the new value back and returns
//! `true`. The engine applies it to the record being edited.
//!
//! Delegates take `&self`. Hosts that keep per-cell editor state use
//! interior mutability.

use std::collections::HashMap;
use std::sync::Arc;

use horizon_inspector_core::Rect;

use super::value::{FieldValue, SortType};

/// Placeholder text for a declared column the record does not have.
pub const INVALID_PROPERTY_MESSAGE: &str = "Invalid Property";

/// Visual state of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    /// The row is the selected row.
    pub selected: bool,
    /// The row is an alternate row (for alternating row colors).
    pub alternate: bool,
    /// An edit bracket is open for the row's record.
    pub editing: bool,
    /// The grid draws cell borders.
    pub bordered: bool,
}

impl CellState {
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    pub fn with_editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn with_bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }
}

/// Everything a delegate needs to know about the cell it is drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct CellOption {
    pub rect: Rect,
    pub record: usize,
    pub column: usize,
    pub sort_type: SortType,
    pub state: CellState,
}

impl CellOption {
    pub fn new(rect: Rect, record: usize, column: usize) -> Self {
        Self {
            rect,
            record,
            column,
            sort_type: SortType::String,
            state: CellState::default(),
        }
    }

    pub fn with_sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    pub fn with_state(mut self, state: CellState) -> Self {
        self.state = state;
        self
    }

    /// Id of the row this cell belongs to.
    #[inline]
    pub fn row_id(&self) -> usize {
        self.record + 1
    }
}

/// Draws cells of one value type and reports user edits.
pub trait CellDelegate: Send + Sync {
    /// Draw an editable value. Returns `true` if the user changed `value`.
    fn draw(&self, option: &CellOption, value: &mut FieldValue) -> bool;

    /// Draw a read-only label, such as the identity column.
    fn draw_label(&self, option: &CellOption, text: &str, icon: Option<&str>) {
        let _ = (option, text, icon);
    }

    /// Draw a placeholder for a cell that could not be read.
    fn draw_invalid(&self, option: &CellOption, message: &str) {
        let _ = (option, message);
    }
}

/// A delegate that draws nothing and never edits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCellDelegate;

impl CellDelegate for DefaultCellDelegate {
    fn draw(&self, _option: &CellOption, _value: &mut FieldValue) -> bool {
        false
    }
}

/// The delegates a grid draws with, one per sort type.
///
/// Types without a registered delegate use the fallback, which also draws
/// labels and placeholders.
#[derive(Clone)]
pub struct DelegateSet {
    fallback: Arc<dyn CellDelegate>,
    by_type: HashMap<SortType, Arc<dyn CellDelegate>>,
}

impl Default for DelegateSet {
    fn default() -> Self {
        Self::new(Arc::new(DefaultCellDelegate))
    }
}

impl std::fmt::Debug for DelegateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateSet")
            .field("types", &self.by_type.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl DelegateSet {
    pub fn new(fallback: Arc<dyn CellDelegate>) -> Self {
        Self {
            fallback,
            by_type: HashMap::new(),
        }
    }

    /// Register the delegate for one sort type.
    pub fn with_delegate(mut self, sort_type: SortType, delegate: Arc<dyn CellDelegate>) -> Self {
        self.set_delegate(sort_type, delegate);
        self
    }

    pub fn set_delegate(&mut self, sort_type: SortType, delegate: Arc<dyn CellDelegate>) {
        self.by_type.insert(sort_type, delegate);
    }

    /// The delegate that draws values of `sort_type`.
    pub fn delegate_for(&self, sort_type: SortType) -> &dyn CellDelegate {
        self.by_type
            .get(&sort_type)
            .map(|delegate| &**delegate)
            .unwrap_or(&*self.fallback)
    }

    /// The delegate that draws labels and placeholders.
    pub fn fallback(&self) -> &dyn CellDelegate {
        &*self.fallback
    }
}
