//! Column headers and the active sort selection.

use horizon_inspector_core::Signal;
use horizon_inspector_core::logging::targets;

use super::sort::{SortKey, SortOrder, SortSelection};
use super::value::SortType;
use crate::config::{ColumnDefaults, DEFAULT_COLUMN_WIDTH};
use crate::error::{InspectorError, Result};

/// Header metadata of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
    pub label: String,
    /// Text shown for the column in the visibility context menu.
    pub context_menu_text: String,
    pub sort_type: SortType,
    pub width: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Direction used when the column first becomes a sort key.
    pub sorted_ascending: bool,
    pub auto_resize: bool,
    pub allow_toggle_visibility: bool,
    pub visible: bool,
}

impl ColumnHeader {
    /// A header with the configured width bounds.
    ///
    /// Bounds that are not finite or not ordered are repaired rather than
    /// trusted, so hand-built defaults cannot make layout panic.
    pub fn new(label: impl Into<String>, sort_type: SortType, defaults: &ColumnDefaults) -> Self {
        let label = label.into();
        let (min_width, max_width) = width_bounds(defaults.min_width, defaults.max_width);
        let width = if defaults.width.is_finite() {
            defaults.width
        } else {
            DEFAULT_COLUMN_WIDTH
        };
        Self {
            context_menu_text: label.clone(),
            label,
            sort_type,
            width: width.clamp(min_width, max_width),
            min_width,
            max_width,
            sorted_ascending: defaults.sorted_ascending,
            auto_resize: defaults.auto_resize,
            allow_toggle_visibility: defaults.allow_toggle_visibility,
            visible: true,
        }
    }

    pub fn with_context_menu_text(mut self, text: impl Into<String>) -> Self {
        self.context_menu_text = text.into();
        self
    }

    fn initial_order(&self) -> SortOrder {
        SortOrder::from_ascending(self.sorted_ascending)
    }

    /// `width` limited to this column's bounds. NaN becomes the minimum.
    pub fn clamp_width(&self, width: f32) -> f32 {
        let (min, max) = width_bounds(self.min_width, self.max_width);
        if width.is_nan() { min } else { width.clamp(min, max) }
    }
}

/// Finite, non-negative, ordered `(min, max)` width bounds.
fn width_bounds(min: f32, max: f32) -> (f32, f32) {
    let min = if min.is_finite() { min.max(0.0) } else { 0.0 };
    let max = if max.is_finite() { max.max(min) } else { f32::MAX };
    (min, max)
}

/// Turn a field name into a header label.
///
/// Strips the `m_`, `k` and `_` prefixes, splits words at case changes,
/// digits and underscores, and capitalizes the first letter:
/// `m_BodyType` becomes `Body Type`, `maxHP` becomes `Max HP`.
pub fn nicify_name(raw: &str) -> String {
    let mut name = raw.strip_prefix("m_").unwrap_or(raw);
    if let Some(rest) = name.strip_prefix('k') {
        if rest.starts_with(|c: char| c.is_uppercase()) {
            name = rest;
        }
    }
    let name = name.trim_start_matches('_');

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            continue;
        }
        if i > 0 && !out.is_empty() && !out.ends_with(' ') {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let word_start = c.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
            let number_start = c.is_ascii_digit() && prev.is_alphabetic();
            if word_start || number_start {
                out.push(' ');
            }
        }
        if out.is_empty() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    if out.is_empty() { raw.to_string() } else { out }
}

/// Column headers plus the active sort selection.
///
/// # Signals
///
/// - `sorting_changed(SortSelection)`: Emitted whenever the selection changes
pub struct HeaderState {
    columns: Vec<ColumnHeader>,
    sort: SortSelection,
    pub sorting_changed: Signal<SortSelection>,
}

impl std::fmt::Debug for HeaderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderState")
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl HeaderState {
    pub fn new(columns: Vec<ColumnHeader>) -> Self {
        Self {
            columns,
            sort: SortSelection::default(),
            sorting_changed: Signal::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnHeader] {
        &self.columns
    }

    pub fn column(&self, column: usize) -> Option<&ColumnHeader> {
        self.columns.get(column)
    }

    /// Header labels in column order.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Indices of the visible columns, in column order.
    pub fn visible_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Show or hide a column. Returns `false` if the change is not allowed:
    /// the column does not allow toggling, or it is the last visible one.
    pub fn set_column_visible(&mut self, column: usize, visible: bool) -> bool {
        let visible_count = self.columns.iter().filter(|c| c.visible).count();
        let Some(header) = self.columns.get_mut(column) else {
            return false;
        };
        if header.visible == visible {
            return true;
        }
        if !header.allow_toggle_visibility || (!visible && visible_count <= 1) {
            return false;
        }
        header.visible = visible;
        true
    }

    /// Resize a column, clamped to its bounds. Returns the applied width.
    pub fn set_column_width(&mut self, column: usize, width: f32) -> Option<f32> {
        let header = self.columns.get_mut(column)?;
        header.width = header.clamp_width(width);
        Some(header.width)
    }

    /// Total width of the visible columns.
    pub fn total_width(&self) -> f32 {
        self.columns.iter().filter(|c| c.visible).map(|c| c.width).sum()
    }

    /// Scale the visible auto-resize columns so the header spans `available`
    /// pixels, as far as the columns' bounds allow.
    pub fn resize_to_fit(&mut self, available: f32) {
        let fixed: f32 = self
            .columns
            .iter()
            .filter(|c| c.visible && !c.auto_resize)
            .map(|c| c.width)
            .sum();
        let flexible: f32 = self
            .columns
            .iter()
            .filter(|c| c.visible && c.auto_resize)
            .map(|c| c.width)
            .sum();
        if flexible <= 0.0 {
            return;
        }

        let scale = ((available - fixed) / flexible).max(0.0);
        for header in self.columns.iter_mut().filter(|c| c.visible && c.auto_resize) {
            header.width = header.clamp_width(header.width * scale);
        }
    }

    /// `(column, x, width)` of each visible column, laid out from `origin_x`.
    pub fn layout(&self, origin_x: f32) -> Vec<(usize, f32, f32)> {
        let mut x = origin_x;
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, c)| {
                let cell = (i, x, c.width);
                x += c.width;
                cell
            })
            .collect()
    }

    pub fn sort_selection(&self) -> &SortSelection {
        &self.sort
    }

    /// The primary sort column.
    pub fn sorted_column(&self) -> Option<usize> {
        self.sort.primary().map(|key| key.column)
    }

    /// Header click: the primary column flips direction, any other column
    /// becomes the only sort key in its initial direction.
    pub fn toggle_sort(&mut self, column: usize) -> Result<()> {
        let header = self.checked(column)?;
        let order = match self.sort.primary() {
            Some(key) if key.column == column => key.order.reversed(),
            _ => header.initial_order(),
        };
        self.apply(SortSelection::single(column, order));
        Ok(())
    }

    /// Modified header click: add `column` as the lowest-priority key, or
    /// flip its direction if it already is a key.
    pub fn push_sort_key(&mut self, column: usize) -> Result<()> {
        let initial = self.checked(column)?.initial_order();
        let mut keys = self.sort.keys().to_vec();
        match keys.iter_mut().find(|key| key.column == column) {
            Some(key) => key.order = key.order.reversed(),
            None => keys.push(SortKey::new(column, initial)),
        }
        self.apply(SortSelection::new(keys));
        Ok(())
    }

    /// Replace the whole selection. Every key must name an existing column.
    pub fn set_sort_selection(&mut self, selection: SortSelection) -> Result<()> {
        for key in selection.keys() {
            self.checked(key.column)?;
        }
        self.apply(selection);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.apply(SortSelection::default());
    }

    fn checked(&self, column: usize) -> Result<&ColumnHeader> {
        self.columns.get(column).ok_or_else(|| {
            InspectorError::invalid_argument(format!(
                "sort column {} out of range ({} columns)",
                column,
                self.columns.len()
            ))
        })
    }

    fn apply(&mut self, selection: SortSelection) {
        if self.sort == selection {
            return;
        }
        tracing::debug!(target: targets::GRID, keys = ?selection.keys(), "sort selection changed");
        self.sort = selection;
        self.sorting_changed.emit(self.sort.clone());
    }
}
