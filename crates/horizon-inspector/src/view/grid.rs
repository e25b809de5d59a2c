//! The grid controller: activation, row building, sorting and the draw pass.
//!
//! A [`GridController`] owns one [`RecordSource`] and drives it through a
//! small state machine:
//!
//! ```text
//! Uninitialized ──activate()──> Cached ──rows built──> Live
//!       ^                                               │
//!       └──────────────────deactivate()─────────────────┘
//! ```
//!
//! While `Live`, every [`draw`](GridController::draw) call walks the visible
//! rows and brackets each one with `begin_edit` / `draw_cell`* / `end_edit`.
//! A bracket that commits a change immediately rebuilds and re-sorts the
//! rows, so the next frame shows the record in its new position.

use horizon_inspector_core::logging::{span_names, targets};
use horizon_inspector_core::{PerfSpan, Point, Rect, Signal};

use crate::config::InspectorConfig;
use crate::error::{InspectorError, Result};
use crate::model::{
    CellOption, CellState, ColumnHeader, DelegateSet, HeaderState, ListElement, ListModel,
    RecordSource, SortEngine, SortSelection, SortType, build_rows,
};

/// Lifecycle state of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridState {
    /// No data: nothing is cached or drawn.
    #[default]
    Uninitialized,
    /// Records, list model and headers are built; rows are not yet.
    Cached,
    /// Rows are built and the grid draws.
    Live,
}

/// What one draw pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawReport {
    pub rows_drawn: usize,
    pub cells_drawn: usize,
    /// Cells drawn as an error placeholder.
    pub invalid_cells: usize,
    /// Rows whose edit bracket failed to open or close.
    pub failed_rows: usize,
    /// Record indices committed during the pass, in order.
    pub committed: Vec<usize>,
    /// The rows were rebuilt after a commit.
    pub resorted: bool,
}

/// Binds one record source to a searchable, sortable, editable grid.
///
/// # Signals
///
/// - `rows_rebuilt(usize)`: Emitted with the row count whenever the visible rows are rebuilt
/// - `record_committed(usize)`: Emitted with the record index after a committed edit
pub struct GridController {
    source: Box<dyn RecordSource>,
    config: InspectorConfig,
    state: GridState,
    model: Option<ListModel>,
    header: Option<HeaderState>,
    engine: Option<SortEngine>,
    rows: Vec<ListElement>,
    search: String,
    selected: Option<usize>,
    scroll_offset: f32,
    fitted: bool,
    notice: Option<InspectorError>,

    pub rows_rebuilt: Signal<usize>,
    pub record_committed: Signal<usize>,
}

impl std::fmt::Debug for GridController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("source", &self.source.name())
            .field("state", &self.state)
            .field("rows", &self.rows.len())
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl GridController {
    pub fn new(source: Box<dyn RecordSource>, config: InspectorConfig) -> Self {
        Self {
            source,
            config,
            state: GridState::Uninitialized,
            model: None,
            header: None,
            engine: None,
            rows: Vec::new(),
            search: String::new(),
            selected: None,
            scroll_offset: 0.0,
            fitted: false,
            notice: None,
            rows_rebuilt: Signal::new(),
            record_committed: Signal::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&ListModel> {
        self.model.as_ref()
    }

    pub fn header(&self) -> Option<&HeaderState> {
        self.header.as_ref()
    }

    /// Mutable header access for column widths and visibility. Sort changes
    /// go through [`toggle_sort`](Self::toggle_sort) and friends so the rows
    /// follow.
    pub fn header_mut(&mut self) -> Option<&mut HeaderState> {
        self.header.as_mut()
    }

    /// The visible rows, in display order.
    pub fn rows(&self) -> &[ListElement] {
        &self.rows
    }

    /// Display names of the visible rows, in display order.
    pub fn row_names(&self) -> Vec<&str> {
        self.rows.iter().map(ListElement::name).collect()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// A non-fatal condition from the last activation, such as an empty
    /// record set.
    pub fn notice(&self) -> Option<&InspectorError> {
        self.notice.as_ref()
    }

    pub fn sort_selection(&self) -> SortSelection {
        self.header
            .as_ref()
            .map(|header| header.sort_selection().clone())
            .unwrap_or_default()
    }

    /// Cache the source and build everything the grid draws from.
    ///
    /// An empty record set is not an error: the grid goes `Live` with no
    /// rows and [`notice`](Self::notice) reports it. Other failures leave
    /// the grid `Live` with no rows and are returned.
    pub fn activate(&mut self) -> Result<()> {
        if self.state != GridState::Uninitialized {
            self.deactivate();
        }
        let _perf = PerfSpan::new(span_names::ACTIVATE);

        if let Err(err) = self.build() {
            tracing::warn!(target: targets::GRID, source = self.source.name(), error = %err, "grid activation failed");
            self.enter_empty();
            return Err(err);
        }

        self.rebuild_rows();
        self.state = GridState::Live;
        tracing::debug!(target: targets::GRID, source = self.source.name(), rows = self.rows.len(), "grid live");
        Ok(())
    }

    fn build(&mut self) -> Result<()> {
        let count = self.source.cache()?;
        let model = ListModel::new(self.source.generate_rows(), self.source.generation())?;
        let header = self.source.build_column_headers(&self.config.columns);
        let engine = SortEngine::new(self.source.as_ref());

        self.model = Some(model);
        self.header = Some(header);
        self.engine = Some(engine);
        self.state = GridState::Cached;

        if count == 0 {
            let notice = InspectorError::empty(self.source.name());
            tracing::info!(target: targets::GRID, "{}", notice);
            self.notice = Some(notice);
        }
        Ok(())
    }

    fn enter_empty(&mut self) {
        let identity = ColumnHeader::new(
            self.config.columns.identity_label.clone(),
            SortType::String,
            &self.config.columns,
        );
        self.model = Some(ListModel::default());
        self.header = Some(HeaderState::new(vec![identity]));
        self.engine = None;
        self.rows.clear();
        self.selected = None;
        self.state = GridState::Live;
    }

    /// Discard the list model, rows, headers and sort engine.
    pub fn deactivate(&mut self) {
        self.state = GridState::Uninitialized;
        self.model = None;
        self.header = None;
        self.engine = None;
        self.rows.clear();
        self.selected = None;
        self.scroll_offset = 0.0;
        self.fitted = false;
        self.notice = None;
    }

    /// Re-cache the record set, keeping the search and, where the columns
    /// still exist, the sort selection and row selection.
    pub fn refresh(&mut self) -> Result<()> {
        let selection = self.sort_selection();
        let selected = self.selected;
        let scroll_offset = self.scroll_offset;

        self.activate()?;

        if let Some(header) = self.header.as_mut() {
            if header.set_sort_selection(selection).is_ok() {
                self.rebuild_rows();
            }
        }
        if let Some(id) = selected {
            self.select_row(Some(id));
        }
        self.scroll_offset = scroll_offset;
        Ok(())
    }

    /// Change the search string. The empty string shows every row.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search == self.search {
            return;
        }
        self.search = search;
        if self.state == GridState::Live {
            self.rebuild_rows();
        }
    }

    /// Header click on `column`.
    pub fn toggle_sort(&mut self, column: usize) -> Result<()> {
        self.active_header()?.toggle_sort(column)?;
        self.on_sorting_changed();
        Ok(())
    }

    /// Add `column` as a secondary sort key, or flip it if already a key.
    pub fn push_sort_key(&mut self, column: usize) -> Result<()> {
        self.active_header()?.push_sort_key(column)?;
        self.on_sorting_changed();
        Ok(())
    }

    pub fn set_sort_selection(&mut self, selection: SortSelection) -> Result<()> {
        self.active_header()?.set_sort_selection(selection)?;
        self.on_sorting_changed();
        Ok(())
    }

    /// Return to enumeration order.
    pub fn clear_sort(&mut self) -> Result<()> {
        self.active_header()?.clear_sort();
        self.on_sorting_changed();
        Ok(())
    }

    fn active_header(&mut self) -> Result<&mut HeaderState> {
        self.header
            .as_mut()
            .ok_or_else(|| InspectorError::invalid_argument("grid is not active"))
    }

    fn on_sorting_changed(&mut self) {
        if self.state == GridState::Live {
            self.rebuild_rows();
        }
    }

    /// Rebuild the visible rows from the list model: search, then sort.
    fn rebuild_rows(&mut self) {
        let Some(model) = &self.model else {
            return;
        };
        let mut rows = build_rows(model, Some(&self.search));

        if let (Some(engine), Some(header)) = (&self.engine, &self.header) {
            if let Err(err) = engine.sort(
                &mut rows,
                header.sort_selection(),
                self.source.as_ref(),
                model.generation(),
            ) {
                tracing::warn!(target: targets::GRID, error = %err, "sort failed, keeping search order");
            }
        }

        self.rows = rows;
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|row| row.id() == id) {
                self.selected = None;
            }
        }
        self.rows_rebuilt.emit(self.rows.len());
    }

    /// The header strip at the top of `area`.
    pub fn header_rect(&self, area: Rect) -> Rect {
        let height = self.config.grid.header_height.min(area.height());
        Rect::new(area.left(), area.top(), area.width(), height)
    }

    /// The part of `area` below the header strip, where rows are drawn.
    pub fn body_rect(&self, area: Rect) -> Rect {
        let header = self.header_rect(area);
        Rect::new(
            area.left(),
            header.bottom(),
            area.width(),
            area.height() - header.height(),
        )
    }

    /// Run one draw pass over the rows that intersect `viewport`.
    ///
    /// `viewport` is the grid body, below the header. Rows are laid out
    /// from its top edge, shifted up by the scroll offset. The first pass
    /// after activation fits the auto-resize columns to the viewport width.
    pub fn draw(&mut self, viewport: Rect, delegates: &DelegateSet) -> DrawReport {
        let mut report = DrawReport::default();
        if self.state != GridState::Live {
            return report;
        }
        if !self.fitted {
            if let Some(header) = self.header.as_mut() {
                header.resize_to_fit(viewport.width());
            }
            self.fitted = true;
        }
        let (Some(header), Some(model)) = (&self.header, &self.model) else {
            return report;
        };
        let _perf = PerfSpan::new(span_names::DRAW);

        let layout = header.layout(viewport.left());
        let row_width = header.total_width().max(viewport.width());
        let generation = model.generation();
        let row_height = self.config.grid.row_height;
        let alternating = self.config.grid.alternating_rows;
        let bordered = self.config.grid.show_border;
        let frame = self.rows.clone();

        for (position, row) in frame.iter().enumerate() {
            let top = viewport.top() + position as f32 * row_height - self.scroll_offset;
            let row_rect = Rect::new(viewport.left(), top, row_width, row_height);
            if !row_rect.intersects(&viewport) {
                continue;
            }
            report.rows_drawn += 1;

            let state = CellState::default()
                .with_selected(self.selected == Some(row.id()))
                .with_alternate(alternating && position % 2 == 1)
                .with_bordered(bordered);
            let cells: Vec<(usize, Rect)> = layout
                .iter()
                .map(|&(column, x, width)| (column, Rect::new(x, top, width, row_height)))
                .collect();

            if let Some(record) = self.draw_row(row, generation, &cells, state, delegates, &mut report) {
                report.committed.push(record);
                self.record_committed.emit(record);
                self.rebuild_rows();
                report.resorted = true;
            }
        }

        tracing::trace!(
            target: targets::GRID,
            rows = report.rows_drawn,
            cells = report.cells_drawn,
            invalid = report.invalid_cells,
            "draw pass finished"
        );
        report
    }

    /// Draw one row inside its edit bracket. Returns the record index if
    /// the bracket committed a change.
    fn draw_row(
        &mut self,
        row: &ListElement,
        generation: u64,
        cells: &[(usize, Rect)],
        state: CellState,
        delegates: &DelegateSet,
        report: &mut DrawReport,
    ) -> Option<usize> {
        let opened = self
            .source
            .resolve(row.id(), generation)
            .and_then(|record| self.source.begin_edit(record).map(|()| record));
        let record = match opened {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(target: targets::GRID, row = row.id(), error = %err, "row could not be opened");
                report.failed_rows += 1;
                let record = row.record_index().unwrap_or_default();
                for &(column, rect) in cells {
                    self.draw_placeholder(rect, record, column, state, delegates, &err, report);
                }
                return None;
            }
        };

        for &(column, rect) in cells {
            report.cells_drawn += 1;
            if let Err(err) = self.source.draw_cell(rect, record, column, state, delegates) {
                tracing::warn!(target: targets::GRID, record, column, error = %err, "cell could not be drawn");
                self.draw_placeholder(rect, record, column, state, delegates, &err, report);
            }
        }

        match self.source.end_edit(record) {
            Ok(true) => Some(record),
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(target: targets::GRID, record, error = %err, "edit could not be committed");
                report.failed_rows += 1;
                None
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_placeholder(
        &self,
        rect: Rect,
        record: usize,
        column: usize,
        state: CellState,
        delegates: &DelegateSet,
        err: &InspectorError,
        report: &mut DrawReport,
    ) {
        let option = CellOption::new(rect, record, column)
            .with_sort_type(self.source.sort_type(column))
            .with_state(state);
        delegates.fallback().draw_invalid(&option, &err.to_string());
        report.invalid_cells += 1;
    }

    /// Double-click on a row: hand its record to the host.
    pub fn activate_row(&mut self, row_id: usize) -> Result<()> {
        let generation = self
            .model
            .as_ref()
            .filter(|_| self.state == GridState::Live)
            .map(ListModel::generation)
            .ok_or_else(|| InspectorError::invalid_argument("grid is not active"))?;
        let record = self.source.resolve(row_id, generation)?;
        self.selected = Some(row_id);
        self.source.select_record(record);
        Ok(())
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    /// Select a visible row by id, or clear the selection. Returns `false`
    /// if the row is not visible.
    pub fn select_row(&mut self, row_id: Option<usize>) -> bool {
        match row_id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.rows.iter().any(|row| row.id() == id) => {
                self.selected = Some(id);
                true
            }
            Some(_) => false,
        }
    }

    /// Make sure a visible row is selected, picking the first one if needed.
    pub fn ensure_selection(&mut self) -> Option<usize> {
        let visible = self
            .selected
            .is_some_and(|id| self.rows.iter().any(|row| row.id() == id));
        if !visible {
            self.selected = self.rows.first().map(ListElement::id);
        }
        self.selected
    }

    /// Move the selection by `delta` rows, clamped to the visible rows.
    pub fn move_selection(&mut self, delta: isize) -> Option<usize> {
        if self.rows.is_empty() {
            return None;
        }
        let current = self
            .selected
            .and_then(|id| self.rows.iter().position(|row| row.id() == id));
        let target = match current {
            Some(position) => position.saturating_add_signed(delta).min(self.rows.len() - 1),
            None => 0,
        };
        self.selected = Some(self.rows[target].id());
        self.selected
    }

    /// The row under `point`, for a grid body laid out in `viewport`.
    pub fn row_at(&self, viewport: Rect, point: Point) -> Option<&ListElement> {
        if !viewport.contains(point) {
            return None;
        }
        let offset = point.y - viewport.top() + self.scroll_offset;
        let position = (offset / self.config.grid.row_height).floor();
        if position < 0.0 {
            return None;
        }
        self.rows.get(position as usize)
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Height of all visible rows.
    pub fn content_height(&self) -> f32 {
        self.rows.len() as f32 * self.config.grid.row_height
    }
}

static_assertions::assert_impl_all!(GridController: Send, Sync);
