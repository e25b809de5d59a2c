//! The table inspector: choose a registered record kind and show its grid.

use horizon_inspector_core::Rect;
use horizon_inspector_core::logging::targets;

use crate::config::InspectorConfig;
use crate::error::{InspectorError, Result};
use crate::model::DelegateSet;
use crate::registry::SourceRegistry;
use crate::view::{DrawReport, GridController};

/// Shown while no record kind is selected.
pub const PLACEHOLDER_TEXT: &str = "Select a record kind to inspect";

/// What a [`TableInspector::frame`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorFrame {
    /// No kind selected; the host shows the text.
    Placeholder(&'static str),
    /// The selected kind's grid was drawn.
    Grid(DrawReport),
}

/// Hosts one [`GridController`] at a time over a [`SourceRegistry`].
///
/// The registry is read on every call, so kinds registered after the
/// inspector was created show up in the chooser. The grid for a selection
/// is built lazily on the first frame after it is chosen. Switching kinds
/// tears the previous grid down. The search string carries over between
/// kinds.
#[derive(Debug)]
pub struct TableInspector<'r> {
    registry: &'r SourceRegistry,
    config: InspectorConfig,
    selected: Option<usize>,
    grid: Option<GridController>,
    search: String,
    last_error: Option<String>,
}

impl<'r> TableInspector<'r> {
    pub fn new(registry: &'r SourceRegistry, config: InspectorConfig) -> Self {
        Self {
            registry,
            config,
            selected: None,
            grid: None,
            search: String::new(),
            last_error: None,
        }
    }

    /// Names for the kind chooser, in registration order.
    pub fn source_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Choose a kind. Choosing the current kind does nothing.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if self.selected == Some(index) {
            return Ok(());
        }
        let entry = self.registry.get(index).ok_or_else(|| {
            InspectorError::invalid_argument(format!(
                "record kind {} out of range ({} registered)",
                index,
                self.registry.len()
            ))
        })?;

        if let Some(mut grid) = self.grid.take() {
            grid.deactivate();
        }
        tracing::debug!(target: targets::GRID, kind = entry.name(), index, "record kind selected");
        self.selected = Some(index);
        self.last_error = None;
        Ok(())
    }

    /// Build the grid for the current selection if it does not exist yet.
    pub fn init_if_needed(&mut self) {
        if self.grid.is_some() {
            return;
        }
        let Some(entry) = self.selected.and_then(|index| self.registry.get(index)) else {
            return;
        };

        let mut grid = GridController::new(entry.create(), self.config.clone());
        grid.set_search(self.search.clone());
        if let Err(err) = grid.activate() {
            self.last_error = Some(err.to_string());
        }
        self.grid = Some(grid);
    }

    /// Produce one frame: the placeholder, or a draw pass of the grid.
    ///
    /// `viewport` is the whole grid area. Rows are drawn below its header
    /// strip.
    pub fn frame(&mut self, viewport: Rect, delegates: &DelegateSet) -> InspectorFrame {
        self.init_if_needed();
        match self.grid.as_mut() {
            Some(grid) => {
                let body = grid.body_rect(viewport);
                InspectorFrame::Grid(grid.draw(body, delegates))
            }
            None => InspectorFrame::Placeholder(PLACEHOLDER_TEXT),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        if let Some(grid) = self.grid.as_mut() {
            grid.set_search(self.search.clone());
        }
    }

    /// The activation error of the current grid, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn grid(&self) -> Option<&GridController> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridController> {
        self.grid.as_mut()
    }
}

static_assertions::assert_impl_all!(TableInspector<'static>: Send, Sync);
