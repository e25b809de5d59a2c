//! Inspector configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it changes:
//!
//! ```toml
//! [grid]
//! row_height = 22.0
//!
//! [columns]
//! identity_label = "Record"
//! max_width = 260.0
//! ```

use std::path::Path;

use horizon_inspector_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, Result};

/// Default row height in logical pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;
/// Default header height in logical pixels.
pub const DEFAULT_HEADER_HEIGHT: f32 = 24.0;
/// Default column width.
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;
/// Default minimum column width.
pub const MINIMUM_COLUMN_WIDTH: f32 = 30.0;
/// Default maximum column width.
pub const MAXIMUM_COLUMN_WIDTH: f32 = 200.0;

/// Top-level configuration for a [`TableInspector`](crate::TableInspector)
/// or a standalone [`GridController`](crate::GridController).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub grid: GridConfig,
    pub columns: ColumnDefaults,
}

/// Layout of the grid body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub row_height: f32,
    pub header_height: f32,
    pub alternating_rows: bool,
    pub show_border: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            alternating_rows: true,
            show_border: true,
        }
    }
}

/// Header metadata applied to every column a record source declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDefaults {
    /// Header text of the identity column.
    pub identity_label: String,
    pub width: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Direction a column starts in when it first becomes the sort column.
    pub sorted_ascending: bool,
    pub auto_resize: bool,
    pub allow_toggle_visibility: bool,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            identity_label: "Asset".to_string(),
            width: DEFAULT_COLUMN_WIDTH,
            min_width: MINIMUM_COLUMN_WIDTH,
            max_width: MAXIMUM_COLUMN_WIDTH,
            sorted_ascending: true,
            auto_resize: true,
            allow_toggle_visibility: true,
        }
    }
}

impl InspectorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| InspectorError::Config(e.to_string()))?;
        config.validate()
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| InspectorError::Config(e.to_string()))?;
        config.validate()
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| InspectorError::io(path, e))?;
        let config = if is_json(path) {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded inspector configuration");
        Ok(config)
    }

    /// Write the configuration, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| InspectorError::Config(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| InspectorError::Config(e.to_string()))?
        };
        std::fs::write(path, text).map_err(|e| InspectorError::io(path, e))
    }

    fn validate(self) -> Result<Self> {
        let columns = &self.columns;
        let widths = [columns.width, columns.min_width, columns.max_width];
        if widths.iter().any(|width| !width.is_finite()) {
            return Err(InspectorError::Config(format!(
                "column widths must be finite: width {}, min {}, max {}",
                columns.width, columns.min_width, columns.max_width
            )));
        }
        if columns.min_width < 0.0 || columns.min_width > columns.max_width {
            return Err(InspectorError::Config(format!(
                "column width bounds are inverted: min {} > max {}",
                columns.min_width, columns.max_width
            )));
        }
        let grid = &self.grid;
        if !grid.row_height.is_finite() || grid.row_height <= 0.0 {
            return Err(InspectorError::Config(format!(
                "row height must be positive, got {}",
                grid.row_height
            )));
        }
        if !grid.header_height.is_finite() || grid.header_height < 0.0 {
            return Err(InspectorError::Config(format!(
                "header height must not be negative, got {}",
                grid.header_height
            )));
        }
        Ok(self)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
