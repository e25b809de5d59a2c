//! Row building: turning a list model into the visible row sequence.

use horizon_inspector_core::logging::targets;

use super::element::ListElement;
use super::list_model::ListModel;
use super::natural::natural_cmp;
use crate::error::{InspectorError, Result};

/// Build the visible rows for a search string.
///
/// `None` and the empty string both mean "no filter" and yield every row in
/// model order. Anything else is filtered with [`search_rows`].
pub fn build_rows(model: &ListModel, search: Option<&str>) -> Vec<ListElement> {
    match search {
        Some(text) if !text.is_empty() => match search_rows(model, text) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(target: targets::SORT, error = %err, "search failed, showing all rows");
                model.items().to_vec()
            }
        },
        _ => model.items().to_vec(),
    }
}

/// Rows whose name contains `search`, ignoring case.
///
/// Matches are flattened to depth 0 and ordered naturally by name. Equal
/// names keep their model order. An empty `search` is an `InvalidArgument`.
pub fn search_rows(model: &ListModel, search: &str) -> Result<Vec<ListElement>> {
    if search.is_empty() {
        return Err(InspectorError::invalid_argument("search string is empty"));
    }

    let needle = search.to_lowercase();
    let mut rows: Vec<ListElement> = model
        .iter()
        .filter(|row| row.name().to_lowercase().contains(&needle))
        .map(|row| row.with_depth(0))
        .collect();
    rows.sort_by(|a, b| natural_cmp(a.name(), b.name()));

    tracing::trace!(target: targets::SORT, search, matches = rows.len(), total = model.len(), "search rows built");
    Ok(rows)
}
