//! Row entities.

/// Depth of the synthetic root entry.
pub const ROOT_DEPTH: i32 = -1;
/// Id of the synthetic root entry.
pub const ROOT_ID: usize = 0;

/// One row as seen by the list model and the grid.
///
/// A record row has `id = 1 + record index` and depth 0. Id 0 with depth −1
/// is the synthetic root produced during row generation, and never reaches
/// a [`ListModel`](super::ListModel).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListElement {
    id: usize,
    name: String,
    depth: i32,
}

impl ListElement {
    pub fn new(id: usize, name: impl Into<String>, depth: i32) -> Self {
        Self {
            id,
            name: name.into(),
            depth,
        }
    }

    /// The synthetic root entry.
    pub fn root() -> Self {
        Self::new(ROOT_ID, "Root", ROOT_DEPTH)
    }

    /// The row for the record at `index`.
    pub fn for_record(index: usize, name: impl Into<String>) -> Self {
        Self::new(index + 1, name, 0)
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Display name used by search and as the identity sort key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth < 0
    }

    /// Index of the backing record, `None` for the root.
    #[inline]
    pub fn record_index(&self) -> Option<usize> {
        if self.is_root() { None } else { self.id.checked_sub(1) }
    }

    /// A copy of this row at a different depth.
    pub(crate) fn with_depth(&self, depth: i32) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            depth,
        }
    }
}
