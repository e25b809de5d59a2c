//! Multi-key, type-aware row sorting.
//!
//! A [`SortEngine`] owns a [`ComparatorTable`] built once when a grid is
//! activated, one [`Comparator`] per column. Sorting extracts every key of
//! every row up front, then runs a stable sort over the extracted keys, so
//! rows that compare equal keep the order they arrived in.

use std::cmp::Ordering;

use horizon_inspector_core::PerfSpan;
use horizon_inspector_core::logging::{span_names, targets};

use super::element::ListElement;
use super::natural::natural_cmp;
use super::source::RecordSource;
use super::value::SortType;
use crate::error::{InspectorError, Result};

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending { Self::Ascending } else { Self::Descending }
    }

    #[inline]
    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// One column of a sort selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub column: usize,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(column: usize, order: SortOrder) -> Self {
        Self { column, order }
    }

    pub fn ascending(column: usize) -> Self {
        Self::new(column, SortOrder::Ascending)
    }

    pub fn descending(column: usize) -> Self {
        Self::new(column, SortOrder::Descending)
    }
}

/// The ordered list of sort keys, primary key first.
///
/// An empty selection leaves rows in the order they were built in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSelection {
    keys: Vec<SortKey>,
}

impl SortSelection {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// A selection with a single key.
    pub fn single(column: usize, order: SortOrder) -> Self {
        Self {
            keys: vec![SortKey::new(column, order)],
        }
    }

    #[inline]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn primary(&self) -> Option<SortKey> {
        self.keys.first().copied()
    }

    /// The key for `column`, if the column takes part in the selection.
    pub fn key_for(&self, column: usize) -> Option<SortKey> {
        self.keys.iter().copied().find(|key| key.column == column)
    }
}

impl FromIterator<SortKey> for SortSelection {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// How one column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Natural order of the row's display name.
    DisplayName,
    Text,
    /// Total order over floats; NaN sorts after every number.
    Float,
    /// `false` before `true`.
    Bool,
    Integer,
    /// Lexicographic order of the selected label.
    EnumLabel,
    /// Lexicographic order of the referenced name, unassigned first.
    ObjectReference,
}

impl Comparator {
    pub fn for_sort_type(sort_type: SortType) -> Self {
        match sort_type {
            SortType::String => Self::Text,
            SortType::Float => Self::Float,
            SortType::Bool => Self::Bool,
            SortType::Integer => Self::Integer,
            SortType::Enum => Self::EnumLabel,
            SortType::ObjectReference => Self::ObjectReference,
            SortType::Invalid => Self::DisplayName,
        }
    }
}

/// One comparator per column of a record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorTable {
    comparators: Vec<Comparator>,
}

impl ComparatorTable {
    /// Build the table for the source's current column set.
    ///
    /// The identity column always compares by display name.
    pub fn for_source(source: &dyn RecordSource) -> Self {
        let comparators = (0..source.column_count())
            .map(|column| {
                if column == 0 {
                    return Comparator::DisplayName;
                }
                let sort_type = source.sort_type(column);
                if !sort_type.is_valid() {
                    tracing::debug!(target: targets::SORT, column, "column has no sort type, comparing by display name");
                }
                Comparator::for_sort_type(sort_type)
            })
            .collect();
        Self { comparators }
    }

    /// Comparator for `column`. Unknown columns compare by display name.
    pub fn get(&self, column: usize) -> Comparator {
        self.comparators
            .get(column)
            .copied()
            .unwrap_or(Comparator::DisplayName)
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}

/// An extracted sort key value.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    /// Unreadable or unassigned. Sorts before every other value.
    Missing,
    Name(String),
    Text(String),
    Float(f64),
    Bool(bool),
    Integer(i64),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Name(_) => 1,
            Self::Text(_) => 2,
            Self::Float(_) => 3,
            Self::Bool(_) => 4,
            Self::Integer(_) => 5,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => natural_cmp(a, b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sorts visible rows by a [`SortSelection`].
#[derive(Debug, Clone)]
pub struct SortEngine {
    table: ComparatorTable,
}

impl SortEngine {
    /// Build an engine for the source's current column set.
    pub fn new(source: &dyn RecordSource) -> Self {
        Self {
            table: ComparatorTable::for_source(source),
        }
    }

    /// The per-column comparators, fixed when the engine was built.
    pub fn comparators(&self) -> &ComparatorTable {
        &self.table
    }

    /// Sort `rows` in place.
    ///
    /// Does nothing for an empty selection or fewer than two rows. Fails with
    /// `StaleRowReference` when the rows were built against a different
    /// generation of the source.
    pub fn sort(
        &self,
        rows: &mut Vec<ListElement>,
        selection: &SortSelection,
        source: &dyn RecordSource,
        generation: u64,
    ) -> Result<()> {
        if selection.is_empty() || rows.len() <= 1 {
            return Ok(());
        }
        if generation != source.generation() {
            return Err(InspectorError::StaleRowReference {
                id: rows[0].id(),
                generation,
                current: source.generation(),
            });
        }

        let _perf = PerfSpan::new(span_names::SORT);
        let keys = selection.keys();

        let mut keyed: Vec<(Vec<SortValue>, ListElement)> = rows
            .drain(..)
            .map(|row| {
                let values = keys
                    .iter()
                    .map(|key| self.extract(&row, key.column, source, generation))
                    .collect();
                (values, row)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            keys.iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (a, b))| key.order.apply(a.compare(b)))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        rows.extend(keyed.into_iter().map(|(_, row)| row));
        tracing::debug!(target: targets::SORT, rows = rows.len(), keys = keys.len(), "rows sorted");
        Ok(())
    }

    fn extract(
        &self,
        row: &ListElement,
        column: usize,
        source: &dyn RecordSource,
        generation: u64,
    ) -> SortValue {
        let comparator = self.table.get(column);
        if comparator == Comparator::DisplayName {
            return SortValue::Name(row.name().to_string());
        }

        let value = source.resolve(row.id(), generation).and_then(|record| match comparator {
            Comparator::Text => source.cell_text(record, column).map(SortValue::Text),
            Comparator::Float => source.cell_float(record, column).map(SortValue::Float),
            Comparator::Bool => source.cell_bool(record, column).map(SortValue::Bool),
            Comparator::Integer => source.cell_int(record, column).map(SortValue::Integer),
            Comparator::EnumLabel => source.cell_enum_label(record, column).map(SortValue::Text),
            Comparator::ObjectReference => source
                .cell_object_ref_name(record, column)
                .map(|name| name.map_or(SortValue::Missing, SortValue::Text)),
            Comparator::DisplayName => Ok(SortValue::Name(row.name().to_string())),
        });

        value.unwrap_or_else(|err| {
            tracing::trace!(target: targets::SORT, row = row.id(), column, error = %err, "sort key unreadable");
            SortValue::Missing
        })
    }
}
