//! The generic record source for one [`RecordStore`].

use std::collections::HashSet;
use std::sync::Arc;

use horizon_inspector_core::logging::{span_names, targets};
use horizon_inspector_core::{PerfSpan, Rect, Signal};

use super::delegate::{CellOption, CellState, DelegateSet, INVALID_PROPERTY_MESSAGE};
use super::element::ListElement;
use super::header::{ColumnHeader, HeaderState, nicify_name};
use super::record::{Inspectable, RecordStore};
use super::source::{RecordSelection, RecordSource};
use super::value::{FieldValue, SortType};
use crate::config::ColumnDefaults;
use crate::error::{InspectorError, Result};

struct CachedRecord<T> {
    key: String,
    label: String,
    record: T,
}

struct EditSession<T> {
    record: usize,
    working: T,
    modified: bool,
}

/// A [`RecordSource`] over every record a store holds.
///
/// Columns are either declared up front with [`with_columns`](Self::with_columns)
/// or, when none are declared, discovered from the first record on every
/// [`cache`](RecordSource::cache).
pub struct RecordTable<S: RecordStore> {
    store: Arc<S>,
    declared: Vec<String>,
    columns: Vec<String>,
    sort_types: Vec<SortType>,
    records: Vec<CachedRecord<S::Record>>,
    generation: u64,
    session: Option<EditSession<S::Record>>,
    record_selected: Signal<RecordSelection>,
}

impl<S: RecordStore> RecordTable<S> {
    /// A table that shows every field of the first record.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            declared: Vec::new(),
            columns: Vec::new(),
            sort_types: Vec::new(),
            records: Vec::new(),
            generation: 0,
            session: None,
            record_selected: Signal::new(),
        }
    }

    /// A table that shows the named fields, in order.
    pub fn with_columns<C: Into<String>>(store: Arc<S>, columns: impl IntoIterator<Item = C>) -> Self {
        let mut table = Self::new(store);
        table.declared = columns.into_iter().map(Into::into).collect();
        table
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Field names of the cached column set, without the identity column.
    pub fn field_columns(&self) -> &[String] {
        &self.columns
    }

    /// True while an edit bracket is open.
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    fn validate_declared(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.declared {
            if name.trim().is_empty() {
                return Err(InspectorError::invalid_argument(format!(
                    "{}: column names must not be empty",
                    S::Record::KIND
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(InspectorError::invalid_argument(format!(
                    "{}: column '{}' is declared twice",
                    S::Record::KIND,
                    name
                )));
            }
        }
        Ok(())
    }

    fn cached(&self, record: usize) -> Result<&CachedRecord<S::Record>> {
        self.records.get(record).ok_or_else(|| {
            InspectorError::invalid_argument(format!(
                "record {} out of range ({} records)",
                record,
                self.records.len()
            ))
        })
    }

    fn field_name(&self, column: usize) -> Result<&str> {
        column
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .map(String::as_str)
            .ok_or_else(|| {
                InspectorError::invalid_argument(format!(
                    "column {} out of range ({} columns)",
                    column,
                    self.column_count()
                ))
            })
    }

    /// The committed value of a cell, `None` when the record lacks the field.
    fn lookup(&self, record: usize, column: usize) -> Result<Option<FieldValue>> {
        let cached = self.cached(record)?;
        if column == 0 {
            return Ok(Some(FieldValue::String(cached.label.clone())));
        }
        let name = self.field_name(column)?;
        Ok(cached.record.field(name))
    }

    fn typed<T>(
        &self,
        record: usize,
        column: usize,
        expected: SortType,
        extract: impl FnOnce(FieldValue) -> std::result::Result<T, FieldValue>,
    ) -> Result<T> {
        let value = self
            .lookup(record, column)?
            .ok_or_else(|| InspectorError::invalid_access(column, expected.name(), "absent field"))?;
        extract(value)
            .map_err(|other| InspectorError::invalid_access(column, expected.name(), other.sort_type().name()))
    }
}

impl<S: RecordStore> RecordSource for RecordTable<S> {
    fn name(&self) -> &str {
        S::Record::KIND
    }

    fn cache(&mut self) -> Result<usize> {
        let _perf = PerfSpan::new(span_names::CACHE);
        self.generation += 1;
        self.session = None;
        self.records.clear();
        self.columns.clear();
        self.sort_types.clear();

        self.validate_declared()?;

        self.records = self
            .store
            .find_all()
            .into_iter()
            .map(|stored| CachedRecord {
                label: stored.label(),
                key: stored.key,
                record: stored.record,
            })
            .collect();

        let first = self.records.first().map(|cached| &cached.record);
        self.columns = if self.declared.is_empty() {
            first.map(<S::Record as Inspectable>::field_names).unwrap_or_default()
        } else {
            self.declared.clone()
        };
        self.sort_types = self
            .columns
            .iter()
            .map(|name| {
                first
                    .and_then(|record| record.field(name))
                    .map_or(SortType::Invalid, |value| SortType::of(&value))
            })
            .collect();

        tracing::debug!(
            target: targets::SOURCE,
            kind = S::Record::KIND,
            records = self.records.len(),
            columns = self.columns.len(),
            generation = self.generation,
            "record source cached"
        );
        Ok(self.records.len())
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len() + 1
    }

    fn column_name(&self, column: usize) -> Option<&str> {
        self.field_name(column).ok()
    }

    fn sort_type(&self, column: usize) -> SortType {
        if column == 0 {
            return SortType::String;
        }
        self.sort_types
            .get(column - 1)
            .copied()
            .unwrap_or(SortType::Invalid)
    }

    fn resolve(&self, row_id: usize, generation: u64) -> Result<usize> {
        if generation != self.generation {
            return Err(InspectorError::StaleRowReference {
                id: row_id,
                generation,
                current: self.generation,
            });
        }
        match row_id.checked_sub(1) {
            Some(record) if record < self.records.len() => Ok(record),
            _ => Err(InspectorError::invalid_argument(format!(
                "row {} does not name a record",
                row_id
            ))),
        }
    }

    fn identity(&self, record: usize) -> Result<(String, Option<String>)> {
        let cached = self.cached(record)?;
        Ok((cached.label.clone(), cached.record.icon().map(str::to_string)))
    }

    fn cell_value(&self, record: usize, column: usize) -> Result<FieldValue> {
        self.lookup(record, column)?
            .ok_or_else(|| InspectorError::invalid_access(column, "value", "absent field"))
    }

    fn cell_text(&self, record: usize, column: usize) -> Result<String> {
        self.typed(record, column, SortType::String, |value| match value {
            FieldValue::String(s) => Ok(s),
            other => Err(other),
        })
    }

    fn cell_float(&self, record: usize, column: usize) -> Result<f64> {
        self.typed(record, column, SortType::Float, |value| match value {
            FieldValue::Float(f) => Ok(f),
            other => Err(other),
        })
    }

    fn cell_bool(&self, record: usize, column: usize) -> Result<bool> {
        self.typed(record, column, SortType::Bool, |value| match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(other),
        })
    }

    fn cell_int(&self, record: usize, column: usize) -> Result<i64> {
        self.typed(record, column, SortType::Integer, |value| match value {
            FieldValue::Integer(i) => Ok(i),
            other => Err(other),
        })
    }

    fn cell_enum_label(&self, record: usize, column: usize) -> Result<String> {
        self.typed(record, column, SortType::Enum, |value| match value {
            FieldValue::Enum(e) => Ok(e.label().to_string()),
            other => Err(other),
        })
    }

    fn cell_object_ref_name(&self, record: usize, column: usize) -> Result<Option<String>> {
        self.typed(record, column, SortType::ObjectReference, |value| match value {
            FieldValue::ObjectReference(r) => Ok(r.map(|r| r.name)),
            other => Err(other),
        })
    }

    fn begin_edit(&mut self, record: usize) -> Result<()> {
        let cached = self.cached(record)?;
        let fresh = self
            .store
            .load(&cached.key)
            .unwrap_or_else(|| cached.record.clone());

        if let Some(open) = &self.session {
            tracing::warn!(
                target: targets::SOURCE,
                open = open.record,
                record,
                "edit bracket reopened before it was closed, discarding the open one"
            );
        }

        self.records[record].record = fresh.clone();
        self.session = Some(EditSession {
            record,
            working: fresh,
            modified: false,
        });
        Ok(())
    }

    fn draw_cell(
        &mut self,
        rect: Rect,
        record: usize,
        column: usize,
        state: CellState,
        delegates: &DelegateSet,
    ) -> Result<bool> {
        let cached = self.cached(record)?;
        let editing = self.session.as_ref().is_some_and(|s| s.record == record);
        let option = CellOption::new(rect, record, column).with_state(state.with_editing(editing));

        if column == 0 {
            let option = option.with_sort_type(SortType::String);
            delegates
                .fallback()
                .draw_label(&option, &cached.label, cached.record.icon());
            return Ok(false);
        }

        let name = self.field_name(column)?.to_string();
        let current = match &self.session {
            Some(session) if session.record == record => &session.working,
            _ => &cached.record,
        };
        let Some(mut value) = current.field(&name) else {
            let option = option.with_sort_type(SortType::Invalid);
            delegates.fallback().draw_invalid(&option, INVALID_PROPERTY_MESSAGE);
            return Ok(false);
        };

        let sort_type = value.sort_type();
        let option = option.with_sort_type(sort_type);
        if !delegates.delegate_for(sort_type).draw(&option, &mut value) {
            return Ok(false);
        }

        match self.session.as_mut() {
            Some(session) if session.record == record => {
                if session.working.set_field(&name, value) {
                    session.modified = true;
                    Ok(true)
                } else {
                    tracing::warn!(target: targets::SOURCE, record, field = %name, "record rejected edited value");
                    Ok(false)
                }
            }
            _ => {
                tracing::warn!(target: targets::SOURCE, record, field = %name, "edit outside an edit bracket discarded");
                Ok(false)
            }
        }
    }

    fn end_edit(&mut self, record: usize) -> Result<bool> {
        let session = match self.session.take() {
            Some(session) if session.record == record => session,
            other => {
                let open = other.as_ref().map(|s| s.record);
                self.session = other;
                return Err(InspectorError::invalid_argument(format!(
                    "no edit bracket open for record {} (open: {:?})",
                    record, open
                )));
            }
        };
        if !session.modified {
            return Ok(false);
        }

        let cached = &mut self.records[record];
        self.store.commit(&cached.key, &session.working)?;
        cached.record = session.working;
        tracing::debug!(target: targets::SOURCE, kind = S::Record::KIND, record, key = %cached.key, "record edit committed");
        Ok(true)
    }

    fn build_column_headers(&self, defaults: &ColumnDefaults) -> HeaderState {
        let identity = ColumnHeader::new(defaults.identity_label.clone(), SortType::String, defaults);
        let fields = self.columns.iter().zip(&self.sort_types).map(|(name, sort_type)| {
            let label = nicify_name(name);
            let menu_text = format!("{} ({})", label, name);
            ColumnHeader::new(label, *sort_type, defaults).with_context_menu_text(menu_text)
        });
        HeaderState::new(std::iter::once(identity).chain(fields).collect())
    }

    fn generate_rows(&self) -> Vec<ListElement> {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(ListElement::root());
        rows.extend(
            self.records
                .iter()
                .enumerate()
                .map(|(i, cached)| ListElement::for_record(i, cached.record.name())),
        );
        rows
    }

    fn select_record(&self, record: usize) {
        match self.records.get(record) {
            Some(cached) => self.record_selected.emit(RecordSelection {
                kind: S::Record::KIND.to_string(),
                record,
                key: cached.key.clone(),
                name: cached.record.name().to_string(),
            }),
            None => {
                tracing::warn!(target: targets::SOURCE, record, "select_record index out of range, ignored")
            }
        }
    }

    fn record_selected(&self) -> &Signal<RecordSelection> {
        &self.record_selected
    }
}
