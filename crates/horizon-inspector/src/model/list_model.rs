//! Flat list model built once per activation.

use std::collections::HashSet;

use super::element::ListElement;
use crate::error::{InspectorError, Result};

/// The ordered, immutable set of rows a grid works from.
///
/// Built from the rows a [`RecordSource`](super::RecordSource) generates.
/// The leading synthetic root is removed, so the model only ever holds
/// record rows. The generation of the source the rows came from is kept so
/// the grid can detect rows that outlived a re-cache.
#[derive(Debug, Clone, Default)]
pub struct ListModel {
    items: Vec<ListElement>,
    generation: u64,
}

impl ListModel {
    /// Build a model from generated rows.
    ///
    /// Fails with `InvalidArgument` if two rows share an id.
    pub fn new(mut data: Vec<ListElement>, generation: u64) -> Result<Self> {
        if data.first().is_some_and(ListElement::is_root) {
            data.remove(0);
        }

        let mut seen = HashSet::with_capacity(data.len());
        for item in &data {
            if !seen.insert(item.id()) {
                return Err(InspectorError::invalid_argument(format!(
                    "duplicate row id {} ('{}')",
                    item.id(),
                    item.name()
                )));
            }
        }

        Ok(Self {
            items: data,
            generation,
        })
    }

    /// The rows in enumeration order.
    #[inline]
    pub fn items(&self) -> &[ListElement] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Find a row by id.
    pub fn find(&self, id: usize) -> Option<&ListElement> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListElement> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ListModel {
    type Item = &'a ListElement;
    type IntoIter = std::slice::Iter<'a, ListElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
