use std::collections::BTreeMap;

use crate::Field;

/// Per-field validation failure messages.
///
/// Absence of an entry means the field is valid. Iteration follows the
/// display order of [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Create a new empty error set.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record an error for a field, replacing any previous message.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Get the error message for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Clear the error for a single field, returning the removed message.
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.errors.remove(&field)
    }

    /// Fields that currently have an error, in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a Field, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, Field, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
