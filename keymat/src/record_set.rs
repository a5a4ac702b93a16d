//! Record-set conversion with header labels
//!
//! Turns any [`TableOps`] table into an ordered, labeled record set suitable
//! for tabular rendering: a header entry first, then one entry per data row,
//! each cell carrying either a heading label or a raw value.

use std::collections::HashMap;

use keymat_core::{Key, KeymatError, OrderedMap, Result, TableOps};

use crate::matrix::Matrix;

/// One cell of a record: a heading label or a data value.
///
/// With the `serde` feature the two variants serialize untagged, so a record
/// set becomes a plain JSON object mixing label strings and values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Field<V> {
    /// A display label from the headings configuration
    Label(String),
    /// A value taken from the source table
    Value(V),
}

/// One rendered row: column key to field, in column order
pub type Record<V> = OrderedMap<Key, Field<V>>;

/// The rendered table: row key to record, header entry first
pub type RecordSet<V> = OrderedMap<Key, Record<V>>;

/// Configuration for record-set rendering
///
/// Holds the origin label shown in the table corner, the display labels for
/// row and column keys, and the synthetic keys under which the header row
/// and the heading column are stored.
#[derive(Debug, Clone)]
pub struct Headings {
    origin: String,
    row_labels: HashMap<Key, String>,
    col_labels: HashMap<Key, String>,
    row_heading_key: Key,
    column_heading_key: Key,
}

/// How to resolve a key that has no entry in a label mapping
#[derive(Debug, Clone, Copy)]
enum LabelPolicy {
    /// Fall back to the key's display form
    KeyFallback,
    /// Fail with a missing-label error
    Strict,
}

impl Headings {
    /// Create a headings configuration with the given origin label.
    ///
    /// The header row is keyed `"row_heading"` and the heading column
    /// `"column_heading"` unless overridden.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            row_labels: HashMap::new(),
            col_labels: HashMap::new(),
            row_heading_key: Key::from("row_heading"),
            column_heading_key: Key::from("column_heading"),
        }
    }

    /// Set the display label for a row key
    pub fn with_row_label(mut self, key: impl Into<Key>, label: impl Into<String>) -> Self {
        self.row_labels.insert(key.into(), label.into());
        self
    }

    /// Set the display label for a column key
    pub fn with_column_label(mut self, key: impl Into<Key>, label: impl Into<String>) -> Self {
        self.col_labels.insert(key.into(), label.into());
        self
    }

    /// Override the key under which the header row is stored
    pub fn with_row_heading_key(mut self, key: impl Into<Key>) -> Self {
        self.row_heading_key = key.into();
        self
    }

    /// Override the key under which each record's heading label is stored
    pub fn with_column_heading_key(mut self, key: impl Into<Key>) -> Self {
        self.column_heading_key = key.into();
        self
    }

    /// Render a table into a record set.
    ///
    /// The header entry comes first, keyed by the row-heading key: the
    /// origin label under the column-heading key, then one label per column
    /// in the table's column-union order. Each data row follows in row
    /// order, with its label under the column-heading key and its cells in
    /// the row's own column order.
    ///
    /// A key missing from the label mappings falls back to the key's
    /// display form; use [`try_render`](Self::try_render) to fail instead.
    pub fn render<T>(&self, table: &T) -> RecordSet<T::Value>
    where
        T: TableOps,
        T::Value: Clone,
    {
        match self.build(table, LabelPolicy::KeyFallback) {
            Ok(records) => records,
            // fallback label resolution cannot fail
            Err(_) => RecordSet::default(),
        }
    }

    /// Strict variant of [`render`](Self::render): every row and column key
    /// must have a label, otherwise the first missing key is reported.
    pub fn try_render<T>(&self, table: &T) -> Result<RecordSet<T::Value>>
    where
        T: TableOps,
        T::Value: Clone,
    {
        self.build(table, LabelPolicy::Strict)
    }

    fn build<T>(&self, table: &T, policy: LabelPolicy) -> Result<RecordSet<T::Value>>
    where
        T: TableOps,
        T::Value: Clone,
    {
        let columns = table.column_keys();
        let mut records = RecordSet::default();

        let mut header = Record::default();
        header.insert(
            self.column_heading_key.clone(),
            Field::Label(self.origin.clone()),
        );
        for col in &columns {
            header.insert(col.clone(), Field::Label(self.column_label(col, policy)?));
        }
        records.insert(self.row_heading_key.clone(), header);

        for row_key in table.row_keys() {
            let mut record = Record::default();
            record.insert(
                self.column_heading_key.clone(),
                Field::Label(self.row_label(&row_key, policy)?),
            );
            for (col, value) in table.row(&row_key) {
                record.insert(col, Field::Value(value));
            }
            records.insert(row_key, record);
        }

        Ok(records)
    }

    fn row_label(&self, key: &Key, policy: LabelPolicy) -> Result<String> {
        match self.row_labels.get(key) {
            Some(label) => Ok(label.clone()),
            None => match policy {
                LabelPolicy::KeyFallback => Ok(key.to_string()),
                LabelPolicy::Strict => Err(KeymatError::MissingRowLabel(key.clone())),
            },
        }
    }

    fn column_label(&self, key: &Key, policy: LabelPolicy) -> Result<String> {
        match self.col_labels.get(key) {
            Some(label) => Ok(label.clone()),
            None => match policy {
                LabelPolicy::KeyFallback => Ok(key.to_string()),
                LabelPolicy::Strict => Err(KeymatError::MissingColumnLabel(key.clone())),
            },
        }
    }
}

impl<V: Clone> Matrix<V> {
    /// Render this matrix into a record set with the given headings.
    ///
    /// See [`Headings::render`] for ordering and fallback behavior.
    pub fn to_record_set_with_headings(&self, headings: &Headings) -> RecordSet<V> {
        headings.render(self)
    }

    /// Strict variant of
    /// [`to_record_set_with_headings`](Self::to_record_set_with_headings):
    /// fails on the first row or column key without a label.
    pub fn try_to_record_set_with_headings(&self, headings: &Headings) -> Result<RecordSet<V>> {
        headings.try_render(self)
    }
}
