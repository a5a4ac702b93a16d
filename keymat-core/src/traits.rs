//! Access traits for keyed sparse tables
//!
//! These are the seams consumers program against: the record-set renderer in
//! the implementation crate is generic over [`TableOps`] rather than tied to
//! one concrete container.

use alloc::vec::Vec;

use crate::key::Key;
use crate::OrderedMap;

/// Minimal keyed access to a sparse table
///
/// A cell exists only if it was explicitly stored; absent cells are absent
/// from the mapping, not placeholders.
pub trait SparseTable {
    /// The value type stored in the table's cells
    type Value;

    /// Get the value at the given (row, column) pair, if the cell exists
    fn cell(&self, row: &Key, col: &Key) -> Option<&Self::Value>;

    /// Get table dimensions as (rows, columns)
    ///
    /// The column count is the number of distinct column keys across all
    /// rows. Rows need not share a column set.
    fn dimensions(&self) -> (usize, usize);

    /// Get the number of stored cells
    fn cell_count(&self) -> usize;
}

/// Extension trait for whole-row and whole-column access
pub trait TableOps: SparseTable {
    /// All row keys in current iteration order
    fn row_keys(&self) -> Vec<Key>;

    /// The union of all column keys across rows, in current order
    fn column_keys(&self) -> Vec<Key>;

    /// The column-to-value mapping for a row, in the row's column order
    ///
    /// Empty if the row does not exist.
    fn row(&self, key: &Key) -> OrderedMap<Key, Self::Value>
    where
        Self::Value: Clone;

    /// The row-to-value mapping for a column, scanning rows in row order
    ///
    /// Rows lacking the column are omitted, not padded.
    fn column(&self, key: &Key) -> OrderedMap<Key, Self::Value>
    where
        Self::Value: Clone;
}
