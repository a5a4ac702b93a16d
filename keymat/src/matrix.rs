//! Sparse associatively-keyed matrix container
//!
//! The matrix owns one two-level ordered mapping: outer key = row key, inner
//! key = column key. A cell exists only if it was explicitly set; rows need
//! not share a column set.

use keymat_core::{apply_order, Key, OrderedMap, SparseTable, TableOps};

/// Sparse two-dimensional container keyed by scalar row and column keys.
///
/// Row insertion order, and column insertion order within each row, are
/// preserved and define iteration order until a sort is applied. Cloning
/// produces a deep, independent copy.
///
/// All operations are synchronous and in-memory; the structure provides no
/// concurrency guarantees and is intended for single-threaded report
/// assembly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Matrix<V> {
    cells: OrderedMap<Key, OrderedMap<Key, V>>,
}

impl<V> Matrix<V> {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the cell at (row, col).
    ///
    /// Creates the row if absent, appended at the end of row order, and
    /// creates the column within that row if absent, appended at the end of
    /// that row's column order.
    pub fn set(&mut self, row: impl Into<Key>, col: impl Into<Key>, value: V) {
        self.cells.entry(row.into()).or_default().insert(col.into(), value);
    }

    /// Get the value at (row, col), or `None` if the cell does not exist.
    ///
    /// Never panics for unknown keys.
    pub fn get(&self, row: impl Into<Key>, col: impl Into<Key>) -> Option<&V> {
        self.cells.get(&row.into())?.get(&col.into())
    }

    /// The column-to-value mapping for a row, in the row's current column
    /// order. Empty if the row does not exist.
    pub fn get_row(&self, key: impl Into<Key>) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        self.cells.get(&key.into()).cloned().unwrap_or_default()
    }

    /// The row-to-value mapping for a column, scanning rows in row order.
    ///
    /// Rows that do not have the column are omitted, not padded with a
    /// placeholder.
    pub fn get_column(&self, key: impl Into<Key>) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        let col = key.into();
        let mut out = OrderedMap::default();
        for (row_key, row) in &self.cells {
            if let Some(value) = row.get(&col) {
                out.insert(row_key.clone(), value.clone());
            }
        }
        out
    }

    /// The row at the current first position, or empty if there are no rows
    pub fn get_first_row(&self) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        self.cells
            .first()
            .map(|(_, row)| row.clone())
            .unwrap_or_default()
    }

    /// The column at the current first position, or empty if there are none
    pub fn get_first_column(&self) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        match self.column_keys().into_iter().next() {
            Some(col) => self.get_column(col),
            None => OrderedMap::default(),
        }
    }

    /// All row keys in current iteration order
    pub fn row_keys(&self) -> Vec<Key> {
        self.cells.keys().cloned().collect()
    }

    /// The union of all column keys across rows, in first-seen order
    /// scanning rows in row order
    pub fn column_keys(&self) -> Vec<Key> {
        let mut columns: Vec<Key> = Vec::new();
        for row in self.cells.values() {
            for col in row.keys() {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }
        columns
    }

    /// Remove a row entirely. No-op if the row does not exist.
    pub fn delete_row(&mut self, key: impl Into<Key>) {
        self.cells.shift_remove(&key.into());
    }

    /// Remove a column's cell from every row that has it. Rows without the
    /// column are untouched; no-op if the column never existed.
    pub fn delete_column(&mut self, key: impl Into<Key>) {
        let col = key.into();
        for row in self.cells.values_mut() {
            row.shift_remove(&col);
        }
    }

    /// Matrix dimensions as (row count, distinct column count).
    ///
    /// The column count is the size of the column-key union across all rows,
    /// so a non-rectangular matrix reports every column it has ever seen.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cells.len(), self.column_keys().len())
    }

    /// The number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(|row| row.len()).sum()
    }

    /// Whether the matrix has no stored cells
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Borrow the underlying row-to-columns mapping
    pub fn cells(&self) -> &OrderedMap<Key, OrderedMap<Key, V>> {
        &self.cells
    }

    /// Reorder rows to follow the given key order.
    ///
    /// Requested keys not present in the matrix are ignored; rows not
    /// mentioned in the request keep their relative order and are appended
    /// after the requested ones, so no row is ever dropped by a sort.
    pub fn apply_row_sort<I>(&mut self, order: I)
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let requested: Vec<Key> = order.into_iter().map(Into::into).collect();
        apply_order(&mut self.cells, &requested);
    }

    /// Reorder the columns of every row to follow the given key order.
    ///
    /// Applied per row independently with the same ignore-unknown and
    /// append-unmentioned policy as [`apply_row_sort`](Self::apply_row_sort).
    /// Row order and values are untouched.
    pub fn apply_column_sort<I>(&mut self, order: I)
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let requested: Vec<Key> = order.into_iter().map(Into::into).collect();
        for row in self.cells.values_mut() {
            apply_order(row, &requested);
        }
    }

    /// Sort rows through a callback.
    ///
    /// The callback is called exactly once with the current ordered row keys
    /// and returns the desired order, which is applied with the exact
    /// semantics of [`apply_row_sort`](Self::apply_row_sort).
    pub fn sort_rows<F>(&mut self, compare: F)
    where
        F: FnOnce(&[Key]) -> Vec<Key>,
    {
        let order = compare(&self.row_keys());
        self.apply_row_sort(order);
    }

    /// Sort columns through a callback, symmetric to
    /// [`sort_rows`](Self::sort_rows). The callback receives the current
    /// column-key union.
    pub fn sort_columns<F>(&mut self, compare: F)
    where
        F: FnOnce(&[Key]) -> Vec<Key>,
    {
        let order = compare(&self.column_keys());
        self.apply_column_sort(order);
    }

    /// Add one synthetic column computed per row.
    ///
    /// For every existing row the aggregator receives the row's
    /// column-to-value mapping, keyed by the row's actual column keys so
    /// keyed arithmetic like `row[&k2] - row[&k1]` works. The returned value
    /// is stored at (row, `new_col`). Totals are computed for all rows
    /// first and inserted afterwards, so no callback observes another row's
    /// synthetic value.
    pub fn set_row_totals<F>(&mut self, mut total: F, new_col: impl Into<Key>)
    where
        F: FnMut(&OrderedMap<Key, V>) -> V,
    {
        let new_col = new_col.into();
        let totals: Vec<(Key, V)> = self
            .cells
            .iter()
            .map(|(row_key, row)| (row_key.clone(), total(row)))
            .collect();
        for (row_key, value) in totals {
            self.set(row_key, new_col.clone(), value);
        }
    }

    /// Fallible variant of [`set_row_totals`](Self::set_row_totals).
    ///
    /// If the aggregator returns an error the matrix is left unchanged: all
    /// totals are computed before any is stored.
    pub fn try_set_row_totals<F, E>(
        &mut self,
        mut total: F,
        new_col: impl Into<Key>,
    ) -> Result<(), E>
    where
        F: FnMut(&OrderedMap<Key, V>) -> Result<V, E>,
    {
        let new_col = new_col.into();
        let mut totals: Vec<(Key, V)> = Vec::with_capacity(self.cells.len());
        for (row_key, row) in &self.cells {
            totals.push((row_key.clone(), total(row)?));
        }
        for (row_key, value) in totals {
            self.set(row_key, new_col.clone(), value);
        }
        Ok(())
    }

    /// Add one synthetic row computed per column.
    ///
    /// For every distinct column key the aggregator receives the column's
    /// row-to-value mapping, built the same way as
    /// [`get_column`](Self::get_column), and the returned value is stored at
    /// (`new_row`, column). Totals are computed for all columns first and
    /// inserted afterwards.
    pub fn set_column_totals<F>(&mut self, mut total: F, new_row: impl Into<Key>)
    where
        F: FnMut(&OrderedMap<Key, V>) -> V,
        V: Clone,
    {
        let new_row = new_row.into();
        let totals: Vec<(Key, V)> = self
            .column_keys()
            .into_iter()
            .map(|col| {
                let column = self.get_column(col.clone());
                (col, total(&column))
            })
            .collect();
        for (col, value) in totals {
            self.set(new_row.clone(), col, value);
        }
    }

    /// Fallible variant of [`set_column_totals`](Self::set_column_totals).
    ///
    /// If the aggregator returns an error the matrix is left unchanged.
    pub fn try_set_column_totals<F, E>(
        &mut self,
        mut total: F,
        new_row: impl Into<Key>,
    ) -> Result<(), E>
    where
        F: FnMut(&OrderedMap<Key, V>) -> Result<V, E>,
        V: Clone,
    {
        let new_row = new_row.into();
        let columns = self.column_keys();
        let mut totals: Vec<(Key, V)> = Vec::with_capacity(columns.len());
        for col in columns {
            let column = self.get_column(col.clone());
            totals.push((col, total(&column)?));
        }
        for (col, value) in totals {
            self.set(new_row.clone(), col, value);
        }
        Ok(())
    }
}

impl<V> Default for Matrix<V> {
    fn default() -> Self {
        Self {
            cells: OrderedMap::default(),
        }
    }
}

// Ordered equality: two matrices are equal only if they hold the same cells
// in the same row and column order. IndexMap's own PartialEq ignores order,
// which would defeat this container's ordering contract.
impl<V: PartialEq> PartialEq for Matrix<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|((key_a, row_a), (key_b, row_b))| {
                    key_a == key_b
                        && row_a.len() == row_b.len()
                        && row_a.iter().zip(row_b.iter()).all(|(a, b)| a == b)
                })
    }
}

impl<V: Eq> Eq for Matrix<V> {}

impl<V> SparseTable for Matrix<V> {
    type Value = V;

    fn cell(&self, row: &Key, col: &Key) -> Option<&V> {
        self.cells.get(row)?.get(col)
    }

    fn dimensions(&self) -> (usize, usize) {
        Matrix::dimensions(self)
    }

    fn cell_count(&self) -> usize {
        Matrix::cell_count(self)
    }
}

impl<V> TableOps for Matrix<V> {
    fn row_keys(&self) -> Vec<Key> {
        Matrix::row_keys(self)
    }

    fn column_keys(&self) -> Vec<Key> {
        Matrix::column_keys(self)
    }

    fn row(&self, key: &Key) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        self.get_row(key)
    }

    fn column(&self, key: &Key) -> OrderedMap<Key, V>
    where
        V: Clone,
    {
        self.get_column(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_matrix() -> Matrix<i32> {
        let mut m = Matrix::new();

        m.set("r1", "c1", 11);
        m.set("r1", "c2", 12);
        m.set("r1", "c3", 13);
        m.set("r2", "c1", 21);
        m.set("r2", "c2", 22);
        m.set("r2", "c3", 23);
        m.set("r3", "c1", 31);
        m.set("r3", "c2", 32);
        m.set("r3", "c3", 33);

        m
    }

    fn keys(names: &[&str]) -> Vec<Key> {
        names.iter().map(|name| Key::from(*name)).collect()
    }

    // Order-sensitive view of a map for assertions
    fn pairs(map: OrderedMap<Key, i32>) -> Vec<(Key, i32)> {
        map.into_iter().collect()
    }

    #[test]
    fn test_get() {
        let m = test_matrix();
        assert_eq!(m.get("r1", "c1"), Some(&11));
    }

    #[test]
    fn test_set_overwrites() {
        let mut m = test_matrix();
        m.set("r1", "c1", 55555);
        assert_eq!(m.get("r1", "c1"), Some(&55555));
    }

    #[test]
    fn test_get_set_with_integer_keys() {
        let mut m = Matrix::new();
        m.set(1, 2, 55555);
        assert_eq!(m.get(1, 2), Some(&55555));
        // integer and string keys never coincide
        assert_eq!(m.get("1", "2"), None);
    }

    #[test]
    fn test_get_missing_cell() {
        let m = test_matrix();
        assert_eq!(m.get("not_set_row", "not_set_column"), None);
        assert_eq!(m.get("r1", "not_set_column"), None);
    }

    #[test]
    fn test_delete_row() {
        let mut m = test_matrix();
        assert!(!m.get_row("r3").is_empty());

        m.delete_row("r3");
        assert!(m.get_row("r3").is_empty());
        assert_eq!(m.dimensions(), (2, 3));

        // idempotent
        m.delete_row("r3");
        assert_eq!(m.dimensions(), (2, 3));
    }

    #[test]
    fn test_delete_column() {
        let mut m = test_matrix();
        assert!(!m.get_column("c3").is_empty());

        m.delete_column("c3");
        assert!(m.get_column("c3").is_empty());
        for key in m.row_keys() {
            assert!(!m.get_row(key).contains_key(&Key::from("c3")));
        }
        assert_eq!(m.dimensions(), (3, 2));

        // idempotent
        m.delete_column("never_existed");
        assert_eq!(m.dimensions(), (3, 2));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(test_matrix().dimensions(), (3, 3));
    }

    #[test]
    fn test_dimensions_non_rectangular() {
        let mut m = Matrix::new();
        m.set("r1", "c1", 1);
        m.set("r2", "c2", 2);
        m.set("r2", "c3", 3);
        // column count is the union across rows, not the widest row
        assert_eq!(m.dimensions(), (2, 3));
        assert_eq!(m.cell_count(), 3);
    }

    #[test]
    fn test_apply_row_sort() {
        let mut m = test_matrix();

        m.apply_row_sort(["r2", "r3", "r1"]);

        assert_eq!(m.row_keys(), keys(&["r2", "r3", "r1"]));
        assert_eq!(
            pairs(m.get_column("c1")),
            vec![
                (Key::from("r2"), 21),
                (Key::from("r3"), 31),
                (Key::from("r1"), 11)
            ]
        );
    }

    #[test]
    fn test_apply_column_sort() {
        let mut m = test_matrix();

        m.apply_column_sort(["c3", "c2", "c1"]);

        assert_eq!(
            pairs(m.get_row("r1")),
            vec![
                (Key::from("c3"), 13),
                (Key::from("c2"), 12),
                (Key::from("c1"), 11)
            ]
        );
        assert_eq!(m.column_keys(), keys(&["c3", "c2", "c1"]));
    }

    #[test]
    fn test_row_sort_never_drops_rows() {
        let mut m = test_matrix();

        // r1 and r3 are unmentioned: appended in their relative order.
        // The unknown key is ignored.
        m.apply_row_sort(["r2", "r9"]);

        assert_eq!(m.row_keys(), keys(&["r2", "r1", "r3"]));
        assert_eq!(m.dimensions(), (3, 3));
    }

    #[test]
    fn test_sort_rows_matches_apply_row_sort() {
        let m1 = test_matrix();
        let mut m2 = m1.clone();
        let mut m1 = m1;

        let order = keys(&["r3", "r2", "r1"]);

        m1.sort_rows(|_keys| order.clone());
        m2.apply_row_sort(order);

        assert_eq!(m1, m2);
    }

    #[test]
    fn test_sort_columns_matches_apply_column_sort() {
        let m1 = test_matrix();
        let mut m2 = m1.clone();
        let mut m1 = m1;

        let order = keys(&["c3", "c2", "c1"]);

        m1.sort_columns(|_keys| order.clone());
        m2.apply_column_sort(order);

        assert_eq!(m1, m2);
    }

    #[test]
    fn test_sort_callback_sees_current_order_once() {
        let mut m = test_matrix();
        let mut calls = 0;

        m.sort_rows(|current| {
            calls += 1;
            assert_eq!(current, keys(&["r1", "r2", "r3"]));
            let mut reversed = current.to_vec();
            reversed.reverse();
            reversed
        });

        assert_eq!(calls, 1);
        assert_eq!(m.row_keys(), keys(&["r3", "r2", "r1"]));
    }

    #[test]
    fn test_get_first_row() {
        let m = test_matrix();
        assert_eq!(
            pairs(m.get_first_row()),
            vec![
                (Key::from("c1"), 11),
                (Key::from("c2"), 12),
                (Key::from("c3"), 13)
            ]
        );
    }

    #[test]
    fn test_get_first_column() {
        let m = test_matrix();
        assert_eq!(
            pairs(m.get_first_column()),
            vec![
                (Key::from("r1"), 11),
                (Key::from("r2"), 21),
                (Key::from("r3"), 31)
            ]
        );
    }

    #[test]
    fn test_first_accessors_follow_sorts() {
        let mut m = test_matrix();
        m.apply_row_sort(["r3"]);
        m.apply_column_sort(["c2"]);

        assert_eq!(
            pairs(m.get_first_row()),
            vec![
                (Key::from("c2"), 32),
                (Key::from("c1"), 31),
                (Key::from("c3"), 33)
            ]
        );
        assert_eq!(
            pairs(m.get_first_column()),
            vec![
                (Key::from("r3"), 32),
                (Key::from("r1"), 12),
                (Key::from("r2"), 22)
            ]
        );
    }

    #[test]
    fn test_first_accessors_on_empty_matrix() {
        let m: Matrix<i32> = Matrix::new();
        assert!(m.get_first_row().is_empty());
        assert!(m.get_first_column().is_empty());
        assert!(m.is_empty());
        assert_eq!(m.dimensions(), (0, 0));
    }

    #[test]
    fn test_set_row_totals() {
        let mut m = Matrix::new();

        m.set(1, 1, 50);
        m.set(1, 2, 75);
        m.set(2, 1, 9);
        m.set(2, 2, 1);

        // keyed arithmetic: the aggregator indexes by the real column keys
        m.set_row_totals(
            |row| row[&Key::from(2)] - row[&Key::from(1)],
            "totals_column",
        );

        assert_eq!(m.get(1, "totals_column"), Some(&25));
        assert_eq!(m.get(2, "totals_column"), Some(&-8));
        assert_eq!(m.dimensions(), (2, 3));
    }

    #[test]
    fn test_set_column_totals() {
        let mut m = Matrix::new();

        m.set(1, 1, 20);
        m.set(1, 2, 2);
        m.set(2, 1, 30);
        m.set(2, 2, 6);

        m.set_column_totals(
            |column| column[&Key::from(2)] - column[&Key::from(1)],
            "totals_row",
        );

        assert_eq!(m.get("totals_row", 1), Some(&10));
        assert_eq!(m.get("totals_row", 2), Some(&4));
        // the synthetic row is appended after the existing rows
        assert_eq!(
            m.row_keys(),
            vec![Key::from(1), Key::from(2), Key::from("totals_row")]
        );
    }

    #[test]
    fn test_row_totals_skip_missing_cells() {
        let mut m = Matrix::new();
        m.set("r1", "c1", 1);
        m.set("r1", "c2", 2);
        m.set("r2", "c1", 10);

        m.set_row_totals(|row| row.values().sum::<i32>(), "total");

        assert_eq!(m.get("r1", "total"), Some(&3));
        assert_eq!(m.get("r2", "total"), Some(&10));
    }

    #[test]
    fn test_try_set_row_totals_error_leaves_matrix_unchanged() {
        let mut m = test_matrix();
        let before = m.clone();

        let result = m.try_set_row_totals(
            |row| {
                if row.contains_key(&Key::from("c1")) {
                    Err("aggregation failed")
                } else {
                    Ok(0)
                }
            },
            "total",
        );

        assert_eq!(result, Err("aggregation failed"));
        assert_eq!(m, before);
    }

    #[test]
    fn test_try_set_column_totals_error_leaves_matrix_unchanged() {
        let mut m = test_matrix();
        let before = m.clone();

        let result: Result<(), &str> =
            m.try_set_column_totals(|_column| Err("boom"), "totals_row");

        assert_eq!(result, Err("boom"));
        assert_eq!(m, before);
    }

    #[test]
    fn test_try_totals_success() {
        let mut m = test_matrix();
        let result: Result<(), &str> =
            m.try_set_row_totals(|row| Ok(row.values().sum::<i32>()), "total");

        assert_eq!(result, Ok(()));
        assert_eq!(m.get("r1", "total"), Some(&36));
    }

    #[test]
    fn test_clone_is_independent() {
        let source = test_matrix();
        let mut copy = source.clone();

        copy.set("r1", "c1", 999);
        copy.delete_row("r2");

        assert_eq!(source.get("r1", "c1"), Some(&11));
        assert_eq!(source.dimensions(), (3, 3));
        assert_ne!(source, copy);
    }

    #[test]
    fn test_ordered_equality() {
        let m1 = test_matrix();
        let mut m2 = test_matrix();
        assert_eq!(m1, m2);

        // same cells, different row order: not equal
        m2.apply_row_sort(["r2", "r1", "r3"]);
        assert_ne!(m1, m2);
    }

    #[test]
    fn test_trait_access() {
        fn describe<T: TableOps>(table: &T) -> (usize, usize, usize) {
            let (rows, cols) = table.dimensions();
            (rows, cols, table.cell_count())
        }

        let m = test_matrix();
        assert_eq!(describe(&m), (3, 3, 9));
        assert_eq!(m.cell(&Key::from("r2"), &Key::from("c3")), Some(&23));
    }
}
