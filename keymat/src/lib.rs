//! Keymat - Sparse Associatively-Keyed Matrix
//!
//! This library provides a sparse two-dimensional container that maps a
//! (row key, column key) pair to a value, where keys are arbitrary scalars
//! (strings or integers) rather than dense numeric indices. It is built for
//! synchronous report generation: point access, whole-row/column retrieval
//! and deletion, custom reordering, computed totals, and conversion into a
//! labeled record set with a header row.
//!
//! ## Architecture
//!
//! Keymat follows a clean definition/implementation separation:
//!
//! - **keymat-core**: Key scalar, ordering primitive, access traits (no I/O, no std)
//! - **keymat**: The concrete [`Matrix`] container and record-set rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use keymat::Matrix;
//!
//! let mut sales = Matrix::new();
//! sales.set("widgets", "q1", 120);
//! sales.set("widgets", "q2", 80);
//! sales.set("gadgets", "q1", 45);
//!
//! // One synthetic column, computed per row over the row's real cells
//! sales.set_row_totals(|row| row.values().sum::<i32>(), "total");
//! assert_eq!(sales.get("widgets", "total"), Some(&200));
//!
//! // Rows need not share a column set
//! assert_eq!(sales.dimensions(), (2, 3));
//! assert_eq!(sales.get("gadgets", "q2"), None);
//! ```
//!
//! ## Features
//!
//! - **Insertion-order iteration**: row and column order are preserved until
//!   a sort is applied
//! - **Never-lose-data sorting**: keys omitted from a requested order are
//!   appended, unknown keys are ignored
//! - **Keyed aggregation**: totals callbacks see values keyed by the real
//!   row/column keys
//! - **Record-set output**: ordered, labeled tabular structure ready for a
//!   rendering layer or JSON (with the `serde` feature)

// Re-export core definitions
pub use keymat_core::{
    // Key scalar and ordered map alias
    Key, OrderedMap,
    // Access traits
    SparseTable, TableOps,
    // Error handling
    KeymatError, Result,
    // Reordering primitive
    resolve_order,
};

// Implementation modules
pub mod matrix;
pub mod record_set;

// Public exports
pub use matrix::Matrix;
pub use record_set::{Field, Headings, Record, RecordSet};
