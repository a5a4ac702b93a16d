//! Error types for keymat operations

use crate::key::Key;

/// Errors that can occur during keymat operations
///
/// Reads with unknown keys and deletions of absent rows or columns are
/// deliberately infallible, so the only failures left are the strict label
/// lookups during record-set conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymatError {
    /// A data row has no entry in the row label mapping
    MissingRowLabel(Key),
    /// A column has no entry in the column label mapping
    MissingColumnLabel(Key),
}

impl core::fmt::Display for KeymatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KeymatError::MissingRowLabel(key) => write!(f, "No label for row key `{key}`"),
            KeymatError::MissingColumnLabel(key) => write!(f, "No label for column key `{key}`"),
        }
    }
}

/// Result type for keymat operations
pub type Result<T> = core::result::Result<T, KeymatError>;
