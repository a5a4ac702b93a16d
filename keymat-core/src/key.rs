//! Row and column key scalar for keyed sparse matrices
//!
//! Keys are arbitrary scalars rather than dense numeric indices: a row or
//! column is identified by either an integer or a string.

use alloc::string::String;

/// A row or column key: an integer or a string scalar.
///
/// Equality is strict across the two variants: `Key::Int(1)` and
/// `Key::Str("1")` are different keys. The coercion rule is simply that a
/// cell is looked up with the same kind of key it was inserted with.
///
/// Integers order before strings, so keys can be sorted with the derived
/// `Ord` when a caller wants a deterministic key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(String::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{value}"),
            Key::Str(value) => write!(f, "{value}"),
        }
    }
}

/// Keys serialize as their display string so that record sets become JSON
/// objects (JSON object keys are always strings).
#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(value) => serializer.collect_str(value),
            Key::Str(value) => serializer.serialize_str(value),
        }
    }
}
