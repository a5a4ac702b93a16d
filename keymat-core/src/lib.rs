#![no_std]

//! Keymat Core - Keyed Sparse Matrix Definitions
//!
//! This crate provides the key scalar type, ordering primitives, and access
//! traits for associatively-keyed sparse matrices. No I/O, no std.

extern crate alloc;

pub mod error;
pub mod key;
pub mod order;
pub mod traits;

pub use error::*;
pub use key::*;
pub use order::*;
pub use traits::*;

/// Insertion-order-preserving associative map used throughout keymat.
///
/// Row order, and column order within each row, are significant: they define
/// iteration order until a sort is applied. The hasher comes from hashbrown
/// so the alias works without std.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, hashbrown::hash_map::DefaultHashBuilder>;
