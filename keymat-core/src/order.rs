//! Reordering primitive shared by every row/column sort entry point
//!
//! Both the explicit-order and the callback-driven sort operations reduce to
//! the same permutation application, which guarantees they agree whenever
//! they are given the same resulting order.

use alloc::vec::Vec;

use crate::key::Key;
use crate::OrderedMap;

/// Resolve a requested key order against the keys currently present.
///
/// The result contains every requested key that actually exists, in the
/// requested order, followed by every remaining current key in its existing
/// relative order. Unknown requested keys are ignored, duplicates in the
/// request are collapsed, and no current key is ever dropped.
pub fn resolve_order(current: &[Key], requested: &[Key]) -> Vec<Key> {
    let mut resolved: Vec<Key> = Vec::with_capacity(current.len());

    for key in requested {
        if current.contains(key) && !resolved.contains(key) {
            resolved.push(key.clone());
        }
    }

    for key in current {
        if !resolved.contains(key) {
            resolved.push(key.clone());
        }
    }

    resolved
}

/// Reorder a map in place to follow the requested key order.
///
/// Applies [`resolve_order`] and then stable-sorts the map entries by their
/// resolved rank. Values are untouched.
pub fn apply_order<V>(map: &mut OrderedMap<Key, V>, requested: &[Key]) {
    let current: Vec<Key> = map.keys().cloned().collect();
    let rank: hashbrown::HashMap<Key, usize> = resolve_order(&current, requested)
        .into_iter()
        .enumerate()
        .map(|(position, key)| (key, position))
        .collect();

    // Every current key has a rank, so the index never misses.
    map.sort_by(|a, _, b, _| rank[a].cmp(&rank[b]));
}
