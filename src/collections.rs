//! Slice helpers: in-place shuffle and order-preserving dedupe.

#[cfg(test)]
#[path = "collections_test.rs"]
mod collections_test;

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

/// Shuffle `items` in place with the thread-local RNG.
pub fn shuffle<T>(items: &mut [T]) {
    shuffle_with(items, &mut rand::rng());
}

/// Fisher–Yates shuffle driven by `rng`.
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut remaining = items.len();
    while remaining > 1 {
        let pick = rng.random_range(0..remaining);
        remaining -= 1;
        items.swap(remaining, pick);
    }
}

/// Distinct values of `items`, keeping the first occurrence of each.
#[must_use]
pub fn dedupe<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}
