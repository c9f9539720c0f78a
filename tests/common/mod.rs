//! Shared assertions for sort tests

#![allow(dead_code)]

use std::collections::BTreeMap;

/// Non-decreasing order check.
pub fn is_sorted<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Count of each distinct value.
pub fn multiset<T: Ord + Clone>(values: &[T]) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }
    counts
}
