//! In-place binary max-heap and heapsort
//!
//! The slice is viewed as a complete binary tree: index `i` has children
//! `2i + 1` and `2i + 2`. Only a prefix `[0, n)` is treated as the heap;
//! everything at or past `n` is left untouched.
//!
//! Sorting is two phases:
//! 1. **Construction**: sift down every internal node, last to first
//! 2. **Extraction**: swap the root into its final slot, shrink, sift down
//!
//! Time O(n log n) in every case, O(1) auxiliary space, not stable.

/// Left child of `i` in the array layout.
#[inline]
pub fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// Right child of `i` in the array layout.
#[inline]
pub fn right_child(i: usize) -> usize {
    2 * i + 2
}

/// Parent of `i`. The root has no parent.
#[inline]
pub fn parent(i: usize) -> Option<usize> {
    if i == 0 {
        None
    } else {
        Some((i - 1) / 2)
    }
}

/// Restore the max-heap property for the subtree rooted at `i` within the
/// active bound `n`.
///
/// Both child subtrees must already be valid heaps. A child only replaces
/// the current root on a strictly greater value, so equal keys never move.
///
/// Descends iteratively; never touches indices `>= n`.
///
/// # Panics
///
/// Panics if `n > seq.len()` or `i >= n`.
pub fn sift_down<T: Ord>(seq: &mut [T], n: usize, i: usize) {
    assert!(n <= seq.len(), "heap bound {n} exceeds length {}", seq.len());
    assert!(i < n, "sift-down root {i} outside heap bound {n}");

    let mut current = i;
    loop {
        let l = left_child(current);
        let r = right_child(current);

        let mut largest = current;
        if l < n && seq[l] > seq[largest] {
            largest = l;
        }
        if r < n && seq[r] > seq[largest] {
            largest = r;
        }

        if largest == current {
            break;
        }

        seq.swap(current, largest);
        current = largest;
    }
}

/// Turn the whole slice into a max-heap.
///
/// Leaves (indices `>= n/2`) are already heaps of size one, so only the
/// internal nodes are visited, from the deepest upward.
pub fn build_max_heap<T: Ord>(seq: &mut [T]) {
    let n = seq.len();
    for i in (0..n / 2).rev() {
        sift_down(seq, n, i);
    }
}

/// Extraction phase: turn a valid max-heap into an ascending sequence.
pub fn sort_extracted<T: Ord>(seq: &mut [T]) {
    debug_assert!(is_max_heap(seq, seq.len()));

    for i in (1..seq.len()).rev() {
        seq.swap(0, i);
        sift_down(seq, i, 0);
    }
}

/// Sort `seq` ascending in place.
///
/// ```
/// let mut values = vec![4, 10, 3, 5, 1];
/// heapbench::heap_sort(&mut values);
/// assert_eq!(values, [1, 3, 4, 5, 10]);
/// ```
pub fn heap_sort<T: Ord>(seq: &mut [T]) {
    build_max_heap(seq);
    sort_extracted(seq);
}

/// Check the max-heap property over the prefix `[0, n)`.
///
/// Returns `false` when `n` exceeds the slice length.
pub fn is_max_heap<T: Ord>(seq: &[T], n: usize) -> bool {
    if n > seq.len() {
        return false;
    }
    (1..n).all(|child| match parent(child) {
        Some(p) => seq[p] >= seq[child],
        None => true,
    })
}
