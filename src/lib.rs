//! # Heapsort with wall-clock timing
//!
//! Reads integers, sorts them in place with heapsort and reports how long
//! the sort took.
//!
//! ## Core Algorithm
//!
//! 1. **Heap construction**: sift down every internal node, deepest first
//! 2. **Extraction**: move the root to the end of the active region, shrink
//!    the heap by one, sift the new root down
//!
//! Result: ascending order in O(n log n) time and O(1) extra space.
//!
//! ## Usage Example
//!
//! ```
//! use heapbench::{heap_sort, read_sequence, time_sort};
//!
//! let mut values = read_sequence("4 10 3 5 1".as_bytes()).unwrap();
//! let elapsed = time_sort(&mut values);
//! assert_eq!(values, [1, 3, 4, 5, 10]);
//! assert!(elapsed.as_secs_f64() >= 0.0);
//!
//! let mut words = vec!["pear", "apple", "fig"];
//! heap_sort(&mut words);
//! assert_eq!(words, ["apple", "fig", "pear"]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod bench;  // Benchmark harness
pub mod heap;   // Heapsort engine
pub mod input;  // Integer input provider
pub mod plot;   // Benchmark charts
pub mod timing; // Sort timing and output sink

// Re-exports for convenience
pub use bench::{run_benchmarks, BenchmarkConfig, BenchmarkError, BenchmarkRecord, Case};
pub use heap::{build_max_heap, heap_sort, is_max_heap, sift_down, sort_extracted};
pub use input::{read_sequence, InputError};
pub use timing::{report_seconds, time_sort};
