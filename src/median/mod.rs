//! Exact running median estimators
//!
//! This module provides estimators that answer "what is the median of
//! everything seen so far" over an unbounded numeric stream.
//!
//! # Algorithms
//!
//! - [`TwoHeapMedian`]: max-heap/min-heap pair, O(log n) insert and O(1) median
//! - [`SortedMedian`]: sorted buffer, O(n) insert and O(1) median or quantile
//!
//! # Example
//!
//! ```
//! use streammedian::median::TwoHeapMedian;
//! use streammedian::traits::{Estimator, MedianEstimator};
//!
//! let mut median = TwoHeapMedian::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0] {
//!     median.add(value).unwrap();
//! }
//!
//! assert_eq!(median.median(), Ok(5.5));
//! ```

#[cfg(feature = "sorted")]
mod sorted;
#[cfg(feature = "two-heap")]
mod two_heap;

#[cfg(feature = "sorted")]
pub use sorted::SortedMedian;
#[cfg(feature = "two-heap")]
pub use two_heap::TwoHeapMedian;
