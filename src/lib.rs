//! # Streammedian
//!
//! Exact running median of an unbounded numeric stream.
//!
//! Values arrive one at a time; at any point the median of everything seen so
//! far can be read back. The main estimator, [`TwoHeapMedian`], inserts in
//! O(log n) and answers in O(1) regardless of insertion order (sorted,
//! reverse-sorted, all duplicates, isolated outliers).
//!
//! ## Features
//!
//! - **Two-heap median**: max-heap of the lower half, min-heap of the upper half
//! - **Sorted-buffer median**: exact quantiles for read-heavy workloads
//! - **Integer and float input**: anything implementing [`MedianValue`](value::MedianValue)
//! - **Explicit failures**: empty queries and non-finite input are errors, never
//!   silent numbers
//!
//! ## Quick Start
//!
//! ```rust
//! use streammedian::prelude::*;
//!
//! let mut median = TwoHeapMedian::new();
//! for latency_ms in [12, 7, 30, 9] {
//!     median.add(latency_ms).unwrap();
//! }
//! assert_eq!(median.median(), Ok(10.5));
//! ```
//!
//! ## Empty Streams
//!
//! ```rust
//! use streammedian::prelude::*;
//!
//! let mut median = TwoHeapMedian::<f64>::new();
//! assert_eq!(median.median(), Err(MedianError::Empty));
//!
//! // The estimator stays usable after a failed query
//! median.add(2.5).unwrap();
//! assert_eq!(median.median(), Ok(2.5));
//! ```
//!
//! ## Feature Flags
//!
//! Estimator families:
//! - `two-heap` (default): [`TwoHeapMedian`]
//! - `sorted` (default): [`SortedMedian`]
//! - `full`: Enable all estimator families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `cli`: Build the `streammedian` command line tool

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;
pub mod value;

#[cfg(any(feature = "two-heap", feature = "sorted"))]
pub mod median;

pub mod prelude {
    pub use crate::traits::*;
    pub use crate::value::MedianValue;

    #[cfg(feature = "two-heap")]
    pub use crate::median::TwoHeapMedian;

    #[cfg(feature = "sorted")]
    pub use crate::median::SortedMedian;
}

#[cfg(feature = "two-heap")]
#[cfg_attr(docsrs, doc(cfg(feature = "two-heap")))]
pub use median::TwoHeapMedian;

#[cfg(feature = "sorted")]
#[cfg_attr(docsrs, doc(cfg(feature = "sorted")))]
pub use median::SortedMedian;
