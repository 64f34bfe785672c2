//! Two-heap running median
//!
//! The stream is split into a lower half, kept in a max-heap, and an upper
//! half, kept in a min-heap. After every insert:
//!
//! - every value in the lower half is `<=` every value in the upper half
//! - the lower half holds as many values as the upper half, or one more
//!
//! so the median is always readable from the two heap tops.
//!
//! # Thread Safety
//!
//! `TwoHeapMedian` is `Send + Sync` but every mutation takes `&mut self`.
//! Callers with several producers should wrap it in a `Mutex` or feed it
//! from a single-writer channel.

use crate::traits::{Estimator, InvalidValue, MedianError, MedianEstimator};
use crate::value::{midpoint, MedianValue, Ordered};
use core::cmp::Reverse;

#[cfg(feature = "std")]
use std::collections::BinaryHeap;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::BinaryHeap;

/// Exact running median over a numeric stream
///
/// - O(log n) insertion
/// - O(1) median query
/// - O(n) memory: every value is retained
///
/// Each insert pushes the new value onto the lower half unconditionally, then
/// repairs ordering between the halves, then repairs their sizes. Each repair
/// moves at most one value, so an insert costs at most three heap pushes.
///
/// # Example
///
/// ```
/// use streammedian::median::TwoHeapMedian;
/// use streammedian::traits::{Estimator, MedianError, MedianEstimator};
///
/// let mut median = TwoHeapMedian::new();
/// assert_eq!(median.median(), Err(MedianError::Empty));
///
/// median.add(5).unwrap();
/// assert_eq!(median.median(), Ok(5.0));
///
/// median.add(2).unwrap();
/// assert_eq!(median.median(), Ok(3.5));
///
/// median.add(8).unwrap();
/// assert_eq!(median.median(), Ok(5.0));
/// ```
///
/// Non-finite floats are rejected without touching the estimator:
///
/// ```
/// use streammedian::median::TwoHeapMedian;
/// use streammedian::traits::{Estimator, InvalidValue, MedianEstimator};
///
/// let mut median = TwoHeapMedian::new();
/// median.add(1.5).unwrap();
/// assert_eq!(median.add(f64::NAN), Err(InvalidValue::NaN));
/// assert_eq!(median.median(), Ok(1.5));
/// ```
#[derive(Clone, Debug)]
pub struct TwoHeapMedian<T: MedianValue> {
    /// Smaller half of the stream, largest on top
    lower: BinaryHeap<Ordered<T>>,
    /// Larger half of the stream, smallest on top
    upper: BinaryHeap<Reverse<Ordered<T>>>,
}

impl<T: MedianValue> Default for TwoHeapMedian<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MedianValue> TwoHeapMedian<T> {
    /// Create an empty estimator
    pub fn new() -> Self {
        Self {
            lower: BinaryHeap::new(),
            upper: BinaryHeap::new(),
        }
    }

    /// Create an empty estimator with room for `capacity` values before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        let upper = capacity / 2;
        Self {
            lower: BinaryHeap::with_capacity(capacity - upper),
            upper: BinaryHeap::with_capacity(upper),
        }
    }

    /// Build an estimator from a sequence of values
    ///
    /// Stops at the first invalid value and returns its error.
    pub fn try_from_values<I>(values: I) -> Result<Self, InvalidValue>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let mut estimator = Self::with_capacity(values.size_hint().0);
        for value in values {
            estimator.push(value)?;
        }
        Ok(estimator)
    }

    /// Number of values seen
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Number of values in the lower half
    pub fn lower_len(&self) -> usize {
        self.lower.len()
    }

    /// Number of values in the upper half
    pub fn upper_len(&self) -> usize {
        self.upper.len()
    }

    /// Largest value of the lower half
    pub fn lower_max(&self) -> Option<T> {
        self.lower.peek().map(|top| top.0)
    }

    /// Smallest value of the upper half
    pub fn upper_min(&self) -> Option<T> {
        self.upper.peek().map(|Reverse(top)| top.0)
    }

    fn push(&mut self, value: T) -> Result<(), InvalidValue> {
        let value = value.validate()?;

        self.lower.push(Ordered(value));

        // Only the new value, or the lower max it displaced, can be out of order.
        let out_of_order = matches!(
            (self.lower.peek(), self.upper.peek()),
            (Some(lower_max), Some(Reverse(upper_min))) if lower_max > upper_min
        );
        if out_of_order {
            self.lower_to_upper();
        }

        if self.lower.len() > self.upper.len() + 1 {
            self.lower_to_upper();
        } else if self.upper.len() > self.lower.len() {
            self.upper_to_lower();
        }

        debug_assert!(self.halves_are_consistent());
        Ok(())
    }

    /// Move the lower max into the upper half
    #[inline]
    fn lower_to_upper(&mut self) {
        let value = self.lower.pop();
        debug_assert!(value.is_some(), "lower half drained while rebalancing");
        if let Some(value) = value {
            self.upper.push(Reverse(value));
        }
    }

    /// Move the upper min into the lower half
    #[inline]
    fn upper_to_lower(&mut self) {
        let value = self.upper.pop();
        debug_assert!(value.is_some(), "upper half drained while rebalancing");
        if let Some(Reverse(value)) = value {
            self.lower.push(value);
        }
    }

    fn halves_are_consistent(&self) -> bool {
        let ordered = match (self.lower.peek(), self.upper.peek()) {
            (Some(lower_max), Some(Reverse(upper_min))) => lower_max <= upper_min,
            _ => true,
        };
        let balanced =
            self.lower.len() == self.upper.len() || self.lower.len() == self.upper.len() + 1;
        ordered && balanced
    }
}

impl<T: MedianValue> Estimator for TwoHeapMedian<T> {
    type Value = T;

    fn add(&mut self, value: T) -> Result<(), InvalidValue> {
        self.push(value)
    }

    fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.lower.capacity() * core::mem::size_of::<Ordered<T>>()
            + self.upper.capacity() * core::mem::size_of::<Reverse<Ordered<T>>>()
    }

    fn count(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: MedianValue> MedianEstimator for TwoHeapMedian<T> {
    fn median(&self) -> Result<f64, MedianError> {
        let lower_max = self.lower.peek().ok_or(MedianError::Empty)?.0.to_f64();
        if self.lower.len() > self.upper.len() {
            return Ok(lower_max);
        }
        // Equal sizes with a non-empty lower half imply a non-empty upper half.
        let upper_min = self.upper.peek();
        debug_assert!(upper_min.is_some(), "upper half empty at even count");
        match upper_min {
            Some(Reverse(upper_min)) => Ok(midpoint(lower_max, upper_min.0.to_f64())),
            None => Ok(lower_max),
        }
    }
}
